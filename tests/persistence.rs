//! Import and reopen tests for the redb-backed lexicon.

use eshakap::lexicon::{Lexicon, WordRecord};

fn records() -> Vec<WordRecord> {
    serde_json::from_value(serde_json::json!([
        {
            "id": "a1", "word": "pala", "meaning": ["water"], "type": "general",
            "phonetic": "ˈpa.la", "combination": null
        },
        {
            "id": "a2", "word": "äkaš", "meaning": ["fire", "flame"], "type": "Special",
            "phonetic": "", "combination": ["äka", "š"]
        },
        { "id": "a3", "word": "šo", "meaning": [], "type": "replaceable" }
    ]))
    .unwrap()
}

#[test]
fn imported_records_survive_reopen() {
    let dir = tempfile::TempDir::new().unwrap();
    {
        let lexicon = Lexicon::open(Some(dir.path())).unwrap();
        assert_eq!(lexicon.import(records()).unwrap(), 3);
    }

    let lexicon = Lexicon::open(Some(dir.path())).unwrap();
    assert_eq!(lexicon.count().unwrap(), 3);
    assert_eq!(lexicon.names().unwrap(), vec!["äkaš", "pala", "šo"]);

    let special = lexicon.fetch("", Some("2")).unwrap();
    assert_eq!(special.len(), 1);
    assert_eq!(special[0].id, "a2");
    assert_eq!(
        special[0].combination,
        Some(serde_json::json!(["äka", "š"]))
    );
}

#[test]
fn reimport_of_same_ids_fails_without_partial_duplicates() {
    let dir = tempfile::TempDir::new().unwrap();
    let lexicon = Lexicon::open(Some(dir.path())).unwrap();
    lexicon.import(records()).unwrap();
    assert!(lexicon.import(records()).is_err());
    assert_eq!(lexicon.count().unwrap(), 3);
}

#[test]
fn import_with_one_known_id_stores_nothing() {
    let dir = tempfile::TempDir::new().unwrap();
    {
        let lexicon = Lexicon::open(Some(dir.path())).unwrap();
        lexicon.import(records().into_iter().take(1)).unwrap();

        let mut batch = records();
        batch.rotate_left(1); // known id "a1" last
        assert!(lexicon.import(batch).is_err());
        assert_eq!(lexicon.count().unwrap(), 1);
    }

    let lexicon = Lexicon::open(Some(dir.path())).unwrap();
    assert_eq!(lexicon.names().unwrap(), vec!["pala"]);
}

#[test]
fn record_json_round_trips_through_store() {
    let dir = tempfile::TempDir::new().unwrap();
    let lexicon = Lexicon::open(Some(dir.path())).unwrap();
    lexicon.import(records()).unwrap();

    let stored = serde_json::to_value(lexicon.lookup("pala").unwrap()).unwrap();
    assert_eq!(
        stored,
        serde_json::json!([{
            "id": "a1", "word": "pala", "meaning": ["water"], "type": "general",
            "phonetic": "ˈpa.la", "combination": null
        }])
    );
}
