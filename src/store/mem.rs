//! In-memory word storage backed by DashMap.
//!
//! Used for tests and ephemeral servers. All data is lost on process exit.

use dashmap::DashMap;
use dashmap::mapref::entry::Entry;

use crate::error::StoreError;
use crate::lexicon::WordRecord;
use crate::store::{StoreResult, WordStore};

/// Concurrent in-memory store keyed by word id.
#[derive(Debug)]
pub struct MemStore {
    words: DashMap<String, WordRecord>,
}

impl MemStore {
    /// Create an empty in-memory store.
    pub fn new() -> Self {
        Self {
            words: DashMap::new(),
        }
    }

    /// Create a store with pre-allocated capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            words: DashMap::with_capacity(capacity),
        }
    }

    /// Get a clone of a record by id.
    pub fn get(&self, id: &str) -> Option<WordRecord> {
        self.words.get(id).map(|r| r.value().clone())
    }
}

impl Default for MemStore {
    fn default() -> Self {
        Self::new()
    }
}

impl WordStore for MemStore {
    // Snapshot; not a consistent view under concurrent writes.
    fn all_words(&self) -> StoreResult<Vec<WordRecord>> {
        Ok(self.words.iter().map(|entry| entry.value().clone()).collect())
    }

    fn insert(&self, record: &WordRecord) -> StoreResult<()> {
        match self.words.entry(record.id.clone()) {
            Entry::Occupied(_) => Err(StoreError::DuplicateId {
                id: record.id.clone(),
            }),
            Entry::Vacant(slot) => {
                slot.insert(record.clone());
                Ok(())
            }
        }
    }

    fn len(&self) -> StoreResult<usize> {
        Ok(self.words.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: &str) -> WordRecord {
        WordRecord {
            id: id.into(),
            word: format!("w{id}"),
            meaning: vec![],
            word_type: "special".into(),
            phonetic: String::new(),
            combination: None,
        }
    }

    #[test]
    fn insert_and_get() {
        let store = MemStore::new();
        store.insert(&record("a")).unwrap();
        assert_eq!(store.get("a").unwrap().word, "wa");
        assert_eq!(store.len().unwrap(), 1);
    }

    #[test]
    fn duplicate_id_rejected() {
        let store = MemStore::new();
        store.insert(&record("a")).unwrap();
        let err = store.insert(&record("a")).unwrap_err();
        assert!(matches!(err, StoreError::DuplicateId { .. }));
        assert_eq!(store.len().unwrap(), 1);
    }

    #[test]
    fn concurrent_inserts() {
        use std::sync::Arc;
        let store = Arc::new(MemStore::with_capacity(100));
        let handles: Vec<_> = (0..100)
            .map(|i| {
                let store = Arc::clone(&store);
                std::thread::spawn(move || {
                    store.insert(&record(&i.to_string())).unwrap();
                })
            })
            .collect();
        for h in handles {
            h.join().unwrap();
        }
        assert_eq!(store.all_words().unwrap().len(), 100);
    }
}
