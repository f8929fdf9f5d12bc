//! Word storage for the Eshakap dictionary.
//!
//! Two backends implement [`WordStore`]:
//!
//! - [`MemStore`] — records in a concurrent hashmap (DashMap); lost on exit
//! - [`DurableStore`] — records in ACID transactions (redb)
//!
//! [`open`] picks one from an optional data directory.

pub mod durable;
pub mod mem;

use std::path::Path;
use std::sync::Arc;

use crate::error::StoreError;
use crate::lexicon::WordRecord;

pub use durable::DurableStore;
pub use mem::MemStore;

/// Result type for store operations.
pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// Minimal storage interface the dictionary needs: list everything, insert one.
///
/// Filtering and ordering happen above the store in [`crate::lexicon::Lexicon`].
pub trait WordStore: Send + Sync {
    /// Every stored record, in backend order.
    fn all_words(&self) -> StoreResult<Vec<WordRecord>>;

    /// Insert a new record. Fails with [`StoreError::DuplicateId`] if the id is taken.
    fn insert(&self, record: &WordRecord) -> StoreResult<()>;

    /// Number of stored records.
    fn len(&self) -> StoreResult<usize> {
        Ok(self.all_words()?.len())
    }

    fn is_empty(&self) -> StoreResult<bool> {
        Ok(self.len()? == 0)
    }
}

/// Open a durable store under `data_dir`, or a memory-only store when `None`.
pub fn open(data_dir: Option<&Path>) -> StoreResult<Arc<dyn WordStore>> {
    match data_dir {
        Some(dir) => Ok(Arc::new(DurableStore::open(dir)?)),
        None => Ok(Arc::new(MemStore::new())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: &str, word: &str) -> WordRecord {
        WordRecord {
            id: id.into(),
            word: word.into(),
            meaning: vec!["test".into()],
            word_type: "general".into(),
            phonetic: String::new(),
            combination: None,
        }
    }

    #[test]
    fn memory_only_when_no_dir() {
        let store = open(None).unwrap();
        assert!(store.is_empty().unwrap());
        store.insert(&record("1", "ka")).unwrap();
        assert_eq!(store.len().unwrap(), 1);
    }

    #[test]
    fn backends_agree_on_contents() {
        let dir = tempfile::TempDir::new().unwrap();
        let durable = open(Some(dir.path())).unwrap();
        let mem = open(None).unwrap();

        for (id, word) in [("1", "ka"), ("2", "šo"), ("3", "äp")] {
            durable.insert(&record(id, word)).unwrap();
            mem.insert(&record(id, word)).unwrap();
        }

        let mut a = durable.all_words().unwrap();
        let mut b = mem.all_words().unwrap();
        a.sort_by(|x, y| x.id.cmp(&y.id));
        b.sort_by(|x, y| x.id.cmp(&y.id));
        assert_eq!(a, b);
    }
}
