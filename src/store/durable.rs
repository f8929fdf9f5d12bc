//! ACID-durable word storage backed by redb.
//!
//! Records are stored as JSON under their id in a single `words` table.

use std::path::Path;
use std::sync::Arc;

use redb::{Database, ReadableTable, ReadableTableMetadata, TableDefinition};

use crate::error::StoreError;
use crate::lexicon::WordRecord;
use crate::store::{StoreResult, WordStore};

/// Word id → JSON-encoded [`WordRecord`].
const WORDS_TABLE: TableDefinition<&str, &[u8]> = TableDefinition::new("words");

/// Database file name inside the data directory.
pub const DB_FILE: &str = "eshakap.redb";

/// ACID-durable store using redb.
///
/// All writes go through transactions. Reads use MVCC snapshots.
pub struct DurableStore {
    db: Arc<Database>,
}

fn redb_err<E: std::fmt::Display>(op: &'static str) -> impl FnOnce(E) -> StoreError {
    move |e| StoreError::Redb {
        message: format!("{op} failed: {e}"),
    }
}

impl DurableStore {
    /// Open or create a durable store in the given directory.
    pub fn open(data_dir: &Path) -> StoreResult<Self> {
        std::fs::create_dir_all(data_dir).map_err(|e| StoreError::Io { source: e })?;
        let db_path = data_dir.join(DB_FILE);
        let db = Database::create(&db_path).map_err(|e| StoreError::Redb {
            message: format!("failed to open redb at {}: {e}", db_path.display()),
        })?;

        // Create the table up front so read transactions never see it missing.
        let txn = db.begin_write().map_err(redb_err("begin_write"))?;
        txn.open_table(WORDS_TABLE).map_err(redb_err("open_table"))?;
        txn.commit().map_err(redb_err("commit"))?;

        tracing::debug!(path = %db_path.display(), "opened word database");
        Ok(Self { db: Arc::new(db) })
    }

    /// Read one record by id. Returns `Ok(None)` if it doesn't exist.
    pub fn get(&self, id: &str) -> StoreResult<Option<WordRecord>> {
        let txn = self.db.begin_read().map_err(redb_err("begin_read"))?;
        let table = txn.open_table(WORDS_TABLE).map_err(redb_err("open_table"))?;
        let guard = table.get(id).map_err(redb_err("get"))?;
        guard.map(|value| decode(value.value())).transpose()
    }
}

fn decode(bytes: &[u8]) -> StoreResult<WordRecord> {
    serde_json::from_slice(bytes).map_err(|e| StoreError::Serialization {
        message: e.to_string(),
    })
}

impl WordStore for DurableStore {
    fn all_words(&self) -> StoreResult<Vec<WordRecord>> {
        let txn = self.db.begin_read().map_err(redb_err("begin_read"))?;
        let table = txn.open_table(WORDS_TABLE).map_err(redb_err("open_table"))?;
        let mut words = Vec::new();
        for entry in table.iter().map_err(redb_err("iter"))? {
            let (_, value) = entry.map_err(redb_err("iter"))?;
            words.push(decode(value.value())?);
        }
        Ok(words)
    }

    fn insert(&self, record: &WordRecord) -> StoreResult<()> {
        let bytes = serde_json::to_vec(record).map_err(|e| StoreError::Serialization {
            message: e.to_string(),
        })?;

        let txn = self.db.begin_write().map_err(redb_err("begin_write"))?;
        {
            let mut table = txn.open_table(WORDS_TABLE).map_err(redb_err("open_table"))?;
            let exists = table
                .get(record.id.as_str())
                .map_err(redb_err("get"))?
                .is_some();
            if exists {
                return Err(StoreError::DuplicateId {
                    id: record.id.clone(),
                });
            }
            table
                .insert(record.id.as_str(), bytes.as_slice())
                .map_err(redb_err("insert"))?;
        }
        txn.commit().map_err(redb_err("commit"))?;
        Ok(())
    }

    fn len(&self) -> StoreResult<usize> {
        let txn = self.db.begin_read().map_err(redb_err("begin_read"))?;
        let table = txn.open_table(WORDS_TABLE).map_err(redb_err("open_table"))?;
        let len = table.len().map_err(redb_err("len"))?;
        Ok(len as usize)
    }
}

impl std::fmt::Debug for DurableStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DurableStore").finish()
    }
}
