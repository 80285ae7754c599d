use std::path::Path;
use std::sync::Arc;

use redb::{Database, TableDefinition};
use tracing::debug;

use crate::error::KVError;
use crate::traits::KVStore;

const TABLE: TableDefinition<&str, &[u8]> = TableDefinition::new("documents");

fn storage(e: impl ToString) -> KVError {
    KVError::Storage(e.to_string())
}

/// RedbStore is a KVStore implementation backed by redb, a pure-Rust embedded
/// key-value database. Every write runs in its own committed transaction.
pub struct RedbStore {
    db: Arc<Database>,
}

impl RedbStore {
    /// Open or create a redb database at the given path.
    pub fn open(path: &Path) -> Result<Self, KVError> {
        let db = Database::create(path).map_err(storage)?;

        // Ensure the table exists so reads on a fresh file don't fail.
        let write_txn = db.begin_write().map_err(storage)?;
        {
            let _table = write_txn.open_table(TABLE).map_err(storage)?;
        }
        write_txn.commit().map_err(storage)?;

        debug!("opened redb store at {}", path.display());
        Ok(Self { db: Arc::new(db) })
    }
}

impl KVStore for RedbStore {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, KVError> {
        let read_txn = self.db.begin_read().map_err(storage)?;
        let table = read_txn.open_table(TABLE).map_err(storage)?;

        match table.get(key) {
            Ok(Some(val)) => Ok(Some(val.value().to_vec())),
            Ok(None) => Ok(None),
            Err(e) => Err(storage(e)),
        }
    }

    fn insert(&self, key: &str, value: &[u8]) -> Result<(), KVError> {
        let write_txn = self.db.begin_write().map_err(storage)?;
        {
            let mut table = write_txn.open_table(TABLE).map_err(storage)?;
            let replaced = table.insert(key, value).map_err(storage)?.is_some();
            if replaced {
                // Dropping the uncommitted transaction aborts it.
                return Err(KVError::AlreadyExists(key.to_string()));
            }
        }
        write_txn.commit().map_err(storage)?;
        Ok(())
    }

    fn count(&self, prefix: &str) -> Result<usize, KVError> {
        let read_txn = self.db.begin_read().map_err(storage)?;
        let table = read_txn.open_table(TABLE).map_err(storage)?;

        let mut count = 0;
        for entry in table.range(prefix..).map_err(storage)? {
            let (key, _) = entry.map_err(storage)?;
            if !key.value().starts_with(prefix) {
                break;
            }
            count += 1;
        }

        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn open_temp() -> (RedbStore, tempfile::TempDir) {
        let dir = tempfile::tempdir().unwrap();
        let store = RedbStore::open(&dir.path().join("test.redb")).unwrap();
        (store, dir)
    }

    #[test]
    fn insert_then_get() {
        let (store, _dir) = open_temp();
        store.insert("quote:submission:a", b"{}").unwrap();
        assert_eq!(store.get("quote:submission:a").unwrap(), Some(b"{}".to_vec()));
        assert_eq!(store.get("quote:submission:b").unwrap(), None);
    }

    #[test]
    fn insert_existing_key_keeps_first_value() {
        let (store, _dir) = open_temp();
        store.insert("k", b"first").unwrap();

        let err = store.insert("k", b"second").unwrap_err();
        assert!(matches!(err, KVError::AlreadyExists(ref k) if k == "k"));
        assert_eq!(store.get("k").unwrap(), Some(b"first".to_vec()));
    }

    #[test]
    fn count_respects_prefix() {
        let (store, _dir) = open_temp();
        store.insert("quote:submission:1", b"1").unwrap();
        store.insert("quote:submission:2", b"2").unwrap();
        store.insert("quote:other:1", b"x").unwrap();
        store.insert("zzz", b"z").unwrap();

        assert_eq!(store.count("quote:submission:").unwrap(), 2);
        assert_eq!(store.count("quote:").unwrap(), 3);
        assert_eq!(store.count("missing:").unwrap(), 0);
    }

    #[test]
    fn reopen_keeps_data() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("persist.redb");
        {
            let store = RedbStore::open(&path).unwrap();
            store.insert("k", b"v").unwrap();
        }
        let store = RedbStore::open(&path).unwrap();
        assert_eq!(store.count("").unwrap(), 1);
    }
}
