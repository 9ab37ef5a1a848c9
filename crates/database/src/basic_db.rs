use libmdbx::{Database, DatabaseOptions, TableFlags, WriteFlags, WriteMap};
use std::path::Path;
use std::sync::{Arc, Mutex};

/// Handle to the embedded libmdbx environment. Cloning shares the environment.
#[derive(Clone)]
pub struct InnerDatabase {
    db: Arc<Mutex<Database<WriteMap>>>,
}

/// Key/value access grouped by named table. Values are UTF-8 documents.
pub trait SafeDatabase: Clone + Send + Sync + 'static {
    fn new<P: AsRef<Path>>(path: P) -> Result<Self, libmdbx::Error>
    where
        Self: Sized;

    fn write(&self, key: &str, value: &str, table: &str) -> Result<(), libmdbx::Error>;

    /// Writes `value` only when `key` is absent. Returns `false` if the key was already taken.
    fn insert_new(&self, key: &str, value: &str, table: &str) -> Result<bool, libmdbx::Error>;

    fn read(&self, key: &str, table: &str) -> Result<Option<Vec<u8>>, libmdbx::Error>;

    /// Entries of `table` in key order.
    fn read_ordered(&self, table: &str) -> Result<Vec<(Vec<u8>, Vec<u8>)>, libmdbx::Error>;
}

impl SafeDatabase for InnerDatabase {
    fn new<P: AsRef<Path>>(path: P) -> Result<Self, libmdbx::Error> {
        let mut options = DatabaseOptions::default();
        options.max_tables = Some(16);
        let db = Database::<WriteMap>::open_with_options(path, options)?;

        Ok(Self {
            db: Arc::new(Mutex::new(db)),
        })
    }

    fn write(&self, key: &str, value: &str, table: &str) -> Result<(), libmdbx::Error> {
        let db = self.db.lock().expect("Failed to lock database mutex");
        let transaction = db.begin_rw_txn()?;
        let table = transaction.create_table(Some(table), TableFlags::default())?;

        transaction.put(&table, key, value, WriteFlags::default())?;
        transaction.commit()?;
        Ok(())
    }

    fn insert_new(&self, key: &str, value: &str, table: &str) -> Result<bool, libmdbx::Error> {
        let db = self.db.lock().expect("Failed to lock database mutex");
        let transaction = db.begin_rw_txn()?;
        let table = transaction.create_table(Some(table), TableFlags::default())?;

        let existing: Option<Vec<u8>> = transaction.get(&table, key.as_bytes())?;
        if existing.is_some() {
            return Ok(false);
        }

        transaction.put(&table, key, value, WriteFlags::default())?;
        transaction.commit()?;
        Ok(true)
    }

    fn read(&self, key: &str, table: &str) -> Result<Option<Vec<u8>>, libmdbx::Error> {
        let db = self.db.lock().expect("Failed to lock database mutex");
        let transaction = db.begin_ro_txn()?;

        if let Ok(table) = transaction.open_table(Some(table)) {
            let result = transaction.get(&table, key.as_bytes())?;
            return Ok(result);
        }

        Ok(None)
    }

    fn read_ordered(&self, table: &str) -> Result<Vec<(Vec<u8>, Vec<u8>)>, libmdbx::Error> {
        let mut entries = Vec::new();
        let db = self.db.lock().expect("Failed to lock database mutex");
        let transaction = db.begin_ro_txn()?;

        // A table that was never written to does not exist yet.
        if let Ok(table) = transaction.open_table(Some(table)) {
            let cursor = transaction.cursor(&table)?;

            for item in cursor {
                let (key, value) = item?;
                entries.push((key.to_vec(), value.to_vec()));
            }
        }

        Ok(entries)
    }
}
