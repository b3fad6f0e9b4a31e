//! Sled-backed impact storage
//!
//! Keys come from `Db::generate_id()` as big-endian bytes, so iteration order
//! is append order. Values are JSON-serialized `ImpactResult`s.

use std::path::Path;
use std::sync::Arc;

use super::persistence::{ImpactStore, StoreError};
use crate::types::ImpactResult;

#[derive(Clone)]
pub struct SledImpactStore {
    db: Arc<sled::Db>,
    /// Serialises the duplicate check with the insert.
    write_lock: Arc<std::sync::Mutex<()>>,
}

impl SledImpactStore {
    /// Open or create the database at `path`
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        let path_ref = path.as_ref();
        let db = sled::open(path_ref)?;

        tracing::info!("Sled impact store opened at {:?}", path_ref);

        Ok(Self {
            db: Arc::new(db),
            write_lock: Arc::new(std::sync::Mutex::new(())),
        })
    }

    /// Find the key of the record with `id`.
    fn find_key(&self, id: &str) -> Result<Option<sled::IVec>, StoreError> {
        for item in self.db.iter() {
            let (key, value) = item?;
            match serde_json::from_slice::<ImpactResult>(&value) {
                Ok(record) if record.id == id => return Ok(Some(key)),
                Ok(_) => {}
                Err(e) => tracing::warn!("Skipping undecodable impact record: {}", e),
            }
        }
        Ok(None)
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, ()>, StoreError> {
        self.write_lock
            .lock()
            .map_err(|e| StoreError::Poisoned(e.to_string()))
    }
}

impl ImpactStore for SledImpactStore {
    fn append(&self, record: &ImpactResult) -> Result<(), StoreError> {
        let _guard = self.lock()?;

        if self.find_key(&record.id)?.is_some() {
            return Err(StoreError::DuplicateId(record.id.clone()));
        }

        let key = self.db.generate_id()?.to_be_bytes();
        let value = serde_json::to_vec(record)?;
        self.db.insert(key, value)?;
        self.db.flush()?;

        tracing::debug!(id = %record.id, "Stored impact");
        Ok(())
    }

    fn list(&self) -> Result<Vec<ImpactResult>, StoreError> {
        let mut records = Vec::with_capacity(self.db.len());

        for item in self.db.iter() {
            let (_key, value) = item?;
            match serde_json::from_slice::<ImpactResult>(&value) {
                Ok(record) => records.push(record),
                Err(e) => {
                    tracing::warn!("Failed to deserialize stored impact: {}", e);
                    continue;
                }
            }
        }

        Ok(records)
    }

    fn delete(&self, id: &str) -> Result<bool, StoreError> {
        let _guard = self.lock()?;

        let Some(key) = self.find_key(id)? else {
            return Ok(false);
        };
        self.db.remove(key)?;
        self.db.flush()?;

        tracing::debug!(id = %id, "Deleted impact");
        Ok(true)
    }

    fn contains(&self, id: &str) -> Result<bool, StoreError> {
        Ok(self.find_key(id)?.is_some())
    }

    fn backend_name(&self) -> &'static str {
        "Sled"
    }
}
