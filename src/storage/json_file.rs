//! Flat JSON-array record file
//!
//! The whole collection lives in one pretty-printed JSON array, rewritten on
//! every mutation. A missing file is an empty store. An undecodable file is
//! also read as empty (with a warning) and is replaced on the next write.

use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing::{debug, warn};

use super::persistence::{ImpactStore, StoreError};
use crate::types::ImpactResult;

pub struct JsonFileStore {
    path: PathBuf,
    /// Serialises read-modify-write cycles within this process.
    write_lock: Mutex<()>,
}

impl JsonFileStore {
    /// Use `path` as the record file. Nothing is created until the first write.
    pub fn open<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<Vec<ImpactResult>, StoreError> {
        let bytes = match std::fs::read(&self.path) {
            Ok(b) => b,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        match serde_json::from_slice(&bytes) {
            Ok(records) => Ok(records),
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "Impact file unreadable, treating as empty");
                Ok(Vec::new())
            }
        }
    }

    /// Write to a sibling temp file, then rename over the original.
    fn save(&self, records: &[ImpactResult]) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }

        let json = serde_json::to_vec_pretty(records)?;
        let mut tmp = self.path.clone().into_os_string();
        tmp.push(".tmp");
        let tmp = PathBuf::from(tmp);

        std::fs::write(&tmp, json)?;
        std::fs::rename(&tmp, &self.path)?;

        debug!(path = %self.path.display(), count = records.len(), "Impact file written");
        Ok(())
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, ()>, StoreError> {
        self.write_lock
            .lock()
            .map_err(|e| StoreError::Poisoned(e.to_string()))
    }
}

impl ImpactStore for JsonFileStore {
    fn append(&self, record: &ImpactResult) -> Result<(), StoreError> {
        let _guard = self.lock()?;
        let mut records = self.load()?;

        if records.iter().any(|r| r.id == record.id) {
            return Err(StoreError::DuplicateId(record.id.clone()));
        }
        records.push(record.clone());
        self.save(&records)
    }

    fn list(&self) -> Result<Vec<ImpactResult>, StoreError> {
        let _guard = self.lock()?;
        self.load()
    }

    fn delete(&self, id: &str) -> Result<bool, StoreError> {
        let _guard = self.lock()?;
        let records = self.load()?;

        let remaining: Vec<_> = records.iter().filter(|r| r.id != id).cloned().collect();
        if remaining.len() == records.len() {
            return Ok(false);
        }
        self.save(&remaining)?;
        Ok(true)
    }

    fn backend_name(&self) -> &'static str {
        "JsonFile"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::persistence::{exercise_store, make_record};

    #[test]
    fn test_json_file_contract() {
        let tmp = tempfile::tempdir().expect("tempdir");
        exercise_store(&JsonFileStore::open(tmp.path().join("impacts.json")));
    }

    #[test]
    fn test_missing_file_is_empty() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let store = JsonFileStore::open(tmp.path().join("nope.json"));
        assert!(store.list().unwrap().is_empty());
        assert!(!store.delete("sim_12345").unwrap());
        assert!(!store.path().exists(), "a miss must not create the file");
    }

    #[test]
    fn test_corrupt_file_reads_empty_and_recovers() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let path = tmp.path().join("impacts.json");
        std::fs::write(&path, "{ not json").unwrap();

        let store = JsonFileStore::open(&path);
        assert!(store.list().unwrap().is_empty());

        store.append(&make_record("sim_20000")).unwrap();
        assert_eq!(store.list().unwrap().len(), 1);
    }

    #[test]
    fn test_file_layout_is_plain_array() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let path = tmp.path().join("impacts.json");
        let store = JsonFileStore::open(&path);
        store.append(&make_record("sim_30000")).unwrap();

        let raw = std::fs::read_to_string(&path).unwrap();
        let v: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert!(v.is_array());
        assert_eq!(v[0]["id"], "sim_30000");
        assert_eq!(v[0]["population_affected"], 31_451);
        assert!(raw.contains("\n  "), "file should be indented");
    }

    #[test]
    fn test_survives_reopen() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let path = tmp.path().join("nested").join("impacts.json");
        JsonFileStore::open(&path)
            .append(&make_record("sim_40000"))
            .unwrap();

        let reopened = JsonFileStore::open(&path);
        assert!(reopened.contains("sim_40000").unwrap());
    }
}
