//! ImpactStore trait: pluggable record storage
//!
//! Abstracts simulation persistence so backends can be swapped without
//! touching the HTTP layer:
//! - `InMemoryStore`: testing and throwaway deployments
//! - `JsonFileStore`: the flat `impacts.json` array
//! - `SledImpactStore`: embedded database

use crate::types::ImpactResult;

/// Trait for record storage backends
///
/// Records are create-once, delete-only. `list` returns them in append
/// order. Implementations must be thread-safe (Send + Sync) for shared
/// access across request handlers.
pub trait ImpactStore: Send + Sync {
    /// Append a record. Fails with `DuplicateId` if the id is taken.
    fn append(&self, record: &ImpactResult) -> Result<(), StoreError>;

    /// All records, oldest first
    fn list(&self) -> Result<Vec<ImpactResult>, StoreError>;

    /// Remove the record with exactly this id. `Ok(false)` if none matched.
    fn delete(&self, id: &str) -> Result<bool, StoreError>;

    /// Whether a record with this id exists
    fn contains(&self, id: &str) -> Result<bool, StoreError> {
        Ok(self.list()?.iter().any(|r| r.id == id))
    }

    /// Backend name for logging
    fn backend_name(&self) -> &'static str;
}

/// Store errors
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("database error: {0}")]
    Database(#[from] sled::Error),
    #[error("lock poisoned: {0}")]
    Poisoned(String),
    #[error("duplicate impact id: {0}")]
    DuplicateId(String),
    #[error("no free impact id after {0} attempts")]
    IdSpaceExhausted(usize),
    #[error("assessment has non-finite or saturated values and cannot be stored")]
    Unrepresentable,
}

/// In-memory store for testing and minimal deployments
///
/// Thread-safe via `RwLock`. Not durable; data lost on restart.
#[derive(Default)]
pub struct InMemoryStore {
    records: std::sync::RwLock<Vec<ImpactResult>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ImpactStore for InMemoryStore {
    fn append(&self, record: &ImpactResult) -> Result<(), StoreError> {
        let mut store = self
            .records
            .write()
            .map_err(|e| StoreError::Poisoned(e.to_string()))?;

        if store.iter().any(|r| r.id == record.id) {
            return Err(StoreError::DuplicateId(record.id.clone()));
        }
        store.push(record.clone());
        Ok(())
    }

    fn list(&self) -> Result<Vec<ImpactResult>, StoreError> {
        let store = self
            .records
            .read()
            .map_err(|e| StoreError::Poisoned(e.to_string()))?;

        Ok(store.clone())
    }

    fn delete(&self, id: &str) -> Result<bool, StoreError> {
        let mut store = self
            .records
            .write()
            .map_err(|e| StoreError::Poisoned(e.to_string()))?;

        let before = store.len();
        store.retain(|r| r.id != id);
        Ok(store.len() != before)
    }

    fn contains(&self, id: &str) -> Result<bool, StoreError> {
        let store = self
            .records
            .read()
            .map_err(|e| StoreError::Poisoned(e.to_string()))?;

        Ok(store.iter().any(|r| r.id == id))
    }

    fn backend_name(&self) -> &'static str {
        "InMemory"
    }
}

/// Fixture record shared by the backend tests.
#[cfg(test)]
pub(crate) fn make_record(id: &str) -> ImpactResult {
    ImpactResult {
        id: id.to_string(),
        name: "Simulated Impact (10.0, 20.0)".to_string(),
        latitude: 10.0,
        longitude: 20.0,
        diameter_m: 50.0,
        velocity_km_s: 20.0,
        energy_megatons: 9.39,
        impact_radius_km: 3.16,
        population_affected: 31_451,
        earthquake_magnitude: 0.4,
    }
}

/// Behaviour every backend must share.
#[cfg(test)]
pub(crate) fn exercise_store(store: &dyn ImpactStore) {
    assert!(store.list().unwrap().is_empty());

    for id in ["sim_10001", "sim_10002", "sim_10003"] {
        store.append(&make_record(id)).unwrap();
    }
    let ids: Vec<_> = store.list().unwrap().into_iter().map(|r| r.id).collect();
    assert_eq!(ids, ["sim_10001", "sim_10002", "sim_10003"]);

    // Listing twice without writes is stable
    assert_eq!(store.list().unwrap(), store.list().unwrap());

    // Duplicate ids are refused and leave the store untouched
    assert!(matches!(
        store.append(&make_record("sim_10002")),
        Err(StoreError::DuplicateId(_))
    ));
    assert_eq!(store.list().unwrap().len(), 3);

    // Unknown id: not found, nothing changes
    assert!(!store.delete("sim_99999").unwrap());
    assert_eq!(store.list().unwrap().len(), 3);

    // Known id: exactly one record removed, order preserved
    assert!(store.contains("sim_10002").unwrap());
    assert!(store.delete("sim_10002").unwrap());
    assert!(!store.contains("sim_10002").unwrap());
    let ids: Vec<_> = store.list().unwrap().into_iter().map(|r| r.id).collect();
    assert_eq!(ids, ["sim_10001", "sim_10003"]);

    // Deleting again is a no-op
    assert!(!store.delete("sim_10002").unwrap());
}
