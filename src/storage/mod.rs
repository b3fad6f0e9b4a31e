//! Simulation record storage
//!
//! Records are appended once and only ever deleted afterwards. The backend
//! is chosen by `storage.backend` in the config; see [`open_store`].

pub mod json_file;
pub mod persistence;
pub mod sled_store;

pub use json_file::JsonFileStore;
pub use persistence::{ImpactStore, InMemoryStore, StoreError};
pub use sled_store::SledImpactStore;

use std::path::Path;
use std::sync::Arc;

use rand::Rng;
use tracing::{debug, info, warn};

use crate::config::defaults::{
    MAX_ID_ATTEMPTS, SIMULATION_ID_MAX, SIMULATION_ID_MIN, SIMULATION_ID_PREFIX,
};
use crate::config::{StorageBackend, StorageConfig};
use crate::physics_engine::ImpactAssessment;
use crate::types::{ImpactRequest, ImpactResult};

/// Open the backend described by `config`.
pub fn open_store(config: &StorageConfig) -> Result<Arc<dyn ImpactStore>, StoreError> {
    let store: Arc<dyn ImpactStore> = match config.backend {
        StorageBackend::Memory => Arc::new(InMemoryStore::new()),
        StorageBackend::Json => {
            let store = JsonFileStore::open(config.resolved_path());
            info!(path = %store.path().display(), "JSON impact store opened");
            Arc::new(store)
        }
        StorageBackend::Sled => Arc::new(SledImpactStore::open(config.resolved_path())?),
    };
    info!(backend = store.backend_name(), "Impact store ready");
    Ok(store)
}

/// Draw a random `sim_NNNNN` id.
pub fn random_impact_id<R: Rng + ?Sized>(rng: &mut R) -> String {
    format!(
        "{SIMULATION_ID_PREFIX}{}",
        rng.gen_range(SIMULATION_ID_MIN..=SIMULATION_ID_MAX)
    )
}

/// Build the record for a finished assessment and append it under a fresh id.
///
/// Ids are redrawn on collision; after `MAX_ID_ATTEMPTS` misses the store is
/// considered full. Assessments that would not survive a JSON round trip
/// are refused before anything is written.
pub fn record_simulation(
    store: &dyn ImpactStore,
    request: &ImpactRequest,
    assessment: &ImpactAssessment,
) -> Result<ImpactResult, StoreError> {
    if !assessment.is_representable() {
        warn!(?assessment, "Refusing to store unrepresentable assessment");
        return Err(StoreError::Unrepresentable);
    }

    let mut rng = rand::thread_rng();

    for attempt in 1..=MAX_ID_ATTEMPTS {
        let id = random_impact_id(&mut rng);
        if store.contains(&id)? {
            debug!(id = %id, attempt, "Impact id taken, redrawing");
            continue;
        }

        let record = ImpactResult::from_assessment(id, request, assessment);
        match store.append(&record) {
            Ok(()) => return Ok(record),
            // Lost a race with a concurrent append
            Err(StoreError::DuplicateId(id)) => {
                debug!(id = %id, attempt, "Impact id taken, redrawing");
            }
            Err(e) => return Err(e),
        }
    }

    warn!(attempts = MAX_ID_ATTEMPTS, "Could not allocate a free impact id");
    Err(StoreError::IdSpaceExhausted(MAX_ID_ATTEMPTS))
}

/// Remove the store's on-disk data so the next open starts empty.
pub fn reset_store_data(config: &StorageConfig) -> std::io::Result<()> {
    if config.backend == StorageBackend::Memory {
        return Ok(());
    }

    let path = config.resolved_path();
    if !path.exists() {
        info!(path = %path.display(), "Store data does not exist, nothing to reset");
        return Ok(());
    }

    warn!(path = %path.display(), "RESET requested - removing stored impacts");
    remove_path(&path)
}

fn remove_path(path: &Path) -> std::io::Result<()> {
    if path.is_dir() {
        std::fs::remove_dir_all(path)
    } else {
        std::fs::remove_file(path)
    }
}
