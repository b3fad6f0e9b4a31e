//! API route handlers
//!
//! - Index and health
//! - Impact listing, simulation and deletion
//! - NASA near-Earth-object feed

mod impacts;
mod neo;
mod status;

pub use impacts::*;
pub use neo::*;
pub use status::*;

use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::neo::NeoFeed;
use crate::storage::ImpactStore;

// ============================================================================
// API State
// ============================================================================

/// Shared state for API handlers
#[derive(Clone)]
pub struct ApiState {
    /// Simulation record store
    pub store: Arc<dyn ImpactStore>,
    /// NEO feed; `None` when no NASA API key is configured
    pub neo: Option<Arc<dyn NeoFeed>>,
    /// Process start, reported by `/health`
    pub started_at: DateTime<Utc>,
}

impl ApiState {
    pub fn new(store: Arc<dyn ImpactStore>, neo: Option<Arc<dyn NeoFeed>>) -> Self {
        Self {
            store,
            neo,
            started_at: Utc::now(),
        }
    }
}
