//! Impact Sim: Asteroid Impact Consequence Estimator
//!
//! Turns asteroid diameter, velocity and a population density into impact
//! energy, affected radius, population affected and an equivalent earthquake
//! magnitude, and serves the results over HTTP next to a historical catalog
//! and NASA's near-Earth-object feed.
//!
//! ## Architecture
//!
//! - **Physics Engine**: pure four-stage impact pipeline
//! - **Storage**: pluggable create/list/delete record store
//! - **NEO Feed**: NASA NeoWs browse client
//! - **API**: axum router over the above

pub mod api;
pub mod catalog;
pub mod config;
pub mod neo;
pub mod physics_engine;
pub mod storage;
pub mod types;

// Re-export configuration
pub use config::AppConfig;

// Re-export commonly used types
pub use types::{
    HistoricalImpact, ImpactEntry, ImpactRequest, ImpactResult, NeoFeedResponse, NeoSummary,
};

// Re-export the pipeline
pub use physics_engine::{assess_impact, try_assess_impact, ImpactAssessment};

// Re-export storage
pub use storage::{ImpactStore, InMemoryStore, JsonFileStore, SledImpactStore, StoreError};

// Re-export NEO components
pub use neo::{NeoClient, NeoClientError, NeoFeed};
