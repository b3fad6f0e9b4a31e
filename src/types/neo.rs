//! Near-Earth-object summary types

use serde::{Deserialize, Serialize};

/// A NASA NEO condensed to what the impact simulator needs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NeoSummary {
    pub id: Option<String>,
    pub name: Option<String>,
    /// Upper estimate of the diameter (m), rounded to 0.01
    pub diameter_m: f64,
    /// Relative velocity at the first close approach (km/s), rounded to 0.01
    pub velocity_km_s: f64,
    /// NASA's potentially-hazardous flag
    pub hazardous: bool,
}

/// Body of `GET /nasa_asteroids`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NeoFeedResponse {
    pub count: usize,
    pub asteroids: Vec<NeoSummary>,
}

impl From<Vec<NeoSummary>> for NeoFeedResponse {
    fn from(asteroids: Vec<NeoSummary>) -> Self {
        Self {
            count: asteroids.len(),
            asteroids,
        }
    }
}

/// Paging for the NeoWs browse endpoint. Unset fields use NASA's defaults.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BrowseQuery {
    pub page: Option<u32>,
    pub size: Option<u32>,
}
