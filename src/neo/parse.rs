//! NeoWs browse payload → [`NeoSummary`]
//!
//! NASA's objects carry far more than the simulator needs. Only the fields
//! below are read, and every one of them is optional: a sparse object still
//! produces a summary with fallbacks instead of failing the whole page.

use serde::Deserialize;

use crate::config::defaults::NEO_FALLBACK_VELOCITY_KM_S;
use crate::physics_engine::round_to;
use crate::types::{NeoSummary, NumberOrString};

#[derive(Debug, Deserialize)]
pub struct BrowsePage {
    #[serde(default)]
    pub near_earth_objects: Vec<RawNeo>,
}

#[derive(Debug, Deserialize)]
pub struct RawNeo {
    #[serde(default)]
    id: Option<NumberOrString>,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    estimated_diameter: Option<EstimatedDiameter>,
    #[serde(default)]
    close_approach_data: Option<Vec<CloseApproach>>,
    #[serde(default)]
    is_potentially_hazardous_asteroid: Option<bool>,
}

#[derive(Debug, Deserialize)]
struct EstimatedDiameter {
    #[serde(default)]
    meters: Option<DiameterRange>,
}

#[derive(Debug, Deserialize)]
struct DiameterRange {
    #[serde(default)]
    estimated_diameter_max: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct CloseApproach {
    #[serde(default)]
    relative_velocity: Option<RelativeVelocity>,
}

#[derive(Debug, Deserialize)]
struct RelativeVelocity {
    #[serde(default)]
    kilometers_per_second: Option<NumberOrString>,
}

impl RawNeo {
    fn diameter_m(&self) -> f64 {
        self.estimated_diameter
            .as_ref()
            .and_then(|d| d.meters.as_ref())
            .and_then(|m| m.estimated_diameter_max)
            .unwrap_or(0.0)
    }

    /// Velocity of the first close approach, or the fallback.
    fn velocity_km_s(&self) -> f64 {
        self.close_approach_data
            .as_deref()
            .and_then(<[CloseApproach]>::first)
            .and_then(|c| c.relative_velocity.as_ref())
            .and_then(|v| v.kilometers_per_second.as_ref())
            .and_then(NumberOrString::as_f64)
            .unwrap_or(NEO_FALLBACK_VELOCITY_KM_S)
    }

    fn id(&self) -> Option<String> {
        self.id.as_ref().map(|id| match id {
            NumberOrString::Text(s) => s.clone(),
            NumberOrString::Number(n) => n.to_string(),
        })
    }

    pub fn summarize(&self) -> NeoSummary {
        NeoSummary {
            id: self.id(),
            name: self.name.clone(),
            diameter_m: round_to(self.diameter_m(), 2),
            velocity_km_s: round_to(self.velocity_km_s(), 2),
            hazardous: self.is_potentially_hazardous_asteroid.unwrap_or(false),
        }
    }
}

/// Decode a browse page and summarise every object on it.
pub fn summarize_browse_page(body: &[u8]) -> Result<Vec<NeoSummary>, serde_json::Error> {
    let page: BrowsePage = serde_json::from_slice(body)?;
    Ok(page.near_earth_objects.iter().map(RawNeo::summarize).collect())
}
