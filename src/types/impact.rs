//! Impact request and record types

use serde::{Deserialize, Serialize};

use super::lenient_f64;
use crate::config::defaults;
use crate::physics_engine::{round_to, ImpactAssessment};

// ============================================================================
// Request
// ============================================================================

/// Input to a single impact simulation.
///
/// Every field is optional on the wire and falls back to the values in
/// [`crate::config::defaults`]. Numbers may be sent quoted.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImpactRequest {
    /// Asteroid diameter (m)
    #[serde(deserialize_with = "lenient_f64")]
    pub diameter_m: f64,
    /// Entry velocity (km/s)
    #[serde(deserialize_with = "lenient_f64")]
    pub velocity_km_s: f64,
    /// Impact latitude (degrees, -90..=90)
    #[serde(deserialize_with = "lenient_f64")]
    pub latitude: f64,
    /// Impact longitude (degrees, -180..=180)
    #[serde(deserialize_with = "lenient_f64")]
    pub longitude: f64,
    /// People per km² around the impact site
    #[serde(deserialize_with = "lenient_f64")]
    pub pop_density_per_km2: f64,
}

impl Default for ImpactRequest {
    fn default() -> Self {
        Self {
            diameter_m: defaults::DEFAULT_DIAMETER_M,
            velocity_km_s: defaults::DEFAULT_VELOCITY_KM_S,
            latitude: defaults::DEFAULT_LATITUDE,
            longitude: defaults::DEFAULT_LONGITUDE,
            pop_density_per_km2: defaults::DEFAULT_POP_DENSITY_PER_KM2,
        }
    }
}

/// Errors raised while turning a request body into an [`ImpactRequest`].
#[derive(Debug, thiserror::Error)]
pub enum RequestError {
    #[error("invalid request field: {0}")]
    InvalidField(String),
    #[error("invalid impact parameters: {}", .0.join("; "))]
    Validation(Vec<String>),
}

impl ImpactRequest {
    /// Parse a raw POST body.
    ///
    /// An empty, non-JSON or non-object body means "use every default".
    /// A JSON object with a field of the wrong type is rejected.
    pub fn from_json_body(body: &[u8]) -> Result<Self, RequestError> {
        let Ok(value) = serde_json::from_slice::<serde_json::Value>(body) else {
            return Ok(Self::default());
        };
        if !value.is_object() {
            return Ok(Self::default());
        }
        serde_json::from_value(value).map_err(|e| RequestError::InvalidField(e.to_string()))
    }

    /// Check physical ranges, collecting every violation.
    pub fn validate(&self) -> Result<(), RequestError> {
        let mut errors = Vec::new();

        let fields = [
            ("diameter_m", self.diameter_m),
            ("velocity_km_s", self.velocity_km_s),
            ("latitude", self.latitude),
            ("longitude", self.longitude),
            ("pop_density_per_km2", self.pop_density_per_km2),
        ];
        for (name, value) in fields {
            if !value.is_finite() {
                errors.push(format!("{name} must be a finite number"));
            }
        }

        if self.diameter_m.is_finite() && self.diameter_m <= 0.0 {
            errors.push(format!("diameter_m = {} must be greater than 0", self.diameter_m));
        }
        if self.velocity_km_s.is_finite() && self.velocity_km_s <= 0.0 {
            errors.push(format!(
                "velocity_km_s = {} must be greater than 0",
                self.velocity_km_s
            ));
        }
        if self.latitude.is_finite() && !(-90.0..=90.0).contains(&self.latitude) {
            errors.push(format!("latitude = {} is outside -90..=90", self.latitude));
        }
        if self.longitude.is_finite() && !(-180.0..=180.0).contains(&self.longitude) {
            errors.push(format!("longitude = {} is outside -180..=180", self.longitude));
        }
        if self.pop_density_per_km2.is_finite() && self.pop_density_per_km2 < 0.0 {
            errors.push(format!(
                "pop_density_per_km2 = {} must not be negative",
                self.pop_density_per_km2
            ));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(RequestError::Validation(errors))
        }
    }
}

// ============================================================================
// Stored Record
// ============================================================================

/// A persisted simulation. Created once, only ever deleted afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImpactResult {
    pub id: String,
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    pub diameter_m: f64,
    pub velocity_km_s: f64,
    /// TNT-equivalent energy, rounded to 0.01 Mt
    pub energy_megatons: f64,
    /// Affected radius, rounded to 0.01 km
    pub impact_radius_km: f64,
    pub population_affected: u64,
    /// Rounded to 0.1
    pub earthquake_magnitude: f64,
}

impl ImpactResult {
    /// Build the stored record for `request` under `id`.
    pub fn from_assessment(id: String, request: &ImpactRequest, assessment: &ImpactAssessment) -> Self {
        Self {
            id,
            name: simulation_label(request.latitude, request.longitude),
            latitude: request.latitude,
            longitude: request.longitude,
            diameter_m: request.diameter_m,
            velocity_km_s: request.velocity_km_s,
            energy_megatons: round_to(assessment.energy_megatons, 2),
            impact_radius_km: round_to(assessment.impact_radius_km, 2),
            population_affected: assessment.population_affected,
            earthquake_magnitude: assessment.earthquake_magnitude,
        }
    }
}

/// Display name of a simulated impact, e.g. `Simulated Impact (51.5, -0.13)`.
pub fn simulation_label(latitude: f64, longitude: f64) -> String {
    // Debug keeps the trailing `.0` on whole numbers
    format!(
        "Simulated Impact ({:?}, {:?})",
        round_to(latitude, 2),
        round_to(longitude, 2)
    )
}

// ============================================================================
// Historical Catalog
// ============================================================================

/// A well-known real impact event.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HistoricalImpact {
    pub id: &'static str,
    pub name: &'static str,
    /// Impactor diameter (km)
    #[serde(rename = "size")]
    pub size_km: f64,
    /// Entry velocity (km/s)
    #[serde(rename = "speed")]
    pub speed_km_s: f64,
    pub lat: f64,
    pub lon: f64,
}

/// One element of the combined impact listing.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ImpactEntry {
    Historical(HistoricalImpact),
    Simulated(ImpactResult),
}

impl ImpactEntry {
    pub fn id(&self) -> &str {
        match self {
            Self::Historical(h) => h.id,
            Self::Simulated(s) => &s.id,
        }
    }
}
