//! Shared data structures for the impact service
//!
//! - `ImpactRequest`: defaulted, validated simulation input
//! - `ImpactResult`: persisted simulation record
//! - `HistoricalImpact` / `ImpactEntry`: listing entries
//! - `NeoSummary`: condensed NASA near-Earth-object entry

mod impact;
mod neo;

pub use impact::*;
pub use neo::*;

use serde::{Deserialize, Deserializer};

/// A JSON value that should be a number but may arrive quoted.
///
/// Clients (and NASA, for velocities) send `"20.5"` as often as `20.5`.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum NumberOrString {
    Number(f64),
    Text(String),
}

impl NumberOrString {
    /// Numeric value, or `None` if the text does not parse.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            Self::Text(s) => s.trim().parse().ok(),
        }
    }
}

/// `deserialize_with` helper accepting a number or a numeric string.
pub(crate) fn lenient_f64<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = NumberOrString::deserialize(deserializer)?;
    raw.as_f64().ok_or_else(|| {
        serde::de::Error::custom(format!("expected a number, got {raw:?}"))
    })
}
