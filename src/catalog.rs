//! Historical impact catalog
//!
//! A fixed reference set listed ahead of every stored simulation.

use crate::types::{HistoricalImpact, ImpactEntry, ImpactResult};

/// Well-known impacts, oldest first. Sizes in km, speeds in km/s.
pub const HISTORICAL_IMPACTS: [HistoricalImpact; 3] = [
    HistoricalImpact {
        id: "chicxulub",
        name: "Chicxulub (66Mya)",
        size_km: 10.0,
        speed_km_s: 20.0,
        lat: 21.4,
        lon: -89.0,
    },
    HistoricalImpact {
        id: "tunguska",
        name: "Tunguska (1908)",
        size_km: 0.05,
        speed_km_s: 16.0,
        lat: 60.9,
        lon: 101.9,
    },
    HistoricalImpact {
        id: "chelyabinsk",
        name: "Chelyabinsk (2013)",
        size_km: 0.02,
        speed_km_s: 19.0,
        lat: 54.9,
        lon: 61.1,
    },
];

/// Historical entries followed by `simulated`, in the order given.
pub fn combined_listing(simulated: Vec<ImpactResult>) -> Vec<ImpactEntry> {
    HISTORICAL_IMPACTS
        .iter()
        .copied()
        .map(ImpactEntry::Historical)
        .chain(simulated.into_iter().map(ImpactEntry::Simulated))
        .collect()
}

/// Whether `id` belongs to the read-only catalog.
pub fn is_historical(id: &str) -> bool {
    HISTORICAL_IMPACTS.iter().any(|h| h.id == id)
}
