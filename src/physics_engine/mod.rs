//! Physics Engine Module
//!
//! Deterministic impact consequence calculations. Everything here is pure:
//! no I/O, no shared state, safe to call from any number of handlers.
//!
//! ## Pipeline
//! - `kinetic_energy_megatons()` - asteroid parameters to TNT-equivalent energy
//! - `impact_radius_km()` - cube-root radius scaling
//! - `population_affected()` - people inside the affected circle
//! - `earthquake_magnitude()` - seismic equivalent of the impact energy

pub mod impact_models;

pub use impact_models::{
    earthquake_magnitude, impact_radius_km, kinetic_energy_megatons,
    kinetic_energy_megatons_with_density, population_affected, round_to,
    ASTEROID_DENSITY_KG_M3, JOULES_PER_MEGATON,
};

use serde::Serialize;

use crate::types::{ImpactRequest, RequestError};

/// Unrounded output of the impact pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ImpactAssessment {
    pub energy_megatons: f64,
    pub impact_radius_km: f64,
    pub population_affected: u64,
    pub earthquake_magnitude: f64,
}

impl ImpactAssessment {
    /// Every output is finite and the population did not saturate.
    ///
    /// Anything else cannot be stored as JSON and read back.
    pub fn is_representable(&self) -> bool {
        self.energy_megatons.is_finite()
            && self.impact_radius_km.is_finite()
            && self.earthquake_magnitude.is_finite()
            && self.population_affected < u64::MAX
    }
}

/// Run the full pipeline for one request.
///
/// energy → radius → {population, magnitude}. The request is not validated
/// here; callers reject nonsensical values before reaching this point.
pub fn assess_impact(request: &ImpactRequest) -> ImpactAssessment {
    let energy_megatons = kinetic_energy_megatons(request.diameter_m, request.velocity_km_s);
    let impact_radius_km = impact_radius_km(energy_megatons);

    ImpactAssessment {
        energy_megatons,
        impact_radius_km,
        population_affected: population_affected(request.pop_density_per_km2, impact_radius_km),
        earthquake_magnitude: earthquake_magnitude(energy_megatons),
    }
}

/// [`assess_impact`] for inputs from the outside world.
///
/// Parameters that pass validation can still be large enough to overflow
/// the energy model (e.g. a 1e103 m diameter); those are rejected.
pub fn try_assess_impact(request: &ImpactRequest) -> Result<ImpactAssessment, RequestError> {
    let assessment = assess_impact(request);
    if assessment.is_representable() {
        Ok(assessment)
    } else {
        Err(RequestError::Validation(vec![format!(
            "diameter_m = {}, velocity_km_s = {}, pop_density_per_km2 = {}: parameters overflow the energy model",
            request.diameter_m, request.velocity_km_s, request.pop_density_per_km2
        )]))
    }
}
