//! Impact consequence models
//!
//! Four closed-form estimators chained by [`super::assess_impact`]. These are
//! rough heuristics, not validated impact physics: the radius and magnitude
//! scalings in particular are order-of-magnitude approximations.
//!
//! Every function is total over real inputs. None of them panic or return
//! NaN for non-negative arguments.

use std::f64::consts::PI;

/// Bulk density assumed for a stony asteroid (kg/m³).
pub const ASTEROID_DENSITY_KG_M3: f64 = 3000.0;

/// Energy of one megaton of TNT (J).
pub const JOULES_PER_MEGATON: f64 = 4.184e15;

/// Coefficient of the cube-root radius scaling (km per Mt^(1/3)).
pub const RADIUS_COEFFICIENT_KM: f64 = 1.5;

/// Slope of the energy-to-magnitude relation.
pub const MAGNITUDE_SLOPE: f64 = 0.67;

/// Intercept of the energy-to-magnitude relation.
pub const MAGNITUDE_INTERCEPT: f64 = -10.7;

/// Kinetic energy of a spherical asteroid in megatons of TNT.
///
/// Uses the default stony density of [`ASTEROID_DENSITY_KG_M3`].
pub fn kinetic_energy_megatons(diameter_m: f64, velocity_km_s: f64) -> f64 {
    kinetic_energy_megatons_with_density(diameter_m, velocity_km_s, ASTEROID_DENSITY_KG_M3)
}

/// Kinetic energy of a uniform sphere in megatons of TNT.
///
/// E = ½ · ρ · (4/3)π(d/2)³ · (1000·v)²  /  4.184e15
///
/// A non-positive diameter (or density) yields 0.0 instead of a negative
/// energy.
pub fn kinetic_energy_megatons_with_density(
    diameter_m: f64,
    velocity_km_s: f64,
    density_kg_m3: f64,
) -> f64 {
    if diameter_m <= 0.0 || density_kg_m3 <= 0.0 {
        return 0.0;
    }

    let radius_m = diameter_m / 2.0;
    let volume_m3 = 4.0 / 3.0 * PI * radius_m.powi(3);
    let mass_kg = density_kg_m3 * volume_m3;
    let velocity_m_s = velocity_km_s * 1000.0;
    let energy_joules = 0.5 * mass_kg * velocity_m_s.powi(2);

    energy_joules / JOULES_PER_MEGATON
}

/// Radius of the affected area (km) from impact energy.
///
/// r = 1.5 · E^(1/3). Exactly 0.0 for E ≤ 0.
pub fn impact_radius_km(energy_megatons: f64) -> f64 {
    if energy_megatons > 0.0 {
        RADIUS_COEFFICIENT_KM * energy_megatons.powf(1.0 / 3.0)
    } else {
        0.0
    }
}

/// People inside a circle of `radius_km` at a uniform density.
///
/// The product is truncated toward zero; negative or NaN products give 0.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn population_affected(pop_density_per_km2: f64, radius_km: f64) -> u64 {
    let area_km2 = PI * radius_km.powi(2);
    // `as` saturates: NaN and negatives become 0.
    (area_km2 * pop_density_per_km2) as u64
}

/// Equivalent earthquake magnitude from impact energy, rounded to 0.1.
///
/// M = 0.67 · log10(E_joules) − 10.7, floored at 0.0.
pub fn earthquake_magnitude(energy_megatons: f64) -> f64 {
    if energy_megatons <= 0.0 {
        return 0.0;
    }

    let energy_joules = energy_megatons * JOULES_PER_MEGATON;
    let magnitude = MAGNITUDE_SLOPE * energy_joules.log10() + MAGNITUDE_INTERCEPT;

    round_to(magnitude.max(0.0), 1)
}

/// Round to `decimals` places, ties to even.
///
/// Values too large to scale are returned unchanged; they carry no
/// fractional digits anyway.
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    let scaled = value * factor;
    if !scaled.is_finite() {
        return value;
    }
    scaled.round_ties_even() / factor
}
