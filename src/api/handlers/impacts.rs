//! Impact listing, simulation and deletion endpoints

use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::Json;
use serde::Serialize;
use tracing::{debug, info};

use super::ApiState;
use crate::api::ApiError;
use crate::catalog;
use crate::physics_engine::try_assess_impact;
use crate::storage::record_simulation;
use crate::types::{ImpactEntry, ImpactRequest, ImpactResult};

/// GET /get_impacts - Historical catalog followed by stored simulations
pub async fn get_impacts(State(state): State<ApiState>) -> Result<Json<Vec<ImpactEntry>>, ApiError> {
    let simulated = state.store.list()?;
    Ok(Json(catalog::combined_listing(simulated)))
}

/// POST /simulate_impact - Run the impact pipeline and store the result
///
/// The body is read raw: anything that is not a JSON object counts as `{}`
/// and every parameter falls back to its default. Parameters whose results
/// overflow are a 400 and nothing is stored.
pub async fn simulate_impact(
    State(state): State<ApiState>,
    body: Bytes,
) -> Result<Json<ImpactResult>, ApiError> {
    let request = ImpactRequest::from_json_body(&body)?;
    request.validate()?;

    let assessment = try_assess_impact(&request)?;
    let record = record_simulation(state.store.as_ref(), &request, &assessment)?;

    info!(
        id = %record.id,
        diameter_m = request.diameter_m,
        velocity_km_s = request.velocity_km_s,
        energy_mt = record.energy_megatons,
        population = record.population_affected,
        "Impact simulated"
    );

    Ok(Json(record))
}

/// Response after a successful delete
#[derive(Debug, Serialize)]
pub struct DeleteResponse {
    pub message: String,
}

/// DELETE /delete_impact/:id - Remove a stored simulation by exact id
pub async fn delete_impact(
    State(state): State<ApiState>,
    Path(impact_id): Path<String>,
) -> Result<Json<DeleteResponse>, ApiError> {
    if catalog::is_historical(&impact_id) {
        debug!(id = %impact_id, "Historical impacts are read-only");
        return Err(ApiError::NotFound);
    }

    if !state.store.delete(&impact_id)? {
        return Err(ApiError::NotFound);
    }

    info!(id = %impact_id, "Impact deleted");
    Ok(Json(DeleteResponse {
        message: format!("Impact {impact_id} deleted"),
    }))
}
