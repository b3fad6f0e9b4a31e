//! NASA NEO feed endpoint

use axum::extract::{Query, State};
use axum::Json;

use super::ApiState;
use crate::api::ApiError;
use crate::types::{BrowseQuery, NeoFeedResponse};

/// GET /nasa_asteroids - One summarised page of the NeoWs browse feed
///
/// Query params:
/// - `?page=2`: zero-based page
/// - `?size=20`: objects per page
pub async fn get_nasa_asteroids(
    State(state): State<ApiState>,
    Query(query): Query<BrowseQuery>,
) -> Result<Json<NeoFeedResponse>, ApiError> {
    let feed = state.neo.as_ref().ok_or(ApiError::NeoNotConfigured)?;

    let asteroids = feed.browse(&query).await.map_err(ApiError::NeoUnavailable)?;

    Ok(Json(NeoFeedResponse::from(asteroids)))
}
