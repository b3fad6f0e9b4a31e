//! Index and health endpoints

use std::collections::BTreeMap;

use axum::extract::State;
use axum::Json;
use chrono::Utc;
use serde::Serialize;

use super::ApiState;

/// Response for GET /
#[derive(Debug, Serialize)]
pub struct IndexResponse {
    pub api_name: &'static str,
    pub description: &'static str,
    pub routes: BTreeMap<&'static str, &'static str>,
}

/// GET / - List all routes and their purpose
pub async fn index() -> Json<IndexResponse> {
    let routes = BTreeMap::from([
        ("/", "API index - lists all routes and their purpose."),
        ("/health", "GET: Service health, uptime and storage backend."),
        ("/get_impacts", "GET historical + user-simulated impacts."),
        ("/simulate_impact", "POST: Simulate an asteroid impact and save it."),
        ("/nasa_asteroids", "GET: Fetch live asteroid data from NASA NEO API."),
        ("/delete_impact/<id>", "DELETE: Remove a saved simulation by ID."),
    ]);

    Json(IndexResponse {
        api_name: "Asteroid Impact Simulation API",
        description: "Simulate asteroid impacts, view NASA asteroid data, and manage saved simulations.",
        routes,
    })
}

/// Response for GET /health
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub started_at: String,
    pub uptime_seconds: i64,
    pub store: &'static str,
    pub neo_feed_configured: bool,
}

/// GET /health - Liveness and configuration summary
pub async fn health(State(state): State<ApiState>) -> Json<HealthResponse> {
    let uptime = Utc::now().signed_duration_since(state.started_at);

    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        started_at: state.started_at.to_rfc3339(),
        uptime_seconds: uptime.num_seconds().max(0),
        store: state.store.backend_name(),
        neo_feed_configured: state.neo.is_some(),
    })
}
