//! API route definitions
//!
//! - `/` - Route index
//! - `/health` - Liveness and configuration summary
//! - `/get_impacts` - Historical catalog plus stored simulations
//! - `/simulate_impact` - Run and store a simulation
//! - `/nasa_asteroids` - NASA NEO browse summary
//! - `/delete_impact/:id` - Remove a stored simulation

use axum::{
    routing::{delete, get, post},
    Router,
};

use super::handlers::{self, ApiState};

/// Create all API routes
pub fn api_routes(state: ApiState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/health", get(handlers::health))
        .route("/get_impacts", get(handlers::get_impacts))
        .route("/simulate_impact", post(handlers::simulate_impact))
        .route("/nasa_asteroids", get(handlers::get_nasa_asteroids))
        .route("/delete_impact/:id", delete(handlers::delete_impact))
        .with_state(state)
}
