//! REST API module using Axum
//!
//! Provides the HTTP endpoints of the impact service. Response shapes are
//! plain JSON (no envelope) so existing front-ends keep working.

pub mod error;
pub mod handlers;
mod routes;

pub use error::{ApiError, ErrorBody};
pub use handlers::ApiState;

use axum::extract::DefaultBodyLimit;
use axum::http::{header, HeaderValue, Method};
use axum::Router;
use tower::ServiceBuilder;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::config::defaults::MAX_REQUEST_BODY_BYTES;

/// Build the CORS layer.
///
/// An empty origin list allows every origin; otherwise only the listed
/// origins are allowed. Origins that are not valid header values are skipped.
pub fn build_cors_layer(origins: &[String]) -> CorsLayer {
    let allow_origin = if origins.is_empty() {
        tracing::info!("CORS: allowing any origin");
        AllowOrigin::any()
    } else {
        let allowed: Vec<HeaderValue> = origins
            .iter()
            .filter_map(|o| match o.trim().parse() {
                Ok(v) => Some(v),
                Err(_) => {
                    tracing::warn!(origin = %o, "CORS: skipping invalid origin");
                    None
                }
            })
            .collect();
        tracing::info!(origins = ?origins, "CORS: allowing configured origins");
        AllowOrigin::list(allowed)
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods([Method::GET, Method::POST, Method::DELETE, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
}

/// Create the complete application router.
pub fn create_app(state: ApiState, cors_origins: &[String]) -> Router {
    routes::api_routes(state).layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(build_cors_layer(cors_origins))
            .layer(DefaultBodyLimit::max(MAX_REQUEST_BODY_BYTES)),
    )
}
