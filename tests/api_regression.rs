//! API Regression Tests
//!
//! In-process tests that build the Axum app via `create_app()` and exercise
//! every endpoint using `tower::ServiceExt::oneshot()`.
//! No binary spawn, no network port, no NASA traffic.

use impact_sim::api::{create_app, ApiState};
use impact_sim::neo::{NeoClientError, NeoFeed};
use impact_sim::storage::{ImpactStore, InMemoryStore};
use impact_sim::types::{BrowseQuery, NeoSummary};

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use serde_json::Value;
use std::sync::Arc;
use tower::ServiceExt;

// ============================================================================
// Fixtures
// ============================================================================

/// Feed that serves a fixed page.
struct FixedFeed(Vec<NeoSummary>);

#[async_trait]
impl NeoFeed for FixedFeed {
    async fn browse(&self, _query: &BrowseQuery) -> Result<Vec<NeoSummary>, NeoClientError> {
        Ok(self.0.clone())
    }
}

/// Feed whose upstream always answers 503.
struct FailingFeed;

#[async_trait]
impl NeoFeed for FailingFeed {
    async fn browse(&self, _query: &BrowseQuery) -> Result<Vec<NeoSummary>, NeoClientError> {
        Err(NeoClientError::Status(reqwest::StatusCode::SERVICE_UNAVAILABLE))
    }
}

fn sample_neo() -> NeoSummary {
    NeoSummary {
        id: Some("2000433".to_string()),
        name: Some("433 Eros (A898 PA)".to_string()),
        diameter_m: 37_545.22,
        velocity_km_s: 5.57,
        hazardous: false,
    }
}

fn create_test_app(neo: Option<Arc<dyn NeoFeed>>) -> (Router, Arc<InMemoryStore>) {
    let store = Arc::new(InMemoryStore::new());
    let state = ApiState::new(store.clone(), neo);
    (create_app(state, &[]), store)
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let resp = app.clone().oneshot(request).await.unwrap();
    let status = resp.status();
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn post_json(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn delete(uri: &str) -> Request<Body> {
    Request::builder()
        .method("DELETE")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

// ============================================================================
// Index / Health
// ============================================================================

#[tokio::test]
async fn test_index_lists_routes() {
    let (app, _) = create_test_app(None);
    let (status, json) = send(&app, get("/")).await;

    assert_eq!(status, StatusCode::OK);
    assert!(json["api_name"].is_string());
    let routes = json["routes"].as_object().unwrap();
    assert!(routes.keys().any(|k| k.contains("/simulate_impact")));
    assert!(routes.keys().any(|k| k.contains("/nasa_asteroids")));
}

#[tokio::test]
async fn test_health_reports_store_and_feed() {
    let (app, _) = create_test_app(Some(Arc::new(FixedFeed(vec![]))));
    let (status, json) = send(&app, get("/health")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "ok");
    assert_eq!(json["store"], "InMemory");
    assert_eq!(json["neo_feed_configured"], true);
}

// ============================================================================
// Simulation
// ============================================================================

#[tokio::test]
async fn test_simulate_with_empty_object_uses_defaults() {
    let (app, store) = create_test_app(None);
    let (status, json) = send(&app, post_json("/simulate_impact", "{}")).await;

    assert_eq!(status, StatusCode::OK);
    assert!(json["id"].as_str().unwrap().starts_with("sim_"));
    assert_eq!(json["name"], "Simulated Impact (0.0, 0.0)");
    assert_eq!(json["diameter_m"], 50.0);
    assert_eq!(json["velocity_km_s"], 20.0);
    assert_eq!(json["energy_megatons"], 9.39);
    assert_eq!(json["impact_radius_km"], 3.16);
    assert_eq!(json["population_affected"], 31_451);
    assert_eq!(json["earthquake_magnitude"], 0.4);

    assert_eq!(store.list().unwrap().len(), 1);
}

#[tokio::test]
async fn test_simulate_non_json_body_uses_defaults() {
    let (app, _) = create_test_app(None);
    let request = Request::builder()
        .method("POST")
        .uri("/simulate_impact")
        .body(Body::from("not json"))
        .unwrap();
    let (status, json) = send(&app, request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["population_affected"], 31_451);
}

#[tokio::test]
async fn test_simulate_accepts_quoted_numbers() {
    let (app, _) = create_test_app(None);
    let (status, json) = send(
        &app,
        post_json(
            "/simulate_impact",
            r#"{"diameter_m": "10000", "velocity_km_s": 20, "latitude": "51.5", "longitude": -0.1276}"#,
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["earthquake_magnitude"], 5.0);
    assert_eq!(json["name"], "Simulated Impact (51.5, -0.13)");
}

#[tokio::test]
async fn test_simulate_tiny_asteroid_clamps_magnitude() {
    let (app, _) = create_test_app(None);
    let (status, json) = send(
        &app,
        post_json("/simulate_impact", r#"{"diameter_m": 20, "velocity_km_s": 19}"#),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["earthquake_magnitude"], 0.0);
}

#[tokio::test]
async fn test_simulate_rejects_invalid_values() {
    let (app, store) = create_test_app(None);

    let bodies = [
        r#"{"diameter_m": -5}"#,
        r#"{"velocity_km_s": 0}"#,
        r#"{"latitude": 91}"#,
        r#"{"longitude": -181}"#,
        r#"{"pop_density_per_km2": -1}"#,
        r#"{"diameter_m": "big"}"#,
        r#"{"velocity_km_s": [20]}"#,
    ];

    for body in &bodies {
        let (status, json) = send(&app, post_json("/simulate_impact", body)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "body {body} should be rejected");
        assert!(json["error"].is_string(), "body {body} should carry an error");
        assert!(
            !json["details"].as_array().unwrap().is_empty(),
            "body {body} should carry details"
        );
    }

    assert!(store.list().unwrap().is_empty(), "rejected requests must not be stored");
}

#[tokio::test]
async fn test_simulate_rejects_overflowing_parameters() {
    let (app, store) = create_test_app(None);
    send(&app, post_json("/simulate_impact", "{}")).await;

    for body in [
        r#"{"diameter_m": 1e103}"#,
        r#"{"velocity_km_s": 1e300}"#,
        r#"{"diameter_m": 1000000, "velocity_km_s": 70, "pop_density_per_km2": 1e300}"#,
    ] {
        let (status, json) = send(&app, post_json("/simulate_impact", body)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "body {body} should be rejected");
        let details = json["details"].as_array().unwrap();
        assert!(details[0].as_str().unwrap().contains("overflow"));
    }

    // Only the ordinary simulation was stored, and the listing still decodes
    assert_eq!(store.list().unwrap().len(), 1);
    let (status, listing) = send(&app, get("/get_impacts")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(listing.as_array().unwrap().len(), 4);
}

#[tokio::test]
async fn test_simulate_requires_post() {
    let (app, _) = create_test_app(None);
    let (status, _) = send(&app, get("/simulate_impact")).await;
    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
}

// ============================================================================
// Listing / Deletion
// ============================================================================

#[tokio::test]
async fn test_listing_puts_historical_first() {
    let (app, _) = create_test_app(None);

    let (_, first) = send(&app, post_json("/simulate_impact", r#"{"diameter_m": 100}"#)).await;
    let (_, second) = send(&app, post_json("/simulate_impact", r#"{"diameter_m": 200}"#)).await;

    let (status, json) = send(&app, get("/get_impacts")).await;
    assert_eq!(status, StatusCode::OK);

    let entries = json.as_array().unwrap();
    assert_eq!(entries.len(), 5);

    let ids: Vec<&str> = entries.iter().map(|e| e["id"].as_str().unwrap()).collect();
    assert_eq!(&ids[..3], &["chicxulub", "tunguska", "chelyabinsk"]);
    assert_eq!(ids[3], first["id"].as_str().unwrap());
    assert_eq!(ids[4], second["id"].as_str().unwrap());

    // Historical entries keep their own shape
    assert!(entries[0]["size"].is_number());
    assert!(entries[0]["speed"].is_number());
    assert!(entries[3]["energy_megatons"].is_number());
}

#[tokio::test]
async fn test_delete_simulated_impact() {
    let (app, _) = create_test_app(None);
    let (_, created) = send(&app, post_json("/simulate_impact", "{}")).await;
    let id = created["id"].as_str().unwrap().to_string();

    let (status, json) = send(&app, delete(&format!("/delete_impact/{id}"))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["message"], format!("Impact {id} deleted"));

    let (_, listing) = send(&app, get("/get_impacts")).await;
    assert_eq!(listing.as_array().unwrap().len(), 3);

    // Second delete of the same id is a miss
    let (status, json) = send(&app, delete(&format!("/delete_impact/{id}"))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["error"], "Impact not found");
}

#[tokio::test]
async fn test_delete_unknown_and_historical_ids() {
    let (app, _) = create_test_app(None);

    let (status, _) = send(&app, delete("/delete_impact/sim_00000")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&app, delete("/delete_impact/tunguska")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, listing) = send(&app, get("/get_impacts")).await;
    assert_eq!(listing.as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn test_delete_leaves_other_records_in_order() {
    let (app, _) = create_test_app(None);
    let mut ids = Vec::new();
    for d in [10, 20, 30] {
        let (_, json) = send(
            &app,
            post_json("/simulate_impact", &format!(r#"{{"diameter_m": {d}}}"#)),
        )
        .await;
        ids.push(json["id"].as_str().unwrap().to_string());
    }

    let (status, _) = send(&app, delete(&format!("/delete_impact/{}", ids[1]))).await;
    assert_eq!(status, StatusCode::OK);

    let (_, listing) = send(&app, get("/get_impacts")).await;
    let remaining: Vec<&str> = listing.as_array().unwrap()[3..]
        .iter()
        .map(|e| e["id"].as_str().unwrap())
        .collect();
    assert_eq!(remaining, vec![ids[0].as_str(), ids[2].as_str()]);
}

// ============================================================================
// NEO Feed
// ============================================================================

#[tokio::test]
async fn test_nasa_asteroids_without_key() {
    let (app, _) = create_test_app(None);
    let (status, json) = send(&app, get("/nasa_asteroids")).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], "NASA API key not configured");
}

#[tokio::test]
async fn test_nasa_asteroids_summarised() {
    let (app, _) = create_test_app(Some(Arc::new(FixedFeed(vec![sample_neo()]))));
    let (status, json) = send(&app, get("/nasa_asteroids?page=0&size=5")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["count"], 1);
    let first = &json["asteroids"][0];
    assert_eq!(first["id"], "2000433");
    assert_eq!(first["diameter_m"], 37_545.22);
    assert_eq!(first["velocity_km_s"], 5.57);
    assert_eq!(first["hazardous"], false);
}

#[tokio::test]
async fn test_nasa_asteroids_upstream_failure() {
    let (app, _) = create_test_app(Some(Arc::new(FailingFeed)));
    let (status, json) = send(&app, get("/nasa_asteroids")).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["error"], "Failed to fetch from NASA API");
}

#[tokio::test]
async fn test_unknown_route_returns_404() {
    let (app, _) = create_test_app(None);
    let (status, _) = send(&app, get("/api/v1/impacts")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
