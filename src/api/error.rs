//! Error responses for all endpoints.
//!
//! Every failure is rendered as `{ "error": "...", "details": [...] }` with
//! `details` omitted when empty.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::neo::NeoClientError;
use crate::storage::StoreError;
use crate::types::RequestError;

/// Error body shared by every endpoint.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub details: Vec<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Invalid impact parameters")]
    InvalidRequest(#[from] RequestError),
    #[error("Impact not found")]
    NotFound,
    #[error("NASA API key not configured")]
    NeoNotConfigured,
    #[error("Failed to fetch from NASA API")]
    NeoUnavailable(#[source] NeoClientError),
    #[error("Failed to access impact store")]
    Storage(#[from] StoreError),
}

impl ApiError {
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::InvalidRequest(_) | Self::NeoNotConfigured => StatusCode::BAD_REQUEST,
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::NeoUnavailable(_) | Self::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn details(&self) -> Vec<String> {
        match self {
            Self::InvalidRequest(RequestError::Validation(errors)) => errors.clone(),
            Self::InvalidRequest(e @ RequestError::InvalidField(_)) => vec![e.to_string()],
            _ => Vec::new(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match &self {
            Self::NeoUnavailable(e) => tracing::warn!(error = %e, "NASA API error"),
            Self::Storage(e) => tracing::error!(error = %e, "Impact store error"),
            _ => {}
        }

        let body = ErrorBody {
            error: self.to_string(),
            details: self.details(),
        };
        (self.status(), Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn body_json(resp: Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_not_found_shape() {
        let resp = ApiError::NotFound.into_response();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);

        let v = body_json(resp).await;
        assert_eq!(v["error"], "Impact not found");
        assert!(v.get("details").is_none());
    }

    #[tokio::test]
    async fn test_validation_details() {
        let err = ApiError::from(RequestError::Validation(vec![
            "diameter_m = -1 must be greater than 0".to_string(),
        ]));
        let resp = err.into_response();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let v = body_json(resp).await;
        assert_eq!(v["error"], "Invalid impact parameters");
        assert_eq!(v["details"][0], "diameter_m = -1 must be greater than 0");
    }

    #[tokio::test]
    async fn test_neo_failure_hides_cause() {
        let err = ApiError::NeoUnavailable(NeoClientError::Status(reqwest::StatusCode::BAD_GATEWAY));
        let resp = err.into_response();
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body_json(resp).await["error"], "Failed to fetch from NASA API");
    }
}
