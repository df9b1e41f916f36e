//! API routes for reviewd.
//!
//! Validation happens here, before any network call: a malformed body is a
//! 400, a provider failure after the retry budget is a 500, anything off the
//! two routes is a 404 listing what exists.

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use chrono::Utc;
use review_common::{ProviderError, ReviewRequest, ReviewResult};
use serde_json::{json, Value};
use tracing::{error, info};

use crate::server::AppState;

type AppStateArc = Arc<AppState>;

const EXPECTED_SHAPE: &str = "Invalid request format. Expected: { entity1: { label, type, properties? }, entity2: { label, type, properties? }, similarity: number }";

pub fn routes() -> Router<AppStateArc> {
    // Method fallbacks keep the contract uniform: any other path or method
    // gets the 404 endpoint listing, not a bare 405.
    Router::new()
        .route("/health", get(health).fallback(not_found))
        .route("/review", post(review).fallback(not_found))
        .fallback(not_found)
}

/// Errors surfaced by the HTTP layer.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Request body failed structural validation. Not retried.
    #[error("{0}")]
    Validation(String),

    /// Provider call failed after the retry budget.
    #[error("review failed: {0}")]
    Upstream(#[from] ProviderError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Validation(message) => {
                (StatusCode::BAD_REQUEST, Json(json!({ "error": message }))).into_response()
            }
            ApiError::Upstream(e) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({
                    "error": "Internal server error",
                    "message": e.to_string(),
                })),
            )
                .into_response(),
        }
    }
}

async fn health() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": "ai-review-gateway",
        "timestamp": Utc::now().to_rfc3339(),
    }))
}

/// Structural validation of the review body: both entities must carry a
/// string label and type, similarity must be a finite number.
fn validate_request(body: &Value) -> Result<ReviewRequest, ApiError> {
    let invalid = || ApiError::Validation(EXPECTED_SHAPE.to_string());

    let obj = body.as_object().ok_or_else(invalid)?;

    for key in ["entity1", "entity2"] {
        let entity = obj.get(key).and_then(Value::as_object).ok_or_else(invalid)?;
        if !entity.get("label").is_some_and(Value::is_string)
            || !entity.get("type").is_some_and(Value::is_string)
        {
            return Err(invalid());
        }
    }

    let similarity = obj
        .get("similarity")
        .and_then(Value::as_f64)
        .ok_or_else(invalid)?;
    if !similarity.is_finite() {
        return Err(invalid());
    }

    serde_json::from_value(body.clone()).map_err(|_| invalid())
}

async fn review(
    State(state): State<AppStateArc>,
    Json(body): Json<Value>,
) -> Result<Json<ReviewResult>, ApiError> {
    let req = validate_request(&body)?;
    info!(
        "[R]  reviewing \"{}\" vs \"{}\" (similarity {:.3})",
        req.entity1.label, req.entity2.label, req.similarity
    );

    let result = state
        .reviewer
        .review_merge(&req.entity1, &req.entity2, req.similarity)
        .await
        .map_err(|e| {
            error!("[R]  review failed: {}", e);
            ApiError::Upstream(e)
        })?;

    Ok(Json(result))
}

async fn not_found() -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(json!({
            "error": "Not found",
            "available_endpoints": [
                "GET /health - Health check",
                "POST /review - Entity resolution review",
            ],
        })),
    )
        .into_response()
}
