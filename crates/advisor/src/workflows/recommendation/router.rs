use std::sync::Arc;

use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use serde_json::json;
use tracing::error;

use super::input::RecommendationRequest;
use super::service::{RecommendationError, RecommendationService};
use crate::workflows::caller_identity;

pub const GENERIC_FAILURE: &str = "Failed to generate recommendations";

/// Router exposing the recommendation pipeline.
pub fn recommendation_router(service: Arc<RecommendationService>) -> Router {
    Router::new()
        .route("/api/v1/recommendations", post(recommend_handler))
        .with_state(service)
}

pub(crate) async fn recommend_handler(
    State(service): State<Arc<RecommendationService>>,
    headers: HeaderMap,
    Json(request): Json<RecommendationRequest>,
) -> Response {
    let caller = caller_identity(&headers);
    match service.recommend(request, caller).await {
        Ok(payload) => (StatusCode::OK, Json(payload)).into_response(),
        Err(RecommendationError::Input(err)) => {
            let payload = json!({ "error": err.to_string() });
            (StatusCode::BAD_REQUEST, Json(payload)).into_response()
        }
        Err(err) => {
            error!(error = %err, "recommendation pipeline failed");
            let payload = json!({ "error": GENERIC_FAILURE });
            (StatusCode::INTERNAL_SERVER_ERROR, Json(payload)).into_response()
        }
    }
}
