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

use super::domain::RoadmapRequest;
use super::service::{RoadmapError, RoadmapService};
use crate::workflows::caller_identity;

pub const GENERIC_FAILURE: &str = "Failed to generate roadmap";

pub fn roadmap_router(service: Arc<RoadmapService>) -> Router {
    Router::new()
        .route("/api/v1/roadmap", post(roadmap_handler))
        .with_state(service)
}

pub(crate) async fn roadmap_handler(
    State(service): State<Arc<RoadmapService>>,
    headers: HeaderMap,
    Json(request): Json<RoadmapRequest>,
) -> Response {
    match service.generate(request, caller_identity(&headers)).await {
        Ok(roadmap) => (StatusCode::OK, Json(roadmap)).into_response(),
        Err(RoadmapError::MissingUser) => {
            let payload = json!({ "error": RoadmapError::MissingUser.to_string() });
            (StatusCode::BAD_REQUEST, Json(payload)).into_response()
        }
        Err(err) => {
            error!(error = %err, "roadmap generation failed");
            let payload = json!({ "error": GENERIC_FAILURE });
            (StatusCode::INTERNAL_SERVER_ERROR, Json(payload)).into_response()
        }
    }
}
