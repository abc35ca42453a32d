use std::sync::Arc;

use async_trait::async_trait;
use axum::body::Body;
use axum::extract::State;
use axum::http::{HeaderMap, Request, StatusCode};
use axum::Json;
use serde_json::{json, Value};
use tower::ServiceExt;

use super::router::{roadmap_handler, GENERIC_FAILURE};
use super::{roadmap_router, RoadmapError, RoadmapRequest, RoadmapService};
use crate::workflows::catalog::{
    CatalogSnapshot, EntityId, MemoryCatalog, QuizResult, QuizResultStore, StoreError,
};
use crate::workflows::USER_ID_HEADER;

fn results() -> Arc<MemoryCatalog> {
    let snapshot: CatalogSnapshot = serde_json::from_value(json!({
        "quizResults": [
            {
                "_id": "r-old",
                "userId": "u-1",
                "recommendedStreams": [{ "stream": "Commerce" }],
                "createdAt": "2025-03-01T10:00:00Z"
            },
            {
                "_id": "r-new",
                "userId": "u-1",
                "recommendedStreams": [
                    { "stream": "Engineering", "score": 0.9 },
                    { "stream": "Science", "score": 0.7 }
                ],
                "createdAt": "2025-06-01T10:00:00Z"
            },
            { "_id": "r-plain", "userId": "u-2", "createdAt": "2025-06-02T10:00:00Z" }
        ]
    }))
    .expect("fixture parses");
    Arc::new(MemoryCatalog::new(snapshot))
}

fn request(value: Value) -> RoadmapRequest {
    serde_json::from_value(value).expect("request parses")
}

struct UnavailableResults;

#[async_trait]
impl QuizResultStore for UnavailableResults {
    async fn quiz_result(&self, _id: &EntityId) -> Result<Option<QuizResult>, StoreError> {
        Err(StoreError::Unavailable("results offline".to_string()))
    }

    async fn latest_for_user(&self, _user_id: &str) -> Result<Option<QuizResult>, StoreError> {
        Err(StoreError::Unavailable("results offline".to_string()))
    }

    async fn link_recommendation(
        &self,
        _result_id: &EntityId,
        _recommendation_id: &EntityId,
    ) -> Result<(), StoreError> {
        Err(StoreError::Unavailable("results offline".to_string()))
    }
}

async fn read_json_body(response: axum::response::Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}

#[tokio::test]
async fn latest_result_drives_review_step() {
    let service = RoadmapService::new(results());

    let roadmap = service
        .generate(request(json!({ "userId": "u-1" })), None)
        .await
        .expect("roadmap generated");

    assert_eq!(roadmap.user_id, "u-1");
    assert_eq!(roadmap.step_keys()[2], "review_results");
    assert_eq!(
        roadmap.steps[2].description,
        "Review your recommended streams: Engineering and Science."
    );
    assert_eq!(
        roadmap.generated_from.quiz_result_id,
        Some(EntityId::new("r-new"))
    );
    assert_eq!(
        roadmap.generated_from.rationale,
        "Based on your quiz result recommending Engineering and Science"
    );
}

#[tokio::test]
async fn explicit_result_id_wins_over_latest() {
    let service = RoadmapService::new(results());

    let roadmap = service
        .generate(
            request(json!({ "userId": "u-1", "resultId": "r-old" })),
            None,
        )
        .await
        .expect("roadmap generated");

    assert_eq!(
        roadmap.steps[2].description,
        "Review your recommended streams: Commerce."
    );
    assert_eq!(
        roadmap.generated_from.quiz_result_id,
        Some(EntityId::new("r-old"))
    );
}

#[tokio::test]
async fn users_without_streams_get_default_steps() {
    let service = RoadmapService::new(results());

    let plain = service
        .generate(request(json!({ "userId": "u-2" })), None)
        .await
        .expect("roadmap generated");
    assert_eq!(plain.steps.len(), 7);

    let unknown = service
        .generate(request(json!({ "userId": "u-404" })), None)
        .await
        .expect("roadmap generated");
    assert_eq!(unknown.steps.len(), 7);
    assert_eq!(unknown.generated_from.quiz_result_id, None);
}

#[tokio::test]
async fn provided_steps_replace_generation() {
    let service = RoadmapService::new(Arc::new(UnavailableResults));

    let roadmap = service
        .generate(
            request(json!({
                "userId": "u-1",
                "steps": [
                    { "key": "visit_campus", "title": "Visit a Campus" }
                ]
            })),
            None,
        )
        .await
        .expect("provided steps need no reads");

    assert_eq!(roadmap.step_keys(), vec!["visit_campus"]);
    assert_eq!(roadmap.steps[0].weight, 0);
}

#[tokio::test]
async fn caller_header_identity_is_preferred() {
    let service = RoadmapService::new(results());

    let roadmap = service
        .generate(
            request(json!({ "userId": "u-2" })),
            Some("u-1".to_string()),
        )
        .await
        .expect("roadmap generated");

    assert_eq!(roadmap.user_id, "u-1");
    assert_eq!(roadmap.steps.len(), 8);
}

#[tokio::test]
async fn missing_user_is_rejected() {
    let service = RoadmapService::new(results());

    let err = service
        .generate(request(json!({ "userId": "  " })), None)
        .await
        .expect_err("user required");

    assert!(matches!(err, RoadmapError::MissingUser));
}

#[tokio::test]
async fn handler_maps_errors_to_status_codes() {
    let missing_user = roadmap_handler(
        State(Arc::new(RoadmapService::new(results()))),
        HeaderMap::new(),
        Json(RoadmapRequest::default()),
    )
    .await;
    assert_eq!(missing_user.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        read_json_body(missing_user).await,
        json!({ "error": "userId is required" })
    );

    let unavailable = roadmap_handler(
        State(Arc::new(RoadmapService::new(Arc::new(UnavailableResults)))),
        HeaderMap::new(),
        Json(request(json!({ "userId": "u-1" }))),
    )
    .await;
    assert_eq!(unavailable.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        read_json_body(unavailable).await,
        json!({ "error": GENERIC_FAILURE })
    );
}

#[tokio::test]
async fn router_serves_roadmaps_over_http() {
    let app = roadmap_router(Arc::new(RoadmapService::new(results())));
    let builder = Request::builder()
        .method("POST")
        .uri("/api/v1/roadmap")
        .header("content-type", "application/json")
        .header(USER_ID_HEADER, "u-1");
    let body = json!({ "profile": { "classLevel": "Class 12", "interests": ["robotics"] } });
    let response = app
        .oneshot(
            builder
                .body(Body::from(body.to_string()))
                .expect("request builds"),
        )
        .await
        .expect("router responds");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(payload["userId"], json!("u-1"));
    assert_eq!(payload["steps"][0]["key"], json!("complete_profile"));
    assert_eq!(payload["steps"][0]["title"], json!("Complete Your Profile"));
    assert_eq!(
        payload["steps"][0]["description"],
        json!("Confirm your Class 12 details and keep your interests and goals up to date.")
    );
    assert_eq!(payload["steps"].as_array().map(Vec::len), Some(8));
    assert_eq!(payload["generatedFrom"]["quizResultId"], json!("r-new"));
    assert_eq!(
        payload["generatedFrom"]["rationale"],
        json!("Based on your quiz result recommending Engineering and Science for Class 12")
    );
}
