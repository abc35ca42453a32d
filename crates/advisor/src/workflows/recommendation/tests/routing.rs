use std::sync::Arc;

use axum::body::Body;
use axum::extract::State;
use axum::http::{HeaderMap, HeaderValue, Request, StatusCode};
use axum::Json;
use serde_json::{json, Value};
use tower::ServiceExt;

use super::common::*;
use crate::workflows::recommendation::router::{recommend_handler, GENERIC_FAILURE};
use crate::workflows::recommendation::RecommendationStores;
use crate::workflows::USER_ID_HEADER;

fn post(body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/api/v1/recommendations")
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .expect("request builds")
}

#[tokio::test]
async fn handler_returns_payload_for_valid_request() {
    let service = Arc::new(service_over(memory_catalog()));

    let response = recommend_handler(
        State(service),
        HeaderMap::new(),
        Json(request(json!({
            "quizType": "interest",
            "topCategories": ["STEM"]
        }))),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json_body(response).await;
    assert_eq!(body["topCategories"], json!(["STEM"]));
    assert_eq!(body["courses"][0]["id"], json!("c-btech"));
    assert_eq!(body["courses"][0]["kind"], json!("course"));
    assert_eq!(body["courses"][0]["streamId"], json!("s-science"));
    assert_eq!(body["exams"][0]["examDate"], json!("2026-01-22"));
    assert!(body.get("recommendationId").is_none());
}

#[tokio::test]
async fn handler_rejects_missing_quiz_type() {
    let service = Arc::new(service_over(memory_catalog()));

    let response = recommend_handler(
        State(service),
        HeaderMap::new(),
        Json(request(json!({ "categoryScores": { "STEM": 5 } }))),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = read_json_body(response).await;
    assert_eq!(body, json!({ "error": "quizType is required" }));
}

#[tokio::test]
async fn handler_hides_store_failures_behind_generic_message() {
    let service = Arc::new(service_with(RecommendationStores {
        catalog: Arc::new(UnavailableCatalog),
        ..RecommendationStores::shared(memory_catalog())
    }));

    let response = recommend_handler(
        State(service),
        HeaderMap::new(),
        Json(request(json!({
            "quizType": "interest",
            "categoryScores": { "STEM": 5 }
        }))),
    )
    .await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = read_json_body(response).await;
    assert_eq!(body, json!({ "error": GENERIC_FAILURE }));
}

#[tokio::test]
async fn handler_reads_caller_from_header() {
    let catalog = memory_catalog();
    let service = Arc::new(service_over(catalog.clone()));
    let mut headers = HeaderMap::new();
    headers.insert(USER_ID_HEADER, HeaderValue::from_static("header-user"));

    let response = recommend_handler(
        State(service),
        headers,
        Json(request(json!({
            "quizType": "interest",
            "topCategories": ["Arts"],
            "userId": "body-user"
        }))),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json_body(response).await;
    assert_eq!(body["recommendationId"], json!("rec-000001"));
    let stored = catalog.recommendations().expect("readable");
    assert_eq!(stored[0].user_id, "header-user");
}

#[tokio::test]
async fn router_serves_recommendations_over_http() {
    let app = router_with(service_over(memory_catalog()));

    let response = app
        .oneshot(post(json!({
            "quizType": "interest",
            "results": [{ "category": "Law", "score": 4 }]
        })))
        .await
        .expect("router responds");

    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json_body(response).await;
    assert_eq!(body["topCategories"], json!(["Law"]));
    assert_eq!(body["courses"][0]["id"], json!("c-llb"));
    assert_eq!(body["careers"][0]["title"], json!("Corporate Lawyer"));
    assert_eq!(body["exams"][0]["id"], json!("e-clat"));
    assert_eq!(body["colleges"][0]["id"], json!("col-nlu"));
}

#[tokio::test]
async fn persistence_failure_still_returns_success() {
    let app = router_with(service_with(RecommendationStores {
        recommendations: Arc::new(FailingRecommendations),
        ..RecommendationStores::shared(memory_catalog())
    }));

    let response = app
        .oneshot(post(json!({
            "quizType": "interest",
            "categoryScores": { "STEM": 5, "Arts": 1 },
            "userId": "u-9"
        })))
        .await
        .expect("router responds");

    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json_body(response).await;
    assert!(body.get("recommendationId").is_none());
    assert_eq!(body["courses"].as_array().map(Vec::len), Some(2));
}
