use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::response::Response;
use serde_json::{json, Value};

use crate::config::PipelineConfig;
use crate::workflows::catalog::{
    CatalogSnapshot, CatalogStore, Career, College, Course, EntityId, EntityQuery, Exam, IdSet,
    Interest, MemoryCatalog, Program, QuestionQuery, QuestionStore, QuizQuestion, QuizResult,
    QuizResultStore, RecommendationDraft, RecommendationStore, StoreError,
};
use crate::workflows::recommendation::{
    recommendation_router, RecommendationRequest, RecommendationService, RecommendationStores,
};

pub(super) fn snapshot() -> CatalogSnapshot {
    serde_json::from_value(json!({
        "questions": [
            {
                "_id": "q-stem",
                "quizType": "interest",
                "category": "STEM",
                "prompt": "I enjoy building things that work.",
                "options": [
                    { "text": "Agree", "tags": ["technology", "engineering"] }
                ],
                "relatedCourses": ["c-btech"],
                "relatedCareers": ["k-software"],
                "relatedStreams": ["s-science"],
                "interestTags": ["i-robotics"]
            },
            {
                "_id": "q-arts",
                "quizType": "interest",
                "category": "Arts",
                "options": [
                    { "text": "Agree", "tags": ["Design", "fine arts"] }
                ],
                "relatedCourses": ["c-bdes"],
                "relatedCareers": ["k-designer"],
                "relatedStreams": ["s-arts"],
                "interestTags": ["i-painting"]
            },
            {
                "_id": "q-law",
                "quizType": "interest",
                "category": "Law",
                "options": [{ "text": "Agree", "tags": ["law"] }],
                "relatedCourses": [{ "$oid": "c-llb" }],
                "relatedCareers": ["k-lawyer"]
            },
            {
                "_id": "q-retired",
                "quizType": "interest",
                "category": "STEM",
                "options": [{ "text": "Agree", "tags": ["technology"] }],
                "relatedCourses": ["c-retired"],
                "isActive": false
            },
            { "_id": "q-apt-1", "quizType": "aptitude", "section": "Numerical" },
            { "_id": "q-apt-2", "quizType": "aptitude", "section": "Verbal" },
            { "_id": "q-apt-3", "quizType": "aptitude", "category": "Logical", "section": "Numerical" }
        ],
        "courses": [
            {
                "_id": "c-btech",
                "name": "B.Tech Computer Science",
                "description": "Four-year engineering degree.",
                "streamId": "s-science",
                "durationYears": 4.0,
                "tags": ["technology", "engineering", "mathematics"]
            },
            {
                "_id": "c-bdes",
                "name": "Bachelor of Design",
                "streamId": "s-arts",
                "tags": ["design", "arts"]
            },
            { "_id": "c-llb", "name": "Integrated LLB", "tags": ["law"] },
            { "_id": "c-retired", "name": "Retired Diploma", "tags": ["technology"] }
        ],
        "careers": [
            { "_id": "k-software", "title": "Software Engineer", "tags": ["technology", "programming"] },
            { "_id": "k-designer", "title": "Product Designer", "tags": ["design"] },
            { "_id": "k-lawyer", "title": "Corporate Lawyer", "tags": ["law"] }
        ],
        "programs": [
            { "_id": "p-btech-iit", "name": "B.Tech CSE at IIT", "courseId": "c-btech", "collegeId": "col-iit", "durationYears": 4.0 },
            { "_id": "p-bdes-nid", "name": "B.Des at NID", "courseId": "c-bdes", "collegeId": "col-nid" },
            { "_id": "p-llb-nlu", "name": "BA LLB at NLU", "courseId": "c-llb", "collegeId": "col-nlu" },
            { "_id": "p-archived", "name": "Archived B.Tech", "courseId": "c-btech", "isActive": false }
        ],
        "exams": [
            { "_id": "e-jee", "name": "JEE Main", "courseIds": ["c-btech"], "examDate": "2026-01-22" },
            { "_id": "e-nift", "name": "NIFT Entrance", "careerIds": ["k-designer"] },
            { "_id": "e-olympiad", "name": "Robotics Olympiad", "interestTags": ["i-robotics"] },
            { "_id": "e-clat", "name": "CLAT", "courseIds": ["c-llb"] },
            { "_id": "e-unrelated", "name": "Hotel Management JEE", "courseIds": ["c-hotel"] }
        ],
        "interests": [
            { "_id": "i-robotics", "name": "Robotics", "tags": ["technology", "engineering"] },
            { "_id": "i-painting", "name": "Painting", "tags": ["fine arts"] }
        ],
        "colleges": [
            { "_id": "col-iit", "name": "IIT Delhi", "programIds": ["p-btech-iit"], "location": "New Delhi" },
            { "_id": "col-nid", "name": "NID Ahmedabad" },
            { "_id": "col-nlu", "name": "NLU Delhi" },
            { "_id": "col-arts", "name": "Fine Arts Academy", "streamIds": ["s-arts"] },
            { "_id": "col-other", "name": "Unrelated Institute", "courseIds": ["c-hotel"] }
        ],
        "quizResults": [
            {
                "_id": "r-scores",
                "userId": "u-1",
                "quizType": "interest",
                "categoryScores": { "STEM": 4.5, "Arts": 2 },
                "recommendedStreams": [{ "stream": "Engineering" }, { "stream": "Science" }],
                "createdAt": "2025-05-01T09:00:00Z"
            },
            {
                "_id": "r-answers",
                "userId": "u-2",
                "quizType": "aptitude",
                "answers": { "q-apt-1": 5, "q-apt-2": 2, "q-apt-3": 4 },
                "createdAt": "2025-05-02T09:00:00Z"
            },
            { "_id": "r-empty", "userId": "u-3", "quizType": "interest" }
        ]
    }))
    .expect("fixture snapshot parses")
}

pub(super) fn memory_catalog() -> Arc<MemoryCatalog> {
    Arc::new(MemoryCatalog::new(snapshot()))
}

pub(super) fn service_over(catalog: Arc<MemoryCatalog>) -> RecommendationService {
    RecommendationService::new(
        RecommendationStores::shared(catalog),
        PipelineConfig::default(),
    )
}

pub(super) fn service_with(stores: RecommendationStores) -> RecommendationService {
    RecommendationService::new(stores, PipelineConfig::default())
}

pub(super) fn request(value: Value) -> RecommendationRequest {
    serde_json::from_value(value).expect("request parses")
}

pub(super) fn ids(values: &[&str]) -> IdSet {
    values.iter().map(|value| EntityId::new(value)).collect()
}

pub(super) fn item_ids(items: &[crate::workflows::recommendation::RecommendationItem]) -> Vec<&str> {
    items.iter().map(|item| item.id.as_str()).collect()
}

pub(super) fn router_with(service: RecommendationService) -> axum::Router {
    recommendation_router(Arc::new(service))
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}

/// Recommendation store whose writes always fail.
pub(super) struct FailingRecommendations;

#[async_trait]
impl RecommendationStore for FailingRecommendations {
    async fn insert(&self, _draft: RecommendationDraft) -> Result<EntityId, StoreError> {
        Err(StoreError::Unavailable("write concern timeout".to_string()))
    }
}

/// Quiz results readable from the fixture, but the back-link write fails.
pub(super) struct ReadOnlyResults(pub(super) Arc<MemoryCatalog>);

#[async_trait]
impl QuizResultStore for ReadOnlyResults {
    async fn quiz_result(&self, id: &EntityId) -> Result<Option<QuizResult>, StoreError> {
        self.0.quiz_result(id).await
    }

    async fn latest_for_user(&self, user_id: &str) -> Result<Option<QuizResult>, StoreError> {
        self.0.latest_for_user(user_id).await
    }

    async fn link_recommendation(
        &self,
        _result_id: &EntityId,
        _recommendation_id: &EntityId,
    ) -> Result<(), StoreError> {
        Err(StoreError::Unavailable("results collection is read only".to_string()))
    }
}

/// Quiz result collection that cannot be reached.
pub(super) struct OfflineResults;

#[async_trait]
impl QuizResultStore for OfflineResults {
    async fn quiz_result(&self, _id: &EntityId) -> Result<Option<QuizResult>, StoreError> {
        Err(StoreError::Unavailable("results replica offline".to_string()))
    }

    async fn latest_for_user(&self, _user_id: &str) -> Result<Option<QuizResult>, StoreError> {
        Err(StoreError::Unavailable("results replica offline".to_string()))
    }

    async fn link_recommendation(
        &self,
        _result_id: &EntityId,
        _recommendation_id: &EntityId,
    ) -> Result<(), StoreError> {
        Err(StoreError::Unavailable("results replica offline".to_string()))
    }
}

/// Catalog that cannot be reached.
pub(super) struct UnavailableCatalog;

#[async_trait]
impl CatalogStore for UnavailableCatalog {
    async fn courses(&self, _query: &EntityQuery) -> Result<Vec<Course>, StoreError> {
        Err(StoreError::Unavailable("database offline".to_string()))
    }

    async fn careers(&self, _query: &EntityQuery) -> Result<Vec<Career>, StoreError> {
        Err(StoreError::Unavailable("database offline".to_string()))
    }

    async fn programs(&self, _query: &EntityQuery) -> Result<Vec<Program>, StoreError> {
        Err(StoreError::Unavailable("database offline".to_string()))
    }

    async fn exams(&self, _query: &EntityQuery) -> Result<Vec<Exam>, StoreError> {
        Err(StoreError::Unavailable("database offline".to_string()))
    }

    async fn interests(&self, _query: &EntityQuery) -> Result<Vec<Interest>, StoreError> {
        Err(StoreError::Unavailable("database offline".to_string()))
    }

    async fn colleges(&self, _query: &EntityQuery) -> Result<Vec<College>, StoreError> {
        Err(StoreError::Unavailable("database offline".to_string()))
    }
}

/// Question store that remembers every query it served.
pub(super) struct RecordingQuestions {
    inner: Arc<MemoryCatalog>,
    pub(super) queries: Mutex<Vec<QuestionQuery>>,
}

impl RecordingQuestions {
    pub(super) fn new(inner: Arc<MemoryCatalog>) -> Self {
        Self {
            inner,
            queries: Mutex::new(Vec::new()),
        }
    }

    pub(super) fn queries(&self) -> Vec<QuestionQuery> {
        self.queries.lock().expect("query mutex poisoned").clone()
    }
}

#[async_trait]
impl QuestionStore for RecordingQuestions {
    async fn find_questions(
        &self,
        query: &QuestionQuery,
    ) -> Result<Vec<QuizQuestion>, StoreError> {
        self.queries
            .lock()
            .expect("query mutex poisoned")
            .push(query.clone());
        self.inner.find_questions(query).await
    }

    async fn questions_by_ids(&self, ids: &IdSet) -> Result<Vec<QuizQuestion>, StoreError> {
        self.inner.questions_by_ids(ids).await
    }
}
