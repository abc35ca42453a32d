use async_trait::async_trait;

use super::entities::{Career, College, Course, Exam, Interest, Program};
use super::ids::{EntityId, IdSet};
use super::query::{EntityQuery, QuestionQuery};
use super::quiz::{QuizQuestion, QuizResult};
use super::record::RecommendationDraft;

/// Error enumeration for document-store failures.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("record not found")]
    NotFound,
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// Read access to quiz question definitions.
#[async_trait]
pub trait QuestionStore: Send + Sync {
    async fn find_questions(&self, query: &QuestionQuery)
        -> Result<Vec<QuizQuestion>, StoreError>;

    async fn questions_by_ids(&self, ids: &IdSet) -> Result<Vec<QuizQuestion>, StoreError>;
}

/// Read access to the reference-data domains, one method per collection.
#[async_trait]
pub trait CatalogStore: Send + Sync {
    async fn courses(&self, query: &EntityQuery) -> Result<Vec<Course>, StoreError>;
    async fn careers(&self, query: &EntityQuery) -> Result<Vec<Career>, StoreError>;
    async fn programs(&self, query: &EntityQuery) -> Result<Vec<Program>, StoreError>;
    async fn exams(&self, query: &EntityQuery) -> Result<Vec<Exam>, StoreError>;
    async fn interests(&self, query: &EntityQuery) -> Result<Vec<Interest>, StoreError>;
    async fn colleges(&self, query: &EntityQuery) -> Result<Vec<College>, StoreError>;
}

/// Quiz attempt storage. Only the recommendation back-link is ever written.
#[async_trait]
pub trait QuizResultStore: Send + Sync {
    async fn quiz_result(&self, id: &EntityId) -> Result<Option<QuizResult>, StoreError>;

    async fn latest_for_user(&self, user_id: &str) -> Result<Option<QuizResult>, StoreError>;

    async fn link_recommendation(
        &self,
        result_id: &EntityId,
        recommendation_id: &EntityId,
    ) -> Result<(), StoreError>;
}

/// Write side of the recommendation collection.
#[async_trait]
pub trait RecommendationStore: Send + Sync {
    async fn insert(&self, draft: RecommendationDraft) -> Result<EntityId, StoreError>;
}
