use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, RwLock};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::entities::{Career, College, Course, Exam, Interest, Program};
use super::ids::{EntityId, IdSet};
use super::query::{EntityQuery, QuestionQuery};
use super::quiz::{QuizQuestion, QuizResult};
use super::record::{Recommendation, RecommendationDraft};
use super::store::{
    CatalogStore, QuestionStore, QuizResultStore, RecommendationStore, StoreError,
};

/// Serialized form of every collection the advisor reads.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogSnapshot {
    #[serde(default)]
    pub questions: Vec<QuizQuestion>,
    #[serde(default)]
    pub courses: Vec<Course>,
    #[serde(default)]
    pub careers: Vec<Career>,
    #[serde(default)]
    pub programs: Vec<Program>,
    #[serde(default)]
    pub exams: Vec<Exam>,
    #[serde(default)]
    pub interests: Vec<Interest>,
    #[serde(default)]
    pub colleges: Vec<College>,
    #[serde(default)]
    pub quiz_results: Vec<QuizResult>,
}

impl CatalogSnapshot {
    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }
}

/// Process-local document store backed by a [`CatalogSnapshot`].
#[derive(Debug)]
pub struct MemoryCatalog {
    snapshot: RwLock<CatalogSnapshot>,
    recommendations: Mutex<Vec<Recommendation>>,
    sequence: AtomicU64,
}

impl MemoryCatalog {
    pub fn new(snapshot: CatalogSnapshot) -> Self {
        Self {
            snapshot: RwLock::new(snapshot),
            recommendations: Mutex::new(Vec::new()),
            sequence: AtomicU64::new(1),
        }
    }

    /// Recommendations written so far, in insertion order.
    pub fn recommendations(&self) -> Result<Vec<Recommendation>, StoreError> {
        let guard = self.recommendations.lock().map_err(|_| poisoned())?;
        Ok(guard.clone())
    }

    fn read<T>(&self, f: impl FnOnce(&CatalogSnapshot) -> T) -> Result<T, StoreError> {
        let guard = self.snapshot.read().map_err(|_| poisoned())?;
        Ok(f(&*guard))
    }

    fn next_recommendation_id(&self) -> EntityId {
        let id = self.sequence.fetch_add(1, Ordering::Relaxed);
        EntityId::new(format!("rec-{id:06}"))
    }
}

impl Default for MemoryCatalog {
    fn default() -> Self {
        Self::new(CatalogSnapshot::default())
    }
}

fn poisoned() -> StoreError {
    StoreError::Unavailable("catalog lock poisoned".to_string())
}

#[async_trait]
impl QuestionStore for MemoryCatalog {
    async fn find_questions(
        &self,
        query: &QuestionQuery,
    ) -> Result<Vec<QuizQuestion>, StoreError> {
        self.read(|snapshot| {
            snapshot
                .questions
                .iter()
                .filter(|question| query.matches(question))
                .cloned()
                .collect()
        })
    }

    async fn questions_by_ids(&self, ids: &IdSet) -> Result<Vec<QuizQuestion>, StoreError> {
        self.read(|snapshot| {
            snapshot
                .questions
                .iter()
                .filter(|question| ids.contains(&question.id))
                .cloned()
                .collect()
        })
    }
}

#[async_trait]
impl CatalogStore for MemoryCatalog {
    async fn courses(&self, query: &EntityQuery) -> Result<Vec<Course>, StoreError> {
        self.read(|snapshot| query.apply(&snapshot.courses))
    }

    async fn careers(&self, query: &EntityQuery) -> Result<Vec<Career>, StoreError> {
        self.read(|snapshot| query.apply(&snapshot.careers))
    }

    async fn programs(&self, query: &EntityQuery) -> Result<Vec<Program>, StoreError> {
        self.read(|snapshot| query.apply(&snapshot.programs))
    }

    async fn exams(&self, query: &EntityQuery) -> Result<Vec<Exam>, StoreError> {
        self.read(|snapshot| query.apply(&snapshot.exams))
    }

    async fn interests(&self, query: &EntityQuery) -> Result<Vec<Interest>, StoreError> {
        self.read(|snapshot| query.apply(&snapshot.interests))
    }

    async fn colleges(&self, query: &EntityQuery) -> Result<Vec<College>, StoreError> {
        self.read(|snapshot| query.apply(&snapshot.colleges))
    }
}

#[async_trait]
impl QuizResultStore for MemoryCatalog {
    async fn quiz_result(&self, id: &EntityId) -> Result<Option<QuizResult>, StoreError> {
        self.read(|snapshot| {
            snapshot
                .quiz_results
                .iter()
                .find(|result| &result.id == id)
                .cloned()
        })
    }

    async fn latest_for_user(&self, user_id: &str) -> Result<Option<QuizResult>, StoreError> {
        // max_by_key keeps the last of equal timestamps, i.e. the newest insert.
        self.read(|snapshot| {
            snapshot
                .quiz_results
                .iter()
                .filter(|result| result.user_id.as_deref() == Some(user_id))
                .max_by_key(|result| result.created_at)
                .cloned()
        })
    }

    async fn link_recommendation(
        &self,
        result_id: &EntityId,
        recommendation_id: &EntityId,
    ) -> Result<(), StoreError> {
        let mut guard = self.snapshot.write().map_err(|_| poisoned())?;
        let result = guard
            .quiz_results
            .iter_mut()
            .find(|result| &result.id == result_id)
            .ok_or(StoreError::NotFound)?;
        result.recommendation_id = Some(recommendation_id.clone());
        Ok(())
    }
}

#[async_trait]
impl RecommendationStore for MemoryCatalog {
    async fn insert(&self, draft: RecommendationDraft) -> Result<EntityId, StoreError> {
        let id = self.next_recommendation_id();
        let mut guard = self.recommendations.lock().map_err(|_| poisoned())?;
        guard.push(draft.into_record(id.clone()));
        Ok(id)
    }
}
