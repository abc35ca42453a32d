//! Recommendation documents written by the pipeline.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ids::EntityId;

/// Recommendation prepared for storage; the store assigns the id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationDraft {
    pub user_id: String,
    pub quiz_type: String,
    pub courses: Vec<CourseScore>,
    pub programs: Vec<ProgramScore>,
    pub rationale: String,
    pub quiz_result_id: Option<EntityId>,
    pub created_at: DateTime<Utc>,
}

impl RecommendationDraft {
    pub fn into_record(self, id: EntityId) -> Recommendation {
        Recommendation {
            id,
            user_id: self.user_id,
            quiz_type: self.quiz_type,
            courses: self.courses,
            programs: self.programs,
            rationale: self.rationale,
            quiz_result_id: self.quiz_result_id,
            created_at: self.created_at,
        }
    }
}

/// Persisted recommendation linked back to the quiz attempt that produced it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recommendation {
    pub id: EntityId,
    pub user_id: String,
    pub quiz_type: String,
    pub courses: Vec<CourseScore>,
    pub programs: Vec<ProgramScore>,
    pub rationale: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quiz_result_id: Option<EntityId>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseScore {
    pub course_id: EntityId,
    pub score: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgramScore {
    pub program_id: EntityId,
    pub score: f64,
}
