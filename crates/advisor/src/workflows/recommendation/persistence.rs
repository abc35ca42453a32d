use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info, warn};

use super::explain::RecommendationPayload;
use super::tags::TagSet;
use crate::workflows::catalog::{
    CourseScore, EntityId, ProgramScore, QuizResultStore, RecommendationDraft,
    RecommendationStore,
};

const RATIONALE_TAG_LIMIT: usize = 5;

/// Who and what a payload is recorded against.
#[derive(Debug, Clone, Copy)]
pub struct RecordContext<'a> {
    pub user_id: Option<&'a str>,
    pub quiz_result_id: Option<&'a EntityId>,
    pub quiz_type: &'a str,
}

/// Best-effort writer for computed recommendations.
///
/// Every failure is logged and swallowed; callers only learn whether an id
/// was produced. A referenced quiz result is only linked when it belongs to
/// the user the recommendation is recorded for.
pub struct RecommendationRecorder {
    recommendations: Arc<dyn RecommendationStore>,
    results: Arc<dyn QuizResultStore>,
}

impl RecommendationRecorder {
    pub fn new(
        recommendations: Arc<dyn RecommendationStore>,
        results: Arc<dyn QuizResultStore>,
    ) -> Self {
        Self {
            recommendations,
            results,
        }
    }

    pub async fn record(
        &self,
        payload: &RecommendationPayload,
        tags: &TagSet,
        context: RecordContext<'_>,
    ) -> Option<EntityId> {
        let Some(user_id) = context.user_id else {
            debug!("no user identity on request; recommendation not persisted");
            return None;
        };

        let origin = match context.quiz_result_id {
            Some(result_id) => self.originating_result(result_id, user_id).await,
            None => None,
        };

        let draft = draft_from_payload(
            payload,
            tags,
            user_id,
            context.quiz_type,
            origin.clone(),
        );
        let recommendation_id = match self.recommendations.insert(draft).await {
            Ok(id) => id,
            Err(err) => {
                warn!(error = %err, user_id, "failed to persist recommendation");
                return None;
            }
        };

        info!(%recommendation_id, user_id, "recommendation persisted");

        if let Some(result_id) = origin {
            match self
                .results
                .link_recommendation(&result_id, &recommendation_id)
                .await
            {
                Ok(()) => debug!(%result_id, %recommendation_id, "quiz result back-linked"),
                Err(err) => warn!(
                    error = %err,
                    %result_id,
                    %recommendation_id,
                    "failed to back-link recommendation onto quiz result"
                ),
            }
        }

        Some(recommendation_id)
    }

    /// The referenced quiz result, if `user_id` owns it.
    async fn originating_result(&self, result_id: &EntityId, user_id: &str) -> Option<EntityId> {
        match self.results.quiz_result(result_id).await {
            Ok(Some(result)) if result.user_id.as_deref() == Some(user_id) => Some(result.id),
            Ok(Some(result)) => {
                warn!(
                    %result_id,
                    user_id,
                    owner = result.user_id.as_deref().unwrap_or("unknown"),
                    "quiz result belongs to another user; not linking"
                );
                None
            }
            Ok(None) => {
                warn!(%result_id, user_id, "referenced quiz result not found; not linking");
                None
            }
            Err(err) => {
                warn!(
                    error = %err,
                    %result_id,
                    user_id,
                    "failed to verify quiz result owner; not linking"
                );
                None
            }
        }
    }
}

pub fn draft_from_payload(
    payload: &RecommendationPayload,
    tags: &TagSet,
    user_id: &str,
    quiz_type: &str,
    quiz_result_id: Option<EntityId>,
) -> RecommendationDraft {
    RecommendationDraft {
        user_id: user_id.to_string(),
        quiz_type: quiz_type.to_string(),
        courses: payload
            .courses
            .iter()
            .map(|item| CourseScore {
                course_id: item.id.clone(),
                score: item.score,
            })
            .collect(),
        programs: payload
            .programs
            .iter()
            .map(|item| ProgramScore {
                program_id: item.id.clone(),
                score: item.score,
            })
            .collect(),
        rationale: rationale(&payload.top_categories, tags),
        quiz_result_id,
        created_at: Utc::now(),
    }
}

/// Summary stored with the record, e.g.
/// `Top categories: STEM, Arts. Matched tags: technology, mathematics`.
pub fn rationale(top_categories: &[String], tags: &TagSet) -> String {
    let mut parts = Vec::with_capacity(2);
    if !top_categories.is_empty() {
        parts.push(format!("Top categories: {}", top_categories.join(", ")));
    }
    if !tags.is_empty() {
        let named: Vec<&str> = tags.iter().take(RATIONALE_TAG_LIMIT).collect();
        parts.push(format!("Matched tags: {}", named.join(", ")));
    }

    if parts.is_empty() {
        "Recommended from all active interest links".to_string()
    } else {
        parts.join(". ")
    }
}
