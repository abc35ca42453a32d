use std::sync::Arc;

use tracing::{debug, info};

use super::blueprint::RoadmapBlueprint;
use super::domain::{GeneratedFrom, Roadmap, RoadmapRequest, UserProfileSummary};
use crate::workflows::catalog::{QuizResult, QuizResultStore, StoreError};
use crate::workflows::human_list;

const PROVIDED_RATIONALE: &str = "Steps provided with the request";
const DEFAULT_RATIONALE: &str = "Standard milestones; take an assessment to personalize your roadmap";

pub struct RoadmapService {
    results: Arc<dyn QuizResultStore>,
    blueprint: RoadmapBlueprint,
}

impl RoadmapService {
    pub fn new(results: Arc<dyn QuizResultStore>) -> Self {
        Self {
            results,
            blueprint: RoadmapBlueprint::standard(),
        }
    }

    /// Build a roadmap for the caller (or the body's `userId`). Without an
    /// explicit quiz result the user's latest attempt is used.
    pub async fn generate(
        &self,
        request: RoadmapRequest,
        caller: Option<String>,
    ) -> Result<Roadmap, RoadmapError> {
        let user_id = caller
            .or(request.user_id)
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
            .ok_or(RoadmapError::MissingUser)?;

        if let Some(steps) = request.steps.filter(|steps| !steps.is_empty()) {
            debug!(%user_id, steps = steps.len(), "using provided roadmap steps");
            return Ok(Roadmap {
                user_id,
                steps,
                generated_from: GeneratedFrom {
                    quiz_result_id: request.quiz_result_id,
                    rationale: PROVIDED_RATIONALE.to_string(),
                },
            });
        }

        let result = match request.quiz_result_id.as_ref() {
            Some(result_id) => self.results.quiz_result(result_id).await?,
            None => self.results.latest_for_user(&user_id).await?,
        };

        let profile = request.profile.unwrap_or_default();
        let steps = self.blueprint.generate(&profile, result.as_ref());
        info!(
            %user_id,
            steps = steps.len(),
            from_result = result.is_some(),
            "roadmap generated"
        );

        Ok(Roadmap {
            user_id,
            steps,
            generated_from: GeneratedFrom {
                quiz_result_id: result.as_ref().map(|result| result.id.clone()),
                rationale: rationale(&profile, result.as_ref()),
            },
        })
    }
}

fn rationale(profile: &UserProfileSummary, result: Option<&QuizResult>) -> String {
    let Some(result) = result else {
        return DEFAULT_RATIONALE.to_string();
    };

    let streams = result.stream_names();
    let mut text = if streams.is_empty() {
        "Based on your latest quiz result".to_string()
    } else {
        format!(
            "Based on your quiz result recommending {}",
            human_list(&streams)
        )
    };
    if let Some(level) = profile.class_level() {
        text.push_str(&format!(" for {level}"));
    }
    text
}

#[derive(Debug, thiserror::Error)]
pub enum RoadmapError {
    #[error("userId is required")]
    MissingUser,
    #[error(transparent)]
    Store(#[from] StoreError),
}
