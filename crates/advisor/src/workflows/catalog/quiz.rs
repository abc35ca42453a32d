use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::ids::EntityId;

fn active_by_default() -> bool {
    true
}

/// Quiz question definition as stored by the admin tooling.
///
/// Interest questions double as linking records: their option tags bridge
/// categories to concrete catalog entries through the `related_*` lists.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizQuestion {
    #[serde(alias = "_id")]
    pub id: EntityId,
    #[serde(default)]
    pub quiz_type: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub section: Option<String>,
    #[serde(default)]
    pub prompt: String,
    #[serde(default)]
    pub options: Vec<QuestionOption>,
    #[serde(default)]
    pub related_courses: Vec<EntityId>,
    #[serde(default)]
    pub related_careers: Vec<EntityId>,
    #[serde(default)]
    pub related_streams: Vec<EntityId>,
    #[serde(default)]
    pub interest_tags: Vec<EntityId>,
    #[serde(default = "active_by_default")]
    pub is_active: bool,
}

impl QuizQuestion {
    /// Label the answer is scored under. Aptitude quizzes populate `section`
    /// instead of `category`, so both are consulted.
    pub fn scoring_category(&self) -> Option<&str> {
        [self.category.as_deref(), self.section.as_deref()]
            .into_iter()
            .flatten()
            .map(str::trim)
            .find(|label| !label.is_empty())
    }

    pub fn option_tags(&self) -> impl Iterator<Item = &str> {
        self.options
            .iter()
            .flat_map(|option| option.tags.iter())
            .map(|tag| tag.trim())
    }

    pub fn is_quiz_type(&self, quiz_type: &str) -> bool {
        self.quiz_type
            .as_deref()
            .is_some_and(|value| value.trim().eq_ignore_ascii_case(quiz_type))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionOption {
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub tags: Vec<String>,
}

/// Stored outcome of a quiz attempt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizResult {
    #[serde(alias = "_id")]
    pub id: EntityId,
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub quiz_type: Option<String>,
    /// Raw answers keyed by question id, exactly as submitted.
    #[serde(default)]
    pub answers: Map<String, Value>,
    /// Category scores in whichever shape the quiz client produced.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_scores: Option<Value>,
    #[serde(default)]
    pub top_categories: Vec<String>,
    #[serde(default)]
    pub recommended_streams: Vec<StreamRecommendation>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recommendation_id: Option<EntityId>,
}

impl QuizResult {
    /// Stream names in stored rank order, blanks removed.
    pub fn stream_names(&self) -> Vec<&str> {
        self.recommended_streams
            .iter()
            .map(|entry| entry.stream.trim())
            .filter(|name| !name.is_empty())
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StreamRecommendation {
    pub stream: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
}
