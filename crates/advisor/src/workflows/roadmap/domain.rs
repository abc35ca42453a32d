use serde::{Deserialize, Serialize};

use crate::workflows::catalog::EntityId;

/// One milestone on a student's roadmap.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoadmapStep {
    pub key: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub weight: u32,
}

/// Profile facts used to personalize step descriptions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfileSummary {
    #[serde(default)]
    pub class_level: Option<String>,
    #[serde(default)]
    pub interests: Vec<String>,
    #[serde(default)]
    pub goals: Vec<String>,
}

impl UserProfileSummary {
    pub fn class_level(&self) -> Option<&str> {
        self.class_level
            .as_deref()
            .map(str::trim)
            .filter(|value| !value.is_empty())
    }

    pub fn interests(&self) -> Vec<&str> {
        non_blank(&self.interests)
    }

    pub fn goals(&self) -> Vec<&str> {
        non_blank(&self.goals)
    }
}

fn non_blank(values: &[String]) -> Vec<&str> {
    values
        .iter()
        .map(|value| value.trim())
        .filter(|value| !value.is_empty())
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedFrom {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quiz_result_id: Option<EntityId>,
    pub rationale: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Roadmap {
    pub user_id: String,
    pub steps: Vec<RoadmapStep>,
    pub generated_from: GeneratedFrom,
}

impl Roadmap {
    pub fn step_keys(&self) -> Vec<&str> {
        self.steps.iter().map(|step| step.key.as_str()).collect()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoadmapRequest {
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub profile: Option<UserProfileSummary>,
    #[serde(default, alias = "resultId")]
    pub quiz_result_id: Option<EntityId>,
    /// Caller-supplied steps replace generation entirely.
    #[serde(default)]
    pub steps: Option<Vec<RoadmapStep>>,
}
