use super::domain::{RoadmapStep, UserProfileSummary};
use crate::workflows::catalog::QuizResult;
use crate::workflows::human_list;

const REVIEW_STEP_KEY: &str = "review_results";
const MAX_NAMED_STREAMS: usize = 3;
const MAX_NAMED_INTERESTS: usize = 3;

/// Static shape of a roadmap milestone; descriptions are rendered per student.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepTemplate {
    pub key: &'static str,
    pub title: &'static str,
    pub category: &'static str,
    pub weight: u32,
}

#[derive(Debug)]
pub struct RoadmapBlueprint {
    steps: Vec<StepTemplate>,
}

impl RoadmapBlueprint {
    pub fn standard() -> Self {
        Self {
            steps: standard_step_templates(),
        }
    }

    pub fn step_templates(&self) -> &[StepTemplate] {
        &self.steps
    }

    /// Render the roadmap. The review step is only included when the quiz
    /// result recommends at least one stream; the profile never changes which
    /// steps appear or their order.
    pub fn generate(
        &self,
        profile: &UserProfileSummary,
        result: Option<&QuizResult>,
    ) -> Vec<RoadmapStep> {
        let streams: Vec<&str> = result
            .map(QuizResult::stream_names)
            .unwrap_or_default();

        self.steps
            .iter()
            .filter(|template| template.key != REVIEW_STEP_KEY || !streams.is_empty())
            .map(|template| RoadmapStep {
                key: template.key.to_string(),
                title: template.title.to_string(),
                description: describe(template.key, profile, &streams),
                category: template.category.to_string(),
                weight: template.weight,
            })
            .collect()
    }
}

fn standard_step_templates() -> Vec<StepTemplate> {
    vec![
        StepTemplate {
            key: "complete_profile",
            title: "Complete Your Profile",
            category: "profile",
            weight: 10,
        },
        StepTemplate {
            key: "take_assessment",
            title: "Take Assessment",
            category: "assessment",
            weight: 20,
        },
        StepTemplate {
            key: REVIEW_STEP_KEY,
            title: "Review Results",
            category: "assessment",
            weight: 25,
        },
        StepTemplate {
            key: "shortlist_options",
            title: "Shortlist Colleges & Programs",
            category: "exploration",
            weight: 30,
        },
        StepTemplate {
            key: "explore_careers",
            title: "Explore Career Paths",
            category: "exploration",
            weight: 40,
        },
        StepTemplate {
            key: "mentor_session",
            title: "Connect with a Mentor",
            category: "guidance",
            weight: 50,
        },
        StepTemplate {
            key: "prepare_applications",
            title: "Prepare Applications",
            category: "applications",
            weight: 60,
        },
        StepTemplate {
            key: "track_progress",
            title: "Track Progress",
            category: "tracking",
            weight: 70,
        },
    ]
}

fn describe(key: &str, profile: &UserProfileSummary, streams: &[&str]) -> String {
    match key {
        "complete_profile" => match profile.class_level() {
            Some(level) => format!(
                "Confirm your {level} details and keep your interests and goals up to date."
            ),
            None => "Add your class level, interests and goals so guidance stays relevant."
                .to_string(),
        },
        "take_assessment" => {
            "Complete the interest and aptitude quizzes to discover your strengths.".to_string()
        }
        REVIEW_STEP_KEY => {
            let named = &streams[..streams.len().min(MAX_NAMED_STREAMS)];
            format!(
                "Review your recommended streams: {}.",
                human_list(named)
            )
        }
        "shortlist_options" => {
            let interests = profile.interests();
            let named = &interests[..interests.len().min(MAX_NAMED_INTERESTS)];
            if named.is_empty() {
                "Shortlist colleges and programs that match your recommendations.".to_string()
            } else {
                format!(
                    "Shortlist colleges and programs that match your recommendations, starting with {}.",
                    human_list(named)
                )
            }
        }
        "explore_careers" => {
            let goals = profile.goals();
            if goals.is_empty() {
                "Research career paths, entry routes and what the work involves day to day."
                    .to_string()
            } else {
                format!(
                    "Research career paths that support your goals: {}.",
                    human_list(&goals)
                )
            }
        }
        "mentor_session" => match profile.class_level() {
            Some(level) => format!(
                "Book a session with a mentor to plan your next steps after {level}."
            ),
            None => "Book a session with a mentor to talk through your options.".to_string(),
        },
        "prepare_applications" => {
            "Note entrance exam dates, gather documents and prepare your applications."
                .to_string()
        }
        _ => "Revisit your roadmap regularly and update it as your plans change.".to_string(),
    }
}
