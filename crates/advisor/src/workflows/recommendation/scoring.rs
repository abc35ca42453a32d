use std::cmp::Ordering;
use std::collections::HashMap;

use serde::Serialize;

use super::input::{AnswerSet, ScorePair};
use crate::workflows::catalog::QuizQuestion;

/// Per-category accumulation. `average == total / count` and `count > 0`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryScore {
    pub category: String,
    pub average: f64,
    pub total: f64,
    pub count: u32,
}

/// Aggregation output: every scored category plus the ranked cutoff.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreSummary {
    pub scores: Vec<CategoryScore>,
    pub top_categories: Vec<String>,
}

impl ScoreSummary {
    pub fn is_empty(&self) -> bool {
        self.top_categories.is_empty()
    }

    pub fn top_category(&self) -> Option<&str> {
        self.top_categories.first().map(String::as_str)
    }
}

/// Reduces score observations into category averages and the top-N ranking.
#[derive(Debug, Clone, Copy)]
pub struct CategoryScoreAggregator {
    limit: usize,
}

impl CategoryScoreAggregator {
    pub fn new(limit: usize) -> Self {
        Self { limit }
    }

    /// Group pairs by category (case-insensitive, first spelling wins) and rank
    /// by average. Equal averages keep first-appearance order.
    pub fn aggregate<I>(&self, pairs: I) -> ScoreSummary
    where
        I: IntoIterator<Item = ScorePair>,
    {
        let mut scores: Vec<CategoryScore> = Vec::new();
        let mut index: HashMap<String, usize> = HashMap::new();

        for pair in pairs {
            let label = pair.category.trim();
            if label.is_empty() || !pair.score.is_finite() {
                continue;
            }

            let slot = *index.entry(label.to_lowercase()).or_insert_with(|| {
                scores.push(CategoryScore {
                    category: label.to_string(),
                    average: 0.0,
                    total: 0.0,
                    count: 0,
                });
                scores.len() - 1
            });

            let entry = &mut scores[slot];
            entry.total += pair.score;
            entry.count += 1;
        }

        for entry in &mut scores {
            entry.average = entry.total / f64::from(entry.count);
        }

        let mut ranked: Vec<&CategoryScore> = scores.iter().collect();
        ranked.sort_by(|left, right| {
            right
                .average
                .partial_cmp(&left.average)
                .unwrap_or(Ordering::Equal)
        });
        let top_categories = ranked
            .into_iter()
            .take(self.limit)
            .map(|entry| entry.category.clone())
            .collect();

        ScoreSummary {
            scores,
            top_categories,
        }
    }

    /// Score raw answers against their question definitions. Answers to
    /// unknown questions, or to questions with neither category nor section,
    /// are ignored.
    pub fn from_answers(&self, answers: &AnswerSet, questions: &[QuizQuestion]) -> ScoreSummary {
        let categories: HashMap<_, _> = questions
            .iter()
            .filter_map(|question| {
                question
                    .scoring_category()
                    .map(|category| (&question.id, category))
            })
            .collect();

        let pairs = answers.iter().filter_map(|answer| {
            categories
                .get(&answer.question_id)
                .map(|category| ScorePair::new(*category, answer.value))
        });

        self.aggregate(pairs)
    }

    /// Accept a caller-ranked list verbatim, minus blanks and repeats.
    pub fn from_ranked(&self, labels: &[String]) -> ScoreSummary {
        let mut top_categories: Vec<String> = Vec::new();
        for label in labels.iter().map(|label| label.trim()) {
            if label.is_empty()
                || top_categories
                    .iter()
                    .any(|seen| seen.eq_ignore_ascii_case(label))
            {
                continue;
            }
            top_categories.push(label.to_string());
        }
        top_categories.truncate(self.limit);

        ScoreSummary {
            scores: Vec::new(),
            top_categories,
        }
    }
}
