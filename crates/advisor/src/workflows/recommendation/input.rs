//! Request boundary: every accepted input shape is reduced here to one
//! canonical [`ScoreSource`] so scoring never branches on JSON layout.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::workflows::catalog::EntityId;

const SCORE_KEYS: [&str; 3] = ["score", "average", "value"];
const CATEGORY_KEYS: [&str; 3] = ["category", "name", "label"];
const ANSWER_KEYS: [&str; 3] = ["value", "answer", "score"];

/// Likert bounds for raw answers.
pub const MIN_ANSWER: f64 = 1.0;
pub const MAX_ANSWER: f64 = 5.0;

/// Recommendation request as posted by quiz clients.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationRequest {
    #[serde(default)]
    pub quiz_type: Option<String>,
    /// Ordered labels, or scores in any of the accepted score shapes.
    #[serde(default)]
    pub top_categories: Option<Value>,
    #[serde(default)]
    pub category_scores: Option<Value>,
    #[serde(default)]
    pub results: Option<Value>,
    #[serde(default)]
    pub answers: Option<Map<String, Value>>,
    #[serde(default, alias = "resultId")]
    pub quiz_result_id: Option<EntityId>,
    #[serde(default)]
    pub user_id: Option<String>,
}

/// One `{category, score}` observation.
#[derive(Debug, Clone, PartialEq)]
pub struct ScorePair {
    pub category: String,
    pub score: f64,
}

impl ScorePair {
    pub fn new(category: impl Into<String>, score: f64) -> Self {
        Self {
            category: category.into(),
            score,
        }
    }
}

/// A raw answer to a single question.
#[derive(Debug, Clone, PartialEq)]
pub struct Answer {
    pub question_id: EntityId,
    pub value: f64,
}

/// Answers in submission order. Only in-range Likert values survive parsing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AnswerSet {
    answers: Vec<Answer>,
}

impl AnswerSet {
    pub fn from_map(raw: &Map<String, Value>) -> Self {
        let answers = raw
            .iter()
            .filter_map(|(question_id, value)| {
                let value = numeric(value, &ANSWER_KEYS)?;
                let question_id = EntityId::new(question_id);
                let in_range = (MIN_ANSWER..=MAX_ANSWER).contains(&value);
                (in_range && !question_id.as_str().is_empty())
                    .then_some(Answer { question_id, value })
            })
            .collect();
        Self { answers }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Answer> {
        self.answers.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.answers.is_empty()
    }

    pub fn len(&self) -> usize {
        self.answers.len()
    }
}

/// Canonical description of where category scores come from.
#[derive(Debug, Clone, PartialEq)]
pub enum ScoreSource {
    /// Caller already ranked the categories.
    Ranked(Vec<String>),
    /// Precomputed scores, flattened to pairs.
    Scores(Vec<ScorePair>),
    /// Raw answers that still need question lookups.
    Answers(AnswerSet),
    /// Everything must be derived from the stored quiz result.
    StoredResult,
}

/// Validated request ready for the pipeline.
#[derive(Debug, Clone, PartialEq)]
pub struct RecommendationInput {
    pub quiz_type: String,
    pub source: ScoreSource,
    pub quiz_result_id: Option<EntityId>,
    pub user_id: Option<String>,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum InputError {
    #[error("quizType is required")]
    MissingQuizType,
}

impl RecommendationRequest {
    /// Validate and canonicalize. Sources are consulted in the order
    /// `topCategories`, `categoryScores`, `results`, `answers`; the first one
    /// that yields data wins and the stored quiz result is the fallback.
    pub fn into_input(self) -> Result<RecommendationInput, InputError> {
        let quiz_type = self
            .quiz_type
            .as_deref()
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .ok_or(InputError::MissingQuizType)?
            .to_string();

        let source = self
            .top_categories
            .as_ref()
            .and_then(parse_top_categories)
            .or_else(|| non_empty_scores(self.category_scores.as_ref()))
            .or_else(|| non_empty_scores(self.results.as_ref()))
            .or_else(|| {
                self.answers
                    .as_ref()
                    .map(AnswerSet::from_map)
                    .filter(|answers| !answers.is_empty())
                    .map(ScoreSource::Answers)
            })
            .unwrap_or(ScoreSource::StoredResult);

        let user_id = self
            .user_id
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty());

        Ok(RecommendationInput {
            quiz_type,
            source,
            quiz_result_id: self.quiz_result_id,
            user_id,
        })
    }
}

fn parse_top_categories(value: &Value) -> Option<ScoreSource> {
    if let Value::Array(items) = value {
        if !items.is_empty() && items.iter().all(Value::is_string) {
            let labels: Vec<String> = items
                .iter()
                .filter_map(Value::as_str)
                .map(str::trim)
                .filter(|label| !label.is_empty())
                .map(str::to_string)
                .collect();
            return (!labels.is_empty()).then_some(ScoreSource::Ranked(labels));
        }
    }
    non_empty_scores(Some(value))
}

fn non_empty_scores(value: Option<&Value>) -> Option<ScoreSource> {
    let pairs = parse_score_pairs(value?);
    (!pairs.is_empty()).then_some(ScoreSource::Scores(pairs))
}

/// Flatten `{cat: n}`, `{cat: {score|average|value: n}}` and
/// `[{category|name|label, score|average|value}]` into pairs, in input order.
/// Entries without a usable label or finite score are dropped.
pub fn parse_score_pairs(value: &Value) -> Vec<ScorePair> {
    match value {
        Value::Object(map) => map
            .iter()
            .filter_map(|(category, raw)| {
                let category = category.trim();
                let score = numeric(raw, &SCORE_KEYS)?;
                (!category.is_empty()).then(|| ScorePair::new(category, score))
            })
            .collect(),
        Value::Array(items) => items
            .iter()
            .filter_map(|item| {
                let entry = item.as_object()?;
                let category = CATEGORY_KEYS
                    .iter()
                    .filter_map(|key| entry.get(*key).and_then(Value::as_str))
                    .map(str::trim)
                    .find(|label| !label.is_empty())?;
                let score = numeric(item, &SCORE_KEYS)?;
                Some(ScorePair::new(category, score))
            })
            .collect(),
        _ => Vec::new(),
    }
}

/// Numbers, numeric strings, or objects holding one under any of `keys`.
fn numeric(value: &Value, keys: &[&str]) -> Option<f64> {
    let number = match value {
        Value::Number(number) => number.as_f64(),
        Value::String(raw) => raw.trim().parse::<f64>().ok(),
        Value::Object(entry) => keys
            .iter()
            .filter_map(|key| entry.get(*key))
            .find_map(|inner| match inner {
                Value::Number(number) => number.as_f64(),
                Value::String(raw) => raw.trim().parse::<f64>().ok(),
                _ => None,
            }),
        _ => None,
    };
    number.filter(|value| value.is_finite())
}
