use super::entities::{CatalogEntity, LinkField};
use super::ids::IdSet;
use super::quiz::QuizQuestion;

/// Disjunctive membership filter over catalog records.
///
/// A record matches when it is active (unless `active_only` is cleared) and
/// at least one clause finds one of its linked ids in the clause's id set.
/// A query without clauses, or whose clauses all carry empty sets, matches
/// nothing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntityQuery {
    clauses: Vec<(LinkField, IdSet)>,
    pub active_only: bool,
    pub limit: usize,
}

impl EntityQuery {
    pub fn new(limit: usize) -> Self {
        Self {
            clauses: Vec::new(),
            active_only: true,
            limit,
        }
    }

    /// Add an OR clause: match records linked through `field` to any of `ids`.
    pub fn or_linked(mut self, field: LinkField, ids: IdSet) -> Self {
        self.clauses.push((field, ids));
        self
    }

    /// True when no clause can ever match, so a store may skip the read.
    pub fn is_vacuous(&self) -> bool {
        self.clauses.iter().all(|(_, ids)| ids.is_empty())
    }

    pub fn matches<E: CatalogEntity>(&self, entity: &E) -> bool {
        if self.active_only && !entity.is_active() {
            return false;
        }

        self.clauses.iter().any(|(field, ids)| {
            entity
                .links(*field)
                .iter()
                .any(|linked| ids.contains(linked))
        })
    }

    /// Filter `records` in their stored order, stopping at the limit.
    pub fn apply<'a, E, I>(&self, records: I) -> Vec<E>
    where
        E: CatalogEntity + 'a,
        I: IntoIterator<Item = &'a E>,
    {
        if self.is_vacuous() {
            return Vec::new();
        }
        records
            .into_iter()
            .filter(|record| self.matches(*record))
            .take(self.limit)
            .cloned()
            .collect()
    }
}

/// Filter over quiz questions used by the linking step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionQuery {
    pub quiz_type: String,
    /// Lowercase tags an option must carry; `None` matches every question of
    /// the quiz type.
    pub any_tag: Option<Vec<String>>,
    pub active_only: bool,
}

impl QuestionQuery {
    pub fn matches(&self, question: &QuizQuestion) -> bool {
        if self.active_only && !question.is_active {
            return false;
        }
        if !question.is_quiz_type(&self.quiz_type) {
            return false;
        }

        match &self.any_tag {
            None => true,
            Some(tags) => question
                .option_tags()
                .any(|tag| tags.iter().any(|wanted| wanted.eq_ignore_ascii_case(tag))),
        }
    }
}
