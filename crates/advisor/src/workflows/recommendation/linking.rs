use std::sync::Arc;

use tracing::debug;

use super::tags::TagSet;
use crate::workflows::catalog::{IdSet, QuestionQuery, QuestionStore, QuizQuestion, StoreError};

/// Quiz type whose questions carry catalog references.
pub const LINKING_QUIZ_TYPE: &str = "interest";

/// Identifier sets collected from linking questions.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LinkedIds {
    pub courses: IdSet,
    pub careers: IdSet,
    pub streams: IdSet,
    pub interests: IdSet,
}

impl LinkedIds {
    pub fn absorb(&mut self, question: &QuizQuestion) {
        self.courses.extend(question.related_courses.iter().cloned());
        self.careers.extend(question.related_careers.iter().cloned());
        self.streams.extend(question.related_streams.iter().cloned());
        self.interests.extend(question.interest_tags.iter().cloned());
    }

    pub fn is_empty(&self) -> bool {
        self.courses.is_empty()
            && self.careers.is_empty()
            && self.streams.is_empty()
            && self.interests.is_empty()
    }
}

impl<'a> FromIterator<&'a QuizQuestion> for LinkedIds {
    fn from_iter<I: IntoIterator<Item = &'a QuizQuestion>>(iter: I) -> Self {
        let mut ids = LinkedIds::default();
        for question in iter {
            ids.absorb(question);
        }
        ids
    }
}

/// Query for active linking questions. An empty tag set widens the query to
/// every active linking question so unmapped categories still surface results.
pub fn linking_query(tags: &TagSet) -> QuestionQuery {
    let any_tag = (!tags.is_empty()).then(|| tags.as_slice().to_vec());
    QuestionQuery {
        quiz_type: LINKING_QUIZ_TYPE.to_string(),
        any_tag,
        active_only: true,
    }
}

/// Resolves a tag set into the catalog ids referenced by matching questions.
pub struct LinkingResolver {
    questions: Arc<dyn QuestionStore>,
}

impl LinkingResolver {
    pub fn new(questions: Arc<dyn QuestionStore>) -> Self {
        Self { questions }
    }

    pub async fn resolve(&self, tags: &TagSet) -> Result<LinkedIds, StoreError> {
        let query = linking_query(tags);
        let questions = self.questions.find_questions(&query).await?;
        let ids: LinkedIds = questions.iter().collect();

        debug!(
            tags = tags.len(),
            unfiltered = query.any_tag.is_none(),
            questions = questions.len(),
            courses = ids.courses.len(),
            careers = ids.careers.len(),
            streams = ids.streams.len(),
            interests = ids.interests.len(),
            "resolved linking questions"
        );

        Ok(ids)
    }
}
