use std::sync::Arc;

use tracing::{debug, info, warn};

use super::explain::{normalize, RecommendationPayload};
use super::fetcher::EntityFetcher;
use super::input::{
    parse_score_pairs, AnswerSet, InputError, RecommendationInput, RecommendationRequest,
    ScoreSource,
};
use super::linking::LinkingResolver;
use super::persistence::{RecommendationRecorder, RecordContext};
use super::scoring::{CategoryScoreAggregator, ScoreSummary};
use super::tags::map_categories;
use crate::config::PipelineConfig;
use crate::workflows::catalog::{
    CatalogStore, IdSet, QuestionStore, QuizResult, QuizResultStore, RecommendationStore,
    StoreError,
};

/// Collaborators the pipeline reads from and records into.
#[derive(Clone)]
pub struct RecommendationStores {
    pub questions: Arc<dyn QuestionStore>,
    pub catalog: Arc<dyn CatalogStore>,
    pub results: Arc<dyn QuizResultStore>,
    pub recommendations: Arc<dyn RecommendationStore>,
}

impl RecommendationStores {
    /// Use one backend for every collection.
    pub fn shared<S>(store: Arc<S>) -> Self
    where
        S: QuestionStore + CatalogStore + QuizResultStore + RecommendationStore + 'static,
    {
        Self {
            questions: store.clone(),
            catalog: store.clone(),
            results: store.clone(),
            recommendations: store,
        }
    }
}

/// Service composing scoring, tag mapping, linking, fetching, explanation,
/// and best-effort persistence.
pub struct RecommendationService {
    aggregator: CategoryScoreAggregator,
    questions: Arc<dyn QuestionStore>,
    results: Arc<dyn QuizResultStore>,
    resolver: LinkingResolver,
    fetcher: EntityFetcher,
    recorder: RecommendationRecorder,
}

impl RecommendationService {
    pub fn new(stores: RecommendationStores, config: PipelineConfig) -> Self {
        let RecommendationStores {
            questions,
            catalog,
            results,
            recommendations,
        } = stores;

        Self {
            aggregator: CategoryScoreAggregator::new(config.top_category_limit),
            resolver: LinkingResolver::new(questions.clone()),
            fetcher: EntityFetcher::new(catalog, config.domain_limit),
            recorder: RecommendationRecorder::new(recommendations, results.clone()),
            questions,
            results,
        }
    }

    /// Run the pipeline for one request. `caller` is the identity resolved by
    /// the auth layer and takes precedence over anything in the body.
    pub async fn recommend(
        &self,
        request: RecommendationRequest,
        caller: Option<String>,
    ) -> Result<RecommendationPayload, RecommendationError> {
        let input = request.into_input()?;
        let stored = self.stored_result(&input, caller.as_deref()).await?;
        let summary = self.score(&input, stored.as_ref()).await?;

        let user_id = caller
            .or_else(|| input.user_id.clone())
            .or_else(|| stored.as_ref().and_then(|result| result.user_id.clone()));

        if summary.is_empty() {
            info!(quiz_type = %input.quiz_type, "no scored categories; nothing to recommend");
            return Ok(RecommendationPayload::default());
        }

        let tags = map_categories(&summary.top_categories);
        debug!(
            top_categories = ?summary.top_categories,
            tags = ?tags.as_slice(),
            "mapped categories to tags"
        );

        let ids = self.resolver.resolve(&tags).await?;
        let entities = self.fetcher.fetch(&ids).await?;
        let mut payload = normalize(&entities, &tags, &summary.top_categories);

        let context = RecordContext {
            user_id: user_id.as_deref(),
            quiz_result_id: input.quiz_result_id.as_ref(),
            quiz_type: &input.quiz_type,
        };
        payload.recommendation_id = self.recorder.record(&payload, &tags, context).await;

        info!(
            quiz_type = %input.quiz_type,
            items = payload.item_count(),
            persisted = payload.recommendation_id.is_some(),
            "recommendations generated"
        );
        Ok(payload)
    }

    /// Resolve category scores from whichever source the request carried.
    pub async fn score(
        &self,
        input: &RecommendationInput,
        stored: Option<&QuizResult>,
    ) -> Result<ScoreSummary, StoreError> {
        match &input.source {
            ScoreSource::Ranked(labels) => Ok(self.aggregator.from_ranked(labels)),
            ScoreSource::Scores(pairs) => Ok(self.aggregator.aggregate(pairs.iter().cloned())),
            ScoreSource::Answers(answers) => self.score_answers(answers).await,
            ScoreSource::StoredResult => match stored {
                Some(result) => self.score_stored(result).await,
                None => Ok(ScoreSummary::default()),
            },
        }
    }

    /// The referenced quiz result is read when scores must come from it, or
    /// when it is the only remaining source of a user identity.
    async fn stored_result(
        &self,
        input: &RecommendationInput,
        caller: Option<&str>,
    ) -> Result<Option<QuizResult>, StoreError> {
        let Some(result_id) = input.quiz_result_id.as_ref() else {
            return Ok(None);
        };
        let needs_scores = matches!(input.source, ScoreSource::StoredResult);
        let needs_owner = caller.is_none() && input.user_id.is_none();
        if !needs_scores && !needs_owner {
            return Ok(None);
        }

        // Scores cannot be produced without the stored result; the owner is
        // only needed for persistence, which is best-effort.
        let result = match self.results.quiz_result(result_id).await {
            Ok(result) => result,
            Err(err) if !needs_scores => {
                warn!(
                    error = %err,
                    %result_id,
                    "quiz result owner lookup failed; recommendation will not be persisted"
                );
                return Ok(None);
            }
            Err(err) => return Err(err),
        };
        if result.is_none() {
            debug!(%result_id, "referenced quiz result not found");
        }
        Ok(result)
    }

    async fn score_stored(&self, result: &QuizResult) -> Result<ScoreSummary, StoreError> {
        if !result.top_categories.is_empty() {
            return Ok(self.aggregator.from_ranked(&result.top_categories));
        }

        if let Some(scores) = result.category_scores.as_ref() {
            let pairs = parse_score_pairs(scores);
            if !pairs.is_empty() {
                return Ok(self.aggregator.aggregate(pairs));
            }
        }

        self.score_answers(&AnswerSet::from_map(&result.answers))
            .await
    }

    async fn score_answers(&self, answers: &AnswerSet) -> Result<ScoreSummary, StoreError> {
        if answers.is_empty() {
            return Ok(ScoreSummary::default());
        }

        let ids: IdSet = answers.iter().map(|answer| answer.question_id.clone()).collect();
        let questions = self.questions.questions_by_ids(&ids).await?;
        debug!(
            answers = answers.len(),
            questions = questions.len(),
            "scoring raw answers"
        );
        Ok(self.aggregator.from_answers(answers, &questions))
    }
}

/// Error raised by the recommendation service.
#[derive(Debug, thiserror::Error)]
pub enum RecommendationError {
    #[error(transparent)]
    Input(#[from] InputError),
    #[error(transparent)]
    Store(#[from] StoreError),
}
