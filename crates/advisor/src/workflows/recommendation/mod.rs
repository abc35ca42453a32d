//! Quiz-to-recommendation pipeline: category scoring, tag mapping, question
//! linking, multi-domain fetching, explanation, and best-effort persistence.

pub mod explain;
pub mod fetcher;
pub mod input;
pub mod linking;
pub mod persistence;
pub mod router;
pub mod scoring;
pub mod service;
pub mod tags;

#[cfg(test)]
mod tests;

pub use explain::{ItemDetails, RecommendationItem, RecommendationPayload};
pub use fetcher::{EntityFetcher, FetchedEntities};
pub use input::{InputError, RecommendationRequest, ScorePair, ScoreSource};
pub use linking::{LinkedIds, LinkingResolver};
pub use persistence::RecommendationRecorder;
pub use crate::workflows::catalog::{
    CourseScore, ProgramScore, Recommendation, RecommendationDraft, RecommendationStore,
};
pub use router::recommendation_router;
pub use scoring::{CategoryScore, CategoryScoreAggregator, ScoreSummary};
pub use service::{RecommendationError, RecommendationService, RecommendationStores};
pub use tags::{map_categories, TagSet};
