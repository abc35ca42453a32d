//! Documents, filters, and store interfaces shared by the advisor workflows.

pub mod entities;
mod ids;
pub mod memory;
pub mod query;
pub mod quiz;
pub mod record;
pub mod store;

pub use entities::{
    CatalogEntity, Career, College, Course, EntityDomain, Exam, Interest, LinkField, Program,
};
pub use ids::{EntityId, IdSet};
pub use memory::{CatalogSnapshot, MemoryCatalog};
pub use query::{EntityQuery, QuestionQuery};
pub use quiz::{QuestionOption, QuizQuestion, QuizResult, StreamRecommendation};
pub use record::{CourseScore, ProgramScore, Recommendation, RecommendationDraft};
pub use store::{
    CatalogStore, QuestionStore, QuizResultStore, RecommendationStore, StoreError,
};
