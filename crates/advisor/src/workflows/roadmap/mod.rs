//! Personalized guidance milestones derived from a student's quiz results.

pub mod blueprint;
pub mod domain;
pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use blueprint::{RoadmapBlueprint, StepTemplate};
pub use domain::{GeneratedFrom, Roadmap, RoadmapRequest, RoadmapStep, UserProfileSummary};
pub use router::roadmap_router;
pub use service::{RoadmapError, RoadmapService};
