use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::ids::EntityId;

fn active_by_default() -> bool {
    true
}

/// Reference-data domains the recommendation pipeline draws from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityDomain {
    Course,
    Career,
    Program,
    Exam,
    Interest,
    College,
}

/// Relationship paths a catalog record can be matched through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LinkField {
    /// The record's own identifier.
    Id,
    Course,
    Career,
    Interest,
    Program,
    Stream,
}

/// Common read surface over every catalog record type.
pub trait CatalogEntity: Clone + Send + Sync {
    const DOMAIN: EntityDomain;

    fn id(&self) -> &EntityId;
    fn title(&self) -> &str;
    fn description(&self) -> Option<&str>;
    fn tags(&self) -> &[String];
    fn is_active(&self) -> bool;

    /// Identifiers this record references through `field`; empty when the
    /// domain has no such relationship.
    fn links(&self, field: LinkField) -> &[EntityId];
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    #[serde(alias = "_id")]
    pub id: EntityId,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub stream_id: Option<EntityId>,
    #[serde(default)]
    pub level: Option<String>,
    #[serde(default)]
    pub duration_years: Option<f32>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default = "active_by_default")]
    pub is_active: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Career {
    #[serde(alias = "_id")]
    pub id: EntityId,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub sector: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default = "active_by_default")]
    pub is_active: bool,
}

/// A course as delivered by a specific college.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Program {
    #[serde(alias = "_id")]
    pub id: EntityId,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub course_id: Option<EntityId>,
    #[serde(default)]
    pub college_id: Option<EntityId>,
    #[serde(default)]
    pub duration_years: Option<f32>,
    #[serde(default)]
    pub mode: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default = "active_by_default")]
    pub is_active: bool,
}

/// Entrance or qualifying exam reachable through courses, careers, or interests.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Exam {
    #[serde(alias = "_id")]
    pub id: EntityId,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub conducting_body: Option<String>,
    #[serde(default)]
    pub course_ids: Vec<EntityId>,
    #[serde(default)]
    pub career_ids: Vec<EntityId>,
    #[serde(default, alias = "interestTags")]
    pub interest_ids: Vec<EntityId>,
    #[serde(default)]
    pub registration_start: Option<NaiveDate>,
    #[serde(default)]
    pub registration_end: Option<NaiveDate>,
    #[serde(default)]
    pub exam_date: Option<NaiveDate>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default = "active_by_default")]
    pub is_active: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Interest {
    #[serde(alias = "_id")]
    pub id: EntityId,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default = "active_by_default")]
    pub is_active: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct College {
    #[serde(alias = "_id")]
    pub id: EntityId,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub website: Option<String>,
    #[serde(default)]
    pub program_ids: Vec<EntityId>,
    #[serde(default)]
    pub course_ids: Vec<EntityId>,
    #[serde(default)]
    pub stream_ids: Vec<EntityId>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default = "active_by_default")]
    pub is_active: bool,
}

impl CatalogEntity for Course {
    const DOMAIN: EntityDomain = EntityDomain::Course;

    fn id(&self) -> &EntityId {
        &self.id
    }

    fn title(&self) -> &str {
        &self.name
    }

    fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    fn tags(&self) -> &[String] {
        &self.tags
    }

    fn is_active(&self) -> bool {
        self.is_active
    }

    fn links(&self, field: LinkField) -> &[EntityId] {
        match field {
            LinkField::Id => std::slice::from_ref(&self.id),
            LinkField::Stream => self.stream_id.as_slice(),
            _ => &[],
        }
    }
}

impl CatalogEntity for Career {
    const DOMAIN: EntityDomain = EntityDomain::Career;

    fn id(&self) -> &EntityId {
        &self.id
    }

    fn title(&self) -> &str {
        &self.title
    }

    fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    fn tags(&self) -> &[String] {
        &self.tags
    }

    fn is_active(&self) -> bool {
        self.is_active
    }

    fn links(&self, field: LinkField) -> &[EntityId] {
        match field {
            LinkField::Id => std::slice::from_ref(&self.id),
            _ => &[],
        }
    }
}

impl CatalogEntity for Program {
    const DOMAIN: EntityDomain = EntityDomain::Program;

    fn id(&self) -> &EntityId {
        &self.id
    }

    fn title(&self) -> &str {
        &self.name
    }

    fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    fn tags(&self) -> &[String] {
        &self.tags
    }

    fn is_active(&self) -> bool {
        self.is_active
    }

    fn links(&self, field: LinkField) -> &[EntityId] {
        match field {
            LinkField::Id => std::slice::from_ref(&self.id),
            LinkField::Course => self.course_id.as_slice(),
            _ => &[],
        }
    }
}

impl CatalogEntity for Exam {
    const DOMAIN: EntityDomain = EntityDomain::Exam;

    fn id(&self) -> &EntityId {
        &self.id
    }

    fn title(&self) -> &str {
        &self.name
    }

    fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    fn tags(&self) -> &[String] {
        &self.tags
    }

    fn is_active(&self) -> bool {
        self.is_active
    }

    fn links(&self, field: LinkField) -> &[EntityId] {
        match field {
            LinkField::Id => std::slice::from_ref(&self.id),
            LinkField::Course => &self.course_ids,
            LinkField::Career => &self.career_ids,
            LinkField::Interest => &self.interest_ids,
            _ => &[],
        }
    }
}

impl CatalogEntity for Interest {
    const DOMAIN: EntityDomain = EntityDomain::Interest;

    fn id(&self) -> &EntityId {
        &self.id
    }

    fn title(&self) -> &str {
        &self.name
    }

    fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    fn tags(&self) -> &[String] {
        &self.tags
    }

    fn is_active(&self) -> bool {
        self.is_active
    }

    fn links(&self, field: LinkField) -> &[EntityId] {
        match field {
            LinkField::Id => std::slice::from_ref(&self.id),
            _ => &[],
        }
    }
}

impl CatalogEntity for College {
    const DOMAIN: EntityDomain = EntityDomain::College;

    fn id(&self) -> &EntityId {
        &self.id
    }

    fn title(&self) -> &str {
        &self.name
    }

    fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    fn tags(&self) -> &[String] {
        &self.tags
    }

    fn is_active(&self) -> bool {
        self.is_active
    }

    fn links(&self, field: LinkField) -> &[EntityId] {
        match field {
            LinkField::Id => std::slice::from_ref(&self.id),
            LinkField::Program => &self.program_ids,
            LinkField::Course => &self.course_ids,
            LinkField::Stream => &self.stream_ids,
            _ => &[],
        }
    }
}
