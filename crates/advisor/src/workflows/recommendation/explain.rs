use chrono::NaiveDate;
use serde::Serialize;

use super::fetcher::FetchedEntities;
use super::tags::TagSet;
use crate::workflows::catalog::{
    CatalogEntity, Career, College, Course, EntityDomain, EntityId, Exam, Interest, Program,
};
use crate::workflows::human_list;

pub const FALLBACK_EXPLANATION: &str = "Recommended based on your profile";
const MAX_EXPLAINED_TAGS: usize = 2;

/// Uniform, explained recommendation entry.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationItem {
    pub id: EntityId,
    pub kind: EntityDomain,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub explanation: String,
    pub matched_tags: Vec<String>,
    /// Share of the item's own tags found in the request tag set, 0.0–1.0.
    pub score: f64,
    #[serde(flatten)]
    pub details: ItemDetails,
}

/// Domain-specific fields flattened into the item.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ItemDetails {
    #[serde(rename_all = "camelCase")]
    Course {
        #[serde(skip_serializing_if = "Option::is_none")]
        stream_id: Option<EntityId>,
        #[serde(skip_serializing_if = "Option::is_none")]
        level: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        duration_years: Option<f32>,
    },
    #[serde(rename_all = "camelCase")]
    Career {
        #[serde(skip_serializing_if = "Option::is_none")]
        sector: Option<String>,
    },
    #[serde(rename_all = "camelCase")]
    Program {
        #[serde(skip_serializing_if = "Option::is_none")]
        course_id: Option<EntityId>,
        #[serde(skip_serializing_if = "Option::is_none")]
        college_id: Option<EntityId>,
        #[serde(skip_serializing_if = "Option::is_none")]
        duration_years: Option<f32>,
        #[serde(skip_serializing_if = "Option::is_none")]
        mode: Option<String>,
    },
    #[serde(rename_all = "camelCase")]
    Exam {
        #[serde(skip_serializing_if = "Option::is_none")]
        conducting_body: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        registration_start: Option<NaiveDate>,
        #[serde(skip_serializing_if = "Option::is_none")]
        registration_end: Option<NaiveDate>,
        #[serde(skip_serializing_if = "Option::is_none")]
        exam_date: Option<NaiveDate>,
    },
    Interest {},
    #[serde(rename_all = "camelCase")]
    College {
        #[serde(skip_serializing_if = "Option::is_none")]
        location: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        website: Option<String>,
    },
}

/// Catalog records that can be rendered as recommendation items.
pub trait Recommendable: CatalogEntity {
    fn details(&self) -> ItemDetails;
}

impl Recommendable for Course {
    fn details(&self) -> ItemDetails {
        ItemDetails::Course {
            stream_id: self.stream_id.clone(),
            level: self.level.clone(),
            duration_years: self.duration_years,
        }
    }
}

impl Recommendable for Career {
    fn details(&self) -> ItemDetails {
        ItemDetails::Career {
            sector: self.sector.clone(),
        }
    }
}

impl Recommendable for Program {
    fn details(&self) -> ItemDetails {
        ItemDetails::Program {
            course_id: self.course_id.clone(),
            college_id: self.college_id.clone(),
            duration_years: self.duration_years,
            mode: self.mode.clone(),
        }
    }
}

impl Recommendable for Exam {
    fn details(&self) -> ItemDetails {
        ItemDetails::Exam {
            conducting_body: self.conducting_body.clone(),
            registration_start: self.registration_start,
            registration_end: self.registration_end,
            exam_date: self.exam_date,
        }
    }
}

impl Recommendable for Interest {
    fn details(&self) -> ItemDetails {
        ItemDetails::Interest {}
    }
}

impl Recommendable for College {
    fn details(&self) -> ItemDetails {
        ItemDetails::College {
            location: self.location.clone(),
            website: self.website.clone(),
        }
    }
}

/// Response payload. `recommendation_id` is only present once persisted.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationPayload {
    pub top_categories: Vec<String>,
    pub courses: Vec<RecommendationItem>,
    pub careers: Vec<RecommendationItem>,
    pub programs: Vec<RecommendationItem>,
    pub exams: Vec<RecommendationItem>,
    pub interests: Vec<RecommendationItem>,
    pub colleges: Vec<RecommendationItem>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recommendation_id: Option<EntityId>,
}

impl RecommendationPayload {
    pub fn item_count(&self) -> usize {
        self.courses.len()
            + self.careers.len()
            + self.programs.len()
            + self.exams.len()
            + self.interests.len()
            + self.colleges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.item_count() == 0
    }
}

/// Build the explanation sentence. Pure: identical inputs, identical text.
pub fn explain<S: AsRef<str>>(matched_tags: &[S], top_category: Option<&str>) -> String {
    let mut sentences = Vec::with_capacity(2);

    let named = &matched_tags[..matched_tags.len().min(MAX_EXPLAINED_TAGS)];
    if !named.is_empty() {
        sentences.push(format!("Matches your interests in {}", human_list(named)));
    }

    if let Some(category) = top_category.map(str::trim).filter(|value| !value.is_empty()) {
        sentences.push(format!("Aligns with your {category} quiz results"));
    }

    if sentences.is_empty() {
        FALLBACK_EXPLANATION.to_string()
    } else {
        sentences.join(". ")
    }
}

/// Tags shared by the item and the request, in request-tag order.
pub fn matched_tags(item_tags: &[String], tags: &TagSet) -> Vec<String> {
    tags.iter()
        .filter(|tag| item_tags.iter().any(|own| own.trim().eq_ignore_ascii_case(tag)))
        .map(str::to_string)
        .collect()
}

fn relevance(matched: usize, item_tags: usize) -> f64 {
    if item_tags == 0 {
        return 0.0;
    }
    let ratio = (matched as f64 / item_tags as f64).min(1.0);
    (ratio * 100.0).round() / 100.0
}

pub fn to_item<E: Recommendable>(
    entity: &E,
    tags: &TagSet,
    top_category: Option<&str>,
) -> RecommendationItem {
    let matched = matched_tags(entity.tags(), tags);
    RecommendationItem {
        id: entity.id().clone(),
        kind: E::DOMAIN,
        title: entity.title().to_string(),
        description: entity
            .description()
            .map(str::trim)
            .filter(|text| !text.is_empty())
            .map(str::to_string),
        explanation: explain(&matched, top_category),
        score: relevance(matched.len(), entity.tags().len()),
        matched_tags: matched,
        details: entity.details(),
    }
}

fn to_items<E: Recommendable>(
    entities: &[E],
    tags: &TagSet,
    top_category: Option<&str>,
) -> Vec<RecommendationItem> {
    entities
        .iter()
        .map(|entity| to_item(entity, tags, top_category))
        .collect()
}

/// Reshape fetched records into the explained payload, preserving fetch order.
pub fn normalize(
    entities: &FetchedEntities,
    tags: &TagSet,
    top_categories: &[String],
) -> RecommendationPayload {
    let top = top_categories.first().map(String::as_str);
    RecommendationPayload {
        top_categories: top_categories.to_vec(),
        courses: to_items(&entities.courses, tags, top),
        careers: to_items(&entities.careers, tags, top),
        programs: to_items(&entities.programs, tags, top),
        exams: to_items(&entities.exams, tags, top),
        interests: to_items(&entities.interests, tags, top),
        colleges: to_items(&entities.colleges, tags, top),
        recommendation_id: None,
    }
}
