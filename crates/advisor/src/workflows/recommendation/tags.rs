//! Static category → tag vocabulary.
//!
//! Extending coverage for a new quiz category is a data change: add a row to
//! `CATEGORY_TAGS`. Categories without a row contribute no tags.

use std::collections::HashMap;
use std::sync::OnceLock;

use serde::Serialize;

const CATEGORY_TAGS: &[(&str, &[&str])] = &[
    ("STEM", &["technology", "mathematics", "science", "engineering"]),
    ("Science", &["science", "physics", "chemistry", "biology"]),
    ("Technology", &["technology", "computer science", "programming", "data"]),
    ("Engineering", &["engineering", "technology", "mathematics", "design"]),
    ("Mathematics", &["mathematics", "statistics", "data"]),
    ("Arts", &["arts", "design", "fine arts", "literature"]),
    ("Design", &["design", "arts", "architecture", "fashion"]),
    ("Humanities", &["history", "literature", "philosophy", "languages"]),
    ("Social Sciences", &["psychology", "sociology", "economics", "political science"]),
    ("Commerce", &["business", "finance", "accounting", "economics"]),
    ("Business", &["business", "management", "entrepreneurship", "marketing"]),
    ("Law", &["law", "legal", "justice", "policy"]),
    ("Medicine", &["medicine", "healthcare", "biology", "nursing"]),
    ("Healthcare", &["healthcare", "medicine", "nursing", "pharmacy"]),
    ("Media", &["media", "journalism", "communication", "film"]),
    ("Education", &["education", "teaching", "psychology"]),
    ("Agriculture", &["agriculture", "environment", "biology"]),
    ("Sports", &["sports", "fitness", "physical education"]),
    ("Defence", &["defence", "security", "leadership"]),
    ("Hospitality", &["hospitality", "tourism", "culinary"]),
    // Aptitude sections.
    ("Logical", &["mathematics", "programming", "data"]),
    ("Numerical", &["mathematics", "statistics", "finance", "accounting"]),
    ("Verbal", &["languages", "literature", "communication", "law"]),
    ("Spatial", &["design", "architecture", "engineering"]),
];

static TAG_INDEX: OnceLock<HashMap<String, &'static [&'static str]>> = OnceLock::new();

fn tag_index() -> &'static HashMap<String, &'static [&'static str]> {
    TAG_INDEX.get_or_init(|| {
        CATEGORY_TAGS
            .iter()
            .map(|(category, tags)| (category.to_lowercase(), *tags))
            .collect()
    })
}

/// Tags for one category, matched case-insensitively on the trimmed label.
pub fn tags_for_category(category: &str) -> Option<&'static [&'static str]> {
    tag_index()
        .get(&category.trim().to_lowercase())
        .copied()
}

/// Union of the mapped tags for every category, in category order.
pub fn map_categories<S: AsRef<str>>(categories: &[S]) -> TagSet {
    categories
        .iter()
        .filter_map(|category| tags_for_category(category.as_ref()))
        .flat_map(|tags| tags.iter().copied())
        .collect()
}

/// Lowercase keyword set that remembers insertion order, so tags from the
/// strongest category come first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct TagSet {
    tags: Vec<String>,
}

impl TagSet {
    pub fn insert(&mut self, tag: &str) -> bool {
        let tag = tag.trim().to_lowercase();
        if tag.is_empty() || self.tags.contains(&tag) {
            return false;
        }
        self.tags.push(tag);
        true
    }

    pub fn contains(&self, tag: &str) -> bool {
        let tag = tag.trim();
        self.tags
            .iter()
            .any(|existing| existing.eq_ignore_ascii_case(tag))
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.tags.iter().map(String::as_str)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.tags
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    pub fn len(&self) -> usize {
        self.tags.len()
    }
}

impl<'a> FromIterator<&'a str> for TagSet {
    fn from_iter<I: IntoIterator<Item = &'a str>>(iter: I) -> Self {
        let mut set = TagSet::default();
        for tag in iter {
            set.insert(tag);
        }
        set
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stem_and_arts_union_keeps_category_order() {
        let tags = map_categories(&["STEM", "Arts"]);
        let collected: Vec<&str> = tags.iter().collect();
        assert_eq!(
            collected,
            vec![
                "technology",
                "mathematics",
                "science",
                "engineering",
                "arts",
                "design",
                "fine arts",
                "literature"
            ]
        );
    }

    #[test]
    fn overlapping_categories_do_not_duplicate_tags() {
        let tags = map_categories(&["STEM", "Engineering"]);
        assert_eq!(tags.iter().filter(|tag| *tag == "engineering").count(), 1);
        assert!(tags.contains("design"));
    }

    #[test]
    fn lookup_ignores_case_and_whitespace() {
        assert_eq!(tags_for_category(" stem "), tags_for_category("STEM"));
        assert!(tags_for_category("law").is_some());
    }

    #[test]
    fn unknown_categories_contribute_nothing() {
        assert!(map_categories(&["Philately"]).is_empty());
        let mixed = map_categories(&["Philately", "Law"]);
        assert_eq!(mixed.len(), 4);
    }

    #[test]
    fn mapping_is_deterministic() {
        let categories = ["Commerce", "Media", "STEM"];
        assert_eq!(map_categories(&categories), map_categories(&categories));
    }

    #[test]
    fn table_keys_are_unique() {
        assert_eq!(tag_index().len(), CATEGORY_TAGS.len());
    }
}
