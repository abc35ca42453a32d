use serde::{de, Deserialize, Deserializer, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Document identifier normalized to its string form.
///
/// Stored references arrive either as plain strings or as native object ids
/// (`{"$oid": "..."}`); both deserialize into the same value so id sets built
/// from mixed sources collapse correctly.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct EntityId(String);

/// Deduplicated, ordered set of identifiers.
pub type IdSet = BTreeSet<EntityId>;

impl EntityId {
    pub fn new(value: impl AsRef<str>) -> Self {
        Self(value.as_ref().trim().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for EntityId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for EntityId {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawEntityId {
    Text(String),
    Object {
        #[serde(rename = "$oid")]
        oid: String,
    },
}

impl<'de> Deserialize<'de> for EntityId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = match RawEntityId::deserialize(deserializer)? {
            RawEntityId::Text(value) => value,
            RawEntityId::Object { oid } => oid,
        };

        let id = EntityId::new(raw);
        if id.0.is_empty() {
            return Err(de::Error::custom("identifier must not be empty"));
        }
        Ok(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn string_and_object_ids_collapse_into_one_set() {
        let ids: Vec<EntityId> = serde_json::from_value(json!([
            "65f0c0ffee",
            { "$oid": "65f0c0ffee" },
            " 65f0c0ffee ",
            { "$oid": "65f0beef" }
        ]))
        .expect("ids parse");

        let set: IdSet = ids.into_iter().collect();
        assert_eq!(set.len(), 2);
        assert!(set.contains(&EntityId::new("65f0c0ffee")));
    }

    #[test]
    fn empty_ids_are_rejected() {
        let parsed = serde_json::from_value::<EntityId>(json!("   "));
        assert!(parsed.is_err());
    }

    #[test]
    fn serializes_as_plain_string() {
        let value = serde_json::to_value(EntityId::new("course-1")).expect("serialize");
        assert_eq!(value, json!("course-1"));
    }
}
