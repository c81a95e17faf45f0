//! Schema document types (the subset of LinkML the scaffolder inspects)
//!
//! Only the fields needed for import merging and inheritance are typed.
//! Everything else is carried through untouched in `extra`, so exporting a
//! schema writes back everything that was read.

use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// A loaded schema document
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SchemaDefinition {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(default)]
    pub name: String,

    /// Other schemas merged into this one (paths, URLs or `linkml:` names)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub imports: Vec<String>,

    #[serde(
        default,
        deserialize_with = "nullable_map",
        skip_serializing_if = "IndexMap::is_empty"
    )]
    pub classes: IndexMap<String, ClassDefinition>,

    /// Schema-level slot definitions, referenced by name from classes
    #[serde(
        default,
        deserialize_with = "nullable_map",
        skip_serializing_if = "IndexMap::is_empty"
    )]
    pub slots: IndexMap<String, SlotDefinition>,

    /// prefixes, types, enums, and anything else
    #[serde(flatten)]
    pub extra: IndexMap<String, Value>,
}

/// A class definition
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClassDefinition {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_a: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub mixins: Vec<String>,

    /// Names of schema-level slots used by this class
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub slots: Vec<String>,

    /// Inline attributes. Absent until declared or flattened.
    #[serde(
        default,
        deserialize_with = "nullable_map_opt",
        skip_serializing_if = "Option::is_none"
    )]
    pub attributes: Option<IndexMap<String, SlotDefinition>>,

    /// Per-class refinements of inherited slots
    #[serde(
        default,
        deserialize_with = "nullable_map",
        skip_serializing_if = "IndexMap::is_empty"
    )]
    pub slot_usage: IndexMap<String, SlotDefinition>,

    #[serde(flatten)]
    pub extra: IndexMap<String, Value>,
}

/// A slot or attribute definition
///
/// Opaque apart from its name: every other property is kept as JSON and
/// overlaid key by key when inherited definitions are combined.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SlotDefinition {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(flatten)]
    pub properties: IndexMap<String, Value>,
}

impl SlotDefinition {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            properties: IndexMap::new(),
        }
    }

    /// Overlay `other` on top of `self`: properties set in `other` win
    pub fn overlay(&mut self, other: &SlotDefinition) {
        if other.name.is_some() {
            self.name = other.name.clone();
        }
        for (key, value) in &other.properties {
            self.properties.insert(key.clone(), value.clone());
        }
    }
}

/// `attributes: {x: }` in YAML leaves a null where a definition is expected;
/// treat those as empty definitions.
fn nullable_map<'de, D, T>(deserializer: D) -> Result<IndexMap<String, T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    let raw: Option<IndexMap<String, Option<T>>> = Option::deserialize(deserializer)?;
    Ok(raw
        .unwrap_or_default()
        .into_iter()
        .map(|(key, value)| (key, value.unwrap_or_default()))
        .collect())
}

fn nullable_map_opt<'de, D, T>(deserializer: D) -> Result<Option<IndexMap<String, T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    let raw: Option<IndexMap<String, Option<T>>> = Option::deserialize(deserializer)?;
    Ok(raw.map(|map| {
        map.into_iter()
            .map(|(key, value)| (key, value.unwrap_or_default()))
            .collect()
    }))
}
