//! # Domain Model
//!
//! The engine is structurally typed: an [`Entity`] is any JSON record the
//! backend returns, and the page configuration names which fields matter.
//! No shared base shape is assumed across entity kinds.
//!
//! ## Field Paths
//!
//! Fields are addressed by dotted paths. `createdBy.name` reads the `name`
//! property of the `createdBy` object; a numeric segment indexes into an array
//! (`contacts.0.phone`). A path that runs into a missing key, a scalar, or a
//! JSON `null` resolves to `None`, which every consumer treats as "empty".
//!
//! ## Identity
//!
//! Backends disagree on the identifier key: some send `id`, Mongo-backed ones
//! send `_id`. [`Entity::id_with`] honours an explicit page override and
//! otherwise tries `id` then `_id`. Numeric identifiers are stringified so
//! selection works uniformly over [`EntityId`].

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Keys tried, in order, when a page does not name its identifier field.
pub const DEFAULT_ID_FIELDS: [&str; 2] = ["id", "_id"];

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityId(String);

impl EntityId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
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
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for EntityId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// One row of a list view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Entity(Value);

impl Entity {
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }

    /// Resolves a dotted path. `null` values resolve to `None`.
    pub fn get(&self, path: &str) -> Option<&Value> {
        path.split('.')
            .try_fold(&self.0, |value, segment| match value {
                Value::Object(map) => map.get(segment),
                Value::Array(items) => segment.parse::<usize>().ok().and_then(|i| items.get(i)),
                _ => None,
            })
            .filter(|value| !value.is_null())
    }

    /// Identifier using the default `id` / `_id` lookup.
    pub fn id(&self) -> Option<EntityId> {
        self.id_with(None)
    }

    /// Identifier from `id_field` when given, otherwise from the default keys.
    pub fn id_with(&self, id_field: Option<&str>) -> Option<EntityId> {
        match id_field {
            Some(field) => self.get(field).and_then(id_from_value),
            None => DEFAULT_ID_FIELDS
                .iter()
                .find_map(|field| self.get(field).and_then(id_from_value)),
        }
    }

    /// Converts a fetched payload into entities.
    ///
    /// Anything other than an array (including `null`) becomes an empty list.
    pub fn list_from_value(value: Value) -> Vec<Entity> {
        match value {
            Value::Array(items) => items.into_iter().map(Entity::new).collect(),
            _ => Vec::new(),
        }
    }
}

impl From<Value> for Entity {
    fn from(value: Value) -> Self {
        Self(value)
    }
}

fn id_from_value(value: &Value) -> Option<EntityId> {
    match value {
        Value::String(s) if !s.is_empty() => Some(EntityId::new(s.clone())),
        Value::Number(n) => Some(EntityId::new(n.to_string())),
        _ => None,
    }
}

/// Identity of a fetched collection, e.g. `["parties", "active"]`.
///
/// The first segment names the entity type; the rest are opaque parameters
/// the fetch layer uses to key its cache.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QueryKey(Vec<String>);

impl QueryKey {
    pub fn new(entity_type: impl Into<String>) -> Self {
        Self(vec![entity_type.into()])
    }

    pub fn with(mut self, param: impl Into<String>) -> Self {
        self.0.push(param.into());
        self
    }

    pub fn entity_type(&self) -> &str {
        &self.0[0]
    }

    pub fn params(&self) -> &[String] {
        &self.0[1..]
    }
}

impl fmt::Display for QueryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]", self.0.join(", "))
    }
}
