//! Facet specifications.
//!
//! A [`FacetSpec`] tells the engine where a facet's value lives on an entity
//! and how to compare it. Pages declare them in their TOML config:
//!
//! ```toml
//! [[facets]]
//! key = "category"
//! kind = "nested"
//! path = "interest"
//! field = "category"
//! ```

use crate::error::{ListViewError, Result};
use serde::{Deserialize, Serialize};

/// How a facet's value is read and compared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FacetKind {
    /// A string-ish field. Objects compare by their `name`, arrays by any element.
    #[default]
    Scalar,

    /// An array of objects; `field` names the sub-field inspected on each element.
    ///
    /// If the sub-field is itself an array (e.g. `interest[].brands[]`), any
    /// member may match.
    Nested,

    /// Calendar-day equality in the configured local offset.
    Date,

    /// English long month name of a date field (`"January"` ... `"December"`).
    Month,
}

/// Specification for a single facet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FacetSpec {
    /// The key used in filter criteria (e.g. "status", "category").
    pub key: String,

    /// Dotted path to the entity field. Defaults to `key`.
    #[serde(default)]
    pub path: Option<String>,

    #[serde(default)]
    pub kind: FacetKind,

    /// Sub-field inspected on each array element (nested facets only).
    #[serde(default)]
    pub field: Option<String>,

    /// Human-readable name for filter panels.
    #[serde(default)]
    pub label: Option<String>,
}

impl FacetSpec {
    fn new(key: impl Into<String>, kind: FacetKind) -> Self {
        Self {
            key: key.into(),
            path: None,
            kind,
            field: None,
            label: None,
        }
    }

    pub fn scalar(key: impl Into<String>) -> Self {
        Self::new(key, FacetKind::Scalar)
    }

    pub fn nested(
        key: impl Into<String>,
        path: impl Into<String>,
        field: impl Into<String>,
    ) -> Self {
        let mut spec = Self::new(key, FacetKind::Nested).at(path);
        spec.field = Some(field.into());
        spec
    }

    pub fn date(key: impl Into<String>) -> Self {
        Self::new(key, FacetKind::Date)
    }

    pub fn month(key: impl Into<String>, path: impl Into<String>) -> Self {
        Self::new(key, FacetKind::Month).at(path)
    }

    /// Read the value from `path` instead of the key.
    pub fn at(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    pub fn labelled(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// The entity path this facet reads.
    pub fn field_path(&self) -> &str {
        self.path.as_deref().unwrap_or(&self.key)
    }

    pub fn display_label(&self) -> &str {
        self.label.as_deref().unwrap_or(&self.key)
    }

    pub fn validate(&self) -> Result<()> {
        if self.key.trim().is_empty() {
            return Err(ListViewError::Config("facet key must not be empty".into()));
        }
        if self.kind == FacetKind::Nested && self.field.is_none() {
            return Err(ListViewError::Config(format!(
                "nested facet '{}' must name a field",
                self.key
            )));
        }
        Ok(())
    }
}

/// Look up a facet spec by key.
pub fn find_spec<'a>(specs: &'a [FacetSpec], key: &str) -> Option<&'a FacetSpec> {
    specs.iter().find(|spec| spec.key == key)
}
