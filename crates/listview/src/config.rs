//! # Configuration
//!
//! Two layers of configuration drive a list view:
//!
//! 1. [`ListViewConfig`]: application-wide settings loaded by [`confique`] from
//!    compiled defaults, an optional TOML file, and `LISTVIEW_*` environment
//!    variables (environment wins over file, file wins over defaults).
//! 2. [`PageConfig`]: one per list page, parsed from TOML. It names the
//!    searchable fields, the facets, and may override the page size and
//!    select-all scope.
//!
//! ## Available Settings
//!
//! | Key | Default | Env | Description |
//! |-----|---------|-----|-------------|
//! | `items_per_page` | `10` | `LISTVIEW_ITEMS_PER_PAGE` | Rows per page |
//! | `select_scope` | `page` | | What "select all" covers: `page` or `filtered` |
//! | `utc_offset_minutes` | `0` | `LISTVIEW_UTC_OFFSET_MINUTES` | Local offset for date facets |
//! | `date_format` | `%Y-%m-%d` | `LISTVIEW_DATE_FORMAT` | Date format for exports |
//!
//! ## Page Config Example
//!
//! ```toml
//! entity = "parties"
//! module = "Parties"
//! search_fields = ["name", "ownerName", "createdBy.name"]
//! items_per_page = 12
//!
//! [[facets]]
//! key = "category"
//! kind = "nested"
//! path = "interest"
//! field = "category"
//!
//! [sort]
//! field = "name"
//! ```

use chrono::{FixedOffset, Offset, Utc};
use confique::Config;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

use crate::commands::export::ExportColumn;
use crate::commands::sort::SortSpec;
use crate::error::{ListViewError, Result};
use crate::facets::FacetSpec;

/// What "select all" operates on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SelectScope {
    /// Only the rows on the current page.
    #[default]
    Page,
    /// Every row that passes search and facet filters.
    Filtered,
}

/// Application-wide list settings.
#[derive(Config, Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ListViewConfig {
    /// Rows per page when a page does not override it.
    #[config(default = 10, env = "LISTVIEW_ITEMS_PER_PAGE")]
    pub items_per_page: usize,

    /// Scope of "select all" when a page does not override it.
    #[config(default = "page")]
    pub select_scope: SelectScope,

    /// Offset from UTC, in minutes, used as local time for date facets.
    #[config(default = 0, env = "LISTVIEW_UTC_OFFSET_MINUTES")]
    pub utc_offset_minutes: i32,

    /// chrono format string for date columns in exports.
    #[config(default = "%Y-%m-%d", env = "LISTVIEW_DATE_FORMAT")]
    pub date_format: String,
}

impl Default for ListViewConfig {
    fn default() -> Self {
        Self {
            items_per_page: 10,
            select_scope: SelectScope::Page,
            utc_offset_minutes: 0,
            date_format: "%Y-%m-%d".to_string(),
        }
    }
}

impl ListViewConfig {
    /// Load settings from the environment and, if given, a TOML file.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut builder = Self::builder().env();
        if let Some(path) = path {
            builder = builder.file(path);
        }
        let config = builder.load()?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.items_per_page == 0 {
            return Err(ListViewError::Config(
                "items_per_page must be positive".into(),
            ));
        }
        if FixedOffset::east_opt(self.utc_offset_minutes.saturating_mul(60)).is_none() {
            return Err(ListViewError::Config(format!(
                "utc_offset_minutes out of range: {}",
                self.utc_offset_minutes
            )));
        }
        Ok(())
    }

    /// The configured local offset; UTC if out of range.
    pub fn offset(&self) -> FixedOffset {
        FixedOffset::east_opt(self.utc_offset_minutes.saturating_mul(60))
            .unwrap_or_else(|| Utc.fix())
    }
}

/// Effective settings for one page: app settings with page overrides applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListSettings {
    pub items_per_page: usize,
    pub select_scope: SelectScope,
    pub offset: FixedOffset,
    pub date_format: String,
}

impl Default for ListSettings {
    fn default() -> Self {
        PageConfig::new("items").settings(&ListViewConfig::default())
    }
}

fn default_serial_numbers() -> bool {
    true
}

/// Configuration of a single list page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageConfig {
    /// Entity type, also the first segment of the page's query key.
    pub entity: String,

    /// Permission module gating this page's actions. Defaults to `entity`.
    #[serde(default)]
    pub module: Option<String>,

    /// Identifier field. When absent, `id` then `_id` are tried.
    #[serde(default)]
    pub id_field: Option<String>,

    /// Dotted paths searched by the search box.
    #[serde(default)]
    pub search_fields: Vec<String>,

    #[serde(default)]
    pub facets: Vec<FacetSpec>,

    #[serde(default)]
    pub items_per_page: Option<usize>,

    #[serde(default)]
    pub select_scope: Option<SelectScope>,

    /// Default sort applied when the page opens.
    #[serde(default)]
    pub sort: Option<SortSpec>,

    /// Export columns, in order.
    #[serde(default)]
    pub columns: Vec<ExportColumn>,

    #[serde(default)]
    pub export_title: Option<String>,

    /// Prepend an `S.No.` column to exports.
    #[serde(default = "default_serial_numbers")]
    pub serial_numbers: bool,
}

impl PageConfig {
    pub fn new(entity: impl Into<String>) -> Self {
        Self {
            entity: entity.into(),
            module: None,
            id_field: None,
            search_fields: Vec::new(),
            facets: Vec::new(),
            items_per_page: None,
            select_scope: None,
            sort: None,
            columns: Vec::new(),
            export_title: None,
            serial_numbers: true,
        }
    }

    pub fn with_search_fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.search_fields = fields.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_facet(mut self, facet: FacetSpec) -> Self {
        self.facets.push(facet);
        self
    }

    pub fn with_items_per_page(mut self, items_per_page: usize) -> Self {
        self.items_per_page = Some(items_per_page);
        self
    }

    pub fn with_select_scope(mut self, scope: SelectScope) -> Self {
        self.select_scope = Some(scope);
        self
    }

    pub fn with_module(mut self, module: impl Into<String>) -> Self {
        self.module = Some(module.into());
        self
    }

    pub fn with_sort(mut self, sort: SortSpec) -> Self {
        self.sort = Some(sort);
        self
    }

    pub fn with_column(mut self, column: ExportColumn) -> Self {
        self.columns.push(column);
        self
    }

    pub fn from_toml_str(s: &str) -> Result<Self> {
        let config: PageConfig = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    pub fn module(&self) -> &str {
        self.module.as_deref().unwrap_or(&self.entity)
    }

    pub fn settings(&self, base: &ListViewConfig) -> ListSettings {
        ListSettings {
            items_per_page: self.items_per_page.unwrap_or(base.items_per_page),
            select_scope: self.select_scope.unwrap_or(base.select_scope),
            offset: base.offset(),
            date_format: base.date_format.clone(),
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.entity.trim().is_empty() {
            return Err(ListViewError::Config("entity must not be empty".into()));
        }
        if self.items_per_page == Some(0) {
            return Err(ListViewError::Config(format!(
                "page '{}': items_per_page must be positive",
                self.entity
            )));
        }
        if self.search_fields.iter().any(|f| f.trim().is_empty()) {
            return Err(ListViewError::Config(format!(
                "page '{}': search fields must not be empty",
                self.entity
            )));
        }

        let mut seen = HashSet::new();
        for facet in &self.facets {
            facet.validate()?;
            if !seen.insert(facet.key.as_str()) {
                return Err(ListViewError::Config(format!(
                    "page '{}': duplicate facet '{}'",
                    self.entity, facet.key
                )));
            }
        }
        Ok(())
    }
}
