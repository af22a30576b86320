//! Permission checks for list actions.
//!
//! A page never decides on its own whether the user may delete or export.
//! It asks a [`PermissionOracle`] with its module name and a feature, and
//! only offers the actions that come back allowed.
//!
//! ```ignore
//! let perms: PermissionSet = toml::from_str(r#"
//!     Parties = ["view", "delete"]
//!     Expenses = ["view", "export"]
//! "#)?;
//! assert!(perms.has_permission("Parties", "delete"));
//! ```

use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::fmt;

use crate::error::{ListViewError, Result};

pub trait PermissionOracle {
    fn has_permission(&self, module: &str, feature: &str) -> bool;
}

/// Grants everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct AllowAll;

impl PermissionOracle for AllowAll {
    fn has_permission(&self, _module: &str, _feature: &str) -> bool {
        true
    }
}

/// Module to feature grants, e.g. loaded from the user's role.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PermissionSet(HashMap<String, HashSet<String>>);

impl PermissionSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn grant(mut self, module: impl Into<String>, feature: Feature) -> Self {
        self.0
            .entry(module.into())
            .or_default()
            .insert(feature.as_str().to_string());
        self
    }
}

impl PermissionOracle for PermissionSet {
    fn has_permission(&self, module: &str, feature: &str) -> bool {
        self.0
            .get(module)
            .is_some_and(|features| features.contains(feature))
    }
}

impl<F> PermissionOracle for F
where
    F: Fn(&str, &str) -> bool,
{
    fn has_permission(&self, module: &str, feature: &str) -> bool {
        self(module, feature)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Feature {
    View,
    Create,
    Update,
    Delete,
    Export,
}

impl Feature {
    pub fn as_str(&self) -> &'static str {
        match self {
            Feature::View => "view",
            Feature::Create => "create",
            Feature::Update => "update",
            Feature::Delete => "delete",
            Feature::Export => "export",
        }
    }
}

impl fmt::Display for Feature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Actions a list page can offer, each gated by one feature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ListAction {
    Create,
    Edit,
    Delete,
    BulkDelete,
    Export,
}

impl ListAction {
    pub const ALL: [ListAction; 5] = [
        ListAction::Create,
        ListAction::Edit,
        ListAction::Delete,
        ListAction::BulkDelete,
        ListAction::Export,
    ];

    pub fn feature(&self) -> Feature {
        match self {
            ListAction::Create => Feature::Create,
            ListAction::Edit => Feature::Update,
            ListAction::Delete | ListAction::BulkDelete => Feature::Delete,
            ListAction::Export => Feature::Export,
        }
    }
}

/// The actions `oracle` allows on `module`, in display order.
pub fn available_actions<P: PermissionOracle + ?Sized>(oracle: &P, module: &str) -> Vec<ListAction> {
    ListAction::ALL
        .into_iter()
        .filter(|action| oracle.has_permission(module, action.feature().as_str()))
        .collect()
}

/// `Ok(())` when allowed, [`ListViewError::PermissionDenied`] otherwise.
pub fn require<P: PermissionOracle + ?Sized>(oracle: &P, module: &str, feature: Feature) -> Result<()> {
    if oracle.has_permission(module, feature.as_str()) {
        Ok(())
    } else {
        Err(ListViewError::PermissionDenied {
            module: module.to_string(),
            feature: feature.to_string(),
        })
    }
}
