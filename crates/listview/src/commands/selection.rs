//! Selection over entity identifiers.
//!
//! Every operation returns a new set and leaves its input untouched, so a
//! caller can compare old and new state by value to decide whether to redraw.
//! Membership is independent of what is on screen: a selected row stays
//! selected after it is filtered or paged out of view.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::model::EntityId;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SelectionSet(BTreeSet<EntityId>);

impl SelectionSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, id: &EntityId) -> bool {
        self.0.contains(id)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &EntityId> {
        self.0.iter()
    }

    pub fn to_vec(&self) -> Vec<EntityId> {
        self.0.iter().cloned().collect()
    }

    /// Flip membership of `id`.
    pub fn toggle(&self, id: &EntityId) -> Self {
        let mut next = self.0.clone();
        if !next.remove(id) {
            next.insert(id.clone());
        }
        Self(next)
    }

    /// Select exactly `visible`, or clear everything if all of it is already selected.
    ///
    /// The clearing branch drops selections outside `visible` too.
    pub fn toggle_all_visible(&self, visible: &[EntityId]) -> Self {
        if self.is_all_visible_selected(visible) {
            Self::new()
        } else {
            visible.iter().cloned().collect()
        }
    }

    /// True iff `visible` is non-empty and wholly selected.
    pub fn is_all_visible_selected(&self, visible: &[EntityId]) -> bool {
        !visible.is_empty() && visible.iter().all(|id| self.0.contains(id))
    }

    /// Drop `ids`, keeping everything else.
    pub fn remove_all(&self, ids: &[EntityId]) -> Self {
        Self(
            self.0
                .iter()
                .filter(|id| !ids.contains(id))
                .cloned()
                .collect(),
        )
    }
}

impl FromIterator<EntityId> for SelectionSet {
    fn from_iter<I: IntoIterator<Item = EntityId>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
