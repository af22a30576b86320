//! # List View State
//!
//! All user-driven state of a list page lives in one [`ListViewState`] value
//! and changes only through [`reduce`]. A UI layer, a test, or the CLI can
//! drive the same transitions without any rendering framework:
//!
//! ```ignore
//! let state = reduce(state, Action::SetSearch("party".into()));
//! let state = reduce(state, Action::GoToPage(2));
//! ```
//!
//! Changing the search term, a facet, or the sort sends the user back to the
//! first page. Selection is never touched by filtering.

use serde::Serialize;

use crate::commands::selection::SelectionSet;
use crate::commands::sort::SortSpec;
use crate::facets::FacetCriteria;
use crate::model::EntityId;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListViewState {
    pub search: String,
    pub criteria: FacetCriteria,
    pub sort: Option<SortSpec>,
    /// 1-indexed.
    pub current_page: usize,
    pub selected: SelectionSet,
}

impl Default for ListViewState {
    fn default() -> Self {
        Self::new(None)
    }
}

impl ListViewState {
    pub fn new(sort: Option<SortSpec>) -> Self {
        Self {
            search: String::new(),
            criteria: FacetCriteria::new(),
            sort,
            current_page: 1,
            selected: SelectionSet::new(),
        }
    }

    /// True when neither search nor any facet constrains the list.
    pub fn is_unfiltered(&self) -> bool {
        self.search.trim().is_empty() && self.criteria.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    SetSearch(String),
    SetFacet { key: String, values: Vec<String> },
    ToggleFacetValue { key: String, value: String },
    ClearFacet(String),
    /// Clears search, facets, page and selection. Sort is kept.
    ResetFilters,
    SetSort(Option<SortSpec>),
    GoToPage(usize),
    ToggleSelect(EntityId),
    /// Carries the ids currently visible for select-all purposes.
    ToggleSelectAll(Vec<EntityId>),
    ClearSelection,
    Deselect(Vec<EntityId>),
}

pub fn reduce(state: ListViewState, action: Action) -> ListViewState {
    match action {
        Action::SetSearch(search) => ListViewState {
            search,
            current_page: 1,
            ..state
        },
        Action::SetFacet { key, values } => {
            let mut criteria = state.criteria;
            criteria.set(key, values);
            ListViewState {
                criteria,
                current_page: 1,
                ..state
            }
        }
        Action::ToggleFacetValue { key, value } => {
            let mut criteria = state.criteria;
            criteria.toggle(key, value);
            ListViewState {
                criteria,
                current_page: 1,
                ..state
            }
        }
        Action::ClearFacet(key) => {
            let mut criteria = state.criteria;
            criteria.clear(&key);
            ListViewState {
                criteria,
                current_page: 1,
                ..state
            }
        }
        Action::ResetFilters => ListViewState::new(state.sort),
        Action::SetSort(sort) => ListViewState {
            sort,
            current_page: 1,
            ..state
        },
        Action::GoToPage(page) => ListViewState {
            current_page: page.max(1),
            ..state
        },
        Action::ToggleSelect(id) => ListViewState {
            selected: state.selected.toggle(&id),
            ..state
        },
        Action::ToggleSelectAll(visible) => ListViewState {
            selected: state.selected.toggle_all_visible(&visible),
            ..state
        },
        Action::ClearSelection => ListViewState {
            selected: SelectionSet::new(),
            ..state
        },
        Action::Deselect(ids) => ListViewState {
            selected: state.selected.remove_all(&ids),
            ..state
        },
    }
}
