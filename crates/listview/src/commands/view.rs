use serde::Serialize;

use super::paginate::{page, total_pages};
use super::{search, sort};
use crate::config::{ListSettings, PageConfig, SelectScope};
use crate::facets;
use crate::model::{Entity, EntityId};
use crate::state::ListViewState;

/// What a list page renders: the current slice plus selection controls.
#[derive(Debug, Clone, Serialize)]
pub struct ListView<'a> {
    pub items: Vec<&'a Entity>,
    pub current_page: usize,
    pub items_per_page: usize,
    pub total_items: usize,
    pub total_pages: usize,
    /// Ids "select all" acts on, per the page's select scope.
    pub visible_ids: Vec<EntityId>,
    pub selected_ids: Vec<EntityId>,
    pub is_all_selected: bool,
    #[serde(skip)]
    id_field: Option<String>,
}

impl ListView<'_> {
    pub fn has_previous(&self) -> bool {
        self.current_page > 1
    }

    pub fn has_next(&self) -> bool {
        self.current_page < self.total_pages
    }

    pub fn is_selected(&self, entity: &Entity) -> bool {
        entity
            .id_with(self.id_field.as_deref())
            .is_some_and(|id| self.selected_ids.binary_search(&id).is_ok())
    }
}

/// Search, facet filter and sort, in that order.
pub fn filtered<'a>(
    items: &'a [Entity],
    page_config: &PageConfig,
    settings: &ListSettings,
    state: &ListViewState,
) -> Vec<&'a Entity> {
    let searched = search::filter(items, &state.search, &page_config.search_fields);
    let mut result = facets::filter(
        searched,
        &state.criteria,
        &page_config.facets,
        settings.offset,
    );
    if let Some(spec) = &state.sort {
        sort::sort(&mut result, spec, settings.offset);
    }
    result
}

/// Ids of `entities`, skipping those without an identifier.
pub fn ids_of(entities: &[&Entity], id_field: Option<&str>) -> Vec<EntityId> {
    entities
        .iter()
        .filter_map(|entity| entity.id_with(id_field))
        .collect()
}

/// Run the whole pipeline for one render.
pub fn run<'a>(
    items: &'a [Entity],
    page_config: &PageConfig,
    settings: &ListSettings,
    state: &ListViewState,
) -> ListView<'a> {
    let all = filtered(items, page_config, settings, state);
    let per_page = settings.items_per_page;
    let current = page(&all, state.current_page, per_page).to_vec();

    let id_field = page_config.id_field.as_deref();
    let visible_ids = match settings.select_scope {
        SelectScope::Page => ids_of(&current, id_field),
        SelectScope::Filtered => ids_of(&all, id_field),
    };

    ListView {
        current_page: state.current_page.max(1),
        items_per_page: per_page,
        total_items: all.len(),
        total_pages: total_pages(all.len(), per_page),
        is_all_selected: state.selected.is_all_visible_selected(&visible_ids),
        selected_ids: state.selected.to_vec(),
        visible_ids,
        items: current,
        id_field: page_config.id_field.clone(),
    }
}
