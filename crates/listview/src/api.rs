//! # API Facade
//!
//! [`ListController`] is the single entry point a UI uses to drive one list
//! page. It owns the fetched items and the [`ListViewState`], and delegates
//! every computation to the command layer.
//!
//! ## Role and Responsibilities
//!
//! The controller:
//! - **Fetches** the page's collection through an [`EntityStore`]
//! - **Dispatches** [`Action`]s through [`reduce`], keeping the current page in range
//! - **Projects** the state into a [`ListView`] on demand
//! - **Gates** delete and export behind the [`PermissionOracle`]
//!
//! ## What the Controller Does NOT Do
//!
//! - **Filtering logic**: That belongs in `commands/*.rs`
//! - **Rendering**: It returns data structures, never strings
//! - **Caching**: Every `view()` recomputes the pipeline from scratch
//!
//! ## Failure Handling
//!
//! A failed [`refresh`](ListController::refresh) leaves the previous items in
//! place. A failed delete restores the items removed optimistically and keeps
//! the selection. Only after the store confirms are the deleted ids
//! deselected and the collection re-fetched.
//!
//! ## Generic Over Store and Permissions
//!
//! `ListController<S: EntityStore, P: PermissionOracle>`:
//! - Production: `ListController<JsonFileStore, PermissionSet>`
//! - Testing: `ListController<InMemoryStore, AllowAll>` or a closure oracle

use tracing::{debug, warn};

use crate::commands::delete::{self, DeleteOutcome};
use crate::commands::export::{self, ExportTable};
use crate::commands::paginate::clamp_page;
use crate::commands::view::{self, ListView};
use crate::commands::options;
use crate::config::{ListSettings, ListViewConfig, PageConfig};
use crate::error::Result;
use crate::facets::{find_spec, FacetSpec};
use crate::model::{Entity, EntityId, QueryKey};
use crate::permissions::{self, Feature, ListAction, PermissionOracle};
use crate::state::{reduce, Action, ListViewState};
use crate::store::EntityStore;

pub struct ListController<S: EntityStore, P: PermissionOracle> {
    store: S,
    permissions: P,
    page: PageConfig,
    settings: ListSettings,
    query: QueryKey,
    items: Vec<Entity>,
    state: ListViewState,
}

impl<S: EntityStore, P: PermissionOracle> ListController<S, P> {
    /// The store is switched to the page's `id_field`.
    pub fn new(mut store: S, permissions: P, page: PageConfig, config: &ListViewConfig) -> Self {
        store.set_id_field(page.id_field.clone());
        let settings = page.settings(config);
        let query = QueryKey::new(page.entity.clone());
        let state = ListViewState::new(page.sort.clone());
        Self {
            store,
            permissions,
            page,
            settings,
            query,
            items: Vec::new(),
            state,
        }
    }

    /// Fetch with extra query parameters, e.g. `["parties", "active"]`.
    pub fn with_query(mut self, query: QueryKey) -> Self {
        self.query = query;
        self
    }

    pub fn items(&self) -> &[Entity] {
        &self.items
    }

    pub fn state(&self) -> &ListViewState {
        &self.state
    }

    pub fn page_config(&self) -> &PageConfig {
        &self.page
    }

    pub fn settings(&self) -> &ListSettings {
        &self.settings
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    /// Re-fetch the collection. On error the previous items stay.
    pub fn refresh(&mut self) -> Result<usize> {
        match self.store.fetch(&self.query) {
            Ok(items) => {
                debug!(query = %self.query, count = items.len(), "refreshed");
                self.load(Some(items));
                Ok(self.items.len())
            }
            Err(e) => {
                warn!(query = %self.query, error = %e, "refresh failed, keeping previous items");
                Err(e)
            }
        }
    }

    /// Replace the items directly. `None` means the fetch produced nothing.
    pub fn load(&mut self, items: Option<Vec<Entity>>) {
        self.items = items.unwrap_or_default();
        self.clamp();
    }

    pub fn dispatch(&mut self, action: Action) {
        debug!(?action, "dispatch");
        let state = std::mem::take(&mut self.state);
        self.state = reduce(state, action);
        self.clamp();
    }

    pub fn view(&self) -> ListView<'_> {
        view::run(&self.items, &self.page, &self.settings, &self.state)
    }

    pub fn toggle_select(&mut self, id: EntityId) {
        self.dispatch(Action::ToggleSelect(id));
    }

    /// Toggle every id in the page's select-all scope.
    pub fn toggle_select_all(&mut self) {
        let visible = self.view().visible_ids;
        self.dispatch(Action::ToggleSelectAll(visible));
    }

    pub fn available_actions(&self) -> Vec<ListAction> {
        permissions::available_actions(&self.permissions, self.page.module())
    }

    pub fn delete_one(&mut self, id: &EntityId) -> Result<DeleteOutcome> {
        permissions::require(&self.permissions, self.page.module(), Feature::Delete)?;
        self.delete(std::slice::from_ref(id))
    }

    /// Delete every selected id. Nothing selected is a no-op.
    pub fn delete_selected(&mut self) -> Result<DeleteOutcome> {
        permissions::require(&self.permissions, self.page.module(), Feature::Delete)?;
        let ids = self.state.selected.to_vec();
        self.delete(&ids)
    }

    fn delete(&mut self, ids: &[EntityId]) -> Result<DeleteOutcome> {
        let outcome = delete::run(
            &mut self.store,
            &self.query,
            &mut self.items,
            ids,
            self.page.id_field.as_deref(),
        )?;
        if outcome.deleted.is_empty() {
            return Ok(outcome);
        }

        self.dispatch(Action::Deselect(outcome.deleted.clone()));
        if let Err(e) = self.refresh() {
            warn!(error = %e, "refetch after delete failed");
        }
        Ok(outcome)
    }

    /// Export the selected rows if any of them pass the current filters,
    /// otherwise every filtered row.
    pub fn export(&self) -> Result<ExportTable> {
        permissions::require(&self.permissions, self.page.module(), Feature::Export)?;

        let filtered = view::filtered(&self.items, &self.page, &self.settings, &self.state);
        let id_field = self.page.id_field.as_deref();
        let selected: Vec<&Entity> = filtered
            .iter()
            .copied()
            .filter(|e| {
                e.id_with(id_field)
                    .is_some_and(|id| self.state.selected.contains(&id))
            })
            .collect();

        let rows = if selected.is_empty() { filtered } else { selected };
        debug!(rows = rows.len(), "export");
        Ok(export::run(&rows, &self.page, &self.settings))
    }

    /// Dropdown values for facet `key` across all loaded items.
    pub fn facet_options(&self, key: &str) -> Vec<String> {
        let fallback;
        let spec = match find_spec(&self.page.facets, key) {
            Some(spec) => spec,
            None => {
                fallback = FacetSpec::scalar(key);
                &fallback
            }
        };
        options::run(&self.items, spec, self.settings.offset)
    }

    fn clamp(&mut self) {
        let total = view::filtered(&self.items, &self.page, &self.settings, &self.state).len();
        self.state.current_page =
            clamp_page(self.state.current_page, total, self.settings.items_per_page);
    }
}
