//! # Storage Layer
//!
//! The backend is the single source of truth. A list page never persists
//! entities itself: it fetches a collection by [`QueryKey`], renders it, and
//! re-fetches after every successful mutation. [`EntityStore`] is the seam
//! between the engine and whatever performs those calls.
//!
//! ## Implementations
//!
//! - [`memory::InMemoryStore`]: collections held in a map, with switchable
//!   failures for exercising rollback paths in tests.
//! - [`fs::JsonFileStore`]: one `<entity-type>.json` array per collection in a
//!   directory. Used by the CLI.
//!
//! ## Identity
//!
//! Stores match entities by [`Entity::id_with`] using their configured
//! `id_field` (default `id` then `_id`). A controller hands its page's
//! `id_field` to the store through [`EntityStore::set_id_field`], so the
//! ids it removes locally are the ids the store deletes.

use crate::error::{ListViewError, Result};
use crate::model::{Entity, EntityId, QueryKey};

pub mod fs;
pub mod memory;

/// Fetch and mutation collaborator for list pages.
pub trait EntityStore {
    /// Load the collection identified by `query`.
    fn fetch(&self, query: &QueryKey) -> Result<Vec<Entity>>;

    /// Delete a single entity.
    fn delete_one(&mut self, query: &QueryKey, id: &EntityId) -> Result<()>;

    /// Delete several entities. Fails without deleting anything if any id is unknown.
    fn delete_many(&mut self, query: &QueryKey, ids: &[EntityId]) -> Result<()>;

    /// Field that identifies entities in deletes. `None` means `id` then `_id`.
    fn set_id_field(&mut self, id_field: Option<String>);
}

/// Remove `ids` from `items`, failing if any of them is absent.
pub(crate) fn remove_ids(
    items: &mut Vec<Entity>,
    ids: &[EntityId],
    id_field: Option<&str>,
) -> Result<()> {
    if let Some(missing) = ids
        .iter()
        .find(|id| !items.iter().any(|e| e.id_with(id_field).as_ref() == Some(*id)))
    {
        return Err(ListViewError::EntityNotFound(missing.clone()));
    }
    items.retain(|e| {
        e.id_with(id_field)
            .map_or(true, |id| !ids.contains(&id))
    });
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn items() -> Vec<Entity> {
        vec![
            Entity::new(json!({ "id": "1" })),
            Entity::new(json!({ "id": "2" })),
            Entity::new(json!({ "name": "no id" })),
        ]
    }

    #[test]
    fn remove_ids_drops_matches_only() {
        let mut list = items();
        remove_ids(&mut list, &[EntityId::from("1")], None).unwrap();
        assert_eq!(list.len(), 2);
        assert!(list.iter().all(|e| e.id() != Some(EntityId::from("1"))));
    }

    #[test]
    fn remove_ids_is_all_or_nothing() {
        let mut list = items();
        let err = remove_ids(
            &mut list,
            &[EntityId::from("1"), EntityId::from("9")],
            None,
        );
        assert!(matches!(err, Err(ListViewError::EntityNotFound(id)) if id.as_str() == "9"));
        assert_eq!(list.len(), 3);
    }
}
