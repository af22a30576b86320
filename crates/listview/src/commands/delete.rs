use tracing::{debug, warn};

use crate::error::Result;
use crate::model::{Entity, EntityId, QueryKey};
use crate::store::EntityStore;

/// Ids the store confirmed as deleted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeleteOutcome {
    pub deleted: Vec<EntityId>,
}

/// Optimistically remove `ids` from `items`, then ask the store to delete them.
///
/// If the store refuses, `items` is restored to exactly what it was before the
/// call and the store's error is returned.
pub fn run<S: EntityStore>(
    store: &mut S,
    query: &QueryKey,
    items: &mut Vec<Entity>,
    ids: &[EntityId],
    id_field: Option<&str>,
) -> Result<DeleteOutcome> {
    if ids.is_empty() {
        return Ok(DeleteOutcome::default());
    }

    let snapshot = items.clone();
    items.retain(|e| e.id_with(id_field).map_or(true, |id| !ids.contains(&id)));

    let result = match ids {
        [id] => store.delete_one(query, id),
        _ => store.delete_many(query, ids),
    };

    match result {
        Ok(()) => {
            debug!(query = %query, count = ids.len(), "delete confirmed");
            Ok(DeleteOutcome {
                deleted: ids.to_vec(),
            })
        }
        Err(e) => {
            warn!(query = %query, error = %e, "delete failed, restoring items");
            *items = snapshot;
            Err(e)
        }
    }
}
