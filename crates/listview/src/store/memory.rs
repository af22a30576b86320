use std::collections::HashMap;
use tracing::debug;

use super::{remove_ids, EntityStore};
use crate::error::{ListViewError, Result};
use crate::model::{Entity, EntityId, QueryKey};

/// Collections keyed by entity type, held in memory.
#[derive(Debug, Default, Clone)]
pub struct InMemoryStore {
    collections: HashMap<String, Vec<Entity>>,
    id_field: Option<String>,
    fail_fetches: bool,
    fail_mutations: bool,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_id_field(mut self, id_field: impl Into<String>) -> Self {
        self.id_field = Some(id_field.into());
        self
    }

    pub fn with_collection(mut self, entity_type: impl Into<String>, items: Vec<Entity>) -> Self {
        self.insert(entity_type, items);
        self
    }

    pub fn insert(&mut self, entity_type: impl Into<String>, items: Vec<Entity>) {
        self.collections.insert(entity_type.into(), items);
    }

    /// Make every subsequent fetch fail, as a network outage would.
    pub fn set_fail_fetches(&mut self, fail: bool) {
        self.fail_fetches = fail;
    }

    /// Make every subsequent delete fail without changing data.
    pub fn set_fail_mutations(&mut self, fail: bool) {
        self.fail_mutations = fail;
    }

    pub fn len(&self, entity_type: &str) -> usize {
        self.collections.get(entity_type).map_or(0, Vec::len)
    }

    pub fn is_empty(&self, entity_type: &str) -> bool {
        self.len(entity_type) == 0
    }
}

impl EntityStore for InMemoryStore {
    fn fetch(&self, query: &QueryKey) -> Result<Vec<Entity>> {
        if self.fail_fetches {
            return Err(ListViewError::Store(format!("fetch {} failed", query)));
        }
        let items = self
            .collections
            .get(query.entity_type())
            .cloned()
            .unwrap_or_default();
        debug!(query = %query, count = items.len(), "fetched collection");
        Ok(items)
    }

    fn delete_one(&mut self, query: &QueryKey, id: &EntityId) -> Result<()> {
        self.delete_many(query, std::slice::from_ref(id))
    }

    fn delete_many(&mut self, query: &QueryKey, ids: &[EntityId]) -> Result<()> {
        if self.fail_mutations {
            return Err(ListViewError::Mutation(format!(
                "delete of {} item(s) in {} rejected",
                ids.len(),
                query
            )));
        }
        let items = self
            .collections
            .entry(query.entity_type().to_string())
            .or_default();
        remove_ids(items, ids, self.id_field.as_deref())?;
        debug!(query = %query, count = ids.len(), "deleted entities");
        Ok(())
    }

    fn set_id_field(&mut self, id_field: Option<String>) {
        self.id_field = id_field;
    }
}

// --- Test Fixtures ---

#[cfg(any(test, feature = "test_utils"))]
pub mod fixtures {
    use super::*;
    use serde_json::json;

    pub struct StoreFixture {
        pub store: InMemoryStore,
    }

    impl Default for StoreFixture {
        fn default() -> Self {
            Self::new()
        }
    }

    impl StoreFixture {
        pub fn new() -> Self {
            Self {
                store: InMemoryStore::new(),
            }
        }

        /// `count` parties named "Party 01".., alternating Retail/Wholesale.
        pub fn with_parties(mut self, count: usize) -> Self {
            let parties = (1..=count)
                .map(|i| {
                    Entity::new(json!({
                        "_id": format!("p{i}"),
                        "name": format!("Party {i:02}"),
                        "partyType": if i % 2 == 0 { "Wholesale" } else { "Retail" },
                        "createdBy": { "name": if i % 3 == 0 { "Ravi" } else { "Anita" } },
                        "createdAt": format!("2026-{:02}-10T09:00:00Z", (i % 12) + 1),
                    }))
                })
                .collect();
            self.store.insert("parties", parties);
            self
        }

        pub fn with_collection(mut self, entity_type: &str, items: Vec<Entity>) -> Self {
            self.store.insert(entity_type, items);
            self
        }
    }
}
