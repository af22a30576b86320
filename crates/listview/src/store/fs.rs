use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use super::{remove_ids, EntityStore};
use crate::error::Result;
use crate::model::{Entity, EntityId, QueryKey};

/// Collections stored as `<root>/<entity-type>.json`, each a JSON array.
///
/// A missing file is an empty collection. Deletes rewrite the whole file.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    root: PathBuf,
    id_field: Option<String>,
}

impl JsonFileStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            id_field: None,
        }
    }

    pub fn with_id_field(mut self, id_field: Option<String>) -> Self {
        self.id_field = id_field;
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn path_for(&self, entity_type: &str) -> PathBuf {
        self.root.join(format!("{}.json", entity_type))
    }

    fn read(&self, entity_type: &str) -> Result<Vec<Entity>> {
        let path = self.path_for(entity_type);
        if !path.exists() {
            return Ok(Vec::new());
        }
        let content = fs::read_to_string(&path)?;
        if content.trim().is_empty() {
            return Ok(Vec::new());
        }
        Ok(Entity::list_from_value(serde_json::from_str(&content)?))
    }

    fn write(&self, entity_type: &str, items: &[Entity]) -> Result<()> {
        let path = self.path_for(entity_type);
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, serde_json::to_string_pretty(items)?)?;
        fs::rename(&tmp, &path)?;
        Ok(())
    }
}

impl EntityStore for JsonFileStore {
    fn fetch(&self, query: &QueryKey) -> Result<Vec<Entity>> {
        let items = self.read(query.entity_type())?;
        debug!(
            path = %self.path_for(query.entity_type()).display(),
            count = items.len(),
            "loaded collection"
        );
        Ok(items)
    }

    fn delete_one(&mut self, query: &QueryKey, id: &EntityId) -> Result<()> {
        self.delete_many(query, std::slice::from_ref(id))
    }

    fn delete_many(&mut self, query: &QueryKey, ids: &[EntityId]) -> Result<()> {
        let mut items = self.read(query.entity_type())?;
        remove_ids(&mut items, ids, self.id_field.as_deref())?;
        self.write(query.entity_type(), &items)?;
        debug!(query = %query, count = ids.len(), "deleted entities from file");
        Ok(())
    }

    fn set_id_field(&mut self, id_field: Option<String>) {
        self.id_field = id_field;
    }
}
