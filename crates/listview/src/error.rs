use crate::model::EntityId;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ListViewError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Page config parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Settings error: {0}")]
    Settings(#[from] confique::Error),

    #[error("Invalid config: {0}")]
    Config(String),

    #[error("Store error: {0}")]
    Store(String),

    #[error("Mutation failed: {0}")]
    Mutation(String),

    #[error("Permission denied: {module}/{feature}")]
    PermissionDenied { module: String, feature: String },

    #[error("Entity not found: {0}")]
    EntityNotFound(EntityId),
}

pub type Result<T> = std::result::Result<T, ListViewError>;
