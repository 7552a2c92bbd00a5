use thiserror::Error;

use crate::model::ColumnType;

#[derive(Error, Debug)]
pub enum ModelqlError {
    #[error("No type registered for column '{column}' of field '{model}.{field}'")]
    UnsupportedFieldType {
        model: String,
        field: String,
        column: ColumnType,
    },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Schema generation error: {0}")]
    SchemaGeneration(String),

    #[error("Store error: {0}")]
    Store(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<toml::de::Error> for ModelqlError {
    fn from(err: toml::de::Error) -> Self {
        ModelqlError::Config(format!("TOML parse error: {}", err))
    }
}

impl From<toml::ser::Error> for ModelqlError {
    fn from(err: toml::ser::Error) -> Self {
        ModelqlError::Serialization(format!("TOML serialization error: {}", err))
    }
}

impl From<serde_json::Error> for ModelqlError {
    fn from(err: serde_json::Error) -> Self {
        ModelqlError::Serialization(format!("JSON error: {}", err))
    }
}

pub type Result<T> = std::result::Result<T, ModelqlError>;
