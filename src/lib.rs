pub mod config;
pub mod error;
pub mod model;
pub mod schema;
pub mod store;

// Re-export commonly used types
pub use config::{Config, ModelConfig, ServerConfig, StoreConfig};
pub use error::{ModelqlError, Result};
pub use model::{ColumnType, Model};
pub use schema::SchemaBuilder;
pub use store::Store;
