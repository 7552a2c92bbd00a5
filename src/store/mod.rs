//! In-process row store backing the generated API.
//!
//! Each model's table is a JSON array of row objects, seeded from
//! `<data_dir>/<table>.json` at startup. Queries read rows; `create_*`
//! mutations append to them, so access goes through an `RwLock`.

use std::collections::HashMap;
use std::path::Path;
use std::sync::RwLock;

use serde_json::Value as JsonValue;

use crate::error::{ModelqlError, Result};
use crate::model::Model;

#[derive(Debug, Default)]
pub struct Store {
    tables: RwLock<HashMap<String, Vec<JsonValue>>>,
}

impl Store {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed every model's table from `<dir>/<table>.json`. A missing
    /// file registers an empty table so the model still serves.
    pub fn load_dir(&self, dir: &Path, models: &[Model]) -> Result<()> {
        for model in models {
            let path = dir.join(format!("{}.json", model.table));
            if !path.exists() {
                tracing::warn!(
                    "No seed file for table '{}' at {}, starting empty",
                    model.table,
                    path.display()
                );
                self.register_rows(&model.table, Vec::new())?;
                continue;
            }

            let contents = std::fs::read_to_string(&path)?;
            let rows: JsonValue = serde_json::from_str(&contents)?;
            let rows = match rows {
                JsonValue::Array(rows) => rows,
                _ => {
                    return Err(ModelqlError::Store(format!(
                        "Seed file {} must contain a JSON array",
                        path.display()
                    )))
                }
            };

            tracing::info!("Loaded {} rows into table '{}'", rows.len(), model.table);
            self.register_rows(&model.table, rows)?;
        }
        Ok(())
    }

    /// Register a table's rows, replacing any previous content.
    pub fn register_rows(&self, table: &str, rows: Vec<JsonValue>) -> Result<()> {
        for row in &rows {
            if !row.is_object() {
                return Err(ModelqlError::Store(format!(
                    "Table '{}' contains a non-object row",
                    table
                )));
            }
        }

        let mut tables = self.lock_write()?;
        tables.insert(table.to_string(), rows);
        Ok(())
    }

    /// Find a row by its primary key, compared as strings so ID
    /// arguments match numeric keys.
    pub fn find(&self, table: &str, primary_key: &str, key: &str) -> Result<Option<JsonValue>> {
        let tables = self.lock_read()?;
        let rows = tables
            .get(table)
            .ok_or_else(|| ModelqlError::Store(format!("Unknown table '{}'", table)))?;

        Ok(rows
            .iter()
            .find(|row| {
                row.get(primary_key)
                    .map(|value| json_key_eq(value, key))
                    .unwrap_or(false)
            })
            .cloned())
    }

    /// A page of rows.
    pub fn rows(&self, table: &str, limit: usize, offset: usize) -> Result<Vec<JsonValue>> {
        let tables = self.lock_read()?;
        let rows = tables
            .get(table)
            .ok_or_else(|| ModelqlError::Store(format!("Unknown table '{}'", table)))?;

        Ok(rows.iter().skip(offset).take(limit).cloned().collect())
    }

    pub fn len(&self, table: &str) -> Result<usize> {
        let tables = self.lock_read()?;
        Ok(tables.get(table).map(Vec::len).unwrap_or(0))
    }

    pub fn is_empty(&self, table: &str) -> Result<bool> {
        Ok(self.len(table)? == 0)
    }

    pub fn insert(&self, table: &str, row: JsonValue) -> Result<()> {
        if !row.is_object() {
            return Err(ModelqlError::Store(format!(
                "Row inserted into '{}' must be an object",
                table
            )));
        }

        let mut tables = self.lock_write()?;
        tables.entry(table.to_string()).or_default().push(row);
        Ok(())
    }

    fn lock_read(&self) -> Result<std::sync::RwLockReadGuard<'_, HashMap<String, Vec<JsonValue>>>> {
        self.tables
            .read()
            .map_err(|_| ModelqlError::Store("Store lock poisoned".to_string()))
    }

    fn lock_write(
        &self,
    ) -> Result<std::sync::RwLockWriteGuard<'_, HashMap<String, Vec<JsonValue>>>> {
        self.tables
            .write()
            .map_err(|_| ModelqlError::Store("Store lock poisoned".to_string()))
    }
}

fn json_key_eq(value: &JsonValue, key: &str) -> bool {
    match value {
        JsonValue::String(s) => s == key,
        JsonValue::Number(n) => n.to_string() == key,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn seeded_store() -> Store {
        let store = Store::new();
        store
            .register_rows(
                "articles",
                vec![
                    json!({"id": 1, "title": "First"}),
                    json!({"id": 2, "title": "Second"}),
                    json!({"id": 3, "title": "Third"}),
                ],
            )
            .unwrap();
        store
    }

    #[test]
    fn test_find_by_numeric_key_with_string_argument() {
        let store = seeded_store();
        let row = store.find("articles", "id", "2").unwrap().unwrap();
        assert_eq!(row["title"], "Second");
    }

    #[test]
    fn test_find_missing_key_returns_none() {
        let store = seeded_store();
        assert!(store.find("articles", "id", "99").unwrap().is_none());
    }

    #[test]
    fn test_find_unknown_table_errors() {
        let store = seeded_store();
        assert!(store.find("authors", "id", "1").is_err());
    }

    #[test]
    fn test_rows_pagination() {
        let store = seeded_store();
        let page = store.rows("articles", 2, 1).unwrap();
        assert_eq!(page.len(), 2);
        assert_eq!(page[0]["title"], "Second");
    }

    #[test]
    fn test_insert_appends() {
        let store = seeded_store();
        store
            .insert("articles", json!({"id": 4, "title": "Fourth"}))
            .unwrap();
        assert_eq!(store.len("articles").unwrap(), 4);
    }

    #[test]
    fn test_non_object_rows_rejected() {
        let store = Store::new();
        assert!(store.register_rows("articles", vec![json!([1, 2])]).is_err());
        assert!(store.insert("articles", json!("nope")).is_err());
    }

    #[test]
    fn test_load_dir_missing_file_registers_empty_table() {
        let dir = tempfile::tempdir().unwrap();
        let store = Store::new();
        let model = crate::model::Model {
            name: "Article".to_string(),
            table: "articles".to_string(),
            primary_key: "id".to_string(),
            description: None,
            fields: vec![crate::model::ModelField {
                name: "id".to_string(),
                column: crate::model::ColumnType::Auto,
                nullable: false,
                description: None,
                choices: None,
            }],
        };

        store.load_dir(dir.path(), &[model]).unwrap();
        assert!(store.is_empty("articles").unwrap());
    }

    #[test]
    fn test_load_dir_reads_seed_file() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("articles.json"),
            r#"[{"id": 1, "title": "Seeded"}]"#,
        )
        .unwrap();

        let store = Store::new();
        let model = crate::model::Model {
            name: "Article".to_string(),
            table: "articles".to_string(),
            primary_key: "id".to_string(),
            description: None,
            fields: vec![crate::model::ModelField {
                name: "id".to_string(),
                column: crate::model::ColumnType::Auto,
                nullable: false,
                description: None,
                choices: None,
            }],
        };

        store.load_dir(dir.path(), &[model]).unwrap();
        assert_eq!(store.len("articles").unwrap(), 1);
    }
}
