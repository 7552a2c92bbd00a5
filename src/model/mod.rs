//! Data-model layer: declarative descriptions of the tables the GraphQL
//! schema is generated from.
//!
//! A [`Model`] is the validated, resolved form of a `[[model]]` block in
//! the configuration file: every field carries its [`ColumnType`] and,
//! for choice columns, a shared reference to its [`ChoiceSet`].

mod choices;
mod columns;

pub use choices::{cleandoc, Choice, ChoiceSet, ChoiceValue};
pub use columns::ColumnType;

use std::collections::HashMap;
use std::sync::Arc;

use crate::config::{ChoiceSetConfig, ChoiceValueConfig, Config, ModelConfig};
use crate::error::{ModelqlError, Result};

/// A single column of a model.
#[derive(Debug, Clone)]
pub struct ModelField {
    pub name: String,
    pub column: ColumnType,
    pub nullable: bool,
    pub description: Option<String>,
    /// Present only for choice columns; shared so every resolution of the
    /// same set sees the same definition.
    pub choices: Option<Arc<ChoiceSet>>,
}

/// A validated data model: one GraphQL object type backed by one table.
#[derive(Debug, Clone)]
pub struct Model {
    /// GraphQL type name (PascalCase).
    pub name: String,
    /// Backing table name in the store.
    pub table: String,
    /// Name of the primary key field.
    pub primary_key: String,
    pub description: Option<String>,
    pub fields: Vec<ModelField>,
}

impl Model {
    pub fn field(&self, name: &str) -> Option<&ModelField> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn primary_key_field(&self) -> Option<&ModelField> {
        self.field(&self.primary_key)
    }

    /// Validate model invariants after construction.
    pub fn validate(&self) -> std::result::Result<(), String> {
        if !self.name.chars().all(|c| c.is_alphanumeric()) {
            return Err(format!("GraphQL name '{}' must be alphanumeric", self.name));
        }
        if !self.name.chars().next().unwrap_or('_').is_uppercase() {
            return Err(format!(
                "GraphQL name '{}' must start with uppercase letter (PascalCase)",
                self.name
            ));
        }
        if self.fields.is_empty() {
            return Err(format!("Model '{}' has no fields", self.name));
        }
        if self.primary_key_field().is_none() {
            return Err(format!(
                "Primary key '{}' is not a field of model '{}'",
                self.primary_key, self.name
            ));
        }
        for field in &self.fields {
            if field.column.is_choices() && field.choices.is_none() {
                return Err(format!(
                    "Field '{}.{}' is a choices column but references no choice set",
                    self.name, field.name
                ));
            }
        }
        Ok(())
    }
}

/// Resolve the raw configuration into validated models, wiring choice
/// columns to their named choice sets.
pub fn models_from_config(config: &Config) -> Result<Vec<Model>> {
    let choice_sets = build_choice_sets(&config.choices)?;

    let mut models = Vec::with_capacity(config.model.len());
    for model_cfg in &config.model {
        models.push(model_from_config(model_cfg, &choice_sets)?);
    }
    Ok(models)
}

fn build_choice_sets(configs: &[ChoiceSetConfig]) -> Result<HashMap<String, Arc<ChoiceSet>>> {
    let mut sets = HashMap::new();
    for cfg in configs {
        cfg.validate().map_err(ModelqlError::Config)?;

        let variants = cfg
            .variant
            .iter()
            .map(|v| Choice {
                name: v.name.clone(),
                value: match &v.value {
                    ChoiceValueConfig::Str(s) => ChoiceValue::Str(s.clone()),
                    ChoiceValueConfig::Int(i) => ChoiceValue::Int(*i),
                },
                description: v.description.clone(),
            })
            .collect();

        let set = Arc::new(ChoiceSet::new(cfg.name.clone(), cfg.doc.clone(), variants));
        if sets.insert(cfg.name.clone(), set).is_some() {
            return Err(ModelqlError::Config(format!(
                "Duplicate choice set '{}'",
                cfg.name
            )));
        }
    }
    Ok(sets)
}

fn model_from_config(
    cfg: &ModelConfig,
    choice_sets: &HashMap<String, Arc<ChoiceSet>>,
) -> Result<Model> {
    let mut fields = Vec::with_capacity(cfg.field.len());
    for field_cfg in &cfg.field {
        let column = ColumnType::parse(&field_cfg.column);

        let choices = match &field_cfg.choices {
            Some(set_name) => Some(
                choice_sets
                    .get(set_name)
                    .cloned()
                    .ok_or_else(|| {
                        ModelqlError::Config(format!(
                            "Field '{}.{}' references unknown choice set '{}'",
                            cfg.name, field_cfg.name, set_name
                        ))
                    })?,
            ),
            None => None,
        };

        fields.push(ModelField {
            name: field_cfg.name.clone(),
            column,
            nullable: field_cfg.nullable,
            description: field_cfg.description.clone(),
            choices,
        });
    }

    let model = Model {
        name: cfg.name.clone(),
        table: cfg.table.clone(),
        primary_key: cfg.primary_key.clone(),
        description: cfg.description.clone(),
        fields,
    };

    model.validate().map_err(ModelqlError::Config)?;
    Ok(model)
}
