//! Column to GraphQL type resolution.
//!
//! Given a model field, produce the schema type to expose it as. Choice
//! columns are wrapped as GraphQL enums when choice support is enabled;
//! everything else goes through the type registry.

use crate::error::{ModelqlError, Result};
use crate::model::ModelField;
use crate::schema::choices::ChoiceEnumCache;
use crate::schema::registry::{SchemaType, TypeRegistry};

/// Everything resolution needs, passed explicitly so the function stays
/// pure with respect to process state.
pub struct TypeContext<'a> {
    /// GraphQL name of the model the field belongs to.
    pub model: &'a str,
    pub registry: &'a TypeRegistry,
    pub choices: &'a ChoiceEnumCache,
}

/// Resolve the GraphQL type for a model field.
///
/// Choice columns with an attached choice set are wrapped as enums first
/// (idempotently, through the context's cache). Every other field is
/// looked up in the registry; a column kind with no entry fails schema
/// construction with `UnsupportedFieldType`.
pub fn resolve_field_type(field: &ModelField, ctx: &TypeContext<'_>) -> Result<SchemaType> {
    if ctx.choices.is_enabled() && field.column.is_choices() {
        if let Some(set) = &field.choices {
            return Ok(SchemaType::Enum(ctx.choices.wrap(set)));
        }
    }

    ctx.registry
        .resolve(&field.column)
        .cloned()
        .ok_or_else(|| ModelqlError::UnsupportedFieldType {
            model: ctx.model.to_string(),
            field: field.name.clone(),
            column: field.column.clone(),
        })
}
