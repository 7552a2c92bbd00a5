//! Dynamic resolvers for generated query and mutation fields.
//!
//! - Get by primary key and list with pagination, reading the shared
//!   in-memory store out of schema data
//! - `create_*` mutations that validate input and answer with
//!   `OperationMessages`
//! - Row conversion from stored JSON to GraphQL values

use std::sync::Arc;

use async_graphql::dynamic::{Field, FieldFuture, FieldValue, ResolverContext, TypeRef};
use async_graphql::{Name, Value};
use indexmap::IndexMap;
use serde_json::{Map as JsonMap, Value as JsonValue};

use crate::error::{ModelqlError, Result};
use crate::model::{ColumnType, Model};
use crate::schema::outputs::{
    OperationMessage, OperationMessageKind, OperationMessages, OPERATION_MESSAGES,
};
use crate::store::Store;

/// Create the get-by-primary-key resolver for a model.
pub fn create_get_resolver(model: Arc<Model>, choices_enabled: bool) -> Field {
    let field_name = to_snake_case(&model.name);
    let primary_key_arg = model.primary_key.clone();
    let graphql_name = model.name.clone();

    Field::new(
        field_name,
        TypeRef::named(graphql_name),
        move |ctx: ResolverContext| {
            let model = Arc::clone(&model);

            FieldFuture::new(async move {
                let pk_arg = ctx
                    .args
                    .try_get(&model.primary_key)
                    .map_err(|_| format!("Primary key '{}' argument missing", model.primary_key))?;

                let pk_value = pk_arg
                    .string()
                    .map_err(|_| "Primary key must be a string")?
                    .to_string();

                let store = ctx
                    .data::<Arc<Store>>()
                    .map_err(|_| "Failed to get store")?;

                tracing::debug!("Looking up {} with {} = {}", model.table, model.primary_key, pk_value);

                let row = store
                    .find(&model.table, &model.primary_key, &pk_value)
                    .map_err(|e| format!("Lookup failed: {}", e))?;

                match row {
                    Some(row) => {
                        let value = row_to_graphql_value(&model, &row, choices_enabled)
                            .map_err(|e| format!("Failed to convert row: {}", e))?;
                        Ok(Some(FieldValue::owned_any(value)))
                    }
                    None => Ok(None),
                }
            })
        },
    )
    .argument(async_graphql::dynamic::InputValue::new(
        primary_key_arg,
        TypeRef::named_nn(TypeRef::ID),
    ))
}

/// Create the list resolver with limit/offset pagination for a model.
pub fn create_list_resolver(model: Arc<Model>, choices_enabled: bool) -> Field {
    let field_name = format!("list_{}", to_snake_case(&model.name));
    let graphql_name = model.name.clone();

    Field::new(
        field_name,
        TypeRef::named_nn_list_nn(graphql_name),
        move |ctx: ResolverContext| {
            let model = Arc::clone(&model);

            FieldFuture::new(async move {
                let limit: i64 = ctx
                    .args
                    .try_get("limit")
                    .ok()
                    .and_then(|v| v.i64().ok())
                    .unwrap_or(100);
                let offset: i64 = ctx
                    .args
                    .try_get("offset")
                    .ok()
                    .and_then(|v| v.i64().ok())
                    .unwrap_or(0);

                // Enforce max limit
                let limit = limit.clamp(0, 1000) as usize;
                let offset = offset.max(0) as usize;

                let store = ctx
                    .data::<Arc<Store>>()
                    .map_err(|_| "Failed to get store")?;

                tracing::debug!(
                    "Listing {} rows from '{}' at offset {}",
                    limit,
                    model.table,
                    offset
                );

                let rows = store
                    .rows(&model.table, limit, offset)
                    .map_err(|e| format!("Listing failed: {}", e))?;

                let mut results = Vec::with_capacity(rows.len());
                for row in rows {
                    let value = row_to_graphql_value(&model, &row, choices_enabled)
                        .map_err(|e| format!("Failed to convert row: {}", e))?;
                    results.push(FieldValue::owned_any(value));
                }

                Ok(Some(FieldValue::list(results)))
            })
        },
    )
    .argument(async_graphql::dynamic::InputValue::new(
        "limit",
        TypeRef::named(TypeRef::INT),
    ))
    .argument(async_graphql::dynamic::InputValue::new(
        "offset",
        TypeRef::named(TypeRef::INT),
    ))
}

/// Create the `create_*` mutation resolver for a model.
///
/// Arguments are attached by the schema builder; the resolver validates
/// the provided input and reports problems as `OperationMessages` data
/// instead of failing the request. A clean validation pass inserts the
/// row and returns an empty message list.
pub fn create_create_resolver(model: Arc<Model>) -> Field {
    let field_name = format!("create_{}", to_snake_case(&model.name));

    Field::new(
        field_name,
        TypeRef::named_nn(OPERATION_MESSAGES),
        move |ctx: ResolverContext| {
            let model = Arc::clone(&model);

            FieldFuture::new(async move {
                let store = ctx
                    .data::<Arc<Store>>()
                    .map_err(|_| "Failed to get store")?;

                let mut input = JsonMap::new();
                for field in &model.fields {
                    if field.column.is_auto_key() && field.name == model.primary_key {
                        continue;
                    }
                    if let Ok(value) = ctx.args.try_get(&field.name) {
                        let json: JsonValue = value.deserialize().map_err(|e| {
                            format!("Invalid value for '{}': {}", field.name, e.message)
                        })?;
                        input.insert(field.name.clone(), json);
                    }
                }

                let messages = validate_input(&model, &input);
                if !messages.is_empty() {
                    tracing::debug!(
                        "Rejected create on '{}' with {} validation message(s)",
                        model.table,
                        messages.len()
                    );
                    return Ok(Some(FieldValue::owned_any(
                        OperationMessages::new(messages).to_value(),
                    )));
                }

                let next_key = store
                    .len(&model.table)
                    .map_err(|e| format!("Insert failed: {}", e))? as i64
                    + 1;
                let row = input_to_row(&model, input, next_key);

                store
                    .insert(&model.table, row)
                    .map_err(|e| format!("Insert failed: {}", e))?;
                tracing::debug!("Inserted row into '{}'", model.table);

                Ok(Some(FieldValue::owned_any(
                    OperationMessages::default().to_value(),
                )))
            })
        },
    )
}

/// Validate mutation input against the model.
///
/// Messages come back in field order so clients see a stable sequence:
/// missing non-nullable fields first report "required", present choice
/// values must be a member of the field's choice set (by enum name or
/// raw stored value).
pub fn validate_input(model: &Model, input: &JsonMap<String, JsonValue>) -> Vec<OperationMessage> {
    let mut messages = Vec::new();

    for field in &model.fields {
        if field.column.is_auto_key() && field.name == model.primary_key {
            continue;
        }

        let provided = input.get(&field.name).filter(|v| !v.is_null());

        let Some(value) = provided else {
            if !field.nullable {
                messages.push(OperationMessage::for_field(
                    OperationMessageKind::Validation,
                    "This field is required.",
                    field.name.clone(),
                ));
            }
            continue;
        };

        if let Some(set) = &field.choices {
            let by_name = value.as_str().and_then(|name| set.by_name(name));
            if by_name.is_none() && set.by_stored_value(value).is_none() {
                messages.push(OperationMessage::for_field(
                    OperationMessageKind::Validation,
                    format!("'{}' is not a valid choice.", json_display(value)),
                    field.name.clone(),
                ));
            }
        }
    }

    messages
}

/// Turn validated input into a stored row: the auto primary key is
/// assigned, choice names are replaced by their raw stored values, and
/// absent nullable fields are stored as explicit nulls.
pub fn input_to_row(model: &Model, input: JsonMap<String, JsonValue>, next_key: i64) -> JsonValue {
    let mut row = JsonMap::new();

    for field in &model.fields {
        if field.column.is_auto_key() && field.name == model.primary_key {
            row.insert(field.name.clone(), JsonValue::Number(next_key.into()));
            continue;
        }

        let value = match input.get(&field.name) {
            Some(value) if !value.is_null() => match &field.choices {
                Some(set) => match value.as_str().and_then(|name| set.by_name(name)) {
                    Some(choice) => choice.value.to_json(),
                    // Already a raw value; validation vouched for it.
                    None => value.clone(),
                },
                None => value.clone(),
            },
            _ => JsonValue::Null,
        };
        row.insert(field.name.clone(), value);
    }

    JsonValue::Object(row)
}

/// Convert a stored row to a GraphQL value object, field by field.
///
/// Auto keys and UUIDs render as ID strings, choice raw values render as
/// enum names (unless choice support is off, in which case the raw value
/// passes through), dates and datetimes are normalized to ISO 8601.
/// Stored values the model cannot account for render as null with a
/// warning, matching the lenient read path.
pub fn row_to_graphql_value(
    model: &Model,
    row: &JsonValue,
    choices_enabled: bool,
) -> Result<Value> {
    let row = row
        .as_object()
        .ok_or_else(|| ModelqlError::Store(format!("Row in '{}' is not an object", model.table)))?;

    let mut object_map = IndexMap::new();

    for field in &model.fields {
        let stored = row.get(&field.name).unwrap_or(&JsonValue::Null);

        if stored.is_null() {
            object_map.insert(Name::new(&field.name), Value::Null);
            continue;
        }

        let value = match &field.column {
            ColumnType::Auto | ColumnType::BigAuto | ColumnType::Uuid => match stored {
                JsonValue::String(s) => Value::String(s.clone()),
                JsonValue::Number(n) => Value::String(n.to_string()),
                other => unexpected_value(model, &field.name, other),
            },
            ColumnType::SmallInteger
            | ColumnType::Integer
            | ColumnType::BigInteger
            | ColumnType::PositiveInteger
            | ColumnType::Float => match stored {
                JsonValue::Number(n) => Value::Number(n.clone()),
                other => unexpected_value(model, &field.name, other),
            },
            ColumnType::Decimal => match stored {
                JsonValue::Number(n) => Value::String(n.to_string()),
                JsonValue::String(s) => Value::String(s.clone()),
                other => unexpected_value(model, &field.name, other),
            },
            ColumnType::Boolean => match stored {
                JsonValue::Bool(b) => Value::Boolean(*b),
                other => unexpected_value(model, &field.name, other),
            },
            ColumnType::Char
            | ColumnType::Text
            | ColumnType::Slug
            | ColumnType::Email
            | ColumnType::Url => match stored {
                JsonValue::String(s) => Value::String(s.clone()),
                other => unexpected_value(model, &field.name, other),
            },
            ColumnType::Date => {
                let raw = stored.as_str().ok_or_else(|| {
                    ModelqlError::Store(format!(
                        "Field '{}.{}' holds a non-string date",
                        model.name, field.name
                    ))
                })?;
                let date = chrono::NaiveDate::parse_from_str(raw, "%Y-%m-%d").map_err(|_| {
                    ModelqlError::Store(format!("Invalid date '{}' in '{}.{}'", raw, model.name, field.name))
                })?;
                Value::String(date.format("%Y-%m-%d").to_string())
            }
            ColumnType::DateTime => {
                let raw = stored.as_str().ok_or_else(|| {
                    ModelqlError::Store(format!(
                        "Field '{}.{}' holds a non-string datetime",
                        model.name, field.name
                    ))
                })?;
                let datetime = chrono::DateTime::parse_from_rfc3339(raw).map_err(|_| {
                    ModelqlError::Store(format!(
                        "Invalid datetime '{}' in '{}.{}'",
                        raw, model.name, field.name
                    ))
                })?;
                Value::String(datetime.to_rfc3339())
            }
            ColumnType::TextChoices | ColumnType::IntegerChoices => {
                match (&field.choices, choices_enabled) {
                    (Some(set), true) => match set.by_stored_value(stored) {
                        Some(choice) => Value::Enum(Name::new(&choice.name)),
                        None => unexpected_value(model, &field.name, stored),
                    },
                    // Choice wrapping off: the field is declared with its
                    // base scalar, so the raw value passes through.
                    _ => Value::from_json(stored.clone()).unwrap_or(Value::Null),
                }
            }
            ColumnType::Custom(_) => Value::from_json(stored.clone()).unwrap_or(Value::Null),
        };

        object_map.insert(Name::new(&field.name), value);
    }

    Ok(Value::Object(object_map))
}

fn unexpected_value(model: &Model, field: &str, stored: &JsonValue) -> Value {
    tracing::warn!(
        "Unexpected stored value {} for field '{}.{}', returning null",
        json_display(stored),
        model.name,
        field
    );
    Value::Null
}

fn json_display(value: &JsonValue) -> String {
    match value {
        JsonValue::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Helper function to convert a type name to snake_case
pub fn to_snake_case(s: &str) -> String {
    let mut result = String::new();
    for (i, ch) in s.chars().enumerate() {
        if ch.is_uppercase() && i > 0 {
            result.push('_');
            result.push(ch.to_ascii_lowercase());
        } else {
            result.push(ch.to_ascii_lowercase());
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Choice, ChoiceSet, ChoiceValue, ModelField};
    use serde_json::json;

    fn article_model() -> Model {
        let status = ChoiceSet::new(
            "ArticleStatus",
            None,
            vec![
                Choice {
                    name: "DRAFT".to_string(),
                    value: ChoiceValue::Str("draft".to_string()),
                    description: None,
                },
                Choice {
                    name: "PUBLISHED".to_string(),
                    value: ChoiceValue::Str("published".to_string()),
                    description: None,
                },
            ],
        );

        Model {
            name: "Article".to_string(),
            table: "articles".to_string(),
            primary_key: "id".to_string(),
            description: None,
            fields: vec![
                ModelField {
                    name: "id".to_string(),
                    column: ColumnType::BigAuto,
                    nullable: false,
                    description: None,
                    choices: None,
                },
                ModelField {
                    name: "title".to_string(),
                    column: ColumnType::Char,
                    nullable: false,
                    description: None,
                    choices: None,
                },
                ModelField {
                    name: "status".to_string(),
                    column: ColumnType::TextChoices,
                    nullable: false,
                    description: None,
                    choices: Some(Arc::new(status)),
                },
                ModelField {
                    name: "published_on".to_string(),
                    column: ColumnType::Date,
                    nullable: true,
                    description: None,
                    choices: None,
                },
            ],
        }
    }

    #[test]
    fn test_row_conversion_basic() {
        let model = article_model();
        let row = json!({
            "id": 7,
            "title": "Hello",
            "status": "published",
            "published_on": "2024-03-01"
        });

        let value = row_to_graphql_value(&model, &row, true).unwrap();
        let Value::Object(object) = value else {
            panic!("expected object");
        };

        assert_eq!(object.get("id"), Some(&Value::String("7".to_string())));
        assert_eq!(object.get("title"), Some(&Value::String("Hello".to_string())));
        assert_eq!(object.get("status"), Some(&Value::Enum(Name::new("PUBLISHED"))));
        assert_eq!(
            object.get("published_on"),
            Some(&Value::String("2024-03-01".to_string()))
        );
    }

    #[test]
    fn test_row_conversion_null_and_missing_fields() {
        let model = article_model();
        let row = json!({"id": 1, "title": "Hello", "status": null});

        let value = row_to_graphql_value(&model, &row, true).unwrap();
        let Value::Object(object) = value else {
            panic!("expected object");
        };

        assert_eq!(object.get("status"), Some(&Value::Null));
        assert_eq!(object.get("published_on"), Some(&Value::Null));
    }

    #[test]
    fn test_row_conversion_unknown_choice_value_is_null() {
        let model = article_model();
        let row = json!({"id": 1, "title": "Hello", "status": "deleted"});

        let value = row_to_graphql_value(&model, &row, true).unwrap();
        let Value::Object(object) = value else {
            panic!("expected object");
        };

        assert_eq!(object.get("status"), Some(&Value::Null));
    }

    #[test]
    fn test_row_conversion_choices_disabled_passes_raw_value() {
        let model = article_model();
        let row = json!({"id": 1, "title": "Hello", "status": "published"});

        let value = row_to_graphql_value(&model, &row, false).unwrap();
        let Value::Object(object) = value else {
            panic!("expected object");
        };

        assert_eq!(
            object.get("status"),
            Some(&Value::String("published".to_string()))
        );
    }

    #[test]
    fn test_row_conversion_invalid_date_errors() {
        let model = article_model();
        let row = json!({"id": 1, "title": "Hello", "status": "draft", "published_on": "soon"});

        assert!(row_to_graphql_value(&model, &row, true).is_err());
    }

    #[test]
    fn test_validate_input_reports_missing_required_fields_in_order() {
        let model = article_model();
        let input = JsonMap::new();

        let messages = validate_input(&model, &input);
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].field.as_deref(), Some("title"));
        assert_eq!(messages[1].field.as_deref(), Some("status"));
        assert!(messages
            .iter()
            .all(|m| m.kind == OperationMessageKind::Validation));
    }

    #[test]
    fn test_validate_input_rejects_unknown_choice() {
        let model = article_model();
        let mut input = JsonMap::new();
        input.insert("title".to_string(), json!("Hello"));
        input.insert("status".to_string(), json!("DELETED"));

        let messages = validate_input(&model, &input);
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].field.as_deref(), Some("status"));
        assert!(messages[0].message.contains("DELETED"));
    }

    #[test]
    fn test_validate_input_accepts_name_or_raw_value() {
        let model = article_model();

        let mut by_name = JsonMap::new();
        by_name.insert("title".to_string(), json!("Hello"));
        by_name.insert("status".to_string(), json!("DRAFT"));
        assert!(validate_input(&model, &by_name).is_empty());

        let mut by_value = JsonMap::new();
        by_value.insert("title".to_string(), json!("Hello"));
        by_value.insert("status".to_string(), json!("draft"));
        assert!(validate_input(&model, &by_value).is_empty());
    }

    #[test]
    fn test_input_to_row_assigns_key_and_maps_choice_names() {
        let model = article_model();
        let mut input = JsonMap::new();
        input.insert("title".to_string(), json!("Hello"));
        input.insert("status".to_string(), json!("DRAFT"));

        let row = input_to_row(&model, input, 42);

        assert_eq!(row["id"], json!(42));
        assert_eq!(row["title"], json!("Hello"));
        assert_eq!(row["status"], json!("draft"));
        assert_eq!(row["published_on"], JsonValue::Null);
    }

    #[test]
    fn test_to_snake_case() {
        assert_eq!(to_snake_case("Article"), "article");
        assert_eq!(to_snake_case("OrderItem"), "order_item");
        assert_eq!(to_snake_case("already_snake"), "already_snake");
    }
}
