//! GraphQL schema builder.
//!
//! `SchemaBuilder` owns the type registry, the choice-enum cache and the
//! row store, and turns a set of validated models into a complete
//! dynamic schema: one object type per model, get/list query fields,
//! `create_*` mutation fields, custom scalars, wrapped choice enums and
//! the operation-message output types.

use std::sync::Arc;

use async_graphql::dynamic::{Field, FieldFuture, FieldValue, InputValue, Object, Schema};
use async_graphql::Value;

use crate::error::{ModelqlError, Result};
use crate::model::Model;
use crate::schema::choices::ChoiceEnumCache;
use crate::schema::outputs::{
    operation_message_kind_enum, operation_message_object, operation_messages_object,
    OPERATION_MESSAGES,
};
use crate::schema::registry::TypeRegistry;
use crate::schema::resolver::{
    create_create_resolver, create_get_resolver, create_list_resolver, to_snake_case,
};
use crate::schema::scalars::register_custom_scalars;
use crate::schema::type_mapping::{resolve_field_type, TypeContext};
use crate::store::Store;

/// Schema builder for generating GraphQL schemas from data models
pub struct SchemaBuilder {
    registry: TypeRegistry,
    choices: ChoiceEnumCache,
    store: Arc<Store>,
}

impl SchemaBuilder {
    /// Create a new schema builder with the built-in type mappings and
    /// choice support as compiled.
    pub fn new() -> Self {
        Self {
            registry: TypeRegistry::with_defaults(),
            choices: ChoiceEnumCache::detect(),
            store: Arc::new(Store::new()),
        }
    }

    /// A builder with choice-enum wrapping forced on or off.
    pub fn with_choice_support(enabled: bool) -> Self {
        Self {
            choices: ChoiceEnumCache::with_capability(enabled),
            ..Self::new()
        }
    }

    pub fn registry(&self) -> &TypeRegistry {
        &self.registry
    }

    /// Mutable registry access for registering custom type mappings
    /// before the schema is built.
    pub fn registry_mut(&mut self) -> &mut TypeRegistry {
        &mut self.registry
    }

    /// The store queries resolve against; seed it before building.
    pub fn store(&self) -> Arc<Store> {
        Arc::clone(&self.store)
    }

    /// Build complete GraphQL schema from models
    ///
    /// Fails with `UnsupportedFieldType` if any model field's column
    /// kind has neither a registration nor a built-in default.
    pub fn build_schema(&mut self, models: Vec<Model>) -> Result<Schema> {
        if models.is_empty() {
            return Err(ModelqlError::SchemaGeneration(
                "No models provided".to_string(),
            ));
        }

        let models: Vec<Arc<Model>> = models.into_iter().map(Arc::new).collect();
        let choices_enabled = self.choices.is_enabled();

        let mut query = Object::new("Query");
        let mut mutation = Object::new("Mutation");
        let mut objects = Vec::with_capacity(models.len());

        for model in &models {
            model
                .validate()
                .map_err(|e| ModelqlError::Config(format!("Invalid model '{}': {}", model.name, e)))?;

            tracing::info!("Building schema for model: {}", model.name);

            objects.push(self.build_model_type(model)?);

            query = query.field(create_get_resolver(Arc::clone(model), choices_enabled));
            query = query.field(create_list_resolver(Arc::clone(model), choices_enabled));

            mutation = mutation.field(self.build_create_field(model)?);
        }

        let mut schema_builder =
            Schema::build(query.type_name(), Some(mutation.type_name()), None::<&str>);

        for scalar in register_custom_scalars() {
            schema_builder = schema_builder.register(scalar);
        }

        // Every choice enum the resolver wrapped while building fields.
        for enum_def in self.choices.wrapped_enums() {
            schema_builder = schema_builder.register(enum_def.to_dynamic());
        }

        schema_builder = schema_builder
            .register(operation_message_kind_enum())
            .register(operation_message_object())
            .register(operation_messages_object());

        for object in objects {
            schema_builder = schema_builder.register(object);
        }

        schema_builder = schema_builder.register(query).register(mutation);

        let schema = schema_builder
            .data(Arc::clone(&self.store))
            .finish()
            .map_err(|e| {
                ModelqlError::SchemaGeneration(format!("Failed to build schema: {}", e))
            })?;

        Ok(schema)
    }

    /// Build the GraphQL object type for a model
    fn build_model_type(&self, model: &Arc<Model>) -> Result<Object> {
        let mut object = Object::new(&model.name);

        if let Some(desc) = &model.description {
            object = object.description(desc);
        }

        let ctx = TypeContext {
            model: &model.name,
            registry: &self.registry,
            choices: &self.choices,
        };

        for field in &model.fields {
            let schema_type = resolve_field_type(field, &ctx)?;
            let type_ref = schema_type.type_ref(field.nullable);

            let field_name = field.name.clone();
            let field_name_for_closure = field_name.clone();

            let mut graphql_field = Field::new(field_name, type_ref, move |ctx| {
                let field_name = field_name_for_closure.clone();
                FieldFuture::new(async move {
                    // Extract the field value from the parent object
                    let parent = ctx.parent_value.try_downcast_ref::<Value>()?;

                    if let Value::Object(obj) = parent {
                        if let Some(value) = obj.get(field_name.as_str()) {
                            return Ok(Some(FieldValue::value(value.clone())));
                        }
                    }

                    Ok(Some(FieldValue::value(Value::Null)))
                })
            });

            if let Some(desc) = &field.description {
                graphql_field = graphql_field.description(desc);
            }

            object = object.field(graphql_field);
        }

        Ok(object)
    }

    /// Build the `create_*` mutation field for a model.
    ///
    /// Every argument is declared nullable on purpose: presence of
    /// required fields is checked by the resolver, which reports gaps as
    /// `OperationMessages` data instead of a request-level error.
    fn build_create_field(&self, model: &Arc<Model>) -> Result<Field> {
        let ctx = TypeContext {
            model: &model.name,
            registry: &self.registry,
            choices: &self.choices,
        };

        let mut field = create_create_resolver(Arc::clone(model));
        field = field.description(format!(
            "Create a new {} and report validation messages.",
            to_snake_case(&model.name).replace('_', " ")
        ));

        for model_field in &model.fields {
            if model_field.column.is_auto_key() && model_field.name == model.primary_key {
                continue;
            }

            let schema_type = resolve_field_type(model_field, &ctx)?;
            field = field.argument(InputValue::new(
                model_field.name.clone(),
                schema_type.type_ref(true),
            ));
        }

        Ok(field)
    }
}

impl Default for SchemaBuilder {
    fn default() -> Self {
        Self::new()
    }
}
