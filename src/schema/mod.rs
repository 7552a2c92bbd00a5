//! GraphQL schema generation from data models.
//!
//! This module provides the type registry and field-type resolution that
//! map model columns to GraphQL types, the choice-enum wrapping cache,
//! the operation-message output types, and the dynamic schema builder
//! with its query/mutation resolvers.

mod builder;
mod choices;
mod outputs;
mod registry;
mod resolver;
mod scalars;
mod type_mapping;

pub use builder::SchemaBuilder;
pub use choices::{ChoiceEnumCache, EnumDef, EnumValueDef};
pub use outputs::{
    OperationMessage, OperationMessageKind, OperationMessages, OPERATION_MESSAGE,
    OPERATION_MESSAGES, OPERATION_MESSAGE_KIND,
};
pub use registry::{Registration, SchemaType, TypeRegistry};
pub use resolver::{
    create_create_resolver, create_get_resolver, create_list_resolver, input_to_row,
    row_to_graphql_value, to_snake_case, validate_input,
};
pub use scalars::{register_custom_scalars, Date, DateTime, Decimal};
pub use type_mapping::{resolve_field_type, TypeContext};
