//! Column-to-GraphQL type registry.
//!
//! The registry is the single lookup consulted when an auto-typed model
//! field needs a GraphQL type. It is seeded with the built-in mapping
//! table and extended by `register` calls while the schema is being
//! defined; afterwards it is only read. Re-registering a column kind
//! overwrites the previous entry (last write wins, never an error).

use std::collections::HashMap;
use std::sync::Arc;

use async_graphql::dynamic::TypeRef;

use crate::model::ColumnType;
use crate::schema::choices::EnumDef;

/// An opaque descriptor for "the GraphQL type to declare a field as".
///
/// Comparable for tests; enum descriptors are shared `Arc`s so identity
/// across repeated resolutions is observable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchemaType {
    /// A built-in or custom scalar, referenced by name.
    Scalar(&'static str),
    /// A schema type defined elsewhere (object, interface, custom enum).
    Named(String),
    /// A choice set wrapped as a GraphQL enum.
    Enum(Arc<EnumDef>),
}

impl SchemaType {
    pub fn named(name: impl Into<String>) -> Self {
        SchemaType::Named(name.into())
    }

    /// The GraphQL type name this descriptor refers to.
    pub fn name(&self) -> &str {
        match self {
            SchemaType::Scalar(name) => name,
            SchemaType::Named(name) => name,
            SchemaType::Enum(def) => def.name(),
        }
    }

    /// Declared type for a field of this schema type.
    pub fn type_ref(&self, nullable: bool) -> TypeRef {
        if nullable {
            TypeRef::named(self.name().to_string())
        } else {
            TypeRef::named_nn(self.name().to_string())
        }
    }
}

/// One registry entry: the schema type plus the advisory input-only flag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registration {
    schema_type: SchemaType,
    for_input: bool,
}

impl Registration {
    pub fn schema_type(&self) -> &SchemaType {
        &self.schema_type
    }

    /// Whether this mapping was registered for input-side use only.
    ///
    /// Advisory metadata for registry consumers; resolution does not
    /// branch on it.
    pub fn for_input(&self) -> bool {
        self.for_input
    }
}

/// Mapping from column kind to schema type.
#[derive(Debug, Clone, Default)]
pub struct TypeRegistry {
    entries: HashMap<ColumnType, Registration>,
}

impl TypeRegistry {
    /// An empty registry with no built-in defaults. Mostly useful in
    /// tests; schema builders start from [`TypeRegistry::with_defaults`].
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    /// The registry seeded with the built-in mapping table.
    ///
    /// Auto keys render as `ID`; choices kinds get the mapping of their
    /// base column so schemas still build when enum wrapping is disabled.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();

        registry.register(
            [ColumnType::Auto, ColumnType::BigAuto, ColumnType::Uuid],
            SchemaType::Scalar(TypeRef::ID),
        );
        registry.register(
            [
                ColumnType::SmallInteger,
                ColumnType::Integer,
                ColumnType::BigInteger,
                ColumnType::PositiveInteger,
                ColumnType::IntegerChoices,
            ],
            SchemaType::Scalar(TypeRef::INT),
        );
        registry.register([ColumnType::Float], SchemaType::Scalar(TypeRef::FLOAT));
        registry.register([ColumnType::Boolean], SchemaType::Scalar(TypeRef::BOOLEAN));
        registry.register(
            [
                ColumnType::Char,
                ColumnType::Text,
                ColumnType::Slug,
                ColumnType::Email,
                ColumnType::Url,
                ColumnType::TextChoices,
            ],
            SchemaType::Scalar(TypeRef::STRING),
        );
        registry.register([ColumnType::Decimal], SchemaType::Scalar("Decimal"));
        registry.register([ColumnType::Date], SchemaType::Scalar("Date"));
        registry.register([ColumnType::DateTime], SchemaType::Scalar("DateTime"));

        registry
    }

    /// Record `schema_type` under every given column kind and hand the
    /// same descriptor back unchanged, so registrations chain through
    /// declarations without altering the registered value.
    pub fn register<I>(&mut self, columns: I, schema_type: SchemaType) -> SchemaType
    where
        I: IntoIterator<Item = ColumnType>,
    {
        self.insert(columns, schema_type, false)
    }

    /// Like [`TypeRegistry::register`], flagged as input-only.
    pub fn register_for_input<I>(&mut self, columns: I, schema_type: SchemaType) -> SchemaType
    where
        I: IntoIterator<Item = ColumnType>,
    {
        self.insert(columns, schema_type, true)
    }

    fn insert<I>(&mut self, columns: I, schema_type: SchemaType, for_input: bool) -> SchemaType
    where
        I: IntoIterator<Item = ColumnType>,
    {
        for column in columns {
            self.entries.insert(
                column,
                Registration {
                    schema_type: schema_type.clone(),
                    for_input,
                },
            );
        }
        schema_type
    }

    pub fn get(&self, column: &ColumnType) -> Option<&Registration> {
        self.entries.get(column)
    }

    /// The schema type registered for a column kind, if any.
    pub fn resolve(&self, column: &ColumnType) -> Option<&SchemaType> {
        self.entries.get(column).map(Registration::schema_type)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
