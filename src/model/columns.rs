use std::fmt;

/// Column-definition kinds recognized by the data-model layer.
///
/// A `ColumnType` is the key the type registry maps to a GraphQL type.
/// Keys compare by plain enum equality; there is no structural matching,
/// so registering a mapping for `Integer` says nothing about `BigInteger`.
///
/// Column kinds that the built-in mapping table does not know arrive as
/// `Custom(name)` and must be registered explicitly before schema
/// construction, otherwise building fails with `UnsupportedFieldType`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ColumnType {
    /// Auto-incrementing 32-bit primary key.
    Auto,
    /// Auto-incrementing 64-bit primary key.
    BigAuto,
    SmallInteger,
    Integer,
    BigInteger,
    PositiveInteger,
    Float,
    Decimal,
    Boolean,
    Char,
    Text,
    Slug,
    Email,
    Url,
    Uuid,
    Date,
    DateTime,
    /// Text column constrained to a fixed choice set.
    TextChoices,
    /// Integer column constrained to a fixed choice set.
    IntegerChoices,
    /// A column kind with no built-in mapping.
    Custom(String),
}

impl ColumnType {
    /// Parse the snake_case column kind used in configuration files.
    ///
    /// Unknown kinds are preserved as `Custom` rather than rejected, so
    /// they can still be satisfied by an explicit registration.
    pub fn parse(s: &str) -> Self {
        match s {
            "auto" => ColumnType::Auto,
            "big_auto" => ColumnType::BigAuto,
            "small_integer" => ColumnType::SmallInteger,
            "integer" => ColumnType::Integer,
            "big_integer" => ColumnType::BigInteger,
            "positive_integer" => ColumnType::PositiveInteger,
            "float" => ColumnType::Float,
            "decimal" => ColumnType::Decimal,
            "boolean" => ColumnType::Boolean,
            "char" => ColumnType::Char,
            "text" => ColumnType::Text,
            "slug" => ColumnType::Slug,
            "email" => ColumnType::Email,
            "url" => ColumnType::Url,
            "uuid" => ColumnType::Uuid,
            "date" => ColumnType::Date,
            "datetime" => ColumnType::DateTime,
            "text_choices" => ColumnType::TextChoices,
            "integer_choices" => ColumnType::IntegerChoices,
            other => ColumnType::Custom(other.to_string()),
        }
    }

    /// The snake_case name used in configuration files and diagnostics.
    pub fn name(&self) -> &str {
        match self {
            ColumnType::Auto => "auto",
            ColumnType::BigAuto => "big_auto",
            ColumnType::SmallInteger => "small_integer",
            ColumnType::Integer => "integer",
            ColumnType::BigInteger => "big_integer",
            ColumnType::PositiveInteger => "positive_integer",
            ColumnType::Float => "float",
            ColumnType::Decimal => "decimal",
            ColumnType::Boolean => "boolean",
            ColumnType::Char => "char",
            ColumnType::Text => "text",
            ColumnType::Slug => "slug",
            ColumnType::Email => "email",
            ColumnType::Url => "url",
            ColumnType::Uuid => "uuid",
            ColumnType::Date => "date",
            ColumnType::DateTime => "datetime",
            ColumnType::TextChoices => "text_choices",
            ColumnType::IntegerChoices => "integer_choices",
            ColumnType::Custom(name) => name,
        }
    }

    /// Auto-assigned primary key kinds.
    pub fn is_auto_key(&self) -> bool {
        matches!(self, ColumnType::Auto | ColumnType::BigAuto)
    }

    /// Choice-constrained kinds eligible for enum wrapping.
    pub fn is_choices(&self) -> bool {
        matches!(self, ColumnType::TextChoices | ColumnType::IntegerChoices)
    }
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
