//! Operation result output types.
//!
//! Mutations report non-fatal diagnostics back to clients as data using
//! `OperationMessages` rather than as transport-level errors. The shapes
//! here are plain data carriers plus their dynamic schema definitions.

use std::fmt;

use async_graphql::dynamic::{Enum, EnumItem, Field, FieldFuture, FieldValue, Object, TypeRef};
use async_graphql::{Name, Value};
use indexmap::IndexMap;

pub const OPERATION_MESSAGE_KIND: &str = "OperationMessageKind";
pub const OPERATION_MESSAGE: &str = "OperationMessage";
pub const OPERATION_MESSAGES: &str = "OperationMessages";

/// The kind of a returned message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperationMessageKind {
    Info,
    Warning,
    Error,
    Permission,
    Validation,
}

impl OperationMessageKind {
    pub const ALL: [OperationMessageKind; 5] = [
        OperationMessageKind::Info,
        OperationMessageKind::Warning,
        OperationMessageKind::Error,
        OperationMessageKind::Permission,
        OperationMessageKind::Validation,
    ];

    /// Canonical lowercase value.
    pub fn as_str(self) -> &'static str {
        match self {
            OperationMessageKind::Info => "info",
            OperationMessageKind::Warning => "warning",
            OperationMessageKind::Error => "error",
            OperationMessageKind::Permission => "permission",
            OperationMessageKind::Validation => "validation",
        }
    }

    /// Name exposed as the GraphQL enum value.
    pub fn graphql_name(self) -> &'static str {
        match self {
            OperationMessageKind::Info => "INFO",
            OperationMessageKind::Warning => "WARNING",
            OperationMessageKind::Error => "ERROR",
            OperationMessageKind::Permission => "PERMISSION",
            OperationMessageKind::Validation => "VALIDATION",
        }
    }
}

impl fmt::Display for OperationMessageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single message produced by an operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperationMessage {
    pub kind: OperationMessageKind,
    pub message: String,
    /// The input field the message is about, if any.
    pub field: Option<String>,
}

impl OperationMessage {
    pub fn new(kind: OperationMessageKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            field: None,
        }
    }

    pub fn for_field(
        kind: OperationMessageKind,
        message: impl Into<String>,
        field: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            message: message.into(),
            field: Some(field.into()),
        }
    }

    pub fn to_value(&self) -> Value {
        let mut object = IndexMap::new();
        object.insert(
            Name::new("kind"),
            Value::Enum(Name::new(self.kind.graphql_name())),
        );
        object.insert(Name::new("message"), Value::String(self.message.clone()));
        object.insert(
            Name::new("field"),
            match &self.field {
                Some(field) => Value::String(field.clone()),
                None => Value::Null,
            },
        );
        Value::Object(object)
    }
}

/// All messages returned by one operation, in the order they were raised.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OperationMessages {
    pub messages: Vec<OperationMessage>,
}

impl OperationMessages {
    pub fn new(messages: Vec<OperationMessage>) -> Self {
        Self { messages }
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn to_value(&self) -> Value {
        let mut object = IndexMap::new();
        object.insert(
            Name::new("messages"),
            Value::List(self.messages.iter().map(OperationMessage::to_value).collect()),
        );
        Value::Object(object)
    }
}

impl From<Vec<OperationMessage>> for OperationMessages {
    fn from(messages: Vec<OperationMessage>) -> Self {
        Self::new(messages)
    }
}

/// The `OperationMessageKind` enum definition.
pub fn operation_message_kind_enum() -> Enum {
    let mut kind_enum =
        Enum::new(OPERATION_MESSAGE_KIND).description("The kind of the returned message.");
    for kind in OperationMessageKind::ALL {
        kind_enum = kind_enum.item(EnumItem::new(kind.graphql_name()));
    }
    kind_enum
}

/// The `OperationMessage` object definition.
pub fn operation_message_object() -> Object {
    Object::new(OPERATION_MESSAGE)
        .description("An error that happened while executing an operation.")
        .field(
            Field::new(
                "kind",
                TypeRef::named_nn(OPERATION_MESSAGE_KIND),
                |ctx| {
                    FieldFuture::new(async move {
                        Ok(extract(ctx.parent_value.try_downcast_ref::<Value>()?, "kind"))
                    })
                },
            )
            .description("The kind of this message."),
        )
        .field(
            Field::new("message", TypeRef::named_nn(TypeRef::STRING), |ctx| {
                FieldFuture::new(async move {
                    Ok(extract(ctx.parent_value.try_downcast_ref::<Value>()?, "message"))
                })
            })
            .description("The error message."),
        )
        .field(
            Field::new("field", TypeRef::named(TypeRef::STRING), |ctx| {
                FieldFuture::new(async move {
                    Ok(extract(ctx.parent_value.try_downcast_ref::<Value>()?, "field"))
                })
            })
            .description(
                "The field that caused the error, or `null` if it \
                 isn't associated with any particular field.",
            ),
        )
}

/// The `OperationMessages` object definition.
pub fn operation_messages_object() -> Object {
    Object::new(OPERATION_MESSAGES)
        .description("Multiple messages returned by an operation.")
        .field(
            Field::new(
                "messages",
                TypeRef::named_nn_list_nn(OPERATION_MESSAGE),
                |ctx| {
                    FieldFuture::new(async move {
                        let parent = ctx.parent_value.try_downcast_ref::<Value>()?;
                        let items = match parent {
                            Value::Object(object) => match object.get("messages") {
                                Some(Value::List(items)) => items.clone(),
                                _ => Vec::new(),
                            },
                            _ => Vec::new(),
                        };
                        Ok(Some(FieldValue::list(
                            items.into_iter().map(FieldValue::owned_any),
                        )))
                    })
                },
            )
            .description("List of messages returned by the operation."),
        )
}

fn extract(parent: &Value, key: &str) -> Option<FieldValue<'static>> {
    if let Value::Object(object) = parent {
        if let Some(value) = object.get(key) {
            return Some(FieldValue::value(value.clone()));
        }
    }
    Some(FieldValue::value(Value::Null))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_construction_defaults_field_to_none() {
        let message = OperationMessage::new(OperationMessageKind::Error, "bad");
        assert_eq!(message.kind, OperationMessageKind::Error);
        assert_eq!(message.message, "bad");
        assert!(message.field.is_none());
    }

    #[test]
    fn test_message_for_field() {
        let message =
            OperationMessage::for_field(OperationMessageKind::Validation, "required", "title");
        assert_eq!(message.field.as_deref(), Some("title"));
    }

    #[test]
    fn test_kind_strings() {
        assert_eq!(OperationMessageKind::Info.as_str(), "info");
        assert_eq!(OperationMessageKind::Warning.as_str(), "warning");
        assert_eq!(OperationMessageKind::Error.as_str(), "error");
        assert_eq!(OperationMessageKind::Permission.as_str(), "permission");
        assert_eq!(OperationMessageKind::Validation.as_str(), "validation");
    }

    #[test]
    fn test_messages_preserve_insertion_order() {
        let first = OperationMessage::new(OperationMessageKind::Warning, "first");
        let second = OperationMessage::new(OperationMessageKind::Error, "second");
        let messages = OperationMessages::new(vec![first.clone(), second.clone()]);

        assert_eq!(messages.len(), 2);
        assert_eq!(messages.messages[0], first);
        assert_eq!(messages.messages[1], second);
    }

    #[test]
    fn test_empty_messages() {
        let messages = OperationMessages::new(vec![]);
        assert!(messages.is_empty());

        if let Value::Object(object) = messages.to_value() {
            assert_eq!(object.get("messages"), Some(&Value::List(vec![])));
        } else {
            panic!("expected object value");
        }
    }

    #[test]
    fn test_message_to_value_shape() {
        let message = OperationMessage::new(OperationMessageKind::Error, "bad");
        if let Value::Object(object) = message.to_value() {
            assert_eq!(
                object.get("kind"),
                Some(&Value::Enum(Name::new("ERROR")))
            );
            assert_eq!(object.get("message"), Some(&Value::String("bad".to_string())));
            assert_eq!(object.get("field"), Some(&Value::Null));
        } else {
            panic!("expected object value");
        }
    }
}
