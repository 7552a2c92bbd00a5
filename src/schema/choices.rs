//! Choice-set wrapping: turning a model's choice set into a GraphQL enum
//! exactly once per schema build.

use std::cell::RefCell;
use std::collections::HashMap;
use std::sync::Arc;

use async_graphql::dynamic::{Enum, EnumItem};

use crate::model::{cleandoc, ChoiceSet};

/// A choice set rendered as a GraphQL enum definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumDef {
    name: String,
    description: Option<String>,
    values: Vec<EnumValueDef>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumValueDef {
    pub name: String,
    pub description: Option<String>,
}

impl EnumDef {
    pub fn from_choice_set(set: &ChoiceSet) -> Self {
        let description = set.doc().map(cleandoc).filter(|d| !d.is_empty());
        let values = set
            .variants()
            .iter()
            .map(|choice| EnumValueDef {
                name: choice.name.clone(),
                description: choice.description.clone(),
            })
            .collect();

        Self {
            name: set.name().to_string(),
            description,
            values,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn values(&self) -> &[EnumValueDef] {
        &self.values
    }

    /// Render as a dynamic schema enum for registration.
    pub fn to_dynamic(&self) -> Enum {
        let mut dynamic_enum = Enum::new(self.name.clone());
        if let Some(desc) = &self.description {
            dynamic_enum = dynamic_enum.description(desc.clone());
        }
        for value in &self.values {
            let mut item = EnumItem::new(value.name.clone());
            if let Some(desc) = &value.description {
                item = item.description(desc.clone());
            }
            dynamic_enum = dynamic_enum.item(item);
        }
        dynamic_enum
    }
}

/// Name-keyed cache of wrapped choice enums.
///
/// Whether choice columns are wrapped at all is decided once, at cache
/// construction, and never re-checked per resolution. Wrapping is
/// idempotent: the same choice set always yields the identical shared
/// definition. The cache is written only during schema construction,
/// which is single-threaded, and read afterwards.
#[derive(Debug)]
pub struct ChoiceEnumCache {
    enabled: bool,
    wrapped: RefCell<HashMap<String, Arc<EnumDef>>>,
}

impl ChoiceEnumCache {
    /// Capability as compiled: wrapping is available iff the `choices`
    /// feature is on.
    pub fn detect() -> Self {
        Self::with_capability(cfg!(feature = "choices"))
    }

    /// Force the capability on or off, letting tests exercise both
    /// branches without a feature matrix.
    pub fn with_capability(enabled: bool) -> Self {
        Self {
            enabled,
            wrapped: RefCell::new(HashMap::new()),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Wrap a choice set, reusing the cached definition when the set was
    /// wrapped before.
    pub fn wrap(&self, set: &ChoiceSet) -> Arc<EnumDef> {
        let mut wrapped = self.wrapped.borrow_mut();
        if let Some(def) = wrapped.get(set.name()) {
            return Arc::clone(def);
        }

        let def = Arc::new(EnumDef::from_choice_set(set));
        wrapped.insert(set.name().to_string(), Arc::clone(&def));
        def
    }

    /// Every enum wrapped so far, for registration into the schema.
    pub fn wrapped_enums(&self) -> Vec<Arc<EnumDef>> {
        let mut enums: Vec<Arc<EnumDef>> = self.wrapped.borrow().values().cloned().collect();
        enums.sort_by(|a, b| a.name().cmp(b.name()));
        enums
    }
}

impl Default for ChoiceEnumCache {
    fn default() -> Self {
        Self::detect()
    }
}
