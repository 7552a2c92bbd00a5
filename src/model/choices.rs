use std::fmt;

use serde_json::Value as JsonValue;

/// The stored value behind a single choice (text choices store strings,
/// integer choices store integers).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChoiceValue {
    Str(String),
    Int(i64),
}

impl ChoiceValue {
    /// The value as it appears in a stored row.
    pub fn to_json(&self) -> JsonValue {
        match self {
            ChoiceValue::Str(s) => JsonValue::String(s.clone()),
            ChoiceValue::Int(i) => JsonValue::Number((*i).into()),
        }
    }

    pub fn matches_json(&self, value: &JsonValue) -> bool {
        match (self, value) {
            (ChoiceValue::Str(s), JsonValue::String(v)) => s == v,
            (ChoiceValue::Int(i), JsonValue::Number(v)) => v.as_i64() == Some(*i),
            _ => false,
        }
    }
}

impl fmt::Display for ChoiceValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChoiceValue::Str(s) => f.write_str(s),
            ChoiceValue::Int(i) => write!(f, "{}", i),
        }
    }
}

/// A single member of a choice set: the GraphQL-facing name plus the
/// raw value stored in rows.
#[derive(Debug, Clone, PartialEq)]
pub struct Choice {
    pub name: String,
    pub value: ChoiceValue,
    pub description: Option<String>,
}

/// A named, fixed set of values a choice column is constrained to.
///
/// The doc text, when present, becomes the description of the GraphQL
/// enum the set is wrapped into.
#[derive(Debug, Clone, PartialEq)]
pub struct ChoiceSet {
    name: String,
    doc: Option<String>,
    variants: Vec<Choice>,
}

impl ChoiceSet {
    pub fn new(name: impl Into<String>, doc: Option<String>, variants: Vec<Choice>) -> Self {
        Self {
            name: name.into(),
            doc,
            variants,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn doc(&self) -> Option<&str> {
        self.doc.as_deref()
    }

    pub fn variants(&self) -> &[Choice] {
        &self.variants
    }

    /// Look a variant up by its GraphQL name.
    pub fn by_name(&self, name: &str) -> Option<&Choice> {
        self.variants.iter().find(|c| c.name == name)
    }

    /// Look a variant up by the raw value found in a stored row.
    pub fn by_stored_value(&self, value: &JsonValue) -> Option<&Choice> {
        self.variants.iter().find(|c| c.value.matches_json(value))
    }
}

/// Strip leading/trailing blank lines and the indentation common to all
/// continuation lines, the way documentation comments are normalized
/// before being used as descriptions.
pub fn cleandoc(doc: &str) -> String {
    let lines: Vec<&str> = doc.lines().collect();
    if lines.is_empty() {
        return String::new();
    }

    // The first line carries no meaningful indentation.
    let first = lines[0].trim();

    let margin = lines[1..]
        .iter()
        .filter(|l| !l.trim().is_empty())
        .map(|l| l.len() - l.trim_start().len())
        .min()
        .unwrap_or(0);

    let mut out: Vec<String> = Vec::with_capacity(lines.len());
    out.push(first.to_string());
    for line in &lines[1..] {
        if line.trim().is_empty() {
            out.push(String::new());
        } else {
            out.push(line[margin..].trim_end().to_string());
        }
    }

    let cleaned = out.join("\n");
    cleaned.trim_matches('\n').to_string()
}
