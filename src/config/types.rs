use serde::{Deserialize, Serialize};

/// Top-level configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub store: StoreConfig,

    pub model: Vec<ModelConfig>,

    /// Choice sets referenced by `text_choices`/`integer_choices` fields.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub choices: Vec<ChoiceSetConfig>,
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Port to bind the server to
    #[serde(default = "default_port")]
    pub port: u16,

    /// Interface to bind the server to
    #[serde(default = "default_bind")]
    pub bind: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
            bind: default_bind(),
        }
    }
}

fn default_port() -> u16 {
    4000
}

fn default_bind() -> String {
    "0.0.0.0".to_string()
}

/// Row-store configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Directory holding one `<table>.json` seed file per model
    #[serde(default = "default_data_dir")]
    pub data_dir: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
        }
    }
}

fn default_data_dir() -> String {
    "data".to_string()
}

/// Model (table) configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelConfig {
    /// GraphQL type name (PascalCase)
    pub name: String,

    /// Backing table name in the store
    pub table: String,

    /// Primary key field name
    pub primary_key: String,

    /// Optional description for GraphQL schema
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    pub field: Vec<FieldConfig>,
}

/// A single column of a model
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldConfig {
    pub name: String,

    /// Column kind in snake_case (e.g. "big_auto", "char", "text_choices")
    pub column: String,

    #[serde(default)]
    pub nullable: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Name of the choice set backing a choices column
    #[serde(skip_serializing_if = "Option::is_none")]
    pub choices: Option<String>,
}

/// A named choice set
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChoiceSetConfig {
    /// GraphQL enum name (PascalCase)
    pub name: String,

    /// Documentation text; becomes the enum description after indentation
    /// cleanup
    #[serde(skip_serializing_if = "Option::is_none")]
    pub doc: Option<String>,

    pub variant: Vec<ChoiceVariantConfig>,
}

/// One member of a choice set
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChoiceVariantConfig {
    /// GraphQL enum value name (UPPER_SNAKE_CASE)
    pub name: String,

    /// Raw value stored in rows (string or integer)
    pub value: ChoiceValueConfig,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Stored value of a choice variant
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ChoiceValueConfig {
    Int(i64),
    Str(String),
}

impl ModelConfig {
    /// Validate model configuration
    pub fn validate(&self) -> Result<(), String> {
        if !self.name.chars().all(|c| c.is_alphanumeric()) {
            return Err(format!("GraphQL name '{}' must be alphanumeric", self.name));
        }

        if !self.name.chars().next().unwrap_or('_').is_uppercase() {
            return Err(format!(
                "GraphQL name '{}' must start with uppercase letter (PascalCase)",
                self.name
            ));
        }

        if self.table.is_empty() {
            return Err(format!("Model '{}' has an empty table name", self.name));
        }

        if self.field.is_empty() {
            return Err(format!("Model '{}' defines no fields", self.name));
        }

        if !self.field.iter().any(|f| f.name == self.primary_key) {
            return Err(format!(
                "Primary key '{}' is not a field of model '{}'",
                self.primary_key, self.name
            ));
        }

        Ok(())
    }
}

impl ChoiceSetConfig {
    /// Validate choice set configuration
    pub fn validate(&self) -> Result<(), String> {
        if !self.name.chars().all(|c| c.is_alphanumeric()) {
            return Err(format!("Choice set name '{}' must be alphanumeric", self.name));
        }

        if !self.name.chars().next().unwrap_or('_').is_uppercase() {
            return Err(format!(
                "Choice set name '{}' must start with uppercase letter (PascalCase)",
                self.name
            ));
        }

        if self.variant.is_empty() {
            return Err(format!("Choice set '{}' has no variants", self.name));
        }

        for variant in &self.variant {
            let mut chars = variant.name.chars();
            let valid_start = chars.next().is_some_and(|c| c.is_ascii_uppercase());
            let valid_rest = variant
                .name
                .chars()
                .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit() || c == '_');
            if !valid_start || !valid_rest {
                return Err(format!(
                    "Variant '{}' of choice set '{}' must be UPPER_SNAKE_CASE",
                    variant.name, self.name
                ));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn article_model() -> ModelConfig {
        ModelConfig {
            name: "Article".to_string(),
            table: "articles".to_string(),
            primary_key: "id".to_string(),
            description: None,
            field: vec![FieldConfig {
                name: "id".to_string(),
                column: "big_auto".to_string(),
                nullable: false,
                description: None,
                choices: None,
            }],
        }
    }

    #[test]
    fn test_model_validation_valid() {
        assert!(article_model().validate().is_ok());
    }

    #[test]
    fn test_model_validation_lowercase_name() {
        let mut model = article_model();
        model.name = "article".to_string();
        assert!(model.validate().is_err());
    }

    #[test]
    fn test_model_validation_non_alphanumeric_name() {
        let mut model = article_model();
        model.name = "Article-Type".to_string();
        assert!(model.validate().is_err());
    }

    #[test]
    fn test_model_validation_unknown_primary_key() {
        let mut model = article_model();
        model.primary_key = "uuid".to_string();
        assert!(model.validate().is_err());
    }

    #[test]
    fn test_model_validation_no_fields() {
        let mut model = article_model();
        model.field.clear();
        assert!(model.validate().is_err());
    }

    #[test]
    fn test_choice_set_validation() {
        let set = ChoiceSetConfig {
            name: "ArticleStatus".to_string(),
            doc: None,
            variant: vec![ChoiceVariantConfig {
                name: "DRAFT".to_string(),
                value: ChoiceValueConfig::Str("draft".to_string()),
                description: None,
            }],
        };
        assert!(set.validate().is_ok());
    }

    #[test]
    fn test_choice_set_validation_bad_variant_name() {
        let set = ChoiceSetConfig {
            name: "ArticleStatus".to_string(),
            doc: None,
            variant: vec![ChoiceVariantConfig {
                name: "draft".to_string(),
                value: ChoiceValueConfig::Str("draft".to_string()),
                description: None,
            }],
        };
        assert!(set.validate().is_err());
    }

    #[test]
    fn test_choice_set_validation_empty() {
        let set = ChoiceSetConfig {
            name: "ArticleStatus".to_string(),
            doc: None,
            variant: vec![],
        };
        assert!(set.validate().is_err());
    }

    #[test]
    fn test_choice_value_config_untagged() {
        let parsed: ChoiceVariantConfig =
            toml::from_str("name = \"HIGH\"\nvalue = 3\n").unwrap();
        assert!(matches!(parsed.value, ChoiceValueConfig::Int(3)));

        let parsed: ChoiceVariantConfig =
            toml::from_str("name = \"DRAFT\"\nvalue = \"draft\"\n").unwrap();
        assert!(matches!(parsed.value, ChoiceValueConfig::Str(ref s) if s == "draft"));
    }
}
