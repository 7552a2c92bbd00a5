mod types;

pub use types::{
    ChoiceSetConfig, ChoiceValueConfig, ChoiceVariantConfig, Config, FieldConfig, ModelConfig,
    ServerConfig, StoreConfig,
};

use crate::error::{ModelqlError, Result};
use std::fs;

/// Load configuration from a TOML file
pub fn load_config(path: &str) -> Result<Config> {
    let contents = fs::read_to_string(path)
        .map_err(|e| ModelqlError::Config(format!("Failed to read config file '{}': {}", path, e)))?;

    let config: Config = toml::from_str(&contents)?;

    validate_config(&config)?;

    Ok(config)
}

/// Save configuration to a TOML file
pub fn save_config(config: &Config, path: &str) -> Result<()> {
    validate_config(config)?;

    let toml_string = toml::to_string_pretty(config)?;
    fs::write(path, toml_string)
        .map_err(|e| ModelqlError::Config(format!("Failed to write config file '{}': {}", path, e)))?;

    Ok(())
}

fn validate_config(config: &Config) -> Result<()> {
    for model in &config.model {
        model.validate().map_err(ModelqlError::Config)?;
    }

    for choice_set in &config.choices {
        choice_set.validate().map_err(ModelqlError::Config)?;
    }

    Ok(())
}
