use std::path::Path;
use thiserror::Error;

use super::types::TokenConfig;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Invalid config: {0}")]
    Invalid(String),
}

/// Load and validate a token configuration from a JSON file
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<TokenConfig, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    load_config_from_str(&content)
}

/// Load and validate a token configuration from a JSON string
pub fn load_config_from_str(json: &str) -> Result<TokenConfig, ConfigError> {
    let config: TokenConfig = serde_json::from_str(json)?;
    config
        .validate()
        .map_err(|e| ConfigError::Invalid(e.to_string()))?;
    Ok(config)
}

/// Load the default embedded configuration
pub fn load_default_config() -> Result<TokenConfig, ConfigError> {
    let default_config = include_str!("default_token.json");
    load_config_from_str(default_config)
}
