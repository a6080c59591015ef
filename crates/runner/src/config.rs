use std::path::Path;

use lgen_token::ConfigError;
use serde::{Deserialize, Serialize};

use crate::bootstrap::BootstrapConfig;
use crate::simulation::TradeAction;

/// A full session: how to set up, then what to do
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulationConfig {
    pub bootstrap: BootstrapConfig,
    #[serde(default)]
    pub actions: Vec<TradeAction>,
}

/// Load a session from a JSON file
pub fn load_simulation_config<P: AsRef<Path>>(path: P) -> Result<SimulationConfig, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    load_simulation_config_from_str(&content)
}

/// Load a session from a JSON string; the token part is validated
pub fn load_simulation_config_from_str(json: &str) -> Result<SimulationConfig, ConfigError> {
    let config: SimulationConfig = serde_json::from_str(json)?;
    config
        .bootstrap
        .token
        .validate()
        .map_err(|e| ConfigError::Invalid(e.to_string()))?;
    Ok(config)
}

/// Load the embedded default session
pub fn load_default_simulation_config() -> Result<SimulationConfig, ConfigError> {
    let default_config = include_str!("default_simulation.json");
    load_simulation_config_from_str(default_config)
}
