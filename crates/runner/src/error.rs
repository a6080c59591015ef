use lgen_token::{ConfigError, TokenError};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RunnerError {
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
    #[error("Token error: {0}")]
    Token(#[from] TokenError),
    #[error("Unknown trader: {0}")]
    UnknownTrader(String),
}
