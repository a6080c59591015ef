// Ledger building blocks
pub mod domain;

// Token contract and liquidity automation
pub mod application;

// Deployment parameters
pub mod config;

// Cross-cutting concerns
pub mod error;
pub mod model;

// Re-export main types for convenience
pub use application::LiquidityGenerator;
pub use config::{BucketConfig, ConfigError, SupplyPolicy, TokenConfig};
pub use error::{ErrorKind, Result, TokenError};
