//! Liquidity generator runner - scripted trading session
//!
//! Wires the token to the simulated constant-product venue and replays a
//! script of trader actions against it:
//!
//! - **Config**: bootstrap parameters and the action script, from JSON
//! - **Bootstrap**: venue, deployment, seed liquidity and trader funding
//! - **Simulation**: executes the script and reports the outcome
//!
//! ## Flow
//!
//! ```text
//!   trader actions (buy / sell / transfer)
//!                 │
//!                 ▼
//!   ┌────────────────────┐    call-out     ┌──────────────────┐
//!   │ LiquidityGenerator │ ──────────────▶ │ ConstantProduct  │
//!   │  classify → tax →  │                 │ Router (venue)   │
//!   │  move → trigger    │ ◀────────────── │                  │
//!   └────────────────────┘  ledger re-entry└──────────────────┘
//! ```

pub mod bootstrap;
pub mod config;
pub mod error;
pub mod simulation;

// Re-export main types
pub use bootstrap::{
    BootstrapConfig, SeedLiquidity, SimulationBootstrap, TraderAccount, VenueConfig,
};
pub use config::{
    SimulationConfig, load_default_simulation_config, load_simulation_config,
    load_simulation_config_from_str,
};
pub use error::RunnerError;
pub use simulation::{SimulationResults, TradeAction, TradingSimulation};
