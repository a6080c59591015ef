//! Liquidity Generator AMM Venue
//!
//! In-memory constant-product venue pairing tokens with wrapped native.
//! Used as the `AmmRouter` collaborator in simulations and tests.

mod pool;
mod router;

pub use pool::{MINIMUM_LIQUIDITY, Pool, get_amount_out, quote};
pub use router::ConstantProductRouter;

// Re-export the ports for convenience
pub use lgen_ports::{AmmError, AmmResult, AmmRouter, LiquidityProvision, TokenLedger};
