//! Liquidity Generator Ports
//!
//! Port definitions (traits) at the seams between the token ledger and the
//! automated market maker it converts reserves through.

mod amm;
mod error;
mod ledger;

pub use amm::{AmmRouter, LiquidityProvision};
pub use error::{AmmError, AmmResult, LedgerError, LedgerResult};
pub use ledger::TokenLedger;
