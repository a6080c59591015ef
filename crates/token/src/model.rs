// Re-export domain types from lgen-core and lgen-ports
pub use lgen_core::{
    Address, Amount, ExemptStatus, FeeBucket, FeeBucketKind, FeeSplit, MAX_TAX_RATE, Percent,
    SwapGuard, TaxCategory, TaxRates, TaxSettings, TokenEvent, UNLIMITED_ALLOWANCE,
};
pub use lgen_ports::{AmmError, AmmRouter, LedgerError, LiquidityProvision, TokenLedger};
