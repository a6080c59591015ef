//! Liquidity Generator Core Domain
//!
//! Pure domain types for the taxed token ledger and its liquidity automation.
//! This crate contains no I/O and is 100% unit testable.

pub mod entities;
pub mod values;

// Re-export commonly used types at crate root
pub use entities::{
    // Classification
    ExemptStatus,
    // Fee types
    FeeBucket,
    FeeBucketKind,
    FeeSplit,
    MAX_TAX_RATE,
    // Guard
    SwapGuard,
    TaxCategory,
    TaxRates,
    TaxSettings,
    // Notifications
    TokenEvent,
};
pub use values::{Address, Amount, Percent, UNLIMITED_ALLOWANCE, percent_of};
