//! Ledger-level building blocks, free of any AMM concerns

pub mod access;
pub mod classifier;
pub mod ledger;
pub mod tax;

pub use access::{MinterRoles, Ownable};
pub use classifier::{ExemptionStore, PairRegistry, TransferRoute};
pub use ledger::Ledger;
pub use tax::TaxEngine;
