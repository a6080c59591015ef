mod category;
mod event;
mod exemption;
mod guard;
mod tax;

pub use category::TaxCategory;
pub use event::TokenEvent;
pub use exemption::ExemptStatus;
pub use guard::SwapGuard;
pub use tax::{FeeBucket, FeeBucketKind, FeeSplit, MAX_TAX_RATE, TaxRates, TaxSettings};
