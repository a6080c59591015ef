use serde::{Deserialize, Serialize};

/// Per-address tax exemption flags
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExemptStatus {
    /// Skip taxation when this address sends
    pub from: bool,
    /// Skip taxation when this address receives
    pub to: bool,
}

impl ExemptStatus {
    pub fn new(from: bool, to: bool) -> Self {
        Self { from, to }
    }

    /// Exempt in both directions
    pub fn full() -> Self {
        Self::new(true, true)
    }

    pub fn is_none(&self) -> bool {
        !self.from && !self.to
    }
}
