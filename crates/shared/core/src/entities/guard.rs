use serde::{Deserialize, Serialize};

/// Non-reentrant lock around the liquidity trigger
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SwapGuard {
    #[default]
    Idle,
    Swapping,
}

impl SwapGuard {
    /// idle -> swapping. Returns false if already swapping.
    pub fn enter(&mut self) -> bool {
        match self {
            SwapGuard::Idle => {
                *self = SwapGuard::Swapping;
                true
            }
            SwapGuard::Swapping => false,
        }
    }

    /// swapping -> idle
    pub fn exit(&mut self) {
        *self = SwapGuard::Idle;
    }

    pub fn is_swapping(&self) -> bool {
        matches!(self, SwapGuard::Swapping)
    }
}
