use serde::{Deserialize, Serialize};

use crate::values::{Address, Amount};

/// Notifications emitted by the ledger contract
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum TokenEvent {
    /// Balance movement; `from` is null for mints, `to` is null for burns
    Transfer {
        from: Address,
        to: Address,
        amount: Amount,
    },

    Approval {
        owner: Address,
        spender: Address,
        amount: Amount,
    },

    OwnershipTransferred {
        previous_owner: Address,
        new_owner: Address,
    },

    /// Auto-liquidity reserve converted and deposited into the pair
    SwapAndLiquify {
        tokens_swapped: Amount,
        native_received: Amount,
        tokens_into_liquidity: Amount,
        native_into_liquidity: Amount,
        liquidity: Amount,
    },

    /// Marketing reserve sold for the paired asset
    MarketingSwap {
        tokens_swapped: Amount,
        native_sent: Amount,
        recipient: Address,
    },
}

impl TokenEvent {
    pub fn transfer(from: Address, to: Address, amount: Amount) -> Self {
        TokenEvent::Transfer { from, to, amount }
    }

    pub fn approval(owner: Address, spender: Address, amount: Amount) -> Self {
        TokenEvent::Approval {
            owner,
            spender,
            amount,
        }
    }
}
