use lgen_core::Amount;
use thiserror::Error;

/// Failures of a balance movement on the token ledger
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LedgerError {
    #[error("transfer to the zero address")]
    InvalidRecipient,

    #[error("insufficient balance: have {have}, need {need}")]
    InsufficientBalance { have: Amount, need: Amount },

    #[error("insufficient allowance: have {have}, need {need}")]
    InsufficientAllowance { have: Amount, need: Amount },
}

pub type LedgerResult<T> = std::result::Result<T, LedgerError>;

/// Failures raised by an AMM venue
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AmmError {
    #[error("ledger rejected a venue transfer: {0}")]
    Ledger(#[from] LedgerError),

    #[error("identical addresses")]
    IdenticalAddresses,

    #[error("zero address")]
    ZeroAddress,

    #[error("pair already exists")]
    PairExists,

    #[error("pair not found")]
    PairNotFound,

    #[error("only wrapped-native pairs are supported")]
    UnsupportedPair,

    #[error("insufficient input amount")]
    InsufficientInputAmount,

    #[error("insufficient output amount")]
    InsufficientOutputAmount,

    #[error("insufficient liquidity")]
    InsufficientLiquidity,

    #[error("insufficient liquidity minted")]
    InsufficientLiquidityMinted,

    #[error("insufficient native balance: have {have}, need {need}")]
    InsufficientNativeBalance { have: Amount, need: Amount },

    #[error("slippage exceeded: {0}")]
    SlippageExceeded(String),

    #[error("arithmetic overflow")]
    Overflow,
}

pub type AmmResult<T> = std::result::Result<T, AmmError>;
