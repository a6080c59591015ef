use lgen_core::{Amount, Percent, TaxCategory};
use lgen_ports::{AmmError, LedgerError};
use thiserror::Error;

/// Error taxonomy; failure reasons are diagnostics, callers branch on kind
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Malformed request: null address, rate too high, protected target
    Validation,
    /// Caller lacks the owner or minter role
    Authorization,
    /// Balance or allowance too low
    InsufficientFunds,
    /// The AMM collaborator failed
    External,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TokenError {
    #[error("transfer to the zero address")]
    InvalidRecipient,

    #[error("insufficient balance: have {have}, need {need}")]
    InsufficientBalance { have: Amount, need: Amount },

    #[error("insufficient allowance: have {have}, need {need}")]
    InsufficientAllowance { have: Amount, need: Amount },

    #[error("{category} rate {rate}% exceeds 20%")]
    RateTooHigh { category: TaxCategory, rate: Percent },

    #[error("zero address")]
    ZeroAddress,

    #[error("the token contract's own exemption cannot be changed")]
    ProtectedAddress,

    #[error("caller is not the owner")]
    NotOwner,

    #[error("caller is not a minter")]
    NotMinter,

    #[error("minting is disabled for a fixed-supply token")]
    MintingDisabled,

    #[error("total supply overflow")]
    SupplyOverflow,

    #[error("unsupported default pair token: only the wrapped native token can be paired")]
    UnsupportedPairToken,

    #[error("AMM error: {0}")]
    Amm(AmmError),
}

impl TokenError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            TokenError::InvalidRecipient
            | TokenError::RateTooHigh { .. }
            | TokenError::ZeroAddress
            | TokenError::ProtectedAddress
            | TokenError::MintingDisabled
            | TokenError::SupplyOverflow
            | TokenError::UnsupportedPairToken => ErrorKind::Validation,
            TokenError::NotOwner | TokenError::NotMinter => ErrorKind::Authorization,
            TokenError::InsufficientBalance { .. } | TokenError::InsufficientAllowance { .. } => {
                ErrorKind::InsufficientFunds
            }
            TokenError::Amm(_) => ErrorKind::External,
        }
    }
}

pub type Result<T> = std::result::Result<T, TokenError>;

impl From<LedgerError> for TokenError {
    fn from(err: LedgerError) -> Self {
        match err {
            LedgerError::InvalidRecipient => TokenError::InvalidRecipient,
            LedgerError::InsufficientBalance { have, need } => {
                TokenError::InsufficientBalance { have, need }
            }
            LedgerError::InsufficientAllowance { have, need } => {
                TokenError::InsufficientAllowance { have, need }
            }
        }
    }
}

impl From<AmmError> for TokenError {
    fn from(err: AmmError) -> Self {
        match err {
            // A ledger leg failing inside the venue is still a ledger failure
            AmmError::Ledger(inner) => inner.into(),
            other => TokenError::Amm(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kinds() {
        assert_eq!(TokenError::InvalidRecipient.kind(), ErrorKind::Validation);
        assert_eq!(TokenError::NotOwner.kind(), ErrorKind::Authorization);
        assert_eq!(
            TokenError::InsufficientAllowance {
                have: Amount::zero(),
                need: Amount::one()
            }
            .kind(),
            ErrorKind::InsufficientFunds
        );
        assert_eq!(
            TokenError::Amm(AmmError::InsufficientLiquidity).kind(),
            ErrorKind::External
        );
    }

    #[test]
    fn test_ledger_failure_inside_venue_unwraps() {
        let err: TokenError = AmmError::Ledger(LedgerError::InvalidRecipient).into();
        assert_eq!(err, TokenError::InvalidRecipient);
    }

    #[test]
    fn test_rate_message() {
        let err = TokenError::RateTooHigh {
            category: TaxCategory::Buy,
            rate: 21,
        };
        assert_eq!(err.to_string(), "buy rate 21% exceeds 20%");
    }
}
