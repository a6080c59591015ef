use lgen_core::{Address, Amount};

use crate::error::LedgerResult;

/// Port for venues moving the token
///
/// An AMM call-out made by the token re-enters the ledger through this
/// trait. Movements made here go through classification and taxation like
/// any other transfer, but never fire the liquidity trigger themselves.
pub trait TokenLedger {
    /// Address of the token contract
    fn token_address(&self) -> Address;

    /// Current balance of `account`
    fn balance_of(&self, account: Address) -> Amount;

    /// Move `amount` from `from` (the caller) to `to`
    fn transfer(&mut self, from: Address, to: Address, amount: Amount) -> LedgerResult<()>;

    /// Move `amount` from `from` to `to`, spending `spender`'s allowance
    fn transfer_from(
        &mut self,
        spender: Address,
        from: Address,
        to: Address,
        amount: Amount,
    ) -> LedgerResult<()>;
}
