use lgen_core::{Address, Amount};

use crate::error::AmmResult;
use crate::ledger::TokenLedger;

/// Amounts actually deposited by an add-liquidity call
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LiquidityProvision {
    pub token_amount: Amount,
    pub native_amount: Amount,
    pub liquidity: Amount,
}

/// Port for the automated market maker the token converts reserves through
///
/// Implementations must be atomic per call: either the whole operation
/// takes effect or an error is returned with no venue state changed.
/// The ledger is passed in so the venue can pull and push tokens; it is
/// the same ledger that is executing the call-out.
pub trait AmmRouter {
    /// Router address (the spender the token approves)
    fn address(&self) -> Address;

    /// Factory that creates pairs
    fn factory(&self) -> Address;

    /// Wrapped native token used as the paired asset
    fn weth(&self) -> Address;

    /// Look up the pair for two tokens
    fn get_pair(&self, token_a: Address, token_b: Address) -> Option<Address>;

    /// Create the pair for two tokens
    fn create_pair(&mut self, token_a: Address, token_b: Address) -> AmmResult<Address>;

    /// Native a sale of `amount_in` tokens would pay out at current reserves
    fn quote_tokens_for_native(&self, token: Address, amount_in: Amount) -> AmmResult<Amount>;

    /// Sell exactly `amount_in` tokens of `sender` for native, sent to `to`.
    ///
    /// Supports fee-on-transfer tokens: the input is measured from what the
    /// pair actually received. Returns the native amount paid out.
    fn swap_tokens_for_native(
        &mut self,
        ledger: &mut dyn TokenLedger,
        sender: Address,
        amount_in: Amount,
        amount_out_min: Amount,
        to: Address,
    ) -> AmmResult<Amount>;

    /// Deposit tokens of `sender` plus up to `native_value` of its native
    /// balance; liquidity shares are credited to `to`.
    #[allow(clippy::too_many_arguments)]
    fn add_liquidity_native(
        &mut self,
        ledger: &mut dyn TokenLedger,
        sender: Address,
        amount_token_desired: Amount,
        amount_token_min: Amount,
        amount_native_min: Amount,
        native_value: Amount,
        to: Address,
    ) -> AmmResult<LiquidityProvision>;
}
