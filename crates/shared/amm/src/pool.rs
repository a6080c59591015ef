use std::collections::HashMap;

use lgen_core::{Address, Amount};
use lgen_ports::{AmmError, AmmResult};
use primitive_types::{U256, U512};

/// Liquidity shares locked forever on the first deposit
pub const MINIMUM_LIQUIDITY: u64 = 1_000;

/// Swap fee: 0.3% of the input stays in the pool
const FEE_NUMERATOR: u64 = 997;
const FEE_DENOMINATOR: u64 = 1_000;

fn narrow(value: U512) -> AmmResult<Amount> {
    U256::try_from(value).map_err(|_| AmmError::Overflow)
}

/// Constant-product output for an exact input, after the swap fee
pub fn get_amount_out(
    amount_in: Amount,
    reserve_in: Amount,
    reserve_out: Amount,
) -> AmmResult<Amount> {
    if amount_in.is_zero() {
        return Err(AmmError::InsufficientInputAmount);
    }
    if reserve_in.is_zero() || reserve_out.is_zero() {
        return Err(AmmError::InsufficientLiquidity);
    }

    let amount_in_with_fee = amount_in.full_mul(U256::from(FEE_NUMERATOR));
    let numerator = amount_in_with_fee
        .checked_mul(U512::from(reserve_out))
        .ok_or(AmmError::Overflow)?;
    let denominator = reserve_in
        .full_mul(U256::from(FEE_DENOMINATOR))
        .checked_add(amount_in_with_fee)
        .ok_or(AmmError::Overflow)?;

    narrow(numerator / denominator)
}

/// Amount of B equivalent to `amount_a` at the current reserve ratio
pub fn quote(amount_a: Amount, reserve_a: Amount, reserve_b: Amount) -> AmmResult<Amount> {
    if amount_a.is_zero() {
        return Err(AmmError::InsufficientInputAmount);
    }
    if reserve_a.is_zero() || reserve_b.is_zero() {
        return Err(AmmError::InsufficientLiquidity);
    }
    narrow(amount_a.full_mul(reserve_b) / U512::from(reserve_a))
}

/// A token / wrapped-native pool with its liquidity share ledger
#[derive(Debug, Clone)]
pub struct Pool {
    /// Pair address (holds the token balance on the token ledger)
    pub address: Address,

    /// The non-native side
    pub token: Address,

    /// Token balance of the pair as of the last sync
    pub token_reserve: Amount,

    /// Native held by the pool
    pub native_reserve: Amount,

    /// Outstanding liquidity shares
    pub total_supply: Amount,

    shares: HashMap<Address, Amount>,
}

impl Pool {
    pub fn new(address: Address, token: Address) -> Self {
        Self {
            address,
            token,
            token_reserve: Amount::zero(),
            native_reserve: Amount::zero(),
            total_supply: Amount::zero(),
            shares: HashMap::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.total_supply.is_zero()
    }

    /// Liquidity shares held by `account`
    pub fn balance_of(&self, account: &Address) -> Amount {
        self.shares.get(account).copied().unwrap_or_default()
    }

    /// Shares minted for depositing the given amounts; does not mutate
    pub fn liquidity_for(&self, token_in: Amount, native_in: Amount) -> AmmResult<Amount> {
        let liquidity = if self.is_empty() {
            let root = narrow(token_in.full_mul(native_in).integer_sqrt())?;
            root.checked_sub(U256::from(MINIMUM_LIQUIDITY))
                .ok_or(AmmError::InsufficientLiquidityMinted)?
        } else {
            let by_token =
                narrow(token_in.full_mul(self.total_supply) / U512::from(self.token_reserve))?;
            let by_native =
                narrow(native_in.full_mul(self.total_supply) / U512::from(self.native_reserve))?;
            by_token.min(by_native)
        };

        if liquidity.is_zero() {
            return Err(AmmError::InsufficientLiquidityMinted);
        }
        Ok(liquidity)
    }

    /// Credit shares to `to`, locking the minimum on the first deposit
    pub fn mint(&mut self, to: Address, liquidity: Amount) {
        if self.is_empty() {
            let locked = U256::from(MINIMUM_LIQUIDITY);
            *self.shares.entry(Address::zero()).or_default() += locked;
            self.total_supply += locked;
        }
        *self.shares.entry(to).or_default() += liquidity;
        self.total_supply += liquidity;
    }

    /// Record new reserves after a swap or deposit
    pub fn sync(&mut self, token_reserve: Amount, native_reserve: Amount) {
        self.token_reserve = token_reserve;
        self.native_reserve = native_reserve;
    }
}
