use std::collections::HashMap;

use lgen_core::{Address, Amount};
use lgen_ports::{AmmError, AmmResult, AmmRouter, LiquidityProvision, TokenLedger};
use log::debug;

use crate::pool::{Pool, get_amount_out, quote};

/// Leading byte of every pair address
const PAIR_MARKER: u8 = 0xfa;

/// Constant-product router + factory over wrapped-native pairs
///
/// Token balances of pairs live on the token ledger; native balances of
/// accounts and pools live here. Every operation validates against current
/// reserves before touching its own state.
#[derive(Debug, Clone)]
pub struct ConstantProductRouter {
    address: Address,
    factory: Address,
    weth: Address,

    /// Pools keyed by pair address
    pools: HashMap<Address, Pool>,

    /// (token, weth) -> pair address
    pairs: HashMap<(Address, Address), Address>,

    /// Native balances of accounts (pool native is held in the pool)
    native_balances: HashMap<Address, Amount>,
}

impl ConstantProductRouter {
    pub fn new(address: Address, factory: Address, weth: Address) -> Self {
        Self {
            address,
            factory,
            weth,
            pools: HashMap::new(),
            pairs: HashMap::new(),
            native_balances: HashMap::new(),
        }
    }

    /// Credit native to an account (faucet)
    pub fn deposit_native(&mut self, account: Address, amount: Amount) {
        *self.native_balances.entry(account).or_default() += amount;
    }

    pub fn native_balance_of(&self, account: Address) -> Amount {
        self.native_balances
            .get(&account)
            .copied()
            .unwrap_or_default()
    }

    /// Liquidity shares of `account` in `pair`
    pub fn lp_balance_of(&self, pair: Address, account: Address) -> Amount {
        self.pools
            .get(&pair)
            .map(|pool| pool.balance_of(&account))
            .unwrap_or_default()
    }

    pub fn pool(&self, pair: Address) -> Option<&Pool> {
        self.pools.get(&pair)
    }

    /// (token reserve, native reserve) of a pair
    pub fn reserves(&self, pair: Address) -> Option<(Amount, Amount)> {
        self.pools
            .get(&pair)
            .map(|pool| (pool.token_reserve, pool.native_reserve))
    }

    /// Native held by accounts and pools together
    pub fn total_native(&self) -> Amount {
        let held: Amount = self
            .native_balances
            .values()
            .fold(Amount::zero(), |acc, v| acc + *v);
        self.pools
            .values()
            .fold(held, |acc, pool| acc + pool.native_reserve)
    }

    /// Buy tokens with exactly `native_in`, delivered to `to`.
    ///
    /// Supports fee-on-transfer tokens: the slippage bound applies to what
    /// `to` actually received. Returns that amount.
    pub fn swap_native_for_tokens(
        &mut self,
        ledger: &mut dyn TokenLedger,
        sender: Address,
        native_in: Amount,
        amount_out_min: Amount,
        to: Address,
    ) -> AmmResult<Amount> {
        let pair = self.pair_for_ledger(ledger)?;
        let (token_reserve, native_reserve) = self.reserves(pair).ok_or(AmmError::PairNotFound)?;
        self.ensure_native(sender, native_in)?;

        let amount_out = get_amount_out(native_in, native_reserve, token_reserve)?;
        if amount_out.is_zero() {
            return Err(AmmError::InsufficientOutputAmount);
        }

        let before = ledger.balance_of(to);
        ledger.transfer(pair, to, amount_out)?;
        let received = ledger.balance_of(to).saturating_sub(before);
        if received < amount_out_min {
            return Err(AmmError::SlippageExceeded(format!(
                "received {received}, minimum {amount_out_min}"
            )));
        }

        self.debit_native(sender, native_in);
        let token_balance = ledger.balance_of(pair);
        if let Some(pool) = self.pools.get_mut(&pair) {
            pool.sync(token_balance, native_reserve + native_in);
        }

        debug!(
            "Swap native->token: pair={:?}, native_in={}, token_out={}, received={}",
            pair, native_in, amount_out, received
        );
        Ok(received)
    }

    fn pair_for_ledger(&self, ledger: &dyn TokenLedger) -> AmmResult<Address> {
        self.get_pair(ledger.token_address(), self.weth)
            .ok_or(AmmError::PairNotFound)
    }

    fn ensure_native(&self, account: Address, amount: Amount) -> AmmResult<()> {
        let have = self.native_balance_of(account);
        if have < amount {
            return Err(AmmError::InsufficientNativeBalance { have, need: amount });
        }
        Ok(())
    }

    fn debit_native(&mut self, account: Address, amount: Amount) {
        if let Some(balance) = self.native_balances.get_mut(&account) {
            *balance -= amount;
        }
    }

    /// Deterministic pair address: factory ^ token, tagged with the marker
    /// byte and mixed with the creation index
    fn next_pair_address(&self, token: Address) -> Address {
        let mut bytes = (self.factory ^ token).to_fixed_bytes();
        bytes[0] = PAIR_MARKER;
        let index = self.pools.len() as u32 + 1;
        for (byte, mix) in bytes[16..].iter_mut().zip(index.to_be_bytes()) {
            *byte ^= mix;
        }
        Address::from(bytes)
    }

    fn pair_key(&self, token_a: Address, token_b: Address) -> AmmResult<(Address, Address)> {
        if token_a == token_b {
            return Err(AmmError::IdenticalAddresses);
        }
        if token_a.is_zero() || token_b.is_zero() {
            return Err(AmmError::ZeroAddress);
        }
        if token_b == self.weth {
            Ok((token_a, token_b))
        } else if token_a == self.weth {
            Ok((token_b, token_a))
        } else {
            Err(AmmError::UnsupportedPair)
        }
    }
}

impl AmmRouter for ConstantProductRouter {
    fn address(&self) -> Address {
        self.address
    }

    fn factory(&self) -> Address {
        self.factory
    }

    fn weth(&self) -> Address {
        self.weth
    }

    fn get_pair(&self, token_a: Address, token_b: Address) -> Option<Address> {
        let key = self.pair_key(token_a, token_b).ok()?;
        self.pairs.get(&key).copied()
    }

    fn create_pair(&mut self, token_a: Address, token_b: Address) -> AmmResult<Address> {
        let key = self.pair_key(token_a, token_b)?;
        if self.pairs.contains_key(&key) {
            return Err(AmmError::PairExists);
        }

        let pair = self.next_pair_address(key.0);
        self.pools.insert(pair, Pool::new(pair, key.0));
        self.pairs.insert(key, pair);

        debug!("Pair created: token={:?}, pair={:?}", key.0, pair);
        Ok(pair)
    }

    fn quote_tokens_for_native(&self, token: Address, amount_in: Amount) -> AmmResult<Amount> {
        let pair = self.get_pair(token, self.weth).ok_or(AmmError::PairNotFound)?;
        let (token_reserve, native_reserve) = self.reserves(pair).ok_or(AmmError::PairNotFound)?;
        get_amount_out(amount_in, token_reserve, native_reserve)
    }

    fn swap_tokens_for_native(
        &mut self,
        ledger: &mut dyn TokenLedger,
        sender: Address,
        amount_in: Amount,
        amount_out_min: Amount,
        to: Address,
    ) -> AmmResult<Amount> {
        if amount_in.is_zero() {
            return Err(AmmError::InsufficientInputAmount);
        }
        let pair = self.pair_for_ledger(ledger)?;
        let (token_reserve, native_reserve) = self.reserves(pair).ok_or(AmmError::PairNotFound)?;

        ledger.transfer_from(self.address, sender, pair, amount_in)?;

        // Input is what the pair actually received
        let token_balance = ledger.balance_of(pair);
        let received = token_balance.saturating_sub(token_reserve);
        let native_out = get_amount_out(received, token_reserve, native_reserve)?;
        if native_out.is_zero() {
            return Err(AmmError::InsufficientOutputAmount);
        }
        if native_out < amount_out_min {
            return Err(AmmError::SlippageExceeded(format!(
                "output {native_out}, minimum {amount_out_min}"
            )));
        }

        if let Some(pool) = self.pools.get_mut(&pair) {
            pool.sync(token_balance, native_reserve - native_out);
        }
        self.deposit_native(to, native_out);

        debug!(
            "Swap token->native: pair={:?}, token_in={}, native_out={}, to={:?}",
            pair, received, native_out, to
        );
        Ok(native_out)
    }

    fn add_liquidity_native(
        &mut self,
        ledger: &mut dyn TokenLedger,
        sender: Address,
        amount_token_desired: Amount,
        amount_token_min: Amount,
        amount_native_min: Amount,
        native_value: Amount,
        to: Address,
    ) -> AmmResult<LiquidityProvision> {
        let pair = self.pair_for_ledger(ledger)?;
        let (token_reserve, native_reserve) = self.reserves(pair).ok_or(AmmError::PairNotFound)?;

        let (token_amount, native_amount) = if token_reserve.is_zero() && native_reserve.is_zero()
        {
            (amount_token_desired, native_value)
        } else {
            let native_optimal = quote(amount_token_desired, token_reserve, native_reserve)?;
            if native_optimal <= native_value {
                if native_optimal < amount_native_min {
                    return Err(AmmError::SlippageExceeded(
                        "insufficient native amount".to_string(),
                    ));
                }
                (amount_token_desired, native_optimal)
            } else {
                let token_optimal = quote(native_value, native_reserve, token_reserve)?;
                if token_optimal < amount_token_min {
                    return Err(AmmError::SlippageExceeded(
                        "insufficient token amount".to_string(),
                    ));
                }
                (token_optimal, native_value)
            }
        };
        self.ensure_native(sender, native_amount)?;

        ledger.transfer_from(self.address, sender, pair, token_amount)?;

        let token_balance = ledger.balance_of(pair);
        let token_received = token_balance.saturating_sub(token_reserve);
        let pool = self.pools.get(&pair).ok_or(AmmError::PairNotFound)?;
        let liquidity = pool.liquidity_for(token_received, native_amount)?;

        self.debit_native(sender, native_amount);
        if let Some(pool) = self.pools.get_mut(&pair) {
            pool.mint(to, liquidity);
            pool.sync(token_balance, native_reserve + native_amount);
        }

        debug!(
            "Liquidity added: pair={:?}, token={}, native={}, liquidity={}, to={:?}",
            pair, token_received, native_amount, liquidity, to
        );
        Ok(LiquidityProvision {
            token_amount: token_received,
            native_amount,
            liquidity,
        })
    }
}
