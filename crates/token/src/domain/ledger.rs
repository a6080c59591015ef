use std::collections::HashMap;

use lgen_core::{Address, Amount, UNLIMITED_ALLOWANCE};
use lgen_ports::{LedgerError, LedgerResult};

use crate::error::{Result, TokenError};

/// Balances, allowances and total supply.
///
/// Invariant: the sum of all balances equals `total_supply`.
#[derive(Debug, Clone, Default)]
pub struct Ledger {
    balances: HashMap<Address, Amount>,
    allowances: HashMap<(Address, Address), Amount>,
    total_supply: Amount,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn total_supply(&self) -> Amount {
        self.total_supply
    }

    pub fn balance_of(&self, account: &Address) -> Amount {
        self.balances.get(account).copied().unwrap_or_default()
    }

    pub fn allowance(&self, owner: &Address, spender: &Address) -> Amount {
        self.allowances
            .get(&(*owner, *spender))
            .copied()
            .unwrap_or_default()
    }

    /// Sum over every balance; equals `total_supply` at all times
    pub fn sum_of_balances(&self) -> Amount {
        self.balances
            .values()
            .fold(Amount::zero(), |acc, balance| acc + *balance)
    }

    /// Fail unless `account` holds at least `amount`
    pub fn ensure_balance(&self, account: &Address, amount: Amount) -> LedgerResult<()> {
        let have = self.balance_of(account);
        if have < amount {
            return Err(LedgerError::InsufficientBalance { have, need: amount });
        }
        Ok(())
    }

    pub fn debit(&mut self, account: &Address, amount: Amount) -> LedgerResult<()> {
        self.ensure_balance(account, amount)?;
        if let Some(balance) = self.balances.get_mut(account) {
            *balance -= amount;
        }
        Ok(())
    }

    /// Only called with amounts previously debited or minted within the supply
    pub fn credit(&mut self, account: &Address, amount: Amount) {
        *self.balances.entry(*account).or_default() += amount;
    }

    pub fn approve(&mut self, owner: Address, spender: Address, amount: Amount) {
        self.allowances.insert((owner, spender), amount);
    }

    /// Consume `amount` of the allowance; the unlimited sentinel is never decremented
    pub fn spend_allowance(
        &mut self,
        owner: &Address,
        spender: &Address,
        amount: Amount,
    ) -> LedgerResult<()> {
        let have = self.allowance(owner, spender);
        if have == UNLIMITED_ALLOWANCE {
            return Ok(());
        }
        if have < amount {
            return Err(LedgerError::InsufficientAllowance { have, need: amount });
        }
        self.allowances.insert((*owner, *spender), have - amount);
        Ok(())
    }

    pub fn mint(&mut self, to: &Address, amount: Amount) -> Result<()> {
        let total_supply = self
            .total_supply
            .checked_add(amount)
            .ok_or(TokenError::SupplyOverflow)?;
        self.total_supply = total_supply;
        self.credit(to, amount);
        Ok(())
    }

    pub fn burn(&mut self, from: &Address, amount: Amount) -> LedgerResult<()> {
        self.debit(from, amount)?;
        self.total_supply -= amount;
        Ok(())
    }
}
