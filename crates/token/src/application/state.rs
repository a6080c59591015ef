use lgen_core::{Address, Amount, FeeBucketKind, FeeSplit, SwapGuard, TaxCategory, TokenEvent};
use lgen_ports::{LedgerError, LedgerResult, TokenLedger};
use log::debug;

use crate::config::SupplyPolicy;
use crate::domain::{
    ExemptionStore, Ledger, MinterRoles, Ownable, PairRegistry, TaxEngine, TransferRoute,
};

/// Owner-tunable trigger configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct SwapSettings {
    pub swap_threshold: Amount,
    pub tax_enabled: bool,
    pub swap_enabled: bool,
}

/// Static identity of a deployed token
#[derive(Debug, Clone)]
pub(crate) struct TokenMetadata {
    pub name: String,
    pub symbol: String,
    pub decimals: u8,
    pub address: Address,
    pub supply_policy: SupplyPolicy,
    pub router: Address,
    pub factory: Address,
    pub default_pair_token: Address,
    pub lp_pair: Address,
}

/// What a completed transfer did, as needed by the trigger
#[derive(Debug, Clone, Copy)]
pub(crate) struct TransferOutcome {
    pub category: TaxCategory,
    pub split: FeeSplit,
}

impl TransferOutcome {
    /// Buckets that were credited by this transfer, in processing order
    pub fn credited(&self) -> impl Iterator<Item = FeeBucketKind> + '_ {
        FeeBucketKind::ALL
            .into_iter()
            .filter(move |kind| !self.split.fee(*kind).is_zero())
    }
}

/// Everything the token contract owns; cloned as a checkpoint by every
/// external entry point
#[derive(Debug, Clone)]
pub(crate) struct TokenState {
    pub meta: TokenMetadata,
    pub ledger: Ledger,
    pub pairs: PairRegistry,
    pub exemptions: ExemptionStore,
    pub tax: TaxEngine,
    pub ownable: Ownable,
    pub minters: MinterRoles,
    pub settings: SwapSettings,
    pub guard: SwapGuard,
    pub events: Vec<TokenEvent>,
}

impl TokenState {
    pub fn emit(&mut self, event: TokenEvent) {
        self.events.push(event);
    }

    pub fn is_minter(&self, account: &Address) -> bool {
        *account == self.ownable.owner() || self.minters.contains(account)
    }

    /// Classify, tax and move `amount`. Never fires the trigger.
    pub fn execute_transfer(
        &mut self,
        from: Address,
        to: Address,
        amount: Amount,
    ) -> LedgerResult<TransferOutcome> {
        if to.is_zero() {
            return Err(LedgerError::InvalidRecipient);
        }
        self.ledger.ensure_balance(&from, amount)?;

        let route = TransferRoute::resolve(&self.pairs, &self.exemptions, &from, &to);
        let taxed = self.settings.tax_enabled && !route.exempt && !self.guard.is_swapping();
        let split = if taxed {
            self.tax.assess(amount, route.category)
        } else {
            FeeSplit::untaxed(amount)
        };

        self.ledger.debit(&from, amount)?;
        self.ledger.credit(&to, split.net);
        self.emit(TokenEvent::transfer(from, to, split.net));

        if split.is_taxed() {
            let contract = self.meta.address;
            self.ledger.credit(&contract, split.total_fees());
            self.tax.accrue(&split);
            self.emit(TokenEvent::transfer(from, contract, split.total_fees()));
        }

        debug!(
            "Transfer: from={:?}, to={:?}, category={}, gross={}, net={}, lp_fee={}, marketing_fee={}",
            from, to, route.category, amount, split.net, split.auto_liquidity, split.marketing
        );
        Ok(TransferOutcome {
            category: route.category,
            split,
        })
    }

    /// Spend `spender`'s allowance over `from`, then transfer
    pub fn execute_transfer_from(
        &mut self,
        spender: Address,
        from: Address,
        to: Address,
        amount: Amount,
    ) -> LedgerResult<TransferOutcome> {
        if to.is_zero() {
            return Err(LedgerError::InvalidRecipient);
        }
        self.ledger.spend_allowance(&from, &spender, amount)?;
        self.execute_transfer(from, to, amount)
    }
}

/// Venue re-entry: the AMM moves tokens through the same taxing path
impl TokenLedger for TokenState {
    fn token_address(&self) -> Address {
        self.meta.address
    }

    fn balance_of(&self, account: Address) -> Amount {
        self.ledger.balance_of(&account)
    }

    fn transfer(&mut self, from: Address, to: Address, amount: Amount) -> LedgerResult<()> {
        self.execute_transfer(from, to, amount).map(|_| ())
    }

    fn transfer_from(
        &mut self,
        spender: Address,
        from: Address,
        to: Address,
        amount: Amount,
    ) -> LedgerResult<()> {
        self.execute_transfer_from(spender, from, to, amount)
            .map(|_| ())
    }
}
