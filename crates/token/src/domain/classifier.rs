use std::collections::{HashMap, HashSet};

use lgen_core::{Address, ExemptStatus, TaxCategory};

/// Addresses registered as liquidity pairs
#[derive(Debug, Clone, Default)]
pub struct PairRegistry {
    pairs: HashSet<Address>,
}

impl PairRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, account: &Address) -> bool {
        self.pairs.contains(account)
    }

    pub fn set(&mut self, account: Address, is_pair: bool) {
        if is_pair {
            self.pairs.insert(account);
        } else {
            self.pairs.remove(&account);
        }
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

/// Per-address exemption flags; unknown addresses are not exempt
#[derive(Debug, Clone, Default)]
pub struct ExemptionStore {
    flags: HashMap<Address, ExemptStatus>,
}

impl ExemptionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, account: &Address) -> ExemptStatus {
        self.flags.get(account).copied().unwrap_or_default()
    }

    pub fn set(&mut self, account: Address, status: ExemptStatus) {
        if status.is_none() {
            self.flags.remove(&account);
        } else {
            self.flags.insert(account, status);
        }
    }

    pub fn set_from(&mut self, account: Address, exempt: bool) {
        let mut status = self.get(&account);
        status.from = exempt;
        self.set(account, status);
    }

    /// Exempt when the sender is exempt-from or the recipient is exempt-to
    pub fn covers(&self, from: &Address, to: &Address) -> bool {
        self.get(from).from || self.get(to).to
    }
}

/// How a single transfer is to be taxed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransferRoute {
    pub category: TaxCategory,
    pub exempt: bool,
}

impl TransferRoute {
    pub fn resolve(
        pairs: &PairRegistry,
        exemptions: &ExemptionStore,
        from: &Address,
        to: &Address,
    ) -> Self {
        Self {
            category: TaxCategory::classify(pairs.contains(from), pairs.contains(to)),
            exempt: exemptions.covers(from, to),
        }
    }
}
