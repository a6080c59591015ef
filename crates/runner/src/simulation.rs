//! Simulation - replays a script of trader actions
//!
//! Each action is one atomic call against the token. Failed actions are
//! recorded and the script carries on.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use lgen_core::{Address, Amount, TokenEvent};
use lgen_ports::AmmRouter;
use lgen_token::config::amount;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::bootstrap::{BootstrapConfig, SimulationBootstrap, Token};
use crate::config::SimulationConfig;
use crate::error::RunnerError;

/// One scripted trader action
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum TradeAction {
    /// Spend native on tokens through the pair
    Buy {
        trader: String,
        #[serde(with = "amount")]
        native: Amount,
    },
    /// Sell tokens for native through the pair
    Sell {
        trader: String,
        #[serde(with = "amount")]
        tokens: Amount,
    },
    /// Wallet-to-wallet transfer
    Transfer {
        from: String,
        to: String,
        #[serde(with = "amount")]
        tokens: Amount,
    },
}

/// Closing balances of one trader
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TraderBalance {
    pub name: String,
    pub address: Address,
    #[serde(with = "amount")]
    pub tokens: Amount,
    #[serde(with = "amount")]
    pub native: Amount,
}

/// Simulation results
#[derive(Debug, Clone, Serialize)]
pub struct SimulationResults {
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub total_actions: u64,
    pub succeeded: u64,
    pub buys: u64,
    pub sells: u64,
    pub transfers: u64,
    /// One entry per rejected action
    pub failures: Vec<String>,
    pub swap_and_liquify_count: u64,
    pub marketing_swap_count: u64,
    #[serde(with = "amount")]
    pub auto_lp_reserves: Amount,
    #[serde(with = "amount")]
    pub marketing_reserves: Amount,
    #[serde(with = "amount")]
    pub pool_token_reserve: Amount,
    #[serde(with = "amount")]
    pub pool_native_reserve: Amount,
    /// Native per whole token, from the pool reserves
    pub spot_price: Option<Decimal>,
    /// Liquidity shares held by the auto-liquidity recipient
    #[serde(with = "amount")]
    pub lp_receiver_liquidity: Amount,
    /// Native held by the marketing recipient
    #[serde(with = "amount")]
    pub marketing_receiver_native: Amount,
    #[serde(with = "amount")]
    pub total_supply: Amount,
    /// Sum of balances equals total supply
    pub supply_conserved: bool,
    pub traders: Vec<TraderBalance>,
}

/// Token, venue and named traders for one scripted session
pub struct TradingSimulation {
    token: Token,
    traders: Vec<(String, Address)>,
    index: HashMap<String, Address>,
    actions: Vec<TradeAction>,
}

impl TradingSimulation {
    /// Create a new simulation from the embedded default session
    pub fn new() -> Result<Self, RunnerError> {
        Self::with_config(crate::config::load_default_simulation_config()?)
    }

    pub fn with_config(config: SimulationConfig) -> Result<Self, RunnerError> {
        let mut simulation = Self::bootstrap(config.bootstrap)?;
        simulation.actions = config.actions;
        Ok(simulation)
    }

    /// Set up without a script; actions are passed to `run`
    pub fn bootstrap(config: BootstrapConfig) -> Result<Self, RunnerError> {
        let bootstrap = SimulationBootstrap::with_config(config)?;
        let traders: Vec<(String, Address)> = bootstrap
            .traders
            .iter()
            .map(|t| (t.name.clone(), t.address))
            .collect();
        let index = traders.iter().cloned().collect();
        Ok(Self {
            token: bootstrap.token,
            traders,
            index,
            actions: Vec::new(),
        })
    }

    pub fn token(&self) -> &Token {
        &self.token
    }

    pub fn trader(&self, name: &str) -> Result<Address, RunnerError> {
        self.index
            .get(name)
            .copied()
            .ok_or_else(|| RunnerError::UnknownTrader(name.to_string()))
    }

    /// Run the configured script
    pub fn run_script(&mut self) -> SimulationResults {
        let actions = std::mem::take(&mut self.actions);
        self.run(&actions)
    }

    /// Execute `actions` in order, tolerating individual failures
    pub fn run(&mut self, actions: &[TradeAction]) -> SimulationResults {
        let started_at = Utc::now();
        let first_event = self.token.events().len();
        let mut tally = Tally::default();

        for (i, action) in actions.iter().enumerate() {
            match self.execute(action) {
                Ok(()) => {
                    tally.succeeded += 1;
                    match action {
                        TradeAction::Buy { .. } => tally.buys += 1,
                        TradeAction::Sell { .. } => tally.sells += 1,
                        TradeAction::Transfer { .. } => tally.transfers += 1,
                    }
                }
                Err(e) => {
                    log::warn!("Action {} failed: {:?}: {}", i, action, e);
                    tally.failures.push(format!("#{i}: {e}"));
                }
            }
        }

        let (swap_and_liquify_count, marketing_swap_count) = self.token.events()[first_event..]
            .iter()
            .fold((0, 0), |(liquify, marketing), event| match event {
                TokenEvent::SwapAndLiquify { .. } => (liquify + 1, marketing),
                TokenEvent::MarketingSwap { .. } => (liquify, marketing + 1),
                _ => (liquify, marketing),
            });

        let token = &self.token;
        let venue = token.amm();
        let pair = token.lp_pair();
        let (pool_token_reserve, pool_native_reserve) = venue.reserves(pair).unwrap_or_default();
        let spot_price = spot_price(pool_token_reserve, pool_native_reserve, token.decimals());

        let results = SimulationResults {
            started_at,
            finished_at: Utc::now(),
            total_actions: actions.len() as u64,
            succeeded: tally.succeeded,
            buys: tally.buys,
            sells: tally.sells,
            transfers: tally.transfers,
            failures: tally.failures,
            swap_and_liquify_count,
            marketing_swap_count,
            auto_lp_reserves: token.auto_lp_reserves(),
            marketing_reserves: token.marketing_reserves(),
            pool_token_reserve,
            pool_native_reserve,
            spot_price,
            lp_receiver_liquidity: venue.lp_balance_of(pair, token.auto_liquidity_tax().recipient),
            marketing_receiver_native: venue.native_balance_of(token.marketing_tax().recipient),
            total_supply: token.total_supply(),
            supply_conserved: token.sum_of_balances() == token.total_supply(),
            traders: self
                .traders
                .iter()
                .map(|(name, address)| TraderBalance {
                    name: name.clone(),
                    address: *address,
                    tokens: token.balance_of(*address),
                    native: venue.native_balance_of(*address),
                })
                .collect(),
        };

        log::info!(
            "Session finished: {} of {} actions succeeded, {} liquify, {} marketing swaps",
            results.succeeded,
            results.total_actions,
            results.swap_and_liquify_count,
            results.marketing_swap_count
        );
        results
    }

    fn execute(&mut self, action: &TradeAction) -> Result<(), RunnerError> {
        match action {
            TradeAction::Buy { trader, native } => {
                let buyer = self.trader(trader)?;
                let native = *native;
                let received = self.token.with_amm(|venue, ledger| {
                    venue.swap_native_for_tokens(ledger, buyer, native, Amount::zero(), buyer)
                })?;
                log::debug!("Buy: trader={}, native={}, received={}", trader, native, received);
            }
            TradeAction::Sell { trader, tokens } => {
                let seller = self.trader(trader)?;
                let tokens = *tokens;
                let router = self.token.router();
                self.token.approve(seller, router, tokens)?;
                let native = self.token.with_amm(|venue, ledger| {
                    venue.swap_tokens_for_native(ledger, seller, tokens, Amount::zero(), seller)
                })?;
                log::debug!("Sell: trader={}, tokens={}, native={}", trader, tokens, native);
            }
            TradeAction::Transfer { from, to, tokens } => {
                let sender = self.trader(from)?;
                let recipient = self.trader(to)?;
                self.token.transfer(sender, recipient, *tokens)?;
            }
        }
        Ok(())
    }
}

#[derive(Default)]
struct Tally {
    succeeded: u64,
    buys: u64,
    sells: u64,
    transfers: u64,
    failures: Vec<String>,
}

/// Convert base units to a `Decimal` of whole tokens, if it fits
fn to_decimal(value: Amount, decimals: u8) -> Option<Decimal> {
    if value.bits() > 96 {
        return None;
    }
    let raw = value.low_u128() as i128;
    Decimal::try_from_i128_with_scale(raw, u32::from(decimals)).ok()
}

/// Native per whole token
fn spot_price(token_reserve: Amount, native_reserve: Amount, decimals: u8) -> Option<Decimal> {
    if token_reserve.is_zero() {
        return None;
    }
    let tokens = to_decimal(token_reserve, decimals)?;
    let native = to_decimal(native_reserve, 18)?;
    native.checked_div(tokens).map(|price| price.round_dp(18))
}

#[cfg(test)]
mod tests {
    use super::*;
    use primitive_types::U256;

    #[test]
    fn test_to_decimal() {
        let one = U256::exp10(18);
        assert_eq!(to_decimal(one, 18), Some(Decimal::ONE));
        assert_eq!(
            to_decimal(one * U256::from(5u64) / U256::from(2u64), 18),
            Some(Decimal::new(25, 1))
        );
        assert_eq!(to_decimal(U256::MAX, 18), None);
    }

    #[test]
    fn test_spot_price() {
        let units = |n: u64| U256::from(n) * U256::exp10(18);
        assert_eq!(
            spot_price(units(1_000), units(2), 18),
            Some(Decimal::new(2, 3))
        );
        assert_eq!(spot_price(U256::zero(), units(2), 18), None);
    }
}
