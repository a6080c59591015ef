//! Bootstrap - venue, deployment and trader funding
//!
//! Handles initial setup of the session:
//! - Creating the venue and deploying the token (which creates its pair)
//! - Seeding the pair with the deployer's liquidity
//! - Funding traders with native and tokens

use lgen_amm::ConstantProductRouter;
use lgen_core::{Address, Amount};
use lgen_ports::AmmRouter;
use lgen_token::config::amount;
use lgen_token::{LiquidityGenerator, TokenConfig};
use serde::{Deserialize, Serialize};

use crate::error::RunnerError;

pub type Token = LiquidityGenerator<ConstantProductRouter>;

/// Addresses of the simulated venue
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VenueConfig {
    pub router: Address,
    pub factory: Address,
    pub weth: Address,
}

/// Initial pool deposit made by the deployer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeedLiquidity {
    #[serde(with = "amount")]
    pub tokens: Amount,
    #[serde(with = "amount")]
    pub native: Amount,
}

/// A named trading account and its starting balances
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraderAccount {
    pub name: String,
    pub address: Address,
    #[serde(default, with = "amount")]
    pub native: Amount,
    #[serde(default, with = "amount")]
    pub tokens: Amount,
}

impl TraderAccount {
    pub fn new(name: &str, address: Address, native: Amount, tokens: Amount) -> Self {
        Self {
            name: name.to_string(),
            address,
            native,
            tokens,
        }
    }
}

/// Bootstrap configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BootstrapConfig {
    pub deployer: Address,
    pub token: TokenConfig,
    pub venue: VenueConfig,
    pub seed: SeedLiquidity,
    #[serde(default)]
    pub traders: Vec<TraderAccount>,
}

/// Deployed token on a seeded venue, with funded traders
pub struct SimulationBootstrap {
    pub token: Token,
    pub deployer: Address,
    pub traders: Vec<TraderAccount>,
}

impl SimulationBootstrap {
    /// Bootstrap from the embedded default session
    pub fn new() -> Result<Self, RunnerError> {
        let config = crate::config::load_default_simulation_config()?;
        Self::with_config(config.bootstrap)
    }

    pub fn with_config(config: BootstrapConfig) -> Result<Self, RunnerError> {
        let venue = ConstantProductRouter::new(
            config.venue.router,
            config.venue.factory,
            config.venue.weth,
        );
        let deployer = config.deployer;
        let mut token = LiquidityGenerator::deploy(deployer, config.token, venue)?;

        // Liquidity first so traders have a market
        let seed = config.seed;
        let router = token.router();
        token.approve(deployer, router, seed.tokens)?;
        let provision = token.with_amm(|venue, ledger| {
            venue.deposit_native(deployer, seed.native);
            venue.add_liquidity_native(
                ledger,
                deployer,
                seed.tokens,
                Amount::zero(),
                Amount::zero(),
                seed.native,
                deployer,
            )
        })?;
        log::info!(
            "Seeded pair {:?} with {} tokens and {} native, liquidity {}",
            token.lp_pair(),
            provision.token_amount,
            provision.native_amount,
            provision.liquidity
        );

        for trader in &config.traders {
            if !trader.tokens.is_zero() {
                token.transfer(deployer, trader.address, trader.tokens)?;
            }
            let native = trader.native;
            let address = trader.address;
            token.with_amm(|venue, _| {
                venue.deposit_native(address, native);
                Ok(())
            })?;

            log::info!(
                "Funded trader '{}' at {:?} with {} tokens and {} native",
                trader.name,
                trader.address,
                trader.tokens,
                trader.native
            );
        }

        Ok(Self {
            token,
            deployer,
            traders: config.traders,
        })
    }

    /// Get trader by name
    pub fn get_trader(&self, name: &str) -> Option<&TraderAccount> {
        self.traders.iter().find(|t| t.name == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bootstrap_seeds_pool_and_funds_traders() {
        let bootstrap = SimulationBootstrap::new().unwrap();
        let token = &bootstrap.token;
        let pair = token.lp_pair();

        let (token_reserve, native_reserve) = token.amm().reserves(pair).unwrap();
        assert!(!token_reserve.is_zero());
        assert!(!native_reserve.is_zero());
        assert_eq!(token.balance_of(pair), token_reserve);

        for trader in &bootstrap.traders {
            assert_eq!(token.balance_of(trader.address), trader.tokens);
            assert_eq!(token.amm().native_balance_of(trader.address), trader.native);
        }
        assert_eq!(token.sum_of_balances(), token.total_supply());
    }

    #[test]
    fn test_get_trader() {
        let bootstrap = SimulationBootstrap::new().unwrap();
        assert!(bootstrap.get_trader("alice").is_some());
        assert!(bootstrap.get_trader("mallory").is_none());
    }
}
