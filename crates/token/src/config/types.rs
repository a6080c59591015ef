use lgen_core::{Address, Amount, Percent, TaxRates};
use serde::{Deserialize, Serialize};

use crate::error::{Result, TokenError};

/// Whether new tokens can be minted after deployment
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SupplyPolicy {
    Fixed,
    #[default]
    Mintable,
}

/// Rates and proceeds recipient of one fee bucket
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BucketConfig {
    #[serde(default)]
    pub on_buy: Percent,
    #[serde(default)]
    pub on_sell: Percent,
    #[serde(default)]
    pub on_transfer: Percent,
    pub recipient: Address,
}

impl BucketConfig {
    pub fn new(rates: TaxRates, recipient: Address) -> Self {
        Self {
            on_buy: rates.on_buy,
            on_sell: rates.on_sell,
            on_transfer: rates.on_transfer,
            recipient,
        }
    }

    pub fn rates(&self) -> TaxRates {
        TaxRates::new(self.on_buy, self.on_sell, self.on_transfer)
    }
}

/// Deployment parameters of a token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenConfig {
    pub name: String,
    pub symbol: String,
    #[serde(default = "default_decimals")]
    pub decimals: u8,

    /// Credited to the deployer at deployment
    #[serde(with = "super::amount")]
    pub initial_supply: Amount,

    /// Ledger identity of the token contract
    pub address: Address,

    #[serde(default)]
    pub supply_policy: SupplyPolicy,

    pub auto_liquidity: BucketConfig,
    pub marketing: BucketConfig,

    /// Defaults to 0.05% of the initial supply
    #[serde(default, with = "super::amount::option")]
    pub swap_threshold: Option<Amount>,

    /// Defaults to the router's wrapped native token
    #[serde(default)]
    pub default_pair_token: Option<Address>,

    #[serde(default)]
    pub tax_enabled: bool,
    #[serde(default)]
    pub swap_enabled: bool,
}

fn default_decimals() -> u8 {
    18
}

impl TokenConfig {
    pub fn swap_threshold_or_default(&self) -> Amount {
        self.swap_threshold
            .unwrap_or_else(|| self.initial_supply / 2000)
    }

    /// Check rates against the cap and reject null addresses
    pub fn validate(&self) -> Result<()> {
        if self.address.is_zero() {
            return Err(TokenError::ZeroAddress);
        }
        for bucket in [&self.auto_liquidity, &self.marketing] {
            bucket
                .rates()
                .validate()
                .map_err(|(category, rate)| TokenError::RateTooHigh { category, rate })?;
            if bucket.recipient.is_zero() {
                return Err(TokenError::ZeroAddress);
            }
        }
        Ok(())
    }
}
