#![allow(dead_code)]

use lgen_amm::ConstantProductRouter;
use lgen_token::model::{Address, Amount, AmmRouter, TaxRates};
use lgen_token::{BucketConfig, LiquidityGenerator, SupplyPolicy, TokenConfig};
use primitive_types::U256;

pub type Token = LiquidityGenerator<ConstantProductRouter>;

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

pub fn addr(n: u64) -> Address {
    Address::from_low_u64_be(n)
}

pub fn owner() -> Address {
    addr(0x0a)
}

pub fn alice() -> Address {
    addr(0xa1)
}

pub fn bob() -> Address {
    addr(0xb0)
}

pub fn carol() -> Address {
    addr(0xc0)
}

pub fn token_address() -> Address {
    addr(0x71c0)
}

pub fn lp_receiver() -> Address {
    addr(0x1001)
}

pub fn marketing_receiver() -> Address {
    addr(0x1002)
}

pub fn weth() -> Address {
    addr(0xeeee)
}

/// Whole tokens with 18 decimals
pub fn units(n: u64) -> Amount {
    U256::from(n) * U256::exp10(18)
}

/// Untaxed, non-swapping token with the given supply in whole units
pub fn config(supply: u64) -> TokenConfig {
    TokenConfig {
        name: "Liquidity Generator".to_string(),
        symbol: "LGT".to_string(),
        decimals: 18,
        initial_supply: units(supply),
        address: token_address(),
        supply_policy: SupplyPolicy::Mintable,
        auto_liquidity: BucketConfig::new(TaxRates::default(), lp_receiver()),
        marketing: BucketConfig::new(TaxRates::default(), marketing_receiver()),
        swap_threshold: None,
        default_pair_token: None,
        tax_enabled: false,
        swap_enabled: false,
    }
}

pub fn venue() -> ConstantProductRouter {
    ConstantProductRouter::new(addr(0x4000), addr(0xfac7), weth())
}

pub fn deploy(config: TokenConfig) -> Token {
    init_logging();
    LiquidityGenerator::deploy(owner(), config, venue()).unwrap()
}

/// Token with both buckets taxing plain transfers at `rate` percent
pub fn taxed_token(supply: u64, rate: u8) -> Token {
    let mut config = config(supply);
    config.auto_liquidity = BucketConfig::new(TaxRates::new(rate, rate, rate), lp_receiver());
    config.marketing = BucketConfig::new(TaxRates::new(rate, rate, rate), marketing_receiver());
    config.tax_enabled = true;
    deploy(config)
}

/// Owner deposits `tokens` + `native` into the token's pair
pub fn seed_liquidity(token: &mut Token, tokens: Amount, native: Amount) {
    let owner = owner();
    let router = token.router();
    token.approve(owner, router, tokens).unwrap();
    token
        .with_amm(|venue, ledger| {
            venue.deposit_native(owner, native);
            venue.add_liquidity_native(
                ledger,
                owner,
                tokens,
                Amount::zero(),
                Amount::zero(),
                native,
                owner,
            )
        })
        .unwrap();
}

/// Buy tokens for `native`, credited to `buyer`
pub fn buy(token: &mut Token, buyer: Address, native: Amount) -> lgen_token::Result<Amount> {
    token.with_amm(|venue, ledger| {
        venue.deposit_native(buyer, native);
        venue.swap_native_for_tokens(ledger, buyer, native, Amount::zero(), buyer)
    })
}

/// Sell `amount` tokens of `seller` for native
pub fn sell(token: &mut Token, seller: Address, amount: Amount) -> lgen_token::Result<Amount> {
    let router = token.router();
    token.approve(seller, router, amount)?;
    token.with_amm(|venue, ledger| {
        venue.swap_tokens_for_native(ledger, seller, amount, Amount::zero(), seller)
    })
}

pub fn assert_supply_conserved(token: &Token) {
    assert_eq!(token.sum_of_balances(), token.total_supply());
}
