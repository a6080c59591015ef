//! Plain ledger behaviour: transfers, allowances, deployment surface

mod common;

use common::*;
use lgen_token::TokenError;
use lgen_token::model::{Address, Amount, ExemptStatus, TokenEvent, UNLIMITED_ALLOWANCE};

// ============================================================================
// Deployment
// ============================================================================

#[test]
fn test_deploy_credits_supply_and_sets_roles() {
    let token = deploy(config(1_000_000));

    assert_eq!(token.name(), "Liquidity Generator");
    assert_eq!(token.symbol(), "LGT");
    assert_eq!(token.decimals(), 18);
    assert_eq!(token.total_supply(), units(1_000_000));
    assert_eq!(token.balance_of(owner()), units(1_000_000));
    assert_eq!(token.owner(), owner());
    assert!(token.is_minter(owner()));

    assert_eq!(
        token.events(),
        &[
            TokenEvent::transfer(Address::zero(), owner(), units(1_000_000)),
            TokenEvent::OwnershipTransferred {
                previous_owner: Address::zero(),
                new_owner: owner(),
            },
        ]
    );
}

#[test]
fn test_deploy_wires_the_venue() {
    let token = deploy(config(1_000));

    assert_eq!(token.router(), venue_address());
    assert_eq!(token.default_pair_token(), weth());
    assert!(token.is_weth());
    assert!(token.is_lp_pair(token.lp_pair()));
    assert!(token.amm().pool(token.lp_pair()).is_some());

    // The contract holds reserves and lets the router pull them
    assert_eq!(
        token.is_excluded_from_tax(token.address()),
        ExemptStatus::full()
    );
    assert_eq!(
        token.allowance(token.address(), token.router()),
        UNLIMITED_ALLOWANCE
    );
    assert_eq!(
        token.is_excluded_from_tax(owner()),
        ExemptStatus::new(true, false)
    );

    assert!(!token.tax_enabled());
    assert!(!token.swap_enabled());
    assert!(!token.is_swapping());
    // Default threshold is 0.05% of supply
    assert_eq!(token.swap_threshold(), units(1_000) / 2000);
}

fn venue_address() -> Address {
    addr(0x4000)
}

#[test]
fn test_deploy_rejects_foreign_pair_token() {
    let mut config = config(1_000);
    config.default_pair_token = Some(addr(0xdead));

    let result = lgen_token::LiquidityGenerator::deploy(owner(), config, venue());
    assert!(matches!(result, Err(TokenError::UnsupportedPairToken)));
}

#[test]
fn test_deploy_rejects_rate_above_cap() {
    let mut config = config(1_000);
    config.marketing.on_transfer = 21;

    let result = lgen_token::LiquidityGenerator::deploy(owner(), config, venue());
    assert!(matches!(
        result,
        Err(TokenError::RateTooHigh { rate: 21, .. })
    ));
}

// ============================================================================
// Transfers
// ============================================================================

#[test]
fn test_transfer_moves_exact_amount() {
    let mut token = deploy(config(1_000_000));

    token.transfer(owner(), alice(), units(1)).unwrap();

    assert_eq!(token.balance_of(owner()), units(999_999));
    assert_eq!(token.balance_of(alice()), units(1));
    assert_eq!(
        token.events().last(),
        Some(&TokenEvent::transfer(owner(), alice(), units(1)))
    );
    assert_supply_conserved(&token);
}

#[test]
fn test_transfer_to_zero_address_fails() {
    let mut token = deploy(config(1_000));
    let events = token.events().len();

    let err = token
        .transfer(owner(), Address::zero(), units(1))
        .unwrap_err();

    assert_eq!(err, TokenError::InvalidRecipient);
    assert_eq!(token.balance_of(owner()), units(1_000));
    assert_eq!(token.events().len(), events);
}

#[test]
fn test_transfer_more_than_balance_fails() {
    let mut token = deploy(config(1_000));
    token.transfer(owner(), alice(), units(10)).unwrap();

    let err = token.transfer(alice(), bob(), units(11)).unwrap_err();
    assert_eq!(
        err,
        TokenError::InsufficientBalance {
            have: units(10),
            need: units(11)
        }
    );
    assert_eq!(token.balance_of(alice()), units(10));
    assert!(token.balance_of(bob()).is_zero());
}

#[test]
fn test_zero_amount_transfer_succeeds() {
    let mut token = deploy(config(1_000));
    token.transfer(alice(), bob(), Amount::zero()).unwrap();
    assert_eq!(
        token.events().last(),
        Some(&TokenEvent::transfer(alice(), bob(), Amount::zero()))
    );
}

// ============================================================================
// Allowances
// ============================================================================

#[test]
fn test_transfer_from_respects_allowance() {
    let mut token = deploy(config(1_000_000));

    token.approve(owner(), alice(), units(100)).unwrap();
    assert_eq!(
        token.events().last(),
        Some(&TokenEvent::approval(owner(), alice(), units(100)))
    );

    let err = token
        .transfer_from(alice(), owner(), carol(), units(101))
        .unwrap_err();
    assert!(matches!(err, TokenError::InsufficientAllowance { .. }));
    assert_eq!(token.allowance(owner(), alice()), units(100));

    token
        .transfer_from(alice(), owner(), carol(), units(100))
        .unwrap();
    assert!(token.allowance(owner(), alice()).is_zero());
    assert_eq!(token.balance_of(carol()), units(100));
}

#[test]
fn test_unlimited_allowance_never_decrements() {
    let mut token = deploy(config(1_000_000));
    token
        .approve(owner(), alice(), UNLIMITED_ALLOWANCE)
        .unwrap();

    for _ in 0..5 {
        token
            .transfer_from(alice(), owner(), bob(), units(1_000))
            .unwrap();
    }

    assert_eq!(token.allowance(owner(), alice()), UNLIMITED_ALLOWANCE);
    assert_eq!(token.balance_of(bob()), units(5_000));
}

#[test]
fn test_transfer_from_to_zero_checked_first() {
    let mut token = deploy(config(1_000));

    // No allowance at all, yet the recipient check wins
    let err = token
        .transfer_from(alice(), owner(), Address::zero(), units(1))
        .unwrap_err();
    assert_eq!(err, TokenError::InvalidRecipient);
}

#[test]
fn test_failed_transfer_from_keeps_allowance() {
    let mut token = deploy(config(1_000));
    token.transfer(owner(), bob(), units(5)).unwrap();
    token.approve(bob(), alice(), units(50)).unwrap();

    // Allowance suffices, balance does not
    let err = token
        .transfer_from(alice(), bob(), carol(), units(10))
        .unwrap_err();
    assert!(matches!(err, TokenError::InsufficientBalance { .. }));
    assert_eq!(token.allowance(bob(), alice()), units(50));
}

#[test]
fn test_approve_zero_spender_fails() {
    let mut token = deploy(config(1_000));
    assert_eq!(
        token.approve(owner(), Address::zero(), units(1)),
        Err(TokenError::ZeroAddress)
    );
}
