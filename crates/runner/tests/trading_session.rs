//! End-to-end session: bootstrap, scripted trading, reporting

use lgen_core::{Address, Amount};
use lgen_runner::{
    SimulationBootstrap, TradeAction, TradingSimulation, load_default_simulation_config,
};
use primitive_types::U256;
use rust_decimal_macros::dec;

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn units(n: u64) -> Amount {
    U256::from(n) * U256::exp10(18)
}

#[test]
fn test_default_session_runs_to_completion() {
    init_logging();
    let mut simulation = TradingSimulation::new().unwrap();

    let results = simulation.run_script();

    assert_eq!(results.total_actions, 8);
    // The last scripted sell exceeds carol's balance
    assert_eq!(results.succeeded, 7);
    assert_eq!(results.failures.len(), 1);
    assert!(results.failures[0].starts_with("#7"));
    assert_eq!(results.buys, 2);
    assert_eq!(results.sells, 2);
    assert_eq!(results.transfers, 3);

    assert!(results.supply_conserved);
    assert!(results.swap_and_liquify_count >= 1);
    assert!(results.marketing_swap_count >= 1);
    assert!(!results.lp_receiver_liquidity.is_zero());
    assert!(!results.marketing_receiver_native.is_zero());
    assert!(results.finished_at >= results.started_at);

    let price = results.spot_price.unwrap();
    assert!(price > dec!(0));
    assert!(price < dec!(0.001));
}

#[test]
fn test_results_serialize_amounts_as_decimal_strings() {
    init_logging();
    let mut simulation = TradingSimulation::new().unwrap();
    let results = simulation.run(&[]);

    let json = serde_json::to_value(&results).unwrap();
    assert_eq!(
        json["total_supply"],
        serde_json::Value::String("1000000000000000000000000000".to_string())
    );
    assert_eq!(json["supply_conserved"], serde_json::Value::Bool(true));
    assert_eq!(json["traders"].as_array().unwrap().len(), 3);
}

#[test]
fn test_plain_transfer_is_taxed_at_transfer_rate() {
    init_logging();
    let config = load_default_simulation_config().unwrap();
    let mut bootstrap = config.bootstrap.clone();
    // Keep the trigger out of the way
    bootstrap.token.swap_enabled = false;
    let mut simulation = TradingSimulation::bootstrap(bootstrap).unwrap();
    let carol = simulation.trader("carol").unwrap();
    let before = simulation.token().balance_of(carol);

    let results = simulation.run(&[TradeAction::Transfer {
        from: "alice".to_string(),
        to: "carol".to_string(),
        tokens: units(1_000),
    }]);

    assert_eq!(results.succeeded, 1);
    // 3% + 3%
    assert_eq!(simulation.token().balance_of(carol) - before, units(940));
    assert_eq!(results.auto_lp_reserves, units(30));
    assert_eq!(results.marketing_reserves, units(30));
    assert_eq!(results.swap_and_liquify_count, 0);
}

#[test]
fn test_unknown_trader_is_a_failed_action() {
    init_logging();
    let mut simulation = TradingSimulation::new().unwrap();

    let results = simulation.run(&[TradeAction::Buy {
        trader: "mallory".to_string(),
        native: units(1),
    }]);

    assert_eq!(results.succeeded, 0);
    assert_eq!(results.failures, vec!["#0: Unknown trader: mallory".to_string()]);
}

#[test]
fn test_bootstrap_deployer_keeps_the_rest_of_supply() {
    init_logging();
    let config = load_default_simulation_config().unwrap();
    let bootstrap = SimulationBootstrap::with_config(config.bootstrap.clone()).unwrap();

    let handed_out = config
        .bootstrap
        .traders
        .iter()
        .fold(config.bootstrap.seed.tokens, |acc, t| acc + t.tokens);
    assert_eq!(
        bootstrap.token.balance_of(bootstrap.deployer),
        config.bootstrap.token.initial_supply - handed_out
    );
    assert_ne!(bootstrap.token.lp_pair(), Address::zero());
}
