use lgen_runner::{TradingSimulation, load_default_simulation_config, load_simulation_config};

fn print_help() {
    eprintln!(
        r#"Liquidity generator runner - scripted trading session

USAGE:
    lgen-runner [OPTIONS]

OPTIONS:
    --config <PATH>     Load the session (bootstrap + actions) from a JSON file
    --help              Print this help message

ENVIRONMENT VARIABLES:
    RUST_LOG            Log level filter (default: info)

EXAMPLES:
    # Run the embedded default session
    lgen-runner

    # Run a custom session with per-transfer detail
    RUST_LOG=debug lgen-runner --config session.json
"#
    );
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    // Parse command line arguments
    let args: Vec<String> = std::env::args().collect();
    let mut config_path: Option<String> = None;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--help" | "-h" => {
                print_help();
                return Ok(());
            }
            "--config" | "-c" => {
                i += 1;
                if i >= args.len() {
                    eprintln!("Error: --config requires a path argument");
                    std::process::exit(1);
                }
                config_path = Some(args[i].clone());
            }
            arg => {
                eprintln!("Unknown argument: {}", arg);
                print_help();
                std::process::exit(1);
            }
        }
        i += 1;
    }

    let config = match config_path {
        Some(path) => {
            log::info!("Loading session from: {}", path);
            load_simulation_config(&path)?
        }
        None => {
            log::info!("Using the embedded default session");
            load_default_simulation_config()?
        }
    };
    log::info!(
        "Token: {} ({}), traders: {}, actions: {}",
        config.bootstrap.token.name,
        config.bootstrap.token.symbol,
        config.bootstrap.traders.len(),
        config.actions.len()
    );

    let mut simulation = TradingSimulation::with_config(config)?;
    let results = simulation.run_script();

    println!("{}", serde_json::to_string_pretty(&results)?);
    Ok(())
}
