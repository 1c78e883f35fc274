use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use clap::Parser;
use tracing::error;

use evm_network_check::{constants, utils, ConformanceConfig, ConformanceSuite, NetworkCheckError, RpcNetwork};

/// Check a local EVM development network against its expected configuration.
#[derive(Parser, Debug)]
#[command(name = "evm-network-check", version, about)]
struct Args {
    /// Network to check (hardhat, kvtool)
    #[arg(short, long, env = constants::NETWORK_ENV_VAR, default_value = constants::DEFAULT_NETWORK_NAME)]
    network: String,

    /// Path to a JSON network configuration file
    #[arg(short, long, env = constants::CONFIG_ENV_VAR)]
    config: Option<PathBuf>,

    /// Seconds to wait for each transaction receipt
    #[arg(long)]
    timeout_secs: Option<u64>,
}

async fn run(args: Args) -> Result<bool, NetworkCheckError> {
    let config = match &args.config {
        Some(path) => ConformanceConfig::load(path)?,
        None => ConformanceConfig::load_default()?,
    };
    let network_config = config.network(&args.network)?;
    let fixture = config.fixture()?;
    let mut wait = config.wait_policy();
    if let Some(secs) = args.timeout_secs {
        wait.timeout = Duration::from_secs(secs);
    }

    let network = RpcNetwork::connect(&network_config).await?;
    let report = ConformanceSuite::new(network_config, fixture, wait).run(&network).await;
    println!("{}", report);
    Ok(report.is_success())
}

#[tokio::main]
async fn main() -> ExitCode {
    utils::init_tracing();
    let args = Args::parse();

    match run(args).await {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(1),
        Err(e) => {
            error!("{}", e);
            ExitCode::from(2)
        }
    }
}
