//! orbit-launch is a CLI tool to launch an Arbitrum Orbit rollup on a parent chain.

mod cli;

use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;

use cli::Cli;
use orbit_launch_deploy::{DeployerBuilder, HttpParentChainClient};

async fn run(cli: Cli) -> Result<()> {
    // Configuration errors surface here, before any network access.
    let config = cli.config_input().validate()?;

    let deployer = DeployerBuilder::new(config).build()?;

    let client = HttpParentChainClient::new(deployer.parent_chain_rpc_url.clone())
        .context("Failed to create parent chain client")?;

    let outcome = deployer.deploy(&client).await?;

    tracing::info!(
        tx_hash = %outcome.result.transaction_hash,
        manifest = %outcome.manifest_path.display(),
        "Deployment complete"
    );

    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize the logger.
    tracing_subscriber::fmt()
        .with_max_level(cli.verbosity)
        .init();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = ?e, "Rollup creation failed");
            ExitCode::FAILURE
        }
    }
}
