//! mintbox deploys the collectible, sale and loot box contracts in dependency order.

mod cli;
mod config;
mod preview;

use anyhow::{Context, Result};
use clap::Parser;

use cli::{Cli, Command, DeployArgs};
use mintbox_deploy::{
    DeployConfig, DeploymentRecord, Orchestrator, RpcDeployer, RpcDeployerConfig,
};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize the logger.
    tracing_subscriber::fmt()
        .with_max_level(cli.verbosity)
        .init();

    let deploy_config = config::load(cli.config.as_deref(), &cli.overrides)?;

    match cli.command {
        Command::Plan => {
            let orchestrator = Orchestrator::new(deploy_config);
            println!("{}", preview::render_plan(&orchestrator));
        }
        Command::Deploy(args) => deploy(deploy_config, args).await?,
    }

    Ok(())
}

async fn deploy(deploy_config: DeployConfig, args: DeployArgs) -> Result<()> {
    tracing::info!(
        network = %deploy_config.network,
        rpc_url = %args.rpc_url,
        artifacts = %args.artifacts.display(),
        "Starting deployment..."
    );

    let mut deployer = RpcDeployer::connect(RpcDeployerConfig {
        rpc_url: args.rpc_url,
        from: args.from,
        artifacts_dir: args.artifacts,
        artifact_names: deploy_config.artifacts.clone(),
        rarity_classes: deploy_config.rarity_classes.clone(),
        confirmation_timeout_secs: args.confirmation_timeout,
    })
    .await
    .context("Failed to connect the deployer")?;

    let outcome = Orchestrator::new(deploy_config).run(&mut deployer).await?;

    for (contract, address) in outcome.contracts.iter() {
        tracing::info!("{contract:<12} {address}");
    }

    DeploymentRecord::new(outcome).save_to_dir(&args.outdata)?;

    Ok(())
}
