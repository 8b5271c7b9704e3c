//! Sequential deployment orchestration.
//!
//! The [`Orchestrator`] turns a [`DeployConfig`](crate::DeployConfig) into a
//! [`Plan`](crate::Plan) and executes it against any [`ContractDeployer`](crate::ContractDeployer).
//!
//! # Example
//!
//! ```no_run
//! use mintbox_deploy::{DeployConfig, Orchestrator, RpcDeployer, RpcDeployerConfig};
//!
//! # async fn example() -> anyhow::Result<()> {
//! let config = DeployConfig {
//!     network: "rinkeby".to_string(),
//!     lootbox_enabled: true,
//!     ..Default::default()
//! };
//!
//! let mut deployer = RpcDeployer::connect(RpcDeployerConfig::default()).await?;
//! let outcome = Orchestrator::new(config).run(&mut deployer).await?;
//! # Ok(())
//! # }
//! ```

mod runner;
mod state;
mod wiring;

pub use runner::{DeploymentOutcome, Orchestrator};
pub use state::RunState;
