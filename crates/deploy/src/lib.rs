//! orbit-launch-deploy - Deployment library for Arbitrum Orbit rollups.
//!
//! This crate launches a rollup on a parent chain through its `RollupCreator`
//! contract and records the deployed contracts in an `orbitSetupScriptConfig.json`
//! manifest.

pub mod abi;
pub mod account;
pub mod chain_config;
pub mod chain_id;
pub mod config;
pub mod manifest;
pub mod parent_chain;
pub mod receipt;
pub mod rollup_config;
pub mod rollup_creator;
pub mod rpc;

mod builder;
pub use builder::DeployerBuilder;

mod deployer;
pub use deployer::{Deployer, DeploymentOutcome};

pub use account::Account;
pub use chain_config::{ChainConfig, ChainConfigParams};
pub use config::{ConfigError, DeployConfig, DeployConfigInput, RollupVariant, SubmissionMode};
pub use manifest::{DEFAULT_MANIFEST_FILENAME, ManifestDefaults, OrbitSetupManifest};
pub use parent_chain::ParentChain;
pub use receipt::{CoreContracts, DeploymentResult, TransactionReceipt};
pub use rollup_config::{RollupConfig, WasmModuleRoot};
pub use rollup_creator::{DeploymentRequest, PreparedTransaction, RollupCreator};
pub use rpc::{HttpParentChainClient, ParentChainClient};
