//! The `orbitSetupScriptConfig.json` manifest handed to the chain setup tooling.

use std::{
    io::Write,
    path::{Path, PathBuf},
};

use alloy_core::primitives::Address;
use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::receipt::{CoreContracts, DeploymentResult};

/// The default name of the manifest file.
pub const DEFAULT_MANIFEST_FILENAME: &str = "orbitSetupScriptConfig.json";

/// Minimum L2 base fee, 0.1 gwei.
pub const DEFAULT_MIN_L2_BASE_FEE: u64 = 100_000_000;

/// Manifest fields that do not come from the deployment receipt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestDefaults {
    pub min_l2_base_fee: u64,
    pub chain_owner: Address,
    pub network_fee_receiver: Address,
    pub infrastructure_fee_collector: Address,
    pub parent_chain_node_url: String,
    pub parent_chain_id: u64,
    pub chain_name: String,
    pub batch_poster: Address,
    pub chain_id: u64,
    pub staker: Address,
}

/// Deployment outcome in the layout expected by the Orbit setup scripts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrbitSetupManifest {
    pub min_l2_base_fee: u64,
    pub chain_owner: Address,
    pub network_fee_receiver: Address,
    pub infrastructure_fee_collector: Address,
    #[serde(rename = "parent-chain-node-url")]
    pub parent_chain_node_url: String,
    pub parent_chain_id: u64,
    pub chain_name: String,
    pub batch_poster: Address,
    pub chain_id: u64,
    pub staker: Address,
    #[serde(flatten)]
    pub core_contracts: CoreContracts,
    /// Same as `validatorUtils`.
    pub utils: Address,
}

impl OrbitSetupManifest {
    pub fn new(defaults: ManifestDefaults, result: &DeploymentResult) -> Self {
        let core_contracts = result.core_contracts.clone();

        Self {
            min_l2_base_fee: defaults.min_l2_base_fee,
            chain_owner: defaults.chain_owner,
            network_fee_receiver: defaults.network_fee_receiver,
            infrastructure_fee_collector: defaults.infrastructure_fee_collector,
            parent_chain_node_url: defaults.parent_chain_node_url,
            parent_chain_id: defaults.parent_chain_id,
            chain_name: defaults.chain_name,
            batch_poster: defaults.batch_poster,
            chain_id: defaults.chain_id,
            staker: defaults.staker,
            utils: core_contracts.validator_utils,
            core_contracts,
        }
    }

    pub fn to_json_pretty(&self) -> anyhow::Result<String> {
        serde_json::to_string_pretty(self).context("Failed to serialize manifest")
    }

    /// Write the manifest to `path`, replacing any previous file.
    ///
    /// The content goes to a temporary file in the same directory which is then
    /// renamed over `path`, so readers only ever see a complete manifest.
    pub fn write_atomic(&self, path: &Path) -> anyhow::Result<()> {
        let content = self.to_json_pretty()?;

        let file_name = path
            .file_name()
            .with_context(|| format!("Manifest path {} has no file name", path.display()))?;
        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        let tmp_path = dir.join(format!(
            ".{}.{}.tmp",
            file_name.to_string_lossy(),
            std::process::id()
        ));

        let write = || -> anyhow::Result<()> {
            let mut file = std::fs::File::create(&tmp_path)
                .with_context(|| format!("Failed to create {}", tmp_path.display()))?;
            file.write_all(content.as_bytes())
                .and_then(|_| file.write_all(b"\n"))
                .and_then(|_| file.sync_all())
                .with_context(|| format!("Failed to write {}", tmp_path.display()))?;
            std::fs::rename(&tmp_path, path)
                .with_context(|| format!("Failed to move manifest into {}", path.display()))
        };

        if let Err(e) = write() {
            let _ = std::fs::remove_file(&tmp_path);
            return Err(e);
        }

        tracing::info!(path = %path.display(), "Manifest written");
        Ok(())
    }
}
