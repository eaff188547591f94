//! Transaction receipts and decoding of the rollup-creation result.

use alloy_core::primitives::{Address, B256, Bytes, TxHash, U64};
use alloy_sol_types::SolEvent;
use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::abi::IRollupCreator::RollupCreated;

/// Deserialize a u64 from a hex string (with 0x prefix).
fn deserialize_u64_from_hex<'de, D>(deserializer: D) -> std::result::Result<u64, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s: String = Deserialize::deserialize(deserializer)?;
    u64::from_str_radix(s.trim_start_matches("0x"), 16).map_err(serde::de::Error::custom)
}

/// A log entry emitted by a transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Log {
    pub address: Address,
    pub topics: Vec<B256>,
    pub data: Bytes,
}

/// The subset of `eth_getTransactionReceipt` used by the deployment flow.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionReceipt {
    pub transaction_hash: TxHash,
    #[serde(deserialize_with = "deserialize_u64_from_hex")]
    pub block_number: u64,
    /// `0x1` on success, `0x0` on revert.
    #[serde(default)]
    pub status: Option<U64>,
    #[serde(default)]
    pub logs: Vec<Log>,
}

impl TransactionReceipt {
    /// Whether the transaction executed without reverting.
    pub fn succeeded(&self) -> bool {
        self.status != Some(U64::ZERO)
    }

    /// Decode the addresses of the deployed core contracts from the `RollupCreated` event.
    pub fn core_contracts(&self) -> anyhow::Result<CoreContracts> {
        let log = self
            .logs
            .iter()
            .find(|log| log.topics.first() == Some(&RollupCreated::SIGNATURE_HASH))
            .with_context(|| {
                format!(
                    "RollupCreated event not found in receipt of {}",
                    self.transaction_hash
                )
            })?;

        let event = RollupCreated::decode_raw_log(log.topics.iter().copied(), &log.data)
            .context("Failed to decode RollupCreated event")?;

        Ok(CoreContracts::from_event(&event, self.block_number))
    }
}

/// Addresses of the contracts deployed on the parent chain for a new rollup.
///
/// Field names follow the keys expected in `orbitSetupScriptConfig.json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoreContracts {
    pub rollup: Address,
    pub native_token: Address,
    pub inbox: Address,
    pub outbox: Address,
    pub rollup_event_inbox: Address,
    pub challenge_manager: Address,
    pub admin_proxy: Address,
    pub sequencer_inbox: Address,
    pub bridge: Address,
    pub upgrade_executor: Address,
    pub validator_utils: Address,
    pub validator_wallet_creator: Address,
    pub deployed_at_block_number: u64,
}

impl CoreContracts {
    fn from_event(event: &RollupCreated, block_number: u64) -> Self {
        Self {
            rollup: event.rollupAddress,
            native_token: event.nativeToken,
            inbox: event.inboxAddress,
            outbox: event.outbox,
            rollup_event_inbox: event.rollupEventInbox,
            challenge_manager: event.challengeManager,
            admin_proxy: event.adminProxy,
            sequencer_inbox: event.sequencerInbox,
            bridge: event.bridge,
            upgrade_executor: event.upgradeExecutor,
            validator_utils: event.validatorUtils,
            validator_wallet_creator: event.validatorWalletCreator,
            deployed_at_block_number: block_number,
        }
    }
}

/// Outcome of a confirmed rollup deployment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeploymentResult {
    pub transaction_hash: TxHash,
    pub core_contracts: CoreContracts,
}

impl DeploymentResult {
    /// Build the result from a confirmed receipt.
    ///
    /// Fails if the transaction reverted or the receipt carries no `RollupCreated` event.
    pub fn from_receipt(receipt: &TransactionReceipt) -> anyhow::Result<Self> {
        if !receipt.succeeded() {
            anyhow::bail!(
                "Rollup creation transaction {} reverted",
                receipt.transaction_hash
            );
        }

        Ok(Self {
            transaction_hash: receipt.transaction_hash,
            core_contracts: receipt.core_contracts()?,
        })
    }
}
