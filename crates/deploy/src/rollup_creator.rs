//! Rollup creation through the parent chain's `RollupCreator` contract.
//!
//! [`RollupCreator::create_rollup`] runs the whole submission in one call. The
//! individual steps ([`RollupCreator::prepare_transaction_request`],
//! [`Account::sign_transaction`], [`RollupCreator::send_raw_transaction`] and
//! [`RollupCreator::wait_for_receipt`]) are public so callers can drive the
//! submission themselves.

use std::time::Duration;

use alloy_consensus::TxEip1559;
use alloy_core::primitives::{Address, Bytes, TxHash, TxKind, U256};
use alloy_sol_types::SolCall;
use anyhow::Context;

use crate::{
    abi::{self, IERC20, IRollupCreator},
    account::Account,
    parent_chain::ParentChain,
    receipt::{DeploymentResult, TransactionReceipt},
    rollup_config::RollupConfig,
    rpc::{CallRequest, DEFAULT_POLL_INTERVAL, ParentChainClient, wait_for_transaction_receipt},
};

/// Retryable fees sent along with `createRollup` to deploy the L2 factories, 0.125 ETH.
pub const RETRYABLE_FEES: U256 = U256::from_limbs([125_000_000_000_000_000, 0, 0, 0]);

/// Max fee per gas paid by the factory-deployment retryables, 0.1 gwei.
pub const MAX_FEE_PER_GAS_FOR_RETRYABLES: U256 = U256::from_limbs([100_000_000, 0, 0, 0]);

/// How long to wait for the rollup creation receipt by default.
pub const DEFAULT_RECEIPT_TIMEOUT: Duration = Duration::from_secs(300);

/// An unsigned EIP-1559 transaction ready to be signed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreparedTransaction {
    pub chain_id: u64,
    pub nonce: u64,
    pub gas_limit: u64,
    pub max_fee_per_gas: u128,
    pub max_priority_fee_per_gas: u128,
    pub to: Address,
    pub value: U256,
    pub input: Bytes,
}

impl PreparedTransaction {
    pub fn to_eip1559(&self) -> TxEip1559 {
        TxEip1559 {
            chain_id: self.chain_id,
            nonce: self.nonce,
            gas_limit: self.gas_limit,
            max_fee_per_gas: self.max_fee_per_gas,
            max_priority_fee_per_gas: self.max_priority_fee_per_gas,
            to: TxKind::Call(self.to),
            value: self.value,
            access_list: Default::default(),
            input: self.input.clone(),
        }
    }
}

/// Everything `createRollup` needs, built once per deployment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeploymentRequest {
    pub config: RollupConfig,
    pub batch_poster: Address,
    pub validators: Vec<Address>,
    /// The account that submits the transaction and pays for it.
    pub account: Address,
    /// ERC-20 used to pay rollup gas. `None` deploys an ETH-based rollup.
    pub native_token: Option<Address>,
}

impl DeploymentRequest {
    pub fn new(
        config: RollupConfig,
        batch_poster: Address,
        validators: Vec<Address>,
        account: Address,
        native_token: Option<Address>,
    ) -> Self {
        Self {
            config,
            batch_poster,
            validators,
            account,
            native_token,
        }
    }

    /// ETH sent along with the transaction.
    ///
    /// A custom fee token rollup pays the retryables in the fee token instead.
    pub fn value(&self) -> U256 {
        match self.native_token {
            Some(_) => U256::ZERO,
            None => RETRYABLE_FEES,
        }
    }

    fn to_params(&self, parent_chain: &ParentChain) -> IRollupCreator::createRollupCall {
        IRollupCreator::createRollupCall {
            deployParams: abi::RollupDeploymentParams {
                config: self.config.to_abi(),
                batchPoster: self.batch_poster,
                validators: self.validators.clone(),
                maxDataSize: U256::from(parent_chain.max_data_size()),
                nativeToken: self.native_token.unwrap_or(Address::ZERO),
                deployFactoriesToL2: true,
                maxFeePerGasForRetryables: MAX_FEE_PER_GAS_FOR_RETRYABLES,
            },
        }
    }

    /// ABI-encoded `createRollup` calldata.
    pub fn calldata(&self, parent_chain: &ParentChain) -> Bytes {
        Bytes::from(self.to_params(parent_chain).abi_encode())
    }
}

/// Fee token amount the deployer must have approved, 0.125 tokens in the token's decimals.
///
/// Rounds up, so tokens with fewer than three decimals never require less than 0.125 tokens.
pub fn required_fee_token_allowance(decimals: u8) -> anyhow::Result<U256> {
    let required = match decimals.checked_sub(3) {
        Some(exponent) => U256::from(10u64)
            .checked_pow(U256::from(exponent))
            .and_then(|scale| scale.checked_mul(U256::from(125u64))),
        None => {
            let scaled = 125u64 * 10u64.pow(u32::from(decimals));
            Some(U256::from(scaled.div_ceil(1000)))
        }
    };

    required.with_context(|| format!("Fee token decimals {} are out of range", decimals))
}

/// A `RollupCreator` deployment on a parent chain.
#[derive(Debug)]
pub struct RollupCreator<'a, C> {
    client: &'a C,
    address: Address,
    parent_chain: ParentChain,
    receipt_timeout: Duration,
    poll_interval: Duration,
}

impl<'a, C: ParentChainClient> RollupCreator<'a, C> {
    pub fn new(client: &'a C, address: Address, parent_chain: ParentChain) -> Self {
        Self {
            client,
            address,
            parent_chain,
            receipt_timeout: DEFAULT_RECEIPT_TIMEOUT,
            poll_interval: DEFAULT_POLL_INTERVAL,
        }
    }

    pub fn with_receipt_timeout(mut self, receipt_timeout: Duration) -> Self {
        self.receipt_timeout = receipt_timeout;
        self
    }

    pub fn with_poll_interval(mut self, poll_interval: Duration) -> Self {
        self.poll_interval = poll_interval;
        self
    }

    async fn ensure_parent_chain(&self) -> anyhow::Result<()> {
        let rpc_chain_id = self
            .client
            .chain_id()
            .await
            .context("Failed to fetch parent chain id")?;

        if rpc_chain_id != self.parent_chain.chain_id() {
            anyhow::bail!(
                "RPC endpoint is connected to chain {} but the parent chain is {}",
                rpc_chain_id,
                self.parent_chain.chain_id()
            );
        }

        Ok(())
    }

    /// Check that the deployer approved enough fee tokens for the retryables.
    ///
    /// Does nothing for ETH-based rollups.
    pub async fn ensure_fee_token_allowance(
        &self,
        request: &DeploymentRequest,
    ) -> anyhow::Result<()> {
        let Some(token) = request.native_token else {
            return Ok(());
        };

        let decimals = self
            .client
            .call(&CallRequest {
                from: request.account,
                to: token,
                value: None,
                data: IERC20::decimalsCall {}.abi_encode().into(),
            })
            .await
            .context("Failed to fetch fee token decimals")?;
        let decimals = IERC20::decimalsCall::abi_decode_returns(&decimals)
            .context("Failed to decode fee token decimals")?;

        let allowance = self
            .client
            .call(&CallRequest {
                from: request.account,
                to: token,
                value: None,
                data: IERC20::allowanceCall {
                    owner: request.account,
                    spender: self.address,
                }
                .abi_encode()
                .into(),
            })
            .await
            .context("Failed to fetch fee token allowance")?;
        let allowance = IERC20::allowanceCall::abi_decode_returns(&allowance)
            .context("Failed to decode fee token allowance")?;

        let required = required_fee_token_allowance(decimals)?;

        tracing::debug!(%token, %allowance, %required, "Checked fee token allowance");

        if allowance < required {
            anyhow::bail!(
                "Fee token {} allowance of {} for RollupCreator {} is {}, at least {} is required",
                token,
                request.account,
                self.address,
                allowance,
                required
            );
        }

        Ok(())
    }

    /// Build the unsigned `createRollup` transaction for `request`.
    pub async fn prepare_transaction_request(
        &self,
        request: &DeploymentRequest,
    ) -> anyhow::Result<PreparedTransaction> {
        self.ensure_parent_chain().await?;
        self.ensure_fee_token_allowance(request).await?;

        let input = request.calldata(&self.parent_chain);
        let value = request.value();

        let nonce = self
            .client
            .transaction_count(request.account)
            .await
            .context("Failed to fetch deployer nonce")?;

        let gas_limit = self
            .client
            .estimate_gas(&CallRequest {
                from: request.account,
                to: self.address,
                value: Some(value),
                data: input.clone(),
            })
            .await
            .context("Failed to estimate gas for createRollup")?;

        let gas_price = self
            .client
            .gas_price()
            .await
            .context("Failed to fetch gas price")?;
        let max_priority_fee_per_gas = self
            .client
            .max_priority_fee_per_gas()
            .await
            .context("Failed to fetch max priority fee")?;
        let max_fee_per_gas = gas_price.saturating_mul(12) / 10 + max_priority_fee_per_gas;

        let transaction = PreparedTransaction {
            chain_id: self.parent_chain.chain_id(),
            nonce,
            gas_limit,
            max_fee_per_gas,
            max_priority_fee_per_gas,
            to: self.address,
            value,
            input,
        };

        tracing::debug!(
            nonce,
            gas_limit,
            max_fee_per_gas,
            max_priority_fee_per_gas,
            %value,
            "Prepared createRollup transaction"
        );

        Ok(transaction)
    }

    pub async fn send_raw_transaction(&self, raw: &Bytes) -> anyhow::Result<TxHash> {
        self.client
            .send_raw_transaction(raw)
            .await
            .context("Failed to broadcast createRollup transaction")
    }

    /// Wait for `hash` to be mined, failing if it reverted.
    pub async fn wait_for_receipt(&self, hash: TxHash) -> anyhow::Result<TransactionReceipt> {
        let receipt = wait_for_transaction_receipt(
            self.client,
            hash,
            self.receipt_timeout,
            self.poll_interval,
        )
        .await?;

        if !receipt.succeeded() {
            anyhow::bail!("Rollup creation transaction {} reverted", hash);
        }

        Ok(receipt)
    }

    /// Prepare, sign, broadcast and confirm the rollup creation in one go.
    pub async fn create_rollup(
        &self,
        request: &DeploymentRequest,
        account: &Account,
    ) -> anyhow::Result<DeploymentResult> {
        if account.address() != request.account {
            anyhow::bail!(
                "Signing account {} does not match the request account {}",
                account.address(),
                request.account
            );
        }

        let transaction = self.prepare_transaction_request(request).await?;
        let raw = account.sign_transaction(&transaction)?;
        let hash = self.send_raw_transaction(&raw).await?;

        tracing::info!(tx_hash = %hash, "createRollup transaction sent");

        let receipt = self.wait_for_receipt(hash).await?;
        DeploymentResult::from_receipt(&receipt)
    }
}
