//! Integration tests for orbit-launch-deploy.
//!
//! These tests run full deployments against an in-memory parent chain that
//! answers the JSON-RPC calls made during rollup creation and mines every
//! broadcast transaction into a receipt carrying a `RollupCreated` event.
//! Run with: cargo test --test integration_test

use std::{
    path::{Path, PathBuf},
    sync::Mutex,
    time::Duration,
};

use alloy_consensus::{SignableTransaction, TxEnvelope};
use alloy_core::primitives::{Address, Bytes, TxHash, U64, U256, keccak256};
use alloy_eips::eip2718::Decodable2718;
use alloy_sol_types::{SolCall, SolEvent};
use anyhow::Context;
use orbit_launch_deploy::{
    ConfigError, CoreContracts, DeployConfigInput, Deployer, DeployerBuilder, OrbitSetupManifest,
    ParentChain, ParentChainClient, RollupVariant, SubmissionMode, TransactionReceipt,
    abi::{IERC20, IRollupCreator::RollupCreated},
    receipt::Log,
    rpc::CallRequest,
};
use tracing::level_filters::LevelFilter;

const DEPLOYER_KEY: &str = "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";
const BATCH_POSTER_KEY: &str = "0x59c6995e998f97a5a0044966f0945389dc9e86dae88c7a8412f4603b6b78690d";
const VALIDATOR_KEY: &str = "0x5de4111afa1a4b94908f83103eb1f1706367c2e68ca870fc3fb9a804cdab365a";

const FEE_TOKEN: Address = Address::repeat_byte(0x77);
const DEPLOYED_AT_BLOCK: u64 = 4242;

fn init_test_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(LevelFilter::DEBUG)
        .try_init();
}

/// The contracts the mocked RollupCreator "deploys".
fn mocked_core_contracts() -> CoreContracts {
    CoreContracts {
        rollup: Address::repeat_byte(0x01),
        native_token: Address::ZERO,
        inbox: Address::repeat_byte(0x02),
        outbox: Address::repeat_byte(0x03),
        rollup_event_inbox: Address::repeat_byte(0x04),
        challenge_manager: Address::repeat_byte(0x05),
        admin_proxy: Address::repeat_byte(0x06),
        sequencer_inbox: Address::repeat_byte(0x07),
        bridge: Address::repeat_byte(0x08),
        upgrade_executor: Address::repeat_byte(0x09),
        validator_utils: Address::repeat_byte(0x0a),
        validator_wallet_creator: Address::repeat_byte(0x0b),
        deployed_at_block_number: DEPLOYED_AT_BLOCK,
    }
}

fn rollup_created_log(contracts: &CoreContracts) -> Log {
    let event = RollupCreated {
        rollupAddress: contracts.rollup,
        nativeToken: contracts.native_token,
        inboxAddress: contracts.inbox,
        outbox: contracts.outbox,
        rollupEventInbox: contracts.rollup_event_inbox,
        challengeManager: contracts.challenge_manager,
        adminProxy: contracts.admin_proxy,
        sequencerInbox: contracts.sequencer_inbox,
        bridge: contracts.bridge,
        upgradeExecutor: contracts.upgrade_executor,
        validatorUtils: contracts.validator_utils,
        validatorWalletCreator: contracts.validator_wallet_creator,
    };
    let data = event.encode_log_data();

    Log {
        address: Address::repeat_byte(0xcc),
        topics: data.topics().to_vec(),
        data: data.data,
    }
}

fn abi_word(value: U256) -> Bytes {
    Bytes::from(value.to_be_bytes::<32>().to_vec())
}

/// In-memory parent chain.
struct MockParentChain {
    chain_id: u64,
    fail_broadcast: bool,
    revert: bool,
    malformed_receipt: bool,
    receipt_unavailable: bool,
    fee_token_decimals: u8,
    fee_token_allowance: U256,
    rpc_calls: Mutex<Vec<&'static str>>,
    estimated: Mutex<Vec<CallRequest>>,
    broadcast: Mutex<Vec<Bytes>>,
}

impl MockParentChain {
    fn new() -> Self {
        Self {
            chain_id: ParentChain::ArbitrumSepolia.chain_id(),
            fail_broadcast: false,
            revert: false,
            malformed_receipt: false,
            receipt_unavailable: false,
            fee_token_decimals: 18,
            fee_token_allowance: U256::MAX,
            rpc_calls: Mutex::new(Vec::new()),
            estimated: Mutex::new(Vec::new()),
            broadcast: Mutex::new(Vec::new()),
        }
    }

    fn record(&self, method: &'static str) {
        self.rpc_calls.lock().unwrap().push(method);
    }

    fn rpc_calls(&self) -> Vec<&'static str> {
        self.rpc_calls.lock().unwrap().clone()
    }

    fn broadcast(&self) -> Vec<Bytes> {
        self.broadcast.lock().unwrap().clone()
    }
}

impl ParentChainClient for MockParentChain {
    async fn chain_id(&self) -> anyhow::Result<u64> {
        self.record("eth_chainId");
        Ok(self.chain_id)
    }

    async fn transaction_count(&self, _address: Address) -> anyhow::Result<u64> {
        self.record("eth_getTransactionCount");
        Ok(5)
    }

    async fn estimate_gas(&self, request: &CallRequest) -> anyhow::Result<u64> {
        self.record("eth_estimateGas");
        self.estimated.lock().unwrap().push(request.clone());
        Ok(8_000_000)
    }

    async fn gas_price(&self) -> anyhow::Result<u128> {
        self.record("eth_gasPrice");
        Ok(100_000_000)
    }

    async fn max_priority_fee_per_gas(&self) -> anyhow::Result<u128> {
        self.record("eth_maxPriorityFeePerGas");
        Ok(0)
    }

    async fn call(&self, request: &CallRequest) -> anyhow::Result<Bytes> {
        self.record("eth_call");
        anyhow::ensure!(request.to == FEE_TOKEN, "unexpected eth_call to {}", request.to);

        let selector = &request.data[..4];
        if selector == IERC20::decimalsCall::SELECTOR.as_slice() {
            Ok(abi_word(U256::from(self.fee_token_decimals)))
        } else if selector == IERC20::allowanceCall::SELECTOR.as_slice() {
            Ok(abi_word(self.fee_token_allowance))
        } else {
            anyhow::bail!("execution reverted")
        }
    }

    async fn send_raw_transaction(&self, raw: &Bytes) -> anyhow::Result<TxHash> {
        self.record("eth_sendRawTransaction");
        if self.fail_broadcast {
            anyhow::bail!("RPC error on eth_sendRawTransaction: nonce too low");
        }
        self.broadcast.lock().unwrap().push(raw.clone());
        Ok(keccak256(raw))
    }

    async fn transaction_receipt(
        &self,
        hash: TxHash,
    ) -> anyhow::Result<Option<TransactionReceipt>> {
        self.record("eth_getTransactionReceipt");
        if self.receipt_unavailable {
            anyhow::bail!("RPC error on eth_getTransactionReceipt: header not found");
        }
        if self.malformed_receipt {
            let receipt = serde_json::from_value(serde_json::json!({
                "transactionHash": hash,
                "status": "0x1",
                "logs": [],
            }))
            .context("Failed to deserialize eth_getTransactionReceipt result")?;
            return Ok(Some(receipt));
        }
        Ok(Some(TransactionReceipt {
            transaction_hash: hash,
            block_number: DEPLOYED_AT_BLOCK,
            status: Some(U64::from(if self.revert { 0u64 } else { 1u64 })),
            logs: vec![rollup_created_log(&mocked_core_contracts())],
        }))
    }
}

/// Build a deployer writing its manifest to `output`.
fn build_deployer(input: DeployConfigInput, output: &Path) -> Deployer {
    let config = DeployConfigInput {
        output: output.to_path_buf(),
        ..input
    }
    .validate()
    .expect("valid config");

    DeployerBuilder::new(config)
        .poll_interval(Duration::from_millis(10))
        .build()
        .expect("deployer builds")
}

fn eth_input() -> DeployConfigInput {
    DeployConfigInput {
        deployer_private_key: Some(DEPLOYER_KEY.to_string()),
        ..Default::default()
    }
}

fn read_manifest(path: &Path) -> serde_json::Value {
    serde_json::from_str(&std::fs::read_to_string(path).expect("manifest exists"))
        .expect("manifest is valid JSON")
}

fn decode_broadcast(raw: &Bytes) -> (Address, alloy_consensus::TxEip1559) {
    let envelope = TxEnvelope::decode_2718(&mut raw.as_ref()).expect("valid EIP-2718 transaction");
    let TxEnvelope::Eip1559(signed) = envelope else {
        panic!("expected an EIP-1559 transaction");
    };
    let signer = signed
        .signature()
        .recover_address_from_prehash(&signed.tx().signature_hash())
        .expect("recoverable signature");
    (signer, signed.tx().clone())
}

#[tokio::test]
async fn test_eth_rollup_composite_writes_manifest() {
    init_test_tracing();

    let dir = tempdir::TempDir::new("orbit-launch").unwrap();
    let output = dir.path().join("orbitSetupScriptConfig.json");
    let deployer = build_deployer(eth_input(), &output);
    let client = MockParentChain::new();

    let outcome = deployer.deploy(&client).await.expect("deployment succeeds");

    assert_eq!(outcome.manifest_path, output);
    assert_eq!(outcome.result.core_contracts, mocked_core_contracts());

    let manifest = read_manifest(&output);
    assert_eq!(manifest["chainId"], deployer.chain_id());
    assert_eq!(
        manifest["batchPoster"],
        deployer.batch_poster.address().to_string()
    );
    assert_eq!(manifest["staker"], deployer.validator.address().to_string());
    assert_eq!(manifest["chainOwner"], deployer.deployer.address().to_string());
    assert_eq!(manifest["networkFeeReceiver"], manifest["chainOwner"]);
    assert_eq!(manifest["infrastructureFeeCollector"], manifest["chainOwner"]);
    assert_eq!(manifest["parentChainId"], 421614);
    assert_eq!(
        manifest["parent-chain-node-url"],
        "https://sepolia-rollup.arbitrum.io/rpc"
    );
    assert_eq!(manifest["minL2BaseFee"], 100_000_000);
    assert_eq!(manifest["chainName"], deployer.chain_name);
    assert_eq!(manifest["utils"], manifest["validatorUtils"]);

    let contracts = serde_json::to_value(mocked_core_contracts()).unwrap();
    for (key, value) in contracts.as_object().unwrap() {
        assert_eq!(&manifest[key], value, "{key} differs from the mocked deployment");
    }

    // The broadcast transaction is the deployer's createRollup call with the retryable fees.
    let broadcast = client.broadcast();
    assert_eq!(broadcast.len(), 1);
    let (signer, tx) = decode_broadcast(&broadcast[0]);
    assert_eq!(signer, deployer.deployer.address());
    assert_eq!(tx.chain_id, 421614);
    assert_eq!(tx.nonce, 5);
    assert_eq!(tx.gas_limit, 8_000_000);
    assert_eq!(tx.max_fee_per_gas, 120_000_000);
    assert_eq!(tx.to.to(), Some(&deployer.rollup_creator));
    assert_eq!(tx.value, U256::from(125_000_000_000_000_000u128));

    let call = orbit_launch_deploy::abi::IRollupCreator::createRollupCall::abi_decode(&tx.input)
        .expect("createRollup calldata");
    assert_eq!(call.deployParams.batchPoster, deployer.batch_poster.address());
    assert_eq!(call.deployParams.validators, vec![deployer.validator.address()]);
    assert_eq!(call.deployParams.nativeToken, Address::ZERO);
    assert_eq!(call.deployParams.config.chainId, U256::from(deployer.chain_id()));

    // No fee token to check for an ETH rollup.
    assert!(!client.rpc_calls().contains(&"eth_call"));
}

#[tokio::test]
async fn test_runs_without_keys_generate_different_accounts() {
    init_test_tracing();

    let dir = tempdir::TempDir::new("orbit-launch").unwrap();
    let first_output = dir.path().join("first.json");
    let second_output = dir.path().join("second.json");

    let first = build_deployer(eth_input(), &first_output);
    let second = build_deployer(eth_input(), &second_output);

    first.deploy(&MockParentChain::new()).await.unwrap();
    second.deploy(&MockParentChain::new()).await.unwrap();

    let first = read_manifest(&first_output);
    let second = read_manifest(&second_output);
    assert_ne!(first["batchPoster"], second["batchPoster"]);
    assert_ne!(first["staker"], second["staker"]);
    assert_eq!(first["chainOwner"], second["chainOwner"]);
}

#[tokio::test]
async fn test_explicit_keys_give_deterministic_addresses() {
    let dir = tempdir::TempDir::new("orbit-launch").unwrap();
    let input = || DeployConfigInput {
        batch_poster_private_key: Some(BATCH_POSTER_KEY.to_string()),
        validator_private_key: Some(VALIDATOR_KEY.to_string()),
        ..eth_input()
    };

    let first = build_deployer(input(), &dir.path().join("a.json"));
    let second = build_deployer(input(), &dir.path().join("b.json"));

    assert_eq!(first.batch_poster.address(), second.batch_poster.address());
    assert_eq!(first.validator.address(), second.validator.address());
    assert_eq!(
        first.batch_poster.address(),
        alloy_core::primitives::address!("0x70997970C51812dc3A010C7d01b50e0d17dc79C8")
    );
    assert_eq!(
        first.validator.address(),
        alloy_core::primitives::address!("0x3C44CdDdB6a900fa2b585dd299e03d12FA4293BC")
    );
}

#[tokio::test]
async fn test_missing_fee_token_fails_before_network() {
    let dir = tempdir::TempDir::new("orbit-launch").unwrap();
    let output = dir.path().join("orbitSetupScriptConfig.json");

    let err = DeployConfigInput {
        variant: RollupVariant::CustomFeeToken,
        output: output.clone(),
        ..eth_input()
    }
    .validate()
    .unwrap_err();

    assert!(matches!(err, ConfigError::Missing(_)));
    assert!(
        err.to_string().contains("CUSTOM_FEE_TOKEN_ADDRESS"),
        "error should name the missing key: {err}"
    );
    assert!(!output.exists());
}

#[tokio::test]
async fn test_missing_deployer_key_fails_before_network() {
    let dir = tempdir::TempDir::new("orbit-launch").unwrap();
    let output = dir.path().join("orbitSetupScriptConfig.json");
    std::fs::write(&output, "previous manifest").unwrap();

    let err = DeployConfigInput {
        output: output.clone(),
        ..Default::default()
    }
    .validate()
    .unwrap_err();

    assert!(err.to_string().contains("DEPLOYER_PRIVATE_KEY"), "{err}");
    assert_eq!(std::fs::read_to_string(&output).unwrap(), "previous manifest");
}

#[tokio::test]
async fn test_manual_broadcast_failure_keeps_previous_manifest() {
    init_test_tracing();

    let dir = tempdir::TempDir::new("orbit-launch").unwrap();
    let output = dir.path().join("orbitSetupScriptConfig.json");
    std::fs::write(&output, "previous manifest").unwrap();

    let deployer = build_deployer(
        DeployConfigInput {
            submission: SubmissionMode::Manual,
            wasm_module_root: Some("arm64".to_string()),
            ..eth_input()
        },
        &output,
    );
    let client = MockParentChain {
        fail_broadcast: true,
        ..MockParentChain::new()
    };

    let err = deployer.deploy(&client).await.unwrap_err();

    assert!(format!("{err:#}").contains("nonce too low"), "{err:#}");
    assert_eq!(std::fs::read_to_string(&output).unwrap(), "previous manifest");
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
    assert!(!client.rpc_calls().contains(&"eth_getTransactionReceipt"));
}

#[tokio::test]
async fn test_manual_and_composite_produce_identical_manifests() {
    init_test_tracing();

    let dir = tempdir::TempDir::new("orbit-launch").unwrap();
    let input = |submission: SubmissionMode| DeployConfigInput {
        submission,
        batch_poster_private_key: Some(BATCH_POSTER_KEY.to_string()),
        validator_private_key: Some(VALIDATOR_KEY.to_string()),
        chain_id: Some(1_987_654_321),
        chain_name: Some("orbit-parity".to_string()),
        ..eth_input()
    };

    let composite_output = dir.path().join("composite.json");
    let manual_output = dir.path().join("manual.json");

    let composite = build_deployer(input(SubmissionMode::Composite), &composite_output)
        .deploy(&MockParentChain::new())
        .await
        .unwrap();
    let manual = build_deployer(input(SubmissionMode::Manual), &manual_output)
        .deploy(&MockParentChain::new())
        .await
        .unwrap();

    assert_eq!(composite.manifest, manual.manifest);
    assert_eq!(composite.result.transaction_hash, manual.result.transaction_hash);
    assert_eq!(
        std::fs::read_to_string(&composite_output).unwrap(),
        std::fs::read_to_string(&manual_output).unwrap()
    );

    let written: OrbitSetupManifest =
        serde_json::from_str(&std::fs::read_to_string(&manual_output).unwrap()).unwrap();
    assert_eq!(written.chain_id, 1_987_654_321);
    assert_eq!(written.chain_name, "orbit-parity");
}

#[tokio::test]
async fn test_custom_fee_token_rollup() {
    init_test_tracing();

    let dir = tempdir::TempDir::new("orbit-launch").unwrap();
    let output = dir.path().join("orbitSetupScriptConfig.json");
    let deployer = build_deployer(
        DeployConfigInput {
            variant: RollupVariant::CustomFeeToken,
            custom_fee_token_address: Some(FEE_TOKEN.to_string()),
            ..eth_input()
        },
        &output,
    );
    let client = MockParentChain::new();

    deployer.deploy(&client).await.unwrap();

    let estimated = client.estimated.lock().unwrap().clone();
    assert_eq!(estimated.len(), 1);
    assert_eq!(estimated[0].value, Some(U256::ZERO));

    let (_, tx) = decode_broadcast(&client.broadcast()[0]);
    assert_eq!(tx.value, U256::ZERO);
    let call = orbit_launch_deploy::abi::IRollupCreator::createRollupCall::abi_decode(&tx.input)
        .unwrap();
    assert_eq!(call.deployParams.nativeToken, FEE_TOKEN);

    let chain_config: serde_json::Value =
        serde_json::from_str(&call.deployParams.config.chainConfig).unwrap();
    assert_eq!(chain_config["arbitrum"]["DataAvailabilityCommittee"], false);
    assert!(output.exists());
}

#[tokio::test]
async fn test_insufficient_fee_token_allowance_stops_before_broadcast() {
    init_test_tracing();

    let dir = tempdir::TempDir::new("orbit-launch").unwrap();
    let output = dir.path().join("orbitSetupScriptConfig.json");
    let deployer = build_deployer(
        DeployConfigInput {
            variant: RollupVariant::CustomFeeToken,
            custom_fee_token_address: Some(FEE_TOKEN.to_string()),
            ..eth_input()
        },
        &output,
    );
    let client = MockParentChain {
        fee_token_decimals: 6,
        fee_token_allowance: U256::from(124_999u64),
        ..MockParentChain::new()
    };

    let err = deployer.deploy(&client).await.unwrap_err();

    assert!(format!("{err:#}").contains("allowance"), "{err:#}");
    assert!(client.broadcast().is_empty());
    assert!(!output.exists());
}

#[tokio::test]
async fn test_fee_token_allowance_rounds_up_for_low_decimals() {
    init_test_tracing();

    let dir = tempdir::TempDir::new("orbit-launch").unwrap();
    let output = dir.path().join("orbitSetupScriptConfig.json");
    let deployer = build_deployer(
        DeployConfigInput {
            variant: RollupVariant::CustomFeeToken,
            custom_fee_token_address: Some(FEE_TOKEN.to_string()),
            ..eth_input()
        },
        &output,
    );

    // 0.125 tokens at 2 decimals is 12.5 base units.
    let client = MockParentChain {
        fee_token_decimals: 2,
        fee_token_allowance: U256::from(12u64),
        ..MockParentChain::new()
    };
    let err = deployer.deploy(&client).await.unwrap_err();
    assert!(format!("{err:#}").contains("at least 13"), "{err:#}");
    assert!(client.broadcast().is_empty());

    let client = MockParentChain {
        fee_token_decimals: 2,
        fee_token_allowance: U256::from(13u64),
        ..MockParentChain::new()
    };
    deployer.deploy(&client).await.unwrap();
    assert_eq!(client.broadcast().len(), 1);
}

#[tokio::test]
async fn test_malformed_receipt_fails_with_its_cause() {
    init_test_tracing();

    let dir = tempdir::TempDir::new("orbit-launch").unwrap();
    let output = dir.path().join("orbitSetupScriptConfig.json");
    let deployer = build_deployer(
        DeployConfigInput {
            submission: SubmissionMode::Manual,
            ..eth_input()
        },
        &output,
    );
    let client = MockParentChain {
        malformed_receipt: true,
        ..MockParentChain::new()
    };

    let err = format!("{:#}", deployer.deploy(&client).await.unwrap_err());

    assert!(err.contains("Failed to deserialize"), "{err}");
    assert!(err.contains("blockNumber"), "{err}");
    assert!(!err.contains("Timeout"), "{err}");
    let receipt_polls = client
        .rpc_calls()
        .iter()
        .filter(|method| **method == "eth_getTransactionReceipt")
        .count();
    assert_eq!(receipt_polls, 1);
    assert!(!output.exists());
}

#[tokio::test]
async fn test_receipt_timeout_reports_last_rpc_error() {
    init_test_tracing();

    let dir = tempdir::TempDir::new("orbit-launch").unwrap();
    let output = dir.path().join("orbitSetupScriptConfig.json");
    let mut deployer = build_deployer(
        DeployConfigInput {
            submission: SubmissionMode::Manual,
            ..eth_input()
        },
        &output,
    );
    deployer.receipt_timeout = Duration::from_millis(50);
    let client = MockParentChain {
        receipt_unavailable: true,
        ..MockParentChain::new()
    };

    let err = format!("{:#}", deployer.deploy(&client).await.unwrap_err());

    assert!(err.contains("Timeout waiting for receipt"), "{err}");
    assert!(err.contains("header not found"), "{err}");
    assert!(!output.exists());
}

#[tokio::test]
async fn test_wrong_parent_chain_is_rejected() {
    init_test_tracing();

    let dir = tempdir::TempDir::new("orbit-launch").unwrap();
    let output = dir.path().join("orbitSetupScriptConfig.json");
    let deployer = build_deployer(eth_input(), &output);
    let client = MockParentChain {
        chain_id: ParentChain::Sepolia.chain_id(),
        ..MockParentChain::new()
    };

    let err = deployer.deploy(&client).await.unwrap_err();

    assert!(format!("{err:#}").contains("11155111"), "{err:#}");
    assert!(client.broadcast().is_empty());
    assert!(!output.exists());
}

#[tokio::test]
async fn test_reverted_deployment_writes_no_manifest() {
    init_test_tracing();

    let dir = tempdir::TempDir::new("orbit-launch").unwrap();
    let output = dir.path().join("orbitSetupScriptConfig.json");
    let deployer = build_deployer(
        DeployConfigInput {
            submission: SubmissionMode::Manual,
            ..eth_input()
        },
        &output,
    );
    let client = MockParentChain {
        revert: true,
        ..MockParentChain::new()
    };

    let err = deployer.deploy(&client).await.unwrap_err();

    assert!(format!("{err:#}").contains("reverted"), "{err:#}");
    assert!(!output.exists());
}

#[tokio::test]
async fn test_manifest_keeps_configured_rpc_url() {
    init_test_tracing();

    let dir = tempdir::TempDir::new("orbit-launch").unwrap();
    let output = dir.path().join("orbitSetupScriptConfig.json");
    let deployer = build_deployer(
        DeployConfigInput {
            parent_chain: ParentChain::Custom(412346),
            parent_chain_rpc_url: Some("http://localhost:8547".to_string()),
            rollup_creator: Some(Address::repeat_byte(0x55).to_string()),
            ..eth_input()
        },
        &output,
    );
    let client = MockParentChain {
        chain_id: 412346,
        ..MockParentChain::new()
    };

    deployer.deploy(&client).await.unwrap();

    let manifest = read_manifest(&output);
    assert_eq!(manifest["parent-chain-node-url"], "http://localhost:8547");
    assert_eq!(manifest["parentChainId"], 412346);
}

#[tokio::test]
async fn test_manifest_written_into_nested_output_path() {
    let dir = tempdir::TempDir::new("orbit-launch").unwrap();
    let nested: PathBuf = dir.path().join("deployments");
    std::fs::create_dir_all(&nested).unwrap();
    let output = nested.join("orbitSetupScriptConfig.json");

    let deployer = build_deployer(eth_input(), &output);
    deployer.deploy(&MockParentChain::new()).await.unwrap();

    let manifest: OrbitSetupManifest =
        serde_json::from_str(&std::fs::read_to_string(&output).unwrap()).unwrap();
    assert_eq!(manifest.utils, manifest.core_contracts.validator_utils);
    assert_eq!(manifest.core_contracts.deployed_at_block_number, DEPLOYED_AT_BLOCK);
    assert_ne!(manifest.chain_owner, Address::ZERO);
    assert_ne!(manifest.core_contracts.rollup, Address::ZERO);
}
