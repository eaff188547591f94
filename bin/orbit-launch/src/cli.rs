use std::path::PathBuf;

use clap::Parser;
use orbit_launch_deploy::{
    DEFAULT_MANIFEST_FILENAME, DeployConfigInput, ParentChain, RollupVariant, SubmissionMode,
};
use tracing::level_filters::LevelFilter;

#[derive(Parser)]
#[command(name = "orbit-launch")]
#[command(
    author,
    version,
    about = "Launch an Arbitrum Orbit rollup on a parent chain"
)]
pub struct Cli {
    /// The verbosity level.
    #[arg(short, long, env = "ORBIT_VERBOSITY", default_value_t = LevelFilter::INFO)]
    pub verbosity: LevelFilter,

    /// Private key of the account that submits the deployment and owns the chain.
    #[arg(long, env = "DEPLOYER_PRIVATE_KEY", hide_env_values = true)]
    pub deployer_private_key: Option<String>,

    /// Private key of the batch poster. A fresh key is generated if not provided.
    #[arg(long, env = "BATCH_POSTER_PRIVATE_KEY", hide_env_values = true)]
    pub batch_poster_private_key: Option<String>,

    /// Private key of the validator. A fresh key is generated if not provided.
    #[arg(long, env = "VALIDATOR_PRIVATE_KEY", hide_env_values = true)]
    pub validator_private_key: Option<String>,

    /// Address of the ERC-20 paying rollup gas. Required with `--variant custom-fee-token`.
    #[arg(long, env = "CUSTOM_FEE_TOKEN_ADDRESS")]
    pub custom_fee_token_address: Option<String>,

    /// How rollup gas is paid (eth, custom-fee-token).
    #[arg(long, env = "ORBIT_VARIANT", default_value_t = RollupVariant::Eth)]
    pub variant: RollupVariant,

    /// How the rollup creation transaction is submitted (composite, manual).
    #[arg(long, env = "ORBIT_SUBMISSION", default_value_t = SubmissionMode::Composite)]
    pub submission: SubmissionMode,

    /// The parent chain (arbitrum-sepolia, sepolia or a chain id).
    #[arg(
        long,
        alias = "parent",
        env = "ORBIT_PARENT_CHAIN",
        default_value_t = ParentChain::ArbitrumSepolia
    )]
    pub parent_chain: ParentChain,

    /// The URL of a parent chain RPC endpoint.
    ///
    /// If not provided, the public endpoint of the parent chain is used.
    #[arg(long, alias = "rpc", env = "ORBIT_PARENT_CHAIN_RPC_URL")]
    pub parent_chain_rpc_url: Option<String>,

    /// Address of the RollupCreator contract, overriding the parent chain's default.
    #[arg(long, env = "ORBIT_ROLLUP_CREATOR")]
    pub rollup_creator: Option<String>,

    /// The chain id of the new rollup.
    /// If not provided, the chain id will be generated randomly.
    #[arg(long, env = "ORBIT_CHAIN_ID")]
    pub chain_id: Option<u64>,

    /// A custom name for the chain. If not provided, a name like orbit-<adjective>-<noun>
    /// is generated.
    #[arg(long, visible_alias = "name", env = "ORBIT_CHAIN_NAME")]
    pub chain_name: Option<String>,

    /// Post batches to a data availability committee (AnyTrust).
    ///
    /// Defaults to true for eth rollups and false for custom fee token rollups.
    #[arg(long, env = "ORBIT_DATA_AVAILABILITY_COMMITTEE")]
    pub data_availability_committee: Option<bool>,

    /// The ArbOS version the chain starts with.
    #[arg(long, env = "ORBIT_INITIAL_ARBOS_VERSION", default_value_t = 11)]
    pub initial_arbos_version: u64,

    /// The wasm module root validators run (amd64, arm64, host or a 32-byte hex hash).
    ///
    /// If not provided, the root of the default consensus release is used.
    #[arg(long, env = "ORBIT_WASM_MODULE_ROOT")]
    pub wasm_module_root: Option<String>,

    /// The minimum L2 base fee in wei.
    #[arg(long, env = "ORBIT_MIN_L2_BASE_FEE", default_value_t = 100_000_000)]
    pub min_l2_base_fee: u64,

    /// The path of the manifest file.
    #[arg(short, long, env = "ORBIT_OUTPUT", default_value = DEFAULT_MANIFEST_FILENAME)]
    pub output: PathBuf,

    /// Seconds to wait for the rollup creation receipt.
    #[arg(long, env = "ORBIT_RECEIPT_TIMEOUT", default_value_t = 300)]
    pub receipt_timeout: u64,
}

impl Cli {
    pub fn config_input(&self) -> DeployConfigInput {
        DeployConfigInput {
            deployer_private_key: self.deployer_private_key.clone(),
            batch_poster_private_key: self.batch_poster_private_key.clone(),
            validator_private_key: self.validator_private_key.clone(),
            custom_fee_token_address: self.custom_fee_token_address.clone(),
            variant: self.variant,
            submission: self.submission,
            parent_chain: self.parent_chain,
            parent_chain_rpc_url: self.parent_chain_rpc_url.clone(),
            rollup_creator: self.rollup_creator.clone(),
            chain_id: self.chain_id,
            chain_name: self.chain_name.clone(),
            data_availability_committee: self.data_availability_committee,
            initial_arbos_version: self.initial_arbos_version,
            wasm_module_root: self.wasm_module_root.clone(),
            min_l2_base_fee: self.min_l2_base_fee,
            output: self.output.clone(),
            receipt_timeout: std::time::Duration::from_secs(self.receipt_timeout),
        }
    }
}
