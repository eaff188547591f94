//! Parent chains a rollup can be launched on.

use std::{fmt, str::FromStr};

use alloy_core::primitives::{Address, address};

/// Max batch data size accepted by the sequencer inbox on Arbitrum parent chains.
pub const ARBITRUM_PARENT_MAX_DATA_SIZE: u64 = 104_857;

/// Max batch data size accepted by the sequencer inbox on Ethereum parent chains.
pub const ETHEREUM_PARENT_MAX_DATA_SIZE: u64 = 117_964;

/// The chain the rollup settles to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum ParentChain {
    #[default]
    ArbitrumSepolia,
    Sepolia,
    /// Any other chain, identified by its chain id. Its RPC URL and
    /// RollupCreator address must be configured explicitly.
    Custom(u64),
}

impl fmt::Display for ParentChain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ArbitrumSepolia => f.write_str("arbitrum-sepolia"),
            Self::Sepolia => f.write_str("sepolia"),
            Self::Custom(id) => write!(f, "{}", id),
        }
    }
}

impl FromStr for ParentChain {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "arbitrum-sepolia" => Ok(Self::ArbitrumSepolia),
            "sepolia" => Ok(Self::Sepolia),
            other => other
                .parse::<u64>()
                .map(Self::from_chain_id)
                .map_err(|_| {
                    anyhow::anyhow!(
                        "Unknown parent chain '{}': expected arbitrum-sepolia, sepolia or a chain id",
                        other
                    )
                }),
        }
    }
}

impl ParentChain {
    /// Map a chain id to a known parent chain, or [`ParentChain::Custom`].
    pub fn from_chain_id(chain_id: u64) -> Self {
        match chain_id {
            421614 => Self::ArbitrumSepolia,
            11155111 => Self::Sepolia,
            id => Self::Custom(id),
        }
    }

    pub fn chain_id(&self) -> u64 {
        match self {
            Self::ArbitrumSepolia => 421614,
            Self::Sepolia => 11155111,
            Self::Custom(id) => *id,
        }
    }

    /// The public RPC endpoint used when none is configured.
    pub fn default_rpc_url(&self) -> Option<&'static str> {
        match self {
            Self::ArbitrumSepolia => Some("https://sepolia-rollup.arbitrum.io/rpc"),
            Self::Sepolia => Some("https://ethereum-sepolia-rpc.publicnode.com"),
            Self::Custom(_) => None,
        }
    }

    pub fn explorer_url(&self) -> Option<&'static str> {
        match self {
            Self::ArbitrumSepolia => Some("https://sepolia.arbiscan.io"),
            Self::Sepolia => Some("https://sepolia.etherscan.io"),
            Self::Custom(_) => None,
        }
    }

    /// Address of the canonical RollupCreator deployment.
    pub fn rollup_creator(&self) -> Option<Address> {
        match self {
            Self::ArbitrumSepolia => Some(address!("0x06E341073b2749e0Bb9912461351f716DeCDa9b0")),
            Self::Sepolia => Some(address!("0xfbd0b034e6305788007f6e0123cc5eae701a5751")),
            Self::Custom(_) => None,
        }
    }

    /// Whether the chain is itself an Arbitrum chain (the rollup is then an L3).
    pub fn is_arbitrum(&self) -> bool {
        matches!(self, Self::ArbitrumSepolia)
    }

    pub fn max_data_size(&self) -> u64 {
        if self.is_arbitrum() {
            ARBITRUM_PARENT_MAX_DATA_SIZE
        } else {
            ETHEREUM_PARENT_MAX_DATA_SIZE
        }
    }

    /// Link to a transaction on the chain's block explorer, if it has one.
    pub fn explorer_tx_url(&self, tx_hash: impl fmt::Display) -> Option<String> {
        self.explorer_url().map(|base| format!("{}/tx/{}", base, tx_hash))
    }
}
