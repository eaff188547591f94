//! Chain id generation for new rollups.

use std::ops::RangeInclusive;

use rand::Rng;

/// Range random chain ids are drawn from.
///
/// Sits above the ids of most public networks and stays within `u32` so the id
/// is accepted by wallets and tooling that store chain ids in 32 bits.
pub const GENERATED_CHAIN_ID_RANGE: RangeInclusive<u64> = 1_000_000_000..=4_294_967_295;

/// Well-known chain ids that a generated id must never take.
const RESERVED_CHAIN_IDS: &[u64] = &[
    1,          // Ethereum
    10,         // OP Mainnet
    56,         // BNB Smart Chain
    100,        // Gnosis
    137,        // Polygon
    8453,       // Base
    17000,      // Holesky
    42161,      // Arbitrum One
    42170,      // Arbitrum Nova
    43114,      // Avalanche C-Chain
    84532,      // Base Sepolia
    421614,     // Arbitrum Sepolia
    11155111,   // Sepolia
    11155420,   // OP Sepolia
    1313161554, // Aurora
    1666600000, // Harmony
    1666700000, // Harmony testnet
    2046399126, // SKALE Europa
];

/// Whether `chain_id` belongs to a well-known network.
pub fn is_reserved_chain_id(chain_id: u64) -> bool {
    RESERVED_CHAIN_IDS.contains(&chain_id)
}

/// Generate a random chain id for a new rollup.
pub fn generate_chain_id() -> u64 {
    let mut rng = rand::rng();
    loop {
        let chain_id = rng.random_range(GENERATED_CHAIN_ID_RANGE);
        if !is_reserved_chain_id(chain_id) {
            return chain_id;
        }
    }
}
