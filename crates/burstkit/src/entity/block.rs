use serde::Serialize;

use crate::value::{BurstAddress, BurstId, BurstTimestamp, BurstValue, HexData};

/// A block as reported by `getBlock`/`getBlocks`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Block {
    pub id: BurstId,
    pub height: u64,
    pub generator: BurstAddress,
    pub generator_public_key: HexData,
    pub timestamp: BurstTimestamp,
    pub number_of_transactions: u64,
    pub total_amount: BurstValue,
    pub total_fee: BurstValue,
    pub payload_length: u64,
    pub version: u64,
    pub base_target: u64,
    pub nonce: u64,
    pub generation_signature: HexData,
    pub payload_hash: HexData,
    pub block_signature: HexData,
    /// Absent for the genesis block.
    pub previous_block: Option<BurstId>,
    /// Absent for the chain tip.
    pub next_block: Option<BurstId>,
    pub previous_block_hash: Option<HexData>,
    pub scoop_num: Option<u64>,
    pub transactions: Vec<BurstId>,
}
