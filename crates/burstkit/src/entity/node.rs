use serde::Serialize;

use crate::value::{BurstAddress, BurstId};

/// Network constants from `getConstants`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Constants {
    pub genesis_block_id: BurstId,
    pub genesis_account_id: BurstAddress,
    pub max_block_payload_length: u64,
    pub max_arbitrary_message_length: u64,
}
