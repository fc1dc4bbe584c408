use serde::Serialize;

use crate::entity::Attachment;
use crate::value::{BurstAddress, BurstId, BurstTimestamp, BurstValue, HexData};

/// A transaction as reported by `getTransaction`/`getAccountTransactions`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Transaction {
    pub id: BurstId,
    pub full_hash: HexData,
    pub transaction_type: u16,
    pub subtype: u16,
    pub version: u16,
    pub timestamp: BurstTimestamp,
    /// Minutes the unconfirmed transaction stays eligible for inclusion.
    pub deadline: u64,
    pub sender: BurstAddress,
    pub sender_public_key: HexData,
    /// Absent for transaction types without a recipient (e.g. AT creation).
    pub recipient: Option<BurstAddress>,
    pub amount: BurstValue,
    pub fee: BurstValue,
    pub signature: Option<HexData>,
    pub signature_hash: Option<HexData>,
    pub referenced_transaction_full_hash: Option<HexData>,
    pub height: u64,
    /// Absent while the transaction is unconfirmed.
    pub block: Option<BurstId>,
    pub block_timestamp: Option<BurstTimestamp>,
    pub confirmations: Option<u64>,
    pub ec_block_id: Option<BurstId>,
    pub ec_block_height: Option<u64>,
    pub attachment: Option<Attachment>,
}

/// An unsigned transaction built by one of the `generate*` operations.
///
/// Nothing has been broadcast; the caller signs the bytes elsewhere and
/// submits them through `broadcastTransaction`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TransactionCreated {
    pub unsigned_transaction_bytes: HexData,
    pub full_hash: Option<HexData>,
    pub transaction: Option<BurstId>,
    pub broadcasted: bool,
}

/// Outcome of `broadcastTransaction`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BroadcastResult {
    pub transaction: BurstId,
    pub full_hash: HexData,
}

/// Per-priority fee recommendation from `suggestFee`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeeSuggestion {
    pub cheap: BurstValue,
    pub standard: BurstValue,
    pub priority: BurstValue,
}
