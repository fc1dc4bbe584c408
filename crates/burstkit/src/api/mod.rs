//! Node API abstraction layer.
//!
//! Defines the [`BurstNodeService`] trait and provides the HTTP
//! implementation ([`http::HttpNodeService`]) plus a test mock
//! (`mock::ScriptedNodeService`).

pub mod http;
#[cfg(test)]
pub mod mock;

pub use http::HttpNodeService;

use async_trait::async_trait;

use crate::entity::{
    Account, At, Block, BroadcastResult, Constants, EncryptedMessage, FeeSuggestion, MiningInfo,
    MultiOutRecipient, SubmitNonceResult, Transaction, TransactionCreated,
};
use crate::error::ClientError;
use crate::value::{BurstAddress, BurstId, BurstTimestamp, BurstValue, HexData};

/// Arguments for [`BurstNodeService::generate_create_at_transaction`].
///
/// `creation_bytes` is the pre-assembled AT blob; `code`/`data` plus the page
/// counts are the unassembled alternative the node also accepts. The node
/// combines whichever it is given.
#[derive(Debug, Clone, PartialEq)]
pub struct CreateAtRequest {
    pub name: String,
    pub description: String,
    pub creation_bytes: HexData,
    pub code: HexData,
    pub data: HexData,
    pub dpages: u32,
    pub cspages: u32,
    pub uspages: u32,
    pub min_activation: BurstValue,
}

/// The operations this client can issue against a Burst node.
///
/// Implementations handle transport, the node's error envelope, and response
/// decoding internally; every method resolves to a fully-decoded entity or a
/// [`ClientError`]. Transaction-building operations never broadcast — they
/// return unsigned bytes, and [`broadcast_transaction`](Self::broadcast_transaction)
/// is the explicit submission step.
#[async_trait]
pub trait BurstNodeService: Send + Sync {
    /// Fetch a block by its id.
    async fn get_block(&self, block: BurstId) -> Result<Block, ClientError>;

    /// Fetch the block at a height.
    async fn get_block_at_height(&self, height: u64) -> Result<Block, ClientError>;

    /// Fetch the last block generated at or before a network timestamp.
    async fn get_block_at_time(&self, timestamp: BurstTimestamp) -> Result<Block, ClientError>;

    /// Fetch the id of the block at a height.
    async fn get_block_id(&self, height: u64) -> Result<BurstId, ClientError>;

    /// Fetch the blocks in the inclusive index range, newest first.
    async fn get_blocks(&self, first_index: u64, last_index: u64)
        -> Result<Vec<Block>, ClientError>;

    /// Fetch the network constants.
    async fn get_constants(&self) -> Result<Constants, ClientError>;

    /// Fetch an account.
    async fn get_account(&self, account: BurstAddress) -> Result<Account, ClientError>;

    /// Fetch the ATs created by an account.
    async fn get_account_ats(&self, account: BurstAddress) -> Result<Vec<At>, ClientError>;

    /// Fetch the ids of the blocks an account forged.
    async fn get_account_block_ids(
        &self,
        account: BurstAddress,
    ) -> Result<Vec<BurstId>, ClientError>;

    /// Fetch the blocks an account forged.
    async fn get_account_blocks(&self, account: BurstAddress) -> Result<Vec<Block>, ClientError>;

    /// Fetch the ids of an account's transactions.
    async fn get_account_transaction_ids(
        &self,
        account: BurstAddress,
    ) -> Result<Vec<BurstId>, ClientError>;

    /// Fetch an account's transactions.
    async fn get_account_transactions(
        &self,
        account: BurstAddress,
    ) -> Result<Vec<Transaction>, ClientError>;

    /// Fetch the accounts that currently name `account` as reward recipient.
    async fn get_accounts_with_reward_recipient(
        &self,
        account: BurstAddress,
    ) -> Result<Vec<BurstAddress>, ClientError>;

    /// Fetch an AT by its id.
    async fn get_at(&self, at: BurstId) -> Result<At, ClientError>;

    /// Fetch the ids of all ATs on the chain.
    async fn get_at_ids(&self) -> Result<Vec<BurstId>, ClientError>;

    /// Fetch a transaction by its id.
    async fn get_transaction(&self, transaction: BurstId) -> Result<Transaction, ClientError>;

    /// Fetch a transaction by its full hash.
    async fn get_transaction_by_full_hash(
        &self,
        full_hash: &HexData,
    ) -> Result<Transaction, ClientError>;

    /// Fetch a transaction's raw bytes.
    async fn get_transaction_bytes(&self, transaction: BurstId) -> Result<HexData, ClientError>;

    /// Fetch the current mining info once. See [`crate::poll::subscribe`] for
    /// the change-detecting stream.
    async fn get_mining_info(&self) -> Result<MiningInfo, ClientError>;

    /// Fetch the reward recipient an account has assigned.
    async fn get_reward_recipient(
        &self,
        account: BurstAddress,
    ) -> Result<BurstAddress, ClientError>;

    /// Fetch the node's current fee recommendation.
    async fn suggest_fee(&self) -> Result<FeeSuggestion, ClientError>;

    /// Build an unsigned ordinary payment.
    async fn generate_transaction(
        &self,
        recipient: BurstAddress,
        sender_public_key: &HexData,
        amount: BurstValue,
        fee: BurstValue,
        deadline_minutes: u32,
    ) -> Result<TransactionCreated, ClientError>;

    /// Build an unsigned payment carrying a plain-text message.
    async fn generate_transaction_with_message(
        &self,
        recipient: BurstAddress,
        sender_public_key: &HexData,
        amount: BurstValue,
        fee: BurstValue,
        deadline_minutes: u32,
        message: &str,
    ) -> Result<TransactionCreated, ClientError>;

    /// Build an unsigned payment carrying a binary message.
    async fn generate_transaction_with_binary_message(
        &self,
        recipient: BurstAddress,
        sender_public_key: &HexData,
        amount: BurstValue,
        fee: BurstValue,
        deadline_minutes: u32,
        message: &HexData,
    ) -> Result<TransactionCreated, ClientError>;

    /// Build an unsigned payment carrying an already-encrypted message.
    async fn generate_transaction_with_encrypted_message(
        &self,
        recipient: BurstAddress,
        sender_public_key: &HexData,
        amount: BurstValue,
        fee: BurstValue,
        deadline_minutes: u32,
        message: &EncryptedMessage,
    ) -> Result<TransactionCreated, ClientError>;

    /// Build an unsigned payment carrying a message encrypted to the sender.
    async fn generate_transaction_with_encrypted_message_to_self(
        &self,
        recipient: BurstAddress,
        sender_public_key: &HexData,
        amount: BurstValue,
        fee: BurstValue,
        deadline_minutes: u32,
        message: &EncryptedMessage,
    ) -> Result<TransactionCreated, ClientError>;

    /// Build an unsigned multi-out payment with per-recipient amounts.
    /// Requires 2–64 recipients; fails before any network I/O otherwise.
    async fn generate_multi_out_transaction(
        &self,
        sender_public_key: &HexData,
        fee: BurstValue,
        deadline_minutes: u32,
        recipients: &[MultiOutRecipient],
    ) -> Result<TransactionCreated, ClientError>;

    /// Build an unsigned equal-split multi-out payment.
    /// Requires 2–128 distinct recipients; fails before any network I/O
    /// otherwise.
    async fn generate_multi_out_same_transaction(
        &self,
        sender_public_key: &HexData,
        amount: BurstValue,
        fee: BurstValue,
        deadline_minutes: u32,
        recipients: &[BurstAddress],
    ) -> Result<TransactionCreated, ClientError>;

    /// Build an unsigned AT-creation transaction.
    async fn generate_create_at_transaction(
        &self,
        sender_public_key: &HexData,
        fee: BurstValue,
        deadline_minutes: u32,
        request: &CreateAtRequest,
    ) -> Result<TransactionCreated, ClientError>;

    /// Broadcast signed transaction bytes.
    async fn broadcast_transaction(
        &self,
        transaction_bytes: &HexData,
    ) -> Result<BroadcastResult, ClientError>;

    /// Submit a mining nonce for the current block.
    async fn submit_nonce(
        &self,
        passphrase: &str,
        nonce: u64,
        account: Option<BurstId>,
    ) -> Result<SubmitNonceResult, ClientError>;
}
