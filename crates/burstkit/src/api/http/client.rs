use std::num::NonZeroU32;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use arc_swap::ArcSwap;
use async_trait::async_trait;
use governor::clock::DefaultClock;
use governor::state::{InMemoryState, NotKeyed};
use governor::{Quota, RateLimiter};
use reqwest::Method;
use tracing::{debug, trace};

use crate::api::{BurstNodeService, CreateAtRequest};
use crate::entity::{
    Account, At, Block, BroadcastResult, Constants, EncryptedMessage, FeeSuggestion, MiningInfo,
    MultiOutRecipient, SubmitNonceResult, Transaction, TransactionCreated,
};
use crate::error::ClientError;
use crate::value::{BurstAddress, BurstId, BurstTimestamp, BurstValue, HexData};

use super::connection::{build_connection, Connection};
use super::decode;
use super::envelope::parse_checked_body;
use super::params::{multi_out_recipients, multi_out_same_recipients, QueryParams};

type DirectRateLimiter = RateLimiter<NotKeyed, InMemoryState, DefaultClock>;

// ==============================================================================
// HttpNodeService — Burst node API client over HTTP(S)
// ==============================================================================

/// Burst node HTTP API client.
///
/// One instance is shared freely across tasks. The connection (transport,
/// endpoint, user agent) lives in an atomically swappable cell:
/// [`update_connection`](Self::update_connection) replaces the whole pair in
/// one store, and every operation snapshots it once up front, so concurrent
/// callers observe either the fully-old or the fully-new connection.
pub struct HttpNodeService {
    connection: ArcSwap<Connection>,
    limiter: Option<DirectRateLimiter>,
    next_id: AtomicU64,
}

impl HttpNodeService {
    /// Create a client for a node base address such as
    /// `https://wallet.burst.example:8125`.
    ///
    /// `user_agent` defaults to `burstkit/<version>`. If
    /// `requests_per_second` is set, outbound requests are rate-limited.
    pub fn new(
        node_address: &str,
        user_agent: Option<&str>,
        requests_per_second: Option<u32>,
    ) -> Result<Self, ClientError> {
        let connection = build_connection(node_address, user_agent)?;

        let limiter = match requests_per_second {
            None => None,
            Some(limit) => {
                let limit = NonZeroU32::new(limit).ok_or_else(|| {
                    ClientError::InvalidArgument(
                        "requests_per_second must be at least 1".to_owned(),
                    )
                })?;
                Some(RateLimiter::direct(Quota::per_second(limit)))
            }
        };

        Ok(Self {
            connection: ArcSwap::from_pointee(connection),
            limiter,
            next_id: AtomicU64::new(initial_request_id()),
        })
    }

    /// Repoint the client at a new node address and user agent.
    ///
    /// The replacement is a single atomic store; operations already in
    /// flight finish against the connection they snapshotted.
    pub fn update_connection(
        &self,
        node_address: &str,
        user_agent: Option<&str>,
    ) -> Result<(), ClientError> {
        let connection = build_connection(node_address, user_agent)?;
        self.connection.store(Arc::new(connection));
        Ok(())
    }

    /// The node base address currently in use.
    pub fn node_address(&self) -> String {
        self.connection.load().node_address.clone()
    }

    /// The user agent currently in use.
    pub fn user_agent(&self) -> String {
        self.connection.load().user_agent.clone()
    }

    /// The (node address, user agent) pair, read from one snapshot: the two
    /// halves always belong to the same connection.
    pub fn connection_info(&self) -> (String, String) {
        let connection = self.connection.load();
        (connection.node_address.clone(), connection.user_agent.clone())
    }

    async fn request(
        &self,
        method: Method,
        request_type: &'static str,
        params: QueryParams,
    ) -> Result<serde_json::Value, ClientError> {
        let connection = self.connection.load_full();
        if let Some(limiter) = &self.limiter {
            limiter.until_ready().await;
        }

        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        debug!(
            api.id = id,
            api.request = request_type,
            api.params = params.pairs().len(),
            "api call"
        );

        let response = connection
            .http
            .request(method, connection.endpoint.clone())
            .query(&[("requestType", request_type)])
            .query(params.pairs())
            .send()
            .await?;
        let status = response.status();

        let body = response.text().await?;
        debug!(api.id = id, api.request = request_type, %status, body_len = body.len(), "api response");
        trace!(api.id = id, api.request = request_type, body = %body, "api response body");

        parse_checked_body(&body)
    }

    async fn get(
        &self,
        request_type: &'static str,
        params: QueryParams,
    ) -> Result<serde_json::Value, ClientError> {
        self.request(Method::GET, request_type, params).await
    }

    async fn post(
        &self,
        request_type: &'static str,
        params: QueryParams,
    ) -> Result<serde_json::Value, ClientError> {
        self.request(Method::POST, request_type, params).await
    }

    async fn get_block_by(&self, params: QueryParams) -> Result<Block, ClientError> {
        let raw = self.get("getBlock", params).await?;
        Ok(decode::decode_block(&raw)?)
    }

    /// Shared parameter assembly for the `sendMoney` family.
    async fn send_money(
        &self,
        recipient: BurstAddress,
        sender_public_key: &HexData,
        amount: BurstValue,
        fee: BurstValue,
        deadline_minutes: u32,
        payload: MessagePayload<'_>,
    ) -> Result<TransactionCreated, ClientError> {
        let mut params = QueryParams::new();
        params.set("recipient", recipient.to_wire_string());
        params.set("amountNQT", amount.to_planck_string());
        params.set("publicKey", sender_public_key.to_hex_string());
        params.set("feeNQT", fee.to_planck_string());
        params.set("deadline", deadline_minutes.to_string());
        params.set("broadcast", "false");

        match payload {
            MessagePayload::None => {}
            MessagePayload::Text(message) => {
                params.set("message", message);
                params.set("messageIsText", "true");
            }
            MessagePayload::Binary(message) => {
                params.set("message", message.to_hex_string());
                params.set("messageIsText", "false");
            }
            MessagePayload::Encrypted(message) => {
                params.set("messageToEncryptIsText", bool_str(message.is_text));
                params.set("encryptedMessageData", message.data.to_hex_string());
                params.set("encryptedMessageNonce", message.nonce.to_hex_string());
            }
            MessagePayload::EncryptedToSelf(message) => {
                params.set("messageToEncryptToSelfIsText", bool_str(message.is_text));
                params.set("encryptedToSelfMessageData", message.data.to_hex_string());
                params.set("encryptedToSelfMessageNonce", message.nonce.to_hex_string());
            }
        }

        let raw = self.post("sendMoney", params).await?;
        Ok(decode::decode_transaction_created(&raw)?)
    }
}

enum MessagePayload<'a> {
    None,
    Text(&'a str),
    Binary(&'a HexData),
    Encrypted(&'a EncryptedMessage),
    EncryptedToSelf(&'a EncryptedMessage),
}

fn bool_str(b: bool) -> &'static str {
    if b {
        "true"
    } else {
        "false"
    }
}

#[async_trait]
impl BurstNodeService for HttpNodeService {
    async fn get_block(&self, block: BurstId) -> Result<Block, ClientError> {
        let mut params = QueryParams::new();
        params.set("block", block.to_wire_string());
        self.get_block_by(params).await
    }

    async fn get_block_at_height(&self, height: u64) -> Result<Block, ClientError> {
        let mut params = QueryParams::new();
        params.set("height", height.to_string());
        self.get_block_by(params).await
    }

    async fn get_block_at_time(&self, timestamp: BurstTimestamp) -> Result<Block, ClientError> {
        let mut params = QueryParams::new();
        params.set("timestamp", timestamp.epoch_seconds().to_string());
        self.get_block_by(params).await
    }

    async fn get_block_id(&self, height: u64) -> Result<BurstId, ClientError> {
        let mut params = QueryParams::new();
        params.set("height", height.to_string());
        let raw = self.get("getBlockId", params).await?;
        Ok(decode::decode_block_id(&raw)?)
    }

    async fn get_blocks(
        &self,
        first_index: u64,
        last_index: u64,
    ) -> Result<Vec<Block>, ClientError> {
        let mut params = QueryParams::new();
        params.set("firstIndex", first_index.to_string());
        params.set("lastIndex", last_index.to_string());
        let raw = self.get("getBlocks", params).await?;
        Ok(decode::decode_blocks(&raw, "blocks")?)
    }

    async fn get_constants(&self) -> Result<Constants, ClientError> {
        let raw = self.get("getConstants", QueryParams::new()).await?;
        Ok(decode::decode_constants(&raw)?)
    }

    async fn get_account(&self, account: BurstAddress) -> Result<Account, ClientError> {
        let mut params = QueryParams::new();
        params.set("account", account.to_wire_string());
        let raw = self.get("getAccount", params).await?;
        Ok(decode::decode_account(&raw)?)
    }

    async fn get_account_ats(&self, account: BurstAddress) -> Result<Vec<At>, ClientError> {
        let mut params = QueryParams::new();
        params.set("account", account.to_wire_string());
        let raw = self.get("getAccountATs", params).await?;
        Ok(decode::decode_ats(&raw, "ats")?)
    }

    async fn get_account_block_ids(
        &self,
        account: BurstAddress,
    ) -> Result<Vec<BurstId>, ClientError> {
        let mut params = QueryParams::new();
        params.set("account", account.to_wire_string());
        let raw = self.get("getAccountBlockIds", params).await?;
        Ok(decode::decode_id_list(&raw, "blockIds")?)
    }

    async fn get_account_blocks(&self, account: BurstAddress) -> Result<Vec<Block>, ClientError> {
        let mut params = QueryParams::new();
        params.set("account", account.to_wire_string());
        let raw = self.get("getAccountBlocks", params).await?;
        Ok(decode::decode_blocks(&raw, "blocks")?)
    }

    async fn get_account_transaction_ids(
        &self,
        account: BurstAddress,
    ) -> Result<Vec<BurstId>, ClientError> {
        let mut params = QueryParams::new();
        params.set("account", account.to_wire_string());
        let raw = self.get("getAccountTransactionIds", params).await?;
        Ok(decode::decode_id_list(&raw, "transactionIds")?)
    }

    async fn get_account_transactions(
        &self,
        account: BurstAddress,
    ) -> Result<Vec<Transaction>, ClientError> {
        let mut params = QueryParams::new();
        params.set("account", account.to_wire_string());
        let raw = self.get("getAccountTransactions", params).await?;
        Ok(decode::decode_transactions(&raw, "transactions")?)
    }

    async fn get_accounts_with_reward_recipient(
        &self,
        account: BurstAddress,
    ) -> Result<Vec<BurstAddress>, ClientError> {
        let mut params = QueryParams::new();
        params.set("account", account.to_wire_string());
        let raw = self.get("getAccountsWithRewardRecipient", params).await?;
        Ok(decode::decode_address_list(&raw, "accounts")?)
    }

    async fn get_at(&self, at: BurstId) -> Result<At, ClientError> {
        let mut params = QueryParams::new();
        params.set("at", at.to_wire_string());
        let raw = self.get("getAT", params).await?;
        Ok(decode::decode_at(&raw)?)
    }

    async fn get_at_ids(&self) -> Result<Vec<BurstId>, ClientError> {
        let raw = self.get("getATIds", QueryParams::new()).await?;
        Ok(decode::decode_id_list(&raw, "atIds")?)
    }

    async fn get_transaction(&self, transaction: BurstId) -> Result<Transaction, ClientError> {
        let mut params = QueryParams::new();
        params.set("transaction", transaction.to_wire_string());
        let raw = self.get("getTransaction", params).await?;
        Ok(decode::decode_transaction(&raw)?)
    }

    async fn get_transaction_by_full_hash(
        &self,
        full_hash: &HexData,
    ) -> Result<Transaction, ClientError> {
        let mut params = QueryParams::new();
        params.set("fullHash", full_hash.to_hex_string());
        let raw = self.get("getTransaction", params).await?;
        Ok(decode::decode_transaction(&raw)?)
    }

    async fn get_transaction_bytes(&self, transaction: BurstId) -> Result<HexData, ClientError> {
        let mut params = QueryParams::new();
        params.set("transaction", transaction.to_wire_string());
        let raw = self.get("getTransactionBytes", params).await?;
        Ok(decode::decode_transaction_bytes(&raw)?)
    }

    async fn get_mining_info(&self) -> Result<MiningInfo, ClientError> {
        let raw = self.get("getMiningInfo", QueryParams::new()).await?;
        Ok(decode::decode_mining_info(&raw)?)
    }

    async fn get_reward_recipient(
        &self,
        account: BurstAddress,
    ) -> Result<BurstAddress, ClientError> {
        let mut params = QueryParams::new();
        params.set("account", account.to_wire_string());
        let raw = self.get("getRewardRecipient", params).await?;
        Ok(decode::decode_reward_recipient(&raw)?)
    }

    async fn suggest_fee(&self) -> Result<FeeSuggestion, ClientError> {
        let raw = self.get("suggestFee", QueryParams::new()).await?;
        Ok(decode::decode_fee_suggestion(&raw)?)
    }

    async fn generate_transaction(
        &self,
        recipient: BurstAddress,
        sender_public_key: &HexData,
        amount: BurstValue,
        fee: BurstValue,
        deadline_minutes: u32,
    ) -> Result<TransactionCreated, ClientError> {
        self.send_money(
            recipient,
            sender_public_key,
            amount,
            fee,
            deadline_minutes,
            MessagePayload::None,
        )
        .await
    }

    async fn generate_transaction_with_message(
        &self,
        recipient: BurstAddress,
        sender_public_key: &HexData,
        amount: BurstValue,
        fee: BurstValue,
        deadline_minutes: u32,
        message: &str,
    ) -> Result<TransactionCreated, ClientError> {
        self.send_money(
            recipient,
            sender_public_key,
            amount,
            fee,
            deadline_minutes,
            MessagePayload::Text(message),
        )
        .await
    }

    async fn generate_transaction_with_binary_message(
        &self,
        recipient: BurstAddress,
        sender_public_key: &HexData,
        amount: BurstValue,
        fee: BurstValue,
        deadline_minutes: u32,
        message: &HexData,
    ) -> Result<TransactionCreated, ClientError> {
        self.send_money(
            recipient,
            sender_public_key,
            amount,
            fee,
            deadline_minutes,
            MessagePayload::Binary(message),
        )
        .await
    }

    async fn generate_transaction_with_encrypted_message(
        &self,
        recipient: BurstAddress,
        sender_public_key: &HexData,
        amount: BurstValue,
        fee: BurstValue,
        deadline_minutes: u32,
        message: &EncryptedMessage,
    ) -> Result<TransactionCreated, ClientError> {
        self.send_money(
            recipient,
            sender_public_key,
            amount,
            fee,
            deadline_minutes,
            MessagePayload::Encrypted(message),
        )
        .await
    }

    async fn generate_transaction_with_encrypted_message_to_self(
        &self,
        recipient: BurstAddress,
        sender_public_key: &HexData,
        amount: BurstValue,
        fee: BurstValue,
        deadline_minutes: u32,
        message: &EncryptedMessage,
    ) -> Result<TransactionCreated, ClientError> {
        self.send_money(
            recipient,
            sender_public_key,
            amount,
            fee,
            deadline_minutes,
            MessagePayload::EncryptedToSelf(message),
        )
        .await
    }

    async fn generate_multi_out_transaction(
        &self,
        sender_public_key: &HexData,
        fee: BurstValue,
        deadline_minutes: u32,
        recipients: &[MultiOutRecipient],
    ) -> Result<TransactionCreated, ClientError> {
        let recipients = multi_out_recipients(recipients)?;

        let mut params = QueryParams::new();
        params.set("publicKey", sender_public_key.to_hex_string());
        params.set("feeNQT", fee.to_planck_string());
        params.set("deadline", deadline_minutes.to_string());
        params.set("broadcast", "false");
        params.set("recipients", recipients);
        let raw = self.post("sendMoneyMulti", params).await?;
        Ok(decode::decode_transaction_created(&raw)?)
    }

    async fn generate_multi_out_same_transaction(
        &self,
        sender_public_key: &HexData,
        amount: BurstValue,
        fee: BurstValue,
        deadline_minutes: u32,
        recipients: &[BurstAddress],
    ) -> Result<TransactionCreated, ClientError> {
        let recipients = multi_out_same_recipients(recipients)?;

        let mut params = QueryParams::new();
        params.set("publicKey", sender_public_key.to_hex_string());
        params.set("feeNQT", fee.to_planck_string());
        params.set("deadline", deadline_minutes.to_string());
        params.set("broadcast", "false");
        params.set("recipients", recipients);
        params.set("amountNQT", amount.to_planck_string());
        let raw = self.post("sendMoneyMultiSame", params).await?;
        Ok(decode::decode_transaction_created(&raw)?)
    }

    async fn generate_create_at_transaction(
        &self,
        sender_public_key: &HexData,
        fee: BurstValue,
        deadline_minutes: u32,
        request: &CreateAtRequest,
    ) -> Result<TransactionCreated, ClientError> {
        let mut params = QueryParams::new();
        params.set("publicKey", sender_public_key.to_hex_string());
        params.set("feeNQT", fee.to_planck_string());
        params.set("deadline", deadline_minutes.to_string());
        params.set("broadcast", "false");
        params.set("name", request.name.clone());
        params.set("description", request.description.clone());
        params.set("creationBytes", request.creation_bytes.to_hex_string());
        params.set("code", request.code.to_hex_string());
        params.set("data", request.data.to_hex_string());
        params.set("dpages", request.dpages.to_string());
        params.set("cspages", request.cspages.to_string());
        params.set("uspages", request.uspages.to_string());
        params.set("minActivationAmountNQT", request.min_activation.to_planck_string());
        let raw = self.post("createATProgram", params).await?;
        Ok(decode::decode_transaction_created(&raw)?)
    }

    async fn broadcast_transaction(
        &self,
        transaction_bytes: &HexData,
    ) -> Result<BroadcastResult, ClientError> {
        let mut params = QueryParams::new();
        params.set("transactionBytes", transaction_bytes.to_hex_string());
        let raw = self.post("broadcastTransaction", params).await?;
        Ok(decode::decode_broadcast_result(&raw)?)
    }

    async fn submit_nonce(
        &self,
        passphrase: &str,
        nonce: u64,
        account: Option<BurstId>,
    ) -> Result<SubmitNonceResult, ClientError> {
        let mut params = QueryParams::new();
        params.set("secretPhrase", passphrase);
        params.set("nonce", nonce.to_string());
        params.set_opt("accountId", account.map(|id| id.to_wire_string()));
        let raw = self.post("submitNonce", params).await?;
        Ok(decode::decode_submit_nonce_result(&raw)?)
    }
}

fn initial_request_id() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(1)
}
