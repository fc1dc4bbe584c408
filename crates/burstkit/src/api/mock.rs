//! A scripted mock service for poller and composition tests.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::entity::{
    Account, At, Block, BroadcastResult, Constants, EncryptedMessage, FeeSuggestion, MiningInfo,
    MultiOutRecipient, SubmitNonceResult, Transaction, TransactionCreated,
};
use crate::error::ClientError;
use crate::value::{BurstAddress, BurstId, BurstTimestamp, BurstValue, HexData};

use super::{BurstNodeService, CreateAtRequest};

/// Replays canned `getMiningInfo` results in order; once the script runs dry
/// every further call fails, which terminates a poller cleanly. Operations
/// the test did not script are unimplemented.
pub struct ScriptedNodeService {
    mining_info: Mutex<VecDeque<Result<MiningInfo, ClientError>>>,
}

impl ScriptedNodeService {
    pub fn with_mining_info(script: Vec<Result<MiningInfo, ClientError>>) -> Self {
        Self {
            mining_info: Mutex::new(VecDeque::from(script)),
        }
    }
}

#[async_trait]
impl BurstNodeService for ScriptedNodeService {
    async fn get_mining_info(&self) -> Result<MiningInfo, ClientError> {
        self.mining_info
            .lock()
            .expect("script lock")
            .pop_front()
            .unwrap_or_else(|| Err(ClientError::InvalidResponse("script exhausted".into())))
    }

    async fn get_block(&self, _block: BurstId) -> Result<Block, ClientError> {
        unimplemented!("not scripted")
    }

    async fn get_block_at_height(&self, _height: u64) -> Result<Block, ClientError> {
        unimplemented!("not scripted")
    }

    async fn get_block_at_time(&self, _timestamp: BurstTimestamp) -> Result<Block, ClientError> {
        unimplemented!("not scripted")
    }

    async fn get_block_id(&self, _height: u64) -> Result<BurstId, ClientError> {
        unimplemented!("not scripted")
    }

    async fn get_blocks(
        &self,
        _first_index: u64,
        _last_index: u64,
    ) -> Result<Vec<Block>, ClientError> {
        unimplemented!("not scripted")
    }

    async fn get_constants(&self) -> Result<Constants, ClientError> {
        unimplemented!("not scripted")
    }

    async fn get_account(&self, _account: BurstAddress) -> Result<Account, ClientError> {
        unimplemented!("not scripted")
    }

    async fn get_account_ats(&self, _account: BurstAddress) -> Result<Vec<At>, ClientError> {
        unimplemented!("not scripted")
    }

    async fn get_account_block_ids(
        &self,
        _account: BurstAddress,
    ) -> Result<Vec<BurstId>, ClientError> {
        unimplemented!("not scripted")
    }

    async fn get_account_blocks(&self, _account: BurstAddress) -> Result<Vec<Block>, ClientError> {
        unimplemented!("not scripted")
    }

    async fn get_account_transaction_ids(
        &self,
        _account: BurstAddress,
    ) -> Result<Vec<BurstId>, ClientError> {
        unimplemented!("not scripted")
    }

    async fn get_account_transactions(
        &self,
        _account: BurstAddress,
    ) -> Result<Vec<Transaction>, ClientError> {
        unimplemented!("not scripted")
    }

    async fn get_accounts_with_reward_recipient(
        &self,
        _account: BurstAddress,
    ) -> Result<Vec<BurstAddress>, ClientError> {
        unimplemented!("not scripted")
    }

    async fn get_at(&self, _at: BurstId) -> Result<At, ClientError> {
        unimplemented!("not scripted")
    }

    async fn get_at_ids(&self) -> Result<Vec<BurstId>, ClientError> {
        unimplemented!("not scripted")
    }

    async fn get_transaction(&self, _transaction: BurstId) -> Result<Transaction, ClientError> {
        unimplemented!("not scripted")
    }

    async fn get_transaction_by_full_hash(
        &self,
        _full_hash: &HexData,
    ) -> Result<Transaction, ClientError> {
        unimplemented!("not scripted")
    }

    async fn get_transaction_bytes(&self, _transaction: BurstId) -> Result<HexData, ClientError> {
        unimplemented!("not scripted")
    }

    async fn get_reward_recipient(
        &self,
        _account: BurstAddress,
    ) -> Result<BurstAddress, ClientError> {
        unimplemented!("not scripted")
    }

    async fn suggest_fee(&self) -> Result<FeeSuggestion, ClientError> {
        unimplemented!("not scripted")
    }

    async fn generate_transaction(
        &self,
        _recipient: BurstAddress,
        _sender_public_key: &HexData,
        _amount: BurstValue,
        _fee: BurstValue,
        _deadline_minutes: u32,
    ) -> Result<TransactionCreated, ClientError> {
        unimplemented!("not scripted")
    }

    async fn generate_transaction_with_message(
        &self,
        _recipient: BurstAddress,
        _sender_public_key: &HexData,
        _amount: BurstValue,
        _fee: BurstValue,
        _deadline_minutes: u32,
        _message: &str,
    ) -> Result<TransactionCreated, ClientError> {
        unimplemented!("not scripted")
    }

    async fn generate_transaction_with_binary_message(
        &self,
        _recipient: BurstAddress,
        _sender_public_key: &HexData,
        _amount: BurstValue,
        _fee: BurstValue,
        _deadline_minutes: u32,
        _message: &HexData,
    ) -> Result<TransactionCreated, ClientError> {
        unimplemented!("not scripted")
    }

    async fn generate_transaction_with_encrypted_message(
        &self,
        _recipient: BurstAddress,
        _sender_public_key: &HexData,
        _amount: BurstValue,
        _fee: BurstValue,
        _deadline_minutes: u32,
        _message: &EncryptedMessage,
    ) -> Result<TransactionCreated, ClientError> {
        unimplemented!("not scripted")
    }

    async fn generate_transaction_with_encrypted_message_to_self(
        &self,
        _recipient: BurstAddress,
        _sender_public_key: &HexData,
        _amount: BurstValue,
        _fee: BurstValue,
        _deadline_minutes: u32,
        _message: &EncryptedMessage,
    ) -> Result<TransactionCreated, ClientError> {
        unimplemented!("not scripted")
    }

    async fn generate_multi_out_transaction(
        &self,
        _sender_public_key: &HexData,
        _fee: BurstValue,
        _deadline_minutes: u32,
        _recipients: &[MultiOutRecipient],
    ) -> Result<TransactionCreated, ClientError> {
        unimplemented!("not scripted")
    }

    async fn generate_multi_out_same_transaction(
        &self,
        _sender_public_key: &HexData,
        _amount: BurstValue,
        _fee: BurstValue,
        _deadline_minutes: u32,
        _recipients: &[BurstAddress],
    ) -> Result<TransactionCreated, ClientError> {
        unimplemented!("not scripted")
    }

    async fn generate_create_at_transaction(
        &self,
        _sender_public_key: &HexData,
        _fee: BurstValue,
        _deadline_minutes: u32,
        _request: &CreateAtRequest,
    ) -> Result<TransactionCreated, ClientError> {
        unimplemented!("not scripted")
    }

    async fn broadcast_transaction(
        &self,
        _transaction_bytes: &HexData,
    ) -> Result<BroadcastResult, ClientError> {
        unimplemented!("not scripted")
    }

    async fn submit_nonce(
        &self,
        _passphrase: &str,
        _nonce: u64,
        _account: Option<BurstId>,
    ) -> Result<SubmitNonceResult, ClientError> {
        unimplemented!("not scripted")
    }
}
