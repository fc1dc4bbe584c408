//! Field-level response decoding.
//!
//! Every decoder is strict on required fields and lenient on unknown extras.
//! List decoders collect with `Result`, so one malformed element fails the
//! whole response rather than returning a partial list.

use serde_json::Value;

use crate::entity::{
    Account, At, Attachment, Block, BroadcastResult, Constants, EncryptedMessage, FeeSuggestion,
    MiningInfo, MultiOutRecipient, SubmitNonceResult, Transaction, TransactionCreated,
};
use crate::error::DecodeError;
use crate::value::{BurstAddress, BurstId, BurstTimestamp, BurstValue, HexData};

// ==============================================================================
// Field helpers
// ==============================================================================

fn require<'a>(value: &'a Value, field: &'static str) -> Result<&'a Value, DecodeError> {
    match value.get(field) {
        Some(v) if !v.is_null() => Ok(v),
        _ => Err(DecodeError::MissingField(field)),
    }
}

fn present<'a>(value: &'a Value, field: &'static str) -> Option<&'a Value> {
    value.get(field).filter(|v| !v.is_null())
}

fn invalid(field: &'static str, reason: impl Into<String>) -> DecodeError {
    DecodeError::InvalidField {
        field,
        reason: reason.into(),
    }
}

fn str_field<'a>(value: &'a Value, field: &'static str) -> Result<&'a str, DecodeError> {
    require(value, field)?
        .as_str()
        .ok_or_else(|| invalid(field, "expected a string"))
}

fn string_field(value: &Value, field: &'static str) -> Result<String, DecodeError> {
    str_field(value, field).map(str::to_owned)
}

fn opt_string_field(value: &Value, field: &'static str) -> Result<Option<String>, DecodeError> {
    match present(value, field) {
        None => Ok(None),
        Some(v) => v
            .as_str()
            .map(|s| Some(s.to_owned()))
            .ok_or_else(|| invalid(field, "expected a string")),
    }
}

/// The node renders most integers as JSON numbers but some (notably in
/// `getMiningInfo`) as decimal strings; both shapes are accepted.
fn flexible_u64(v: &Value) -> Option<u64> {
    match v {
        Value::Number(n) => n.as_u64(),
        Value::String(s) => s.parse().ok(),
        _ => None,
    }
}

fn u64_field(value: &Value, field: &'static str) -> Result<u64, DecodeError> {
    flexible_u64(require(value, field)?)
        .ok_or_else(|| invalid(field, "expected an unsigned integer"))
}

fn opt_u64_field(value: &Value, field: &'static str) -> Result<Option<u64>, DecodeError> {
    match present(value, field) {
        None => Ok(None),
        Some(v) => flexible_u64(v)
            .map(Some)
            .ok_or_else(|| invalid(field, "expected an unsigned integer")),
    }
}

fn u16_field(value: &Value, field: &'static str) -> Result<u16, DecodeError> {
    let n = u64_field(value, field)?;
    u16::try_from(n).map_err(|_| invalid(field, format!("out of range: {n}")))
}

fn bool_field(value: &Value, field: &'static str) -> Result<bool, DecodeError> {
    require(value, field)?
        .as_bool()
        .ok_or_else(|| invalid(field, "expected a boolean"))
}

fn opt_bool_field(value: &Value, field: &'static str) -> Result<Option<bool>, DecodeError> {
    match present(value, field) {
        None => Ok(None),
        Some(v) => v
            .as_bool()
            .map(Some)
            .ok_or_else(|| invalid(field, "expected a boolean")),
    }
}

fn id_field(value: &Value, field: &'static str) -> Result<BurstId, DecodeError> {
    BurstId::from_wire_str(str_field(value, field)?)
}

fn opt_id_field(value: &Value, field: &'static str) -> Result<Option<BurstId>, DecodeError> {
    match present(value, field) {
        None => Ok(None),
        Some(v) => {
            let s = v.as_str().ok_or_else(|| invalid(field, "expected a string"))?;
            BurstId::from_wire_str(s).map(Some)
        }
    }
}

fn address_field(value: &Value, field: &'static str) -> Result<BurstAddress, DecodeError> {
    BurstAddress::from_either_str(str_field(value, field)?)
}

fn opt_address_field(
    value: &Value,
    field: &'static str,
) -> Result<Option<BurstAddress>, DecodeError> {
    match present(value, field) {
        None => Ok(None),
        Some(v) => {
            let s = v.as_str().ok_or_else(|| invalid(field, "expected a string"))?;
            BurstAddress::from_either_str(s).map(Some)
        }
    }
}

fn amount_value(v: &Value) -> Result<BurstValue, DecodeError> {
    match v {
        Value::String(s) => BurstValue::from_planck_str(s),
        Value::Number(n) => n
            .as_u64()
            .map(BurstValue::from_planck)
            .ok_or_else(|| DecodeError::MalformedAmount(format!("not a planck count: `{n}`"))),
        other => Err(DecodeError::MalformedAmount(format!(
            "expected a planck string, got: {other}"
        ))),
    }
}

fn amount_field(value: &Value, field: &'static str) -> Result<BurstValue, DecodeError> {
    amount_value(require(value, field)?)
}

fn hex_field(value: &Value, field: &'static str) -> Result<HexData, DecodeError> {
    HexData::from_hex_str(str_field(value, field)?)
}

fn opt_hex_field(value: &Value, field: &'static str) -> Result<Option<HexData>, DecodeError> {
    match present(value, field) {
        None => Ok(None),
        Some(v) => {
            let s = v.as_str().ok_or_else(|| invalid(field, "expected a string"))?;
            HexData::from_hex_str(s).map(Some)
        }
    }
}

fn timestamp_field(value: &Value, field: &'static str) -> Result<BurstTimestamp, DecodeError> {
    flexible_u64(require(value, field)?)
        .map(BurstTimestamp::from_epoch_seconds)
        .ok_or_else(|| {
            DecodeError::MalformedTimestamp(format!("field `{field}` is not an epoch second count"))
        })
}

fn opt_timestamp_field(
    value: &Value,
    field: &'static str,
) -> Result<Option<BurstTimestamp>, DecodeError> {
    match present(value, field) {
        None => Ok(None),
        Some(v) => flexible_u64(v)
            .map(|n| Some(BurstTimestamp::from_epoch_seconds(n)))
            .ok_or_else(|| {
                DecodeError::MalformedTimestamp(format!(
                    "field `{field}` is not an epoch second count"
                ))
            }),
    }
}

fn array_field<'a>(value: &'a Value, field: &'static str) -> Result<&'a [Value], DecodeError> {
    require(value, field)?
        .as_array()
        .map(Vec::as_slice)
        .ok_or_else(|| invalid(field, "expected an array"))
}

// ==============================================================================
// List decoders
// ==============================================================================

pub(super) fn decode_id_list(value: &Value, field: &'static str) -> Result<Vec<BurstId>, DecodeError> {
    array_field(value, field)?
        .iter()
        .map(|v| {
            let s = v.as_str().ok_or_else(|| invalid(field, "expected string elements"))?;
            BurstId::from_wire_str(s)
        })
        .collect()
}

pub(super) fn decode_address_list(
    value: &Value,
    field: &'static str,
) -> Result<Vec<BurstAddress>, DecodeError> {
    array_field(value, field)?
        .iter()
        .map(|v| {
            let s = v.as_str().ok_or_else(|| invalid(field, "expected string elements"))?;
            BurstAddress::from_either_str(s)
        })
        .collect()
}

// ==============================================================================
// Entity decoders
// ==============================================================================

pub(super) fn decode_block(value: &Value) -> Result<Block, DecodeError> {
    Ok(Block {
        id: id_field(value, "block")?,
        height: u64_field(value, "height")?,
        generator: address_field(value, "generator")?,
        generator_public_key: hex_field(value, "generatorPublicKey")?,
        timestamp: timestamp_field(value, "timestamp")?,
        number_of_transactions: u64_field(value, "numberOfTransactions")?,
        total_amount: amount_field(value, "totalAmountNQT")?,
        total_fee: amount_field(value, "totalFeeNQT")?,
        payload_length: u64_field(value, "payloadLength")?,
        version: u64_field(value, "version")?,
        base_target: u64_field(value, "baseTarget")?,
        nonce: u64_field(value, "nonce")?,
        generation_signature: hex_field(value, "generationSignature")?,
        payload_hash: hex_field(value, "payloadHash")?,
        block_signature: hex_field(value, "blockSignature")?,
        previous_block: opt_id_field(value, "previousBlock")?,
        next_block: opt_id_field(value, "nextBlock")?,
        previous_block_hash: opt_hex_field(value, "previousBlockHash")?,
        scoop_num: opt_u64_field(value, "scoopNum")?,
        transactions: decode_id_list(value, "transactions")?,
    })
}

pub(super) fn decode_blocks(value: &Value, field: &'static str) -> Result<Vec<Block>, DecodeError> {
    array_field(value, field)?.iter().map(decode_block).collect()
}

pub(super) fn decode_account(value: &Value) -> Result<Account, DecodeError> {
    Ok(Account {
        address: address_field(value, "account")?,
        public_key: opt_hex_field(value, "publicKey")?,
        balance: amount_field(value, "balanceNQT")?,
        unconfirmed_balance: amount_field(value, "unconfirmedBalanceNQT")?,
        forged_balance: amount_field(value, "forgedBalanceNQT")?,
        name: opt_string_field(value, "name")?,
        description: opt_string_field(value, "description")?,
    })
}

pub(super) fn decode_transaction(value: &Value) -> Result<Transaction, DecodeError> {
    let transaction_type = u16_field(value, "type")?;
    let subtype = u16_field(value, "subtype")?;
    let attachment = match present(value, "attachment") {
        None => None,
        Some(raw) => Some(decode_attachment(transaction_type, subtype, raw)?),
    };

    Ok(Transaction {
        id: id_field(value, "transaction")?,
        full_hash: hex_field(value, "fullHash")?,
        transaction_type,
        subtype,
        version: u16_field(value, "version")?,
        timestamp: timestamp_field(value, "timestamp")?,
        deadline: u64_field(value, "deadline")?,
        sender: address_field(value, "sender")?,
        sender_public_key: hex_field(value, "senderPublicKey")?,
        recipient: opt_address_field(value, "recipient")?,
        amount: amount_field(value, "amountNQT")?,
        fee: amount_field(value, "feeNQT")?,
        signature: opt_hex_field(value, "signature")?,
        signature_hash: opt_hex_field(value, "signatureHash")?,
        referenced_transaction_full_hash: opt_hex_field(value, "referencedTransactionFullHash")?,
        height: u64_field(value, "height")?,
        block: opt_id_field(value, "block")?,
        block_timestamp: opt_timestamp_field(value, "blockTimestamp")?,
        confirmations: opt_u64_field(value, "confirmations")?,
        ec_block_id: opt_id_field(value, "ecBlockId")?,
        ec_block_height: opt_u64_field(value, "ecBlockHeight")?,
        attachment,
    })
}

pub(super) fn decode_transactions(
    value: &Value,
    field: &'static str,
) -> Result<Vec<Transaction>, DecodeError> {
    array_field(value, field)?.iter().map(decode_transaction).collect()
}

pub(super) fn decode_at(value: &Value) -> Result<At, DecodeError> {
    Ok(At {
        id: id_field(value, "at")?,
        name: string_field(value, "name")?,
        description: string_field(value, "description")?,
        creator: address_field(value, "creator")?,
        version: u16_field(value, "atVersion")?,
        machine_code: hex_field(value, "machineCode")?,
        machine_data: hex_field(value, "machineData")?,
        balance: amount_field(value, "balanceNQT")?,
        previous_balance: amount_field(value, "prevBalanceNQT")?,
        min_activation: amount_field(value, "minActivation")?,
        creation_block: u64_field(value, "creationBlock")?,
        next_block: opt_u64_field(value, "nextBlock")?,
        running: bool_field(value, "running")?,
        stopped: bool_field(value, "stopped")?,
        frozen: bool_field(value, "frozen")?,
        finished: bool_field(value, "finished")?,
        dead: bool_field(value, "dead")?,
    })
}

pub(super) fn decode_ats(value: &Value, field: &'static str) -> Result<Vec<At>, DecodeError> {
    array_field(value, field)?.iter().map(decode_at).collect()
}

pub(super) fn decode_mining_info(value: &Value) -> Result<MiningInfo, DecodeError> {
    Ok(MiningInfo {
        generation_signature: hex_field(value, "generationSignature")?,
        base_target: u64_field(value, "baseTarget")?,
        height: u64_field(value, "height")?,
    })
}

pub(super) fn decode_fee_suggestion(value: &Value) -> Result<FeeSuggestion, DecodeError> {
    Ok(FeeSuggestion {
        cheap: amount_field(value, "cheap")?,
        standard: amount_field(value, "standard")?,
        priority: amount_field(value, "priority")?,
    })
}

pub(super) fn decode_constants(value: &Value) -> Result<Constants, DecodeError> {
    Ok(Constants {
        genesis_block_id: id_field(value, "genesisBlockId")?,
        genesis_account_id: address_field(value, "genesisAccountId")?,
        max_block_payload_length: u64_field(value, "maxBlockPayloadLength")?,
        max_arbitrary_message_length: u64_field(value, "maxArbitraryMessageLength")?,
    })
}

pub(super) fn decode_transaction_created(value: &Value) -> Result<TransactionCreated, DecodeError> {
    Ok(TransactionCreated {
        unsigned_transaction_bytes: hex_field(value, "unsignedTransactionBytes")?,
        full_hash: opt_hex_field(value, "fullHash")?,
        transaction: opt_id_field(value, "transaction")?,
        broadcasted: opt_bool_field(value, "broadcasted")?.unwrap_or(false),
    })
}

pub(super) fn decode_broadcast_result(value: &Value) -> Result<BroadcastResult, DecodeError> {
    Ok(BroadcastResult {
        transaction: id_field(value, "transaction")?,
        full_hash: hex_field(value, "fullHash")?,
    })
}

pub(super) fn decode_submit_nonce_result(value: &Value) -> Result<SubmitNonceResult, DecodeError> {
    Ok(SubmitNonceResult {
        result: string_field(value, "result")?,
        deadline: opt_u64_field(value, "deadline")?,
    })
}

pub(super) fn decode_reward_recipient(value: &Value) -> Result<BurstAddress, DecodeError> {
    address_field(value, "rewardRecipient")
}

pub(super) fn decode_block_id(value: &Value) -> Result<BurstId, DecodeError> {
    id_field(value, "block")
}

pub(super) fn decode_transaction_bytes(value: &Value) -> Result<HexData, DecodeError> {
    hex_field(value, "transactionBytes")
}

// ==============================================================================
// Attachments
// ==============================================================================

/// Payment transaction type and its multi-out subtypes.
const TYPE_PAYMENT: u16 = 0;
const SUBTYPE_MULTI_OUT: u16 = 1;
const SUBTYPE_MULTI_OUT_SAME: u16 = 2;
/// Arbitrary-message transaction type.
const TYPE_MESSAGING: u16 = 1;
const SUBTYPE_ARBITRARY_MESSAGE: u16 = 0;
/// Automated-transaction type and its creation subtype.
const TYPE_AUTOMATED_TRANSACTIONS: u16 = 22;
const SUBTYPE_AT_CREATION: u16 = 0;

/// Decode an attachment by the enclosing transaction's (type, subtype) pair.
///
/// Message and encrypted-message payloads can ride on several transaction
/// types, so they are matched by their distinguishing keys when the pair
/// itself is not one of the structured kinds. Unknown pairs decode as
/// [`Attachment::Unrecognized`] with the raw fields preserved.
pub(super) fn decode_attachment(
    transaction_type: u16,
    subtype: u16,
    raw: &Value,
) -> Result<Attachment, DecodeError> {
    match (transaction_type, subtype) {
        (TYPE_PAYMENT, SUBTYPE_MULTI_OUT) => Ok(Attachment::MultiOut {
            recipients: decode_multi_out_recipients(raw)?,
        }),
        (TYPE_PAYMENT, SUBTYPE_MULTI_OUT_SAME) => Ok(Attachment::MultiOutSame {
            recipients: decode_address_list(raw, "recipients")?,
        }),
        (TYPE_AUTOMATED_TRANSACTIONS, SUBTYPE_AT_CREATION) => Ok(Attachment::AtCreation {
            version: u16_field(raw, "version.AutomatedTransactionsCreation")?,
            name: string_field(raw, "name")?,
            description: string_field(raw, "description")?,
            creation_bytes: opt_hex_field(raw, "creationBytes")?,
        }),
        _ => decode_appendage(transaction_type, subtype, raw),
    }
}

fn decode_appendage(
    transaction_type: u16,
    subtype: u16,
    raw: &Value,
) -> Result<Attachment, DecodeError> {
    if let Some(encrypted) = present(raw, "encryptedMessage") {
        return Ok(Attachment::EncryptedMessage(decode_encrypted_message(
            encrypted,
        )?));
    }
    if let Some(encrypted) = present(raw, "encryptToSelfMessage") {
        return Ok(Attachment::EncryptedToSelfMessage(decode_encrypted_message(
            encrypted,
        )?));
    }
    if (transaction_type, subtype) == (TYPE_MESSAGING, SUBTYPE_ARBITRARY_MESSAGE)
        || present(raw, "message").is_some()
    {
        return Ok(Attachment::Message {
            message: string_field(raw, "message")?,
            is_text: opt_bool_field(raw, "messageIsText")?.unwrap_or(true),
        });
    }
    Ok(Attachment::Unrecognized {
        transaction_type,
        subtype,
        raw: raw.clone(),
    })
}

fn decode_encrypted_message(value: &Value) -> Result<EncryptedMessage, DecodeError> {
    Ok(EncryptedMessage {
        data: hex_field(value, "data")?,
        nonce: hex_field(value, "nonce")?,
        is_text: bool_field(value, "isText")?,
    })
}

/// Weighted multi-out recipients arrive as two-element `[id, planck]` arrays.
fn decode_multi_out_recipients(raw: &Value) -> Result<Vec<MultiOutRecipient>, DecodeError> {
    array_field(raw, "recipients")?
        .iter()
        .map(|entry| {
            let pair = entry
                .as_array()
                .filter(|a| a.len() == 2)
                .ok_or_else(|| invalid("recipients", "expected [id, amount] pairs"))?;
            let id = pair[0]
                .as_str()
                .ok_or_else(|| invalid("recipients", "expected a string id"))?;
            Ok(MultiOutRecipient {
                recipient: BurstAddress::from_either_str(id)?,
                amount: amount_value(&pair[1])?,
            })
        })
        .collect()
}
