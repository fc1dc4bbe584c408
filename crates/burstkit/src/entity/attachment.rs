use serde::Serialize;

use crate::value::{BurstAddress, BurstValue, HexData};

/// A transaction-type-specific payload.
///
/// The node tags attachments by the enclosing transaction's (type, subtype)
/// pair; each known pair maps to one variant here. Pairs this crate does not
/// know decode as [`Attachment::Unrecognized`] carrying the raw fields, so a
/// node upgrade never breaks transaction decoding.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Attachment {
    /// A plain arbitrary message, either UTF-8 text or raw bytes as hex.
    Message { message: String, is_text: bool },

    /// A message encrypted to the recipient.
    EncryptedMessage(EncryptedMessage),

    /// A message the sender encrypted to themself.
    EncryptedToSelfMessage(EncryptedMessage),

    /// A multi-out payment with a per-recipient amount.
    MultiOut { recipients: Vec<MultiOutRecipient> },

    /// An equal-split multi-out payment.
    MultiOutSame { recipients: Vec<BurstAddress> },

    /// Creation of an automated transaction program.
    AtCreation {
        version: u16,
        name: String,
        description: String,
        creation_bytes: Option<HexData>,
    },

    /// A (type, subtype) pair this crate does not recognize.
    Unrecognized {
        transaction_type: u16,
        subtype: u16,
        raw: serde_json::Value,
    },
}

/// One recipient of a weighted multi-out payment.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MultiOutRecipient {
    pub recipient: BurstAddress,
    pub amount: BurstValue,
}

/// An encrypted payload: AES data plus the nonce it was sealed with.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EncryptedMessage {
    pub data: HexData,
    pub nonce: HexData,
    pub is_text: bool,
}
