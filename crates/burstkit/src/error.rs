//! Error taxonomy for the client.
//!
//! [`ClientError`] is what every public operation returns; [`DecodeError`]
//! covers wire-value validation failures and converts into it via `#[from]`.

/// Failure of a client operation.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// A wire value failed decode validation.
    #[error(transparent)]
    Decode(#[from] DecodeError),

    /// The node answered with its error envelope. `code` is the node-reported
    /// error code, so callers can branch on it.
    #[error("node returned error {code}: {message}")]
    Node { code: i64, message: String },

    /// The caller supplied out-of-range input; no request was issued.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Network or connection-level failure. Not retried here.
    #[error("transport failure: {0}")]
    Transport(#[from] reqwest::Error),

    /// The response body was not the JSON shape any operation produces.
    #[error("invalid response: {0}")]
    InvalidResponse(String),
}

/// A wire value that failed validation while decoding.
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    #[error("malformed identifier: {0}")]
    MalformedIdentifier(String),

    #[error("malformed amount: {0}")]
    MalformedAmount(String),

    #[error("malformed hex: {0}")]
    MalformedHex(String),

    #[error("malformed timestamp: {0}")]
    MalformedTimestamp(String),

    #[error("missing field `{0}`")]
    MissingField(&'static str),

    #[error("invalid field `{field}`: {reason}")]
    InvalidField {
        field: &'static str,
        reason: String,
    },
}
