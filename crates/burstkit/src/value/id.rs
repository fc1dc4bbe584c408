use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::DecodeError;

/// A 64-bit unsigned node identifier (block, transaction, account, AT).
///
/// Carried on the wire as an unsigned decimal string. IDs above `i64::MAX`
/// are common, so all parsing is unsigned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BurstId(pub u64);

impl BurstId {
    /// Parse the wire decimal string form.
    pub fn from_wire_str(s: &str) -> Result<Self, DecodeError> {
        s.parse::<u64>()
            .map(Self)
            .map_err(|_| DecodeError::MalformedIdentifier(format!("not a decimal id: `{s}`")))
    }

    /// The wire decimal string form. Exact round trip with
    /// [`from_wire_str`](Self::from_wire_str).
    pub fn to_wire_string(&self) -> String {
        self.0.to_string()
    }
}

impl From<u64> for BurstId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for BurstId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

impl Serialize for BurstId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_wire_string())
    }
}

impl<'de> Deserialize<'de> for BurstId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::from_wire_str(&s).map_err(serde::de::Error::custom)
    }
}
