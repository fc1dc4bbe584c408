use serde::{Deserialize, Serialize};

use crate::error::DecodeError;

/// Seconds between the Unix epoch and the Burst genesis epoch
/// (2014-08-11T02:00:00 UTC).
pub const EPOCH_OFFSET_SECONDS: u64 = 1_407_722_400;

/// Seconds since the Burst genesis epoch.
///
/// This is never Unix time; converting to or from calendar time must go
/// through [`to_unix`](Self::to_unix) / [`from_unix`](Self::from_unix).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct BurstTimestamp(pub u64);

impl BurstTimestamp {
    pub fn from_epoch_seconds(seconds: u64) -> Self {
        Self(seconds)
    }

    pub fn epoch_seconds(&self) -> u64 {
        self.0
    }

    /// Parse the wire form: epoch seconds as a JSON integer rendered to text.
    pub fn from_wire_str(s: &str) -> Result<Self, DecodeError> {
        s.parse::<u64>()
            .map(Self)
            .map_err(|_| DecodeError::MalformedTimestamp(format!("not an epoch second count: `{s}`")))
    }

    /// The corresponding Unix timestamp in seconds.
    pub fn to_unix(&self) -> u64 {
        self.0 + EPOCH_OFFSET_SECONDS
    }

    /// Build from a Unix timestamp. Fails for instants before the network
    /// epoch, which have no representation.
    pub fn from_unix(unix_seconds: u64) -> Result<Self, DecodeError> {
        unix_seconds
            .checked_sub(EPOCH_OFFSET_SECONDS)
            .map(Self)
            .ok_or_else(|| {
                DecodeError::MalformedTimestamp(format!(
                    "unix time {unix_seconds} predates the network epoch"
                ))
            })
    }
}

impl std::fmt::Display for BurstTimestamp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn epoch_zero_is_the_network_genesis() {
        assert_eq!(BurstTimestamp(0).to_unix(), EPOCH_OFFSET_SECONDS);
    }

    #[test]
    fn unix_round_trip() {
        let ts = BurstTimestamp::from_epoch_seconds(123_456_789);
        assert_eq!(
            BurstTimestamp::from_unix(ts.to_unix()).expect("round trip"),
            ts
        );
    }

    #[test]
    fn pre_epoch_unix_time_is_unrepresentable() {
        assert!(matches!(
            BurstTimestamp::from_unix(EPOCH_OFFSET_SECONDS - 1),
            Err(DecodeError::MalformedTimestamp(_))
        ));
    }

    #[test]
    fn wire_parse() {
        assert_eq!(
            BurstTimestamp::from_wire_str("141094400").expect("should parse"),
            BurstTimestamp(141_094_400)
        );
        assert!(matches!(
            BurstTimestamp::from_wire_str("-5"),
            Err(DecodeError::MalformedTimestamp(_))
        ));
        assert!(matches!(
            BurstTimestamp::from_wire_str("soon"),
            Err(DecodeError::MalformedTimestamp(_))
        ));
    }
}
