use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::DecodeError;

/// A raw byte payload carried over JSON as hex text.
///
/// Decoding accepts either case but requires an even-length hex string;
/// encoding is always lowercase with no `0x` prefix. The empty string is the
/// empty payload.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct HexData(pub Vec<u8>);

impl HexData {
    pub fn from_hex_str(s: &str) -> Result<Self, DecodeError> {
        if s.len() % 2 != 0 {
            return Err(DecodeError::MalformedHex(format!(
                "odd-length hex string ({} chars)",
                s.len()
            )));
        }
        hex::decode(s)
            .map(Self)
            .map_err(|e| DecodeError::MalformedHex(format!("`{s}`: {e}")))
    }

    pub fn to_hex_string(&self) -> String {
        hex::encode(&self.0)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<u8>> for HexData {
    fn from(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }
}

impl From<&[u8]> for HexData {
    fn from(bytes: &[u8]) -> Self {
        Self(bytes.to_vec())
    }
}

impl std::fmt::Display for HexData {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_hex_string())
    }
}

impl Serialize for HexData {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_hex_string())
    }
}

impl<'de> Deserialize<'de> for HexData {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::from_hex_str(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_is_case_insensitive() {
        let lower = HexData::from_hex_str("ab12cd").expect("lowercase should parse");
        let upper = HexData::from_hex_str("AB12CD").expect("uppercase should parse");
        assert_eq!(lower, upper);
        assert_eq!(lower.as_bytes(), &[0xab, 0x12, 0xcd]);
    }

    #[test]
    fn encode_is_lowercase() {
        assert_eq!(HexData(vec![0xAB, 0x01]).to_hex_string(), "ab01");
    }

    #[test]
    fn empty_string_is_empty_payload() {
        let data = HexData::from_hex_str("").expect("empty should parse");
        assert!(data.is_empty());
        assert_eq!(data.to_hex_string(), "");
    }

    #[test]
    fn rejects_odd_length() {
        assert!(matches!(
            HexData::from_hex_str("abc"),
            Err(DecodeError::MalformedHex(_))
        ));
    }

    #[test]
    fn rejects_non_hex_alphabet() {
        assert!(matches!(
            HexData::from_hex_str("zz"),
            Err(DecodeError::MalformedHex(_))
        ));
    }

    #[test]
    fn decode_encode_round_trip() {
        let decoded = HexData::from_hex_str("00FFa0").expect("should parse");
        let re = HexData::from_hex_str(&decoded.to_hex_string()).expect("round trip");
        assert_eq!(decoded, re);
    }
}
