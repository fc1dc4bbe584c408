use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::DecodeError;
use crate::value::BurstId;

/// An account identifier.
///
/// Accounts have two textual encodings: the plain unsigned decimal id shared
/// with every other identifier, and the checksummed "friendly" form
/// `BURST-XXXX-XXXX-XXXX-XXXXX` (a Reed-Solomon(17,13) code over GF(32)).
/// Decoding the friendly form recomputes the check symbols and fails on any
/// mismatch, so a single mistyped character never resolves to an account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BurstAddress(BurstId);

const PREFIX: &str = "BURST-";

impl BurstAddress {
    pub fn from_id(id: BurstId) -> Self {
        Self(id)
    }

    pub fn id(&self) -> BurstId {
        self.0
    }

    /// Parse either textual encoding: the decimal numeric string or the
    /// friendly form (with or without the `BURST-` prefix).
    pub fn from_either_str(s: &str) -> Result<Self, DecodeError> {
        if s.chars().all(|c| c.is_ascii_digit()) && !s.is_empty() {
            return BurstId::from_wire_str(s).map(Self);
        }
        Self::from_rs_str(s)
    }

    /// Parse the friendly form, validating the Reed-Solomon check symbols.
    pub fn from_rs_str(s: &str) -> Result<Self, DecodeError> {
        let body = s.strip_prefix(PREFIX).unwrap_or(s);
        rs::decode(body).map(|id| Self(BurstId(id)))
    }

    /// The friendly form, always with the `BURST-` prefix.
    pub fn to_rs_string(&self) -> String {
        format!("{PREFIX}{}", rs::encode(self.0 .0))
    }

    /// The plain decimal form used for request parameters.
    pub fn to_wire_string(&self) -> String {
        self.0.to_wire_string()
    }
}

impl From<BurstId> for BurstAddress {
    fn from(id: BurstId) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for BurstAddress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_rs_string())
    }
}

impl Serialize for BurstAddress {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_rs_string())
    }
}

impl<'de> Deserialize<'de> for BurstAddress {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::from_either_str(&s).map_err(serde::de::Error::custom)
    }
}

/// The NXT-lineage Reed-Solomon(17,13) address code over GF(32).
///
/// 13 data symbols carry the 64-bit id in base 32 (least significant symbol
/// first), 4 check symbols detect transcription errors. Symbols are scrambled
/// through `CWMAP` before display and grouped 4-4-4-5 with dashes.
mod rs {
    use crate::error::DecodeError;

    const ALPHABET: &[u8; 32] = b"23456789ABCDEFGHJKLMNPQRSTUVWXYZ";

    // GF(32) exp/log tables for the generator polynomial x^5 + x^2 + 1.
    const GEXP: [u8; 32] = [
        1, 2, 4, 8, 16, 5, 10, 20, 13, 26, 17, 7, 14, 28, 29, 31, 27, 19, 3, 6, 12, 24, 21, 15,
        30, 25, 23, 11, 22, 9, 18, 1,
    ];
    const GLOG: [u8; 32] = [
        0, 0, 1, 18, 2, 5, 19, 11, 3, 29, 6, 27, 20, 8, 12, 23, 4, 10, 30, 17, 7, 22, 28, 26, 21,
        25, 9, 16, 13, 14, 24, 15,
    ];
    const CWMAP: [usize; 17] = [3, 2, 1, 0, 7, 6, 5, 4, 13, 14, 15, 16, 12, 8, 9, 10, 11];

    const DATA_SYMBOLS: usize = 13;
    const TOTAL_SYMBOLS: usize = 17;

    fn gmult(a: u8, b: u8) -> u8 {
        if a == 0 || b == 0 {
            return 0;
        }
        let idx = (GLOG[a as usize] as usize + GLOG[b as usize] as usize) % 31;
        GEXP[idx]
    }

    pub(super) fn encode(id: u64) -> String {
        let mut codeword = [0u8; TOTAL_SYMBOLS];
        let mut rest = id;
        for symbol in codeword.iter_mut().take(DATA_SYMBOLS) {
            *symbol = (rest % 32) as u8;
            rest /= 32;
        }

        let mut p = [0u8; 4];
        for i in (0..DATA_SYMBOLS).rev() {
            let fb = codeword[i] ^ p[3];
            p[3] = p[2] ^ gmult(30, fb);
            p[2] = p[1] ^ gmult(6, fb);
            p[1] = p[0] ^ gmult(9, fb);
            p[0] = gmult(17, fb);
        }
        codeword[DATA_SYMBOLS..].copy_from_slice(&p);

        let mut out = String::with_capacity(TOTAL_SYMBOLS + 3);
        for (i, &pos) in CWMAP.iter().enumerate() {
            if i == 4 || i == 8 || i == 12 {
                out.push('-');
            }
            out.push(ALPHABET[codeword[pos] as usize] as char);
        }
        out
    }

    pub(super) fn decode(body: &str) -> Result<u64, DecodeError> {
        let malformed =
            |reason: &str| DecodeError::MalformedIdentifier(format!("`{body}`: {reason}"));

        let mut codeword = [0u8; TOTAL_SYMBOLS];
        let mut count = 0;
        for c in body.chars() {
            if c == '-' {
                continue;
            }
            let symbol = ALPHABET
                .iter()
                .position(|&a| a as char == c.to_ascii_uppercase())
                .ok_or_else(|| malformed("character outside the address alphabet"))?;
            if count >= TOTAL_SYMBOLS {
                return Err(malformed("too many symbols"));
            }
            codeword[CWMAP[count]] = symbol as u8;
            count += 1;
        }
        if count != TOTAL_SYMBOLS {
            return Err(malformed("wrong length"));
        }
        if !syndromes_vanish(&codeword) {
            return Err(malformed("checksum mismatch"));
        }

        let mut id: u128 = 0;
        for i in (0..DATA_SYMBOLS).rev() {
            id = id * 32 + codeword[i] as u128;
        }
        u64::try_from(id).map_err(|_| malformed("id out of range"))
    }

    fn syndromes_vanish(codeword: &[u8; TOTAL_SYMBOLS]) -> bool {
        let mut sum = 0u8;
        for i in 1..5 {
            let mut t = 0u8;
            for j in 0..31 {
                if j > 12 && j < 27 {
                    continue;
                }
                let pos = if j > 26 { j - 14 } else { j };
                t ^= gmult(codeword[pos], GEXP[(i * j) % 31]);
            }
            sum |= t;
        }
        sum == 0
    }
}
