use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::DecodeError;

/// Number of decimal places in one BURST: 1 BURST = 10^8 planck.
const PLANCK_DIGITS: u32 = 8;
const PLANCK_PER_BURST: u64 = 10u64.pow(PLANCK_DIGITS);

/// A monetary amount, stored as an integer count of planck.
///
/// Negative amounts are unrepresentable. The wire carries planck as a
/// decimal string (`amountNQT` and friends); the human-facing form is a
/// fixed-point BURST string with at most 8 fractional digits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct BurstValue(u64);

impl BurstValue {
    pub const ZERO: BurstValue = BurstValue(0);

    pub fn from_planck(planck: u64) -> Self {
        Self(planck)
    }

    pub fn to_planck(&self) -> u64 {
        self.0
    }

    /// Parse the wire form: a planck count as an unsigned decimal string.
    pub fn from_planck_str(s: &str) -> Result<Self, DecodeError> {
        s.parse::<u64>()
            .map(Self)
            .map_err(|_| DecodeError::MalformedAmount(format!("not a planck count: `{s}`")))
    }

    /// The wire form. Never scientific notation.
    pub fn to_planck_string(&self) -> String {
        self.0.to_string()
    }

    /// Parse a BURST-denominated decimal string such as `"1.00000001"`.
    ///
    /// At most 8 fractional digits are accepted; anything finer would not be
    /// representable in planck and fails rather than rounding.
    pub fn from_burst_str(s: &str) -> Result<Self, DecodeError> {
        let malformed = |reason: &str| DecodeError::MalformedAmount(format!("`{s}`: {reason}"));

        let (whole, frac) = match s.split_once('.') {
            Some((w, f)) => (w, f),
            None => (s, ""),
        };
        if whole.is_empty() && frac.is_empty() {
            return Err(malformed("empty amount"));
        }
        if !whole.chars().all(|c| c.is_ascii_digit()) {
            return Err(malformed("whole part is not a non-negative decimal"));
        }
        if !frac.chars().all(|c| c.is_ascii_digit()) {
            return Err(malformed("fractional part is not decimal"));
        }
        if frac.len() > PLANCK_DIGITS as usize {
            return Err(malformed("more than 8 fractional digits"));
        }

        let whole: u64 = if whole.is_empty() {
            0
        } else {
            whole.parse().map_err(|_| malformed("whole part overflows"))?
        };
        // Right-pad the fractional digits out to planck width.
        let frac_planck: u64 = if frac.is_empty() {
            0
        } else {
            let parsed: u64 = frac
                .parse()
                .map_err(|_| malformed("fractional part overflows"))?;
            parsed * 10u64.pow(PLANCK_DIGITS - frac.len() as u32)
        };

        whole
            .checked_mul(PLANCK_PER_BURST)
            .and_then(|p| p.checked_add(frac_planck))
            .map(Self)
            .ok_or_else(|| malformed("amount overflows"))
    }

    /// The BURST-denominated decimal string, trailing zeros stripped.
    ///
    /// `from_burst_str(v.to_burst_string())` reproduces `v` exactly.
    pub fn to_burst_string(&self) -> String {
        let whole = self.0 / PLANCK_PER_BURST;
        let frac = self.0 % PLANCK_PER_BURST;
        if frac == 0 {
            return whole.to_string();
        }
        let mut s = format!("{whole}.{frac:08}");
        while s.ends_with('0') {
            s.pop();
        }
        s
    }
}

impl std::fmt::Display for BurstValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_burst_string())
    }
}

impl Serialize for BurstValue {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_planck_string())
    }
}

impl<'de> Deserialize<'de> for BurstValue {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::from_planck_str(&s).map_err(serde::de::Error::custom)
    }
}
