use serde::Serialize;

use crate::value::HexData;

/// The mining-relevant state of the chain tip, from `getMiningInfo`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MiningInfo {
    pub generation_signature: HexData,
    pub base_target: u64,
    pub height: u64,
}

impl MiningInfo {
    /// Whether this snapshot represents different mining state than `prev`.
    ///
    /// Only the (generation signature, height) pair participates; a changed
    /// base target alone is not a new round.
    pub fn changed_from(&self, prev: &MiningInfo) -> bool {
        self.generation_signature != prev.generation_signature || self.height != prev.height
    }
}

/// Outcome of `submitNonce`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubmitNonceResult {
    pub result: String,
    pub deadline: Option<u64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn info(sig: &[u8], height: u64) -> MiningInfo {
        MiningInfo {
            generation_signature: HexData(sig.to_vec()),
            base_target: 70_000,
            height,
        }
    }

    #[test]
    fn base_target_does_not_participate_in_change_detection() {
        let a = info(b"a", 10);
        let mut b = info(b"a", 10);
        b.base_target = 80_000;
        assert!(!b.changed_from(&a));
    }

    #[test]
    fn signature_or_height_change_is_detected() {
        let a = info(b"a", 10);
        assert!(info(b"b", 10).changed_from(&a));
        assert!(info(b"a", 11).changed_from(&a));
    }
}
