use serde::Serialize;

use crate::value::{BurstAddress, BurstValue, HexData};

/// An account as reported by `getAccount`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Account {
    pub address: BurstAddress,
    /// Absent until the account has announced a public key.
    pub public_key: Option<HexData>,
    pub balance: BurstValue,
    pub unconfirmed_balance: BurstValue,
    pub forged_balance: BurstValue,
    pub name: Option<String>,
    pub description: Option<String>,
}
