use serde::Serialize;

use crate::value::{BurstAddress, BurstId, BurstValue, HexData};

/// An automated transaction (a node-executed program bound to an account),
/// as reported by `getAT`/`getAccountATs`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct At {
    pub id: BurstId,
    pub name: String,
    pub description: String,
    pub creator: BurstAddress,
    pub version: u16,
    pub machine_code: HexData,
    pub machine_data: HexData,
    pub balance: BurstValue,
    pub previous_balance: BurstValue,
    pub min_activation: BurstValue,
    pub creation_block: u64,
    pub next_block: Option<u64>,
    pub running: bool,
    pub stopped: bool,
    pub frozen: bool,
    pub finished: bool,
    pub dead: bool,
}
