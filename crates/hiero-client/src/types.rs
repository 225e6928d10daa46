//! Typed records for mirror-node and relay responses
//!
//! Every endpoint gets an explicit record type; payloads are validated when
//! they cross the transport boundary so callers never inspect raw JSON.

use base64::Engine;
use hiero_primitives::{Address, EntityId, ScheduleId, H256, U256};
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::ClientError;

// ==================== Mirror node ====================

/// Consensus timestamp, textual form `<seconds>.<nanos>` with nine nanosecond digits
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct ConsensusTimestamp {
    /// Seconds since the epoch
    pub seconds: u64,
    /// Nanoseconds within the second
    pub nanos: u32,
}

impl ConsensusTimestamp {
    /// Create a timestamp
    pub const fn new(seconds: u64, nanos: u32) -> Self {
        Self { seconds, nanos }
    }
}

impl fmt::Display for ConsensusTimestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:09}", self.seconds, self.nanos)
    }
}

impl FromStr for ConsensusTimestamp {
    type Err = ClientError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ClientError::Decode(format!("invalid consensus timestamp: {:?}", s));
        let (secs, frac) = s.split_once('.').unwrap_or((s, ""));
        let seconds = secs.parse::<u64>().map_err(|_| invalid())?;
        if frac.len() > 9 || !frac.chars().all(|c| c.is_ascii_digit()) {
            return Err(invalid());
        }
        let nanos = if frac.is_empty() {
            0
        } else {
            format!("{:0<9}", frac).parse::<u32>().map_err(|_| invalid())?
        };
        Ok(Self { seconds, nanos })
    }
}

impl Serialize for ConsensusTimestamp {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ConsensusTimestamp {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(de::Error::custom)
    }
}

/// `GET /api/v1/schedules/{id}`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ScheduleInfo {
    /// Schedule id
    pub schedule_id: ScheduleId,
    /// Set once the scheduled transaction has run
    pub executed_timestamp: Option<ConsensusTimestamp>,
    /// Deleted before execution
    #[serde(default)]
    pub deleted: bool,
    /// Memo
    #[serde(default)]
    pub memo: String,
    /// Executes at expiry rather than when fully signed
    #[serde(default)]
    pub wait_for_expiry: bool,
}

impl ScheduleInfo {
    /// True once the mirror node has recorded the execution
    pub fn is_executed(&self) -> bool {
        self.executed_timestamp.is_some()
    }
}

/// One entry of `GET /api/v1/transactions`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TransactionRecord {
    /// `payer-seconds-nanos`
    pub transaction_id: String,
    /// Outcome code name, e.g. `SUCCESS` or `CONTRACT_REVERT_EXECUTED`
    pub result: String,
    /// True when this is the execution of a scheduled transaction
    #[serde(default)]
    pub scheduled: bool,
    /// Consensus timestamp
    pub consensus_timestamp: ConsensusTimestamp,
    /// Transaction hash (base64 on the wire)
    #[serde(deserialize_with = "base64_bytes")]
    pub transaction_hash: Vec<u8>,
    /// Transaction type, e.g. `CONTRACTCALL`
    #[serde(default)]
    pub name: String,
    /// Entity created or touched by the transaction
    #[serde(default)]
    pub entity_id: Option<EntityId>,
}

impl TransactionRecord {
    /// Mirror result string for a successful transaction
    pub const SUCCESS: &'static str = "SUCCESS";

    /// True for a `SUCCESS` result
    pub fn is_success(&self) -> bool {
        self.result == Self::SUCCESS
    }

    /// Hash as 0x-prefixed hex, the form accepted by `transaction.hash` filters
    pub fn hash_hex(&self) -> String {
        format!("0x{}", hex::encode(&self.transaction_hash))
    }
}

/// One entry of `GET /api/v1/contracts/results/logs`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ContractLog {
    /// Emitting contract
    pub address: Address,
    /// Emitting contract id
    #[serde(default)]
    pub contract_id: Option<EntityId>,
    /// Non-indexed payload
    #[serde(default, deserialize_with = "hex_bytes")]
    pub data: Vec<u8>,
    /// Position within the transaction
    #[serde(default)]
    pub index: u32,
    /// Indexed topics
    #[serde(default)]
    pub topics: Vec<H256>,
    /// Consensus timestamp of the emitting transaction
    pub timestamp: ConsensusTimestamp,
}

/// Sort order for list endpoints
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Order {
    /// Oldest first
    #[default]
    Asc,
    /// Newest first
    Desc,
}

impl fmt::Display for Order {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Order::Asc => f.write_str("asc"),
            Order::Desc => f.write_str("desc"),
        }
    }
}

/// Filter for contract-log queries
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogQuery {
    /// Consensus timestamp of the emitting transaction
    pub timestamp: ConsensusTimestamp,
    /// Restrict to logs of one transaction
    pub transaction_hash: Option<String>,
    /// Page size
    pub limit: u32,
    /// Sort order
    pub order: Order,
}

impl LogQuery {
    /// Logs at `timestamp`, oldest first, default page size
    pub fn at(timestamp: ConsensusTimestamp) -> Self {
        Self {
            timestamp,
            transaction_hash: None,
            limit: 25,
            order: Order::Asc,
        }
    }

    /// Restrict to one transaction hash (0x-prefixed hex)
    pub fn transaction_hash(mut self, hash: impl Into<String>) -> Self {
        self.transaction_hash = Some(hash.into());
        self
    }

    /// Set the page size
    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = limit;
        self
    }

    /// Set the sort order
    pub fn order(mut self, order: Order) -> Self {
        self.order = order;
        self
    }

    /// Request path including query string
    pub fn to_path(&self) -> String {
        let mut path = format!("/api/v1/contracts/results/logs?timestamp={}", self.timestamp);
        if let Some(hash) = &self.transaction_hash {
            path.push_str("&transaction.hash=");
            path.push_str(hash);
        }
        path.push_str(&format!("&limit={}&order={}", self.limit, self.order));
        path
    }
}

#[derive(Deserialize)]
pub(crate) struct TransactionsPage {
    #[serde(default)]
    pub transactions: Vec<TransactionRecord>,
}

#[derive(Deserialize)]
pub(crate) struct LogsPage {
    #[serde(default)]
    pub logs: Vec<ContractLog>,
}

/// One entry of `GET /api/v1/balances`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AccountBalance {
    /// Account id
    pub account: EntityId,
    /// Balance in tinybars
    pub balance: u64,
}

#[derive(Deserialize)]
pub(crate) struct BalancesPage {
    #[serde(default)]
    pub balances: Vec<AccountBalance>,
}

fn base64_bytes<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
    let s = String::deserialize(deserializer)?;
    base64::engine::general_purpose::STANDARD
        .decode(s.as_bytes())
        .map_err(de::Error::custom)
}

fn hex_bytes<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
    let s = Option::<String>::deserialize(deserializer)?;
    match s {
        Some(s) => parse_hex_bytes(&s).map_err(de::Error::custom),
        None => Ok(Vec::new()),
    }
}

// ==================== Relay ====================

/// EVM log as reported in a relay receipt
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Log {
    /// Emitting contract
    pub address: Address,
    /// Indexed topics
    #[serde(default)]
    pub topics: Vec<H256>,
    /// Non-indexed payload
    #[serde(default, deserialize_with = "hex_bytes")]
    pub data: Vec<u8>,
}

/// `eth_getTransactionReceipt` result
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionReceipt {
    /// Transaction hash
    pub transaction_hash: H256,
    /// True when `status == 0x1`
    pub status: bool,
    /// Created contract, if any
    pub contract_address: Option<Address>,
    /// Gas used
    pub gas_used: u64,
    /// Block number
    pub block_number: u64,
    /// Emitted logs
    pub logs: Vec<Log>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RawReceipt {
    transaction_hash: H256,
    status: String,
    #[serde(default)]
    contract_address: Option<Address>,
    gas_used: String,
    block_number: String,
    #[serde(default)]
    logs: Vec<Log>,
}

impl TryFrom<RawReceipt> for TransactionReceipt {
    type Error = ClientError;

    fn try_from(raw: RawReceipt) -> Result<Self, Self::Error> {
        Ok(Self {
            transaction_hash: raw.transaction_hash,
            status: parse_hex_u64(&raw.status)? == 1,
            contract_address: raw.contract_address,
            gas_used: parse_hex_u64(&raw.gas_used)?,
            block_number: parse_hex_u64(&raw.block_number)?,
            logs: raw.logs,
        })
    }
}

// ==================== Hex helpers ====================

pub(crate) fn parse_hex_u64(s: &str) -> Result<u64, ClientError> {
    let s = s.strip_prefix("0x").unwrap_or(s);
    u64::from_str_radix(s, 16).map_err(|e| ClientError::InvalidHex(e.to_string()))
}

pub(crate) fn parse_hex_u256(s: &str) -> Result<U256, ClientError> {
    let s = s.strip_prefix("0x").unwrap_or(s);
    if s.is_empty() || s.len() > 64 {
        return Err(ClientError::InvalidHex(format!("not a 256-bit quantity: {}", s)));
    }
    U256::from_str_radix(s, 16).map_err(|e| ClientError::InvalidHex(e.to_string()))
}

pub(crate) fn parse_hex_bytes(s: &str) -> Result<Vec<u8>, ClientError> {
    let s = s.strip_prefix("0x").unwrap_or(s);
    Ok(hex::decode(s)?)
}
