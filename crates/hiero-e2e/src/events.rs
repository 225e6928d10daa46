//! ERC20 / ERC721 `Transfer` event decoding
//!
//! HTS tokens expose ERC facades, and token transfers surface as standard
//! `Transfer` events both in relay receipts and in mirror-node contract logs.

use hiero_client::types::{ContractLog, Log};
use hiero_crypto::event_topic;
use hiero_primitives::{Address, H256, U256};

/// Canonical signature shared by ERC20 and ERC721 transfers
pub const TRANSFER_SIGNATURE: &str = "Transfer(address,address,uint256)";

/// Canonical ERC20 / ERC721 approval signature
pub const APPROVAL_SIGNATURE: &str = "Approval(address,address,uint256)";

/// `topics[0]` of a `Transfer` event
pub fn transfer_topic() -> H256 {
    event_topic(TRANSFER_SIGNATURE)
}

/// Read access to an EVM log, whichever surface it came from
pub trait EventLog {
    /// Emitting contract
    fn emitter(&self) -> Address;
    /// Indexed topics
    fn topics(&self) -> &[H256];
    /// Non-indexed payload
    fn data(&self) -> &[u8];
}

impl EventLog for Log {
    fn emitter(&self) -> Address {
        self.address
    }

    fn topics(&self) -> &[H256] {
        &self.topics
    }

    fn data(&self) -> &[u8] {
        &self.data
    }
}

impl EventLog for ContractLog {
    fn emitter(&self) -> Address {
        self.address
    }

    fn topics(&self) -> &[H256] {
        &self.topics
    }

    fn data(&self) -> &[u8] {
        &self.data
    }
}

/// Fungible transfer: `Transfer(address indexed, address indexed, uint256)`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Erc20Transfer {
    /// Token contract
    pub token: Address,
    /// Sender (zero for mints)
    pub from: Address,
    /// Recipient (zero for burns)
    pub to: Address,
    /// Amount in the token's smallest unit
    pub value: U256,
}

impl Erc20Transfer {
    /// Decode a log; `None` if it is not an ERC20 transfer
    pub fn decode(log: &impl EventLog) -> Option<Self> {
        let topics = log.topics();
        if topics.len() != 3 || topics[0] != transfer_topic() || log.data().len() != 32 {
            return None;
        }
        Some(Self {
            token: log.emitter(),
            from: Address::from_word_tail(topics[1].as_bytes())?,
            to: Address::from_word_tail(topics[2].as_bytes())?,
            value: U256::from_big_endian(log.data()),
        })
    }
}

/// Non-fungible transfer: `Transfer(address indexed, address indexed, uint256 indexed)`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Erc721Transfer {
    /// Token contract
    pub token: Address,
    /// Previous owner (zero for mints)
    pub from: Address,
    /// New owner (zero for burns)
    pub to: Address,
    /// Serial number
    pub token_id: U256,
}

impl Erc721Transfer {
    /// Decode a log; `None` if it is not an ERC721 transfer
    pub fn decode(log: &impl EventLog) -> Option<Self> {
        let topics = log.topics();
        if topics.len() != 4 || topics[0] != transfer_topic() || !log.data().is_empty() {
            return None;
        }
        Some(Self {
            token: log.emitter(),
            from: Address::from_word_tail(topics[1].as_bytes())?,
            to: Address::from_word_tail(topics[2].as_bytes())?,
            token_id: U256::from_big_endian(topics[3].as_bytes()),
        })
    }
}

/// All ERC20 transfers among `logs`, in log order
pub fn erc20_transfers<L: EventLog>(logs: &[L]) -> Vec<Erc20Transfer> {
    logs.iter().filter_map(Erc20Transfer::decode).collect()
}

/// All ERC721 transfers among `logs`, in log order
pub fn erc721_transfers<L: EventLog>(logs: &[L]) -> Vec<Erc721Transfer> {
    logs.iter().filter_map(Erc721Transfer::decode).collect()
}
