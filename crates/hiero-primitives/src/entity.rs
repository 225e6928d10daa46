//! Hiero entity identifiers (`shard.realm.num`)

use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::Address;

/// Entity id parsing / encoding error
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EntityError {
    /// Not of the form `shard.realm.num`
    #[error("invalid entity id: {0}")]
    InvalidFormat(String),
    /// Shard does not fit the 4-byte shard field of a long-zero address
    #[error("shard {0} does not fit in a long-zero address")]
    ShardOutOfRange(u64),
    /// Packed id of the wrong size
    #[error("invalid packed entity id length: expected 24 bytes, got {0}")]
    InvalidLength(usize),
}

/// Generic `shard.realm.num` identifier shared by accounts, contracts,
/// tokens and schedules.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default, PartialOrd, Ord, Debug)]
pub struct EntityId {
    /// Shard number
    pub shard: u64,
    /// Realm number
    pub realm: u64,
    /// Entity number
    pub num: u64,
}

impl EntityId {
    /// Create an entity id
    pub const fn new(shard: u64, realm: u64, num: u64) -> Self {
        Self { shard, realm, num }
    }

    /// Long-zero EVM address: `shard (4 bytes) || realm (8) || num (8)`, big-endian.
    pub fn to_evm_address(&self) -> Result<Address, EntityError> {
        let shard = u32::try_from(self.shard).map_err(|_| EntityError::ShardOutOfRange(self.shard))?;
        let mut bytes = [0u8; 20];
        bytes[..4].copy_from_slice(&shard.to_be_bytes());
        bytes[4..12].copy_from_slice(&self.realm.to_be_bytes());
        bytes[12..].copy_from_slice(&self.num.to_be_bytes());
        Ok(Address::from_bytes(bytes))
    }

    /// Decode a long-zero EVM address.
    pub fn from_evm_address(address: &Address) -> Self {
        let bytes = address.as_bytes();
        let mut shard = [0u8; 4];
        let mut realm = [0u8; 8];
        let mut num = [0u8; 8];
        shard.copy_from_slice(&bytes[..4]);
        realm.copy_from_slice(&bytes[4..12]);
        num.copy_from_slice(&bytes[12..]);
        Self {
            shard: u32::from_be_bytes(shard) as u64,
            realm: u64::from_be_bytes(realm),
            num: u64::from_be_bytes(num),
        }
    }

    /// Packed form: three big-endian u64 fields, 24 bytes total.
    pub fn to_bytes(&self) -> [u8; 24] {
        let mut out = [0u8; 24];
        out[..8].copy_from_slice(&self.shard.to_be_bytes());
        out[8..16].copy_from_slice(&self.realm.to_be_bytes());
        out[16..].copy_from_slice(&self.num.to_be_bytes());
        out
    }

    /// Inverse of [`EntityId::to_bytes`].
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, EntityError> {
        if bytes.len() != 24 {
            return Err(EntityError::InvalidLength(bytes.len()));
        }
        let field = |i: usize| {
            let mut word = [0u8; 8];
            word.copy_from_slice(&bytes[i * 8..(i + 1) * 8]);
            u64::from_be_bytes(word)
        };
        Ok(Self::new(field(0), field(1), field(2)))
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.shard, self.realm, self.num)
    }
}

impl FromStr for EntityId {
    type Err = EntityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split('.').collect();
        if parts.len() != 3 {
            return Err(EntityError::InvalidFormat(s.to_string()));
        }
        let parse = |p: &str| {
            p.parse::<u64>()
                .map_err(|_| EntityError::InvalidFormat(s.to_string()))
        };
        Ok(Self::new(parse(parts[0])?, parse(parts[1])?, parse(parts[2])?))
    }
}

/// Identifier of a scheduled transaction.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default, PartialOrd, Ord, Debug)]
pub struct ScheduleId(pub EntityId);

impl ScheduleId {
    /// Create a schedule id
    pub const fn new(shard: u64, realm: u64, num: u64) -> Self {
        Self(EntityId::new(shard, realm, num))
    }

    /// Schedule id behind a long-zero schedule address (as returned by the
    /// schedule service system contract).
    pub fn from_evm_address(address: &Address) -> Self {
        Self(EntityId::from_evm_address(address))
    }

    /// Long-zero address of the schedule
    pub fn to_evm_address(&self) -> Result<Address, EntityError> {
        self.0.to_evm_address()
    }

    /// 24-byte packing referenced by schedule signature material.
    pub fn to_bytes(&self) -> [u8; 24] {
        self.0.to_bytes()
    }

    /// Unpack 24 bytes produced by [`ScheduleId::to_bytes`]
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, EntityError> {
        EntityId::from_bytes(bytes).map(Self)
    }
}

impl fmt::Display for ScheduleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl FromStr for ScheduleId {
    type Err = EntityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse().map(Self)
    }
}

impl From<EntityId> for ScheduleId {
    fn from(id: EntityId) -> Self {
        Self(id)
    }
}

#[cfg(feature = "serde")]
mod serde_impl {
    use super::*;
    use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

    impl Serialize for EntityId {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            serializer.collect_str(self)
        }
    }

    impl<'de> Deserialize<'de> for EntityId {
        fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
            let s = String::deserialize(deserializer)?;
            s.parse().map_err(de::Error::custom)
        }
    }

    impl Serialize for ScheduleId {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            self.0.serialize(serializer)
        }
    }

    impl<'de> Deserialize<'de> for ScheduleId {
        fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
            EntityId::deserialize(deserializer).map(Self)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schedule_id_packing_exact_layout() {
        let id = ScheduleId::new(0, 0, 1002);
        let bytes = id.to_bytes();
        let mut expected = [0u8; 24];
        expected[22] = 0x03;
        expected[23] = 0xea;
        assert_eq!(bytes, expected);
        assert_eq!(hex::encode(bytes), "0000000000000000000000000000000000000000000003ea");
    }

    #[test]
    fn test_packing_field_order() {
        let bytes = EntityId::new(1, 2, 3).to_bytes();
        assert_eq!(bytes[7], 1);
        assert_eq!(bytes[15], 2);
        assert_eq!(bytes[23], 3);
    }

    #[test]
    fn test_from_bytes_rejects_wrong_length() {
        assert_eq!(
            ScheduleId::from_bytes(&[0u8; 20]).unwrap_err(),
            EntityError::InvalidLength(20)
        );
    }

    #[test]
    fn test_long_zero_address() {
        let id = EntityId::new(0, 0, 1002);
        let addr = id.to_evm_address().unwrap();
        assert_eq!(addr.to_hex(), "0x00000000000000000000000000000000000003ea");
        assert_eq!(EntityId::from_evm_address(&addr), id);
    }

    #[test]
    fn test_long_zero_with_shard_and_realm() {
        let id = EntityId::new(1, 2, 3);
        let addr = id.to_evm_address().unwrap();
        assert_eq!(addr.to_hex(), "0x0000000100000000000000020000000000000003");
        assert_eq!(EntityId::from_evm_address(&addr), id);
    }

    #[test]
    fn test_shard_out_of_range() {
        let id = EntityId::new(u64::from(u32::MAX) + 1, 0, 1);
        assert!(matches!(
            id.to_evm_address(),
            Err(EntityError::ShardOutOfRange(_))
        ));
    }

    #[test]
    fn test_parse_and_display() {
        let id: ScheduleId = "0.0.1002".parse().unwrap();
        assert_eq!(id, ScheduleId::new(0, 0, 1002));
        assert_eq!(id.to_string(), "0.0.1002");

        assert!("0.0".parse::<EntityId>().is_err());
        assert!("0.0.x".parse::<EntityId>().is_err());
        assert!("0.0.1.2".parse::<EntityId>().is_err());
    }
}
