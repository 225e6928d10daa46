//! EVM address type (20 bytes)

use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Address parsing error
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AddressError {
    /// Invalid hex string
    #[error("invalid hex string: {0}")]
    InvalidHex(String),
    /// Invalid length
    #[error("invalid address length: expected 20 bytes, got {0}")]
    InvalidLength(usize),
}

/// EVM-compatible 20-byte address
///
/// Hiero entities (accounts, contracts, schedules, tokens) without an ECDSA
/// alias are addressed by their "long-zero" form, see
/// [`EntityId::to_evm_address`](crate::EntityId::to_evm_address).
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
pub struct Address([u8; 20]);

impl Address {
    /// Size of address in bytes
    pub const LEN: usize = 20;

    /// Zero address (0x0000...0000)
    pub const ZERO: Address = Address([0u8; 20]);

    /// Create address from bytes
    pub const fn from_bytes(bytes: [u8; 20]) -> Self {
        Address(bytes)
    }

    /// Create address from slice
    pub fn from_slice(slice: &[u8]) -> Result<Self, AddressError> {
        if slice.len() != Self::LEN {
            return Err(AddressError::InvalidLength(slice.len()));
        }
        let mut bytes = [0u8; 20];
        bytes.copy_from_slice(slice);
        Ok(Address(bytes))
    }

    /// Take the trailing 20 bytes of a longer byte string.
    ///
    /// ABI words carry addresses right-aligned, so the last 20 bytes of a
    /// 32-byte word (or of any log payload ending in one) are the address.
    /// Returns `None` when fewer than 20 bytes are available.
    pub fn from_word_tail(data: &[u8]) -> Option<Self> {
        let start = data.len().checked_sub(Self::LEN)?;
        let mut bytes = [0u8; 20];
        bytes.copy_from_slice(&data[start..]);
        Some(Address(bytes))
    }

    /// Parse address from hex string (with or without 0x prefix, any case)
    pub fn from_hex(s: &str) -> Result<Self, AddressError> {
        let s = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")).unwrap_or(s);
        let bytes = hex::decode(s).map_err(|e| AddressError::InvalidHex(e.to_string()))?;
        Self::from_slice(&bytes)
    }

    /// Get as byte slice
    pub fn as_bytes(&self) -> &[u8; 20] {
        &self.0
    }

    /// Check if this is the zero address
    pub fn is_zero(&self) -> bool {
        self.0 == [0u8; 20]
    }

    /// Left-pad to a 32-byte ABI word (as used in indexed log topics)
    pub fn to_word(&self) -> [u8; 32] {
        let mut word = [0u8; 32];
        word[12..].copy_from_slice(&self.0);
        word
    }

    /// Convert to lowercase hex string with 0x prefix
    pub fn to_hex(&self) -> String {
        format!("0x{}", hex::encode(self.0))
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Address({})", self.to_hex())
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl FromStr for Address {
    type Err = AddressError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

impl From<[u8; 20]> for Address {
    fn from(bytes: [u8; 20]) -> Self {
        Address(bytes)
    }
}

impl AsRef<[u8]> for Address {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

#[cfg(feature = "serde")]
mod serde_impl {
    use super::*;
    use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

    impl Serialize for Address {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            serializer.serialize_str(&self.to_hex())
        }
    }

    impl<'de> Deserialize<'de> for Address {
        fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
            let s = String::deserialize(deserializer)?;
            Address::from_hex(&s).map_err(de::Error::custom)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_address_from_hex() {
        let addr = Address::from_hex("0x742d35Cc6634C0532925a3b844Bc9e7595f0aB3d").unwrap();
        assert!(!addr.is_zero());

        let addr2 = Address::from_hex("742d35Cc6634C0532925a3b844Bc9e7595f0aB3d").unwrap();
        assert_eq!(addr, addr2);
    }

    #[test]
    fn test_address_case_insensitive() {
        let lower = Address::from_hex("0xad3954ab34de15bc33da98170e68f0eeac294dfc").unwrap();
        let mixed = Address::from_hex("0xad3954AB34dE15BC33dA98170e68F0EEac294dFc").unwrap();
        assert_eq!(lower, mixed);
    }

    #[test]
    fn test_zero_address() {
        assert!(Address::ZERO.is_zero());
        assert_eq!(
            Address::ZERO.to_hex(),
            "0x0000000000000000000000000000000000000000"
        );
    }

    #[test]
    fn test_address_invalid_length() {
        assert_eq!(
            Address::from_hex("0x1234").unwrap_err(),
            AddressError::InvalidLength(2)
        );
    }

    #[test]
    fn test_address_invalid_hex() {
        assert!(matches!(
            Address::from_hex("0xzz2d35Cc6634C0532925a3b844Bc9e7595f0aB3d"),
            Err(AddressError::InvalidHex(_))
        ));
    }

    #[test]
    fn test_from_word_tail() {
        let mut data = vec![0u8; 12];
        data.extend_from_slice(&[0x11; 20]);
        assert_eq!(
            Address::from_word_tail(&data),
            Some(Address::from_bytes([0x11; 20]))
        );
        assert_eq!(Address::from_word_tail(&[0u8; 19]), None);
        assert_eq!(
            Address::from_word_tail(&[0x22; 20]),
            Some(Address::from_bytes([0x22; 20]))
        );
    }

    #[test]
    fn test_to_word_left_pads() {
        let addr = Address::from_bytes([0xab; 20]);
        let word = addr.to_word();
        assert_eq!(&word[..12], &[0u8; 12]);
        assert_eq!(&word[12..], addr.as_bytes());
        assert_eq!(Address::from_word_tail(&word), Some(addr));
    }

    #[test]
    fn test_address_from_str() {
        let addr: Address = "0x00000000000000000000000000000000000003ea".parse().unwrap();
        assert_eq!(addr.as_bytes()[19], 0xea);
        assert_eq!(addr.as_bytes()[18], 0x03);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_address_serde_hex_string() {
        let addr = Address::from_bytes([0x01; 20]);
        let json = serde_json::to_string(&addr).unwrap();
        assert_eq!(json, "\"0x0101010101010101010101010101010101010101\"");
        let back: Address = serde_json::from_str(&json).unwrap();
        assert_eq!(back, addr);
    }
}
