//! # hiero-crypto
//!
//! Cryptographic helpers for Hiero smart-contract tests.
//!
//! - Keccak-256 hashing, event topics and function selectors
//! - EIP-55 checksummed address encoding
//! - secp256k1 signing material for schedule signatures and
//!   HIP-632 `isAuthorizedRaw` checks

#![warn(missing_docs)]
#![warn(clippy::all)]

mod checksum;
mod error;
mod hash;
mod signature;

pub use checksum::{is_checksum_valid, to_checksum};
pub use error::CryptoError;
pub use hash::{event_topic, function_selector, keccak256};
pub use signature::{
    authorization_blob, parse_private_key, public_key_to_address, recover_address, schedule_digest, sign_prehash,
    sign_schedule, PrivateKey, PublicKey, Signature,
};
