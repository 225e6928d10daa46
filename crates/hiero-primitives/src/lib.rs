//! # hiero-primitives
//!
//! Primitive types shared by the Hiero smart-contract test crates.
//!
//! - [`Address`]: 20-byte EVM address
//! - [`H256`]: 32-byte hash / log topic
//! - [`EntityId`] and [`ScheduleId`]: `shard.realm.num` identifiers and their
//!   long-zero EVM and packed byte encodings
//! - [`DelegationDesignator`]: EIP-7702 delegation code

#![warn(missing_docs)]
#![warn(clippy::all)]

mod address;
mod delegation;
mod entity;
mod error;
mod hash;

pub use address::{Address, AddressError};
pub use delegation::DelegationDesignator;
pub use entity::{EntityError, EntityId, ScheduleId};
pub use error::PrimitiveError;
pub use hash::{HashError, H256};

// Re-export primitive-types for U256
pub use primitive_types::U256;
