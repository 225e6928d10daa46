//! # hiero-e2e
//!
//! Building blocks for Hiero smart-contract integration tests.
//!
//! ## Design Philosophy
//!
//! 1. **Observe, don't model**: tests watch the real network through the
//!    mirror node and the JSON-RPC relay
//! 2. **Bounded patience**: every wait has an explicit attempt budget
//! 3. **Typed boundaries**: mirror and relay payloads are parsed into records
//!    before a test looks at them
//! 4. **Explicit fixtures**: suite state lives in a [`SuiteContext`] passed by
//!    reference
//!
//! ## Usage
//!
//! ```ignore
//! let mut ctx = SuiteContext::connect(SuiteConfig::from_env()?).await?;
//! let chain = ctx.resolve_schedule_chain(schedule_address).await?;
//! assert_eq!(chain.result, "SUCCESS");
//! ```

pub mod config;
mod context;
pub mod events;
pub mod logging;
mod receipt;
pub mod schedule;
pub mod wait;

use hiero_client::types::ConsensusTimestamp;
use hiero_client::ClientError;
use hiero_crypto::CryptoError;
use hiero_primitives::ScheduleId;

pub use config::SuiteConfig;
pub use context::SuiteContext;
pub use events::{Erc20Transfer, Erc721Transfer, EventLog};
pub use receipt::{wait_for_receipt, ReceiptAssertions};
pub use schedule::{resolve_schedule_chain, ChainResolution};
pub use wait::{wait_for_condition, wait_for_some, PollTimeoutError, RetryPolicy};

/// Test result
pub type E2EResult<T> = Result<T, E2EError>;

/// E2E test errors
#[derive(Debug, thiserror::Error)]
pub enum E2EError {
    /// A poll exhausted its attempt budget
    #[error(transparent)]
    Timeout(#[from] PollTimeoutError),

    /// The mirror node reported an execution but holds no transaction for it
    #[error("schedule {schedule_id} executed at {timestamp} but no transaction is recorded there")]
    ScheduleNotFound {
        /// Schedule being resolved
        schedule_id: ScheduleId,
        /// Reported execution timestamp
        timestamp: ConsensusTimestamp,
    },

    /// Mirror or relay failure
    #[error("client error: {0}")]
    Client(#[from] ClientError),

    /// Signing failure
    #[error("crypto error: {0}")]
    Crypto(#[from] CryptoError),

    /// Configuration could not be loaded
    #[error("config error: {0}")]
    Config(String),

    /// Setup failed
    #[error("setup failed: {0}")]
    Setup(String),
}
