//! # hiero-client
//!
//! Clients for the two network surfaces the smart-contract tests observe.
//!
//! - **MirrorClient**: typed, read-only mirror-node REST queries (schedules,
//!   transactions, contract logs, balances)
//! - **RelayClient**: EVM JSON-RPC relay queries (receipts, code, balances)
//!
//! Both clients sit on object-safe transport traits with an HTTP
//! implementation and a scriptable mock.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use hiero_client::MirrorClient;
//! use hiero_primitives::ScheduleId;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mirror = MirrorClient::new("http://localhost:5551");
//!     let info = mirror.schedule(&ScheduleId::new(0, 0, 1002)).await?;
//!     println!("executed at {:?}", info.executed_timestamp);
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

mod error;
mod mirror;
mod relay;
mod transport;
pub mod types;

pub use error::ClientError;
pub use mirror::MirrorClient;
pub use relay::RelayClient;
pub use transport::{MockRestTransport, MockRpcTransport, RestTransport, RpcTransport};

#[cfg(feature = "http")]
pub use transport::{HttpRestTransport, HttpRpcTransport};
