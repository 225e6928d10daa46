//! Client error types

use thiserror::Error;

/// Client error type
#[derive(Debug, Error)]
pub enum ClientError {
    /// Transport/network error
    #[error("Transport error: {0}")]
    Transport(String),

    /// Non-success HTTP status from the mirror node
    #[error("HTTP {status} for {path}")]
    Http {
        /// Status code
        status: u16,
        /// Requested path
        path: String,
    },

    /// JSON-RPC error from the relay
    #[error("RPC error: {code} - {message}")]
    Rpc {
        /// Error code
        code: i64,
        /// Error message
        message: String,
    },

    /// Response did not match the expected record shape
    #[error("Decode error: {0}")]
    Decode(String),

    /// Invalid hex string
    #[error("Invalid hex: {0}")]
    InvalidHex(String),
}

impl ClientError {
    /// True for a 404 from the mirror node
    pub fn is_not_found(&self) -> bool {
        matches!(self, ClientError::Http { status: 404, .. })
    }
}

impl From<hex::FromHexError> for ClientError {
    fn from(e: hex::FromHexError) -> Self {
        ClientError::InvalidHex(e.to_string())
    }
}

impl From<serde_json::Error> for ClientError {
    fn from(e: serde_json::Error) -> Self {
        ClientError::Decode(e.to_string())
    }
}

impl From<hiero_primitives::PrimitiveError> for ClientError {
    fn from(e: hiero_primitives::PrimitiveError) -> Self {
        ClientError::Decode(e.to_string())
    }
}
