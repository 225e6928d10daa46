//! RelayClient - JSON-RPC relay queries

use hiero_primitives::{Address, DelegationDesignator, H256, U256};
use serde_json::Value;

use crate::transport::{deserialize_response, MockRpcTransport, RpcTransport};
use crate::types::{parse_hex_bytes, parse_hex_u256, parse_hex_u64, RawReceipt, TransactionReceipt};
use crate::ClientError;

#[cfg(feature = "http")]
use crate::transport::HttpRpcTransport;

const LATEST: &str = "latest";

/// Client for the EVM JSON-RPC relay
pub struct RelayClient {
    transport: Box<dyn RpcTransport>,
    chain_id: Option<u64>,
}

impl RelayClient {
    /// Connect over HTTP and cache the chain id
    #[cfg(feature = "http")]
    pub async fn connect(url: &str) -> Result<Self, ClientError> {
        let mut client = Self::with_transport(HttpRpcTransport::new(url));

        // Fetch and cache chain ID
        let chain_id = client.fetch_chain_id().await?;
        client.chain_id = Some(chain_id);

        Ok(client)
    }

    /// Create a client backed by a mock transport with local-node defaults
    pub fn new_mock() -> (Self, MockRpcTransport) {
        let transport = MockRpcTransport::new();
        (Self::with_transport(transport.clone()), transport)
    }

    /// Create a client with a custom transport
    pub fn with_transport(transport: impl RpcTransport + 'static) -> Self {
        Self {
            transport: Box::new(transport),
            chain_id: None,
        }
    }

    async fn request<T: serde::de::DeserializeOwned>(
        &self,
        method: &str,
        params: Vec<Value>,
    ) -> Result<T, ClientError> {
        let value = self.transport.request_json(method, params).await?;
        deserialize_response(value)
    }

    // ==================== Chain Info ====================

    /// Get the chain ID
    pub async fn chain_id(&self) -> Result<u64, ClientError> {
        if let Some(id) = self.chain_id {
            return Ok(id);
        }
        self.fetch_chain_id().await
    }

    async fn fetch_chain_id(&self) -> Result<u64, ClientError> {
        let result: String = self.request("eth_chainId", vec![]).await?;
        parse_hex_u64(&result)
    }

    /// Get the current block number
    pub async fn block_number(&self) -> Result<u64, ClientError> {
        let result: String = self.request("eth_blockNumber", vec![]).await?;
        parse_hex_u64(&result)
    }

    /// Get the current gas price in weibars
    pub async fn gas_price(&self) -> Result<U256, ClientError> {
        let result: String = self.request("eth_gasPrice", vec![]).await?;
        parse_hex_u256(&result)
    }

    // ==================== Account Queries ====================

    /// Latest balance of an address in weibars
    pub async fn get_balance(&self, address: &Address) -> Result<U256, ClientError> {
        let result: String = self
            .request(
                "eth_getBalance",
                vec![Value::String(address.to_hex()), Value::String(LATEST.into())],
            )
            .await?;
        parse_hex_u256(&result)
    }

    /// Latest nonce of an address
    pub async fn get_nonce(&self, address: &Address) -> Result<u64, ClientError> {
        let result: String = self
            .request(
                "eth_getTransactionCount",
                vec![Value::String(address.to_hex()), Value::String(LATEST.into())],
            )
            .await?;
        parse_hex_u64(&result)
    }

    /// Latest code at an address
    pub async fn get_code(&self, address: &Address) -> Result<Vec<u8>, ClientError> {
        let result: String = self
            .request(
                "eth_getCode",
                vec![Value::String(address.to_hex()), Value::String(LATEST.into())],
            )
            .await?;
        parse_hex_bytes(&result)
    }

    /// EIP-7702 delegate of an account, if its code is a delegation designator
    pub async fn delegation_of(&self, address: &Address) -> Result<Option<Address>, ClientError> {
        let code = self.get_code(address).await?;
        Ok(DelegationDesignator::from_code(&code).map(|d| d.delegate()))
    }

    // ==================== Transactions ====================

    /// Receipt of a transaction, `None` while it is still pending
    pub async fn get_transaction_receipt(
        &self,
        hash: &H256,
    ) -> Result<Option<TransactionReceipt>, ClientError> {
        let raw: Option<RawReceipt> = self
            .request("eth_getTransactionReceipt", vec![Value::String(hash.to_hex())])
            .await?;
        raw.map(TransactionReceipt::try_from).transpose()
    }

    /// Submit a signed, RLP-encoded transaction
    pub async fn send_raw_transaction(&self, tx: &[u8]) -> Result<H256, ClientError> {
        let encoded = format!("0x{}", hex::encode(tx));
        let result: String = self
            .request("eth_sendRawTransaction", vec![Value::String(encoded)])
            .await?;
        H256::from_hex(&result).map_err(|e| ClientError::InvalidHex(e.to_string()))
    }
}
