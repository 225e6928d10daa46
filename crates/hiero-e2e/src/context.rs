//! Suite fixture shared by the tests of one suite

use std::collections::HashMap;

use hiero_client::types::TransactionReceipt;
use hiero_client::{MirrorClient, RelayClient};
use hiero_primitives::{Address, EntityId, H256};
use tracing::{debug, info};

use crate::config::SuiteConfig;
use crate::receipt::wait_for_receipt;
use crate::schedule::{resolve_schedule_chain, ChainResolution};
use crate::{E2EError, E2EResult};

/// Network handles and deployed contracts for a test suite.
///
/// Created in suite setup, filled in by setup steps through `&mut`, and
/// dropped at teardown.
pub struct SuiteContext {
    config: SuiteConfig,
    mirror: MirrorClient,
    relay: RelayClient,
    contracts: HashMap<String, Address>,
}

impl SuiteContext {
    /// Connect to the mirror node and relay named in `config`.
    ///
    /// Fails if the relay reports a chain id other than the configured one.
    pub async fn connect(config: SuiteConfig) -> E2EResult<Self> {
        let mirror = MirrorClient::new(&config.mirror_url);
        let relay = RelayClient::connect(&config.relay_url).await?;

        let chain_id = relay.chain_id().await?;
        if chain_id != config.chain_id {
            return Err(E2EError::Setup(format!(
                "relay at {} serves chain {}, expected {}",
                config.relay_url, chain_id, config.chain_id
            )));
        }

        info!(
            mirror = %config.mirror_url,
            relay = %config.relay_url,
            chain_id,
            "suite connected"
        );
        Ok(Self::new(config, mirror, relay))
    }

    /// Assemble a context from existing clients
    pub fn new(config: SuiteConfig, mirror: MirrorClient, relay: RelayClient) -> Self {
        Self {
            config,
            mirror,
            relay,
            contracts: HashMap::new(),
        }
    }

    /// Suite configuration
    pub fn config(&self) -> &SuiteConfig {
        &self.config
    }

    /// Mirror node client
    pub fn mirror(&self) -> &MirrorClient {
        &self.mirror
    }

    /// Relay client
    pub fn relay(&self) -> &RelayClient {
        &self.relay
    }

    /// Remember a deployed contract under `name`, replacing any previous one
    pub fn register_contract(&mut self, name: impl Into<String>, address: Address) {
        let name = name.into();
        debug!(%name, %address, "contract registered");
        self.contracts.insert(name, address);
    }

    /// Address of the contract registered under `name`
    pub fn contract(&self, name: &str) -> E2EResult<Address> {
        self.contracts
            .get(name)
            .copied()
            .ok_or_else(|| E2EError::Setup(format!("contract {} was not deployed", name)))
    }

    /// Entity `num` in the configured shard and realm
    pub fn entity_id(&self, num: u64) -> EntityId {
        self.config.entity_id(num)
    }

    /// Follow the schedule chain starting at `schedule_address` with the
    /// suite's poll budget
    pub async fn resolve_schedule_chain(
        &self,
        schedule_address: Address,
    ) -> E2EResult<ChainResolution> {
        resolve_schedule_chain(&self.mirror, schedule_address, &self.config.poll).await
    }

    /// Wait for the receipt of `hash` with the suite's poll budget
    pub async fn wait_for_receipt(&self, hash: H256) -> E2EResult<TransactionReceipt> {
        wait_for_receipt(&self.relay, hash, &self.config.poll).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wait::RetryPolicy;
    use serde_json::json;

    fn mock_context() -> (SuiteContext, hiero_client::MockRpcTransport) {
        let (mirror, _) = MirrorClient::new_mock();
        let (relay, rpc) = RelayClient::new_mock();
        let config = SuiteConfig {
            poll: RetryPolicy::new(10, 3),
            ..SuiteConfig::default()
        };
        (SuiteContext::new(config, mirror, relay), rpc)
    }

    #[test]
    fn test_contract_registry() {
        let (mut ctx, _) = mock_context();
        let token = Address::from_bytes([0x42; 20]);

        assert!(matches!(ctx.contract("Token"), Err(E2EError::Setup(_))));
        ctx.register_contract("Token", token);
        assert_eq!(ctx.contract("Token").unwrap(), token);
    }

    #[test]
    fn test_entity_id() {
        let (ctx, _) = mock_context();
        assert_eq!(ctx.entity_id(1002).to_string(), "0.0.1002");
    }

    #[tokio::test(start_paused = true)]
    async fn test_wait_for_receipt_after_pending() {
        let (ctx, rpc) = mock_context();
        let hash = H256::from_bytes([0x11; 32]);
        rpc.push_response("eth_getTransactionReceipt", json!(null));
        rpc.push_response(
            "eth_getTransactionReceipt",
            json!({
                "transactionHash": hash.to_hex(),
                "status": "0x1",
                "contractAddress": null,
                "gasUsed": "0x5208",
                "blockNumber": "0x10",
                "logs": []
            }),
        );

        let receipt = ctx.wait_for_receipt(hash).await.unwrap();
        assert!(receipt.status);
        assert_eq!(receipt.block_number, 16);
    }

    #[tokio::test(start_paused = true)]
    async fn test_wait_for_receipt_times_out() {
        let (ctx, _) = mock_context();
        let err = ctx
            .wait_for_receipt(H256::from_bytes([0x22; 32]))
            .await
            .unwrap_err();
        match err {
            E2EError::Timeout(timeout) => assert_eq!(timeout.attempts, 3),
            other => panic!("unexpected error: {}", other),
        }
    }
}
