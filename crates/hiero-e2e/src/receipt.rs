//! Relay receipts: waiting for them and asserting on them

use hiero_client::types::TransactionReceipt;
use hiero_client::RelayClient;
use hiero_primitives::{Address, H256, U256};

use crate::events::{erc20_transfers, erc721_transfers};
use crate::wait::{wait_for_some, RetryPolicy};
use crate::{E2EError, E2EResult};

/// Poll the relay until the receipt for `hash` is available
pub async fn wait_for_receipt(
    relay: &RelayClient,
    hash: H256,
    policy: &RetryPolicy,
) -> E2EResult<TransactionReceipt> {
    let label = format!("receipt of {}", hash);
    wait_for_some(&label, policy, move || async move {
        relay
            .get_transaction_receipt(&hash)
            .await
            .map_err(E2EError::from)
    })
    .await
}

// Helper trait for asserting on receipts
pub trait ReceiptAssertions {
    /// Assert transaction succeeded
    fn assert_success(&self) -> &Self;

    /// Assert transaction reverted
    fn assert_reverted(&self) -> &Self;

    /// Assert contract was created
    fn assert_contract_created(&self) -> Address;

    /// Assert an ERC20 `Transfer(from, to, value)` was emitted by `token`
    fn assert_erc20_transfer(&self, token: Address, from: Address, to: Address, value: U256) -> &Self;

    /// Assert an ERC721 `Transfer(from, to, token_id)` was emitted by `token`
    fn assert_erc721_transfer(
        &self,
        token: Address,
        from: Address,
        to: Address,
        token_id: U256,
    ) -> &Self;
}

impl ReceiptAssertions for TransactionReceipt {
    fn assert_success(&self) -> &Self {
        assert!(self.status, "Expected transaction {} to succeed", self.transaction_hash);
        self
    }

    fn assert_reverted(&self) -> &Self {
        assert!(!self.status, "Expected transaction {} to revert", self.transaction_hash);
        self
    }

    fn assert_contract_created(&self) -> Address {
        self.contract_address.unwrap_or_else(|| {
            panic!("Expected transaction {} to create a contract", self.transaction_hash)
        })
    }

    fn assert_erc20_transfer(&self, token: Address, from: Address, to: Address, value: U256) -> &Self {
        let transfers = erc20_transfers(&self.logs);
        assert!(
            transfers
                .iter()
                .any(|t| t.token == token && t.from == from && t.to == to && t.value == value),
            "Expected ERC20 Transfer({}, {}, {}) from {}, found {:?}",
            from,
            to,
            value,
            token,
            transfers
        );
        self
    }

    fn assert_erc721_transfer(
        &self,
        token: Address,
        from: Address,
        to: Address,
        token_id: U256,
    ) -> &Self {
        let transfers = erc721_transfers(&self.logs);
        assert!(
            transfers
                .iter()
                .any(|t| t.token == token && t.from == from && t.to == to && t.token_id == token_id),
            "Expected ERC721 Transfer({}, {}, #{}) from {}, found {:?}",
            from,
            to,
            token_id,
            token,
            transfers
        );
        self
    }
}
