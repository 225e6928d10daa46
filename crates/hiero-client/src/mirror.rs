//! MirrorClient - typed mirror-node REST queries

use hiero_primitives::{EntityId, ScheduleId};

use crate::transport::{deserialize_response, MockRestTransport, RestTransport};
use crate::types::{
    AccountBalance, BalancesPage, ConsensusTimestamp, ContractLog, LogQuery, LogsPage,
    ScheduleInfo, TransactionRecord, TransactionsPage,
};
use crate::ClientError;

#[cfg(feature = "http")]
use crate::transport::HttpRestTransport;

/// Read-only mirror-node client
pub struct MirrorClient {
    transport: Box<dyn RestTransport>,
}

impl MirrorClient {
    /// Create a client for a mirror node base URL, e.g. `http://localhost:5551`
    #[cfg(feature = "http")]
    pub fn new(base_url: &str) -> Self {
        Self::with_transport(HttpRestTransport::new(base_url))
    }

    /// Create a client backed by an empty mock transport
    pub fn new_mock() -> (Self, MockRestTransport) {
        let transport = MockRestTransport::new();
        (Self::with_transport(transport.clone()), transport)
    }

    /// Create a client with a custom transport
    pub fn with_transport(transport: impl RestTransport + 'static) -> Self {
        Self {
            transport: Box::new(transport),
        }
    }

    async fn get<T: serde::de::DeserializeOwned>(&self, path: &str) -> Result<T, ClientError> {
        let value = self.transport.get_json(path).await?;
        deserialize_response(value)
    }

    /// `GET /api/v1/schedules/{id}`
    pub async fn schedule(&self, schedule_id: &ScheduleId) -> Result<ScheduleInfo, ClientError> {
        self.get(&format!("/api/v1/schedules/{}", schedule_id)).await
    }

    /// Transactions recorded at exactly `timestamp`
    pub async fn transactions_at(
        &self,
        timestamp: &ConsensusTimestamp,
    ) -> Result<Vec<TransactionRecord>, ClientError> {
        let page: TransactionsPage = self
            .get(&format!("/api/v1/transactions?timestamp={}", timestamp))
            .await?;
        Ok(page.transactions)
    }

    /// Contract-call logs matching `query`
    pub async fn contract_logs(&self, query: &LogQuery) -> Result<Vec<ContractLog>, ClientError> {
        let page: LogsPage = self.get(&query.to_path()).await?;
        Ok(page.logs)
    }

    /// Current hbar balance of an account in tinybars; `None` if the mirror
    /// node does not know the account yet
    pub async fn account_balance(&self, account: &EntityId) -> Result<Option<u64>, ClientError> {
        let page: BalancesPage = self
            .get(&format!("/api/v1/balances?account.id={}", account))
            .await?;
        Ok(page
            .balances
            .into_iter()
            .find(|b: &AccountBalance| b.account == *account)
            .map(|b| b.balance))
    }
}
