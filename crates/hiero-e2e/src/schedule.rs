//! Schedule-chain resolution
//!
//! A scheduled contract call may itself schedule a further call (HIP-1215).
//! The resolver follows such chains through the mirror node: it waits for a
//! schedule to execute, looks at the executing transaction, and if that
//! transaction announced a new schedule in its first log, moves on to it.

use hiero_client::types::{
    ConsensusTimestamp, ContractLog, LogQuery, Order, ScheduleInfo, TransactionRecord,
};
use hiero_client::MirrorClient;
use hiero_primitives::{Address, ScheduleId};
use tracing::{debug, info};

use crate::wait::{wait_for_condition, RetryPolicy};
use crate::{E2EError, E2EResult};

/// Terminal outcome of a schedule chain
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChainResolution {
    /// Mirror result string of the last transaction in the chain
    pub result: String,
    /// Number of reschedules followed before the terminal transaction
    pub hops: u32,
}

/// Schedule address carried in the trailing 20 bytes of log data.
///
/// Data shorter than an address, or ending in the zero address, carries no
/// schedule.
pub fn next_schedule_address(log_data: &[u8]) -> Option<Address> {
    Address::from_word_tail(log_data).filter(|address| !address.is_zero())
}

/// Wait until the mirror node reports `schedule_id` as executed and return
/// the execution timestamp.
pub async fn wait_for_schedule_execution(
    mirror: &MirrorClient,
    schedule_id: ScheduleId,
    policy: &RetryPolicy,
) -> E2EResult<ConsensusTimestamp> {
    let label = format!("schedule {} execution", schedule_id);
    let info = wait_for_condition(
        &label,
        policy,
        move || async move { mirror.schedule(&schedule_id).await.map_err(E2EError::from) },
        |info: &ScheduleInfo| info.is_executed(),
    )
    .await?;

    info.executed_timestamp
        .ok_or_else(|| E2EError::Setup(format!("{} has no execution timestamp", schedule_id)))
}

/// Follow a chain of scheduled calls starting at `schedule_address`.
///
/// Each link: wait for execution, fetch the transaction at the execution
/// timestamp, and if it succeeded as a scheduled execution, wait for its
/// first contract log and read the next schedule address from it. The chain
/// ends at the first transaction that fails, is not a scheduled execution,
/// or announces no further schedule.
///
/// Any exhausted wait fails the whole resolution; no partial result is
/// returned.
pub async fn resolve_schedule_chain(
    mirror: &MirrorClient,
    schedule_address: Address,
    policy: &RetryPolicy,
) -> E2EResult<ChainResolution> {
    let mut address = schedule_address;
    let mut hops = 0u32;

    loop {
        let schedule_id = ScheduleId::from_evm_address(&address);
        let executed_at = wait_for_schedule_execution(mirror, schedule_id, policy).await?;

        let transaction = mirror
            .transactions_at(&executed_at)
            .await?
            .into_iter()
            .next()
            .ok_or(E2EError::ScheduleNotFound {
                schedule_id,
                timestamp: executed_at,
            })?;

        info!(
            %schedule_id,
            result = %transaction.result,
            scheduled = transaction.scheduled,
            hops,
            "schedule executed"
        );

        let next = if transaction.is_success() && transaction.scheduled {
            find_next_schedule_address(mirror, &transaction, policy).await?
        } else {
            None
        };

        match next {
            Some(next) => {
                debug!(from = %schedule_id, to = %next, "following rescheduled call");
                address = next;
                hops += 1;
            }
            None => {
                return Ok(ChainResolution {
                    result: transaction.result,
                    hops,
                })
            }
        }
    }
}

async fn find_next_schedule_address(
    mirror: &MirrorClient,
    transaction: &TransactionRecord,
    policy: &RetryPolicy,
) -> E2EResult<Option<Address>> {
    let query = LogQuery::at(transaction.consensus_timestamp)
        .transaction_hash(transaction.hash_hex())
        .limit(1)
        .order(Order::Asc);
    let query = &query;
    let label = format!("logs of {}", transaction.transaction_id);

    let logs = wait_for_condition(
        &label,
        policy,
        move || async move { mirror.contract_logs(query).await.map_err(E2EError::from) },
        |logs: &Vec<ContractLog>| !logs.is_empty(),
    )
    .await?;

    Ok(logs.first().and_then(|log| next_schedule_address(&log.data)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_next_schedule_address_from_log_data() {
        let data = hex::decode(
            "0000000000000000000000000000000000000000000000000000000000000001\
             000000000000000000000000ad3954ab34de15bc33da98170e68f0eeac294dfc",
        )
        .unwrap();
        let next = next_schedule_address(&data).unwrap();
        assert_eq!(
            next,
            Address::from_hex("0xad3954AB34dE15BC33dA98170e68F0EEac294dFc").unwrap()
        );
    }

    #[test]
    fn test_next_schedule_address_absent() {
        assert_eq!(next_schedule_address(&[]), None);
        assert_eq!(next_schedule_address(&[0x01; 19]), None);
        assert_eq!(next_schedule_address(&[0u8; 32]), None);
    }
}
