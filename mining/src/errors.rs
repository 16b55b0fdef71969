use blocknet_consensus_core::tx::TransactionId;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MempoolError {
    /// A normal outcome of gossip: the same transaction reaches a node over
    /// several peers.
    #[error("transaction {0} is already in the mempool")]
    TransactionAlreadyKnown(TransactionId),
}

pub type MempoolResult<T> = std::result::Result<T, MempoolError>;
