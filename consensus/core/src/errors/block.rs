use crate::errors::store::StoreError;
use crate::errors::tx::TxRuleError;
use crate::tx::TransactionId;
use blocknet_hashes::Hash;
use thiserror::Error;

#[derive(Error, Debug, Clone)]
pub enum RuleError {
    #[error("invalid merkle root: header indicates {0} but calculated value is {1}")]
    BadMerkleRoot(Hash, Hash),

    #[error("block {0} is missing its signer key or signature")]
    MissingBlockSignature(Hash),

    #[error("block signature verification failed for block {0}")]
    BadBlockSignature(Hash),

    #[error("block height {0} is not equal to current height {1} + 1")]
    WrongBlockHeight(u64, u64),

    #[error("block previous hash {0} is not equal to current tip hash {1}")]
    WrongParentHash(Hash, Hash),

    #[error("transaction validation failed for tx {0}: {1}")]
    TxInContextFailed(TransactionId, TxRuleError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

pub type BlockProcessResult<T> = std::result::Result<T, RuleError>;
