use crate::tx::TransactionOutpoint;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TxRuleError {
    #[error("transaction signature verification failed")]
    SignatureInvalid,

    #[error("outpoint {0} is missing from the current utxo set")]
    MissingUtxoEntry(TransactionOutpoint),

    #[error("outpoint {0} is already spent")]
    UtxoAlreadySpent(TransactionOutpoint),

    #[error("transaction tries to spend {0} while its total inputs amount is {1}")]
    SpendTooHigh(u64, u64),

    #[error("transaction total inputs spending amount overflowed u64")]
    InputAmountOverflow,

    #[error("transaction total outputs value overflowed u64")]
    OutputsValueOverflow,
}

pub type TxResult<T> = std::result::Result<T, TxRuleError>;
