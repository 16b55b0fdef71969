use crate::hashing;
use crate::keys::{Address, PublicKey, Signature};
use serde::{Deserialize, Serialize};
use std::fmt::Display;

pub type TransactionId = blocknet_hashes::Hash;

pub type TransactionIndexType = u32;

/// References an earlier transaction output by (transaction id, output index).
/// This pair is also the key of the UTXO set.
#[derive(Eq, Hash, PartialEq, Debug, Copy, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionOutpoint {
    pub transaction_id: TransactionId,
    pub index: TransactionIndexType,
}

impl TransactionOutpoint {
    pub fn new(transaction_id: TransactionId, index: u32) -> Self {
        Self { transaction_id, index }
    }
}

impl Display for TransactionOutpoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.transaction_id, self.index)
    }
}

/// Spends an earlier output. The signature covers the enclosing transaction
/// with all input signatures blanked, so signing never changes the
/// transaction id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionInput {
    pub previous_outpoint: TransactionOutpoint,
    pub public_key: PublicKey,
    pub signature: Option<Signature>,
}

impl TransactionInput {
    /// Creates an unsigned input; see [`crate::sign::sign_transaction`].
    pub fn new(previous_outpoint: TransactionOutpoint, public_key: PublicKey) -> Self {
        Self { previous_outpoint, public_key, signature: None }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionOutput {
    pub value: u64,
    pub address: Address,
}

impl TransactionOutput {
    pub fn new(value: u64, address: Address) -> Self {
        Self { value, address }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub inputs: Vec<TransactionInput>,
    pub outputs: Vec<TransactionOutput>,
}

impl Transaction {
    pub fn new(inputs: Vec<TransactionInput>, outputs: Vec<TransactionOutput>) -> Self {
        Self { inputs, outputs }
    }

    /// The transaction id: hash of the canonical encoding with input
    /// signatures blanked.
    pub fn id(&self) -> TransactionId {
        hashing::tx::id(self)
    }

    /// A coinbase transaction mints outputs without spending any input.
    /// Only genesis carries one.
    pub fn is_coinbase(&self) -> bool {
        self.inputs.is_empty()
    }
}

/// A ledger entry tracking one transaction output. Entries are immutable
/// except for the spent flag, which block acceptance flips exactly once.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UtxoEntry {
    pub outpoint: TransactionOutpoint,
    pub output: TransactionOutput,
    pub is_spent: bool,
}

impl UtxoEntry {
    pub fn new(outpoint: TransactionOutpoint, output: TransactionOutput) -> Self {
        Self { outpoint, output, is_spent: false }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keys::PrivateKey;
    use blocknet_hashes::ZERO_HASH;

    #[test]
    fn test_transaction_id_determinism() {
        let key = PrivateKey::from_seed([1u8; 32]);
        let tx = Transaction::new(
            vec![TransactionInput::new(TransactionOutpoint::new(ZERO_HASH, 0), key.public_key())],
            vec![TransactionOutput::new(100, key.public_key().address())],
        );
        assert_eq!(tx.id(), tx.id());
        assert_ne!(tx.id(), ZERO_HASH);
    }

    #[test]
    fn test_coinbase_has_no_inputs() {
        let key = PrivateKey::from_seed([2u8; 32]);
        let coinbase = Transaction::new(Vec::new(), vec![TransactionOutput::new(100_000, key.public_key().address())]);
        assert!(coinbase.is_coinbase());

        let spend = Transaction::new(
            vec![TransactionInput::new(TransactionOutpoint::new(coinbase.id(), 0), key.public_key())],
            vec![TransactionOutput::new(100, key.public_key().address())],
        );
        assert!(!spend.is_coinbase());
    }
}
