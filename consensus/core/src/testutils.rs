//! Deterministic fixtures shared by tests across the workspace.

use crate::keys::PrivateKey;
use crate::sign::sign_transaction;
use crate::tx::{Transaction, TransactionInput, TransactionOutpoint, TransactionOutput};

/// A reproducible key derived from a one-byte seed pattern.
pub fn test_key(seed_byte: u8) -> PrivateKey {
    PrivateKey::from_seed([seed_byte; 32])
}

/// Builds a fully signed transaction spending `out_index` of `prev_tx` with
/// `key` into the given outputs.
pub fn create_transaction(prev_tx: &Transaction, out_index: u32, key: &PrivateKey, outputs: Vec<TransactionOutput>) -> Transaction {
    let input = TransactionInput::new(TransactionOutpoint::new(prev_tx.id(), out_index), key.public_key());
    let mut tx = Transaction::new(vec![input], outputs);
    let signature = sign_transaction(&tx, key);
    for input in tx.inputs.iter_mut() {
        input.signature = Some(signature);
    }
    tx
}
