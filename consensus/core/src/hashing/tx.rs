use crate::hashing::HasherExtensions;
use crate::tx::{Transaction, TransactionId, TransactionInput, TransactionOutpoint, TransactionOutput};
use blocknet_hashes::{Hasher, TransactionHash};

/// Returns the transaction id.
///
/// The encoding always writes an empty byte string where an input signature
/// would go, so two transactions agreeing on everything but their signatures
/// share an id.
pub fn id(tx: &Transaction) -> TransactionId {
    let mut hasher = TransactionHash::new();
    write_transaction(&mut hasher, tx);
    hasher.finalize()
}

fn write_transaction<T: Hasher>(hasher: &mut T, tx: &Transaction) {
    hasher.write_len(tx.inputs.len());
    for input in tx.inputs.iter() {
        write_input(hasher, input);
    }

    hasher.write_len(tx.outputs.len());
    for output in tx.outputs.iter() {
        write_output(hasher, output);
    }
}

#[inline(always)]
fn write_input<T: Hasher>(hasher: &mut T, input: &TransactionInput) {
    write_outpoint(hasher, &input.previous_outpoint);
    hasher.update(input.public_key);
    // Signatures are blanked in the encoding
    hasher.write_var_bytes(&[]);
}

#[inline(always)]
fn write_outpoint<T: Hasher>(hasher: &mut T, outpoint: &TransactionOutpoint) {
    hasher.update(outpoint.transaction_id).update(outpoint.index.to_le_bytes());
}

#[inline(always)]
fn write_output<T: Hasher>(hasher: &mut T, output: &TransactionOutput) {
    hasher.update(output.value.to_le_bytes()).update(output.address);
}
