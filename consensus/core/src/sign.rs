use crate::block::Block;
use crate::keys::{PrivateKey, Signature};
use crate::merkle::calc_hash_merkle_root;
use crate::tx::Transaction;

/// Produces the signature all inputs owned by `key` must carry: Ed25519 over
/// the stripped-transaction hash. The caller attaches it to its inputs.
pub fn sign_transaction(tx: &Transaction, key: &PrivateKey) -> Signature {
    key.sign(tx.id().as_ref())
}

/// Verifies every input signature over the stripped-transaction hash using
/// the input's declared public key.
pub fn verify_transaction(tx: &Transaction) -> bool {
    let id = tx.id();
    tx.inputs.iter().all(|input| match &input.signature {
        Some(signature) => input.public_key.verify(id.as_ref(), signature),
        None => false,
    })
}

/// Commits the body by writing the merkle root into the header (when the
/// block carries transactions), then signs the block hash and attaches the
/// signer key.
pub fn sign_block(block: &mut Block, key: &PrivateKey) -> Signature {
    if !block.transactions.is_empty() {
        block.header.merkle_root = calc_hash_merkle_root(block.transactions.iter());
    }
    let signature = key.sign(block.hash().as_ref());
    block.public_key = Some(key.public_key());
    block.signature = Some(signature);
    signature
}

/// Recomputes the merkle commitment (when the block carries transactions) and
/// verifies the producer signature over the block hash.
pub fn verify_block(block: &Block) -> bool {
    if !block.transactions.is_empty() && block.header.merkle_root != calc_hash_merkle_root(block.transactions.iter()) {
        return false;
    }
    match (&block.public_key, &block.signature) {
        (Some(public_key), Some(signature)) => public_key.verify(block.hash().as_ref(), signature),
        _ => false,
    }
}
