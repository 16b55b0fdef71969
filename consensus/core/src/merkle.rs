use crate::{hashing, tx::Transaction};
use blocknet_hashes::Hash;
use blocknet_merkle::calc_merkle_root;

/// Merkle root over the transaction ids of a block body. An empty body has
/// no root (the zero hash).
pub fn calc_hash_merkle_root<'a>(txs: impl ExactSizeIterator<Item = &'a Transaction>) -> Hash {
    calc_merkle_root(txs.map(hashing::tx::id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keys::PrivateKey;
    use crate::tx::{Transaction, TransactionOutput};
    use blocknet_hashes::ZERO_HASH;

    #[test]
    fn test_merkle_root_over_ids() {
        let key = PrivateKey::from_seed([4u8; 32]);
        let tx1 = Transaction::new(Vec::new(), vec![TransactionOutput::new(1, key.public_key().address())]);
        let tx2 = Transaction::new(Vec::new(), vec![TransactionOutput::new(2, key.public_key().address())]);

        assert_eq!(calc_hash_merkle_root(std::iter::empty()), ZERO_HASH);
        assert_eq!(calc_hash_merkle_root([&tx1].into_iter()), tx1.id());
        assert_ne!(calc_hash_merkle_root([&tx1, &tx2].into_iter()), calc_hash_merkle_root([&tx2, &tx1].into_iter()));
    }
}
