use crate::block::Block;
use crate::config::params::Params;
use crate::header::Header;
use crate::keys::{Address, PrivateKey};
use crate::sign::sign_block;
use crate::tx::{Transaction, TransactionOutput};
use blocknet_hashes::ZERO_HASH;

/// Seed of the well-known genesis key. Every node derives the same key from
/// it, so the whole fleet agrees on one genesis block and initial UTXO set.
/// Anyone holding this seed can spend the genesis outputs, which is the
/// intended faucet for a toy network.
pub const GENESIS_SEED: &str = "41b84a2eff9a47393471748fbbdff9d20c14badab3d2de59fd8b5e98edd34d1c";

/// Genesis carries a fixed timestamp; a wall-clock stamp would give every
/// node a different genesis hash and no two chains would ever link up.
pub const GENESIS_TIMESTAMP: u64 = 0;

pub fn genesis_key() -> PrivateKey {
    PrivateKey::from_hex(GENESIS_SEED).expect("the genesis seed is valid hex")
}

/// The address funded by the genesis coinbase.
pub fn genesis_address() -> Address {
    genesis_key().public_key().address()
}

/// Builds the deterministic genesis block: height 0, zero previous hash, a
/// single coinbase paying the full genesis reward to the genesis address,
/// signed by the genesis key. It is installed through the chain's unchecked
/// append and therefore never runs block validation or proof-of-work.
pub fn genesis_block(params: &Params) -> Block {
    let key = genesis_key();
    let coinbase = Transaction::new(Vec::new(), vec![TransactionOutput::new(params.genesis_reward, key.public_key().address())]);
    let mut block = Block::new(Header::new(0, ZERO_HASH, GENESIS_TIMESTAMP), vec![coinbase]);
    sign_block(&mut block, &key);
    block
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sign::verify_block;

    #[test]
    fn test_genesis_determinism() {
        let params = Params::default();
        let one = genesis_block(&params);
        let two = genesis_block(&params);
        assert_eq!(one.hash(), two.hash());
        assert_eq!(one, two);
    }

    #[test]
    fn test_genesis_serde_roundtrip() {
        let genesis = genesis_block(&Params::default());
        let json = serde_json::to_string(&genesis).unwrap();
        let back: Block = serde_json::from_str(&json).unwrap();
        assert_eq!(back, genesis);
        assert_eq!(back.hash(), genesis.hash());
    }

    #[test]
    fn test_genesis_shape() {
        let params = Params::default();
        let genesis = genesis_block(&params);
        assert_eq!(genesis.header.height, 0);
        assert!(genesis.header.prev_block_hash.is_zero());
        assert_eq!(genesis.transactions.len(), 1);
        assert!(genesis.transactions[0].is_coinbase());
        assert_eq!(genesis.transactions[0].outputs[0].value, params.genesis_reward);
        assert_eq!(genesis.transactions[0].outputs[0].address, genesis_address());
        assert!(verify_block(&genesis));
    }
}
