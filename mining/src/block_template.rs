use crate::mempool::Mempool;
use blocknet_consensus::Chain;
use blocknet_consensus_core::block::Block;
use blocknet_consensus_core::errors::store::StoreResult;
use blocknet_consensus_core::header::Header;
use blocknet_consensus_core::pow::has_sufficient_work;
use blocknet_core::time::unix_now;
use std::sync::atomic::{AtomicBool, Ordering};

/// Builds the next candidate block: a header extending the current tip and
/// the full mempool content as the body.
///
/// The mempool is drained here, before the nonce search even starts; a round
/// that times out or finds the snapshot empty loses it. Gossip re-delivery
/// is the recovery path on this network.
pub fn build_block_template(chain: &Chain, mempool: &Mempool) -> StoreResult<Block> {
    let tip = chain.block_by_height(chain.height())?;
    let header = Header::new(tip.header.height + 1, tip.hash(), unix_now());
    let transactions = mempool.drain().iter().map(|tx| (**tx).clone()).collect();
    Ok(Block::new(header, transactions))
}

/// Sequential nonce search over the candidate header. Returns true once the
/// block hash satisfies the proof-of-work predicate; observes `stop` between
/// attempts and gives up within a single hash attempt of it being raised.
pub fn solve_block(block: &mut Block, difficulty: usize, stop: &AtomicBool) -> bool {
    let mut nonce = 0u64;
    while !stop.load(Ordering::Relaxed) {
        block.header.nonce = nonce;
        if has_sufficient_work(&block.hash(), difficulty) {
            return true;
        }
        nonce += 1;
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use blocknet_consensus::model::stores::factory::MemoryStoreFactory;
    use blocknet_consensus_core::config::Params;
    use blocknet_consensus_core::config::genesis::genesis_key;
    use blocknet_consensus_core::testutils::create_transaction;
    use blocknet_consensus_core::tx::TransactionOutput;
    use std::sync::Arc;

    fn chain_and_mempool() -> (Chain, Mempool) {
        (Chain::new(Arc::new(Params::default()), &MemoryStoreFactory::new()), Mempool::new())
    }

    #[test]
    fn test_template_links_to_tip() {
        let (chain, mempool) = chain_and_mempool();
        let genesis = chain.block_by_height(0).unwrap();
        let tx = create_transaction(
            &genesis.transactions[0],
            0,
            &genesis_key(),
            vec![TransactionOutput::new(1, genesis_key().public_key().address())],
        );
        mempool.add(Arc::new(tx.clone())).unwrap();

        let template = build_block_template(&chain, &mempool).unwrap();
        assert_eq!(template.header.height, 1);
        assert_eq!(template.header.prev_block_hash, genesis.hash());
        assert_eq!(template.transactions, vec![tx]);
        assert!(mempool.is_empty(), "building the template drains the mempool");
    }

    #[test]
    fn test_solve_block_meets_difficulty() {
        let (chain, mempool) = chain_and_mempool();
        let mut template = build_block_template(&chain, &mempool).unwrap();

        let stop = AtomicBool::new(false);
        assert!(solve_block(&mut template, 1, &stop));
        assert!(has_sufficient_work(&template.hash(), 1));
    }

    #[test]
    fn test_solve_block_observes_stop() {
        let (chain, mempool) = chain_and_mempool();
        let mut template = build_block_template(&chain, &mempool).unwrap();

        let stop = AtomicBool::new(true);
        assert!(!solve_block(&mut template, 1, &stop));
    }
}
