use crate::errors::{MempoolError, MempoolResult};
use blocknet_consensus_core::tx::{Transaction, TransactionId};
use itertools::Itertools;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;

/// The set of transactions seen but not yet included in an accepted block.
/// Keyed by transaction id, so gossip re-deliveries collapse into one entry.
/// Purely in-memory and process-local; no eviction policy.
#[derive(Default)]
pub struct Mempool {
    map: RwLock<HashMap<TransactionId, Arc<Transaction>>>,
}

impl Mempool {
    pub fn new() -> Self {
        Default::default()
    }

    /// Admits a transaction. Re-adding an already known transaction leaves
    /// the mempool unchanged and reports the duplicate.
    pub fn add(&self, transaction: Arc<Transaction>) -> MempoolResult<()> {
        let id = transaction.id();
        let mut map = self.map.write();
        if map.contains_key(&id) {
            return Err(MempoolError::TransactionAlreadyKnown(id));
        }
        map.insert(id, transaction);
        Ok(())
    }

    pub fn contains(&self, id: &TransactionId) -> bool {
        self.map.read().contains_key(id)
    }

    pub fn remove(&self, id: &TransactionId) {
        self.map.write().remove(id);
    }

    /// Snapshot of the current content, in no particular order.
    pub fn snapshot(&self) -> Vec<Arc<Transaction>> {
        self.map.read().values().cloned().collect_vec()
    }

    /// Takes the full content out of the mempool in one swap. Used by the
    /// miner when it builds a candidate block; a failed round does not put
    /// the snapshot back.
    pub fn drain(&self) -> Vec<Arc<Transaction>> {
        std::mem::take(&mut *self.map.write()).into_values().collect_vec()
    }

    pub fn len(&self) -> usize {
        self.map.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.read().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use blocknet_consensus_core::testutils::test_key;
    use blocknet_consensus_core::tx::TransactionOutput;

    fn some_tx(value: u64) -> Arc<Transaction> {
        Arc::new(Transaction::new(Vec::new(), vec![TransactionOutput::new(value, test_key(1).public_key().address())]))
    }

    #[test]
    fn test_add_is_deduplicating() {
        let mempool = Mempool::new();
        let tx = some_tx(1);

        mempool.add(tx.clone()).unwrap();
        assert_eq!(mempool.add(tx.clone()), Err(MempoolError::TransactionAlreadyKnown(tx.id())));
        assert_eq!(mempool.len(), 1);
        assert!(mempool.contains(&tx.id()));
        assert_eq!(mempool.snapshot(), vec![tx]);
    }

    #[test]
    fn test_remove() {
        let mempool = Mempool::new();
        let tx = some_tx(2);
        mempool.add(tx.clone()).unwrap();

        mempool.remove(&tx.id());
        assert!(!mempool.contains(&tx.id()));
        assert!(mempool.is_empty());

        // Removing an absent transaction is a no-op
        mempool.remove(&tx.id());
    }

    #[test]
    fn test_drain_empties() {
        let mempool = Mempool::new();
        mempool.add(some_tx(3)).unwrap();
        mempool.add(some_tx(4)).unwrap();

        let drained = mempool.drain();
        assert_eq!(drained.len(), 2);
        assert!(mempool.is_empty());
        assert!(mempool.drain().is_empty());
    }
}
