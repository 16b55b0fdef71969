use blocknet_consensus_core::errors::store::{StoreError, StoreResult};
use blocknet_consensus_core::tx::{Transaction, TransactionId};
use itertools::Itertools;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;

/// Read-only access to every transaction contained in an accepted block.
pub trait TransactionStoreReader: Send + Sync {
    fn get(&self, id: TransactionId) -> StoreResult<Arc<Transaction>>;
    fn list(&self) -> Vec<Arc<Transaction>>;
}

pub trait TransactionStore: TransactionStoreReader {
    fn insert(&self, transaction: Arc<Transaction>) -> StoreResult<()>;
}

#[derive(Default)]
pub struct MemoryTransactionStore {
    map: RwLock<HashMap<TransactionId, Arc<Transaction>>>,
}

impl MemoryTransactionStore {
    pub fn new() -> Self {
        Default::default()
    }
}

impl TransactionStoreReader for MemoryTransactionStore {
    fn get(&self, id: TransactionId) -> StoreResult<Arc<Transaction>> {
        self.map.read().get(&id).cloned().ok_or_else(|| StoreError::KeyNotFound(format!("transaction {id}")))
    }

    fn list(&self) -> Vec<Arc<Transaction>> {
        self.map.read().values().cloned().collect_vec()
    }
}

impl TransactionStore for MemoryTransactionStore {
    fn insert(&self, transaction: Arc<Transaction>) -> StoreResult<()> {
        self.map.write().insert(transaction.id(), transaction);
        Ok(())
    }
}
