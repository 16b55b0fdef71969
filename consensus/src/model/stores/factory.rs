use crate::model::stores::blocks::{BlockStore, MemoryBlockStore};
use crate::model::stores::transactions::{MemoryTransactionStore, TransactionStore};
use crate::model::stores::utxo_set::{MemoryUtxoSetStore, UtxoSetStore};
use std::sync::Arc;

/// Builds the three stores the chain composes. The factory is injected at
/// chain construction so an alternative backend only has to satisfy the
/// store contract.
pub trait StoreFactory: Send + Sync {
    fn transaction_store(&self) -> Arc<dyn TransactionStore>;
    fn block_store(&self) -> Arc<dyn BlockStore>;
    fn utxo_set_store(&self) -> Arc<dyn UtxoSetStore>;
}

#[derive(Default)]
pub struct MemoryStoreFactory;

impl MemoryStoreFactory {
    pub fn new() -> Self {
        Default::default()
    }
}

impl StoreFactory for MemoryStoreFactory {
    fn transaction_store(&self) -> Arc<dyn TransactionStore> {
        Arc::new(MemoryTransactionStore::new())
    }

    fn block_store(&self) -> Arc<dyn BlockStore> {
        Arc::new(MemoryBlockStore::new())
    }

    fn utxo_set_store(&self) -> Arc<dyn UtxoSetStore> {
        Arc::new(MemoryUtxoSetStore::new())
    }
}
