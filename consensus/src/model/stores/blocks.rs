use blocknet_consensus_core::block::Block;
use blocknet_consensus_core::errors::store::{StoreError, StoreResult};
use blocknet_hashes::Hash;
use itertools::Itertools;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;

/// Read-only access to accepted blocks, keyed by block hash.
pub trait BlockStoreReader: Send + Sync {
    fn get(&self, hash: Hash) -> StoreResult<Arc<Block>>;
    fn list(&self) -> Vec<Arc<Block>>;
}

pub trait BlockStore: BlockStoreReader {
    fn insert(&self, block: Arc<Block>) -> StoreResult<()>;
}

#[derive(Default)]
pub struct MemoryBlockStore {
    map: RwLock<HashMap<Hash, Arc<Block>>>,
}

impl MemoryBlockStore {
    pub fn new() -> Self {
        Default::default()
    }
}

impl BlockStoreReader for MemoryBlockStore {
    fn get(&self, hash: Hash) -> StoreResult<Arc<Block>> {
        self.map.read().get(&hash).cloned().ok_or_else(|| StoreError::KeyNotFound(format!("block {hash}")))
    }

    fn list(&self) -> Vec<Arc<Block>> {
        self.map.read().values().cloned().collect_vec()
    }
}

impl BlockStore for MemoryBlockStore {
    fn insert(&self, block: Arc<Block>) -> StoreResult<()> {
        self.map.write().insert(block.hash(), block);
        Ok(())
    }
}
