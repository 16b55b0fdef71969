use blocknet_consensus_core::errors::store::{StoreError, StoreResult};
use blocknet_consensus_core::keys::Address;
use blocknet_consensus_core::tx::{TransactionOutpoint, UtxoEntry};
use itertools::Itertools;
use parking_lot::RwLock;
use std::collections::HashMap;

/// Read-only access to the UTXO index, keyed by outpoint.
pub trait UtxoSetStoreReader: Send + Sync {
    fn get(&self, outpoint: &TransactionOutpoint) -> StoreResult<UtxoEntry>;
    fn utxos_by_address(&self, address: Address) -> Vec<UtxoEntry>;
    fn list(&self) -> Vec<UtxoEntry>;
}

pub trait UtxoSetStore: UtxoSetStoreReader {
    fn insert(&self, entry: UtxoEntry) -> StoreResult<()>;
    /// Flips the spent flag of an existing entry. Entries are never removed;
    /// a spent entry stays as the record that its outpoint was consumed.
    fn mark_spent(&self, outpoint: &TransactionOutpoint) -> StoreResult<()>;
}

#[derive(Default)]
pub struct MemoryUtxoSetStore {
    map: RwLock<HashMap<TransactionOutpoint, UtxoEntry>>,
}

impl MemoryUtxoSetStore {
    pub fn new() -> Self {
        Default::default()
    }
}

impl UtxoSetStoreReader for MemoryUtxoSetStore {
    fn get(&self, outpoint: &TransactionOutpoint) -> StoreResult<UtxoEntry> {
        self.map.read().get(outpoint).cloned().ok_or_else(|| StoreError::KeyNotFound(format!("utxo {outpoint}")))
    }

    fn utxos_by_address(&self, address: Address) -> Vec<UtxoEntry> {
        self.map.read().values().filter(|entry| entry.output.address == address).cloned().collect_vec()
    }

    fn list(&self) -> Vec<UtxoEntry> {
        self.map.read().values().cloned().collect_vec()
    }
}

impl UtxoSetStore for MemoryUtxoSetStore {
    fn insert(&self, entry: UtxoEntry) -> StoreResult<()> {
        self.map.write().insert(entry.outpoint, entry);
        Ok(())
    }

    fn mark_spent(&self, outpoint: &TransactionOutpoint) -> StoreResult<()> {
        let mut map = self.map.write();
        let entry = map.get_mut(outpoint).ok_or_else(|| StoreError::KeyNotFound(format!("utxo {outpoint}")))?;
        entry.is_spent = true;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use blocknet_consensus_core::testutils::test_key;
    use blocknet_consensus_core::tx::TransactionOutput;
    use blocknet_hashes::ZERO_HASH;

    #[test]
    fn test_mark_spent() {
        let store = MemoryUtxoSetStore::new();
        let address = test_key(1).public_key().address();
        let outpoint = TransactionOutpoint::new(ZERO_HASH, 3);
        store.insert(UtxoEntry::new(outpoint, TransactionOutput::new(7, address))).unwrap();

        assert!(!store.get(&outpoint).unwrap().is_spent);
        store.mark_spent(&outpoint).unwrap();
        assert!(store.get(&outpoint).unwrap().is_spent);

        let missing = TransactionOutpoint::new(ZERO_HASH, 4);
        assert!(store.mark_spent(&missing).is_err());
    }

    #[test]
    fn test_utxos_by_address() {
        let store = MemoryUtxoSetStore::new();
        let mine = test_key(1).public_key().address();
        let theirs = test_key(2).public_key().address();
        store.insert(UtxoEntry::new(TransactionOutpoint::new(ZERO_HASH, 0), TransactionOutput::new(1, mine))).unwrap();
        store.insert(UtxoEntry::new(TransactionOutpoint::new(ZERO_HASH, 1), TransactionOutput::new(2, theirs))).unwrap();

        let entries = store.utxos_by_address(mine);
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].output.value, 1);
    }
}
