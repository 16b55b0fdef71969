use itertools::Itertools;
use log::debug;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;

/// The known-address table: endpoints we have heard of (bootstrap list or
/// gossip) but are not currently connected to, each with its consecutive
/// dial-failure count.
///
/// Entries leave the table in one of two ways: the connect loop promotes
/// them to live peers, or their failure count exceeds the cap and they are
/// dropped. An evicted live peer re-enters with a zeroed counter.
pub struct AddressManager {
    local_address: String,
    addresses: HashMap<String, u32>,
}

impl AddressManager {
    pub fn new(local_address: String) -> Arc<Mutex<Self>> {
        Arc::new(Mutex::new(Self { local_address, addresses: HashMap::new() }))
    }

    /// Seeds an address with a zeroed attempt counter, overwriting any
    /// previous count. The node's own listen address is never inserted.
    pub fn add_address(&mut self, address: &str) {
        if address == self.local_address {
            debug!("[Address manager] skipping own address {}", address);
            return;
        }
        self.addresses.insert(address.to_string(), 0);
    }

    pub fn contains(&self, address: &str) -> bool {
        self.addresses.contains_key(address)
    }

    /// Snapshot of (address, failure count) pairs for one connect iteration.
    pub fn snapshot(&self) -> Vec<(String, u32)> {
        self.addresses.iter().map(|(address, &attempts)| (address.clone(), attempts)).collect_vec()
    }

    /// Atomically replaces the table with the rebuilt outcome of a connect
    /// iteration.
    pub fn replace(&mut self, addresses: HashMap<String, u32>) {
        self.addresses = addresses;
    }

    pub fn addresses(&self) -> Vec<String> {
        self.addresses.keys().cloned().collect_vec()
    }

    pub fn len(&self) -> usize {
        self.addresses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.addresses.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_own_address_is_never_inserted() {
        let amgr = AddressManager::new(":4000".to_string());
        let mut guard = amgr.lock();
        guard.add_address(":4000");
        assert!(guard.is_empty());

        guard.add_address(":4001");
        assert!(guard.contains(":4001"));
        assert_eq!(guard.len(), 1);
    }

    #[test]
    fn test_add_resets_attempts() {
        let amgr = AddressManager::new(":4000".to_string());
        let mut guard = amgr.lock();
        guard.add_address(":4001");
        guard.replace(HashMap::from([(":4001".to_string(), 7)]));
        assert_eq!(guard.snapshot(), vec![(":4001".to_string(), 7)]);

        // Re-seeding (e.g. after a peer eviction) zeroes the counter
        guard.add_address(":4001");
        assert_eq!(guard.snapshot(), vec![(":4001".to_string(), 0)]);
    }

    #[test]
    fn test_replace_swaps_table() {
        let amgr = AddressManager::new(":4000".to_string());
        let mut guard = amgr.lock();
        guard.add_address(":4001");
        guard.add_address(":4002");

        guard.replace(HashMap::from([(":4002".to_string(), 1)]));
        assert!(!guard.contains(":4001"));
        assert_eq!(guard.snapshot(), vec![(":4002".to_string(), 1)]);
    }
}
