use crate::client::PeerClient;
use blocknet_consensus_core::block::Block;
use blocknet_consensus_core::tx::Transaction;
use blocknet_core::time::unix_now;
use itertools::Itertools;
use log::warn;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::fmt::Display;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

/// The record exchanged in handshakes: protocol version, the sender's listen
/// address and the listen addresses of its current peers (gossip).
#[derive(Debug, Clone)]
pub struct Version {
    pub version: String,
    pub listen_address: String,
    pub peers: Vec<String>,
}

/// Peers are identified by their advertised listen address. Keying tables by
/// this opaque string (rather than by client object identity) keeps removal
/// and equality trivial.
pub type PeerKey = String;

/// A live peer: its advertised version record, a client over its connection
/// and the time we last completed a handshake with it.
pub struct Peer {
    identity: PeerKey,
    version: Version,
    client: PeerClient,
    last_ping_millis: AtomicU64,
}

impl Peer {
    pub fn new(version: Version, client: PeerClient) -> Self {
        Self { identity: version.listen_address.clone(), version, client, last_ping_millis: AtomicU64::new(unix_now()) }
    }

    pub fn identity(&self) -> &PeerKey {
        &self.identity
    }

    pub fn version(&self) -> &Version {
        &self.version
    }

    pub fn client(&self) -> PeerClient {
        self.client.clone()
    }

    pub fn last_ping(&self) -> u64 {
        self.last_ping_millis.load(Ordering::Relaxed)
    }

    pub fn update_last_ping(&self) {
        self.last_ping_millis.store(unix_now(), Ordering::Relaxed)
    }

    /// A peer is stale once its last completed handshake is older than the
    /// given threshold; stale peers are due for a liveness ping.
    pub fn is_stale(&self, threshold: Duration) -> bool {
        unix_now().saturating_sub(self.last_ping()) > threshold.as_millis() as u64
    }
}

impl Display for Peer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.identity)
    }
}

/// A gossip payload: the only two message kinds relayed to every live peer.
#[derive(Debug, Clone)]
pub enum Message {
    Transaction(Arc<Transaction>),
    Block(Arc<Block>),
}

/// The table of live peers, keyed by peer identity. A remote address is
/// never simultaneously live here and pending in the known-address table.
#[derive(Default, Clone)]
pub struct Hub {
    peers: Arc<RwLock<HashMap<PeerKey, Arc<Peer>>>>,
}

impl Hub {
    pub fn new() -> Self {
        Default::default()
    }

    /// Registers a peer; refuses to displace an existing connection to the
    /// same identity.
    pub fn insert(&self, peer: Arc<Peer>) -> bool {
        let mut peers = self.peers.write();
        if peers.contains_key(peer.identity()) {
            return false;
        }
        peers.insert(peer.identity().clone(), peer);
        true
    }

    pub fn remove(&self, key: &PeerKey) -> Option<Arc<Peer>> {
        self.peers.write().remove(key)
    }

    pub fn has_peer(&self, key: &str) -> bool {
        self.peers.read().contains_key(key)
    }

    pub fn active_peers(&self) -> Vec<Arc<Peer>> {
        self.peers.read().values().cloned().collect_vec()
    }

    pub fn peer_addresses(&self) -> Vec<String> {
        self.peers.read().keys().cloned().collect_vec()
    }

    pub fn peer_count(&self) -> usize {
        self.peers.read().len()
    }

    /// Peers whose last handshake is older than `stale`.
    pub fn select_for_ping(&self, stale: Duration) -> Vec<Arc<Peer>> {
        self.peers.read().values().filter(|peer| peer.is_stale(stale)).cloned().collect_vec()
    }

    /// Relays the message to every live peer, each on a detached task. A
    /// per-peer send failure is logged and never aborts the rest; senders
    /// never wait for delivery.
    pub fn broadcast(&self, msg: Message) {
        for peer in self.active_peers() {
            let msg = msg.clone();
            tokio::spawn(async move {
                if let Err(err) = peer.client().send_message(&msg).await {
                    warn!("broadcast to peer {} failed: {}", peer, err);
                }
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::PeerClient;

    fn test_peer(address: &str) -> Arc<Peer> {
        let version = Version { version: "0.0.1".into(), listen_address: address.into(), peers: Vec::new() };
        Arc::new(Peer::new(version, PeerClient::test_client()))
    }

    #[tokio::test]
    async fn test_insert_remove() {
        let hub = Hub::new();
        assert!(hub.insert(test_peer(":4001")));
        assert!(!hub.insert(test_peer(":4001")), "duplicate identity must be refused");
        assert!(hub.has_peer(":4001"));
        assert_eq!(hub.peer_count(), 1);

        let removed = hub.remove(&":4001".to_string()).unwrap();
        assert_eq!(removed.identity(), ":4001");
        assert!(!hub.has_peer(":4001"));
    }

    #[tokio::test]
    async fn test_select_for_ping() {
        let hub = Hub::new();
        let peer = test_peer(":4002");
        hub.insert(peer.clone());

        // Freshly handshaken peers are not stale
        assert!(hub.select_for_ping(Duration::from_secs(50)).is_empty());

        // With a zero threshold every peer with any age at all is due; force
        // an old last-ping to avoid timing sensitivity
        peer.last_ping_millis.store(unix_now() - 60_000, Ordering::Relaxed);
        let due = hub.select_for_ping(Duration::from_secs(50));
        assert_eq!(due.len(), 1);
        assert_eq!(due[0].identity(), ":4002");
    }
}
