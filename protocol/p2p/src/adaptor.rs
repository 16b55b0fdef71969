use crate::client::PeerClient;
use crate::error::ProtocolError;
use crate::peer::{Hub, Peer, PeerKey, Version};
use log::debug;
use std::sync::Arc;

/// The node's identity on the wire plus the hub of live peers. All dialing,
/// registration and eviction go through here so the self-loop and duplicate
/// rules hold everywhere.
pub struct Adaptor {
    protocol_version: String,
    listen_address: String,
    hub: Hub,
}

impl Adaptor {
    pub fn new(protocol_version: String, listen_address: String) -> Arc<Self> {
        Arc::new(Self { protocol_version, listen_address, hub: Hub::new() })
    }

    pub fn hub(&self) -> &Hub {
        &self.hub
    }

    pub fn listen_address(&self) -> &str {
        &self.listen_address
    }

    /// Our version record: protocol version, own listen address and the
    /// current peer addresses (the gossip payload).
    pub fn version(&self) -> Version {
        Version {
            version: self.protocol_version.clone(),
            listen_address: self.listen_address.clone(),
            peers: self.hub.peer_addresses(),
        }
    }

    /// A remote endpoint is connectable unless it is our own listen address
    /// or already a live peer.
    pub fn can_connect_with(&self, address: &str) -> bool {
        address != self.listen_address && !self.hub.has_peer(address)
    }

    /// Dials `address`, runs the handshake and registers the remote as a live
    /// peer. Returns the peer addresses the remote gossiped in its version.
    pub async fn connect_peer(&self, address: &str) -> Result<Vec<String>, ProtocolError> {
        if !self.can_connect_with(address) {
            return Err(ProtocolError::ConnectionRefused(address.to_string()));
        }
        let client = PeerClient::connect(address).await?;
        let their_version = client.handshake(self.version()).await?;
        debug!("connected to {}, version {}", address, their_version.version);
        Ok(self.register_peer(client, their_version))
    }

    /// Inserts a handshaken peer into the hub (unless it is ourselves or a
    /// duplicate) and returns the peer addresses it advertised.
    pub fn register_peer(&self, client: PeerClient, their_version: Version) -> Vec<String> {
        let gossiped = their_version.peers.clone();
        if self.can_connect_with(&their_version.listen_address) {
            self.hub.insert(Arc::new(Peer::new(their_version, client)));
        }
        gossiped
    }

    /// Drops the peer from the hub. The caller decides whether its address
    /// re-enters the known-address table.
    pub fn terminate(&self, key: &PeerKey) -> Option<Arc<Peer>> {
        self.hub.remove(key)
    }
}
