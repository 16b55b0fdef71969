use crate::error::ProtocolError;
use crate::pb;
use crate::pb::peer_service_client::PeerServiceClient;
use crate::peer::{Message, Version};
use blocknet_consensus_core::block::Block;
use blocknet_consensus_core::tx::Transaction;
use itertools::Itertools;
use tonic::transport::{Channel, Endpoint};

/// Typed client over a peer connection. Clones are cheap: tonic channels
/// multiplex over one underlying connection.
#[derive(Clone)]
pub struct PeerClient {
    inner: PeerServiceClient<Channel>,
}

impl PeerClient {
    /// Dials a `host:port` peer endpoint. A bare `:port` address targets the
    /// local host.
    pub async fn connect(address: &str) -> Result<Self, ProtocolError> {
        let target = if address.starts_with(':') { format!("127.0.0.1{address}") } else { address.to_string() };
        let endpoint = Endpoint::from_shared(format!("http://{target}"))
            .map_err(|err| ProtocolError::PeerUnreachable(address.to_string(), err.to_string()))?;
        let channel =
            endpoint.connect().await.map_err(|err| ProtocolError::PeerUnreachable(address.to_string(), err.to_string()))?;
        Ok(Self { inner: PeerServiceClient::new(channel) })
    }

    pub async fn handshake(&self, version: Version) -> Result<Version, ProtocolError> {
        let response = self.inner.clone().handshake(pb::VersionMessage::from(version)).await?;
        Ok(response.into_inner().into())
    }

    pub async fn new_transaction(&self, transaction: &Transaction) -> Result<Transaction, ProtocolError> {
        let response = self.inner.clone().new_transaction(pb::TransactionMessage::from(transaction)).await?;
        Ok(Transaction::try_from(response.into_inner())?)
    }

    pub async fn new_block(&self, block: &Block) -> Result<Block, ProtocolError> {
        let response = self.inner.clone().new_block(pb::BlockMessage::from(block)).await?;
        Ok(Block::try_from(response.into_inner())?)
    }

    pub async fn get_blocks(&self, version: Version) -> Result<Vec<Block>, ProtocolError> {
        let response = self.inner.clone().get_blocks(pb::VersionMessage::from(version)).await?;
        Ok(response.into_inner().blocks.into_iter().map(Block::try_from).try_collect()?)
    }

    /// The sealed per-variant send routine used by broadcast.
    pub async fn send_message(&self, msg: &Message) -> Result<(), ProtocolError> {
        match msg {
            Message::Transaction(tx) => self.new_transaction(tx).await.map(|_| ()),
            Message::Block(block) => self.new_block(block).await.map(|_| ()),
        }
    }

    /// A client over a lazy channel that never dials; hub tests only need
    /// peer identities.
    #[cfg(test)]
    pub(crate) fn test_client() -> Self {
        let channel = Endpoint::from_static("http://127.0.0.1:1").connect_lazy();
        Self { inner: PeerServiceClient::new(channel) }
    }
}
