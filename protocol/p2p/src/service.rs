use crate::error::ProtocolError;
use crate::pb;
use crate::pb::peer_service_server::{PeerService, PeerServiceServer};
use crate::peer::Version;
use async_trait::async_trait;
use blocknet_consensus_core::block::Block;
use blocknet_consensus_core::tx::Transaction;
use itertools::Itertools;
use log::debug;
use std::net::SocketAddr;
use std::sync::Arc;
use tonic::transport::Server;
use tonic::{Request, Response, Status};
use triggered::Listener;

/// The node-side handlers of the four-method peer RPC, in domain types. The
/// flow layer implements this; the grpc glue below converts and dispatches.
#[async_trait]
pub trait PeerApi: Send + Sync + 'static {
    async fn handshake(&self, their_version: Version) -> Result<Version, ProtocolError>;
    async fn new_transaction(&self, transaction: Transaction) -> Result<Transaction, ProtocolError>;
    async fn new_block(&self, block: Block) -> Result<Block, ProtocolError>;
    async fn get_blocks(&self, their_version: Version) -> Result<Vec<Block>, ProtocolError>;
}

struct GrpcPeerService {
    api: Arc<dyn PeerApi>,
}

#[tonic::async_trait]
impl PeerService for GrpcPeerService {
    async fn handshake(&self, request: Request<pb::VersionMessage>) -> Result<Response<pb::VersionMessage>, Status> {
        let their_version: Version = request.into_inner().into();
        let our_version = self.api.handshake(their_version).await.map_err(Status::from)?;
        Ok(Response::new(our_version.into()))
    }

    async fn new_transaction(&self, request: Request<pb::TransactionMessage>) -> Result<Response<pb::TransactionMessage>, Status> {
        let transaction = Transaction::try_from(request.into_inner()).map_err(ProtocolError::from).map_err(Status::from)?;
        let accepted = self.api.new_transaction(transaction).await.map_err(Status::from)?;
        Ok(Response::new((&accepted).into()))
    }

    async fn new_block(&self, request: Request<pb::BlockMessage>) -> Result<Response<pb::BlockMessage>, Status> {
        let block = Block::try_from(request.into_inner()).map_err(ProtocolError::from).map_err(Status::from)?;
        let accepted = self.api.new_block(block).await.map_err(Status::from)?;
        Ok(Response::new((&accepted).into()))
    }

    async fn get_blocks(&self, request: Request<pb::VersionMessage>) -> Result<Response<pb::BlocksMessage>, Status> {
        let their_version: Version = request.into_inner().into();
        let blocks = self.api.get_blocks(their_version).await.map_err(Status::from)?;
        Ok(Response::new(pb::BlocksMessage { blocks: blocks.iter().map_into().collect() }))
    }
}

/// Turns a `:4000` or `localhost:4000` style listen address into a bindable
/// socket address.
pub fn normalize_listen_address(address: &str) -> String {
    if let Some(port) = address.strip_prefix(':') {
        return format!("0.0.0.0:{port}");
    }
    if let Some(port) = address.strip_prefix("localhost:") {
        return format!("127.0.0.1:{port}");
    }
    address.to_string()
}

/// Serves the peer RPC on `listen_address` until the shutdown listener
/// fires, then drains outstanding calls.
pub async fn serve(listen_address: String, api: Arc<dyn PeerApi>, shutdown: Listener) -> Result<(), ProtocolError> {
    let addr: SocketAddr = normalize_listen_address(&listen_address)
        .parse()
        .map_err(|err| ProtocolError::Transport(format!("invalid listen address {listen_address}: {err}")))?;
    debug!("peer RPC listening on {}", addr);
    Server::builder()
        .add_service(PeerServiceServer::new(GrpcPeerService { api }))
        .serve_with_shutdown(addr, shutdown)
        .await
        .map_err(ProtocolError::from)
}
