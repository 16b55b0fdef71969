use crate::flow_context::FlowContext;
use crate::{miner, monitor, ping, sync};
use blocknet_connectionmanager::ConnectionManager;
use blocknet_consensus_core::keys::PrivateKey;
use blocknet_core::task::service::{AsyncService, AsyncServiceError, AsyncServiceFuture};
use blocknet_p2p_lib::PeerApi;
use blocknet_p2p_lib::service::serve;
use blocknet_utils::triggers::SingleTrigger;
use log::{info, trace};
use std::sync::Arc;

const P2P_SERVICE: &str = "p2p-service";

/// Ties the peer RPC server and every protocol loop (connect, ping, sync,
/// node info, optionally mining) to the service runtime. Signal-exit stops
/// them all together; the RPC server drains outstanding calls on the way
/// down.
pub struct P2pService {
    ctx: Arc<FlowContext>,
    bootstrap_addresses: Vec<String>,
    miner_key: Option<PrivateKey>,
    shutdown: SingleTrigger,
}

impl P2pService {
    pub fn new(ctx: Arc<FlowContext>, bootstrap_addresses: Vec<String>, miner_key: Option<PrivateKey>) -> Self {
        Self { ctx, bootstrap_addresses, miner_key, shutdown: SingleTrigger::default() }
    }
}

impl AsyncService for P2pService {
    fn ident(self: Arc<Self>) -> &'static str {
        P2P_SERVICE
    }

    fn start(self: Arc<Self>) -> AsyncServiceFuture {
        trace!("{} starting", P2P_SERVICE);
        let shutdown_signal = self.shutdown.listener.clone();

        Box::pin(async move {
            let ctx = self.ctx.clone();

            // Seed the bootstrap list; the connection manager promotes the
            // entries to live peers on its first iteration
            ctx.seed_addresses(&self.bootstrap_addresses);
            let connection_manager = ConnectionManager::new(
                ctx.adaptor().clone(),
                ctx.amgr().clone(),
                ctx.params().max_connect_attempts,
                ctx.params().connect_interval,
            );
            connection_manager.force_next_iteration();

            tokio::spawn(ping::ping_loop(ctx.clone(), shutdown_signal.clone()));
            tokio::spawn(sync::sync_loop(ctx.clone(), shutdown_signal.clone()));
            tokio::spawn(monitor::info_loop(ctx.clone(), shutdown_signal.clone()));
            if let Some(key) = self.miner_key.clone() {
                info!("starting the miner, signer address {}", key.public_key().address());
                tokio::spawn(miner::mining_loop(ctx.clone(), key, shutdown_signal.clone()));
            }

            let api: Arc<dyn PeerApi> = self.ctx.clone();
            let result = serve(ctx.adaptor().listen_address().to_string(), api, shutdown_signal).await;
            connection_manager.stop();
            result.map_err(|err| AsyncServiceError::Service(format!("{P2P_SERVICE} terminated: {err}")))
        })
    }

    fn signal_exit(self: Arc<Self>) {
        trace!("sending an exit signal to {}", P2P_SERVICE);
        self.shutdown.trigger.trigger();
    }

    fn stop(self: Arc<Self>) -> AsyncServiceFuture {
        Box::pin(async move {
            trace!("{} exiting", P2P_SERVICE);
            Ok(())
        })
    }
}
