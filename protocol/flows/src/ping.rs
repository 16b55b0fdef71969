use crate::flow_context::FlowContext;
use crate::sync::sync_from_peer;
use log::{debug, info};
use std::sync::Arc;
use triggered::Listener;

/// The liveness loop. A handshake doubles as the ping: success refreshes the
/// peer and triggers a chain-sync pass against it, failure evicts the peer
/// and returns its address to the known-address table with a zeroed
/// counter (the connect loop will retry it).
pub async fn ping_loop(ctx: Arc<FlowContext>, shutdown: Listener) {
    let mut ticker = tokio::time::interval(ctx.params().ping_interval);
    loop {
        tokio::select! {
            _ = shutdown.clone() => break,
            _ = ticker.tick() => ping_stale_peers(&ctx).await,
        }
    }
    debug!("ping loop exiting");
}

async fn ping_stale_peers(ctx: &FlowContext) {
    for peer in ctx.adaptor().hub().select_for_ping(ctx.params().ping_stale) {
        match peer.client().handshake(ctx.adaptor().version()).await {
            Ok(their_version) => {
                debug!("pinged {}, version {}", peer, their_version.version);
                peer.update_last_ping();
                sync_from_peer(ctx, &peer).await;
            }
            Err(err) => {
                info!("peer {} is unreachable, evicting: {}", peer, err);
                ctx.adaptor().terminate(peer.identity());
                ctx.amgr().lock().add_address(peer.identity());
            }
        }
    }
}
