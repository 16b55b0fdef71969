use crate::flow_context::FlowContext;
use blocknet_p2p_lib::Peer;
use log::debug;
use std::sync::Arc;
use triggered::Listener;

/// Pulls the remote's chain and feeds it block by block into ours.
/// Rejections (already known blocks, linkage mismatches) are the normal
/// case on a mostly synced network and are only logged; one bad block never
/// tears the pass down.
pub async fn sync_from_peer(ctx: &FlowContext, peer: &Peer) {
    let blocks = match peer.client().get_blocks(ctx.adaptor().version()).await {
        Ok(blocks) => blocks,
        Err(err) => {
            debug!("get blocks from {} failed: {}", peer, err);
            return;
        }
    };
    for block in blocks {
        let height = block.header.height;
        if let Err(err) = ctx.chain().add_block(block) {
            debug!("sync block at height {} from {} rejected: {}", height, peer, err);
        }
    }
}

/// The sync loop: each tick pulls the missing suffix from every live peer.
pub async fn sync_loop(ctx: Arc<FlowContext>, shutdown: Listener) {
    let mut ticker = tokio::time::interval(ctx.params().sync_interval);
    loop {
        tokio::select! {
            _ = shutdown.clone() => break,
            _ = ticker.tick() => {
                for peer in ctx.adaptor().hub().active_peers() {
                    sync_from_peer(&ctx, &peer).await;
                }
            }
        }
    }
    debug!("sync loop exiting");
}
