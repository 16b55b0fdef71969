use crate::flow_context::FlowContext;
use log::{debug, info};
use std::sync::Arc;
use triggered::Listener;

/// Periodic one-line status report of the node.
pub async fn info_loop(ctx: Arc<FlowContext>, shutdown: Listener) {
    let mut ticker = tokio::time::interval(ctx.params().info_interval);
    loop {
        tokio::select! {
            _ = shutdown.clone() => break,
            _ = ticker.tick() => {
                info!(
                    "height: {}, peers: {:?}, known addresses: {:?}, mempool: {}, blocks: {}, transactions: {}, utxos: {}",
                    ctx.chain().height(),
                    ctx.adaptor().hub().peer_addresses(),
                    ctx.amgr().lock().addresses(),
                    ctx.mempool().len(),
                    ctx.chain().block_count(),
                    ctx.chain().transaction_count(),
                    ctx.chain().utxo_count(),
                );
            }
        }
    }
    debug!("info loop exiting");
}
