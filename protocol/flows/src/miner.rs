use crate::flow_context::FlowContext;
use blocknet_consensus_core::keys::PrivateKey;
use blocknet_consensus_core::sign::sign_block;
use blocknet_mining::block_template::{build_block_template, solve_block};
use blocknet_p2p_lib::Message;
use log::{debug, info, warn};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use triggered::Listener;

/// The mining loop. Each round builds a candidate out of the mempool, runs
/// the nonce search off the async executor with a bounded duration, then
/// signs, appends locally and broadcasts. A block always enters our own
/// chain before any peer sees it.
pub async fn mining_loop(ctx: Arc<FlowContext>, key: PrivateKey, shutdown: Listener) {
    loop {
        tokio::select! {
            _ = shutdown.clone() => break,
            _ = tokio::time::sleep(ctx.params().mining_interval) => {}
        }
        mine_round(&ctx, &key, shutdown.clone()).await;
    }
    debug!("mining loop exiting");
}

async fn mine_round(ctx: &FlowContext, key: &PrivateKey, shutdown: Listener) {
    let template = match build_block_template(ctx.chain(), ctx.mempool()) {
        Ok(template) => template,
        Err(err) => {
            warn!("failed to build a block template: {}", err);
            return;
        }
    };
    if template.transactions.is_empty() {
        debug!("no transactions in mempool, skipping the mining round");
        return;
    }

    let stop = Arc::new(AtomicBool::new(false));
    let difficulty = ctx.params().pow_difficulty;
    let solver = {
        let stop = stop.clone();
        let mut template = template;
        tokio::task::spawn_blocking(move || solve_block(&mut template, difficulty, &stop).then_some(template))
    };

    let mut block = tokio::select! {
        _ = shutdown.clone() => {
            stop.store(true, Ordering::Relaxed);
            return;
        }
        _ = tokio::time::sleep(ctx.params().max_mining_duration) => {
            debug!("mining round timed out, discarding the candidate");
            stop.store(true, Ordering::Relaxed);
            return;
        }
        result = solver => match result {
            Ok(Some(block)) => block,
            _ => return,
        }
    };

    sign_block(&mut block, key);
    let hash = block.hash();
    let height = block.header.height;
    match ctx.chain().add_block(block.clone()) {
        Ok(()) => {
            info!("mined block {} at height {}", hash, height);
            ctx.adaptor().hub().broadcast(Message::Block(Arc::new(block)));
        }
        Err(err) => warn!("mined block {} was rejected locally: {}", hash, err),
    }
}
