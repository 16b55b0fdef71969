use crate::args::Args;
use crate::daemon::create_core;
use blocknet_core::core::Core;
use blocknet_core::signals::{Shutdown, Signals};
use log::info;
use std::sync::Arc;

/// The built-in demo fleet: one mining node and two followers bootstrapping
/// off it, all in this process. Exercises handshake, gossip, transaction
/// relay, mining and chain sync end to end on localhost.
pub fn run(args: &Args) {
    let configs = [
        node_args(args, "localhost:4000", "localhost:8000", Vec::new(), true),
        node_args(args, "localhost:4001", "localhost:8001", vec!["localhost:4000".to_string()], false),
        node_args(args, "localhost:4002", "localhost:8002", vec!["localhost:4000".to_string()], false),
    ];

    let cores = configs.iter().map(create_core).collect::<Vec<_>>();
    let fleet = Arc::new(Fleet { cores: cores.clone() });
    let signals = Arc::new(Signals::new(fleet));
    signals.init();

    info!("demo fleet starting: miner on :4000, followers on :4001 and :4002");
    let workers = cores.iter().map(|core| core.start()).collect::<Vec<_>>();
    for (core, workers) in cores.iter().zip(workers) {
        core.join(workers);
    }
}

fn node_args(base: &Args, listen: &str, api_listen: &str, bootstrap: Vec<String>, is_miner: bool) -> Args {
    Args {
        listen_addr: listen.to_string(),
        api_listen_addr: api_listen.to_string(),
        bootstrap_nodes: bootstrap,
        is_miner,
        ..base.clone()
    }
}

struct Fleet {
    cores: Vec<Arc<Core>>,
}

impl Shutdown for Fleet {
    fn shutdown(self: &Arc<Self>) {
        for core in self.cores.iter() {
            core.shutdown();
        }
    }
}
