use crate::args::Args;
use blocknet_addressmanager::AddressManager;
use blocknet_consensus::Chain;
use blocknet_consensus::model::stores::factory::{MemoryStoreFactory, StoreFactory};
use blocknet_consensus_core::config::Params;
use blocknet_consensus_core::keys::PrivateKey;
use blocknet_core::core::Core;
use blocknet_core::task::runtime::AsyncRuntime;
use blocknet_mining::Mempool;
use blocknet_p2p_flows::{FlowContext, P2pService};
use blocknet_p2p_lib::Adaptor;
use blocknet_rpc_service::ApiService;
use itertools::Itertools;
use log::info;
use std::process::exit;
use std::sync::Arc;

/// Builds a node `Core` from the launcher arguments: the chain over the
/// selected store backend, mempool, peer adaptor and address table wired
/// into a flow context, with the peer RPC and HTTP API registered as async
/// services.
pub fn create_core(args: &Args) -> Arc<Core> {
    let params = Arc::new(Params::default());
    let factory = store_factory(&args.store_type);
    let chain = Arc::new(Chain::new(params.clone(), factory.as_ref()));
    let mempool = Arc::new(Mempool::new());
    let adaptor = Adaptor::new(params.protocol_version.clone(), args.listen_addr.clone());
    let amgr = AddressManager::new(args.listen_addr.clone());
    let ctx = FlowContext::new(params, chain, mempool, adaptor, amgr);

    let miner_key = args.is_miner.then(|| {
        // A fresh in-memory signer per run, deliberately not the genesis key
        let key = PrivateKey::generate();
        info!("node {} mines to address {}", args.listen_addr, key.public_key().address());
        key
    });

    let bootstrap = args.bootstrap_nodes.iter().filter(|address| !address.is_empty()).cloned().collect_vec();

    let core = Arc::new(Core::new());
    let runtime = Arc::new(AsyncRuntime::default());
    runtime.register(Arc::new(P2pService::new(ctx.clone(), bootstrap, miner_key)));
    runtime.register(Arc::new(ApiService::new(ctx, args.api_listen_addr.clone())));
    core.bind(runtime);
    core
}

fn store_factory(store_type: &str) -> Box<dyn StoreFactory> {
    match store_type {
        "memory" => Box::new(MemoryStoreFactory::new()),
        other => {
            eprintln!("unknown store type: {other}");
            exit(1);
        }
    }
}
