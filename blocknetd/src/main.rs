mod args;
mod daemon;
mod demo;

use args::Args;
use blocknet_core::log::init_logger;
use blocknet_core::panic::configure_panic;
use blocknet_core::signals::Signals;
use clap::Parser;
use log::info;
use std::sync::Arc;

pub fn main() {
    let args = Args::parse();
    init_logger(&args.log_level);
    configure_panic();

    if args.debug {
        demo::run(&args);
        return;
    }

    info!("blocknetd starting, peer RPC on {}, API on {}", args.listen_addr, args.api_listen_addr);
    let core = daemon::create_core(&args);
    let signals = Arc::new(Signals::new(core.clone()));
    signals.init();

    core.run();
    info!("blocknetd exiting");
}
