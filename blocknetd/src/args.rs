use clap::{ArgAction, Parser};

/// Launcher arguments. Every flag also reads the environment variable the
/// deployment tooling sets, flags taking precedence.
#[derive(Parser, Debug, Clone)]
#[command(name = "blocknetd", version, about = "Blocknet node daemon")]
pub struct Args {
    /// Interface:port the peer RPC listens on
    #[arg(long, env = "LISTEN_ADDR", default_value = ":4000")]
    pub listen_addr: String,

    /// Interface:port the HTTP API listens on
    #[arg(long, env = "API_LISTEN_ADDR", default_value = ":8000")]
    pub api_listen_addr: String,

    /// Comma-separated peer addresses to bootstrap from
    #[arg(long, env = "BOOTSTRAP_NODES", value_delimiter = ',')]
    pub bootstrap_nodes: Vec<String>,

    /// Run the mining loop (the node signs blocks with a fresh in-memory key)
    #[arg(long, env = "IS_MINER", action = ArgAction::Set, default_value_t = false)]
    pub is_miner: bool,

    /// Storage backend; only `memory` ships
    #[arg(long, env = "STORE_TYPE", default_value = "memory")]
    pub store_type: String,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(short = 'd', long = "loglevel", env = "LOG_LEVEL", default_value = "info")]
    pub log_level: String,

    /// Run the built-in in-process multi-node demo instead of a single node
    #[arg(long, env = "DEBUG", action = ArgAction::SetTrue)]
    pub debug: bool,
}
