pub mod flow_context;
pub mod miner;
pub mod monitor;
pub mod ping;
pub mod service;
pub mod sync;

pub use flow_context::FlowContext;
pub use service::P2pService;
