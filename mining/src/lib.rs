pub mod block_template;
pub mod errors;
pub mod mempool;

pub use mempool::Mempool;
