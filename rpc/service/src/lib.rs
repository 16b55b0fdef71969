pub mod messages;
pub mod service;

pub use service::ApiService;
