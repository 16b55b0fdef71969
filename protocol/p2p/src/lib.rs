pub mod adaptor;
pub mod client;
pub mod convert;
pub mod error;
pub mod peer;
pub mod service;

pub mod pb {
    tonic::include_proto!("protowire");
}

pub use adaptor::Adaptor;
pub use client::PeerClient;
pub use error::ProtocolError;
pub use peer::{Hub, Message, Peer, PeerKey, Version};
pub use service::PeerApi;
