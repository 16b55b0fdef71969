use blocknet_consensus_core::errors::block::RuleError;
use blocknet_consensus_core::errors::store::StoreError;
use blocknet_mining::errors::MempoolError;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConversionError {
    #[error("missing required field {0}")]
    MissingField(&'static str),

    #[error("invalid length for field {0}")]
    InvalidLength(&'static str),
}

#[derive(Error, Debug, Clone)]
pub enum ProtocolError {
    #[error(transparent)]
    Rule(#[from] RuleError),

    #[error(transparent)]
    Mempool(#[from] MempoolError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("malformed wire message: {0}")]
    Conversion(#[from] ConversionError),

    #[error("peer {0} is unreachable: {1}")]
    PeerUnreachable(String, String),

    #[error("refusing connection to {0}")]
    ConnectionRefused(String),

    #[error("transport error: {0}")]
    Transport(String),

    #[error("the operation was aborted by shutdown")]
    Cancelled,
}

impl From<ProtocolError> for tonic::Status {
    fn from(err: ProtocolError) -> Self {
        match &err {
            ProtocolError::Rule(_) | ProtocolError::Mempool(_) | ProtocolError::Conversion(_) => {
                tonic::Status::invalid_argument(err.to_string())
            }
            ProtocolError::Store(StoreError::KeyNotFound(_)) => tonic::Status::not_found(err.to_string()),
            ProtocolError::Cancelled => tonic::Status::cancelled(err.to_string()),
            _ => tonic::Status::internal(err.to_string()),
        }
    }
}

impl From<tonic::Status> for ProtocolError {
    fn from(status: tonic::Status) -> Self {
        ProtocolError::Transport(status.to_string())
    }
}

impl From<tonic::transport::Error> for ProtocolError {
    fn from(err: tonic::transport::Error) -> Self {
        ProtocolError::Transport(err.to_string())
    }
}
