use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("key {0} not found in store")]
    KeyNotFound(String),
}

pub type StoreResult<T> = std::result::Result<T, StoreError>;
