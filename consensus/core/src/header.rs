use crate::hashing;
use blocknet_hashes::{Hash, ZERO_HASH};
use serde::{Deserialize, Serialize};

/// Block header. The block hash IS the header hash, so the merkle root over
/// the block transactions commits the body and the nonce is the miner's
/// search space.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Header {
    pub height: u64,
    pub prev_block_hash: Hash,
    pub merkle_root: Hash,
    /// Milliseconds since UNIX epoch
    pub timestamp: u64,
    pub nonce: u64,
}

impl Header {
    /// A fresh header with no merkle commitment yet (written at signing time)
    /// and a zero nonce.
    pub fn new(height: u64, prev_block_hash: Hash, timestamp: u64) -> Self {
        Self { height, prev_block_hash, merkle_root: ZERO_HASH, timestamp, nonce: 0 }
    }

    pub fn hash(&self) -> Hash {
        hashing::header::hash(self)
    }
}
