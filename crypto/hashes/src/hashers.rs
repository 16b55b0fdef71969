use crate::Hash;
use sha2::{Digest, Sha256};

/// Incremental writer used by the canonical encodings.
pub trait Hasher {
    fn update<A: AsRef<[u8]>>(&mut self, data: A) -> &mut Self;
    fn finalize(self) -> Hash;
}

/// SHA-256 hasher behind every ledger hash. The protocol uses the plain
/// digest for all object kinds, so the domain aliases below share one
/// implementation; call sites still name the domain they hash for.
#[derive(Clone, Default)]
pub struct Sha256Hasher(Sha256);

impl Sha256Hasher {
    pub fn new() -> Self {
        Self(Sha256::new())
    }
}

impl Hasher for Sha256Hasher {
    fn update<A: AsRef<[u8]>>(&mut self, data: A) -> &mut Self {
        self.0.update(data.as_ref());
        self
    }

    fn finalize(self) -> Hash {
        Hash::from_bytes(self.0.finalize().into())
    }
}

pub type TransactionHash = Sha256Hasher;
pub type BlockHash = Sha256Hasher;
pub type MerkleBranchHash = Sha256Hasher;
