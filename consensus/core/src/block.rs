use crate::header::Header;
use crate::keys::{PublicKey, Signature};
use crate::tx::Transaction;
use blocknet_hashes::Hash;
use serde::{Deserialize, Serialize};

/// A block: header, ordered transactions and the producer's signature over
/// the block hash. Candidates start unsigned; [`crate::sign::sign_block`]
/// writes the merkle root and attaches the key and signature.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Block {
    pub header: Header,
    pub transactions: Vec<Transaction>,
    pub public_key: Option<PublicKey>,
    pub signature: Option<Signature>,
}

impl Block {
    pub fn new(header: Header, transactions: Vec<Transaction>) -> Self {
        Self { header, transactions, public_key: None, signature: None }
    }

    pub fn hash(&self) -> Hash {
        self.header.hash()
    }
}
