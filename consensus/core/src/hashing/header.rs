use crate::header::Header;
use blocknet_hashes::{BlockHash, Hash, Hasher};

/// Returns the header hash, which is also the block hash. All fields are
/// written in fixed order, nonce included, so the miner's nonce search
/// reshuffles the digest.
pub fn hash(header: &Header) -> Hash {
    let mut hasher = BlockHash::new();
    hasher
        .update(header.height.to_le_bytes())
        .update(header.prev_block_hash)
        .update(header.merkle_root)
        .update(header.timestamp.to_le_bytes())
        .update(header.nonce.to_le_bytes());
    hasher.finalize()
}

#[cfg(test)]
mod tests {
    use super::*;
    use blocknet_hashes::ZERO_HASH;

    #[test]
    fn test_header_hashing() {
        let header = Header::new(1, ZERO_HASH, 1234567890);
        assert_eq!(hash(&header), hash(&header));

        let mut bumped = header.clone();
        bumped.nonce += 1;
        assert_ne!(hash(&header), hash(&bumped));

        let mut reparented = header.clone();
        reparented.prev_block_hash = hash(&header);
        assert_ne!(hash(&header), hash(&reparented));
    }
}
