use blocknet_hashes::Hash;

/// The proof-of-work predicate: the first `difficulty` bytes of the block
/// hash must be zero. The default difficulty of a single byte filters one in
/// 256 hashes, which is no real difficulty; it exists so the miner has a
/// puzzle to search over. See [`crate::config::Params::pow_difficulty`].
pub fn has_sufficient_work(hash: &Hash, difficulty: usize) -> bool {
    hash.as_bytes()[..difficulty].iter().all(|&byte| byte == 0)
}
