pub mod header;
pub mod tx;

use blocknet_hashes::Hasher;

/// Length prefixes keeping the canonical encodings unambiguous.
pub(crate) trait HasherExtensions {
    fn write_len(&mut self, len: usize) -> &mut Self;
    fn write_var_bytes(&mut self, bytes: &[u8]) -> &mut Self;
}

impl<T: Hasher> HasherExtensions for T {
    #[inline(always)]
    fn write_len(&mut self, len: usize) -> &mut Self {
        self.update((len as u64).to_le_bytes())
    }

    #[inline(always)]
    fn write_var_bytes(&mut self, bytes: &[u8]) -> &mut Self {
        self.write_len(bytes.len()).update(bytes)
    }
}
