//! Thin wrapper around the `xxhash-rust` crate providing the XXH32 helpers
//! used by the block frame format.

/// One-shot XXH32 hash.
///
/// # Parity vectors
/// * `xxh32_oneshot(b"", 0)` == `0x02CC5D05`
#[inline]
pub fn xxh32_oneshot(data: &[u8], seed: u32) -> u32 {
    xxhash_rust::xxh32::xxh32(data, seed)
}

/// Single-byte header checksum: `(XXH32(header, 0) >> 8) & 0xFF`.
#[inline]
pub fn header_checksum(header: &[u8]) -> u8 {
    let xxh = xxh32_oneshot(header, 0);
    ((xxh >> 8) & 0xFF) as u8
}
