use xxhash_rust::xxh3::xxh3_128;

/// Compute a 128-bit digest of a byte slice (for fingerprint generation)
pub fn digest_bytes(data: &[u8]) -> u128 {
    xxh3_128(data)
}
