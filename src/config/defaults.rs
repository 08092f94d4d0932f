// Helper defaults kept private to the config module.

/// TLS plaintext records carry at most 2^14 bytes.
pub(crate) fn default_max_record_len() -> usize {
    16_384
}
