//! Protocol constants shared by the encoder, the decoder and the matcher.

/// Number of components in an embedding produced by the default extractor.
pub const EMBEDDING_DIM: usize = 128;

/// Width in bytes of one encoded embedding component (32-bit float).
pub const FLOAT_WIDTH: usize = 4;

/// Euclidean distance below which two embeddings are treated as the same face.
pub const DEFAULT_MATCH_THRESHOLD: f64 = 0.5;

/// Byte length of a signature encoding an embedding of `dim` components.
pub const fn signature_len(dim: usize) -> usize {
    dim * FLOAT_WIDTH
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_signature_is_512_bytes() {
        assert_eq!(signature_len(EMBEDDING_DIM), 512);
    }
}
