//! Embedding <-> signature codec.
//!
//! Wire format: the components as consecutive little-endian IEEE-754 `f32`
//! values. No header, no length prefix; the dimension is implied by the byte
//! length.

use faceid_types::{Embedding, FaceSignature, FLOAT_WIDTH};

use crate::VerificationError;

/// Encode an embedding into its on-ledger signature.
pub fn encode(embedding: &Embedding) -> FaceSignature {
    let mut bytes = Vec::with_capacity(embedding.dim() * FLOAT_WIDTH);
    for value in embedding.as_slice() {
        bytes.extend_from_slice(&value.to_le_bytes());
    }
    FaceSignature::new(bytes)
}

/// Decode a signature back into the embedding it was produced from.
pub fn decode(signature: &FaceSignature) -> Result<Embedding, VerificationError> {
    let bytes = signature.as_bytes();
    if bytes.len() % FLOAT_WIDTH != 0 {
        return Err(VerificationError::MalformedSignature {
            len: bytes.len(),
            width: FLOAT_WIDTH,
        });
    }
    let values = bytes
        .chunks_exact(FLOAT_WIDTH)
        .map(|chunk| f32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]))
        .collect();
    Ok(Embedding::new(values))
}
