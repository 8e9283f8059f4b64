//! Face embeddings and their opaque on-ledger encoding.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::FaceIdError;

/// An ordered vector of 32-bit floats describing a point in face-similarity space.
///
/// Produced transiently per capture and never persisted in this form; the ledger
/// only ever holds the [`FaceSignature`] encoding.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Embedding(Vec<f32>);

impl Embedding {
    pub fn new(values: Vec<f32>) -> Self {
        Self(values)
    }

    pub fn as_slice(&self) -> &[f32] {
        &self.0
    }

    pub fn into_inner(self) -> Vec<f32> {
        self.0
    }

    /// Number of components.
    pub fn dim(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Bit-for-bit equality, treating identical NaN payloads as equal.
    pub fn bit_eq(&self, other: &Self) -> bool {
        self.0.len() == other.0.len()
            && self
                .0
                .iter()
                .zip(&other.0)
                .all(|(a, b)| a.to_bits() == b.to_bits())
    }
}

impl From<Vec<f32>> for Embedding {
    fn from(values: Vec<f32>) -> Self {
        Self(values)
    }
}

impl From<&[f32]> for Embedding {
    fn from(values: &[f32]) -> Self {
        Self(values.to_vec())
    }
}

/// Opaque, lossless byte encoding of an [`Embedding`] as stored on the ledger.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FaceSignature(Vec<u8>);

impl FaceSignature {
    pub fn new(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// `0x`-prefixed hex form, as contract tooling displays `bytes` fields.
    pub fn to_hex(&self) -> String {
        format!("0x{}", hex::encode(&self.0))
    }

    /// Parse the `0x`-prefixed (or bare) hex form.
    pub fn from_hex(s: &str) -> Result<Self, FaceIdError> {
        let digits = s.strip_prefix("0x").unwrap_or(s);
        hex::decode(digits)
            .map(Self)
            .map_err(|e| FaceIdError::InvalidSignatureHex(e.to_string()))
    }
}

impl fmt::Debug for FaceSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let head = &self.0[..self.0.len().min(4)];
        write!(f, "FaceSignature({} bytes, {}..)", self.0.len(), hex::encode(head))
    }
}

impl From<Vec<u8>> for FaceSignature {
    fn from(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }
}
