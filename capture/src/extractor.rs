//! Face embedding extraction.

use async_trait::async_trait;
use faceid_types::Embedding;

use crate::{CaptureError, Frame};

/// Black-box face recognition model.
///
/// Returns one embedding per detected face, in detection order. An empty
/// vector means no face was found in the frame.
#[async_trait]
pub trait SignatureExtractor: Send + Sync {
    /// Number of components in every embedding this extractor produces.
    fn dimension(&self) -> usize;

    async fn extract(&self, frame: &Frame) -> Result<Vec<Embedding>, CaptureError>;
}
