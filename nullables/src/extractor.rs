//! Nullable extractor: replays scripted detections.

use async_trait::async_trait;
use faceid_capture::{CaptureError, Frame, SignatureExtractor};
use faceid_types::Embedding;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

/// A deterministic extractor for testing.
///
/// Each `extract` call pops the next scripted response. Once the script is
/// exhausted every frame reports no face.
pub struct NullExtractor {
    dimension: usize,
    script: Mutex<VecDeque<Result<Vec<Embedding>, CaptureError>>>,
    calls: AtomicUsize,
}

impl NullExtractor {
    pub fn new(dimension: usize) -> Self {
        Self {
            dimension,
            script: Mutex::new(VecDeque::new()),
            calls: AtomicUsize::new(0),
        }
    }

    /// Queue a frame containing exactly one face.
    pub fn push_face(&self, embedding: Embedding) {
        self.push_faces(vec![embedding]);
    }

    /// Queue a frame containing several faces, in detection order.
    pub fn push_faces(&self, embeddings: Vec<Embedding>) {
        self.script.lock().unwrap().push_back(Ok(embeddings));
    }

    /// Queue a frame with no face in it.
    pub fn push_no_face(&self) {
        self.push_faces(Vec::new());
    }

    /// Queue a model failure.
    pub fn push_error(&self, error: CaptureError) {
        self.script.lock().unwrap().push_back(Err(error));
    }

    /// Number of `extract` calls so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SignatureExtractor for NullExtractor {
    fn dimension(&self) -> usize {
        self.dimension
    }

    async fn extract(&self, _frame: &Frame) -> Result<Vec<Embedding>, CaptureError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.script
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(Vec::new()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame() -> Frame {
        Frame {
            width: 1,
            height: 1,
            data: vec![0],
        }
    }

    #[tokio::test]
    async fn test_script_replays_in_order() {
        let extractor = NullExtractor::new(2);
        extractor.push_face(Embedding::new(vec![0.1, 0.2]));
        extractor.push_error(CaptureError::Extractor("model not loaded".into()));

        let faces = extractor.extract(&frame()).await.unwrap();
        assert_eq!(faces, vec![Embedding::new(vec![0.1, 0.2])]);
        assert!(extractor.extract(&frame()).await.is_err());
        assert!(extractor.extract(&frame()).await.unwrap().is_empty());
        assert_eq!(extractor.calls(), 3);
        assert_eq!(extractor.dimension(), 2);
    }
}
