//! Capture session and the enrollment / verification flows.

use std::sync::Arc;

use tracing::{debug, info, warn};

use faceid_capture::{Camera, CameraStream, CaptureError, Frame, SignatureExtractor};
use faceid_store::{IdentityLedger, LedgerReceipt};
use faceid_types::{AccountId, Embedding};
use faceid_verification::{decode, encode, MatchOutcome, VerificationEngine, VerificationError};

use crate::{ClientConfig, ClientError};

/// Scoped camera acquisition: the stream is stopped when the guard is dropped,
/// whether the capture succeeded, failed, timed out or was cancelled.
struct StreamGuard {
    stream: Box<dyn CameraStream>,
}

impl StreamGuard {
    async fn next_frame(&mut self) -> Result<Frame, CaptureError> {
        self.stream.next_frame().await
    }
}

impl Drop for StreamGuard {
    fn drop(&mut self) {
        self.stream.stop();
    }
}

/// Everything one holder's device needs to enroll and verify.
pub struct FaceSession {
    account: AccountId,
    camera: Arc<dyn Camera>,
    extractor: Arc<dyn SignatureExtractor>,
    ledger: Arc<dyn IdentityLedger>,
    engine: VerificationEngine,
    config: ClientConfig,
}

impl FaceSession {
    /// Build a session for `account`.
    ///
    /// Fails if the configuration is invalid or the extractor produces
    /// embeddings of a different dimension than the configured one.
    pub fn new(
        account: AccountId,
        camera: Arc<dyn Camera>,
        extractor: Arc<dyn SignatureExtractor>,
        ledger: Arc<dyn IdentityLedger>,
        config: ClientConfig,
    ) -> Result<Self, ClientError> {
        config.validate()?;
        if extractor.dimension() != config.embedding_dim {
            return Err(ClientError::Config(format!(
                "extractor produces {}-dimensional embeddings, configured for {}",
                extractor.dimension(),
                config.embedding_dim
            )));
        }
        Ok(Self {
            account,
            camera,
            extractor,
            ledger,
            engine: VerificationEngine::new(config.match_threshold),
            config,
        })
    }

    pub fn account(&self) -> &AccountId {
        &self.account
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Capture one face embedding from the camera.
    ///
    /// Opens the camera, grabs up to `max_capture_attempts` frames until one
    /// contains a face, and releases the camera before returning. The first
    /// detection wins when a frame holds several faces.
    pub async fn capture(&self) -> Result<Embedding, ClientError> {
        let timeout = self.config.capture_timeout();
        match tokio::time::timeout(timeout, self.capture_inner()).await {
            Ok(result) => result,
            Err(_) => {
                warn!(account = %self.account, ?timeout, "capture timed out");
                Err(ClientError::CaptureTimeout(timeout))
            }
        }
    }

    async fn capture_inner(&self) -> Result<Embedding, ClientError> {
        let stream = self.camera.open(&self.config.camera).await?;
        let mut guard = StreamGuard { stream };

        for attempt in 1..=self.config.max_capture_attempts {
            let frame = guard.next_frame().await?;
            let faces = self.extractor.extract(&frame).await?;
            if faces.len() > 1 {
                debug!(faces = faces.len(), "multiple faces detected, using the first");
            }
            if let Some(first) = faces.into_iter().next() {
                return Ok(first);
            }
            debug!(attempt, "no face in frame");
        }
        Err(ClientError::NoFaceDetected)
    }

    /// Whether this session's account already has a committed signature.
    pub async fn is_enrolled(&self) -> Result<bool, ClientError> {
        Ok(self.ledger.get_record(&self.account).await?.is_enrolled())
    }

    /// Capture a face and commit its signature to the ledger.
    pub async fn enroll(&self) -> Result<LedgerReceipt, ClientError> {
        let embedding = self.capture().await?;
        self.enroll_embedding(&embedding).await
    }

    /// Commit an already captured embedding.
    pub async fn enroll_embedding(&self, embedding: &Embedding) -> Result<LedgerReceipt, ClientError> {
        if embedding.dim() != self.config.embedding_dim {
            return Err(VerificationError::DimensionMismatch {
                left: embedding.dim(),
                right: self.config.embedding_dim,
            }
            .into());
        }
        let signature = encode(embedding);
        let receipt = self.ledger.enroll(&self.account, &signature).await?;
        info!(account = %self.account, sequence = receipt.sequence, "face enrolled");
        Ok(receipt)
    }

    /// Capture a face and compare it against the committed signature.
    ///
    /// The outcome is informational: it never changes the ledger's
    /// verification flag.
    pub async fn verify(&self) -> Result<MatchOutcome, ClientError> {
        let embedding = self.capture().await?;
        self.verify_embedding(&embedding).await
    }

    /// Compare an already captured embedding against the committed signature.
    pub async fn verify_embedding(&self, current: &Embedding) -> Result<MatchOutcome, ClientError> {
        let record = self.ledger.get_record(&self.account).await?;
        let signature = record
            .signature
            .filter(|s| !s.is_empty())
            .ok_or(ClientError::NotEnrolled(self.account))?;
        let stored = decode(&signature)?;
        let outcome = self.engine.evaluate(current, &stored)?;
        debug!(
            account = %self.account,
            distance = outcome.distance,
            threshold = outcome.threshold,
            "compared capture against committed signature"
        );
        info!(account = %self.account, matched = outcome.is_match, "verification finished");
        Ok(outcome)
    }
}
