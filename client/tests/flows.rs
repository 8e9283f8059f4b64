//! End-to-end enrollment and verification flows against nullable collaborators.

use std::sync::Arc;
use std::time::Duration;

use faceid_capture::{CaptureError, Facing};
use faceid_client::{ClientConfig, ClientError, FaceSession};
use faceid_nullables::{NullCamera, NullExtractor, NullLedger};
use faceid_store::{IdentityLedger, LedgerError};
use faceid_types::{AccountId, Embedding, FaceSignature, IdentityRecord, EMBEDDING_DIM};
use faceid_verification::{decode, VerificationError};

const ADMIN: [u8; 20] = [0xad; 20];

struct Harness {
    camera: Arc<NullCamera>,
    extractor: Arc<NullExtractor>,
    ledger: Arc<NullLedger>,
}

impl Harness {
    fn new() -> Self {
        Self::with_camera(NullCamera::new())
    }

    fn with_camera(camera: NullCamera) -> Self {
        Self {
            camera: Arc::new(camera),
            extractor: Arc::new(NullExtractor::new(EMBEDDING_DIM)),
            ledger: Arc::new(NullLedger::new(AccountId::new(ADMIN))),
        }
    }

    fn session(&self, account: AccountId) -> FaceSession {
        self.session_with(account, ClientConfig::default())
    }

    fn session_with(&self, account: AccountId, config: ClientConfig) -> FaceSession {
        FaceSession::new(
            account,
            self.camera.clone(),
            self.extractor.clone(),
            self.ledger.clone(),
            config,
        )
        .expect("valid session")
    }
}

fn account(tag: u8) -> AccountId {
    AccountId::new([tag; 20])
}

fn sample_embedding() -> Embedding {
    Embedding::new(
        (0..EMBEDDING_DIM)
            .map(|i| 0.1 * ((i % 5) as f32 + 1.0))
            .collect(),
    )
}

#[tokio::test]
async fn enrolled_signature_decodes_to_captured_embedding() {
    let h = Harness::new();
    let a1 = account(0xa1);
    let embedding = sample_embedding();
    h.extractor.push_face(embedding.clone());

    let session = h.session(a1);
    assert!(!session.is_enrolled().await.unwrap());
    session.enroll().await.unwrap();
    assert!(session.is_enrolled().await.unwrap());

    let record = h.ledger.get_record(&a1).await.unwrap();
    let signature = record.signature.expect("signature committed");
    assert_eq!(signature.len(), EMBEDDING_DIM * 4);
    let decoded = decode(&signature).unwrap();
    assert!(decoded.bit_eq(&embedding));
    assert!(!record.verified);
}

#[tokio::test]
async fn same_face_matches() {
    let h = Harness::new();
    let embedding = sample_embedding();
    h.extractor.push_face(embedding.clone());
    h.extractor.push_face(embedding);

    let session = h.session(account(0xa2));
    session.enroll().await.unwrap();
    let outcome = session.verify().await.unwrap();
    assert_eq!(outcome.distance, 0.0);
    assert!(outcome.is_match);
}

#[tokio::test]
async fn face_at_distance_point_six_does_not_match() {
    let h = Harness::new();
    let enrolled = sample_embedding();
    let mut shifted = enrolled.clone().into_inner();
    shifted[0] += 0.6;
    h.extractor.push_face(enrolled);
    h.extractor.push_face(Embedding::new(shifted));

    let session = h.session(account(0xa3));
    session.enroll().await.unwrap();
    let outcome = session.verify().await.unwrap();
    assert!((outcome.distance - 0.6).abs() < 1e-6);
    assert_eq!(outcome.threshold, 0.5);
    assert!(!outcome.is_match);
}

#[tokio::test]
async fn verifying_unenrolled_account_fails() {
    let h = Harness::new();
    let a4 = account(0xa4);
    h.extractor.push_face(sample_embedding());

    let err = h.session(a4).verify().await.unwrap_err();
    assert!(matches!(err, ClientError::NotEnrolled(a) if a == a4));
}

#[tokio::test]
async fn second_enrollment_is_rejected_and_signature_kept() {
    let h = Harness::new();
    let acct = account(0x05);
    let first = sample_embedding();
    let second = Embedding::new(vec![0.9; EMBEDDING_DIM]);
    h.extractor.push_face(first.clone());
    h.extractor.push_face(second);

    let session = h.session(acct);
    session.enroll().await.unwrap();
    let err = session.enroll().await.unwrap_err();
    assert!(matches!(
        err,
        ClientError::Ledger(LedgerError::AlreadyEnrolled(a)) if a == acct
    ));

    let stored = h.ledger.get_record(&acct).await.unwrap().signature.unwrap();
    assert!(decode(&stored).unwrap().bit_eq(&first));
}

#[tokio::test]
async fn reenrolling_the_same_face_is_rejected() {
    let h = Harness::new();
    let acct = account(0x13);
    let embedding = sample_embedding();
    h.extractor.push_face(embedding.clone());
    h.extractor.push_face(embedding.clone());

    let session = h.session(acct);
    session.enroll().await.unwrap();
    let err = session.enroll().await.unwrap_err();
    assert!(matches!(
        err,
        ClientError::Ledger(LedgerError::AlreadyEnrolled(a)) if a == acct
    ));
    let stored = h.ledger.get_record(&acct).await.unwrap().signature.unwrap();
    assert!(decode(&stored).unwrap().bit_eq(&embedding));
    assert_eq!(h.ledger.sequence(), 1);
}

#[tokio::test]
async fn verification_never_touches_the_flag() {
    let h = Harness::new();
    let acct = account(0x06);
    let embedding = sample_embedding();
    h.extractor.push_face(embedding.clone());
    h.extractor.push_face(embedding);

    let session = h.session(acct);
    session.enroll().await.unwrap();
    let before = h.ledger.sequence();
    assert!(session.verify().await.unwrap().is_match);
    assert!(!h.ledger.get_record(&acct).await.unwrap().verified);
    assert_eq!(h.ledger.sequence(), before);
}

#[tokio::test]
async fn no_face_is_reported_and_retryable() {
    let h = Harness::new();
    h.extractor.push_no_face();

    let err = h.session(account(0x07)).enroll().await.unwrap_err();
    assert!(matches!(err, ClientError::NoFaceDetected));
    assert!(err.is_retryable());
    assert_eq!(h.ledger.record_count(), 0);
}

#[tokio::test]
async fn capture_attempts_scan_further_frames() {
    let h = Harness::new();
    h.extractor.push_no_face();
    h.extractor.push_no_face();
    h.extractor.push_face(sample_embedding());

    let config = ClientConfig {
        max_capture_attempts: 3,
        ..ClientConfig::default()
    };
    let session = h.session_with(account(0x08), config);
    session.enroll().await.unwrap();
    assert_eq!(h.camera.opened(), 1);
    assert_eq!(h.camera.frames_delivered(), 3);
    assert_eq!(h.camera.active_streams(), 0);
}

#[tokio::test]
async fn first_detection_wins() {
    let h = Harness::new();
    let first = sample_embedding();
    let other = Embedding::new(vec![0.7; EMBEDDING_DIM]);
    h.extractor.push_faces(vec![first.clone(), other]);

    let embedding = h.session(account(0x09)).capture().await.unwrap();
    assert!(embedding.bit_eq(&first));
}

#[tokio::test]
async fn camera_released_after_success_and_failure() {
    let h = Harness::new();
    h.extractor.push_face(sample_embedding());
    h.extractor.push_error(CaptureError::Extractor("inference failed".into()));

    let session = h.session(account(0x0a));
    session.capture().await.unwrap();
    assert!(session.capture().await.is_err());
    assert_eq!(h.camera.opened(), 2);
    assert_eq!(h.camera.active_streams(), 0);
}

#[tokio::test]
async fn camera_requested_with_front_facing_vga() {
    let h = Harness::new();
    h.extractor.push_face(sample_embedding());
    h.session(account(0x0b)).capture().await.unwrap();

    let settings = h.camera.last_settings().unwrap();
    assert_eq!((settings.width, settings.height), (640, 480));
    assert_eq!(settings.facing, Facing::User);
}

#[tokio::test]
async fn stalled_camera_times_out_and_is_released() {
    let h = Harness::with_camera(NullCamera::stalled());
    let config = ClientConfig {
        capture_timeout_ms: 50,
        ..ClientConfig::default()
    };
    let session = h.session_with(account(0x0c), config);

    let err = session.enroll().await.unwrap_err();
    assert!(matches!(err, ClientError::CaptureTimeout(d) if d == Duration::from_millis(50)));
    assert!(err.is_retryable());
    assert_eq!(h.camera.opened(), 1);
    assert_eq!(h.camera.active_streams(), 0);
}

#[tokio::test]
async fn cancelled_capture_releases_camera() {
    let h = Harness::with_camera(NullCamera::stalled());
    let session = h.session(account(0x0d));

    let cancelled = tokio::time::timeout(Duration::from_millis(20), session.verify()).await;
    assert!(cancelled.is_err());
    assert_eq!(h.camera.opened(), 1);
    assert_eq!(h.camera.active_streams(), 0);
}

#[tokio::test]
async fn denied_camera_is_surfaced() {
    let h = Harness::with_camera(NullCamera::denied());
    let err = h.session(account(0x0e)).enroll().await.unwrap_err();
    assert!(matches!(err, ClientError::Capture(CaptureError::Camera(_))));
    assert!(!err.is_retryable());
}

#[tokio::test]
async fn wrong_dimension_capture_is_not_enrolled() {
    let h = Harness::new();
    h.extractor.push_face(Embedding::new(vec![0.1; 64]));

    let err = h.session(account(0x0f)).enroll().await.unwrap_err();
    assert!(matches!(
        err,
        ClientError::Verification(VerificationError::DimensionMismatch { left: 64, right: 128 })
    ));
    assert_eq!(h.ledger.record_count(), 0);
}

#[tokio::test]
async fn stored_signature_of_other_dimension_is_reported() {
    let h = Harness::new();
    let acct = account(0x10);
    h.ledger.insert_record(
        acct,
        IdentityRecord {
            signature: Some(FaceSignature::new(vec![0; 64 * 4])),
            verified: false,
        },
    );
    h.extractor.push_face(sample_embedding());

    let err = h.session(acct).verify().await.unwrap_err();
    assert!(matches!(
        err,
        ClientError::Verification(VerificationError::DimensionMismatch { left: 128, right: 64 })
    ));
}

#[tokio::test]
async fn corrupt_stored_signature_is_reported() {
    let h = Harness::new();
    let acct = account(0x11);
    h.ledger.insert_record(
        acct,
        IdentityRecord {
            signature: Some(FaceSignature::new(vec![1, 2, 3])),
            verified: false,
        },
    );
    h.extractor.push_face(sample_embedding());

    let err = h.session(acct).verify().await.unwrap_err();
    assert!(matches!(
        err,
        ClientError::Verification(VerificationError::MalformedSignature { len: 3, .. })
    ));
}

#[tokio::test]
async fn ledger_outage_is_surfaced() {
    let h = Harness::new();
    h.extractor.push_face(sample_embedding());
    h.ledger.set_available(false);

    let err = h.session(account(0x12)).enroll().await.unwrap_err();
    assert!(matches!(err, ClientError::Ledger(LedgerError::Unavailable(_))));
    assert!(!err.is_retryable());
}

#[test]
fn session_rejects_extractor_of_other_dimension() {
    let camera = Arc::new(NullCamera::new());
    let extractor = Arc::new(NullExtractor::new(64));
    let ledger = Arc::new(NullLedger::new(AccountId::new(ADMIN)));
    let result = FaceSession::new(account(1), camera, extractor, ledger, ClientConfig::default());
    assert!(matches!(result, Err(ClientError::Config(_))));
}

#[test]
fn session_rejects_invalid_parsed_config() {
    let config = ClientConfig::from_toml_str("match_threshold = -1.0").unwrap();
    let result = FaceSession::new(
        account(1),
        Arc::new(NullCamera::new()),
        Arc::new(NullExtractor::new(EMBEDDING_DIM)),
        Arc::new(NullLedger::new(AccountId::new(ADMIN))),
        config,
    );
    assert!(matches!(result, Err(ClientError::Config(_))));
}
