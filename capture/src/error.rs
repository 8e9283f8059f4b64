use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CaptureError {
    #[error("camera error: {0}")]
    Camera(String),

    #[error("camera stream ended")]
    StreamEnded,

    #[error("extractor error: {0}")]
    Extractor(String),
}
