//! Capture-side abstractions.
//!
//! The camera and the embedding model are external collaborators. This crate
//! names the seams the client drives them through, so real devices, browser
//! bridges and deterministic test doubles are interchangeable.

pub mod camera;
pub mod error;
pub mod extractor;

pub use camera::{Camera, CameraSettings, CameraStream, Facing, Frame};
pub use error::CaptureError;
pub use extractor::SignatureExtractor;
