//! Camera devices and the frames they produce.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::CaptureError;

/// Which physical camera to request.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Facing {
    /// Front camera, pointing at the holder.
    #[default]
    User,
    /// Rear camera.
    Environment,
}

/// Stream constraints requested when opening a camera.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CameraSettings {
    #[serde(default = "default_width")]
    pub width: u32,
    #[serde(default = "default_height")]
    pub height: u32,
    #[serde(default)]
    pub facing: Facing,
}

fn default_width() -> u32 {
    640
}

fn default_height() -> u32 {
    480
}

impl Default for CameraSettings {
    fn default() -> Self {
        Self {
            width: default_width(),
            height: default_height(),
            facing: Facing::User,
        }
    }
}

/// One captured video frame.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Frame {
    pub width: u32,
    pub height: u32,
    /// Raw pixel data in whatever layout the extractor expects.
    pub data: Vec<u8>,
}

/// A camera that can be opened into a live stream.
#[async_trait]
pub trait Camera: Send + Sync {
    async fn open(&self, settings: &CameraSettings) -> Result<Box<dyn CameraStream>, CaptureError>;
}

/// A live camera stream.
///
/// [`stop`](Self::stop) releases the device. It is synchronous so it can run
/// from a `Drop` impl; callers invoke it exactly once, on every exit path.
#[async_trait]
pub trait CameraStream: Send {
    async fn next_frame(&mut self) -> Result<Frame, CaptureError>;

    fn stop(&mut self);
}
