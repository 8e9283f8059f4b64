//! Nullable camera: records stream lifecycle instead of touching a device.

use async_trait::async_trait;
use faceid_capture::{Camera, CameraSettings, CameraStream, CaptureError, Frame};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Mode {
    /// Every `next_frame` yields a blank frame immediately.
    Ready,
    /// `next_frame` never resolves, like a camera that stopped delivering.
    Stalled,
    /// `open` fails, like a denied camera permission.
    Denied,
}

#[derive(Default)]
struct Counters {
    opened: AtomicUsize,
    active: AtomicUsize,
    stopped: AtomicUsize,
    frames: AtomicUsize,
}

/// A deterministic camera for testing.
///
/// Tracks how many streams were opened and how many are still live, so tests
/// can assert the device is released on every exit path.
pub struct NullCamera {
    mode: Mode,
    counters: Arc<Counters>,
    last_settings: Mutex<Option<CameraSettings>>,
}

impl NullCamera {
    pub fn new() -> Self {
        Self::with_mode(Mode::Ready)
    }

    /// A camera whose streams never deliver a frame.
    pub fn stalled() -> Self {
        Self::with_mode(Mode::Stalled)
    }

    /// A camera that refuses to open.
    pub fn denied() -> Self {
        Self::with_mode(Mode::Denied)
    }

    fn with_mode(mode: Mode) -> Self {
        Self {
            mode,
            counters: Arc::new(Counters::default()),
            last_settings: Mutex::new(None),
        }
    }

    /// Streams opened so far.
    pub fn opened(&self) -> usize {
        self.counters.opened.load(Ordering::SeqCst)
    }

    /// Streams opened and not yet stopped.
    pub fn active_streams(&self) -> usize {
        self.counters.active.load(Ordering::SeqCst)
    }

    /// Total `stop` calls observed.
    pub fn stop_calls(&self) -> usize {
        self.counters.stopped.load(Ordering::SeqCst)
    }

    /// Frames delivered so far.
    pub fn frames_delivered(&self) -> usize {
        self.counters.frames.load(Ordering::SeqCst)
    }

    /// Settings passed to the most recent `open`.
    pub fn last_settings(&self) -> Option<CameraSettings> {
        self.last_settings.lock().unwrap().clone()
    }
}

impl Default for NullCamera {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Camera for NullCamera {
    async fn open(&self, settings: &CameraSettings) -> Result<Box<dyn CameraStream>, CaptureError> {
        *self.last_settings.lock().unwrap() = Some(settings.clone());
        if self.mode == Mode::Denied {
            return Err(CaptureError::Camera("permission denied".to_string()));
        }
        self.counters.opened.fetch_add(1, Ordering::SeqCst);
        self.counters.active.fetch_add(1, Ordering::SeqCst);
        Ok(Box::new(NullStream {
            mode: self.mode,
            width: settings.width,
            height: settings.height,
            counters: Arc::clone(&self.counters),
            live: true,
        }))
    }
}

struct NullStream {
    mode: Mode,
    width: u32,
    height: u32,
    counters: Arc<Counters>,
    live: bool,
}

#[async_trait]
impl CameraStream for NullStream {
    async fn next_frame(&mut self) -> Result<Frame, CaptureError> {
        if !self.live {
            return Err(CaptureError::StreamEnded);
        }
        if self.mode == Mode::Stalled {
            std::future::pending::<()>().await;
        }
        self.counters.frames.fetch_add(1, Ordering::SeqCst);
        Ok(Frame {
            width: self.width,
            height: self.height,
            data: Vec::new(),
        })
    }

    fn stop(&mut self) {
        self.counters.stopped.fetch_add(1, Ordering::SeqCst);
        if self.live {
            self.live = false;
            self.counters.active.fetch_sub(1, Ordering::SeqCst);
        }
    }
}
