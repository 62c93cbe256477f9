//! Camera capture module for webcam access and frame capture.
//!
//! - Device enumeration via [`list_devices`]
//! - Background capture via [`CameraCapture`]
//! - Configuration via [`CameraSettings`] and [`Resolution`]
//! - [`FrameSource`] abstracts "give me the newest frame" for the tracking loops

mod capture;
mod capture_loop;
mod device;
mod frame_utils;
mod types;

pub use capture::CameraCapture;
pub use device::list_devices;
pub use types::{CameraError, CameraInfo, CameraSettings, Frame, FrameFormat, Resolution};

/// Anything that can hand the tracking loop its most recent frame.
pub trait FrameSource {
    /// The newest frame, or `None` if nothing has been captured yet.
    fn latest_frame(&mut self) -> Option<Frame>;

    /// True once no further frames will arrive.
    fn is_exhausted(&self) -> bool {
        false
    }
}

/// A fixed sequence of frames, replayed in order and then exhausted.
///
/// Used to drive the tracking loops without a camera.
#[derive(Debug, Default)]
pub struct FrameSequence {
    frames: std::collections::VecDeque<Frame>,
}

impl FrameSequence {
    pub fn new(frames: impl IntoIterator<Item = Frame>) -> Self {
        Self {
            frames: frames.into_iter().collect(),
        }
    }

    pub fn remaining(&self) -> usize {
        self.frames.len()
    }
}

impl FrameSource for FrameSequence {
    fn latest_frame(&mut self) -> Option<Frame> {
        self.frames.pop_front()
    }

    fn is_exhausted(&self) -> bool {
        self.frames.is_empty()
    }
}
