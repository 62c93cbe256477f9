//! Background capture thread implementation.

use nokhwa::pixel_format::RgbFormat;
use nokhwa::utils::{
    CameraFormat, CameraIndex, FrameFormat as NokhwaFrameFormat, RequestedFormat,
    RequestedFormatType,
};
use nokhwa::Camera;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{Receiver, Sender};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

use super::frame_utils::{convert_to_rgb, mirror_horizontal};
use super::types::{CameraError, CameraSettings, Frame, Resolution};

/// Consecutive read failures after which the device is considered gone.
const MAX_CONSECUTIVE_FAILURES: u32 = 100;

/// Pause after a failed read, so a dead device doesn't spin the thread.
const READ_RETRY_DELAY: Duration = Duration::from_millis(5);

/// Run of failed reads since the last good frame.
#[derive(Debug, Default)]
struct FailureStreak(u32);

impl FailureStreak {
    fn reset(&mut self) {
        self.0 = 0;
    }

    /// Count one failure; true once the device should be given up on.
    fn record(&mut self) -> bool {
        self.0 += 1;
        self.0 >= MAX_CONSECUTIVE_FAILURES
    }
}

/// Commands sent to the capture thread.
pub enum CaptureCommand {
    Stop,
}

/// Run the capture loop on the current (background) thread.
///
/// Reports the negotiated resolution and frame rate (or the open error) on
/// `info_tx` exactly once, then overwrites `buffer` with each new frame
/// until `stop` is set or a `Stop` command arrives.
pub fn run_capture_loop(
    settings: CameraSettings,
    buffer: Arc<Mutex<Option<Frame>>>,
    stop: Arc<AtomicBool>,
    rx: Receiver<CaptureCommand>,
    info_tx: Sender<Result<(Resolution, u32), CameraError>>,
) {
    let index = CameraIndex::Index(settings.device_index);

    let mut camera = match open_camera_with_fallback(&index, &settings) {
        Ok(cam) => cam,
        Err(e) => {
            let _ = info_tx.send(Err(e));
            return;
        }
    };

    if let Err(e) = camera.open_stream() {
        let _ = info_tx.send(Err(CameraError::StreamFailed(e.to_string())));
        return;
    }

    let res = camera.resolution();
    let actual_res = Resolution {
        width: res.width(),
        height: res.height(),
    };
    let actual_fps = camera.frame_rate();
    let _ = info_tx.send(Ok((actual_res, actual_fps)));

    let mut dropped: u64 = 0;
    let mut failures = FailureStreak::default();

    while !stop.load(Ordering::Relaxed) {
        if let Ok(CaptureCommand::Stop) = rx.try_recv() {
            break;
        }

        match camera.frame() {
            Ok(raw_frame) => match convert_to_rgb(&raw_frame) {
                Some(mut frame) => {
                    failures.reset();
                    if settings.mirror {
                        mirror_horizontal(&mut frame);
                    }
                    if let Ok(mut buf) = buffer.lock() {
                        *buf = Some(frame);
                    }
                }
                None => {
                    dropped += 1;
                    log::debug!("Skipping undecodable frame ({} so far)", dropped);
                }
            },
            Err(e) => {
                dropped += 1;
                log::debug!("Frame read failed: {}", e);
                if failures.record() {
                    log::error!("Camera stopped delivering frames: {}", e);
                    break;
                }
                thread::sleep(READ_RETRY_DELAY);
            }
        }
    }

    if dropped > 0 {
        log::warn!("Capture stopped after dropping {} frame(s)", dropped);
    }
    let _ = camera.stop_stream();
}

/// Try to open a camera with multiple format fallback strategies.
///
/// Order: closest NV12 match, closest MJPEG match, then whatever the
/// device offers at its highest resolution.
fn open_camera_with_fallback(
    index: &CameraIndex,
    settings: &CameraSettings,
) -> Result<Camera, CameraError> {
    let requested_res =
        nokhwa::utils::Resolution::new(settings.resolution.width, settings.resolution.height);
    let format_attempts = [
        RequestedFormat::new::<RgbFormat>(RequestedFormatType::Closest(CameraFormat::new(
            requested_res,
            NokhwaFrameFormat::NV12,
            settings.fps,
        ))),
        RequestedFormat::new::<RgbFormat>(RequestedFormatType::Closest(CameraFormat::new(
            requested_res,
            NokhwaFrameFormat::MJPEG,
            settings.fps,
        ))),
        RequestedFormat::new::<RgbFormat>(RequestedFormatType::AbsoluteHighestResolution),
    ];

    let mut last_error = None;

    for requested in format_attempts {
        match Camera::new(index.clone(), requested) {
            Ok(cam) => return Ok(cam),
            Err(e) => {
                log::debug!("Camera format attempt failed: {}", e);
                last_error = Some(e.to_string());
            }
        }
    }

    let msg = last_error.unwrap_or_else(|| "no format attempts".to_string());
    Err(classify_open_error(&msg))
}

/// Map a backend error message to a camera error.
fn classify_open_error(msg: &str) -> CameraError {
    let lower = msg.to_lowercase();
    if lower.contains("permission")
        || lower.contains("denied")
        || lower.contains("authorization")
        || lower.contains("access")
    {
        CameraError::PermissionDenied
    } else {
        CameraError::OpenFailed(msg.to_string())
    }
}
