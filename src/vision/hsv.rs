//! RGB to HSV conversion.
//!
//! Uses OpenCV's 8-bit convention: hue is stored as degrees / 2 so it fits
//! a byte (0-179), saturation and value span the full 0-255 range.

use opencv::core::{Mat, CV_8UC3};
use opencv::imgproc;

use super::mat::{to_bytes, to_mat, VisionError};
use crate::camera::{Frame, FrameFormat};

/// Largest hue value produced by the conversion.
pub const HUE_MAX: u8 = 179;

/// An HSV image with the same layout as the frame it came from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HsvImage {
    /// Interleaved H, S, V bytes, row-major
    pub data: Vec<u8>,
    pub width: u32,
    pub height: u32,
}

impl HsvImage {
    /// HSV triple at `(x, y)`, or `None` outside the image.
    pub fn pixel(&self, x: u32, y: u32) -> Option<(u8, u8, u8)> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = (y as usize * self.width as usize + x as usize) * 3;
        let px = self.data.get(idx..idx + 3)?;
        Some((px[0], px[1], px[2]))
    }

    /// Reinterpret the raw H, S, V bytes as an RGB frame for display.
    pub fn to_display_frame(&self) -> Frame {
        Frame {
            data: self.data.clone(),
            width: self.width,
            height: self.height,
            format: FrameFormat::Rgb,
            timestamp: std::time::Instant::now(),
        }
    }
}

/// Convert an RGB frame into an HSV matrix.
pub(super) fn hsv_mat(frame: &Frame) -> Result<Mat, VisionError> {
    let rgb = to_mat(&frame.data, frame.width, frame.height, 3, CV_8UC3)?;
    let mut hsv = Mat::default();
    imgproc::cvt_color_def(&rgb, &mut hsv, imgproc::COLOR_RGB2HSV)?;
    Ok(hsv)
}

pub(super) fn image_from_mat(hsv: &Mat, width: u32, height: u32) -> Result<HsvImage, VisionError> {
    Ok(HsvImage {
        data: to_bytes(hsv)?,
        width,
        height,
    })
}

/// Convert an RGB frame to HSV.
pub fn to_hsv(frame: &Frame) -> Result<HsvImage, VisionError> {
    if frame.data.is_empty() {
        return Ok(HsvImage {
            data: Vec::new(),
            width: frame.width,
            height: frame.height,
        });
    }
    let hsv = hsv_mat(frame)?;
    image_from_mat(&hsv, frame.width, frame.height)
}
