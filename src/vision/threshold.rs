//! HSV range thresholding into binary masks.

use opencv::core::{self, Mat, Scalar, CV_8UC1, CV_8UC3};
use serde::{Deserialize, Serialize};

use super::hsv::HsvImage;
use super::mat::{to_bytes, to_mat, VisionError};
use crate::camera::Frame;

/// Value of a set pixel in a [`Mask`].
pub const MASK_SET: u8 = 255;

/// Binary image: one byte per pixel, either 0 or [`MASK_SET`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Mask {
    pub data: Vec<u8>,
    pub width: u32,
    pub height: u32,
}

impl Mask {
    /// An all-clear mask.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            data: vec![0; width as usize * height as usize],
            width,
            height,
        }
    }

    /// Build a mask from rows of `'#'` (set) and anything else (clear).
    #[cfg(test)]
    pub(crate) fn from_rows(rows: &[&str]) -> Self {
        let height = rows.len() as u32;
        let width = rows.first().map(|r| r.chars().count()).unwrap_or(0) as u32;
        let mut mask = Self::new(width, height);
        for (y, row) in rows.iter().enumerate() {
            for (x, c) in row.chars().enumerate().take(width as usize) {
                if c == '#' {
                    mask.data[y * width as usize + x] = MASK_SET;
                }
            }
        }
        mask
    }

    /// Whether `(x, y)` is set. Out-of-bounds coordinates are clear.
    pub fn is_set(&self, x: u32, y: u32) -> bool {
        if x >= self.width || y >= self.height {
            return false;
        }
        self.data[y as usize * self.width as usize + x as usize] != 0
    }

    pub fn set(&mut self, x: u32, y: u32, on: bool) {
        if x < self.width && y < self.height {
            self.data[y as usize * self.width as usize + x as usize] =
                if on { MASK_SET } else { 0 };
        }
    }

    /// Number of set pixels.
    pub fn count_set(&self) -> usize {
        self.data.iter().filter(|&&p| p != 0).count()
    }

    /// Render the mask as a black/white RGB frame for display.
    pub fn to_display_frame(&self) -> Frame {
        let data = self.data.iter().flat_map(|&p| [p, p, p]).collect();
        Frame {
            data,
            width: self.width,
            height: self.height,
            format: crate::camera::FrameFormat::Rgb,
            timestamp: std::time::Instant::now(),
        }
    }
}

/// Inclusive min/max bounds for each HSV channel.
///
/// A pixel passes when every channel lies within its bounds. If a minimum
/// exceeds its maximum nothing passes; hue does not wrap around.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HsvRange {
    pub h_min: u8,
    pub h_max: u8,
    pub s_min: u8,
    pub s_max: u8,
    pub v_min: u8,
    pub v_max: u8,
}

impl Default for HsvRange {
    /// The fully open range: every pixel passes.
    fn default() -> Self {
        Self {
            h_min: 0,
            h_max: 255,
            s_min: 0,
            s_max: 255,
            v_min: 0,
            v_max: 255,
        }
    }
}

impl Mask {
    pub(super) fn to_mat(&self) -> Result<Mat, VisionError> {
        to_mat(&self.data, self.width, self.height, 1, CV_8UC1)
    }

    pub(super) fn from_mat(mat: &Mat, width: u32, height: u32) -> Result<Self, VisionError> {
        Ok(Self {
            data: to_bytes(mat)?,
            width,
            height,
        })
    }
}

/// Threshold an HSV matrix against `range` into a single-channel mask.
pub(super) fn threshold_mat(hsv: &Mat, range: &HsvRange) -> Result<Mat, VisionError> {
    let lower = Scalar::new(range.h_min as f64, range.s_min as f64, range.v_min as f64, 0.0);
    let upper = Scalar::new(range.h_max as f64, range.s_max as f64, range.v_max as f64, 0.0);
    let mut mask = Mat::default();
    core::in_range(hsv, &lower, &upper, &mut mask)?;
    Ok(mask)
}

/// Threshold an HSV image against `range`.
pub fn in_range(hsv: &HsvImage, range: &HsvRange) -> Result<Mask, VisionError> {
    if hsv.data.is_empty() {
        return Ok(Mask::new(hsv.width, hsv.height));
    }
    let mat = to_mat(&hsv.data, hsv.width, hsv.height, 3, CV_8UC3)?;
    let mask = threshold_mat(&mat, range)?;
    Mask::from_mat(&mask, hsv.width, hsv.height)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vision::hsv::to_hsv;

    fn hsv_of(pixels: &[[u8; 3]]) -> HsvImage {
        let data = pixels.iter().flatten().copied().collect();
        to_hsv(&Frame::from_rgb(data, pixels.len() as u32, 1).unwrap()).unwrap()
    }

    #[test]
    fn test_default_range_passes_everything() {
        let hsv = hsv_of(&[[0, 0, 0], [255, 255, 255], [255, 0, 0], [12, 200, 99]]);
        let mask = in_range(&hsv, &HsvRange::default()).unwrap();
        assert_eq!(mask.count_set(), 4);
    }

    #[test]
    fn test_inverted_bounds_pass_nothing() {
        let hsv = hsv_of(&[[0, 0, 0], [255, 255, 255], [255, 0, 0]]);
        let range = HsvRange {
            h_min: 100,
            h_max: 50,
            ..HsvRange::default()
        };
        assert_eq!(in_range(&hsv, &range).unwrap().count_set(), 0);
    }

    #[test]
    fn test_green_range_selects_green_only() {
        let hsv = hsv_of(&[[255, 0, 0], [0, 255, 0], [0, 0, 255], [0, 200, 10]]);
        let range = HsvRange {
            h_min: 50,
            h_max: 70,
            s_min: 100,
            v_min: 100,
            ..HsvRange::default()
        };
        let mask = in_range(&hsv, &range).unwrap();
        assert_eq!(mask.data, vec![0, MASK_SET, 0, MASK_SET]);
    }

    #[test]
    fn test_bounds_are_inclusive() {
        let range = HsvRange {
            h_min: 60,
            h_max: 60,
            s_min: 255,
            s_max: 255,
            v_min: 255,
            v_max: 255,
        };
        let hsv = HsvImage {
            data: vec![60, 255, 255, 61, 255, 255, 60, 254, 255, 59, 255, 255],
            width: 4,
            height: 1,
        };
        let mask = in_range(&hsv, &range).unwrap();
        assert_eq!(mask.data, vec![MASK_SET, 0, 0, 0]);
    }

    #[test]
    fn test_mask_from_rows_and_lookup() {
        let mask = Mask::from_rows(&["#..", ".#.", "..#"]);
        assert_eq!((mask.width, mask.height), (3, 3));
        assert!(mask.is_set(0, 0));
        assert!(mask.is_set(2, 2));
        assert!(!mask.is_set(1, 0));
        assert!(!mask.is_set(5, 5));
        assert_eq!(mask.count_set(), 3);
    }

    #[test]
    fn test_mask_display_frame_is_grayscale() {
        let mask = Mask::from_rows(&["#."]);
        let frame = mask.to_display_frame();
        assert_eq!(frame.data, vec![255, 255, 255, 0, 0, 0]);
    }
}
