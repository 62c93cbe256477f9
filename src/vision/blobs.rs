//! Connected-component detection with image moments.

use opencv::core::{Mat, CV_32S};
use opencv::imgproc;
use opencv::prelude::*;

use super::mat::VisionError;
use super::threshold::Mask;

/// Axis-aligned bounding box in pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoundingBox {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl BoundingBox {
    /// Bottom-right corner, inclusive.
    pub fn bottom_right(&self) -> (u32, u32) {
        (
            self.x + self.width.saturating_sub(1),
            self.y + self.height.saturating_sub(1),
        )
    }
}

/// A connected region of set pixels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Blob {
    /// Pixel count (zeroth moment)
    pub area: u32,
    /// Sum of x coordinates (first moment about the y axis)
    pub m10: u64,
    /// Sum of y coordinates (first moment about the x axis)
    pub m01: u64,
    pub bbox: BoundingBox,
}

impl Blob {
    /// Centre of mass, truncated to whole pixels.
    pub fn centroid(&self) -> (u32, u32) {
        if self.area == 0 {
            return (self.bbox.x, self.bbox.y);
        }
        (
            (self.m10 / self.area as u64) as u32,
            (self.m01 / self.area as u64) as u32,
        )
    }
}

/// Find all 8-connected regions of set pixels.
///
/// Blobs are returned in raster order of their first (top-left-most) pixel.
pub fn find_blobs(mask: &Mask) -> Result<Vec<Blob>, VisionError> {
    if mask.data.is_empty() {
        return Ok(Vec::new());
    }
    blobs_in(&mask.to_mat()?)
}

/// Label a single-channel mask matrix and collect one [`Blob`] per label.
pub(super) fn blobs_in(mask: &Mat) -> Result<Vec<Blob>, VisionError> {
    let mut labels = Mat::default();
    let mut stats = Mat::default();
    let mut centroids = Mat::default();
    // Wu's scan labels components in raster order of their first pixel
    let count = imgproc::connected_components_with_stats_with_algorithm(
        mask,
        &mut labels,
        &mut stats,
        &mut centroids,
        8,
        CV_32S,
        imgproc::CCL_WU,
    )?;

    // Label 0 is the background
    let mut blobs = Vec::with_capacity(count.max(1) as usize - 1);
    for label in 1..count {
        let stat = |column: i32| -> Result<u32, VisionError> {
            Ok(*stats.at_2d::<i32>(label, column)? as u32)
        };
        let area = stat(imgproc::CC_STAT_AREA)?;
        let cx = *centroids.at_2d::<f64>(label, 0)?;
        let cy = *centroids.at_2d::<f64>(label, 1)?;

        blobs.push(Blob {
            area,
            m10: (cx * area as f64).round() as u64,
            m01: (cy * area as f64).round() as u64,
            bbox: BoundingBox {
                x: stat(imgproc::CC_STAT_LEFT)?,
                y: stat(imgproc::CC_STAT_TOP)?,
                width: stat(imgproc::CC_STAT_WIDTH)?,
                height: stat(imgproc::CC_STAT_HEIGHT)?,
            },
        });
    }

    Ok(blobs)
}
