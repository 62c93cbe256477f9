//! Colour segmentation and object tracking.
//!
//! The pipeline run for every frame, on OpenCV matrices:
//!
//! 1. **HSV conversion** - RGB to 8-bit HSV (hue 0-179)
//! 2. **Thresholding** - keep pixels inside an [`HsvRange`]
//! 3. **Morphology** - erode then dilate to drop speckle noise
//! 4. **Blob detection** - 8-connected components with area and centroid
//! 5. **Selection** - largest blob within the [`TrackingLimits`] area window
//!
//! [`Tracker::process`] runs all five steps and returns a [`FrameAnalysis`].

mod blobs;
mod hsv;
mod mat;
mod morphology;
mod threshold;
mod tracker;

pub use blobs::{find_blobs, Blob, BoundingBox};
pub use hsv::{to_hsv, HsvImage, HUE_MAX};
pub use mat::VisionError;
pub use morphology::{dilate, erode, morph_ops, MorphSettings};
pub use threshold::{in_range, HsvRange, Mask, MASK_SET};
pub use tracker::{select_largest, Detection, FrameAnalysis, TrackedObject, Tracker, TrackingLimits};
