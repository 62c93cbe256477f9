//! Largest-object selection and the per-frame tracking pipeline.

use super::blobs::{blobs_in, Blob, BoundingBox};
use super::hsv::{hsv_mat, image_from_mat, HsvImage};
use super::mat::VisionError;
use super::morphology::{morph_mat, MorphSettings};
use super::threshold::{threshold_mat, HsvRange, Mask};
use crate::camera::{Frame, Resolution};

/// Bounds that decide which blobs count as the tracked object.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrackingLimits {
    /// At or above this many blobs the filter is considered too noisy
    pub max_objects: usize,
    /// Exclusive lower area bound, in pixels
    pub min_area: u32,
    /// Exclusive upper area bound, in pixels
    pub max_area: u32,
}

impl TrackingLimits {
    pub const DEFAULT_MAX_OBJECTS: usize = 50;
    pub const DEFAULT_MIN_AREA: u32 = 20 * 20;

    /// Default limits for a frame size: anything bigger than two thirds of
    /// the frame is treated as a bad filter rather than an object.
    pub fn for_resolution(res: Resolution) -> Self {
        Self {
            max_objects: Self::DEFAULT_MAX_OBJECTS,
            min_area: Self::DEFAULT_MIN_AREA,
            max_area: (res.area() as f64 / 1.5) as u32,
        }
    }

    fn accepts(&self, area: u32) -> bool {
        area > self.min_area && area < self.max_area
    }
}

impl Default for TrackingLimits {
    fn default() -> Self {
        Self::for_resolution(Resolution::default())
    }
}

/// The object chosen in a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrackedObject {
    pub x: u32,
    pub y: u32,
    pub area: u32,
    pub bbox: BoundingBox,
}

/// Outcome of looking for the object in one mask.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Detection {
    /// The largest blob inside the area window
    Tracked(TrackedObject),
    /// Too many blobs to trust the filter
    TooManyObjects(usize),
    /// Blobs exist but none has an acceptable area
    NoValidObject,
    /// Nothing passed the filter
    Nothing,
}

impl Detection {
    pub fn tracked(&self) -> Option<&TrackedObject> {
        match self {
            Detection::Tracked(obj) => Some(obj),
            _ => None,
        }
    }

    /// Short message for the status line.
    pub fn status_message(&self) -> &'static str {
        match self {
            Detection::Tracked(_) => "Tracking Object",
            Detection::TooManyObjects(_) | Detection::NoValidObject => {
                "TOO MUCH NOISE! ADJUST FILTER"
            }
            Detection::Nothing => "No object in filter range",
        }
    }
}

/// Pick the tracked object out of `blobs`.
///
/// The largest blob with `min_area < area < max_area` wins; on equal areas
/// the earlier blob is kept.
pub fn select_largest(blobs: &[Blob], limits: &TrackingLimits) -> Detection {
    if blobs.is_empty() {
        return Detection::Nothing;
    }
    if blobs.len() >= limits.max_objects {
        return Detection::TooManyObjects(blobs.len());
    }

    let mut best: Option<&Blob> = None;
    for blob in blobs.iter().filter(|b| limits.accepts(b.area)) {
        if best.map_or(true, |b| blob.area > b.area) {
            best = Some(blob);
        }
    }

    match best {
        Some(blob) => {
            let (x, y) = blob.centroid();
            Detection::Tracked(TrackedObject {
                x,
                y,
                area: blob.area,
                bbox: blob.bbox,
            })
        }
        None => Detection::NoValidObject,
    }
}

/// Everything the pipeline produced for one frame.
#[derive(Debug, Clone)]
pub struct FrameAnalysis {
    pub hsv: HsvImage,
    /// Raw in-range mask
    pub threshold: Mask,
    /// Mask after morphological cleanup, `None` when cleanup is disabled
    pub morphed: Option<Mask>,
    pub blob_count: usize,
    pub detection: Detection,
}

impl FrameAnalysis {
    /// The mask blobs were taken from.
    pub fn cleaned(&self) -> &Mask {
        self.morphed.as_ref().unwrap_or(&self.threshold)
    }
}

/// Colour tracker: HSV threshold, cleanup, blob selection.
#[derive(Debug, Clone)]
pub struct Tracker {
    pub range: HsvRange,
    pub morph: MorphSettings,
    pub morph_enabled: bool,
    pub limits: TrackingLimits,
}

impl Default for Tracker {
    fn default() -> Self {
        Self::new(
            HsvRange::default(),
            MorphSettings::default(),
            TrackingLimits::default(),
        )
    }
}

impl Tracker {
    pub fn new(range: HsvRange, morph: MorphSettings, limits: TrackingLimits) -> Self {
        Self {
            range,
            morph,
            morph_enabled: true,
            limits,
        }
    }

    /// Run the full pipeline on one frame.
    ///
    /// Every stage stays in OpenCV matrices; only the images the views show
    /// are copied out.
    pub fn process(&self, frame: &Frame) -> Result<FrameAnalysis, VisionError> {
        let (width, height) = (frame.width, frame.height);
        if frame.data.is_empty() {
            return Ok(FrameAnalysis {
                hsv: HsvImage {
                    data: Vec::new(),
                    width,
                    height,
                },
                threshold: Mask::new(width, height),
                morphed: None,
                blob_count: 0,
                detection: Detection::Nothing,
            });
        }

        let hsv = hsv_mat(frame)?;
        let threshold = threshold_mat(&hsv, &self.range)?;

        let (blobs, morphed) = if self.morph_enabled {
            let cleaned = morph_mat(&threshold, &self.morph)?;
            (blobs_in(&cleaned)?, Some(Mask::from_mat(&cleaned, width, height)?))
        } else {
            (blobs_in(&threshold)?, None)
        };
        let detection = select_largest(&blobs, &self.limits);

        match &detection {
            Detection::Tracked(obj) => {
                log::debug!(
                    "area of largest object: {} at ({}, {})",
                    obj.area,
                    obj.x,
                    obj.y
                );
            }
            Detection::TooManyObjects(n) => {
                log::trace!("{} blobs in mask, filter too noisy", n);
            }
            _ => {}
        }

        Ok(FrameAnalysis {
            hsv: image_from_mat(&hsv, width, height)?,
            threshold: Mask::from_mat(&threshold, width, height)?,
            morphed,
            blob_count: blobs.len(),
            detection,
        })
    }
}
