//! Morphological erode/dilate with rectangular structuring elements.
//!
//! The anchor sits at `size / 2`. Pixels outside the image never take part:
//! erosion can't be triggered by the border, dilation can't grow from it.

use opencv::core::{Mat, Point, Size, BORDER_CONSTANT};
use opencv::imgproc;
use opencv::prelude::*;
use serde::{Deserialize, Serialize};

use super::mat::VisionError;
use super::threshold::Mask;

/// Sizes and pass counts for the noise-cleanup step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MorphSettings {
    /// Side of the square erode element, in pixels
    pub erode_size: u32,
    pub erode_passes: u32,
    /// Side of the square dilate element, in pixels
    pub dilate_size: u32,
    pub dilate_passes: u32,
}

impl Default for MorphSettings {
    fn default() -> Self {
        Self {
            erode_size: 12,
            erode_passes: 2,
            dilate_size: 8,
            dilate_passes: 2,
        }
    }
}

#[derive(Clone, Copy)]
enum Op {
    Erode,
    Dilate,
}

/// Erode `mask` in place with a `size x size` element.
pub fn erode(mask: &mut Mask, size: u32) -> Result<(), VisionError> {
    apply_to_mask(mask, Op::Erode, size, 1)
}

/// Dilate `mask` in place with a `size x size` element.
pub fn dilate(mask: &mut Mask, size: u32) -> Result<(), VisionError> {
    apply_to_mask(mask, Op::Dilate, size, 1)
}

/// Erode then dilate according to `settings`.
///
/// Erosion strips specks smaller than the element; dilation restores the
/// bulk of the surviving objects.
pub fn morph_ops(mask: &mut Mask, settings: &MorphSettings) -> Result<(), VisionError> {
    if mask.data.is_empty() {
        return Ok(());
    }
    let cleaned = morph_mat(&mask.to_mat()?, settings)?;
    *mask = Mask::from_mat(&cleaned, mask.width, mask.height)?;
    Ok(())
}

/// Erode then dilate a single-channel mask matrix.
pub(super) fn morph_mat(mask: &Mat, settings: &MorphSettings) -> Result<Mat, VisionError> {
    let eroded = apply(mask, Op::Erode, settings.erode_size, settings.erode_passes)?;
    apply(&eroded, Op::Dilate, settings.dilate_size, settings.dilate_passes)
}

fn apply_to_mask(mask: &mut Mask, op: Op, size: u32, passes: u32) -> Result<(), VisionError> {
    if mask.data.is_empty() {
        return Ok(());
    }
    let out = apply(&mask.to_mat()?, op, size, passes)?;
    *mask = Mask::from_mat(&out, mask.width, mask.height)?;
    Ok(())
}

fn apply(src: &Mat, op: Op, size: u32, passes: u32) -> Result<Mat, VisionError> {
    if size <= 1 || passes == 0 {
        return Ok(src.try_clone()?);
    }

    let anchor = Point::new(-1, -1);
    let kernel = imgproc::get_structuring_element(
        imgproc::MORPH_RECT,
        Size::new(size as i32, size as i32),
        anchor,
    )?;
    let border = imgproc::morphology_default_border_value()?;

    let mut dst = Mat::default();
    match op {
        Op::Erode => imgproc::erode(
            src,
            &mut dst,
            &kernel,
            anchor,
            passes as i32,
            BORDER_CONSTANT,
            border,
        )?,
        Op::Dilate => imgproc::dilate(
            src,
            &mut dst,
            &kernel,
            anchor,
            passes as i32,
            BORDER_CONSTANT,
            border,
        )?,
    }
    Ok(dst)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square(size: u32, side: u32, at: (u32, u32)) -> Mask {
        let mut mask = Mask::new(size, size);
        for y in at.1..at.1 + side {
            for x in at.0..at.0 + side {
                mask.set(x, y, true);
            }
        }
        mask
    }

    #[test]
    fn test_erode_removes_small_speck() {
        let mut mask = Mask::from_rows(&[".....", ".##..", ".##..", ".....", "....."]);
        erode(&mut mask, 3).unwrap();
        assert_eq!(mask.count_set(), 0);
    }

    #[test]
    fn test_erode_shrinks_square() {
        let mut mask = square(10, 5, (2, 2));
        erode(&mut mask, 3).unwrap();
        // 5x5 eroded by a 3x3 element leaves the inner 3x3
        assert_eq!(mask.count_set(), 9);
        assert!(mask.is_set(3, 3));
        assert!(mask.is_set(5, 5));
        assert!(!mask.is_set(2, 2));
        assert!(!mask.is_set(6, 6));
    }

    #[test]
    fn test_dilate_grows_single_pixel() {
        let mut mask = Mask::new(7, 7);
        mask.set(3, 3, true);
        dilate(&mut mask, 3).unwrap();
        assert_eq!(mask.count_set(), 9);
        assert!(mask.is_set(2, 2));
        assert!(mask.is_set(4, 4));
    }

    #[test]
    fn test_dilate_even_element_is_anchored_at_half() {
        // For size 2 the anchor is 1: each pixel looks one step back
        let mut mask = Mask::new(4, 4);
        mask.set(1, 1, true);
        dilate(&mut mask, 2).unwrap();
        assert_eq!(mask.count_set(), 4);
        assert!(mask.is_set(1, 1));
        assert!(mask.is_set(2, 2));
        assert!(!mask.is_set(0, 0));
    }

    #[test]
    fn test_border_does_not_erode() {
        let mut mask = square(4, 4, (0, 0));
        erode(&mut mask, 3).unwrap();
        assert_eq!(mask.count_set(), 16);
    }

    #[test]
    fn test_size_one_is_identity() {
        let original = Mask::from_rows(&["#.#", ".#.", "#.#"]);
        let mut mask = original.clone();
        erode(&mut mask, 1).unwrap();
        dilate(&mut mask, 1).unwrap();
        assert_eq!(mask, original);
    }

    #[test]
    fn test_morph_ops_keeps_large_object_and_drops_noise() {
        let mut mask = square(80, 40, (20, 20));
        mask.set(2, 2, true);
        mask.set(75, 5, true);
        morph_ops(&mut mask, &MorphSettings::default()).unwrap();
        assert!(!mask.is_set(2, 2));
        assert!(!mask.is_set(75, 5));
        assert!(mask.is_set(40, 40));
        // 40x40 erodes to 29x29 then 18x18, dilates back to 25x25 then 32x32
        assert_eq!(mask.count_set(), 32 * 32);
    }
}
