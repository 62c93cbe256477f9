//! Moving pixel buffers in and out of OpenCV matrices.

use opencv::core::{Mat, Scalar};
use opencv::prelude::*;

/// Errors from the colour segmentation pipeline.
#[derive(Debug, thiserror::Error)]
pub enum VisionError {
    #[error("OpenCV error: {0}")]
    OpenCv(#[from] opencv::Error),

    #[error("buffer holds {actual} bytes, a {width}x{height} image needs {expected}")]
    SizeMismatch {
        width: u32,
        height: u32,
        expected: usize,
        actual: usize,
    },
}

/// Copy a tightly packed buffer into a new `height x width` matrix of `typ`.
pub(super) fn to_mat(
    data: &[u8],
    width: u32,
    height: u32,
    channels: usize,
    typ: i32,
) -> Result<Mat, VisionError> {
    let expected = width as usize * height as usize * channels;
    if data.len() != expected {
        return Err(VisionError::SizeMismatch {
            width,
            height,
            expected,
            actual: data.len(),
        });
    }

    let mut mat = Mat::new_rows_cols_with_default(height as i32, width as i32, typ, Scalar::all(0.0))?;
    mat.data_bytes_mut()?.copy_from_slice(data);
    Ok(mat)
}

/// Tightly packed bytes of `mat`, regardless of its row stride.
pub(super) fn to_bytes(mat: &Mat) -> Result<Vec<u8>, VisionError> {
    if mat.is_continuous() {
        return Ok(mat.data_bytes()?.to_vec());
    }
    let packed = mat.try_clone()?;
    Ok(packed.data_bytes()?.to_vec())
}
