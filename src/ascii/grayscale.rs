//! RGB to grayscale conversion using the ITU-R BT.601 luminance formula.

use crate::camera::Frame;

/// BT.601 luma with integer weights scaled by 1000 (299 + 587 + 114).
#[inline]
fn luma(r: u8, g: u8, b: u8) -> u8 {
    ((299 * r as u32 + 587 * g as u32 + 114 * b as u32) / 1000) as u8
}

/// Convert an RGB frame to one luminance byte per pixel.
pub fn to_grayscale(frame: &Frame) -> Vec<u8> {
    let mut gray = Vec::new();
    to_grayscale_into(frame, &mut gray);
    gray
}

/// Convert an RGB frame to grayscale, reusing `buffer`.
///
/// Returns the number of pixels written.
pub fn to_grayscale_into(frame: &Frame, buffer: &mut Vec<u8>) -> usize {
    buffer.clear();
    buffer.extend(frame.data.chunks_exact(3).map(|px| luma(px[0], px[1], px[2])));
    buffer.len()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grayscale_weights() {
        let frame = Frame::from_rgb(
            vec![255, 0, 0, 0, 255, 0, 0, 0, 255, 255, 255, 255, 0, 0, 0],
            5,
            1,
        )
        .unwrap();
        assert_eq!(to_grayscale(&frame), vec![76, 149, 29, 255, 0]);
    }

    #[test]
    fn test_grayscale_into_reuses_buffer() {
        let frame = Frame::from_rgb(vec![100, 100, 100], 1, 1).unwrap();
        let mut buffer = vec![1, 2, 3, 4];
        assert_eq!(to_grayscale_into(&frame, &mut buffer), 1);
        assert_eq!(buffer, vec![100]);
    }
}
