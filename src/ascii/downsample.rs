//! Averaging pixels into character cells.

use crate::camera::Frame;

/// Average RGB colour of a character cell.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CellColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

/// Pixel span `[start, end)` covered by cell `index` of `cells` along an axis.
///
/// Every cell covers at least one pixel, so small images upscale instead of
/// producing empty cells.
fn cell_span(index: u16, cells: u16, pixels: u32) -> (u32, u32) {
    let size = pixels as f32 / cells as f32;
    let start = ((index as f32 * size) as u32).min(pixels - 1);
    let end = (((index + 1) as f32 * size) as u32).clamp(start + 1, pixels);
    (start, end)
}

/// Downsample a grayscale image to a `char_width x char_height` grid of
/// average brightness values, reusing `buffer`.
///
/// Returns the number of cells written (0 for degenerate sizes).
pub fn downsample_into(
    gray: &[u8],
    img_width: u32,
    img_height: u32,
    char_width: u16,
    char_height: u16,
    buffer: &mut Vec<u8>,
) -> usize {
    buffer.clear();
    if char_width == 0 || char_height == 0 || img_width == 0 || img_height == 0 {
        return 0;
    }
    if gray.len() < (img_width as usize) * (img_height as usize) {
        return 0;
    }

    buffer.reserve(char_width as usize * char_height as usize);

    for cy in 0..char_height {
        let (y0, y1) = cell_span(cy, char_height, img_height);
        for cx in 0..char_width {
            let (x0, x1) = cell_span(cx, char_width, img_width);

            let mut sum = 0u32;
            for py in y0..y1 {
                let row = (py * img_width) as usize;
                sum += gray[row + x0 as usize..row + x1 as usize]
                    .iter()
                    .map(|&v| v as u32)
                    .sum::<u32>();
            }
            let count = (y1 - y0) * (x1 - x0);
            buffer.push((sum / count) as u8);
        }
    }

    buffer.len()
}

/// Downsample an RGB frame to per-cell average colours, reusing `buffer`.
///
/// Returns the number of cells written (0 for degenerate sizes).
pub fn downsample_colors_into(
    frame: &Frame,
    char_width: u16,
    char_height: u16,
    buffer: &mut Vec<CellColor>,
) -> usize {
    buffer.clear();
    let (img_width, img_height) = (frame.width, frame.height);
    if char_width == 0 || char_height == 0 || img_width == 0 || img_height == 0 {
        return 0;
    }
    if frame.data.len() < (img_width as usize) * (img_height as usize) * 3 {
        return 0;
    }

    buffer.reserve(char_width as usize * char_height as usize);

    for cy in 0..char_height {
        let (y0, y1) = cell_span(cy, char_height, img_height);
        for cx in 0..char_width {
            let (x0, x1) = cell_span(cx, char_width, img_width);

            let (mut r, mut g, mut b) = (0u32, 0u32, 0u32);
            for py in y0..y1 {
                for px in x0..x1 {
                    let idx = ((py * img_width + px) * 3) as usize;
                    r += frame.data[idx] as u32;
                    g += frame.data[idx + 1] as u32;
                    b += frame.data[idx + 2] as u32;
                }
            }
            let count = (y1 - y0) * (x1 - x0);
            buffer.push(CellColor {
                r: (r / count) as u8,
                g: (g / count) as u8,
                b: (b / count) as u8,
            });
        }
    }

    buffer.len()
}
