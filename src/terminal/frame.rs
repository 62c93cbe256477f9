//! Character frames for the terminal view.

use super::overlay::{Overlay, Shape};
use crate::ascii::CellColor;

const WHITE: CellColor = CellColor {
    r: 255,
    g: 255,
    b: 255,
};

/// A character grid with one colour per cell, row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AsciiFrame {
    pub chars: Vec<char>,
    pub colors: Vec<CellColor>,
    pub width: u16,
    pub height: u16,
}

impl Default for AsciiFrame {
    fn default() -> Self {
        Self::new(0, 0)
    }
}

impl AsciiFrame {
    /// Blank frame of the given size.
    pub fn new(width: u16, height: u16) -> Self {
        let size = (width as usize) * (height as usize);
        Self {
            chars: vec![' '; size],
            colors: vec![WHITE; size],
            width,
            height,
        }
    }

    /// Frame from characters and colours. Missing colours default to white.
    pub fn from_chars_colored(
        chars: Vec<char>,
        mut colors: Vec<CellColor>,
        width: u16,
        height: u16,
    ) -> Self {
        colors.resize(chars.len(), WHITE);
        Self {
            chars,
            colors,
            width,
            height,
        }
    }

    pub fn rows(&self) -> impl Iterator<Item = (&[char], &[CellColor])> {
        let w = (self.width as usize).max(1);
        self.chars.chunks(w).zip(self.colors.chunks(w))
    }

    #[cfg(test)]
    fn get(&self, col: u16, row: u16) -> Option<char> {
        if col >= self.width || row >= self.height {
            return None;
        }
        self.chars
            .get(row as usize * self.width as usize + col as usize)
            .copied()
    }

    fn put(&mut self, col: u16, row: u16, c: char, color: CellColor) {
        if col >= self.width || row >= self.height {
            return;
        }
        let idx = row as usize * self.width as usize + col as usize;
        // Lines crossing each other become a junction
        let c = match (self.chars[idx], c) {
            ('│', '─') | ('─', '│') | ('┼', '─') | ('┼', '│') => '┼',
            _ => c,
        };
        self.chars[idx] = c;
        self.colors[idx] = color;
    }

    /// Draw `overlay` (in `frame_width x frame_height` pixel space) onto the grid.
    pub fn paint(&mut self, overlay: &Overlay, frame_width: u32, frame_height: u32) {
        if self.width == 0 || self.height == 0 || frame_width == 0 || frame_height == 0 {
            return;
        }
        let (width, height) = (self.width, self.height);
        let col = |x: u32| ((x as u64 * width as u64 / frame_width as u64) as u16).min(width - 1);
        let row = |y: u32| ((y as u64 * height as u64 / frame_height as u64) as u16).min(height - 1);

        for shape in &overlay.shapes {
            match *shape {
                Shape::VLine { x, color } => {
                    let c = col(x);
                    for r in 0..self.height {
                        self.put(c, r, '│', color);
                    }
                }
                Shape::HLine { y, color } => {
                    let r = row(y);
                    for c in 0..self.width {
                        self.put(c, r, '─', color);
                    }
                }
                Shape::HSegment { y, x0, x1, color } => {
                    let r = row(y);
                    for c in col(x0)..=col(x1) {
                        self.put(c, r, '─', color);
                    }
                }
                Shape::VSegment { x, y0, y1, color } => {
                    let c = col(x);
                    for r in row(y0)..=row(y1) {
                        self.put(c, r, '│', color);
                    }
                }
                Shape::Rect { bbox, color } => {
                    let (right, bottom) = bbox.bottom_right();
                    let (c0, c1) = (col(bbox.x), col(right));
                    let (r0, r1) = (row(bbox.y), row(bottom));
                    for c in c0..=c1 {
                        self.put(c, r0, '─', color);
                        self.put(c, r1, '─', color);
                    }
                    for r in r0..=r1 {
                        self.put(c0, r, '│', color);
                        self.put(c1, r, '│', color);
                    }
                    self.put(c0, r0, '┌', color);
                    self.put(c1, r0, '┐', color);
                    self.put(c0, r1, '└', color);
                    self.put(c1, r1, '┘', color);
                }
                Shape::Marker { x, y, color } => {
                    // Overwrites any junction underneath
                    let (c, r) = (col(x), row(y));
                    if c < self.width && r < self.height {
                        let idx = r as usize * self.width as usize + c as usize;
                        self.chars[idx] = '◎';
                        self.colors[idx] = color;
                    }
                }
            }
        }
    }
}
