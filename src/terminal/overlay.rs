//! Annotation shapes drawn over the original camera view.
//!
//! Shapes are described in frame pixel coordinates and projected onto the
//! character grid by [`AsciiFrame::paint`](super::AsciiFrame::paint).

use serde::{Deserialize, Serialize};

use crate::ascii::CellColor;
use crate::vision::{BoundingBox, Detection};

pub const BLUE: CellColor = CellColor { r: 0, g: 0, b: 255 };
pub const RED: CellColor = CellColor { r: 255, g: 0, b: 0 };
pub const GREEN: CellColor = CellColor { r: 0, g: 255, b: 0 };

/// Length of each crosshair arm, in pixels.
pub const CROSSHAIR_ARM: u32 = 25;

/// Frame-centre guide lines: a centre line plus one line `delta` pixels to
/// either side, on each axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GuideLines {
    pub enabled: bool,
    pub delta_x: u32,
    pub delta_y: u32,
}

impl Default for GuideLines {
    fn default() -> Self {
        Self {
            enabled: true,
            delta_x: 120,
            delta_y: 100,
        }
    }
}

impl GuideLines {
    /// Centre of a frame, biased one pixel right/down.
    pub fn center(width: u32, height: u32) -> (u32, u32) {
        (width / 2 + 1, height / 2 + 1)
    }
}

/// A primitive in frame pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    VLine { x: u32, color: CellColor },
    HLine { y: u32, color: CellColor },
    /// Horizontal segment from `x0` to `x1` inclusive
    HSegment { y: u32, x0: u32, x1: u32, color: CellColor },
    /// Vertical segment from `y0` to `y1` inclusive
    VSegment { x: u32, y0: u32, y1: u32, color: CellColor },
    Rect { bbox: BoundingBox, color: CellColor },
    Marker { x: u32, y: u32, color: CellColor },
}

/// Shapes to draw for one frame, in drawing order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Overlay {
    pub shapes: Vec<Shape>,
}

impl Overlay {
    /// Guide lines (when enabled) plus the tracked object's box and crosshair.
    pub fn for_detection(
        detection: &Detection,
        guides: &GuideLines,
        width: u32,
        height: u32,
    ) -> Self {
        let mut overlay = Self::default();
        if width == 0 || height == 0 {
            return overlay;
        }
        if guides.enabled {
            overlay.add_guides(guides, width, height);
        }
        if let Some(obj) = detection.tracked() {
            overlay.shapes.push(Shape::Rect {
                bbox: obj.bbox,
                color: GREEN,
            });
            overlay.add_crosshair(obj.x, obj.y, width, height);
        }
        overlay
    }

    fn add_guides(&mut self, guides: &GuideLines, width: u32, height: u32) {
        let (cx, cy) = GuideLines::center(width, height);

        for x in [cx.checked_sub(guides.delta_x), cx.checked_add(guides.delta_x)]
            .into_iter()
            .flatten()
            .filter(|&x| x < width)
        {
            self.shapes.push(Shape::VLine { x, color: RED });
        }
        if cx < width {
            self.shapes.push(Shape::VLine { x: cx, color: BLUE });
        }

        for y in [cy.checked_sub(guides.delta_y), cy.checked_add(guides.delta_y)]
            .into_iter()
            .flatten()
            .filter(|&y| y < height)
        {
            self.shapes.push(Shape::HLine { y, color: RED });
        }
        if cy < height {
            self.shapes.push(Shape::HLine { y: cy, color: BLUE });
        }
    }

    /// Crosshair arms clamped to the frame so they never run off screen.
    fn add_crosshair(&mut self, x: u32, y: u32, width: u32, height: u32) {
        let x0 = x.saturating_sub(CROSSHAIR_ARM);
        let x1 = (x + CROSSHAIR_ARM).min(width - 1);
        let y0 = y.saturating_sub(CROSSHAIR_ARM);
        let y1 = (y + CROSSHAIR_ARM).min(height - 1);
        self.shapes.push(Shape::HSegment {
            y,
            x0,
            x1,
            color: GREEN,
        });
        self.shapes.push(Shape::VSegment {
            x,
            y0,
            y1,
            color: GREEN,
        });
        self.shapes.push(Shape::Marker { x, y, color: GREEN });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vision::TrackedObject;

    fn tracked(x: u32, y: u32) -> Detection {
        Detection::Tracked(TrackedObject {
            x,
            y,
            area: 900,
            bbox: BoundingBox {
                x: x - 15,
                y: y - 15,
                width: 30,
                height: 30,
            },
        })
    }

    #[test]
    fn test_center_is_biased() {
        assert_eq!(GuideLines::center(640, 480), (321, 241));
    }

    #[test]
    fn test_guides_for_vga() {
        let overlay = Overlay::for_detection(&Detection::Nothing, &GuideLines::default(), 640, 480);
        assert_eq!(
            overlay.shapes,
            vec![
                Shape::VLine { x: 201, color: RED },
                Shape::VLine { x: 441, color: RED },
                Shape::VLine { x: 321, color: BLUE },
                Shape::HLine { y: 141, color: RED },
                Shape::HLine { y: 341, color: RED },
                Shape::HLine { y: 241, color: BLUE },
            ]
        );
    }

    #[test]
    fn test_guides_outside_small_frame_are_dropped() {
        let overlay = Overlay::for_detection(&Detection::Nothing, &GuideLines::default(), 100, 80);
        // Only the two centre lines fit
        assert_eq!(overlay.shapes.len(), 2);
    }

    #[test]
    fn test_disabled_guides() {
        let guides = GuideLines {
            enabled: false,
            ..GuideLines::default()
        };
        let overlay = Overlay::for_detection(&Detection::Nothing, &guides, 640, 480);
        assert!(overlay.shapes.is_empty());
    }

    #[test]
    fn test_crosshair_is_clamped() {
        let guides = GuideLines {
            enabled: false,
            ..GuideLines::default()
        };
        let overlay = Overlay::for_detection(&tracked(630, 20), &guides, 640, 480);
        assert!(overlay.shapes.contains(&Shape::HSegment {
            y: 20,
            x0: 605,
            x1: 639,
            color: GREEN
        }));
        assert!(overlay.shapes.contains(&Shape::VSegment {
            x: 630,
            y0: 0,
            y1: 45,
            color: GREEN
        }));
        assert!(matches!(overlay.shapes.last(), Some(Shape::Marker { x: 630, y: 20, .. })));
    }
}
