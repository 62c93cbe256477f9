//! Terminal surface: screen guard, character frames, overlays and composition.

mod frame;
mod overlay;
mod raw_mode;
mod screen;

pub use crate::ascii::CellColor;
pub use frame::AsciiFrame;
pub use overlay::{GuideLines, Overlay, Shape, BLUE, CROSSHAIR_ARM, GREEN, RED};
pub use raw_mode::ScreenGuard;
pub use screen::{compose_screen, image_area, CHROME_ROWS};
