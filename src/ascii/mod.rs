//! Character-grid rendering of frames for the terminal view.
//!
//! 1. **Grayscale conversion** - RGB to luminance using BT.601
//! 2. **Downsampling** - average pixels into character cells
//! 3. **Character mapping** - brightness to a density ramp
//!
//! Cell colours are averaged separately so the view can paint each
//! character in true colour.

mod charset;
mod dimensions;
mod downsample;
mod grayscale;
mod mapping;

pub use charset::{CharSet, BLOCKS_CHARSET, MINIMAL_CHARSET, STANDARD_CHARSET};
pub use dimensions::{calculate_dimensions, calculate_dimensions_with_aspect, DEFAULT_CHAR_ASPECT_RATIO};
pub use downsample::{downsample_colors_into, downsample_into, CellColor};
pub use grayscale::{to_grayscale, to_grayscale_into};
pub use mapping::{map_to_chars, map_to_chars_into};
