//! Aspect-correct character grid sizing.

/// Terminal cells are roughly twice as tall as they are wide.
pub const DEFAULT_CHAR_ASPECT_RATIO: f32 = 2.0;

/// Largest character grid that fits `max_char_width x max_char_height` and
/// shows an `img_width x img_height` image undistorted.
pub fn calculate_dimensions(
    img_width: u32,
    img_height: u32,
    max_char_width: u16,
    max_char_height: u16,
) -> (u16, u16) {
    calculate_dimensions_with_aspect(
        img_width,
        img_height,
        max_char_width,
        max_char_height,
        DEFAULT_CHAR_ASPECT_RATIO,
    )
}

/// Same as [`calculate_dimensions`] with a custom cell aspect ratio
/// (cell height / cell width).
pub fn calculate_dimensions_with_aspect(
    img_width: u32,
    img_height: u32,
    max_char_width: u16,
    max_char_height: u16,
    char_aspect: f32,
) -> (u16, u16) {
    if img_width == 0 || img_height == 0 || max_char_width == 0 || max_char_height == 0 {
        return (0, 0);
    }

    // Columns per row needed for the image to look right on screen
    let target = (img_width as f32 / img_height as f32) * char_aspect;

    let rows = (max_char_width as f32 / target).round() as u16;
    if rows > 0 && rows <= max_char_height {
        return (max_char_width, rows);
    }

    let cols = ((max_char_height as f32 * target).round() as u16).min(max_char_width);
    (cols.max(1), max_char_height)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vga_in_wide_terminal_is_height_bound() {
        // 4:3 image, 2:1 cells -> 8:3 columns:rows
        assert_eq!(calculate_dimensions(640, 480, 200, 30), (80, 30));
    }

    #[test]
    fn test_vga_in_narrow_terminal_is_width_bound() {
        assert_eq!(calculate_dimensions(640, 480, 80, 100), (80, 30));
    }

    #[test]
    fn test_degenerate_inputs() {
        assert_eq!(calculate_dimensions(0, 480, 80, 24), (0, 0));
        assert_eq!(calculate_dimensions(640, 480, 0, 24), (0, 0));
    }

    #[test]
    fn test_custom_aspect() {
        assert_eq!(calculate_dimensions_with_aspect(100, 100, 50, 50, 1.0), (50, 50));
    }
}
