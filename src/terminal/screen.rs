//! Full-screen composition as a single ANSI string.
//!
//! Layout, top to bottom: title line, image area, status line, trackbar line.

use super::frame::AsciiFrame;
use crate::ascii::CellColor;

/// Rows taken by the title, status and trackbar lines.
pub const CHROME_ROWS: u16 = 3;

/// Character grid available to the image for a terminal of `cols x rows`.
pub fn image_area(cols: u16, rows: u16) -> (u16, u16) {
    (cols, rows.saturating_sub(CHROME_ROWS))
}

/// Build the escape sequence that redraws the whole screen.
pub fn compose_screen(
    title: &str,
    frame: &AsciiFrame,
    status: &str,
    trackbars: &str,
    cols: u16,
    rows: u16,
) -> String {
    let mut out = String::with_capacity(frame.chars.len() * 4 + 256);
    if cols == 0 || rows == 0 {
        return out;
    }
    let (_, area_rows) = image_area(cols, rows);

    out.push_str("\x1b[1;1H\x1b[7m");
    push_truncated(&mut out, &format!(" {} ", title), cols);
    out.push_str("\x1b[K\x1b[0m");

    let left = cols.saturating_sub(frame.width) / 2;
    let mut rows_iter = frame.rows();
    for r in 0..area_rows {
        out.push_str(&format!("\x1b[{};1H", r + 2));
        if let Some((chars, colors)) = rows_iter.next() {
            push_spaces(&mut out, left);
            push_colored_row(&mut out, chars, colors, cols.saturating_sub(left));
            out.push_str("\x1b[0m");
        }
        out.push_str("\x1b[K");
    }

    if rows > 1 {
        out.push_str(&format!("\x1b[{};1H", area_rows + 2));
        push_truncated(&mut out, status, cols);
        out.push_str("\x1b[K");
    }
    if rows > 2 {
        out.push_str(&format!("\x1b[{};1H", area_rows + 3));
        push_truncated(&mut out, trackbars, cols);
        out.push_str("\x1b[K");
    }
    out
}

fn push_truncated(out: &mut String, text: &str, cols: u16) {
    out.extend(text.chars().take(cols as usize));
}

fn push_spaces(out: &mut String, n: u16) {
    out.extend(std::iter::repeat(' ').take(n as usize));
}

/// Write a row, emitting a colour escape only when the colour changes.
fn push_colored_row(out: &mut String, chars: &[char], colors: &[CellColor], max: u16) {
    let mut current: Option<CellColor> = None;
    for (&c, &color) in chars.iter().zip(colors).take(max as usize) {
        if current != Some(color) {
            out.push_str(&format!(
                "\x1b[38;2;{};{};{}m",
                color.r, color.g, color.b
            ));
            current = Some(color);
        }
        out.push(c);
    }
}
