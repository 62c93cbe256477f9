//! Turns a frame and its analysis into the screen for the selected view.

use crate::ascii::{self, CellColor};
use crate::camera::Frame;
use crate::session::{Session, View};
use crate::terminal::{compose_screen, image_area, AsciiFrame, Overlay};
use crate::vision::{Detection, FrameAnalysis};

/// Reusable buffers for frame-to-character conversion.
#[derive(Debug, Default)]
pub struct Renderer {
    gray: Vec<u8>,
    brightness: Vec<u8>,
    chars: Vec<char>,
    colors: Vec<CellColor>,
}

impl Renderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Convert `frame` to the largest aspect-correct grid inside `max_cols x max_rows`.
    pub fn to_ascii(
        &mut self,
        frame: &Frame,
        max_cols: u16,
        max_rows: u16,
        session: &Session,
    ) -> AsciiFrame {
        let (cols, rows) = ascii::calculate_dimensions(frame.width, frame.height, max_cols, max_rows);
        if cols == 0 || rows == 0 {
            return AsciiFrame::default();
        }

        ascii::to_grayscale_into(frame, &mut self.gray);
        ascii::downsample_into(&self.gray, frame.width, frame.height, cols, rows, &mut self.brightness);
        ascii::map_to_chars_into(
            &self.brightness,
            session.charset.chars(),
            session.invert,
            &mut self.chars,
        );
        ascii::downsample_colors_into(frame, cols, rows, &mut self.colors);

        AsciiFrame::from_chars_colored(self.chars.clone(), self.colors.clone(), cols, rows)
    }

    /// Full screen for the session's current view.
    pub fn render(
        &mut self,
        session: &Session,
        frame: &Frame,
        analysis: &FrameAnalysis,
        cols: u16,
        rows: u16,
    ) -> String {
        let (area_cols, area_rows) = image_area(cols, rows);

        let ascii = match session.view {
            View::Original => {
                let mut ascii = self.to_ascii(frame, area_cols, area_rows, session);
                let overlay = Overlay::for_detection(
                    &analysis.detection,
                    &session.guides,
                    frame.width,
                    frame.height,
                );
                ascii.paint(&overlay, frame.width, frame.height);
                ascii
            }
            View::Hsv => self.to_ascii(&analysis.hsv.to_display_frame(), area_cols, area_rows, session),
            View::Threshold => {
                self.to_ascii(&analysis.threshold.to_display_frame(), area_cols, area_rows, session)
            }
            View::Morphed => {
                self.to_ascii(&analysis.cleaned().to_display_frame(), area_cols, area_rows, session)
            }
        };

        compose_screen(
            &title_line(session),
            &ascii,
            &status_line(session, analysis),
            &session.trackbar_line(),
            cols,
            rows,
        )
    }
}

/// Screen shown before the first frame arrives.
pub fn render_waiting(session: &Session, cols: u16, rows: u16) -> String {
    compose_screen(
        &title_line(session),
        &AsciiFrame::default(),
        "waiting for camera...",
        &session.trackbar_line(),
        cols,
        rows,
    )
}

fn title_line(session: &Session) -> String {
    format!(
        "[{}/4] {}  (q quit, tab view, arrows adjust)",
        session.view.number(),
        session.view.title()
    )
}

/// Detection message, object position, and the active toggles.
pub fn status_line(session: &Session, analysis: &FrameAnalysis) -> String {
    let position = match &analysis.detection {
        Detection::Tracked(obj) => format!(" | {},{} area {}", obj.x, obj.y, obj.area),
        _ => String::new(),
    };
    format!(
        "{}{} | blobs {} | morph {} | guides {} | {}",
        analysis.detection.status_message(),
        position,
        analysis.blob_count,
        on_off(session.tracker.morph_enabled),
        on_off(session.guides.enabled),
        session.charset.name(),
    )
}

fn on_off(flag: bool) -> &'static str {
    if flag {
        "on"
    } else {
        "off"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ascii::CharSet;
    use crate::terminal::GuideLines;
    use crate::vision::{HsvRange, Tracker};

    fn session(view: View) -> Session {
        let mut tracker = Tracker::default();
        tracker.morph_enabled = false;
        tracker.limits.min_area = 10;
        // Pure red only
        tracker.range = HsvRange {
            h_min: 0,
            h_max: 5,
            s_min: 200,
            s_max: 255,
            v_min: 200,
            v_max: 255,
        };
        Session::new(tracker, view, CharSet::Standard, GuideLines::default())
    }

    /// 64x48 black frame with a 10x10 red square at (20, 10).
    fn frame_with_square() -> Frame {
        let (w, h) = (64u32, 48u32);
        let mut data = vec![0u8; (w * h * 3) as usize];
        for y in 10..20 {
            for x in 20..30 {
                let idx = ((y * w + x) * 3) as usize;
                data[idx] = 255;
            }
        }
        Frame::from_rgb(data, w, h).unwrap()
    }

    #[test]
    fn test_status_line_reports_position() {
        let s = session(View::Original);
        let frame = frame_with_square();
        let analysis = s.tracker.process(&frame).unwrap();
        let line = status_line(&s, &analysis);
        assert!(line.starts_with("Tracking Object | 24,14 area 100"));
        assert!(line.contains("morph off"));
    }

    #[test]
    fn test_render_original_has_title_and_guides() {
        let s = session(View::Original);
        let frame = frame_with_square();
        let analysis = s.tracker.process(&frame).unwrap();
        let out = Renderer::new().render(&s, &frame, &analysis, 40, 20);
        assert!(out.contains("Original Image"));
        assert!(out.contains('│'));
        assert!(out.contains("Trackbars:"));
    }

    #[test]
    fn test_render_threshold_view_title() {
        let s = session(View::Threshold);
        let frame = frame_with_square();
        let analysis = s.tracker.process(&frame).unwrap();
        let out = Renderer::new().render(&s, &frame, &analysis, 40, 20);
        assert!(out.contains("Thresholded Image"));
        assert!(out.contains('@'));
    }

    #[test]
    fn test_to_ascii_keeps_aspect() {
        let s = session(View::Original);
        let ascii = Renderer::new().to_ascii(&frame_with_square(), 80, 100, &s);
        assert_eq!((ascii.width, ascii.height), (80, 30));
        assert_eq!(ascii.chars.len(), ascii.colors.len());
    }

    #[test]
    fn test_waiting_screen() {
        let out = render_waiting(&session(View::Hsv), 40, 10);
        assert!(out.contains("HSV Image"));
        assert!(out.contains("waiting for camera"));
    }
}
