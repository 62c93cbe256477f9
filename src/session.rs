//! Interactive tracking state: which view is shown, the trackbar values,
//! and the display toggles.

use crate::ascii::CharSet;
use crate::terminal::GuideLines;
use crate::vision::{HsvRange, Tracker};

/// Window names shown in the title line.
pub const ORIGINAL_WINDOW: &str = "Original Image";
pub const HSV_WINDOW: &str = "HSV Image";
pub const THRESHOLD_WINDOW: &str = "Thresholded Image";
pub const MORPH_WINDOW: &str = "After Morphological Operations";
pub const TRACKBAR_WINDOW: &str = "Trackbars";

/// Which stage of the pipeline is displayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum View {
    /// Camera frame with tracking annotations
    #[default]
    Original,
    Hsv,
    /// Raw in-range mask
    Threshold,
    /// Mask after erode/dilate
    Morphed,
}

impl View {
    pub const ALL: [View; 4] = [View::Original, View::Hsv, View::Threshold, View::Morphed];

    pub fn title(&self) -> &'static str {
        match self {
            View::Original => ORIGINAL_WINDOW,
            View::Hsv => HSV_WINDOW,
            View::Threshold => THRESHOLD_WINDOW,
            View::Morphed => MORPH_WINDOW,
        }
    }

    /// 1-based position, matching the number keys.
    pub fn number(&self) -> usize {
        Self::ALL.iter().position(|v| v == self).unwrap_or(0) + 1
    }

    /// View for a 1-based number key.
    pub fn from_number(n: usize) -> Option<Self> {
        n.checked_sub(1).and_then(|i| Self::ALL.get(i).copied())
    }

    pub fn next(&self) -> Self {
        Self::ALL[self.number() % Self::ALL.len()]
    }

    pub fn prev(&self) -> Self {
        let len = Self::ALL.len();
        Self::ALL[(self.number() + len - 2) % len]
    }
}

/// One adjustable HSV bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Trackbar {
    #[default]
    HMin,
    HMax,
    SMin,
    SMax,
    VMin,
    VMax,
}

impl Trackbar {
    pub const ALL: [Trackbar; 6] = [
        Trackbar::HMin,
        Trackbar::HMax,
        Trackbar::SMin,
        Trackbar::SMax,
        Trackbar::VMin,
        Trackbar::VMax,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Trackbar::HMin => "H_MIN",
            Trackbar::HMax => "H_MAX",
            Trackbar::SMin => "S_MIN",
            Trackbar::SMax => "S_MAX",
            Trackbar::VMin => "V_MIN",
            Trackbar::VMax => "V_MAX",
        }
    }

    fn index(&self) -> usize {
        Self::ALL.iter().position(|t| t == self).unwrap_or(0)
    }

    pub fn next(&self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    pub fn prev(&self) -> Self {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }

    pub fn get(&self, range: &HsvRange) -> u8 {
        match self {
            Trackbar::HMin => range.h_min,
            Trackbar::HMax => range.h_max,
            Trackbar::SMin => range.s_min,
            Trackbar::SMax => range.s_max,
            Trackbar::VMin => range.v_min,
            Trackbar::VMax => range.v_max,
        }
    }

    fn slot<'a>(&self, range: &'a mut HsvRange) -> &'a mut u8 {
        match self {
            Trackbar::HMin => &mut range.h_min,
            Trackbar::HMax => &mut range.h_max,
            Trackbar::SMin => &mut range.s_min,
            Trackbar::SMax => &mut range.s_max,
            Trackbar::VMin => &mut range.v_min,
            Trackbar::VMax => &mut range.v_max,
        }
    }
}

/// State shared by the input handler and the renderer.
#[derive(Debug, Clone)]
pub struct Session {
    pub view: View,
    pub charset: CharSet,
    pub invert: bool,
    pub guides: GuideLines,
    pub selected: Trackbar,
    pub tracker: Tracker,
    /// Trackbar values to restore on reset
    initial_range: HsvRange,
}

impl Session {
    pub fn new(tracker: Tracker, view: View, charset: CharSet, guides: GuideLines) -> Self {
        Self {
            view,
            charset,
            invert: false,
            guides,
            selected: Trackbar::default(),
            initial_range: tracker.range,
            tracker,
        }
    }

    pub fn range(&self) -> &HsvRange {
        &self.tracker.range
    }

    /// Move the selected trackbar by `delta`, saturating at 0 and 255.
    pub fn adjust(&mut self, delta: i16) {
        let slot = self.selected.slot(&mut self.tracker.range);
        *slot = (*slot as i16 + delta).clamp(0, u8::MAX as i16) as u8;
    }

    /// Restore the trackbars to their starting values.
    pub fn reset_range(&mut self) {
        self.tracker.range = self.initial_range;
    }

    pub fn toggle_morph(&mut self) {
        self.tracker.morph_enabled = !self.tracker.morph_enabled;
    }

    pub fn toggle_guides(&mut self) {
        self.guides.enabled = !self.guides.enabled;
    }

    /// Trackbar panel text, the selected bar in brackets.
    pub fn trackbar_line(&self) -> String {
        let bars: Vec<String> = Trackbar::ALL
            .iter()
            .map(|bar| {
                let value = bar.get(self.range());
                if *bar == self.selected {
                    format!("[{} {}]", bar.name(), value)
                } else {
                    format!(" {} {} ", bar.name(), value)
                }
            })
            .collect();
        format!("{}:{}", TRACKBAR_WINDOW, bars.join(""))
    }
}
