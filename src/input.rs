//! Keyboard handling for the interactive view.
//!
//! - `q`, `Q`, `Esc`, `Ctrl+C`: quit
//! - `Tab` / `BackTab`: next / previous view, `1`-`4`: jump to a view
//! - `Up` / `Down`: select a trackbar, `Left` / `Right`: adjust it (Shift for 10)
//! - `c`: charset, `g`: guide lines, `m`: morphology, `i`: invert, `r`: reset trackbars

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::session::{Session, View};

/// Step used when Shift is held on Left/Right.
pub const COARSE_STEP: i16 = 10;

/// Result of handling a key event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    /// Leave the tracking loop
    Quit,
    /// Session changed, redraw
    Handled,
    /// Not a key we use
    Ignored,
}

/// Apply `event` to `session`.
pub fn handle_key_event(event: KeyEvent, session: &mut Session) -> KeyAction {
    // Release/repeat events are reported on some platforms; act on presses only
    if event.kind == KeyEventKind::Release {
        return KeyAction::Ignored;
    }
    let KeyEvent {
        code, modifiers, ..
    } = event;

    if modifiers.contains(KeyModifiers::CONTROL) {
        return match code {
            KeyCode::Char('c') | KeyCode::Char('C') => KeyAction::Quit,
            _ => KeyAction::Ignored,
        };
    }

    let step = if modifiers.contains(KeyModifiers::SHIFT) {
        COARSE_STEP
    } else {
        1
    };

    match code {
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => return KeyAction::Quit,
        KeyCode::Tab => session.view = session.view.next(),
        KeyCode::BackTab => session.view = session.view.prev(),
        KeyCode::Char(c @ '1'..='4') => {
            if let Some(view) = c.to_digit(10).and_then(|n| View::from_number(n as usize)) {
                session.view = view;
            }
        }
        KeyCode::Up => session.selected = session.selected.prev(),
        KeyCode::Down => session.selected = session.selected.next(),
        KeyCode::Left => session.adjust(-step),
        KeyCode::Right => session.adjust(step),
        KeyCode::Char('c') => session.charset = session.charset.next(),
        KeyCode::Char('g') => session.toggle_guides(),
        KeyCode::Char('m') => session.toggle_morph(),
        KeyCode::Char('i') => session.invert = !session.invert,
        KeyCode::Char('r') => session.reset_range(),
        _ => return KeyAction::Ignored,
    }
    KeyAction::Handled
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ascii::CharSet;
    use crate::session::Trackbar;
    use crate::terminal::GuideLines;
    use crate::vision::Tracker;

    fn session() -> Session {
        Session::new(Tracker::default(), View::Original, CharSet::Blocks, GuideLines::default())
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_quit_keys() {
        let mut s = session();
        assert_eq!(handle_key_event(key(KeyCode::Char('q')), &mut s), KeyAction::Quit);
        assert_eq!(handle_key_event(key(KeyCode::Char('Q')), &mut s), KeyAction::Quit);
        assert_eq!(handle_key_event(key(KeyCode::Esc), &mut s), KeyAction::Quit);
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(handle_key_event(ctrl_c, &mut s), KeyAction::Quit);
    }

    #[test]
    fn test_other_keys_never_quit() {
        let mut s = session();
        for code in [
            KeyCode::Char('x'),
            KeyCode::Char('w'),
            KeyCode::Enter,
            KeyCode::Tab,
            KeyCode::Left,
            KeyCode::Char('c'),
            KeyCode::F(1),
        ] {
            assert_ne!(handle_key_event(key(code), &mut s), KeyAction::Quit, "{:?}", code);
        }
    }

    #[test]
    fn test_release_is_ignored() {
        let mut s = session();
        let mut release = key(KeyCode::Char('q'));
        release.kind = KeyEventKind::Release;
        assert_eq!(handle_key_event(release, &mut s), KeyAction::Ignored);
    }

    #[test]
    fn test_view_switching() {
        let mut s = session();
        handle_key_event(key(KeyCode::Tab), &mut s);
        assert_eq!(s.view, View::Hsv);
        handle_key_event(key(KeyCode::BackTab), &mut s);
        assert_eq!(s.view, View::Original);
        handle_key_event(key(KeyCode::Char('4')), &mut s);
        assert_eq!(s.view, View::Morphed);
    }

    #[test]
    fn test_trackbar_editing() {
        let mut s = session();
        handle_key_event(key(KeyCode::Down), &mut s);
        assert_eq!(s.selected, Trackbar::HMax);
        handle_key_event(key(KeyCode::Left), &mut s);
        assert_eq!(s.range().h_max, 254);
        let shift_left = KeyEvent::new(KeyCode::Left, KeyModifiers::SHIFT);
        handle_key_event(shift_left, &mut s);
        assert_eq!(s.range().h_max, 244);
        handle_key_event(key(KeyCode::Char('r')), &mut s);
        assert_eq!(s.range().h_max, 255);
    }

    #[test]
    fn test_toggles() {
        let mut s = session();
        handle_key_event(key(KeyCode::Char('c')), &mut s);
        assert_eq!(s.charset, CharSet::Minimal);
        handle_key_event(key(KeyCode::Char('m')), &mut s);
        assert!(!s.tracker.morph_enabled);
        handle_key_event(key(KeyCode::Char('g')), &mut s);
        assert!(!s.guides.enabled);
        assert_eq!(handle_key_event(key(KeyCode::Char('z')), &mut s), KeyAction::Ignored);
    }
}
