//! Full-screen terminal session with panic-safe cleanup.

use crossterm::cursor::{Hide, Show};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use std::io;
use std::panic;
use std::sync::atomic::{AtomicBool, Ordering};

/// Set while the screen is taken over, read by the panic hook.
pub(crate) static SCREEN_ACTIVE: AtomicBool = AtomicBool::new(false);

/// Raw mode plus the alternate screen with a hidden cursor, restored on drop.
pub struct ScreenGuard {
    active: bool,
}

impl ScreenGuard {
    /// Take over the terminal.
    ///
    /// # Errors
    /// Fails when stdout is not a terminal.
    pub fn enter() -> io::Result<Self> {
        install_panic_hook();

        enable_raw_mode()?;
        SCREEN_ACTIVE.store(true, Ordering::SeqCst);
        let mut guard = Self { active: true };
        if let Err(e) = execute!(io::stdout(), EnterAlternateScreen, Hide) {
            let _ = guard.exit();
            return Err(e);
        }
        Ok(guard)
    }

    /// Hand the terminal back. Dropping afterwards does nothing.
    pub fn exit(&mut self) -> io::Result<()> {
        if self.active {
            self.active = false;
            SCREEN_ACTIVE.store(false, Ordering::SeqCst);
            restore()?;
        }
        Ok(())
    }
}

impl Drop for ScreenGuard {
    fn drop(&mut self) {
        if self.active {
            SCREEN_ACTIVE.store(false, Ordering::SeqCst);
            let _ = restore();
        }
    }
}

fn restore() -> io::Result<()> {
    execute!(io::stdout(), Show, LeaveAlternateScreen)?;
    disable_raw_mode()
}

/// Restore the terminal before the default panic message is printed.
pub(crate) fn install_panic_hook() {
    static HOOK_INSTALLED: AtomicBool = AtomicBool::new(false);

    if HOOK_INSTALLED.swap(true, Ordering::SeqCst) {
        return;
    }

    let original_hook = panic::take_hook();

    panic::set_hook(Box::new(move |panic_info| {
        if SCREEN_ACTIVE.swap(false, Ordering::SeqCst) {
            let _ = restore();
        }
        original_hook(panic_info);
    }));
}
