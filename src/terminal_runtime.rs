use std::io;

use crossterm::cursor::{Hide, Show};
use crossterm::event::{
    KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
    supports_keyboard_enhancement,
};
use log::{debug, warn};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

/// Concrete terminal type used by the interactive renderer.
pub type AppTerminal = Terminal<CrosstermBackend<io::Stdout>>;

/// Holds raw mode and the alternate screen for one session.
///
/// When the terminal supports it, key release reporting is enabled so that a
/// held Shift key can drive turbo. Everything is restored on drop.
pub struct TerminalGuard {
    enhanced_keys: bool,
}

impl TerminalGuard {
    /// Enters raw mode and the alternate screen.
    pub fn enter() -> io::Result<Self> {
        enable_raw_mode()?;

        let mut stdout = io::stdout();
        if let Err(error) = execute!(stdout, EnterAlternateScreen, Hide) {
            let _ = disable_raw_mode();
            return Err(error);
        }

        let enhanced_keys = matches!(supports_keyboard_enhancement(), Ok(true))
            && execute!(
                stdout,
                PushKeyboardEnhancementFlags(
                    KeyboardEnhancementFlags::REPORT_EVENT_TYPES
                        | KeyboardEnhancementFlags::REPORT_ALL_KEYS_AS_ESCAPE_CODES
                )
            )
            .is_ok();
        debug!("key release reporting enabled: {enhanced_keys}");

        Ok(Self { enhanced_keys })
    }

    /// Creates the ratatui terminal drawing on stdout.
    pub fn terminal(&self) -> io::Result<AppTerminal> {
        Terminal::new(CrosstermBackend::new(io::stdout()))
    }

    /// Returns true when key releases are reported.
    #[must_use]
    pub fn has_key_releases(&self) -> bool {
        self.enhanced_keys
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        if let Err(error) = restore_terminal(self.enhanced_keys) {
            warn!("failed to restore terminal: {error}");
        }
    }
}

/// Best-effort terminal reset, also used from the panic hook.
pub fn restore_terminal(enhanced_keys: bool) -> io::Result<()> {
    let mut stdout = io::stdout();
    if enhanced_keys {
        let _ = execute!(stdout, PopKeyboardEnhancementFlags);
    }
    let _ = disable_raw_mode();
    execute!(stdout, Show, LeaveAlternateScreen)
}
