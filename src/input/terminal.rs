use std::io;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};

use super::{CTRL_C, RawInput};

/// Raw mode for as long as the guard lives.
pub struct RawModeGuard(());

impl RawModeGuard {
    pub fn acquire() -> io::Result<Self> {
        enable_raw_mode()?;
        Ok(Self(()))
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
    }
}

/// Keystrokes from the controlling terminal via `crossterm`.
#[derive(Debug, Default)]
pub struct TerminalInput;

impl RawInput for TerminalInput {
    type Guard = RawModeGuard;

    fn scoped_raw_mode(&mut self) -> io::Result<Self::Guard> {
        RawModeGuard::acquire()
    }

    fn read_one_char(&mut self) -> io::Result<char> {
        loop {
            if let Event::Key(key) = event::read()? {
                if let Some(c) = key_char(key) {
                    return Ok(c);
                }
            }
        }
    }
}

/// Map a key event to the character a cooked terminal would have delivered.
fn key_char(key: KeyEvent) -> Option<char> {
    if key.kind != KeyEventKind::Press {
        return None;
    }
    match key.code {
        // Raw mode swallows SIGINT, so Ctrl-C arrives as a key.
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => Some(CTRL_C),
        KeyCode::Char(c) => Some(c),
        _ => None,
    }
}
