//! Keystroke handling.
//!
//! [`Dispatcher::dispatch`] blocks on single raw keystrokes, applies transport
//! commands as they arrive and returns once a key ends the current track.

mod terminal;

use std::io;

use crate::error::Error;
use crate::render::Screen;
use crate::transport::{Transport, VolumeDirection};

pub use terminal::TerminalInput;

/// What raw mode delivers for Ctrl-C.
pub const CTRL_C: char = '\u{3}';

/// Single-keystroke input from a terminal.
pub trait RawInput {
    /// Restores the previous terminal mode when dropped.
    type Guard;

    fn scoped_raw_mode(&mut self) -> io::Result<Self::Guard>;
    /// Block until one character is available.
    fn read_one_char(&mut self) -> io::Result<char>;
}

/// A key's meaning.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Command {
    TogglePause,
    VolumeUp,
    VolumeDown,
    Quit,
    Next,
    Prev,
}

/// Why the dispatcher returned.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Signal {
    Next,
    Prev,
    Quit,
}

/// Map a key to a command. `n`/`p` only mean something with a playlist.
pub fn command_for(key: char, navigable: bool) -> Option<Command> {
    match key {
        ' ' => Some(Command::TogglePause),
        '+' => Some(Command::VolumeUp),
        '-' => Some(Command::VolumeDown),
        'q' | CTRL_C => Some(Command::Quit),
        'n' if navigable => Some(Command::Next),
        'p' if navigable => Some(Command::Prev),
        _ => None,
    }
}

pub struct Dispatcher<'a> {
    transport: &'a Transport,
    screen: &'a Screen,
    navigable: bool,
}

impl<'a> Dispatcher<'a> {
    pub fn new(transport: &'a Transport, screen: &'a Screen, navigable: bool) -> Self {
        Self {
            transport,
            screen,
            navigable,
        }
    }

    /// Read keys until one of them ends the current track.
    ///
    /// Pause and volume changes repaint synchronously, so the frame reflects
    /// the command before the ticker draws again. Quitting stops the transport
    /// before returning.
    pub fn dispatch<I: RawInput>(&self, input: &mut I) -> Result<Signal, Error> {
        let signal = {
            let _raw = input.scoped_raw_mode()?;
            loop {
                let key = input.read_one_char()?;
                let Some(command) = command_for(key, self.navigable) else {
                    continue;
                };
                match command {
                    Command::TogglePause => {
                        self.transport.toggle_pause();
                        self.repaint();
                    }
                    Command::VolumeUp => {
                        self.transport.adjust_volume(VolumeDirection::Up);
                        self.repaint();
                    }
                    Command::VolumeDown => {
                        self.transport.adjust_volume(VolumeDirection::Down);
                        self.repaint();
                    }
                    Command::Quit => {
                        self.transport.stop();
                        break Signal::Quit;
                    }
                    Command::Next => break Signal::Next,
                    Command::Prev => break Signal::Prev,
                }
            }
        };

        if signal == Signal::Quit {
            self.screen.message("\nQuitting...")?;
        }
        Ok(signal)
    }

    fn repaint(&self) {
        if let Err(e) = self.screen.repaint(self.transport) {
            tracing::warn!(error = %e, "progress repaint failed");
        }
    }
}
