//! Progress frame rendering.
//!
//! A frame is three lines: the track name, the progress line and a blank
//! spacer. The first frame of a track is preceded by a blank line; every later
//! frame jumps back over the previous one and clears to the end of the screen,
//! so nothing is appended to scrollback while a track plays.

mod format;

use std::io::{self, Write};
use std::sync::{Mutex, MutexGuard, PoisonError};

use crossterm::cursor::MoveToPreviousLine;
use crossterm::queue;
use crossterm::style::Stylize;
use crossterm::terminal::{Clear, ClearType};

use crate::config::UiSettings;
use crate::transport::{Frame, Transport};

pub use format::{bar_layout, format_clock, percentage, progress};

/// Lines written per frame.
pub const FRAME_LINES: u16 = 3;

// Lines end in CRLF because the terminal may be in raw mode while we draw.
const EOL: &str = "\r\n";

pub struct ProgressRenderer {
    out: Box<dyn Write + Send>,
    width: usize,
    color: bool,
}

impl ProgressRenderer {
    pub fn new(out: Box<dyn Write + Send>, ui: &UiSettings) -> Self {
        Self {
            out,
            width: ui.bar_width.max(1),
            color: ui.color,
        }
    }

    /// Spacer line, then the frame.
    pub fn render_initial(&mut self, frame: &Frame) -> io::Result<()> {
        if frame.duration <= 0.0 {
            return Ok(());
        }
        self.out.write_all(EOL.as_bytes())?;
        self.write_frame(frame)
    }

    /// Overwrite the previous frame in place.
    pub fn render_update(&mut self, frame: &Frame) -> io::Result<()> {
        if frame.duration <= 0.0 {
            return Ok(());
        }
        queue!(
            self.out,
            MoveToPreviousLine(FRAME_LINES),
            Clear(ClearType::FromCursorDown)
        )?;
        self.write_frame(frame)
    }

    pub fn render(&mut self, frame: &Frame) -> io::Result<()> {
        if frame.first_frame {
            self.render_initial(frame)
        } else {
            self.render_update(frame)
        }
    }

    /// Print `text` as plain lines below whatever is on screen.
    pub fn message(&mut self, text: &str) -> io::Result<()> {
        for line in text.lines() {
            write!(self.out, "{line}{EOL}")?;
        }
        self.out.flush()
    }

    fn write_frame(&mut self, frame: &Frame) -> io::Result<()> {
        let ratio = progress(frame.position, frame.duration);
        let layout = bar_layout(ratio, self.width);

        let filled: String = std::iter::repeat_n(format::SOLID, layout.filled).collect();
        let head: String = std::iter::repeat_n(format::HEAD, layout.head).collect();
        let empty: String = std::iter::repeat_n(format::EMPTY, layout.empty).collect();

        let time = format!(
            "{}/{}",
            format_clock(frame.position.min(frame.duration)),
            format_clock(frame.duration)
        );
        let volume = format!("🔊 {}%", frame.volume);
        let glyph = if frame.paused { "⏸ " } else { "▶ " };
        let pct = percentage(ratio);

        if self.color {
            write!(self.out, "{}{EOL}", frame.track_name.as_str().bold().blue())?;
            let glyph = if frame.paused {
                glyph.yellow()
            } else {
                glyph.green()
            };
            write!(
                self.out,
                "{pct:>3}% |{}{}{}| {} {} {}{EOL}",
                filled.as_str().green(),
                head.as_str().green(),
                empty.as_str().dark_grey(),
                time.as_str().dark_grey(),
                volume.as_str().yellow(),
                glyph,
            )?;
        } else {
            write!(self.out, "{}{EOL}", frame.track_name)?;
            write!(
                self.out,
                "{pct:>3}% |{filled}{head}{empty}| {time} {volume} {glyph}{EOL}"
            )?;
        }
        self.out.write_all(EOL.as_bytes())?;
        self.out.flush()
    }
}

/// Serialises everything written to the terminal by the input loop and the ticker.
///
/// Lock order is screen first, transport second; the transport never calls
/// back into the screen. Log events are written through [`Screen::error`], so
/// nothing may log while the frame lock is held.
pub struct Screen {
    renderer: Mutex<ProgressRenderer>,
    err: Mutex<Box<dyn Write + Send>>,
}

impl Screen {
    pub fn new(out: Box<dyn Write + Send>, err: Box<dyn Write + Send>, ui: &UiSettings) -> Self {
        Self {
            renderer: Mutex::new(ProgressRenderer::new(out, ui)),
            err: Mutex::new(err),
        }
    }

    pub fn terminal(ui: &UiSettings) -> Self {
        Self::new(Box::new(io::stdout()), Box::new(io::stderr()), ui)
    }

    fn renderer(&self) -> MutexGuard<'_, ProgressRenderer> {
        self.renderer.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Draw the transport's current frame: the initial one for a fresh track,
    /// an in-place update otherwise. Nothing is drawn once the track stopped.
    pub fn repaint(&self, transport: &Transport) -> io::Result<()> {
        // The state is read under the screen lock, so a stop followed by a
        // message is never painted over.
        let mut renderer = self.renderer();
        match transport.take_frame() {
            Some(frame) => renderer.render(&frame),
            None => Ok(()),
        }
    }

    pub fn message(&self, text: &str) -> io::Result<()> {
        self.renderer().message(text)
    }

    /// Report a problem on stderr.
    pub fn error(&self, text: &str) -> io::Result<()> {
        // Hold the frame lock so the report never lands inside a frame.
        let _frame = self.renderer();
        let mut err = self.err.lock().unwrap_or_else(PoisonError::into_inner);
        for line in text.lines() {
            write!(err, "\r{line}{EOL}")?;
        }
        err.flush()
    }
}
