use std::path::Path;

use crate::error::PlaybackError;

/// What the transport needs from an audio output.
///
/// Implementations only move audio; all timing and state bookkeeping lives in
/// [`crate::transport::Transport`].
pub trait AudioBackend: Send {
    /// Prepare `path` for playback, replacing whatever was loaded. Starts paused.
    fn load(&mut self, path: &Path) -> Result<(), PlaybackError>;
    fn play(&mut self);
    fn pause(&mut self);
    fn resume(&mut self);
    /// Drop the loaded track. Safe to call when nothing is loaded.
    fn stop(&mut self);
    /// `volume` is already clamped to `0.0..=1.0`.
    fn set_volume(&mut self, volume: f32);
    /// Whether audio is still coming out of the speakers.
    fn is_busy(&self) -> bool;
}
