//! The playback state machine shared by the input loop and the ticker.
//!
//! Every field sits behind one mutex together with the audio backend, so a
//! pause captures its frozen position in the same critical section that flips
//! the state. Callers only see the operations below, never the fields.

use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};

use crate::audio::AudioBackend;
use crate::config::AudioSettings;
use crate::error::PlaybackError;
use crate::library::MetadataReader;

/// Lifecycle of the transport.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum TransportState {
    /// Nothing has been loaded yet.
    #[default]
    Idle,
    Playing,
    Paused,
    /// The last track was stopped (or failed to load).
    Stopped,
}

impl TransportState {
    /// Whether a track is loaded and position tracking is meaningful.
    pub fn is_active(self) -> bool {
        matches!(self, Self::Playing | Self::Paused)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum VolumeDirection {
    Up,
    Down,
}

/// Consistent view used by the ticker.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Status {
    pub state: TransportState,
    pub position: f64,
    pub duration: f64,
}

/// Everything the renderer needs for one frame.
#[derive(Clone, Debug, PartialEq)]
pub struct Frame {
    pub track_name: String,
    pub position: f64,
    pub duration: f64,
    /// Volume in percent.
    pub volume: u8,
    pub paused: bool,
    /// No frame has been drawn for this track yet.
    pub first_frame: bool,
}

struct Inner {
    backend: Box<dyn AudioBackend>,
    metadata: Box<dyn MetadataReader>,

    state: TransportState,
    track: Option<PathBuf>,
    duration: f64,
    // Percent, so stepping is exact.
    volume: u8,
    volume_step: u8,

    started_at: Option<Instant>,
    paused_total: Duration,
    paused_at: Option<Instant>,
    frozen_position: f64,
    first_frame: bool,
}

impl Inner {
    fn position_at(&self, now: Instant) -> f64 {
        match self.state {
            TransportState::Playing => {
                let Some(started) = self.started_at else {
                    return 0.0;
                };
                now.saturating_duration_since(started)
                    .saturating_sub(self.paused_total)
                    .as_secs_f64()
            }
            TransportState::Paused => self.frozen_position,
            TransportState::Idle | TransportState::Stopped => 0.0,
        }
    }
}

pub struct Transport {
    inner: Mutex<Inner>,
}

impl Transport {
    pub fn new(
        backend: Box<dyn AudioBackend>,
        metadata: Box<dyn MetadataReader>,
        settings: &AudioSettings,
    ) -> Self {
        Self {
            inner: Mutex::new(Inner {
                backend,
                metadata,
                state: TransportState::Idle,
                track: None,
                duration: 0.0,
                volume: settings.initial_volume.min(100),
                volume_step: settings.volume_step.clamp(1, 100),
                started_at: None,
                paused_total: Duration::ZERO,
                paused_at: None,
                frozen_position: 0.0,
                first_frame: true,
            }),
        }
    }

    // Every critical section leaves the fields consistent, so a panic on the
    // other thread does not invalidate the state.
    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Load `path` and start playing it from the beginning.
    ///
    /// An unreadable duration only disables the progress bar; a backend
    /// failure leaves the transport `Stopped` and is returned to the caller.
    pub fn load_and_play(&self, path: &Path) -> Result<(), PlaybackError> {
        self.load_and_play_at(path, Instant::now())
    }

    pub(crate) fn load_and_play_at(&self, path: &Path, now: Instant) -> Result<(), PlaybackError> {
        let mut inner = self.lock();

        let duration = match inner.metadata.duration_seconds(path) {
            Ok(d) if d.is_finite() && d > 0.0 => d,
            Ok(_) => 0.0,
            Err(e) => {
                tracing::debug!(error = %e, "duration unknown; progress bar disabled");
                0.0
            }
        };

        inner.track = Some(path.to_path_buf());
        inner.duration = duration;
        inner.started_at = None;
        inner.paused_total = Duration::ZERO;
        inner.paused_at = None;
        inner.frozen_position = 0.0;
        inner.first_frame = true;
        inner.state = TransportState::Stopped;

        inner.backend.load(path)?;
        let volume = f32::from(inner.volume) / 100.0;
        inner.backend.set_volume(volume);
        inner.backend.play();

        inner.started_at = Some(now);
        inner.state = TransportState::Playing;
        tracing::debug!(track = %path.display(), duration, "playing");
        Ok(())
    }

    /// Pause when playing, resume when paused. Returns the resulting state.
    pub fn toggle_pause(&self) -> TransportState {
        self.toggle_pause_at(Instant::now())
    }

    pub(crate) fn toggle_pause_at(&self, now: Instant) -> TransportState {
        let mut inner = self.lock();
        match inner.state {
            TransportState::Playing => {
                inner.frozen_position = inner.position_at(now);
                inner.paused_at = Some(now);
                inner.backend.pause();
                inner.state = TransportState::Paused;
            }
            TransportState::Paused => {
                if let Some(at) = inner.paused_at.take() {
                    inner.paused_total += now.saturating_duration_since(at);
                }
                inner.backend.resume();
                inner.state = TransportState::Playing;
            }
            TransportState::Idle | TransportState::Stopped => {}
        }
        inner.state
    }

    /// Step the volume by the configured amount, clamped to `0.0..=1.0`.
    /// Returns the new volume.
    pub fn adjust_volume(&self, direction: VolumeDirection) -> f32 {
        let mut inner = self.lock();
        inner.volume = match direction {
            VolumeDirection::Up => inner.volume.saturating_add(inner.volume_step).min(100),
            VolumeDirection::Down => inner.volume.saturating_sub(inner.volume_step),
        };
        let volume = f32::from(inner.volume) / 100.0;
        inner.backend.set_volume(volume);
        volume
    }

    /// Halt the backend and move to `Stopped`. Calling it again is harmless.
    pub fn stop(&self) {
        let mut inner = self.lock();
        if inner.state.is_active() {
            inner.backend.stop();
        }
        inner.started_at = None;
        inner.paused_at = None;
        inner.state = TransportState::Stopped;
    }

    /// Elapsed seconds of the current track; 0 when nothing is loaded.
    pub fn current_position(&self) -> f64 {
        self.lock().position_at(Instant::now())
    }

    pub(crate) fn position_at(&self, now: Instant) -> f64 {
        self.lock().position_at(now)
    }

    pub fn is_audio_busy(&self) -> bool {
        self.lock().backend.is_busy()
    }

    pub fn status(&self) -> Status {
        let inner = self.lock();
        Status {
            state: inner.state,
            position: inner.position_at(Instant::now()),
            duration: inner.duration,
        }
    }

    /// Snapshot for the renderer. Consumes the first-frame flag.
    ///
    /// `None` unless a track is playing or paused: a stopped track has no
    /// frame to draw.
    pub fn take_frame(&self) -> Option<Frame> {
        self.take_frame_at(Instant::now())
    }

    pub(crate) fn take_frame_at(&self, now: Instant) -> Option<Frame> {
        let mut inner = self.lock();
        if !inner.state.is_active() {
            return None;
        }
        let first_frame = std::mem::replace(&mut inner.first_frame, false);
        Some(Frame {
            track_name: inner
                .track
                .as_deref()
                .and_then(Path::file_name)
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default(),
            position: inner.position_at(now),
            duration: inner.duration,
            volume: inner.volume,
            paused: inner.state == TransportState::Paused,
            first_frame,
        })
    }

    pub fn state(&self) -> TransportState {
        self.lock().state
    }

    pub fn volume(&self) -> f32 {
        f32::from(self.lock().volume) / 100.0
    }

    pub fn duration(&self) -> f64 {
        self.lock().duration
    }

    pub fn current_track(&self) -> Option<PathBuf> {
        self.lock().track.clone()
    }
}
