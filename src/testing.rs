//! Test doubles for the collaborator traits.

use std::collections::{HashMap, VecDeque};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

use crate::audio::AudioBackend;
use crate::config::{AudioSettings, UiSettings};
use crate::error::{MetadataError, PlaybackError};
use crate::input::RawInput;
use crate::library::MetadataReader;
use crate::render::Screen;
use crate::transport::Transport;

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Load(PathBuf),
    Play,
    Pause,
    Resume,
    Stop,
    Volume(f32),
}

/// Records every call; loads of paths listed in `failing` fail.
#[derive(Clone, Default)]
pub struct FakeBackend {
    pub calls: Arc<Mutex<Vec<Call>>>,
    pub failing: Vec<PathBuf>,
    /// Value reported by `is_busy` while a track is loaded and playing.
    pub busy: bool,
    playing: bool,
}

impl FakeBackend {
    pub fn new() -> Self {
        Self {
            busy: true,
            ..Self::default()
        }
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn loads(&self) -> Vec<PathBuf> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                Call::Load(p) => Some(p),
                _ => None,
            })
            .collect()
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }
}

impl AudioBackend for FakeBackend {
    fn load(&mut self, path: &Path) -> Result<(), PlaybackError> {
        self.record(Call::Load(path.to_path_buf()));
        if self.failing.iter().any(|p| p == path) {
            return Err(PlaybackError::Open {
                path: path.to_path_buf(),
                source: io::Error::new(io::ErrorKind::NotFound, "no such track"),
            });
        }
        Ok(())
    }

    fn play(&mut self) {
        self.playing = true;
        self.record(Call::Play);
    }

    fn pause(&mut self) {
        self.playing = false;
        self.record(Call::Pause);
    }

    fn resume(&mut self) {
        self.playing = true;
        self.record(Call::Resume);
    }

    fn stop(&mut self) {
        self.playing = false;
        self.record(Call::Stop);
    }

    fn set_volume(&mut self, volume: f32) {
        self.record(Call::Volume(volume));
    }

    fn is_busy(&self) -> bool {
        self.playing && self.busy
    }
}

/// Durations by path; unknown paths fail like an unreadable file.
#[derive(Clone, Default)]
pub struct FakeMetadata {
    pub durations: HashMap<PathBuf, f64>,
    pub default: Option<f64>,
}

impl FakeMetadata {
    pub fn fixed(seconds: f64) -> Self {
        Self {
            durations: HashMap::new(),
            default: Some(seconds),
        }
    }
}

impl MetadataReader for FakeMetadata {
    fn duration_seconds(&self, path: &Path) -> Result<f64, MetadataError> {
        self.durations
            .get(path)
            .copied()
            .or(self.default)
            .ok_or_else(|| MetadataError::NoDuration(path.to_path_buf()))
    }
}

/// Replays keys, optionally sleeping before each one. Runs dry with `UnexpectedEof`.
#[derive(Default)]
pub struct ScriptedInput {
    keys: VecDeque<(Duration, char)>,
    pub raw_mode_entries: usize,
}

impl ScriptedInput {
    pub fn keys(keys: &str) -> Self {
        Self {
            keys: keys.chars().map(|c| (Duration::ZERO, c)).collect(),
            raw_mode_entries: 0,
        }
    }

    pub fn delayed(keys: &[(Duration, char)]) -> Self {
        Self {
            keys: keys.iter().copied().collect(),
            raw_mode_entries: 0,
        }
    }
}

impl RawInput for ScriptedInput {
    type Guard = ();

    fn scoped_raw_mode(&mut self) -> io::Result<Self::Guard> {
        self.raw_mode_entries += 1;
        Ok(())
    }

    fn read_one_char(&mut self) -> io::Result<char> {
        let (delay, c) = self
            .keys
            .pop_front()
            .ok_or_else(|| io::Error::new(io::ErrorKind::UnexpectedEof, "script exhausted"))?;
        if !delay.is_zero() {
            thread::sleep(delay);
        }
        Ok(c)
    }
}

/// `Write` sink that can be inspected while another handle keeps writing.
#[derive(Clone, Default)]
pub struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

impl SharedBuffer {
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }

    pub fn clear(&self) {
        self.0.lock().unwrap().clear();
    }
}

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

pub fn transport(backend: FakeBackend, metadata: FakeMetadata) -> Arc<Transport> {
    Arc::new(Transport::new(
        Box::new(backend),
        Box::new(metadata),
        &AudioSettings::default(),
    ))
}

/// Uncolored screen writing into two inspectable buffers.
pub fn screen() -> (Arc<Screen>, SharedBuffer, SharedBuffer) {
    let out = SharedBuffer::default();
    let err = SharedBuffer::default();
    let ui = UiSettings {
        color: false,
        ..UiSettings::default()
    };
    let screen = Screen::new(Box::new(out.clone()), Box::new(err.clone()), &ui);
    (Arc::new(screen), out, err)
}
