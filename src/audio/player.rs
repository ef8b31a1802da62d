use std::path::Path;

use rodio::Sink;
use rodio::mixer::Mixer;

use crate::error::PlaybackError;

use super::backend::AudioBackend;
use super::sink::create_sink;
use super::thread::{OutputThread, spawn_output_thread};

/// [`AudioBackend`] that plays through the default output device with `rodio`.
pub struct RodioBackend {
    mixer: Mixer,
    sink: Option<Sink>,
    volume: f32,
    // Dropped last so the sink is gone before the stream closes.
    _output: OutputThread,
}

impl RodioBackend {
    /// Open the default output device.
    pub fn open() -> Result<Self, PlaybackError> {
        let (mixer, output) = spawn_output_thread()?;
        Ok(Self {
            mixer,
            sink: None,
            volume: 1.0,
            _output: output,
        })
    }
}

impl AudioBackend for RodioBackend {
    fn load(&mut self, path: &Path) -> Result<(), PlaybackError> {
        self.stop();
        let sink = create_sink(&self.mixer, path)?;
        sink.set_volume(self.volume);
        self.sink = Some(sink);
        Ok(())
    }

    fn play(&mut self) {
        if let Some(s) = self.sink.as_ref() {
            s.play();
        }
    }

    fn pause(&mut self) {
        if let Some(s) = self.sink.as_ref() {
            s.pause();
        }
    }

    fn resume(&mut self) {
        self.play();
    }

    fn stop(&mut self) {
        if let Some(s) = self.sink.take() {
            s.stop();
        }
    }

    fn set_volume(&mut self, volume: f32) {
        self.volume = volume;
        if let Some(s) = self.sink.as_ref() {
            s.set_volume(volume);
        }
    }

    fn is_busy(&self) -> bool {
        self.sink
            .as_ref()
            .is_some_and(|s| !s.empty() && !s.is_paused())
    }
}

impl Drop for RodioBackend {
    fn drop(&mut self) {
        self.stop();
    }
}
