//! Track sequencing.
//!
//! [`Playlist`] is the ordered list plus a cursor; [`PlaylistController`] runs
//! the play / tick / wait-for-key loop over it.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use crate::error::Error;
use crate::input::{Dispatcher, RawInput, Signal};
use crate::render::Screen;
use crate::ticker;
use crate::transport::Transport;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Step {
    Forward,
    Back,
}

#[derive(Debug, Clone)]
pub struct Playlist {
    tracks: Vec<PathBuf>,
    index: usize,
    navigable: bool,
}

impl Playlist {
    /// One file, no next/previous.
    pub fn single(path: PathBuf) -> Self {
        Self {
            tracks: vec![path],
            index: 0,
            navigable: false,
        }
    }

    /// Tracks found in a directory; `n`/`p` move through them.
    pub fn directory(tracks: Vec<PathBuf>) -> Self {
        Self {
            tracks,
            index: 0,
            navigable: true,
        }
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn is_navigable(&self) -> bool {
        self.navigable
    }

    pub fn current(&self) -> Option<&Path> {
        self.tracks.get(self.index).map(PathBuf::as_path)
    }

    /// Move the cursor. Returns `false`, leaving the cursor where it was, when
    /// the step would leave the list.
    pub fn step(&mut self, step: Step) -> bool {
        let next = match step {
            Step::Forward => self.index.checked_add(1),
            Step::Back => self.index.checked_sub(1),
        };
        match next {
            Some(i) if i < self.tracks.len() => {
                self.index = i;
                true
            }
            _ => false,
        }
    }
}

/// How a playback session ended.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// The user pressed `q`.
    Quit,
    /// Navigation ran off either end of the playlist.
    Finished,
    /// The only track could not be played.
    PlaybackFailed,
}

pub struct PlaylistController {
    playlist: Playlist,
    transport: Arc<Transport>,
    screen: Arc<Screen>,
    tick_interval: Duration,
}

impl PlaylistController {
    pub fn new(
        playlist: Playlist,
        transport: Arc<Transport>,
        screen: Arc<Screen>,
        tick_interval: Duration,
    ) -> Self {
        Self {
            playlist,
            transport,
            screen,
            tick_interval,
        }
    }

    /// Play until the user quits or navigates past either end.
    ///
    /// A track that fails to load is reported; in a directory the loop moves
    /// on in the direction it was already going.
    pub fn run<I: RawInput>(&mut self, input: &mut I) -> Result<Outcome, Error> {
        let navigable = self.playlist.is_navigable();
        let mut direction = Step::Forward;

        loop {
            let Some(track) = self.playlist.current().map(Path::to_path_buf) else {
                return Ok(Outcome::Finished);
            };

            if let Err(e) = self.transport.load_and_play(&track) {
                tracing::debug!(track = %track.display(), error = %e, "load failed");
                self.screen.error(&format!("Error playing file: {e}"))?;
                self.transport.stop();
                if !navigable {
                    return Ok(Outcome::PlaybackFailed);
                }
                if !self.playlist.step(direction) {
                    return Ok(Outcome::Finished);
                }
                continue;
            }

            tracing::info!(
                track = ?self.transport.current_track(),
                duration = self.transport.duration(),
                volume = self.transport.volume(),
                "now playing"
            );
            if let Err(e) = self.screen.repaint(&self.transport) {
                tracing::warn!(error = %e, "progress repaint failed");
            }
            let ticker = ticker::spawn(
                Arc::clone(&self.transport),
                Arc::clone(&self.screen),
                self.tick_interval,
            );

            let signal = Dispatcher::new(&self.transport, &self.screen, navigable).dispatch(input);

            let position = self.transport.current_position();
            self.transport.stop();
            if ticker.join().is_err() {
                tracing::warn!("ticker thread panicked");
            }

            direction = match signal? {
                Signal::Quit => return Ok(Outcome::Quit),
                Signal::Next => Step::Forward,
                Signal::Prev => Step::Back,
            };
            tracing::debug!(index = self.playlist.index(), position, ?direction, "navigating");
            if !self.playlist.step(direction) {
                return Ok(Outcome::Finished);
            }
        }
    }
}
