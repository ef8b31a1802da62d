//! Utilities for creating `rodio` sinks from track paths.
//!
//! The helper here encapsulates opening/decoding a file and preparing a
//! paused `Sink` on the shared output mixer.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use rodio::mixer::Mixer;
use rodio::{Decoder, Sink};

use crate::error::PlaybackError;

/// Create a paused `Sink` for the file at `path`.
pub(super) fn create_sink(mixer: &Mixer, path: &Path) -> Result<Sink, PlaybackError> {
    let file = File::open(path).map_err(|source| PlaybackError::Open {
        path: path.to_path_buf(),
        source,
    })?;

    let source = Decoder::new(BufReader::new(file)).map_err(|source| PlaybackError::Decode {
        path: path.to_path_buf(),
        source,
    })?;

    let sink = Sink::connect_new(mixer);
    sink.append(source);
    sink.pause();
    Ok(sink)
}
