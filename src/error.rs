//! Error types for spotspot.
//!
//! Collaborator failures (rodio, lofty, the terminal) are converted into these
//! enums at the transport/playlist boundary so nothing raw reaches the user.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Top-level error returned by the runtime.
#[derive(Error, Debug)]
pub enum Error {
    /// The argument is neither an existing file nor a directory.
    #[error("path does not exist or is not a file or directory: {}", .0.display())]
    InvalidPath(PathBuf),

    /// The directory holds no file with a recognised audio extension.
    #[error("no supported music files found in {}", .0.display())]
    NoFilesFound(PathBuf),

    #[error(transparent)]
    Playback(#[from] PlaybackError),

    /// Raw mode, key reads or frame writes failed.
    #[error("terminal error: {0}")]
    Terminal(#[from] io::Error),

    #[error("failed to print configuration: {0}")]
    PrintConfig(#[from] toml::ser::Error),

    #[error("invalid log filter: {0}")]
    LogFilter(#[source] tracing_subscriber::filter::ParseError),

    #[error("cannot open log file {}: {source}", path.display())]
    LogFile {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to install the log subscriber: {0}")]
    LogInit(#[source] tracing_subscriber::util::TryInitError),
}

/// The audio backend could not load or play a track.
#[derive(Error, Debug)]
pub enum PlaybackError {
    #[error("cannot open {}: {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("cannot decode {}: {source}", path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: rodio::decoder::DecoderError,
    },

    #[error("no audio output device: {0}")]
    Output(#[from] rodio::StreamError),

    #[error("audio output thread exited unexpectedly")]
    OutputThread,
}

/// The duration of a track could not be determined.
#[derive(Error, Debug)]
pub enum MetadataError {
    #[error("cannot read metadata of {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: lofty::error::LoftyError,
    },

    #[error("{} does not report a duration", .0.display())]
    NoDuration(PathBuf),
}
