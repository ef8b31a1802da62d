//! Library module: turns the command-line path into something playable.
//!
//! A file is played as-is; a directory is scanned for files whose extension
//! is in `library.extensions`. Durations come from [`MetadataReader`].

mod metadata;
mod scan;

use std::path::{Path, PathBuf};

use crate::config::LibrarySettings;
use crate::error::Error;

pub use metadata::{LoftyMetadata, MetadataReader};
pub use scan::scan;

/// What the user asked to play.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    /// A single file; no next/previous navigation.
    Single(PathBuf),
    /// The playable files found in a directory, in traversal order.
    Directory(Vec<PathBuf>),
}

/// Resolve `path` into a [`Selection`].
///
/// Fails with [`Error::InvalidPath`] when `path` is neither a file nor a
/// directory, and with [`Error::NoFilesFound`] for a directory without any
/// playable file.
pub fn select(path: &Path, settings: &LibrarySettings) -> Result<Selection, Error> {
    if path.is_file() {
        return Ok(Selection::Single(path.to_path_buf()));
    }
    if !path.is_dir() {
        return Err(Error::InvalidPath(path.to_path_buf()));
    }

    let tracks = scan(path, settings);
    if tracks.is_empty() {
        return Err(Error::NoFilesFound(path.to_path_buf()));
    }
    Ok(Selection::Directory(tracks))
}
