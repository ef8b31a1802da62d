//! Track duration lookup.

use std::path::Path;

use lofty::prelude::AudioFile;

use crate::error::MetadataError;

/// Source of per-track durations for the progress bar.
pub trait MetadataReader: Send {
    /// Length of the track at `path`, in seconds.
    fn duration_seconds(&self, path: &Path) -> Result<f64, MetadataError>;
}

/// Reads durations from the container headers via `lofty`.
#[derive(Debug, Default, Clone, Copy)]
pub struct LoftyMetadata;

impl MetadataReader for LoftyMetadata {
    fn duration_seconds(&self, path: &Path) -> Result<f64, MetadataError> {
        let tagged = lofty::read_from_path(path).map_err(|source| MetadataError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let duration = tagged.properties().duration();
        if duration.is_zero() {
            return Err(MetadataError::NoDuration(path.to_path_buf()));
        }
        Ok(duration.as_secs_f64())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unreadable_file_is_a_metadata_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("noise.mp3");
        std::fs::write(&path, b"definitely not an mp3").unwrap();

        let err = LoftyMetadata.duration_seconds(&path).unwrap_err();
        assert!(err.to_string().contains("noise.mp3"));
    }

    #[test]
    fn missing_file_is_a_metadata_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(
            LoftyMetadata
                .duration_seconds(&dir.path().join("gone.ogg"))
                .is_err()
        );
    }
}
