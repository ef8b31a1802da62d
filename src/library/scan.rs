use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use walkdir::{DirEntry, WalkDir};

use crate::config::LibrarySettings;

/// Normalised extension list: lowercase, no leading dot, blanks dropped.
fn wanted_extensions(settings: &LibrarySettings) -> Vec<String> {
    settings
        .extensions
        .iter()
        .map(|e| e.trim().trim_start_matches('.').to_ascii_lowercase())
        .filter(|e| !e.is_empty())
        .collect()
}

fn has_extension(path: &Path, wanted: &[String]) -> bool {
    let Some(ext) = path.extension().and_then(OsStr::to_str) else {
        return false;
    };
    wanted.iter().any(|w| w.eq_ignore_ascii_case(ext))
}

fn is_dotfile(entry: &DirEntry) -> bool {
    entry.file_name().to_str().is_some_and(|n| n.starts_with('.'))
}

/// Collect the playable files under `dir`, in file-name order per directory.
pub fn scan(dir: &Path, settings: &LibrarySettings) -> Vec<PathBuf> {
    let wanted = wanted_extensions(settings);

    // Depth 0 is `dir` itself, 1 its direct children.
    let max_depth = match (settings.recursive, settings.max_depth) {
        (false, _) => 1,
        (true, Some(depth)) => depth,
        (true, None) => usize::MAX,
    };

    WalkDir::new(dir)
        .follow_links(settings.follow_links)
        .max_depth(max_depth)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| e.depth() == 0 || settings.include_hidden || !is_dotfile(e))
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(e) => {
                tracing::debug!(error = %e, "skipping unreadable entry");
                None
            }
        })
        .filter(|entry| entry.path().is_file() && has_extension(entry.path(), &wanted))
        .map(DirEntry::into_path)
        .collect()
}
