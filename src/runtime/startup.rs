use crate::library::Selection;
use crate::playlist::Playlist;

const CONTROLS: &[(&str, &str)] = &[
    ("space", "play/pause"),
    ("+", "volume up"),
    ("-", "volume down"),
    ("q", "quit"),
    ("n", "next track (in directory mode)"),
    ("p", "previous track (in directory mode)"),
];

/// The key legend printed before playback starts.
pub fn controls_text() -> String {
    let mut text = String::from("\nControls:");
    for (key, action) in CONTROLS {
        text.push_str(&format!("\n {key} - {action}"));
    }
    text
}

/// Build the playlist, plus the announcement to print for a directory.
pub fn playlist_for(selection: Selection) -> (Playlist, Option<String>) {
    match selection {
        Selection::Single(path) => (Playlist::single(path), None),
        Selection::Directory(tracks) => {
            let playlist = Playlist::directory(tracks);
            let note = format!("Found {} music files", playlist.len());
            (playlist, Some(note))
        }
    }
}
