use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::Path;
use std::sync::{Arc, Mutex};

use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::util::SubscriberInitExt;

use crate::config::LogSettings;
use crate::error::Error;
use crate::render::Screen;

/// Install the global `tracing` subscriber.
///
/// `SPOTSPOT_LOG` overrides `log.level`. Events go to `file` (or `log.file`)
/// when set. Otherwise they go to stderr through `screen`, one event at a
/// time, so they never split a progress frame.
pub fn init(settings: &LogSettings, file: Option<&Path>, screen: Arc<Screen>) -> Result<(), Error> {
    let filter = EnvFilter::try_from_env("SPOTSPOT_LOG")
        .or_else(|_| EnvFilter::try_new(&settings.level))
        .map_err(Error::LogFilter)?;

    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    let result = match file.or(settings.file.as_deref()) {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .map_err(|source| Error::LogFile {
                    path: path.to_path_buf(),
                    source,
                })?;
            builder
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .finish()
                .try_init()
        }
        None => builder
            .with_ansi(false)
            .with_writer(ScreenWriter::new(screen))
            .finish()
            .try_init(),
    };
    result.map_err(Error::LogInit)
}

/// [`MakeWriter`] that hands each formatted event to [`Screen::error`].
#[derive(Clone)]
pub struct ScreenWriter {
    screen: Arc<Screen>,
}

impl ScreenWriter {
    pub fn new(screen: Arc<Screen>) -> Self {
        Self { screen }
    }
}

impl<'a> MakeWriter<'a> for ScreenWriter {
    type Writer = EventBuffer;

    fn make_writer(&'a self) -> Self::Writer {
        EventBuffer {
            screen: Arc::clone(&self.screen),
            buf: Vec::new(),
        }
    }
}

/// Collects one event and emits it, CRLF-terminated, when dropped.
pub struct EventBuffer {
    screen: Arc<Screen>,
    buf: Vec<u8>,
}

impl Write for EventBuffer {
    fn write(&mut self, data: &[u8]) -> io::Result<usize> {
        self.buf.extend_from_slice(data);
        Ok(data.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Drop for EventBuffer {
    fn drop(&mut self) {
        if self.buf.is_empty() {
            return;
        }
        let text = String::from_utf8_lossy(&self.buf);
        let _ = self.screen.error(&text);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::screen;

    #[test]
    fn each_event_is_written_with_crlf_line_endings() {
        let (screen, out, err) = screen();
        {
            let writer = ScreenWriter::new(screen);
            let mut event = writer.make_writer();
            event.write_all(b"WARN first\n").unwrap();
            event.write_all(b"WARN second\n").unwrap();
            assert!(err.contents().is_empty(), "nothing is emitted mid-event");
        }
        assert_eq!(err.contents(), "\rWARN first\r\n\rWARN second\r\n");
        assert!(out.contents().is_empty());
    }

    #[test]
    fn tracing_events_go_through_the_screen() {
        let (screen, _, err) = screen();
        let subscriber = tracing_subscriber::fmt()
            .with_ansi(false)
            .with_writer(ScreenWriter::new(screen))
            .finish();

        tracing::subscriber::with_default(subscriber, || {
            tracing::warn!("progress repaint failed");
        });

        let text = err.contents();
        assert!(text.contains("progress repaint failed"));
        assert!(text.ends_with("\r\n"));
        assert!(!text.replace("\r\n", "").contains('\n'), "no bare newlines");
    }

    #[test]
    fn bad_filter_is_a_typed_error() {
        let (screen, _, _) = screen();
        let settings = LogSettings {
            level: "spotspot=loud".to_string(),
            file: None,
        };
        // The bad level only matters when SPOTSPOT_LOG is unset.
        if std::env::var_os("SPOTSPOT_LOG").is_none() {
            let err = init(&settings, None, screen).unwrap_err();
            assert!(matches!(err, Error::LogFilter(_)));
        }
    }

    #[test]
    fn unopenable_log_file_names_the_path() {
        let (screen, _, _) = screen();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("spotspot.log");

        let err = init(&LogSettings::default(), Some(&path), screen).unwrap_err();
        match err {
            Error::LogFile { path: p, .. } => assert_eq!(p, path),
            other => panic!("unexpected error: {other}"),
        }
    }
}
