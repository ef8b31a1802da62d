use std::sync::mpsc::{self, Sender};
use std::thread::{self, JoinHandle};

use rodio::OutputStreamBuilder;
use rodio::mixer::Mixer;

use crate::error::PlaybackError;

/// Keeps the default output stream open on its own thread.
///
/// `OutputStream` cannot leave the thread that opened it, but its `Mixer` can,
/// so the thread hands the mixer back and then parks until shut down.
pub(super) struct OutputThread {
    shutdown: Option<Sender<()>>,
    join: Option<JoinHandle<()>>,
}

pub(super) fn spawn_output_thread() -> Result<(Mixer, OutputThread), PlaybackError> {
    let (ready_tx, ready_rx) = mpsc::channel::<Result<Mixer, PlaybackError>>();
    let (shutdown_tx, shutdown_rx) = mpsc::channel::<()>();

    let join = thread::spawn(move || {
        let mut stream = match OutputStreamBuilder::open_default_stream() {
            Ok(stream) => stream,
            Err(e) => {
                let _ = ready_tx.send(Err(PlaybackError::Output(e)));
                return;
            }
        };
        // rodio logs to stderr when OutputStream is dropped. That's useful in debugging,
        // but it would land in the middle of the progress frame.
        stream.log_on_drop(false);

        if ready_tx.send(Ok(stream.mixer().clone())).is_err() {
            return;
        }

        // Returns on an explicit shutdown or once the sender is dropped.
        let _ = shutdown_rx.recv();
        tracing::debug!("audio output stream closed");
    });

    let mixer = ready_rx
        .recv()
        .map_err(|_| PlaybackError::OutputThread)??;

    Ok((
        mixer,
        OutputThread {
            shutdown: Some(shutdown_tx),
            join: Some(join),
        },
    ))
}

impl Drop for OutputThread {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }
        if let Some(h) = self.join.take() {
            let _ = h.join();
        }
    }
}
