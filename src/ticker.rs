//! Background repaint loop.
//!
//! The ticker samples the transport on a fixed cadence and redraws the frame
//! while a track plays. It stops on its own once the transport leaves
//! Playing/Paused; there is no separate cancellation signal.

use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use crate::render::Screen;
use crate::transport::{Transport, TransportState};

/// Coalescing state: what was last drawn, and when.
#[derive(Debug, Default, Clone, Copy)]
pub struct TickState {
    last_position: Option<f64>,
    last_update: Option<Instant>,
}

impl TickState {
    /// Redraw only when the position moved, is still within the track and a
    /// full interval has passed since the previous redraw.
    pub fn should_render(&self, position: f64, duration: f64, now: Instant, interval: Duration) -> bool {
        if self.last_position == Some(position) || position > duration {
            return false;
        }
        self.last_update
            .is_none_or(|at| now.saturating_duration_since(at) >= interval)
    }

    pub fn record(&mut self, position: f64, now: Instant) {
        self.last_position = Some(position);
        self.last_update = Some(now);
    }
}

/// Start the repaint loop for the track that was just loaded.
///
/// Join the handle after `Transport::stop` so two tickers never draw over each
/// other across a track change.
pub fn spawn(transport: Arc<Transport>, screen: Arc<Screen>, interval: Duration) -> JoinHandle<()> {
    thread::spawn(move || {
        let mut tick = TickState::default();
        let mut reported_end = false;

        loop {
            let status = transport.status();
            match status.state {
                TransportState::Playing => {
                    let now = Instant::now();
                    if tick.should_render(status.position, status.duration, now, interval) {
                        if let Err(e) = screen.repaint(&transport) {
                            tracing::warn!(error = %e, "progress repaint failed");
                        }
                        tick.record(status.position, now);
                    }

                    if !reported_end && !transport.is_audio_busy() {
                        // Advancing is left to the user.
                        tracing::debug!(position = status.position, "track finished; waiting for a keystroke");
                        reported_end = true;
                    }
                }
                // The pause keystroke draws its own frame.
                TransportState::Paused => {}
                TransportState::Idle | TransportState::Stopped => break,
            }
            thread::sleep(interval);
        }
    })
}
