//! Audio output.
//!
//! [`AudioBackend`] is the seam the transport drives; [`RodioBackend`] is the
//! production implementation on top of `rodio`.

mod backend;
mod player;
mod sink;
mod thread;

pub use backend::AudioBackend;
pub use player::RodioBackend;
