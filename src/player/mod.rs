//! The external video player capability.
//!
//! The player widget is opaque: it buffers, decodes and renders on its own.
//! This module only describes the commands we can send it and the callbacks
//! it emits. Hosts implement [`VideoPlayer`] and report lifecycle changes
//! through an [`EventSink`](crate::session::EventSink).
//!
//! [`SimulatedPlayer`] is a headless host driven by a virtual clock, used by
//! the CLI session.

mod simulated;
mod state;

pub use simulated::SimulatedPlayer;
pub use state::{PlayerEvent, PlayerState};

/// Commands understood by the embedded video player.
///
/// Times are in seconds. Commands are fire-and-forget; their effect shows up
/// later as [`PlayerEvent::StateChanged`] callbacks.
pub trait VideoPlayer {
    /// Load a track by id and start playing it.
    fn load(&mut self, id: &str);

    /// Start or resume playback.
    fn play(&mut self);

    /// Pause playback.
    fn pause(&mut self);

    /// Seek to an absolute position. `allow_seek_ahead` permits seeking into
    /// a region that has not been buffered yet.
    fn seek_to(&mut self, seconds: f64, allow_seek_ahead: bool);

    /// Current playback position.
    fn current_time(&self) -> f64;

    /// Duration of the loaded track, 0 when unknown.
    fn duration(&self) -> f64;

    fn state(&self) -> PlayerState;

    fn set_playback_rate(&mut self, rate: f64);
}
