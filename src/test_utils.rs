//! Test utilities and fixtures for vidlist tests.
//!
//! Provides a three-track sample playlist, a [`MockPlayer`] that records the
//! commands it receives, and a [`RecordingSurface`] that records what the
//! controller asked the UI to show.
//!
//! # Example
//!
//! ```ignore
//! use crate::test_utils::{MockPlayer, RecordingSurface, sample_playlist};
//!
//! let mut c = TransportController::new(sample_playlist(), nav, MockPlayer::new(), ...);
//! c.next();
//! assert_eq!(c.player().loads(), vec!["b"]);
//! ```

use std::cell::{Cell, RefCell};

use crate::player::{PlayerState, VideoPlayer};
use crate::playlist::{Playlist, Track};
use crate::transport::Progress;
use crate::ui::{PlaylistEntry, UiSurface};

/// Playlist `[a: "A", b: "B", c: "C"]`.
pub fn sample_playlist() -> Playlist {
    Playlist::new(vec![
        Track::new("a", "A"),
        Track::new("b", "B"),
        Track::new("c", "C"),
    ])
    .expect("sample playlist is not empty")
}

/// A command received by [`MockPlayer`].
#[derive(Debug, Clone, PartialEq)]
pub enum PlayerCall {
    Load(String),
    Play,
    Pause,
    SeekTo(f64, bool),
    SetRate(f64),
}

/// Video player that records commands and reports whatever state and times
/// the test sets. It never emits events on its own.
#[derive(Debug, Default)]
pub struct MockPlayer {
    calls: RefCell<Vec<PlayerCall>>,
    state: Cell<PlayerState>,
    current_time: Cell<f64>,
    duration: Cell<f64>,
    cued: Option<String>,
}

impl MockPlayer {
    pub fn new() -> Self {
        Self::default()
    }

    /// A player created with an initial track, like the real widget.
    pub fn cued(id: &str) -> Self {
        let player = Self {
            cued: Some(id.to_string()),
            ..Self::default()
        };
        player.state.set(PlayerState::Cued);
        player
    }

    pub fn cued_id(&self) -> Option<String> {
        self.cued.clone()
    }

    pub fn calls(&self) -> Vec<PlayerCall> {
        self.calls.borrow().clone()
    }

    /// Ids passed to `load`, in order.
    pub fn loads(&self) -> Vec<String> {
        self.calls
            .borrow()
            .iter()
            .filter_map(|call| match call {
                PlayerCall::Load(id) => Some(id.clone()),
                _ => None,
            })
            .collect()
    }

    pub fn set_state(&self, state: PlayerState) {
        self.state.set(state);
    }

    pub fn set_times(&self, current_time: f64, duration: f64) {
        self.current_time.set(current_time);
        self.duration.set(duration);
    }

    fn record(&self, call: PlayerCall) {
        self.calls.borrow_mut().push(call);
    }
}

impl VideoPlayer for MockPlayer {
    fn load(&mut self, id: &str) {
        self.record(PlayerCall::Load(id.to_string()));
    }

    fn play(&mut self) {
        self.record(PlayerCall::Play);
    }

    fn pause(&mut self) {
        self.record(PlayerCall::Pause);
    }

    fn seek_to(&mut self, seconds: f64, allow_seek_ahead: bool) {
        self.record(PlayerCall::SeekTo(seconds, allow_seek_ahead));
    }

    fn current_time(&self) -> f64 {
        self.current_time.get()
    }

    fn duration(&self) -> f64 {
        self.duration.get()
    }

    fn state(&self) -> PlayerState {
        self.state.get()
    }

    fn set_playback_rate(&mut self, rate: f64) {
        self.record(PlayerCall::SetRate(rate));
    }
}

/// An update received by [`RecordingSurface`].
#[derive(Debug, Clone, PartialEq)]
pub enum SurfaceCall {
    PlayLabel(String),
    LoopLabel(String),
    SpeedLabel(String),
    TrackCount(String),
    Progress(Progress),
    TotalTime(String),
    Playlist(Vec<PlaylistEntry>),
}

/// UI surface that records every update.
#[derive(Debug, Default)]
pub struct RecordingSurface {
    calls: Vec<SurfaceCall>,
}

impl RecordingSurface {
    pub fn calls(&self) -> &[SurfaceCall] {
        &self.calls
    }

    pub fn count(&self, pred: impl Fn(&SurfaceCall) -> bool) -> usize {
        self.calls.iter().filter(|call| pred(call)).count()
    }

    /// Most recent play/pause label.
    pub fn play_label(&self) -> Option<&str> {
        self.calls.iter().rev().find_map(|call| match call {
            SurfaceCall::PlayLabel(label) => Some(label.as_str()),
            _ => None,
        })
    }

    /// Active row of the most recent playlist render.
    pub fn active_index(&self) -> Option<usize> {
        self.calls.iter().rev().find_map(|call| match call {
            SurfaceCall::Playlist(entries) => entries.iter().find(|e| e.active).map(|e| e.index),
            _ => None,
        })
    }

    pub fn last_progress(&self) -> Option<&Progress> {
        self.calls.iter().rev().find_map(|call| match call {
            SurfaceCall::Progress(progress) => Some(progress),
            _ => None,
        })
    }
}

impl UiSurface for RecordingSurface {
    fn set_play_label(&mut self, label: &str) {
        self.calls.push(SurfaceCall::PlayLabel(label.to_string()));
    }

    fn set_loop_label(&mut self, label: &str) {
        self.calls.push(SurfaceCall::LoopLabel(label.to_string()));
    }

    fn set_speed_label(&mut self, label: &str) {
        self.calls.push(SurfaceCall::SpeedLabel(label.to_string()));
    }

    fn set_track_count(&mut self, label: &str) {
        self.calls.push(SurfaceCall::TrackCount(label.to_string()));
    }

    fn set_progress(&mut self, progress: &Progress) {
        self.calls.push(SurfaceCall::Progress(progress.clone()));
    }

    fn set_total_time(&mut self, label: &str) {
        self.calls.push(SurfaceCall::TotalTime(label.to_string()));
    }

    fn render_playlist(&mut self, entries: &[PlaylistEntry]) {
        self.calls.push(SurfaceCall::Playlist(entries.to_vec()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_playlist() {
        let playlist = sample_playlist();
        assert_eq!(playlist.len(), 3);
        assert_eq!(playlist.tracks()[2], Track::new("c", "C"));
    }

    #[test]
    fn test_mock_player_records_commands() {
        let mut player = MockPlayer::cued("a");
        assert_eq!(player.state(), PlayerState::Cued);
        player.load("b");
        player.seek_to(3.0, true);
        assert_eq!(player.loads(), vec!["b"]);
        assert_eq!(player.calls().len(), 2);
    }

    #[test]
    fn test_recording_surface_queries() {
        let mut surface = RecordingSurface::default();
        surface.set_play_label("Play");
        surface.set_play_label("Pause");
        assert_eq!(surface.play_label(), Some("Pause"));
        assert!(surface.active_index().is_none());
        assert!(surface.last_progress().is_none());
    }
}
