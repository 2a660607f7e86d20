//! Transport controller.
//!
//! Every command to the video player goes through [`TransportController`].
//! It applies navigation changes, then loads the player, keeps the progress
//! poll single, redraws the UI and pushes the new location.
//!
//! # Control Flow
//!
//! ```text
//! user command / player event
//!        │
//!        ▼
//! NavigationState ──► VideoPlayer (load/play/pause/seek/rate)
//!        │
//!        ├──► Poller (cancel before reschedule)
//!        ├──► UiSurface (labels, progress, playlist)
//!        └──► UrlSync (pushState, except on back/forward)
//! ```

mod poll;
mod progress;

pub use poll::Poller;
pub use progress::{Progress, format_time};

use crate::error::Result;
use crate::navigation::{Advance, EndedAction, NavigationState};
use crate::player::VideoPlayer;
use crate::playlist::{Playlist, Track};
use crate::ui::{UiSurface, render_playlist};
use crate::url_sync::{History, UrlSync};

/// Play/pause button label while paused.
pub const PLAY_LABEL: &str = "Play";
/// Play/pause button label while playing.
pub const PAUSE_LABEL: &str = "Pause";

/// Whether a track change should add a history entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum HistoryUpdate {
    Push,
    /// Back/forward navigation already moved the history
    Skip,
}

/// Mediates all interaction with the video player.
pub struct TransportController<P: VideoPlayer, U: UiSurface, H: History> {
    playlist: Playlist,
    nav: NavigationState,
    player: P,
    ui: U,
    url: UrlSync<H>,
    poller: Poller,
}

impl<P: VideoPlayer, U: UiSurface, H: History> TransportController<P, U, H> {
    pub fn new(
        playlist: Playlist,
        nav: NavigationState,
        player: P,
        ui: U,
        url: UrlSync<H>,
        poller: Poller,
    ) -> Self {
        Self {
            playlist,
            nav,
            player,
            ui,
            url,
            poller,
        }
    }

    // ========================================================================
    // User commands
    // ========================================================================

    /// Pause when playing, play otherwise.
    pub fn play_pause(&mut self) {
        if self.player.state().is_playing() {
            self.player.pause();
            self.ui.set_play_label(PLAY_LABEL);
        } else {
            self.player.play();
            self.ui.set_play_label(PAUSE_LABEL);
        }
    }

    pub fn next(&mut self) {
        match self.nav.advance() {
            Advance::Moved(_) => self.change_track(HistoryUpdate::Push),
            Advance::ReachedEnd => {
                tracing::info!(
                    "Reached the last track, no further progression without looping"
                );
            }
        }
    }

    pub fn prev(&mut self) {
        self.nav.retreat();
        self.change_track(HistoryUpdate::Push);
    }

    /// Seek to a slider position between 0 and 1.
    pub fn seek(&mut self, fraction: f64) {
        let fraction = if fraction.is_nan() { 0.0 } else { fraction.clamp(0.0, 1.0) };
        let seconds = fraction * self.player.duration();
        tracing::debug!("Seeking to {:.1}s", seconds);
        self.player.seek_to(seconds, true);
    }

    pub fn change_speed(&mut self) {
        let speed = self.nav.toggle_speed();
        self.player.set_playback_rate(speed.rate());
        self.ui.set_speed_label(speed.label());
    }

    pub fn toggle_loop(&mut self) {
        let mode = self.nav.cycle_loop_mode();
        self.ui.set_loop_label(mode.label());
    }

    /// Play the track at `index`.
    pub fn select_track(&mut self, index: usize) -> Result<()> {
        self.nav.jump_to(index)?;
        self.change_track(HistoryUpdate::Push);
        Ok(())
    }

    /// Move back one history entry and follow it.
    pub fn history_back(&mut self) -> bool {
        let moved = self.url.back();
        if moved {
            self.on_pop_state();
        }
        moved
    }

    /// Move forward one history entry and follow it.
    pub fn history_forward(&mut self) -> bool {
        let moved = self.url.forward();
        if moved {
            self.on_pop_state();
        }
        moved
    }

    // ========================================================================
    // Player and browser events
    // ========================================================================

    /// One-time setup once the player is ready.
    pub fn on_ready(&mut self) {
        self.ui.set_play_label(PLAY_LABEL);
        self.ui.set_loop_label(self.nav.loop_mode().label());
        self.ui.set_speed_label(self.nav.speed().label());
        self.start_polling();
        self.show_duration();
        self.render();
    }

    pub fn on_playing(&mut self) {
        self.show_duration();
        self.start_polling();
        self.ui.set_play_label(PAUSE_LABEL);
    }

    pub fn on_paused(&mut self) {
        self.ui.set_play_label(PLAY_LABEL);
        self.stop_polling();
    }

    pub fn on_playback_ended(&mut self) {
        match self.nav.on_playback_ended() {
            EndedAction::Replay => self.player.play(),
            EndedAction::Advance(_) | EndedAction::Wrap => {
                self.change_track(HistoryUpdate::Push)
            }
            EndedAction::Stop => {
                tracing::info!("Playlist ended, no looping");
            }
        }
        self.stop_polling();
        self.ui.set_play_label(PLAY_LABEL);
    }

    /// Follow the location after back/forward navigation.
    pub fn on_pop_state(&mut self) {
        let index = self.url.resolve(&self.playlist);
        if let Err(e) = self.nav.jump_to(index) {
            // resolve() only yields valid indices
            tracing::warn!("Ignoring history entry: {}", e);
            return;
        }
        self.change_track(HistoryUpdate::Skip);
    }

    /// Handle a tick from the poll task.
    pub fn on_poll_tick(&mut self, generation: u64) {
        if !self.poller.accepts(generation) {
            tracing::trace!("Dropping stale tick {}", generation);
            return;
        }
        self.refresh_progress();
    }

    // ========================================================================
    // Display
    // ========================================================================

    /// Read time and duration from the player and update the progress display.
    pub fn refresh_progress(&mut self) {
        let progress = Progress::new(self.player.current_time(), self.player.duration());
        self.ui.set_progress(&progress);
    }

    pub fn show_duration(&mut self) {
        self.ui.set_total_time(&format_time(self.player.duration()));
    }

    pub fn render(&mut self) {
        let entries = render_playlist(&self.playlist, self.nav.current_index());
        self.ui.render_playlist(&entries);
    }

    // ========================================================================
    // Internals
    // ========================================================================

    fn start_polling(&mut self) {
        self.poller.restart();
    }

    fn stop_polling(&mut self) {
        self.poller.cancel();
    }

    /// Load the current track and bring everything else in line.
    fn change_track(&mut self, history: HistoryUpdate) {
        self.stop_polling();
        let track = self.current_track().clone();
        tracing::info!(
            "Now playing {} ({}/{}): {}",
            track.id,
            self.nav.current_index() + 1,
            self.playlist.len(),
            track.title
        );
        self.player.load(&track.id);
        self.render();
        if history == HistoryUpdate::Push {
            self.url.reflect(&track);
        }
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    pub fn current_track(&self) -> &Track {
        // nav keeps current_index < playlist.len()
        &self.playlist.tracks()[self.nav.current_index()]
    }

    pub fn navigation(&self) -> &NavigationState {
        &self.nav
    }

    pub fn playlist(&self) -> &Playlist {
        &self.playlist
    }

    pub fn player(&self) -> &P {
        &self.player
    }

    pub fn ui(&self) -> &U {
        &self.ui
    }

    pub fn history(&self) -> &H {
        self.url.history()
    }

    pub fn is_polling(&self) -> bool {
        self.poller.is_active()
    }
}
