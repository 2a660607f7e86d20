//! UI rendering.
//!
//! The controller never draws anything itself. It pushes labels, progress
//! and the playlist into a [`UiSurface`]; what the surface does with them is
//! up to the host (the CLI prints them to the terminal).

mod render;
mod terminal;

pub use render::{PlaylistEntry, render_playlist};
pub use terminal::TerminalSurface;

use crate::transport::Progress;

/// The set of controls the front-end exposes.
pub trait UiSurface {
    /// Play/pause button label ("Play" or "Pause").
    fn set_play_label(&mut self, label: &str);

    /// Loop button label.
    fn set_loop_label(&mut self, label: &str);

    /// Speed button label.
    fn set_speed_label(&mut self, label: &str);

    /// Playlist header, e.g. "3 songs".
    fn set_track_count(&mut self, label: &str);

    /// Seek slider position and both time labels.
    fn set_progress(&mut self, progress: &Progress);

    /// Total-time label alone.
    fn set_total_time(&mut self, label: &str);

    /// Replace the playlist display.
    fn render_playlist(&mut self, entries: &[PlaylistEntry]);
}
