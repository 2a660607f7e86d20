//! Playlist display model.

use crate::playlist::Playlist;

/// One row of the playlist display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaylistEntry {
    /// Position in the playlist; selecting the row selects this index
    pub index: usize,
    pub title: String,
    /// Marks the current track
    pub active: bool,
}

/// Build the playlist display from the playlist and the current index.
pub fn render_playlist(playlist: &Playlist, current_index: usize) -> Vec<PlaylistEntry> {
    playlist
        .tracks()
        .iter()
        .enumerate()
        .map(|(index, track)| PlaylistEntry {
            index,
            title: track.title.clone(),
            active: index == current_index,
        })
        .collect()
}
