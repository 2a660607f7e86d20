//! Address-bar synchronization.
//!
//! The current track is mirrored into the `v` query parameter of the page
//! location. Navigation pushes a new history entry; back/forward navigation
//! goes the other way and re-derives the track from the location without
//! pushing anything.

mod history;

pub use history::MemoryHistory;

use crate::playlist::{Playlist, Track};

/// Query parameter carrying the track id.
pub const TRACK_PARAM: &str = "v";

/// Browser history and location.
pub trait History {
    /// Path part of the current location, e.g. `/watch`.
    fn pathname(&self) -> String;

    /// Query part of the current location including the leading `?`, or
    /// an empty string.
    fn search(&self) -> String;

    /// Add a history entry for `url` without reloading.
    fn push_state(&mut self, url: &str);

    /// Go back one entry. Returns false when already at the oldest entry.
    fn back(&mut self) -> bool;

    /// Go forward one entry. Returns false when already at the newest entry.
    fn forward(&mut self) -> bool;
}

/// Extract the track id from a query string such as `?v=abc&t=10`.
///
/// Returns `None` when the parameter is missing, empty or not valid UTF-8
/// after decoding.
pub fn track_id_from_query(search: &str) -> Option<String> {
    search
        .trim_start_matches('?')
        .split('&')
        .filter_map(|pair| pair.split_once('=').or(Some((pair, ""))))
        .find(|(key, _)| *key == TRACK_PARAM)
        .and_then(|(_, value)| {
            let value = value.replace('+', " ");
            urlencoding::decode(&value).ok().map(|v| v.into_owned())
        })
        .filter(|id| !id.is_empty())
}

/// Index of the track named by the query, falling back to 0 when the id is
/// absent or not in the playlist.
pub fn resolve_index(playlist: &Playlist, search: &str) -> usize {
    track_id_from_query(search)
        .and_then(|id| playlist.index_of(&id))
        .unwrap_or(0)
}

/// `<pathname>?v=<id>` for a track.
pub fn track_url(pathname: &str, track_id: &str) -> String {
    format!("{}?{}={}", pathname, TRACK_PARAM, urlencoding::encode(track_id))
}

/// Keeps a [`History`] in step with navigation.
pub struct UrlSync<H: History> {
    history: H,
}

impl<H: History> UrlSync<H> {
    pub fn new(history: H) -> Self {
        Self { history }
    }

    /// Track index the current location points at.
    pub fn resolve(&self, playlist: &Playlist) -> usize {
        resolve_index(playlist, &self.history.search())
    }

    /// Push a history entry for `track`.
    pub fn reflect(&mut self, track: &Track) {
        let url = track_url(&self.history.pathname(), &track.id);
        tracing::debug!("pushState {}", url);
        self.history.push_state(&url);
    }

    pub fn back(&mut self) -> bool {
        self.history.back()
    }

    pub fn forward(&mut self) -> bool {
        self.history.forward()
    }

    pub fn history(&self) -> &H {
        &self.history
    }
}
