//! Playlist store.
//!
//! An immutable, non-empty, ordered list of [`Track`]s loaded once at
//! startup. Tracks are addressed by position or by their external id.

use serde::Deserialize;
use std::path::Path;

use crate::error::{Error, Result, ResultExt};

/// Playlist bundled into the binary, used when no playlist file is configured.
const BUNDLED_PLAYLIST: &str = include_str!("../../assets/playlist.json");

/// One playable item.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Track {
    /// External identifier understood by the video player
    pub id: String,
    /// Display title
    pub title: String,
}

impl Track {
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
        }
    }
}

/// Ordered sequence of tracks. Never empty.
#[derive(Debug, Clone)]
pub struct Playlist {
    tracks: Vec<Track>,
}

impl Playlist {
    /// Build a playlist, rejecting an empty track list.
    pub fn new(tracks: Vec<Track>) -> Result<Self> {
        if tracks.is_empty() {
            return Err(Error::EmptyPlaylist);
        }
        Ok(Self { tracks })
    }

    /// Parse a JSON array of `{ "id": ..., "title": ... }` records.
    pub fn from_json(json: &str) -> Result<Self> {
        let tracks: Vec<Track> = serde_json::from_str(json)?;
        Self::new(tracks)
    }

    /// Load a playlist from a JSON file.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(Error::not_found(path));
        }
        let json = std::fs::read_to_string(path)
            .with_context(format!("reading playlist {}", path.display()))?;
        let playlist = Self::from_json(&json)
            .with_context(format!("parsing playlist {}", path.display()))?;
        tracing::info!("Loaded {} tracks from {:?}", playlist.len(), path);
        Ok(playlist)
    }

    /// The playlist shipped with the binary.
    pub fn bundled() -> Result<Self> {
        Self::from_json(BUNDLED_PLAYLIST).with_context("parsing bundled playlist")
    }

    /// Load from `path` when given, otherwise fall back to the bundled playlist.
    pub fn load_or_bundled(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Self::bundled(),
        }
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    /// Never true for a constructed playlist.
    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    /// Position of the track with the given id, if any.
    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.tracks.iter().position(|t| t.id == id)
    }

    /// "1 song" / "N songs" label for the playlist header.
    pub fn count_label(&self) -> String {
        let n = self.tracks.len();
        format!("{} {}", n, if n > 1 { "songs" } else { "song" })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::sample_playlist;

    #[test]
    fn test_empty_playlist_rejected() {
        assert!(matches!(Playlist::new(vec![]), Err(Error::EmptyPlaylist)));
        assert!(matches!(Playlist::from_json("[]"), Err(Error::EmptyPlaylist)));
    }

    #[test]
    fn test_lookup_by_index_and_id() {
        let playlist = sample_playlist();
        assert_eq!(playlist.len(), 3);
        assert_eq!(playlist.tracks()[1].title, "B");
        assert_eq!(playlist.index_of("c"), Some(2));
        assert_eq!(playlist.index_of("z"), None);
    }

    #[test]
    fn test_from_json() {
        let json = r#"[{"id":"x1","title":"First"},{"id":"x2","title":"Second"}]"#;
        let playlist = Playlist::from_json(json).unwrap();
        assert_eq!(playlist.tracks()[0], Track::new("x1", "First"));
        assert_eq!(playlist.tracks()[1].id, "x2");
    }

    #[test]
    fn test_from_json_rejects_missing_title() {
        let err = Playlist::from_json(r#"[{"id":"x1"}]"#).unwrap_err();
        assert!(matches!(err, Error::Json(_)));
    }

    #[test]
    fn test_count_label() {
        assert_eq!(sample_playlist().count_label(), "3 songs");
        let single = Playlist::new(vec![Track::new("a", "A")]).unwrap();
        assert_eq!(single.count_label(), "1 song");
    }

    #[test]
    fn test_bundled_playlist_parses() {
        let playlist = Playlist::bundled().unwrap();
        assert!(!playlist.is_empty());
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("list.json");
        std::fs::write(&path, r#"[{"id":"a","title":"A"}]"#).unwrap();

        let playlist = Playlist::load(&path).unwrap();
        assert_eq!(playlist.len(), 1);

        let missing = dir.path().join("missing.json");
        assert!(matches!(Playlist::load(&missing), Err(Error::NotFound(_))));
    }
}
