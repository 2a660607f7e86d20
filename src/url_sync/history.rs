//! In-memory browser history.

use super::History;

/// A session history stack with a cursor, like a browser tab's.
///
/// Pushing discards every entry after the cursor.
#[derive(Debug, Clone)]
pub struct MemoryHistory {
    entries: Vec<String>,
    cursor: usize,
}

impl MemoryHistory {
    /// Start with a single entry at `url` (path plus optional query).
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            entries: vec![url.into()],
            cursor: 0,
        }
    }

    /// Current location.
    pub fn url(&self) -> &str {
        &self.entries[self.cursor]
    }

    /// Number of entries, including ones ahead of the cursor.
    pub fn entry_count(&self) -> usize {
        self.entries.len()
    }

    /// The current location split at the query; fragments are dropped.
    fn parts(&self) -> (&str, &str) {
        let url = self.url();
        let url = url.split_once('#').map_or(url, |(before, _)| before);
        match url.find('?') {
            Some(pos) => url.split_at(pos),
            None => (url, ""),
        }
    }
}

impl History for MemoryHistory {
    fn pathname(&self) -> String {
        let path = self.parts().0;
        if path.is_empty() { "/".to_string() } else { path.to_string() }
    }

    fn search(&self) -> String {
        let search = self.parts().1;
        // A bare "?" has no query
        if search == "?" { String::new() } else { search.to_string() }
    }

    fn push_state(&mut self, url: &str) {
        self.entries.truncate(self.cursor + 1);
        self.entries.push(url.to_string());
        self.cursor += 1;
    }

    fn back(&mut self) -> bool {
        if self.cursor == 0 {
            return false;
        }
        self.cursor -= 1;
        true
    }

    fn forward(&mut self) -> bool {
        if self.cursor + 1 >= self.entries.len() {
            return false;
        }
        self.cursor += 1;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_location_parts() {
        let history = MemoryHistory::new("/watch?v=a&t=3#frag");
        assert_eq!(history.pathname(), "/watch");
        assert_eq!(history.search(), "?v=a&t=3");

        let bare = MemoryHistory::new("");
        assert_eq!(bare.pathname(), "/");
        assert_eq!(bare.search(), "");

        assert_eq!(MemoryHistory::new("/?").search(), "");
    }

    #[test]
    fn test_push_truncates_forward_entries() {
        let mut history = MemoryHistory::new("/");
        history.push_state("/?v=a");
        history.push_state("/?v=b");
        assert!(history.back());
        assert_eq!(history.url(), "/?v=a");

        history.push_state("/?v=c");
        assert_eq!(history.entry_count(), 3);
        assert!(!history.forward());
        assert_eq!(history.url(), "/?v=c");
    }
}
