//! Application-wide error types.
//!
//! Library modules return [`Error`] through the [`Result`] alias, while
//! CLI/main uses `anyhow` for convenient error propagation.
//!
//! # Example
//!
//! ```ignore
//! use vidlist::error::{Error, Result};
//!
//! fn open(path: &Path) -> Result<Playlist> {
//!     let text = std::fs::read_to_string(path)?; // IO errors auto-convert
//!     Playlist::from_json(&text)                 // JSON errors auto-convert
//! }
//! ```

use std::path::PathBuf;

/// Application-wide result type.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level application error.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A track index outside `[0, len)` was requested
    #[error("Track index {index} is out of range for a playlist of {len}")]
    OutOfRange { index: usize, len: usize },

    /// A playlist must hold at least one track
    #[error("Playlist is empty")]
    EmptyPlaylist,

    /// File I/O error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Playlist data could not be parsed
    #[error("Invalid playlist data: {0}")]
    Json(#[from] serde_json::Error),

    /// Playlist file was not found
    #[error("File not found: {0}")]
    NotFound(PathBuf),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// A user command could not be parsed
    #[error("Invalid command: {0}")]
    InvalidCommand(String),

    /// Generic error with context
    #[error("{context}: {source}")]
    WithContext {
        context: String,
        #[source]
        source: Box<Error>,
    },
}

impl Error {
    /// Create an out-of-range error.
    pub fn out_of_range(index: usize, len: usize) -> Self {
        Self::OutOfRange { index, len }
    }

    /// Create a not found error.
    pub fn not_found(path: impl Into<PathBuf>) -> Self {
        Self::NotFound(path.into())
    }

    /// Create a config error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create an invalid command error.
    pub fn invalid_command(message: impl Into<String>) -> Self {
        Self::InvalidCommand(message.into())
    }

    /// Add context to an error.
    pub fn context(self, ctx: impl Into<String>) -> Self {
        Self::WithContext {
            context: ctx.into(),
            source: Box::new(self),
        }
    }
}

/// Extension trait for adding context to Results.
pub trait ResultExt<T> {
    /// Add context to an error result.
    fn with_context(self, ctx: impl Into<String>) -> Result<T>;
}

impl<T> ResultExt<T> for Result<T> {
    fn with_context(self, ctx: impl Into<String>) -> Result<T> {
        self.map_err(|e| e.context(ctx))
    }
}

impl<T> ResultExt<T> for std::result::Result<T, std::io::Error> {
    fn with_context(self, ctx: impl Into<String>) -> Result<T> {
        self.map_err(|e| Error::Io(e).context(ctx))
    }
}

impl<T> ResultExt<T> for std::result::Result<T, serde_json::Error> {
    fn with_context(self, ctx: impl Into<String>) -> Result<T> {
        self.map_err(|e| Error::Json(e).context(ctx))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_out_of_range_display() {
        let err = Error::out_of_range(7, 3);
        let msg = err.to_string();
        assert!(msg.contains('7'));
        assert!(msg.contains('3'));
    }

    #[test]
    fn test_error_with_context() {
        let err = Error::EmptyPlaylist.context("while loading playlist.json");
        let msg = err.to_string();
        assert!(msg.contains("while loading playlist.json"));
        assert!(msg.contains("empty"));
    }

    #[test]
    fn test_not_found_error() {
        let err = Error::not_found("/videos/list.json");
        assert!(err.to_string().contains("list.json"));
    }

    #[test]
    fn test_result_ext() {
        let result: Result<()> = Err(Error::config("bad value"));
        let with_ctx = result.with_context("additional context");
        assert!(with_ctx.unwrap_err().to_string().contains("additional context"));
    }

    #[test]
    fn test_json_result_ext() {
        let result: std::result::Result<Vec<u8>, serde_json::Error> = serde_json::from_str("{");
        let err = result.with_context("parsing playlist").unwrap_err();
        assert!(matches!(err, Error::WithContext { .. }));
    }
}
