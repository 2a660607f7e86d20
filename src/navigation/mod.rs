//! Navigation state: current track, loop mode and playback speed.
//!
//! All index arithmetic lives here. The transport controller decides what to
//! do with the player once an index has moved.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Playback-repeat policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LoopMode {
    #[default]
    None,
    /// Repeat current track
    RepeatOne,
    /// Repeat entire playlist
    RepeatAll,
}

impl LoopMode {
    /// Next mode in the `None -> RepeatOne -> RepeatAll -> None` rotation.
    pub fn cycled(self) -> Self {
        match self {
            LoopMode::None => LoopMode::RepeatOne,
            LoopMode::RepeatOne => LoopMode::RepeatAll,
            LoopMode::RepeatAll => LoopMode::None,
        }
    }

    /// Label shown on the loop button.
    pub fn label(self) -> &'static str {
        match self {
            LoopMode::None => "No Looping",
            LoopMode::RepeatOne => "Loop current track",
            LoopMode::RepeatAll => "Loop playlist",
        }
    }
}

/// Playback speed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Speed {
    #[default]
    Normal,
    Fast,
}

impl Speed {
    pub fn rate(self) -> f64 {
        match self {
            Speed::Normal => 1.0,
            Speed::Fast => 1.5,
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Speed::Normal => Speed::Fast,
            Speed::Fast => Speed::Normal,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Speed::Normal => "1x",
            Speed::Fast => "1.5x",
        }
    }
}

/// Result of [`NavigationState::advance`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advance {
    /// Moved to this index
    Moved(usize),
    /// Last track of an unlooped playlist; nothing changed
    ReachedEnd,
}

/// What to do when the current track finishes playing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndedAction {
    /// Play the current track again
    Replay,
    /// Moved forward to this index
    Advance(usize),
    /// Wrapped from the last track back to index 0
    Wrap,
    /// End of an unlooped playlist
    Stop,
}

/// Navigation state for one session.
///
/// Invariant: `current < len`, and `len >= 1`.
#[derive(Debug, Clone)]
pub struct NavigationState {
    current: usize,
    len: usize,
    loop_mode: LoopMode,
    speed: Speed,
}

impl NavigationState {
    /// Create a state over a playlist of `len` tracks, starting at `start`.
    pub fn new(len: usize, start: usize) -> Result<Self> {
        if len == 0 {
            return Err(Error::EmptyPlaylist);
        }
        if start >= len {
            return Err(Error::out_of_range(start, len));
        }
        Ok(Self {
            current: start,
            len,
            loop_mode: LoopMode::None,
            speed: Speed::Normal,
        })
    }

    pub fn with_loop_mode(mut self, mode: LoopMode) -> Self {
        self.loop_mode = mode;
        self
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn loop_mode(&self) -> LoopMode {
        self.loop_mode
    }

    pub fn speed(&self) -> Speed {
        self.speed
    }

    pub fn is_at_last(&self) -> bool {
        self.current == self.len - 1
    }

    /// Move to the next track.
    ///
    /// Wraps only when a loop mode is active; at the end of an unlooped
    /// playlist the index is left alone.
    pub fn advance(&mut self) -> Advance {
        if self.loop_mode != LoopMode::None || !self.is_at_last() {
            self.current = (self.current + 1) % self.len;
            Advance::Moved(self.current)
        } else {
            Advance::ReachedEnd
        }
    }

    /// Move to the previous track, always wrapping from 0 to the last index.
    pub fn retreat(&mut self) -> usize {
        self.current = (self.current + self.len - 1) % self.len;
        self.current
    }

    /// Jump directly to `index`.
    pub fn jump_to(&mut self, index: usize) -> Result<()> {
        if index >= self.len {
            return Err(Error::out_of_range(index, self.len));
        }
        self.current = index;
        Ok(())
    }

    pub fn cycle_loop_mode(&mut self) -> LoopMode {
        self.loop_mode = self.loop_mode.cycled();
        self.loop_mode
    }

    pub fn toggle_speed(&mut self) -> Speed {
        self.speed = self.speed.toggled();
        self.speed
    }

    /// Transition taken when the player reports the current track ended.
    pub fn on_playback_ended(&mut self) -> EndedAction {
        match (self.loop_mode, self.is_at_last()) {
            (LoopMode::RepeatOne, _) => EndedAction::Replay,
            (LoopMode::RepeatAll, true) => {
                self.current = 0;
                EndedAction::Wrap
            }
            (LoopMode::None, true) => EndedAction::Stop,
            (LoopMode::RepeatAll, false) | (LoopMode::None, false) => {
                self.current += 1;
                EndedAction::Advance(self.current)
            }
        }
    }
}
