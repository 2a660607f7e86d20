//! Player state and lifecycle event types.

/// Playback state reported by the video player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlayerState {
    #[default]
    Unstarted,
    Ended,
    Playing,
    Paused,
    Buffering,
    /// Loaded but not started
    Cued,
}

impl PlayerState {
    pub fn is_playing(self) -> bool {
        self == PlayerState::Playing
    }
}

/// Lifecycle callbacks emitted by the video player.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerEvent {
    /// The player finished initializing and accepts commands
    Ready,
    /// Playback state changed
    StateChanged(PlayerState),
}
