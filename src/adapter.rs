//! Player event adapter.
//!
//! Translates the video player's lifecycle callbacks into transport
//! controller actions. The only state kept here is whether the one-time
//! `Ready` wiring has happened.

use crate::player::{PlayerEvent, PlayerState, VideoPlayer};
use crate::transport::TransportController;
use crate::ui::UiSurface;
use crate::url_sync::History;

#[derive(Debug, Default)]
pub struct PlayerEventAdapter {
    wired: bool,
}

impl PlayerEventAdapter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the player has reported ready and the UI listeners are live.
    pub fn is_wired(&self) -> bool {
        self.wired
    }

    pub fn handle<P: VideoPlayer, U: UiSurface, H: History>(
        &mut self,
        event: PlayerEvent,
        controller: &mut TransportController<P, U, H>,
    ) {
        match event {
            PlayerEvent::Ready => {
                if self.wired {
                    tracing::debug!("Duplicate ready event ignored");
                    return;
                }
                self.wired = true;
                tracing::info!("Player ready");
                controller.on_ready();
            }
            PlayerEvent::StateChanged(PlayerState::Playing) => controller.on_playing(),
            PlayerEvent::StateChanged(PlayerState::Paused) => controller.on_paused(),
            PlayerEvent::StateChanged(PlayerState::Ended) => controller.on_playback_ended(),
            PlayerEvent::StateChanged(other) => {
                tracing::debug!("Player state {:?}", other);
            }
        }
    }
}
