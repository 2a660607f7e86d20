//! Headless video player driven by a virtual clock.
//!
//! Every track "plays" for a fixed number of seconds. Position advances with
//! wall time scaled by the playback rate, and an end timer reports
//! [`PlayerState::Ended`] when the track runs out.

use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::Instant;

use super::{PlayerEvent, PlayerState, VideoPlayer};
use crate::session::EventSink;

/// Clock shared with the end timer task.
#[derive(Debug)]
struct Clock {
    state: PlayerState,
    track_id: String,
    /// Position at `anchor`
    position: f64,
    /// Set while playing
    anchor: Option<Instant>,
    rate: f64,
    duration: f64,
    /// Bumped whenever a pending end timer becomes invalid
    generation: u64,
}

impl Clock {
    fn position(&self) -> f64 {
        let elapsed = self
            .anchor
            .map(|a| a.elapsed().as_secs_f64() * self.rate)
            .unwrap_or(0.0);
        (self.position + elapsed).min(self.duration)
    }

    /// Fold elapsed time into `position` and re-anchor.
    fn settle(&mut self) {
        self.position = self.position();
        if self.anchor.is_some() {
            self.anchor = Some(Instant::now());
        }
    }
}

/// A [`VideoPlayer`] that needs no display or network.
pub struct SimulatedPlayer {
    clock: Arc<Mutex<Clock>>,
    events: EventSink,
    end_timer: Option<JoinHandle<()>>,
}

impl SimulatedPlayer {
    /// Create a player cued on `initial_id`. Emits [`PlayerEvent::Ready`].
    ///
    /// Must be called from within a tokio runtime.
    pub fn new(initial_id: &str, track_seconds: f64, events: EventSink) -> Self {
        let clock = Clock {
            state: PlayerState::Cued,
            track_id: initial_id.to_string(),
            position: 0.0,
            anchor: None,
            rate: 1.0,
            duration: track_seconds.max(0.0),
            generation: 0,
        };
        tracing::debug!("Simulated player cued on {}", initial_id);
        events.player(PlayerEvent::Ready);
        Self {
            clock: Arc::new(Mutex::new(clock)),
            events,
            end_timer: None,
        }
    }

    /// Id of the loaded track.
    pub fn track_id(&self) -> String {
        self.clock.lock().track_id.clone()
    }

    fn cancel_end_timer(&mut self) {
        if let Some(timer) = self.end_timer.take() {
            timer.abort();
        }
        self.clock.lock().generation += 1;
    }

    /// (Re)arm the end timer for the remaining play time.
    fn schedule_end(&mut self) {
        self.cancel_end_timer();

        let (remaining, generation) = {
            let clock = self.clock.lock();
            let remaining = (clock.duration - clock.position()).max(0.0) / clock.rate;
            (remaining, clock.generation)
        };

        let clock = Arc::clone(&self.clock);
        let events = self.events.clone();
        self.end_timer = Some(tokio::spawn(async move {
            tokio::time::sleep(Duration::from_secs_f64(remaining)).await;
            {
                let mut clock = clock.lock();
                if clock.generation != generation || clock.state != PlayerState::Playing {
                    return;
                }
                clock.position = clock.duration;
                clock.anchor = None;
                clock.state = PlayerState::Ended;
            }
            events.player(PlayerEvent::StateChanged(PlayerState::Ended));
        }));
    }

    fn start_playing(&mut self) {
        {
            let mut clock = self.clock.lock();
            clock.state = PlayerState::Playing;
            clock.anchor = Some(Instant::now());
        }
        self.events
            .player(PlayerEvent::StateChanged(PlayerState::Playing));
        self.schedule_end();
    }
}

impl VideoPlayer for SimulatedPlayer {
    fn load(&mut self, id: &str) {
        self.cancel_end_timer();
        {
            let mut clock = self.clock.lock();
            clock.track_id = id.to_string();
            clock.position = 0.0;
            clock.anchor = None;
        }
        tracing::debug!("Loading {}", id);
        self.start_playing();
    }

    fn play(&mut self) {
        {
            let mut clock = self.clock.lock();
            match clock.state {
                PlayerState::Playing => return,
                // Playing after the end restarts the track
                PlayerState::Ended => clock.position = 0.0,
                _ => {}
            }
        }
        self.start_playing();
    }

    fn pause(&mut self) {
        {
            let mut clock = self.clock.lock();
            if clock.state != PlayerState::Playing {
                return;
            }
            clock.settle();
            clock.anchor = None;
            clock.state = PlayerState::Paused;
        }
        self.cancel_end_timer();
        self.events
            .player(PlayerEvent::StateChanged(PlayerState::Paused));
    }

    fn seek_to(&mut self, seconds: f64, _allow_seek_ahead: bool) {
        let playing = {
            let mut clock = self.clock.lock();
            clock.position = seconds.clamp(0.0, clock.duration);
            if clock.anchor.is_some() {
                clock.anchor = Some(Instant::now());
            }
            clock.state == PlayerState::Playing
        };
        if playing {
            self.schedule_end();
        }
    }

    fn current_time(&self) -> f64 {
        self.clock.lock().position()
    }

    fn duration(&self) -> f64 {
        self.clock.lock().duration
    }

    fn state(&self) -> PlayerState {
        self.clock.lock().state
    }

    fn set_playback_rate(&mut self, rate: f64) {
        if !(rate > 0.0) {
            tracing::warn!("Ignoring unsupported playback rate {}", rate);
            return;
        }
        let playing = {
            let mut clock = self.clock.lock();
            clock.settle();
            clock.rate = rate;
            clock.state == PlayerState::Playing
        };
        if playing {
            self.schedule_end();
        }
    }
}

impl Drop for SimulatedPlayer {
    fn drop(&mut self) {
        if let Some(timer) = self.end_timer.take() {
            timer.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::SessionEvent;
    use tokio::sync::mpsc;

    fn player(seconds: f64) -> (SimulatedPlayer, mpsc::UnboundedReceiver<SessionEvent>) {
        let (sink, rx) = EventSink::channel();
        (SimulatedPlayer::new("a", seconds, sink), rx)
    }

    fn drain(rx: &mut mpsc::UnboundedReceiver<SessionEvent>) -> Vec<PlayerEvent> {
        let mut events = Vec::new();
        while let Ok(event) = rx.try_recv() {
            if let SessionEvent::Player(e) = event {
                events.push(e);
            }
        }
        events
    }

    #[tokio::test(start_paused = true)]
    async fn test_ready_then_cued() {
        let (player, mut rx) = player(10.0);
        assert_eq!(drain(&mut rx), vec![PlayerEvent::Ready]);
        assert_eq!(player.state(), PlayerState::Cued);
        assert_eq!(player.track_id(), "a");
        assert_eq!(player.current_time(), 0.0);
        assert_eq!(player.duration(), 10.0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_position_advances_with_rate() {
        let (mut player, mut rx) = player(60.0);
        player.play();
        tokio::time::advance(Duration::from_secs(4)).await;
        assert!((player.current_time() - 4.0).abs() < 0.01);

        player.set_playback_rate(1.5);
        tokio::time::advance(Duration::from_secs(2)).await;
        assert!((player.current_time() - 7.0).abs() < 0.01);

        player.pause();
        tokio::time::advance(Duration::from_secs(5)).await;
        assert!((player.current_time() - 7.0).abs() < 0.01);
        assert_eq!(
            drain(&mut rx),
            vec![
                PlayerEvent::Ready,
                PlayerEvent::StateChanged(PlayerState::Playing),
                PlayerEvent::StateChanged(PlayerState::Paused),
            ]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_reports_ended() {
        let (mut player, mut rx) = player(3.0);
        player.load("b");
        tokio::time::sleep(Duration::from_secs(4)).await;

        assert_eq!(player.state(), PlayerState::Ended);
        assert_eq!(player.track_id(), "b");
        let events = drain(&mut rx);
        assert_eq!(
            events.last(),
            Some(&PlayerEvent::StateChanged(PlayerState::Ended))
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_seek_clamps_and_replay_restarts() {
        let (mut player, _rx) = player(10.0);
        player.seek_to(99.0, true);
        assert_eq!(player.current_time(), 10.0);

        player.play();
        tokio::time::sleep(Duration::from_millis(10)).await;
        assert_eq!(player.state(), PlayerState::Ended);

        player.play();
        assert_eq!(player.state(), PlayerState::Playing);
        assert!(player.current_time() < 1.0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_load_cancels_pending_end() {
        let (mut player, mut rx) = player(5.0);
        player.play();
        tokio::time::advance(Duration::from_secs(4)).await;
        player.load("c");
        tokio::time::sleep(Duration::from_secs(2)).await;

        assert_eq!(player.state(), PlayerState::Playing);
        assert!(
            !drain(&mut rx).contains(&PlayerEvent::StateChanged(PlayerState::Ended))
        );
    }
}
