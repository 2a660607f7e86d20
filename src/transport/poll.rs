//! The progress poll task.
//!
//! The task itself never touches the player. Each period it sends a
//! [`SessionEvent::PollTick`](crate::session::SessionEvent) carrying its
//! generation, and the session loop does the reading. Ticks whose generation
//! is no longer current are dropped, so a tick queued just before a track
//! switch cannot update the display with the old track's position.

use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::{MissedTickBehavior, interval};

use crate::session::EventSink;

/// A running poll task. Aborted on drop.
#[derive(Debug)]
pub struct PollHandle {
    generation: u64,
    task: JoinHandle<()>,
}

impl PollHandle {
    fn spawn(period: Duration, generation: u64, sink: EventSink) -> Self {
        let task = tokio::spawn(async move {
            let mut ticker = interval(period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            // The first tick completes immediately; start reading one period in
            ticker.tick().await;
            loop {
                ticker.tick().await;
                if !sink.poll_tick(generation) {
                    break;
                }
            }
        });
        Self { generation, task }
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }
}

impl Drop for PollHandle {
    fn drop(&mut self) {
        self.task.abort();
    }
}

/// Owner of the single [`PollHandle`].
///
/// Invariant: at most one handle is alive; [`Poller::restart`] cancels the
/// old one before spawning its replacement.
pub struct Poller {
    period: Duration,
    sink: EventSink,
    active: Option<PollHandle>,
    next_generation: u64,
}

impl Poller {
    pub fn new(period: Duration, sink: EventSink) -> Self {
        Self {
            period,
            sink,
            active: None,
            next_generation: 1,
        }
    }

    /// Cancel any running poll and start a fresh one. Returns its generation.
    ///
    /// Must be called from within a tokio runtime.
    pub fn restart(&mut self) -> u64 {
        self.cancel();
        let generation = self.next_generation;
        self.next_generation += 1;
        self.active = Some(PollHandle::spawn(self.period, generation, self.sink.clone()));
        tracing::trace!("Poll {} started", generation);
        generation
    }

    /// Stop the running poll, if any. Returns whether one was running.
    pub fn cancel(&mut self) -> bool {
        match self.active.take() {
            Some(handle) => {
                tracing::trace!("Poll {} cancelled", handle.generation());
                true
            }
            None => false,
        }
    }

    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }

    /// Whether a tick from `generation` belongs to the live poll.
    pub fn accepts(&self, generation: u64) -> bool {
        self.active
            .as_ref()
            .is_some_and(|h| h.generation() == generation)
    }
}
