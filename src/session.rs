//! The player session.
//!
//! A [`Session`] owns everything that lives for one page view: the transport
//! controller (and through it the playlist, navigation state, player, UI and
//! history), the event adapter, and the event channel feeding them.
//!
//! All work happens on one task. Player callbacks, user commands and poll
//! ticks are queued as [`SessionEvent`]s and handled strictly in order.

use std::ops::ControlFlow;
use std::str::FromStr;
use std::time::Duration;
use tokio::sync::mpsc;

use crate::adapter::PlayerEventAdapter;
use crate::error::{Error, Result};
use crate::navigation::{LoopMode, NavigationState};
use crate::player::{PlayerEvent, VideoPlayer};
use crate::playlist::{Playlist, Track};
use crate::transport::{Poller, TransportController};
use crate::ui::UiSurface;
use crate::url_sync::{History, UrlSync};

/// Commands a user can issue through the controls.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum UserCommand {
    PlayPause,
    Next,
    Prev,
    /// Slider position between 0 and 1
    Seek(f64),
    Speed,
    Loop,
    /// Click on a playlist entry
    Select(usize),
    /// Browser back button
    Back,
    /// Browser forward button
    Forward,
    /// Redraw the playlist
    List,
    Quit,
}

impl FromStr for UserCommand {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let mut parts = s.split_whitespace();
        let name = parts
            .next()
            .ok_or_else(|| Error::invalid_command("empty input"))?;
        let arg = parts.next();

        let command = match name.to_ascii_lowercase().as_str() {
            "p" | "play" | "pause" => UserCommand::PlayPause,
            "n" | "next" => UserCommand::Next,
            "b" | "prev" | "previous" => UserCommand::Prev,
            "speed" => UserCommand::Speed,
            "loop" => UserCommand::Loop,
            "back" => UserCommand::Back,
            "forward" => UserCommand::Forward,
            "l" | "list" => UserCommand::List,
            "q" | "quit" | "exit" => UserCommand::Quit,
            "seek" => {
                let arg = arg.ok_or_else(|| Error::invalid_command("seek needs a position 0..1"))?;
                let fraction: f64 = arg
                    .parse()
                    .map_err(|_| Error::invalid_command(format!("bad seek position {:?}", arg)))?;
                UserCommand::Seek(fraction)
            }
            "s" | "select" => {
                let arg = arg.ok_or_else(|| Error::invalid_command("select needs a track number"))?;
                let index: usize = arg
                    .parse()
                    .map_err(|_| Error::invalid_command(format!("bad track number {:?}", arg)))?;
                UserCommand::Select(index)
            }
            other => return Err(Error::invalid_command(format!("unknown command {:?}", other))),
        };
        Ok(command)
    }
}

/// Everything the session reacts to.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
    Player(PlayerEvent),
    User(UserCommand),
    /// Tick from the progress poll with the given generation
    PollTick { generation: u64 },
    Shutdown,
}

/// Sending half of the session's event channel.
#[derive(Debug, Clone)]
pub struct EventSink {
    tx: mpsc::UnboundedSender<SessionEvent>,
}

impl EventSink {
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<SessionEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }

    /// Report a player callback.
    pub fn player(&self, event: PlayerEvent) {
        self.send(SessionEvent::Player(event));
    }

    /// Queue a user command. Returns false once the session is gone.
    pub fn user(&self, command: UserCommand) -> bool {
        self.send(SessionEvent::User(command))
    }

    /// Queue a poll tick. Returns false once the session is gone.
    pub fn poll_tick(&self, generation: u64) -> bool {
        self.send(SessionEvent::PollTick { generation })
    }

    pub fn shutdown(&self) {
        self.send(SessionEvent::Shutdown);
    }

    fn send(&self, event: SessionEvent) -> bool {
        self.tx.send(event).is_ok()
    }
}

/// Tunables for a session.
#[derive(Debug, Clone)]
pub struct SessionOptions {
    pub poll_interval: Duration,
    pub loop_mode: LoopMode,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_secs(1),
            loop_mode: LoopMode::None,
        }
    }
}

/// One player page: controller, adapter and event queue.
pub struct Session<P: VideoPlayer, U: UiSurface, H: History> {
    controller: TransportController<P, U, H>,
    adapter: PlayerEventAdapter,
    sink: EventSink,
    events: mpsc::UnboundedReceiver<SessionEvent>,
}

impl<P: VideoPlayer, U: UiSurface, H: History> Session<P, U, H> {
    /// Start a session. Call once per page.
    ///
    /// Picks the starting track from the location, shows the track count,
    /// and creates the player through `create_player` with that track and
    /// the sink it must report lifecycle events to. The player's `Ready`
    /// event completes the setup.
    pub fn bootstrap<F>(
        playlist: Playlist,
        history: H,
        mut ui: U,
        options: SessionOptions,
        create_player: F,
    ) -> Result<Self>
    where
        F: FnOnce(&Track, EventSink) -> P,
    {
        let (sink, events) = EventSink::channel();
        let url = UrlSync::new(history);

        let start = url.resolve(&playlist);
        let nav = NavigationState::new(playlist.len(), start)?.with_loop_mode(options.loop_mode);
        let track = &playlist.tracks()[start];
        tracing::info!("Starting at track {} ({})", start, track.id);

        ui.set_track_count(&playlist.count_label());
        let player = create_player(track, sink.clone());
        let poller = Poller::new(options.poll_interval, sink.clone());

        Ok(Self {
            controller: TransportController::new(playlist, nav, player, ui, url, poller),
            adapter: PlayerEventAdapter::new(),
            sink,
            events,
        })
    }

    /// A handle for feeding events into this session.
    pub fn sink(&self) -> EventSink {
        self.sink.clone()
    }

    pub fn controller(&self) -> &TransportController<P, U, H> {
        &self.controller
    }

    pub fn is_ready(&self) -> bool {
        self.adapter.is_wired()
    }

    /// Process events until a quit command or shutdown arrives.
    pub async fn run(&mut self) {
        while let Some(event) = self.events.recv().await {
            if self.dispatch(event).is_break() {
                break;
            }
        }
        tracing::info!("Session finished");
    }

    /// Handle every event already queued, without waiting.
    pub fn drain(&mut self) -> ControlFlow<()> {
        while let Ok(event) = self.events.try_recv() {
            if self.dispatch(event).is_break() {
                return ControlFlow::Break(());
            }
        }
        ControlFlow::Continue(())
    }

    /// Handle one event.
    pub fn dispatch(&mut self, event: SessionEvent) -> ControlFlow<()> {
        match event {
            SessionEvent::Player(event) => self.adapter.handle(event, &mut self.controller),
            SessionEvent::PollTick { generation } => self.controller.on_poll_tick(generation),
            SessionEvent::User(UserCommand::Quit) | SessionEvent::Shutdown => {
                return ControlFlow::Break(());
            }
            SessionEvent::User(command) => self.handle_command(command),
        }
        ControlFlow::Continue(())
    }

    fn handle_command(&mut self, command: UserCommand) {
        // Controls are wired up by the player's ready event
        if !self.adapter.is_wired() {
            tracing::debug!("Ignoring {:?} before player is ready", command);
            return;
        }

        let c = &mut self.controller;
        match command {
            UserCommand::PlayPause => c.play_pause(),
            UserCommand::Next => c.next(),
            UserCommand::Prev => c.prev(),
            UserCommand::Seek(fraction) => c.seek(fraction),
            UserCommand::Speed => c.change_speed(),
            UserCommand::Loop => c.toggle_loop(),
            UserCommand::Select(index) => {
                if let Err(e) = c.select_track(index) {
                    tracing::warn!("Cannot select track: {}", e);
                }
            }
            UserCommand::Back => {
                if !c.history_back() {
                    tracing::debug!("No earlier history entry");
                }
            }
            UserCommand::Forward => {
                if !c.history_forward() {
                    tracing::debug!("No later history entry");
                }
            }
            UserCommand::List => c.render(),
            UserCommand::Quit => {}
        }
    }
}
