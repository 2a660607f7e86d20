//! Plain-text surface for the interactive CLI.

use std::io::Write;

use super::{PlaylistEntry, UiSurface};
use crate::transport::Progress;

/// Width of the text seek bar, in cells.
const BAR_WIDTH: usize = 30;

/// Prints control changes as lines of text.
///
/// Progress is only printed when the displayed time changes, so a paused
/// player does not repeat the same line every tick.
pub struct TerminalSurface<W: Write> {
    out: W,
    last_progress: Option<String>,
}

impl TerminalSurface<std::io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(std::io::stdout())
    }
}

impl<W: Write> TerminalSurface<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            last_progress: None,
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn line(&mut self, text: std::fmt::Arguments<'_>) {
        // A closed stdout is not worth failing the session over
        if let Err(e) = writeln!(self.out, "{}", text) {
            tracing::debug!("Terminal write failed: {}", e);
        }
    }
}

/// `[#####-----]` bar for a 0-100 percentage.
fn seek_bar(percent: f64) -> String {
    let filled = ((percent.clamp(0.0, 100.0) / 100.0) * BAR_WIDTH as f64).round() as usize;
    format!("[{}{}]", "#".repeat(filled), "-".repeat(BAR_WIDTH - filled))
}

impl<W: Write> UiSurface for TerminalSurface<W> {
    fn set_play_label(&mut self, label: &str) {
        self.line(format_args!("[play/pause] {}", label));
    }

    fn set_loop_label(&mut self, label: &str) {
        self.line(format_args!("[loop] {}", label));
    }

    fn set_speed_label(&mut self, label: &str) {
        self.line(format_args!("[speed] {}", label));
    }

    fn set_track_count(&mut self, label: &str) {
        self.line(format_args!("{}", label));
    }

    fn set_progress(&mut self, progress: &Progress) {
        let text = format!(
            "{} {} / {}",
            seek_bar(progress.percent),
            progress.current,
            progress.total
        );
        if self.last_progress.as_deref() == Some(text.as_str()) {
            return;
        }
        self.line(format_args!("{}", text));
        self.last_progress = Some(text);
    }

    fn set_total_time(&mut self, label: &str) {
        self.line(format_args!("[duration] {}", label));
    }

    fn render_playlist(&mut self, entries: &[PlaylistEntry]) {
        for entry in entries {
            let marker = if entry.active { '>' } else { ' ' };
            self.line(format_args!("{} {:>2}. {}", marker, entry.index, entry.title));
        }
    }
}
