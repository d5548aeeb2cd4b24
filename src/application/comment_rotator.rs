// Comment rotator - Cycles funny comments through one container with a fade
use crate::application::display::{ContainerId, DisplayError, DisplaySurface};
use crate::application::scheduler::{ticker, ScheduledTask};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FadePhase {
    Visible,
    Fading,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RotationTiming {
    pub interval: Duration,
    pub fade_delay: Duration,
}

impl Default for RotationTiming {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(5),
            fade_delay: Duration::from_millis(500),
        }
    }
}

/// Rotation state for the `comment-display` container.
///
/// `current` stays in `0..comments.len()` whenever the list is non-empty.
pub struct CommentRotator {
    display: Arc<dyn DisplaySurface>,
    comments: Vec<String>,
    current: usize,
    phase: FadePhase,
    shown: bool,
}

impl CommentRotator {
    pub fn new(display: Arc<dyn DisplaySurface>) -> Self {
        Self {
            display,
            comments: Vec::new(),
            current: 0,
            phase: FadePhase::Visible,
            shown: false,
        }
    }

    /// Replace the comment list. The cursor carries over, reduced modulo the
    /// new length; the next advance lands on the same comment either way.
    pub fn set_comments(&mut self, comments: Vec<String>) {
        if !comments.is_empty() && self.current >= comments.len() {
            tracing::debug!(
                "Comment list shrank to {} while cursor was at {}",
                comments.len(),
                self.current
            );
            self.current %= comments.len();
        }
        self.comments = comments;

        if !self.shown && self.phase == FadePhase::Visible {
            if let Some(comment) = self.comments.get(self.current) {
                self.shown = show(self.display.set_text(ContainerId::CommentDisplay, comment));
            }
        }
    }

    /// Start fading out the current comment. Returns false, changing nothing,
    /// when there is nothing to rotate or a fade is already running.
    pub fn tick(&mut self) -> bool {
        if self.comments.is_empty() || self.phase == FadePhase::Fading {
            return false;
        }
        show(self.display.set_opacity(ContainerId::CommentDisplay, 0.0));
        self.phase = FadePhase::Fading;
        true
    }

    /// Advance to the next comment and fade it in.
    pub fn finish_fade(&mut self) {
        if self.phase != FadePhase::Fading {
            return;
        }
        if !self.comments.is_empty() {
            self.current = (self.current + 1) % self.comments.len();
            let comment = &self.comments[self.current];
            self.shown = show(self.display.set_text(ContainerId::CommentDisplay, comment));
        }
        show(self.display.set_opacity(ContainerId::CommentDisplay, 1.0));
        self.phase = FadePhase::Visible;
    }

    pub fn current_comment(&self) -> Option<&str> {
        self.comments.get(self.current).map(String::as_str)
    }

    pub fn cursor(&self) -> usize {
        self.current
    }

    pub fn phase(&self) -> FadePhase {
        self.phase
    }
}

fn show(result: Result<(), DisplayError>) -> bool {
    match result {
        Ok(()) => true,
        Err(e) => {
            tracing::warn!("Comment display not updated: {}", e);
            false
        }
    }
}

/// Run the rotation loop: fade out every `interval`, swap text after `fade_delay`.
pub fn spawn_rotation(rotator: Arc<Mutex<CommentRotator>>, timing: RotationTiming) -> ScheduledTask {
    ScheduledTask::spawn("comment-rotation", async move {
        let mut ticks = ticker(timing.interval, false);
        loop {
            ticks.tick().await;
            if !rotator.lock().await.tick() {
                continue;
            }
            tokio::time::sleep(timing.fade_delay).await;
            rotator.lock().await.finish_fade();
        }
    })
}
