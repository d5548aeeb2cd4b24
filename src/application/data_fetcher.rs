// Data fetcher - Polls the backend and pushes snapshots onto the display
use crate::application::comment_rotator::CommentRotator;
use crate::application::display::{ContainerId, DisplaySurface};
use crate::application::renderer::{RenderError, Renderer};
use crate::application::scheduler::{ticker, ScheduledTask};
use crate::application::snapshot_source::{FetchError, SnapshotSource};
use crate::domain::snapshot::{DashboardSnapshot, Variant};
use serde::Serialize;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use thiserror::Error;
use tokio::sync::Mutex;
use tokio::task::JoinSet;

pub const DEFAULT_ERROR_MESSAGE: &str = "Error loading data. Please try again later.";

#[derive(Debug, Error)]
pub enum PollError {
    #[error(transparent)]
    Fetch(#[from] FetchError),
    #[error(transparent)]
    Render(#[from] RenderError),
}

/// Counters of finished polls.
#[derive(Debug, Default)]
pub struct PollStats {
    succeeded: AtomicU64,
    failed: AtomicU64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PollCounts {
    pub succeeded: u64,
    pub failed: u64,
}

impl PollStats {
    fn record(&self, ok: bool) {
        let counter = if ok { &self.succeeded } else { &self.failed };
        counter.fetch_add(1, Ordering::Relaxed);
    }

    pub fn counts(&self) -> PollCounts {
        PollCounts {
            succeeded: self.succeeded.load(Ordering::Relaxed),
            failed: self.failed.load(Ordering::Relaxed),
        }
    }
}

pub struct DataFetcher {
    source: Arc<dyn SnapshotSource>,
    renderer: Renderer,
    display: Arc<dyn DisplaySurface>,
    variant: Variant,
    rotator: Option<Arc<Mutex<CommentRotator>>>,
    error_message: String,
    stats: Arc<PollStats>,
}

impl DataFetcher {
    pub fn new(
        source: Arc<dyn SnapshotSource>,
        renderer: Renderer,
        display: Arc<dyn DisplaySurface>,
        variant: Variant,
        stats: Arc<PollStats>,
    ) -> Self {
        Self {
            source,
            renderer,
            display,
            variant,
            rotator: None,
            error_message: DEFAULT_ERROR_MESSAGE.to_string(),
            stats,
        }
    }

    /// Hand each fetched comment list to `rotator`.
    pub fn with_rotator(mut self, rotator: Arc<Mutex<CommentRotator>>) -> Self {
        self.rotator = Some(rotator);
        self
    }

    /// Text shown in the leaderboard when a poll fails.
    pub fn with_error_message(mut self, message: impl Into<String>) -> Self {
        self.error_message = message.into();
        self
    }

    /// Fetch one snapshot and display it. Failures are logged and counted
    /// here; the returned error is informational.
    pub async fn poll_once(&self) -> Result<(), PollError> {
        let result = match self.source.fetch_snapshot().await {
            Ok(snapshot) => self.apply(snapshot).await.map_err(PollError::from),
            Err(e) => Err(PollError::from(e)),
        };

        match &result {
            Ok(()) => {
                tracing::debug!("Dashboard refreshed");
                self.stats.record(true);
            }
            Err(e) => {
                tracing::error!("Error fetching winners: {}", e);
                self.stats.record(false);
                if self.variant.has_leaderboard() {
                    if let Err(e) = self.display.set_text(ContainerId::WinnerCounts, &self.error_message) {
                        tracing::warn!("Could not show poll error: {}", e);
                    }
                }
            }
        }

        result
    }

    async fn apply(&self, snapshot: DashboardSnapshot) -> Result<(), RenderError> {
        let display = self.display.as_ref();
        self.renderer.update_dates(display, &snapshot);
        self.renderer.update_game_lists(display, &snapshot)?;

        if self.variant.has_leaderboard() {
            self.renderer.update_leaderboard(display, &snapshot.winner_counts)?;
        }

        if let Some(rotator) = &self.rotator {
            rotator.lock().await.set_comments(snapshot.funny_comments);
        }

        Ok(())
    }

    /// Poll now and then every `interval`. Each poll runs on its own; a slow
    /// response may land after a newer one and overwrite it.
    pub fn spawn_polling(self: Arc<Self>, interval: Duration) -> ScheduledTask {
        ScheduledTask::spawn("snapshot-poll", async move {
            let mut ticks = ticker(interval, true);
            let mut in_flight = JoinSet::new();
            loop {
                tokio::select! {
                    _ = ticks.tick() => {
                        let fetcher = self.clone();
                        in_flight.spawn(async move {
                            let _ = fetcher.poll_once().await;
                        });
                    }
                    Some(joined) = in_flight.join_next() => {
                        if let Err(e) = joined {
                            tracing::error!("Poll task did not finish: {}", e);
                        }
                    }
                }
            }
        })
    }
}
