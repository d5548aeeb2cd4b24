// Application state for HTTP handlers
use crate::application::data_fetcher::PollStats;
use crate::domain::snapshot::Variant;
use crate::infrastructure::memory_display::InMemoryDisplay;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub variant: Variant,
    pub display: Arc<InMemoryDisplay>,
    pub stats: Arc<PollStats>,
}
