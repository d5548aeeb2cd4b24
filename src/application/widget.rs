// Widget - Wires fetcher, renderer and rotator into one cancellable unit
use crate::application::comment_rotator::{spawn_rotation, CommentRotator, RotationTiming};
use crate::application::data_fetcher::{DataFetcher, PollStats, DEFAULT_ERROR_MESSAGE};
use crate::application::display::DisplaySurface;
use crate::application::renderer::Renderer;
use crate::application::scheduler::ScheduledTask;
use crate::application::snapshot_source::SnapshotSource;
use crate::domain::snapshot::Variant;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;

#[derive(Debug, Clone)]
pub struct WidgetOptions {
    pub variant: Variant,
    pub poll_interval: Duration,
    pub rotation: RotationTiming,
    pub error_message: String,
}

impl Default for WidgetOptions {
    fn default() -> Self {
        Self {
            variant: Variant::default(),
            poll_interval: Duration::from_secs(60),
            rotation: RotationTiming::default(),
            error_message: DEFAULT_ERROR_MESSAGE.to_string(),
        }
    }
}

/// Running widget. Dropping it or calling `shutdown` stops polling and rotation.
#[derive(Debug)]
pub struct WidgetHandle {
    tasks: Vec<ScheduledTask>,
}

impl WidgetHandle {
    pub fn shutdown(self) {
        for task in self.tasks {
            tracing::info!("Stopping {}", task.name());
            task.cancel();
        }
    }
}

pub fn start_widget(
    source: Arc<dyn SnapshotSource>,
    display: Arc<dyn DisplaySurface>,
    renderer: Renderer,
    options: WidgetOptions,
    stats: Arc<PollStats>,
) -> WidgetHandle {
    let mut tasks = Vec::with_capacity(2);
    let mut fetcher = DataFetcher::new(source, renderer, display.clone(), options.variant, stats)
        .with_error_message(options.error_message);

    if options.variant.has_comments() {
        let rotator = Arc::new(Mutex::new(CommentRotator::new(display)));
        fetcher = fetcher.with_rotator(rotator.clone());
        tasks.push(spawn_rotation(rotator, options.rotation));
    }

    tasks.push(Arc::new(fetcher).spawn_polling(options.poll_interval));
    tracing::info!(
        "Widget started ({:?}, polling {} every {:?})",
        options.variant,
        options.variant.endpoint(),
        options.poll_interval
    );

    WidgetHandle { tasks }
}
