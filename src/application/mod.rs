// Application layer - Polling, rendering and rotation use cases
pub mod comment_rotator;
pub mod data_fetcher;
pub mod display;
pub mod renderer;
pub mod scheduler;
pub mod snapshot_source;
pub mod widget;
