// Snapshot source trait for backend access
use crate::domain::snapshot::DashboardSnapshot;
use async_trait::async_trait;
use thiserror::Error;

/// Why a poll produced no snapshot. Every variant is handled the same way:
/// log it and leave the game lists as they were.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request to {url} failed: {source}")]
    Network {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("{url} responded with status {status}")]
    Status {
        url: String,
        status: reqwest::StatusCode,
    },
    #[error("could not parse response from {url}: {source}")]
    Parse {
        url: String,
        #[source]
        source: serde_json::Error,
    },
}

#[async_trait]
pub trait SnapshotSource: Send + Sync {
    /// Fetch the current dashboard snapshot
    async fn fetch_snapshot(&self) -> Result<DashboardSnapshot, FetchError>;
}
