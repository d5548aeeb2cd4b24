// HTTP snapshot source - Fetches dashboard JSON from the backend
use crate::application::snapshot_source::{FetchError, SnapshotSource};
use crate::domain::snapshot::{DashboardSnapshot, Variant};
use async_trait::async_trait;
use reqwest::header::ACCEPT;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct HttpSnapshotSource {
    client: reqwest::Client,
    url: String,
}

impl HttpSnapshotSource {
    pub fn new(base_url: &str, variant: Variant, timeout: Option<Duration>) -> reqwest::Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            client: builder.build()?,
            url: format!("{}{}", base_url.trim_end_matches('/'), variant.endpoint()),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl SnapshotSource for HttpSnapshotSource {
    async fn fetch_snapshot(&self) -> Result<DashboardSnapshot, FetchError> {
        let network = |source| FetchError::Network {
            url: self.url.clone(),
            source,
        };

        let response = self
            .client
            .get(&self.url)
            .header(ACCEPT, "application/json")
            .send()
            .await
            .map_err(network)?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: self.url.clone(),
                status,
            });
        }

        let body = response.text().await.map_err(network)?;
        tracing::debug!("Fetched {} bytes from {}", body.len(), self.url);

        serde_json::from_str(&body).map_err(|source| FetchError::Parse {
            url: self.url.clone(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;
    use axum::routing::get;
    use axum::{Json, Router};
    use serde_json::json;

    async fn serve(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{}", addr)
    }

    fn backend() -> Router {
        Router::new()
            .route(
                "/get_winners",
                get(|| async {
                    Json(json!({
                        "today": "15/11/2023",
                        "yesterday": "14/11/2023",
                        "today_games": [],
                        "yesterday_games": [{"game": "chess", "winner": "Ann", "timestamp": 1700000000000i64}]
                    }))
                }),
            )
            .route(
                "/get_data",
                get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, Json(json!({"error": "Failed to fetch data"}))) }),
            )
    }

    #[test]
    fn test_url_joins_base_and_endpoint() {
        let source = HttpSnapshotSource::new("http://games.local/", Variant::Full, None).unwrap();
        assert_eq!(source.url(), "http://games.local/get_data");
    }

    #[tokio::test]
    async fn test_fetches_and_parses_snapshot() {
        let base = serve(backend()).await;
        let source = HttpSnapshotSource::new(&base, Variant::Winners, None).unwrap();

        let snapshot = source.fetch_snapshot().await.unwrap();
        assert_eq!(snapshot.today, "15/11/2023");
        assert!(snapshot.today_games.is_empty());
        assert_eq!(snapshot.yesterday_games[0].winner, "Ann");
    }

    #[tokio::test]
    async fn test_error_status_is_not_parsed() {
        let base = serve(backend()).await;
        let source = HttpSnapshotSource::new(&base, Variant::Full, None).unwrap();

        let err = source.fetch_snapshot().await.unwrap_err();
        assert!(matches!(
            err,
            FetchError::Status { status, .. } if status == reqwest::StatusCode::INTERNAL_SERVER_ERROR
        ));
    }

    #[tokio::test]
    async fn test_malformed_body_is_parse_error() {
        let router = Router::new().route("/get_data", get(|| async { "<html>maintenance</html>" }));
        let base = serve(router).await;
        let source = HttpSnapshotSource::new(&base, Variant::Full, None).unwrap();

        assert!(matches!(
            source.fetch_snapshot().await.unwrap_err(),
            FetchError::Parse { .. }
        ));
    }

    #[tokio::test]
    async fn test_unreachable_backend_is_network_error() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let source = HttpSnapshotSource::new(&format!("http://{}", addr), Variant::Full, None).unwrap();
        assert!(matches!(
            source.fetch_snapshot().await.unwrap_err(),
            FetchError::Network { .. }
        ));
    }
}
