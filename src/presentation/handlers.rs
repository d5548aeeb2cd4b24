// HTTP request handlers
use crate::application::data_fetcher::PollCounts;
use crate::application::display::ContainerId;
use crate::domain::snapshot::Variant;
use crate::infrastructure::memory_display::{ContainerState, ContentKind};
use crate::presentation::app_state::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    Json,
};
use serde::Serialize;
use std::sync::Arc;

#[derive(Serialize)]
pub struct WidgetView {
    pub variant: Variant,
    pub polls: PollCounts,
    pub containers: Vec<ContainerState>,
}

/// Health check endpoint
pub async fn health_check() -> &'static str {
    "ok"
}

/// Current content of every container
pub async fn widget_state(State(state): State<Arc<AppState>>) -> Json<WidgetView> {
    Json(WidgetView {
        variant: state.variant,
        polls: state.stats.counts(),
        containers: state.display.containers(),
    })
}

/// Content of one container, as markup or plain text
pub async fn container_content(
    Path(name): Path<String>,
    State(state): State<Arc<AppState>>,
) -> Response {
    let container = name
        .parse::<ContainerId>()
        .ok()
        .and_then(|id| state.display.container(id));

    match container {
        Some(ContainerState {
            kind: ContentKind::Html,
            content,
            ..
        }) => Html(content).into_response(),
        Some(ContainerState { content, .. }) => content.into_response(),
        None => (StatusCode::NOT_FOUND, format!("no container named {}", name)).into_response(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::data_fetcher::PollStats;
    use crate::application::display::DisplaySurface;
    use crate::infrastructure::memory_display::InMemoryDisplay;
    use axum::http::header::CONTENT_TYPE;

    fn state(variant: Variant) -> Arc<AppState> {
        Arc::new(AppState {
            variant,
            display: Arc::new(InMemoryDisplay::with_containers(ContainerId::for_variant(variant))),
            stats: Arc::new(PollStats::default()),
        })
    }

    fn content_type(response: &Response) -> &str {
        response.headers()[CONTENT_TYPE].to_str().unwrap()
    }

    #[tokio::test]
    async fn test_container_content_types() {
        let state = state(Variant::Full);
        state.display.set_html(ContainerId::TodayGames, "<p>x</p>").unwrap();
        state.display.set_text(ContainerId::TodayDate, "15/11/2023").unwrap();

        let html = container_content(Path("today-games".to_string()), State(state.clone())).await;
        assert_eq!(html.status(), StatusCode::OK);
        assert!(content_type(&html).starts_with("text/html"));

        let text = container_content(Path("today-date".to_string()), State(state)).await;
        assert!(content_type(&text).starts_with("text/plain"));
    }

    #[tokio::test]
    async fn test_unknown_or_absent_container_is_404() {
        let state = state(Variant::Winners);

        let unknown = container_content(Path("sidebar".to_string()), State(state.clone())).await;
        assert_eq!(unknown.status(), StatusCode::NOT_FOUND);

        let absent = container_content(Path("winner-counts".to_string()), State(state)).await;
        assert_eq!(absent.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_widget_state_lists_containers() {
        let Json(view) = widget_state(State(state(Variant::Full))).await;
        assert_eq!(view.containers.len(), 6);
        assert_eq!(view.polls, PollCounts { succeeded: 0, failed: 0 });

        let json = serde_json::to_value(&view).unwrap();
        assert_eq!(json["variant"], "full");
        assert_eq!(json["containers"][0]["id"], "today-date");
    }
}
