// In-memory display surface - Holds container state for the HTTP API and tests
use crate::application::display::{ContainerId, DisplayError, DisplaySurface};
use serde::Serialize;
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentKind {
    Text,
    Html,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContainerState {
    pub id: ContainerId,
    pub kind: ContentKind,
    pub content: String,
    pub opacity: f32,
}

impl ContainerState {
    fn empty(id: ContainerId) -> Self {
        Self {
            id,
            kind: ContentKind::Text,
            content: String::new(),
            opacity: 1.0,
        }
    }
}

/// Display surface backed by a map of containers. Only containers it was
/// created with exist; writes to any other container fail.
#[derive(Debug, Default)]
pub struct InMemoryDisplay {
    containers: Mutex<HashMap<ContainerId, ContainerState>>,
}

impl InMemoryDisplay {
    pub fn with_containers(ids: impl IntoIterator<Item = ContainerId>) -> Self {
        let containers = ids
            .into_iter()
            .map(|id| (id, ContainerState::empty(id)))
            .collect();
        Self {
            containers: Mutex::new(containers),
        }
    }

    pub fn container(&self, id: ContainerId) -> Option<ContainerState> {
        self.lock().get(&id).cloned()
    }

    pub fn content(&self, id: ContainerId) -> Option<String> {
        self.lock().get(&id).map(|c| c.content.clone())
    }

    pub fn opacity(&self, id: ContainerId) -> Option<f32> {
        self.lock().get(&id).map(|c| c.opacity)
    }

    /// All containers in document order.
    pub fn containers(&self) -> Vec<ContainerState> {
        let containers = self.lock();
        ContainerId::ALL
            .iter()
            .filter_map(|id| containers.get(id).cloned())
            .collect()
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<ContainerId, ContainerState>> {
        // Writers never leave a container half-updated, so a poisoned map is still usable.
        self.containers.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn update(
        &self,
        id: ContainerId,
        apply: impl FnOnce(&mut ContainerState),
    ) -> Result<(), DisplayError> {
        let mut containers = self.lock();
        let container = containers
            .get_mut(&id)
            .ok_or(DisplayError::MissingContainer(id))?;
        apply(container);
        Ok(())
    }
}

impl DisplaySurface for InMemoryDisplay {
    fn set_text(&self, id: ContainerId, text: &str) -> Result<(), DisplayError> {
        self.update(id, |c| {
            c.kind = ContentKind::Text;
            c.content = text.to_string();
        })
    }

    fn set_html(&self, id: ContainerId, html: &str) -> Result<(), DisplayError> {
        self.update(id, |c| {
            c.kind = ContentKind::Html;
            c.content = html.to_string();
        })
    }

    fn set_opacity(&self, id: ContainerId, opacity: f32) -> Result<(), DisplayError> {
        self.update(id, |c| c.opacity = opacity.clamp(0.0, 1.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_writes_replace_content_and_kind() {
        let display = InMemoryDisplay::with_containers([ContainerId::TodayGames]);

        display.set_text(ContainerId::TodayGames, "loading").unwrap();
        display.set_html(ContainerId::TodayGames, "<p>x</p>").unwrap();

        let state = display.container(ContainerId::TodayGames).unwrap();
        assert_eq!(state.kind, ContentKind::Html);
        assert_eq!(state.content, "<p>x</p>");
    }

    #[test]
    fn test_missing_container_is_an_error() {
        let display = InMemoryDisplay::with_containers([ContainerId::TodayGames]);
        assert_eq!(
            display.set_opacity(ContainerId::CommentDisplay, 0.0),
            Err(DisplayError::MissingContainer(ContainerId::CommentDisplay))
        );
    }

    #[test]
    fn test_containers_listed_in_document_order() {
        let display = InMemoryDisplay::with_containers([ContainerId::CommentDisplay, ContainerId::TodayDate]);
        let ids: Vec<_> = display.containers().into_iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![ContainerId::TodayDate, ContainerId::CommentDisplay]);
    }
}
