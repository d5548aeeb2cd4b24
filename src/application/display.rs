// Display surface trait - The named containers the widget writes into
use crate::domain::snapshot::Variant;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ContainerId {
    TodayDate,
    YesterdayDate,
    TodayGames,
    YesterdayGames,
    WinnerCounts,
    CommentDisplay,
}

impl ContainerId {
    pub const ALL: [ContainerId; 6] = [
        ContainerId::TodayDate,
        ContainerId::YesterdayDate,
        ContainerId::TodayGames,
        ContainerId::YesterdayGames,
        ContainerId::WinnerCounts,
        ContainerId::CommentDisplay,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ContainerId::TodayDate => "today-date",
            ContainerId::YesterdayDate => "yesterday-date",
            ContainerId::TodayGames => "today-games",
            ContainerId::YesterdayGames => "yesterday-games",
            ContainerId::WinnerCounts => "winner-counts",
            ContainerId::CommentDisplay => "comment-display",
        }
    }

    /// Containers a host document must provide for `variant`.
    pub fn for_variant(variant: Variant) -> Vec<ContainerId> {
        Self::ALL
            .into_iter()
            .filter(|id| match id {
                ContainerId::WinnerCounts => variant.has_leaderboard(),
                ContainerId::CommentDisplay => variant.has_comments(),
                _ => true,
            })
            .collect()
    }
}

impl fmt::Display for ContainerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ContainerId {
    type Err = DisplayError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|id| id.as_str() == s)
            .ok_or_else(|| DisplayError::UnknownContainer(s.to_string()))
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum DisplayError {
    #[error("container `{0}` is not present")]
    MissingContainer(ContainerId),
    #[error("no container is named `{0}`")]
    UnknownContainer(String),
}

/// Something that holds the widget's containers, e.g. a page or an in-memory model.
///
/// Every setter replaces the container's previous content wholesale.
pub trait DisplaySurface: Send + Sync {
    /// Replace the container's content with plain text.
    fn set_text(&self, id: ContainerId, text: &str) -> Result<(), DisplayError>;

    /// Replace the container's content with a markup fragment.
    fn set_html(&self, id: ContainerId, html: &str) -> Result<(), DisplayError>;

    fn set_opacity(&self, id: ContainerId, opacity: f32) -> Result<(), DisplayError>;
}
