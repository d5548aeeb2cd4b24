// Renderer - Maps snapshot data to markup fragments and places them
use crate::application::display::{ContainerId, DisplayError, DisplaySurface};
use crate::domain::game::{GameRecord, Timestamp};
use crate::domain::leaderboard::LeaderboardEntry;
use crate::domain::snapshot::DashboardSnapshot;
use askama::Template;
use chrono::format::{Item, StrftimeItems};
use chrono::{FixedOffset, Local};
use thiserror::Error;

const MEDALS: [&str; 3] = ["🥇", "🥈", "🥉"];
const INVALID_DATE: &str = "Invalid Date";
const NO_WINNERS: &str = "<p>No winners yet!</p>";

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("invalid time format `{0}`")]
    InvalidTimeFormat(String),
    #[error("template rendering failed: {0}")]
    Template(#[from] askama::Error),
}

/// Which of the two game lists is being rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Day {
    Today,
    Yesterday,
}

impl Day {
    pub fn placeholder(self) -> &'static str {
        match self {
            Day::Today => "<p>No games played today yet!</p>",
            Day::Yesterday => "<p>No games played yesterday!</p>",
        }
    }
}

/// Time zone used for the time-of-day column.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DisplayZone {
    Local,
    Fixed(FixedOffset),
}

#[derive(Template)]
#[template(path = "game_entry.html")]
struct GameEntryTemplate<'a> {
    game: &'a str,
    winner: &'a str,
    time: String,
}

struct BreakdownLine<'a> {
    game: &'a str,
    wins: i64,
}

#[derive(Template)]
#[template(path = "leaderboard_entry.html")]
struct LeaderboardEntryTemplate<'a> {
    name: &'a str,
    medal: Option<&'static str>,
    highlighted: bool,
    wins_label: String,
    breakdown: Vec<BreakdownLine<'a>>,
}

#[derive(Debug, Clone)]
pub struct Renderer {
    zone: DisplayZone,
    time_format: String,
}

impl Renderer {
    pub fn new(zone: DisplayZone, time_format: impl Into<String>) -> Result<Self, RenderError> {
        let time_format = time_format.into();
        if StrftimeItems::new(&time_format).any(|item| matches!(item, Item::Error)) {
            return Err(RenderError::InvalidTimeFormat(time_format));
        }
        Ok(Self { zone, time_format })
    }

    /// Time of day for `timestamp` in the display zone, or `Invalid Date`.
    pub fn format_time(&self, timestamp: &Timestamp) -> String {
        let formatted = match self.zone {
            DisplayZone::Local => timestamp
                .resolve(&Local)
                .map(|dt| dt.format(&self.time_format).to_string()),
            DisplayZone::Fixed(offset) => timestamp
                .resolve(&offset)
                .map(|dt| dt.format(&self.time_format).to_string()),
        };
        formatted.unwrap_or_else(|| INVALID_DATE.to_string())
    }

    pub fn render_game_entry(&self, record: &GameRecord) -> Result<String, RenderError> {
        let template = GameEntryTemplate {
            game: &record.game,
            winner: &record.winner,
            time: self.format_time(&record.timestamp),
        };
        Ok(template.render()?)
    }

    pub fn render_game_list(&self, records: &[GameRecord], day: Day) -> Result<String, RenderError> {
        if records.is_empty() {
            return Ok(day.placeholder().to_string());
        }
        records
            .iter()
            .map(|record| self.render_game_entry(record))
            .collect()
    }

    /// Render one leaderboard row; `rank` is zero-based.
    pub fn render_leaderboard_entry(
        &self,
        entry: &LeaderboardEntry,
        rank: usize,
    ) -> Result<String, RenderError> {
        let medal = MEDALS.get(rank).copied();
        let template = LeaderboardEntryTemplate {
            name: &entry.name,
            medal,
            highlighted: medal.is_some(),
            wins_label: wins_label(entry.wins),
            breakdown: entry
                .game_breakdown
                .iter()
                .map(|(game, wins)| BreakdownLine { game, wins })
                .collect(),
        };
        Ok(template.render()?)
    }

    pub fn render_leaderboard(&self, entries: &[LeaderboardEntry]) -> Result<String, RenderError> {
        if entries.is_empty() {
            return Ok(NO_WINNERS.to_string());
        }
        entries
            .iter()
            .enumerate()
            .map(|(rank, entry)| self.render_leaderboard_entry(entry, rank))
            .collect()
    }

    pub fn update_dates(&self, display: &dyn DisplaySurface, snapshot: &DashboardSnapshot) {
        place(display.set_text(ContainerId::TodayDate, &snapshot.today));
        place(display.set_text(ContainerId::YesterdayDate, &snapshot.yesterday));
    }

    /// Render both lists before touching the display, so a render failure leaves
    /// the previous lists in place.
    pub fn update_game_lists(
        &self,
        display: &dyn DisplaySurface,
        snapshot: &DashboardSnapshot,
    ) -> Result<(), RenderError> {
        let today = self.render_game_list(&snapshot.today_games, Day::Today)?;
        let yesterday = self.render_game_list(&snapshot.yesterday_games, Day::Yesterday)?;
        place(display.set_html(ContainerId::TodayGames, &today));
        place(display.set_html(ContainerId::YesterdayGames, &yesterday));
        Ok(())
    }

    pub fn update_leaderboard(
        &self,
        display: &dyn DisplaySurface,
        entries: &[LeaderboardEntry],
    ) -> Result<(), RenderError> {
        let html = self.render_leaderboard(entries)?;
        place(display.set_html(ContainerId::WinnerCounts, &html));
        Ok(())
    }
}

fn wins_label(wins: i64) -> String {
    if wins == 1 {
        "1 total win".to_string()
    } else {
        format!("{} total wins", wins)
    }
}

// A host page without the container just doesn't show that part.
fn place(result: Result<(), DisplayError>) {
    if let Err(e) = result {
        tracing::warn!("Skipping display update: {}", e);
    }
}
