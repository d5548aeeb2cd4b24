// Dashboard snapshot domain model
use super::game::GameRecord;
use super::leaderboard::LeaderboardEntry;
use serde::{Deserialize, Serialize};

/// Everything one poll of the backend returns.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct DashboardSnapshot {
    #[serde(default)]
    pub today: String,
    #[serde(default)]
    pub yesterday: String,
    pub today_games: Vec<GameRecord>,
    pub yesterday_games: Vec<GameRecord>,
    #[serde(default)]
    pub winner_counts: Vec<LeaderboardEntry>,
    #[serde(default)]
    pub funny_comments: Vec<String>,
}

/// Which revision of the widget is running.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Variant {
    /// Game lists only, polled from `/get_winners`.
    Winners,
    /// Game lists, leaderboard and rotating comments, polled from `/get_data`.
    #[default]
    Full,
}

impl Variant {
    pub fn endpoint(self) -> &'static str {
        match self {
            Variant::Winners => "/get_winners",
            Variant::Full => "/get_data",
        }
    }

    pub fn has_leaderboard(self) -> bool {
        matches!(self, Variant::Full)
    }

    pub fn has_comments(self) -> bool {
        matches!(self, Variant::Full)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_winners_payload_has_no_extras() {
        let snapshot: DashboardSnapshot = serde_json::from_str(
            r#"{"today":"15/11/2023","yesterday":"14/11/2023","today_games":[],"yesterday_games":[]}"#,
        )
        .unwrap();

        assert_eq!(snapshot.today, "15/11/2023");
        assert!(snapshot.winner_counts.is_empty());
        assert!(snapshot.funny_comments.is_empty());
    }

    #[test]
    fn test_missing_date_labels_default_to_empty() {
        let snapshot: DashboardSnapshot = serde_json::from_str(
            r#"{"today_games": [], "yesterday_games": [{"game":"chess","winner":"Ann","timestamp":1700000000000}]}"#,
        )
        .unwrap();

        assert_eq!(snapshot.today, "");
        assert_eq!(snapshot.yesterday, "");
        assert_eq!(snapshot.yesterday_games[0].game, "chess");
    }

    #[test]
    fn test_bad_timestamp_does_not_reject_snapshot() {
        let snapshot: DashboardSnapshot = serde_json::from_str(
            r#"{"today":"15/11/2023","yesterday":"14/11/2023","today_games":[{"game":"go","winner":"Cy","timestamp":null}],"yesterday_games":[]}"#,
        )
        .unwrap();

        assert_eq!(snapshot.today_games.len(), 1);
        assert!(snapshot.today_games[0].timestamp.resolve(&chrono::Utc).is_none());
    }

    #[test]
    fn test_data_payload() {
        let snapshot: DashboardSnapshot = serde_json::from_str(
            r#"{
                "today": "15/11/2023",
                "yesterday": "14/11/2023",
                "today_games": [{"game": "durak", "winner": "All except Bo", "timestamp": "Wed, 15 Nov 2023 19:02:11 GMT"}],
                "yesterday_games": [],
                "winner_counts": [{"name": "Ann", "wins": 2, "game_breakdown": {"durak": 2}}],
                "funny_comments": ["gg", "rematch?"]
            }"#,
        )
        .unwrap();

        assert_eq!(snapshot.today_games.len(), 1);
        assert_eq!(snapshot.winner_counts[0].name, "Ann");
        assert_eq!(snapshot.funny_comments, vec!["gg", "rematch?"]);
    }

    #[test]
    fn test_variant_endpoints() {
        assert_eq!(Variant::Winners.endpoint(), "/get_winners");
        assert_eq!(Variant::Full.endpoint(), "/get_data");
        assert!(!Variant::Winners.has_leaderboard());
        assert!(Variant::Full.has_comments());
    }
}
