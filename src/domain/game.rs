// Game result domain model
use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct GameRecord {
    pub game: String,
    pub winner: String,
    pub timestamp: Timestamp,
}

impl GameRecord {
    pub fn new(game: impl Into<String>, winner: impl Into<String>, timestamp: Timestamp) -> Self {
        Self {
            game: game.into(),
            winner: winner.into(),
            timestamp,
        }
    }
}

/// Instant at which a game finished, as the backend sent it.
///
/// Backends send either epoch milliseconds or a date string. Strings may be
/// RFC 3339, RFC 2822 (Flask's `jsonify` output for datetimes) or a naive ISO
/// date-time, which is read as wall-clock time in the display zone. Any other
/// JSON value is kept as `Other` and never resolves.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum Timestamp {
    Millis(i64),
    FractionalMillis(f64),
    Text(String),
    Other(serde_json::Value),
}

const NAIVE_FORMATS: [&str; 3] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"];

impl Timestamp {
    /// Resolve to an instant in `tz`, or `None` when the value is not a date.
    pub fn resolve<Tz: TimeZone>(&self, tz: &Tz) -> Option<DateTime<Tz>> {
        match self {
            Timestamp::Millis(ms) => Utc
                .timestamp_millis_opt(*ms)
                .single()
                .map(|dt| dt.with_timezone(tz)),
            Timestamp::FractionalMillis(ms) if ms.is_finite() => Utc
                .timestamp_millis_opt(ms.trunc() as i64)
                .single()
                .map(|dt| dt.with_timezone(tz)),
            Timestamp::FractionalMillis(_) => None,
            Timestamp::Text(text) => Self::parse_text(text.trim(), tz),
            Timestamp::Other(_) => None,
        }
    }

    fn parse_text<Tz: TimeZone>(text: &str, tz: &Tz) -> Option<DateTime<Tz>> {
        if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
            return Some(dt.with_timezone(tz));
        }
        if let Ok(dt) = DateTime::parse_from_rfc2822(text) {
            return Some(dt.with_timezone(tz));
        }
        NAIVE_FORMATS
            .iter()
            .find_map(|fmt| NaiveDateTime::parse_from_str(text, fmt).ok())
            .and_then(|naive| tz.from_local_datetime(&naive).earliest())
    }
}
