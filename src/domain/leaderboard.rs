// Leaderboard domain model
use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer};
use std::fmt;

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct LeaderboardEntry {
    pub name: String,
    pub wins: i64,
    #[serde(default)]
    pub game_breakdown: GameBreakdown,
}

/// Per-game win counts, kept in the order the backend listed them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GameBreakdown(Vec<(String, i64)>);

impl GameBreakdown {
    pub fn iter(&self) -> impl Iterator<Item = (&str, i64)> {
        self.0.iter().map(|(game, wins)| (game.as_str(), *wins))
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    // Later duplicates overwrite in place, like a JS object literal.
    fn insert(&mut self, game: String, wins: i64) {
        match self.0.iter_mut().find(|(existing, _)| *existing == game) {
            Some(slot) => slot.1 = wins,
            None => self.0.push((game, wins)),
        }
    }
}

impl<S: Into<String>> FromIterator<(S, i64)> for GameBreakdown {
    fn from_iter<I: IntoIterator<Item = (S, i64)>>(iter: I) -> Self {
        let mut breakdown = GameBreakdown::default();
        for (game, wins) in iter {
            breakdown.insert(game.into(), wins);
        }
        breakdown
    }
}

impl<'de> Deserialize<'de> for GameBreakdown {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct BreakdownVisitor;

        impl<'de> Visitor<'de> for BreakdownVisitor {
            type Value = GameBreakdown;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map of game name to win count")
            }

            fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut breakdown = GameBreakdown(Vec::with_capacity(map.size_hint().unwrap_or(0)));
                while let Some((game, wins)) = map.next_entry::<String, i64>()? {
                    breakdown.insert(game, wins);
                }
                Ok(breakdown)
            }
        }

        deserializer.deserialize_map(BreakdownVisitor)
    }
}
