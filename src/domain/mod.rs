// Domain layer - Payload models shared by every other layer
pub mod game;
pub mod leaderboard;
pub mod snapshot;
