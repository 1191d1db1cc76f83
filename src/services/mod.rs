//! Service layer

pub mod leaderboard;

pub use leaderboard::LeaderboardService;
