pub use super::player_scores::Entity as PlayerScores;
