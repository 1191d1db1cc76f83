//! SeaORM entity definitions

pub mod player_scores;
pub mod prelude;
