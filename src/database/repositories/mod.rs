//! SeaORM repository implementations

pub mod player_score;

pub use player_score::PlayerScoreSeaOrmRepository;
