//! SeaORM-based PlayerScore repository implementation
//!
//! This provides a database-agnostic repository for the leaderboard's
//! upsert-by-identity write path and the ranked top-N read query.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, Set,
};
use std::sync::Arc;
use uuid::Uuid;

use crate::entities::{player_scores, prelude::PlayerScores};
use crate::errors::RepositoryResult;
use crate::models::PlayerScore;

/// SeaORM-based repository for PlayerScore operations
#[derive(Clone)]
pub struct PlayerScoreSeaOrmRepository {
    connection: Arc<DatabaseConnection>,
}

impl PlayerScoreSeaOrmRepository {
    /// Create a new repository instance
    pub fn new(connection: Arc<DatabaseConnection>) -> Self {
        Self { connection }
    }

    /// Create or overwrite the score record for a client identity (upsert)
    ///
    /// Last-write-wins: name and score are replaced unconditionally and
    /// `updated_at` is stamped on every write.
    pub async fn upsert_score(
        &self,
        client_ip: &str,
        name: &str,
        score: i64,
    ) -> RepositoryResult<PlayerScore> {
        let existing = PlayerScores::find()
            .filter(player_scores::Column::ClientIp.eq(client_ip))
            .one(&*self.connection)
            .await?;

        let now = Utc::now();

        match existing {
            Some(existing_model) => {
                let mut active_model: player_scores::ActiveModel = existing_model.into();

                active_model.name = Set(name.to_string());
                active_model.score = Set(score);
                active_model.updated_at = Set(now);

                let updated_model = active_model.update(&*self.connection).await?;
                Ok(Self::model_to_domain(updated_model))
            }
            None => {
                let active_model = player_scores::ActiveModel {
                    id: Set(Uuid::new_v4()),
                    client_ip: Set(client_ip.to_string()),
                    name: Set(name.to_string()),
                    score: Set(score),
                    created_at: Set(now),
                    updated_at: Set(now),
                };

                let model = active_model.insert(&*self.connection).await?;
                Ok(Self::model_to_domain(model))
            }
        }
    }

    /// Fetch the top `limit` records ordered by (score desc, updated_at asc)
    ///
    /// Earlier update wins score ties.
    pub async fn top_scores(&self, limit: u64) -> RepositoryResult<Vec<PlayerScore>> {
        let models = PlayerScores::find()
            .order_by_desc(player_scores::Column::Score)
            .order_by_asc(player_scores::Column::UpdatedAt)
            .limit(limit)
            .all(&*self.connection)
            .await?;

        Ok(models.into_iter().map(Self::model_to_domain).collect())
    }

    /// Find a record by client identity
    pub async fn find_by_client_ip(&self, client_ip: &str) -> RepositoryResult<Option<PlayerScore>> {
        let model = PlayerScores::find()
            .filter(player_scores::Column::ClientIp.eq(client_ip))
            .one(&*self.connection)
            .await?;

        Ok(model.map(Self::model_to_domain))
    }

    /// Count all stored records
    pub async fn count(&self) -> RepositoryResult<u64> {
        Ok(PlayerScores::find().count(&*self.connection).await?)
    }

    /// Convert SeaORM model to domain model
    fn model_to_domain(model: player_scores::Model) -> PlayerScore {
        PlayerScore {
            id: model.id,
            client_ip: model.client_ip,
            name: model.name,
            score: model.score,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;
    use chrono::TimeZone;
    use sea_orm::{ConnectionTrait, DatabaseBackend, Statement};

    async fn create_test_connection() -> Result<Arc<DatabaseConnection>> {
        // Unit tests only exercise repository logic, so a minimal table
        // created by hand is enough; migrations are covered elsewhere.
        let connection = sea_orm::Database::connect("sqlite::memory:").await?;
        let connection = Arc::new(connection);

        connection
            .execute(Statement::from_string(
                DatabaseBackend::Sqlite,
                r#"
            CREATE TABLE player_scores (
                id TEXT PRIMARY KEY,
                client_ip TEXT NOT NULL UNIQUE,
                name TEXT NOT NULL,
                score BIGINT NOT NULL,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL
            );
            "#
                .to_string(),
            ))
            .await?;

        Ok(connection)
    }

    #[tokio::test]
    async fn test_upsert_creates_then_overwrites() -> Result<()> {
        let connection = create_test_connection().await?;
        let repo = PlayerScoreSeaOrmRepository::new(connection);

        let created = repo.upsert_score("10.0.0.1", "Ada", 50).await?;
        assert_eq!(created.name, "Ada");
        assert_eq!(created.score, 50);

        // Second submission from the same identity overwrites, not merges
        let updated = repo.upsert_score("10.0.0.1", "Grace", 30).await?;
        assert_eq!(updated.id, created.id);
        assert_eq!(updated.name, "Grace");
        assert_eq!(updated.score, 30);
        assert!(updated.updated_at >= created.updated_at);

        assert_eq!(repo.count().await?, 1);

        let found = repo.find_by_client_ip("10.0.0.1").await?;
        assert_eq!(found.map(|r| r.name), Some("Grace".to_string()));
        assert!(repo.find_by_client_ip("10.9.9.9").await?.is_none());
        Ok(())
    }

    #[tokio::test]
    async fn test_zero_score_is_stored() -> Result<()> {
        let connection = create_test_connection().await?;
        let repo = PlayerScoreSeaOrmRepository::new(connection);

        let record = repo.upsert_score("10.0.0.2", "Zero", 0).await?;
        assert_eq!(record.score, 0);
        Ok(())
    }

    #[tokio::test]
    async fn test_top_scores_orders_by_score_desc_then_updated_at_asc() -> Result<()> {
        let connection = create_test_connection().await?;
        let repo = PlayerScoreSeaOrmRepository::new(connection.clone());

        // Tied scores need controlled timestamps, so insert directly
        let earlier = Utc.with_ymd_and_hms(2026, 8, 1, 10, 0, 0).unwrap();
        let later = Utc.with_ymd_and_hms(2026, 8, 1, 11, 0, 0).unwrap();

        for (ip, name, score, updated_at) in [
            ("10.0.0.1", "second", 50, later),
            ("10.0.0.2", "first", 50, earlier),
            ("10.0.0.3", "third", 10, earlier),
            ("10.0.0.4", "top", 90, later),
        ] {
            player_scores::ActiveModel {
                id: Set(Uuid::new_v4()),
                client_ip: Set(ip.to_string()),
                name: Set(name.to_string()),
                score: Set(score),
                created_at: Set(updated_at),
                updated_at: Set(updated_at),
            }
            .insert(&*connection)
            .await?;
        }

        let top = repo.top_scores(20).await?;
        let names: Vec<&str> = top.iter().map(|r| r.name.as_str()).collect();

        // Earlier update wins the 50-point tie
        assert_eq!(names, vec!["top", "first", "second", "third"]);
        Ok(())
    }

    #[tokio::test]
    async fn test_top_scores_respects_limit() -> Result<()> {
        let connection = create_test_connection().await?;
        let repo = PlayerScoreSeaOrmRepository::new(connection);

        for i in 0..21 {
            repo.upsert_score(&format!("10.0.1.{i}"), &format!("player-{i}"), i)
                .await?;
        }

        let top = repo.top_scores(20).await?;
        assert_eq!(top.len(), 20);

        // The lowest scorer (score 0) is the one cut off
        assert!(top.iter().all(|r| r.score >= 1));
        assert_eq!(top.first().map(|r| r.score), Some(20));
        Ok(())
    }
}
