//! Leaderboard service
//!
//! Owns the ranked snapshot cache and the two operations built on it:
//! serving the cached top-N view and recording score submissions.
//!
//! The cache is a single read-through snapshot, not per-key: the whole
//! ranked view is one cache unit, rebuilt in bulk and replaced atomically.
//! Rebuilds are serialized behind a mutex so a burst of expiring reads or
//! concurrent writes coalesces into one store query instead of racing
//! rebuilds that overwrite each other.

use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::{Mutex, RwLock};
use tracing::debug;

use crate::config::LeaderboardConfig;
use crate::database::repositories::PlayerScoreSeaOrmRepository;
use crate::errors::{AppError, AppResult};
use crate::models::{LeaderboardEntry, SubmittedEntry};

/// A complete ranked snapshot with its refresh instant
struct CachedSnapshot {
    entries: Arc<Vec<LeaderboardEntry>>,
    refreshed_at: Instant,
}

/// Snapshot cache state: absent until the first refresh
struct LeaderboardCache {
    snapshot: RwLock<Option<CachedSnapshot>>,
    refresh_lock: Mutex<()>,
    ttl: Duration,
}

impl LeaderboardCache {
    fn new(ttl: Duration) -> Self {
        Self {
            snapshot: RwLock::new(None),
            refresh_lock: Mutex::new(()),
            ttl,
        }
    }

    /// Return the snapshot if it has been populated, is within the freshness
    /// window, and is non-empty. An empty snapshot is always rebuilt.
    async fn fresh(&self) -> Option<Arc<Vec<LeaderboardEntry>>> {
        let guard = self.snapshot.read().await;
        guard.as_ref().and_then(|cached| {
            if cached.refreshed_at.elapsed() < self.ttl && !cached.entries.is_empty() {
                Some(cached.entries.clone())
            } else {
                None
            }
        })
    }

    async fn store(&self, entries: Arc<Vec<LeaderboardEntry>>) {
        let mut guard = self.snapshot.write().await;
        *guard = Some(CachedSnapshot {
            entries,
            refreshed_at: Instant::now(),
        });
    }
}

/// Leaderboard read/write operations over the player score store
#[derive(Clone)]
pub struct LeaderboardService {
    repository: PlayerScoreSeaOrmRepository,
    cache: Arc<LeaderboardCache>,
    top_entries: u64,
}

impl LeaderboardService {
    pub fn new(repository: PlayerScoreSeaOrmRepository, config: &LeaderboardConfig) -> Self {
        Self {
            repository,
            cache: Arc::new(LeaderboardCache::new(config.cache_ttl)),
            top_entries: config.top_entries,
        }
    }

    /// Serve the ranked top-N snapshot, rebuilding it when stale
    pub async fn leaderboard(&self) -> AppResult<Arc<Vec<LeaderboardEntry>>> {
        if let Some(entries) = self.cache.fresh().await {
            return Ok(entries);
        }

        let _guard = self.cache.refresh_lock.lock().await;

        // Another request may have finished a rebuild while we waited
        if let Some(entries) = self.cache.fresh().await {
            return Ok(entries);
        }

        self.rebuild_snapshot().await
    }

    /// Record a score submission keyed by client identity
    ///
    /// Validation happens before any store access. After the upsert the
    /// cache is rebuilt unconditionally so the caller's new rank is visible
    /// in the very next read. A score that falls outside the ranked
    /// snapshot is still a successful write; it just comes back unranked.
    pub async fn submit_score(
        &self,
        client_ip: &str,
        name: &str,
        score: i64,
    ) -> AppResult<SubmittedEntry> {
        if name.is_empty() {
            return Err(AppError::validation("Invalid input, name is required"));
        }
        if score < 0 {
            return Err(AppError::validation(
                "Invalid input, score must be a non-negative number",
            ));
        }

        let record = self.repository.upsert_score(client_ip, name, score).await?;

        let entries = {
            let _guard = self.cache.refresh_lock.lock().await;
            self.rebuild_snapshot().await?
        };

        let rank = entries
            .iter()
            .find(|entry| entry.id == record.id)
            .map(|entry| entry.rank);

        if rank.is_none() {
            debug!(
                name = %record.name,
                score = record.score,
                "Submitted score fell outside the ranked snapshot"
            );
        }

        Ok(SubmittedEntry {
            name: record.name,
            score: record.score,
            updated_at: record.updated_at,
            rank,
        })
    }

    /// Query the store and replace the cached snapshot
    ///
    /// Callers must hold `refresh_lock`. Rank is recomputed from scratch on
    /// every rebuild, never patched incrementally.
    async fn rebuild_snapshot(&self) -> AppResult<Arc<Vec<LeaderboardEntry>>> {
        let records = self.repository.top_scores(self.top_entries).await?;

        let entries: Vec<LeaderboardEntry> = records
            .into_iter()
            .enumerate()
            .map(|(index, record)| LeaderboardEntry {
                id: record.id,
                name: record.name,
                score: record.score,
                updated_at: record.updated_at,
                rank: (index + 1) as u32,
            })
            .collect();

        let entries = Arc::new(entries);
        self.cache.store(entries.clone()).await;

        Ok(entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;
    use sea_orm::{ConnectionTrait, DatabaseBackend, Statement};

    async fn create_test_service(config: LeaderboardConfig) -> Result<LeaderboardService> {
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

        let repository = PlayerScoreSeaOrmRepository::new(connection);
        Ok(LeaderboardService::new(repository, &config))
    }

    fn repository(service: &LeaderboardService) -> PlayerScoreSeaOrmRepository {
        service.repository.clone()
    }

    #[tokio::test]
    async fn test_empty_store_returns_empty_list() -> Result<()> {
        let service = create_test_service(LeaderboardConfig::default()).await?;

        let entries = service.leaderboard().await?;
        assert!(entries.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn test_submission_is_visible_in_next_read() -> Result<()> {
        let service = create_test_service(LeaderboardConfig::default()).await?;

        let player = service.submit_score("10.0.0.1", "Ada", 50).await?;
        assert_eq!(player.rank, Some(1));

        let entries = service.leaderboard().await?;
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].name, "Ada");
        assert_eq!(entries[0].score, 50);
        assert_eq!(entries[0].rank, 1);
        Ok(())
    }

    #[tokio::test]
    async fn test_resubmission_overwrites_not_merges() -> Result<()> {
        let service = create_test_service(LeaderboardConfig::default()).await?;

        service.submit_score("10.0.0.1", "Ada", 50).await?;
        let second = service.submit_score("10.0.0.1", "Ada", 30).await?;

        // Last write wins, no max-score merge
        assert_eq!(second.score, 30);

        let entries = service.leaderboard().await?;
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].score, 30);
        Ok(())
    }

    #[tokio::test]
    async fn test_empty_name_rejected_without_store_mutation() -> Result<()> {
        let service = create_test_service(LeaderboardConfig::default()).await?;

        let err = service.submit_score("10.0.0.1", "", 50).await.unwrap_err();
        assert!(matches!(err, AppError::Validation { .. }));
        assert_eq!(repository(&service).count().await?, 0);
        Ok(())
    }

    #[tokio::test]
    async fn test_negative_score_rejected_without_store_mutation() -> Result<()> {
        let service = create_test_service(LeaderboardConfig::default()).await?;

        let err = service
            .submit_score("10.0.0.1", "Ada", -5)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation { .. }));
        assert_eq!(repository(&service).count().await?, 0);
        Ok(())
    }

    #[tokio::test]
    async fn test_zero_score_accepted() -> Result<()> {
        let service = create_test_service(LeaderboardConfig::default()).await?;

        let player = service.submit_score("10.0.0.1", "Zero", 0).await?;
        assert_eq!(player.score, 0);
        assert_eq!(player.rank, Some(1));
        Ok(())
    }

    #[tokio::test]
    async fn test_read_within_window_ignores_interim_store_changes() -> Result<()> {
        let service = create_test_service(LeaderboardConfig::default()).await?;

        service.submit_score("10.0.0.1", "Ada", 50).await?;
        let first_read = service.leaderboard().await?;

        // Write behind the cache's back, without the forced refresh
        repository(&service)
            .upsert_score("10.0.0.2", "Grace", 99)
            .await?;

        let second_read = service.leaderboard().await?;
        assert_eq!(*first_read, *second_read);
        assert_eq!(second_read.len(), 1);
        Ok(())
    }

    #[tokio::test]
    async fn test_write_forces_refresh_past_freshness_window() -> Result<()> {
        let service = create_test_service(LeaderboardConfig::default()).await?;

        service.submit_score("10.0.0.1", "Ada", 50).await?;
        service.leaderboard().await?;

        // The snapshot is fresh, but the write must still rebuild it
        service.submit_score("10.0.0.2", "Grace", 99).await?;

        let entries = service.leaderboard().await?;
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].name, "Grace");
        assert_eq!(entries[0].rank, 1);
        assert_eq!(entries[1].name, "Ada");
        assert_eq!(entries[1].rank, 2);
        Ok(())
    }

    #[tokio::test]
    async fn test_snapshot_caps_at_configured_top_entries() -> Result<()> {
        let service = create_test_service(LeaderboardConfig::default()).await?;

        for i in 0..21 {
            service
                .submit_score(&format!("10.0.1.{i}"), &format!("player-{i}"), i)
                .await?;
        }

        let entries = service.leaderboard().await?;
        assert_eq!(entries.len(), 20);

        // The lowest scorer is excluded; ranks run 1..=20
        assert!(entries.iter().all(|e| e.score >= 1));
        let ranks: Vec<u32> = entries.iter().map(|e| e.rank).collect();
        assert_eq!(ranks, (1..=20).collect::<Vec<u32>>());
        Ok(())
    }

    #[tokio::test]
    async fn test_score_outside_snapshot_returns_unranked_success() -> Result<()> {
        let config = LeaderboardConfig {
            top_entries: 2,
            ..LeaderboardConfig::default()
        };
        let service = create_test_service(config).await?;

        service.submit_score("10.0.0.1", "first", 30).await?;
        service.submit_score("10.0.0.2", "second", 20).await?;
        let third = service.submit_score("10.0.0.3", "third", 10).await?;

        // The write succeeded even though the snapshot has no row for it
        assert_eq!(third.rank, None);
        assert_eq!(repository(&service).count().await?, 3);

        let entries = service.leaderboard().await?;
        assert_eq!(entries.len(), 2);
        Ok(())
    }
}
