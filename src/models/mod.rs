//! Domain models
//!
//! Persisted records and the transient ranked view derived from them.

use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

/// A persisted player score record, one per client identity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerScore {
    pub id: Uuid,
    pub client_ip: String,
    pub name: String,
    pub score: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A ranked leaderboard entry derived from a [`PlayerScore`]
///
/// The record id is carried for the post-write lookup but never serialized;
/// client identity stays internal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardEntry {
    #[serde(skip)]
    pub id: Uuid,
    pub name: String,
    pub score: i64,
    pub updated_at: DateTime<Utc>,
    /// 1-based position after sorting by (score desc, updated_at asc)
    pub rank: u32,
}

/// The caller's own entry echoed back after a submission
///
/// `rank` is `null` when the written score fell outside the ranked snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SubmittedEntry {
    pub name: String,
    pub score: i64,
    pub updated_at: DateTime<Utc>,
    pub rank: Option<u32>,
}
