//! Leaderboard HTTP handlers
//!
//! Thin wrappers around the leaderboard service, focusing only on HTTP
//! concerns like request/response mapping.

use axum::{extract::State, response::IntoResponse};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::{LeaderboardEntry, SubmittedEntry};
use crate::web::{
    AppState,
    extractors::{ClientIdentity, RequestContext, ValidatedJson},
    responses::{handle_error, handle_result, ok},
    utils::log_request,
};

/// Request DTO for submitting a score
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct SubmitScoreRequest {
    pub name: String,
    pub score: i64,
}

/// Response DTO for the ranked leaderboard view
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct LeaderboardResponse {
    pub leaderboard: Vec<LeaderboardEntry>,
}

/// Response DTO for a successful score submission
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct SubmitScoreResponse {
    pub message: String,
    pub player: SubmittedEntry,
}

/// Get the ranked top-20 leaderboard
#[utoipa::path(
    get,
    path = "/api/v1/leaderboard",
    tag = "leaderboard",
    responses(
        (status = 200, description = "Ranked leaderboard snapshot", body = LeaderboardResponse),
        (status = 500, description = "Store unavailable", body = crate::web::responses::ErrorResponse),
    )
)]
pub async fn get_leaderboard(
    State(state): State<AppState>,
    context: RequestContext,
) -> impl IntoResponse {
    log_request(
        &axum::http::Method::GET,
        &"/api/v1/leaderboard".parse().unwrap(),
        &context,
    );

    let result = state.leaderboard.leaderboard().await.map(|entries| {
        LeaderboardResponse {
            leaderboard: entries.as_ref().clone(),
        }
    });
    handle_result(result)
}

/// Submit a score for the calling client identity
#[utoipa::path(
    post,
    path = "/api/v1/leaderboard",
    tag = "leaderboard",
    request_body = SubmitScoreRequest,
    responses(
        (status = 200, description = "Score saved; caller's entry with rank", body = SubmitScoreResponse),
        (status = 400, description = "Missing name, negative or non-numeric score, or unresolvable client identity", body = crate::web::responses::ErrorResponse),
        (status = 500, description = "Store unavailable", body = crate::web::responses::ErrorResponse),
    )
)]
pub async fn submit_score(
    State(state): State<AppState>,
    context: RequestContext,
    identity: ClientIdentity,
    ValidatedJson(request): ValidatedJson<SubmitScoreRequest>,
) -> impl IntoResponse {
    log_request(
        &axum::http::Method::POST,
        &"/api/v1/leaderboard".parse().unwrap(),
        &context,
    );

    match state
        .leaderboard
        .submit_score(identity.as_str(), &request.name, request.score)
        .await
    {
        Ok(player) => ok(SubmitScoreResponse {
            message: "Score saved".to_string(),
            player,
        })
        .into_response(),
        Err(error) => handle_error(error).into_response(),
    }
}
