//! OpenAPI documentation generation using utoipa
//!
//! Handler functions are annotated with `#[utoipa::path]`; schema generation
//! happens at compile time via `#[derive(ToSchema)]`.

use utoipa::OpenApi;

/// OpenAPI specification for the leaderboard API
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Arcade Leaderboard API",
        description = "Score submission keyed by client identity and a cached top-20 ranked view."
    ),
    paths(
        crate::web::handlers::leaderboard::get_leaderboard,
        crate::web::handlers::leaderboard::submit_score,
    ),
    components(schemas(
        crate::models::LeaderboardEntry,
        crate::models::SubmittedEntry,
        crate::web::handlers::leaderboard::SubmitScoreRequest,
        crate::web::handlers::leaderboard::LeaderboardResponse,
        crate::web::handlers::leaderboard::SubmitScoreResponse,
        crate::web::responses::ErrorResponse,
    )),
    tags(
        (name = "leaderboard", description = "Ranked snapshot and score submission")
    )
)]
pub struct ApiDoc;

/// Build the OpenAPI specification
pub fn openapi_spec() -> utoipa::openapi::OpenApi {
    ApiDoc::openapi()
}
