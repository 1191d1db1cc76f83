//! Request extractors and validation
//!
//! This module provides custom extractors for request validation and common
//! request processing needs. Client identity extraction lives here so the
//! "who is submitting" question has exactly one answer in the codebase.

use axum::{
    Json,
    extract::{FromRequest, FromRequestParts, Request},
    http::{StatusCode, request::Parts},
    response::{IntoResponse, Response},
};
use serde::de::DeserializeOwned;
use uuid::Uuid;

use super::responses::ErrorResponse;

/// Request context information
#[derive(Debug, Clone)]
pub struct RequestContext {
    pub user_agent: Option<String>,
    pub real_ip: Option<String>,
    pub request_id: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

impl Default for RequestContext {
    fn default() -> Self {
        Self {
            user_agent: None,
            real_ip: None,
            request_id: Uuid::new_v4().to_string(),
            timestamp: chrono::Utc::now(),
        }
    }
}

impl<S> FromRequestParts<S> for RequestContext
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user_agent = parts
            .headers
            .get("user-agent")
            .and_then(|h| h.to_str().ok())
            .map(|s| s.to_string());

        let real_ip = forwarded_client_ip(parts);

        Ok(Self {
            user_agent,
            real_ip,
            request_id: Uuid::new_v4().to_string(),
            timestamp: chrono::Utc::now(),
        })
    }
}

/// Client identity resolved from forwarding headers
///
/// Takes the first hop of `x-forwarded-for`, falling back to `x-real-ip`.
/// The value is caller-supplied and not authenticated; it is only used as
/// the deduplication key for score submissions. Rejects the request with
/// 400 when no usable value is present.
#[derive(Debug, Clone)]
pub struct ClientIdentity(pub String);

impl ClientIdentity {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl<S> FromRequestParts<S> for ClientIdentity
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        match forwarded_client_ip(parts) {
            Some(ip) if !ip.is_empty() && ip != "unknown" => Ok(Self(ip)),
            _ => Err((
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse::new("Bad request")),
            )
                .into_response()),
        }
    }
}

/// First usable client address from the forwarding headers
fn forwarded_client_ip(parts: &Parts) -> Option<String> {
    parts
        .headers
        .get("x-forwarded-for")
        .or_else(|| parts.headers.get("x-real-ip"))
        .and_then(|h| h.to_str().ok())
        .map(|s| s.split(',').next().unwrap_or(s).trim().to_string())
}

/// JSON extractor that maps every body rejection to a 400 error payload
///
/// Axum's stock `Json` answers malformed or mistyped bodies with 415/422;
/// this API treats all of those as client-correctable 400s.
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(Self(value)),
            Err(rejection) => Err((
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse::new(format!(
                    "Invalid request body: {}",
                    rejection.body_text()
                ))),
            )
                .into_response()),
        }
    }
}
