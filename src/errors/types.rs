//! Error type definitions for the leaderboard service
//!
//! This module defines all error types used throughout the application,
//! using `thiserror` for automatic error trait implementations and proper
//! error chaining.

use thiserror::Error;

/// Top-level application error type
///
/// Represents all possible errors that can occur while serving requests.
/// The web layer maps each variant to an HTTP status code.
#[derive(Error, Debug)]
pub enum AppError {
    /// Database-related errors (SeaORM)
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    /// Repository layer errors
    #[error("Repository error: {0}")]
    Repository(#[from] RepositoryError),

    /// Validation errors (client-correctable, surfaced as 400)
    #[error("Validation error: {message}")]
    Validation { message: String },

    /// Generic internal errors (server-side bug signal, 500)
    #[error("Internal error: {message}")]
    Internal { message: String },
}

/// Repository layer specific errors
#[derive(Error, Debug)]
pub enum RepositoryError {
    /// Database errors from SeaORM
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),
}

/// Convenience methods for creating common error types
impl AppError {
    /// Create a validation error with a custom message
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Create an internal error
    pub fn internal<S: Into<String>>(message: S) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }
}
