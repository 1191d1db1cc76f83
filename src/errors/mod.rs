//! Centralized error handling for the leaderboard service
//!
//! This module unifies error types across the application layers and keeps
//! the mapping to HTTP status codes in one place (`web::responses`).
//!
//! # Error Categories
//!
//! - **Database Errors**: SeaORM operations, migrations, connection issues
//! - **Repository Errors**: Data access layer failures
//! - **Validation Errors**: Input validation failures (client-correctable)

pub mod types;

pub use types::*;

/// Convenience type alias for Results using AppError
pub type AppResult<T> = Result<T, AppError>;

/// Convenience type alias for Repository Results
pub type RepositoryResult<T> = Result<T, RepositoryError>;
