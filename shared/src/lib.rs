//! Shared types for the FixHub repair-shop platform
//!
//! Common types used across crates: the unified error system,
//! client-facing DTOs, and small utilities.

pub mod client;
pub mod error;
pub mod util;

// Re-exports
pub use axum::{Json, body};
pub use error::{ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode};
pub use http;
pub use serde::{Deserialize, Serialize};
