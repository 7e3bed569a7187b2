//! Error handling - re-exports the unified error types from shared

pub use shared::error::{ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode};
