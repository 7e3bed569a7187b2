//! Repository Module
//!
//! CRUD operations for SurrealDB tables. Repositories stay thin: scope
//! decisions and workflow rules live in the handlers, repositories only
//! translate them into queries.

pub mod account;
pub mod product;
pub mod repair;
pub mod request;
pub mod store;

pub use account::AccountRepository;
pub use product::ProductRepository;
pub use repair::RepairRepository;
pub use request::RequestRepository;
pub use store::StoreRepository;

use shared::error::{AppError, ErrorCode};
use surrealdb::Surreal;
use surrealdb::engine::local::Db;
use thiserror::Error;

/// Repository error types
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Duplicate: {0}")]
    Duplicate(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Validation error: {0}")]
    Validation(String),
}

impl From<surrealdb::Error> for RepoError {
    fn from(err: surrealdb::Error) -> Self {
        RepoError::Database(err.to_string())
    }
}

impl From<RepoError> for AppError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::NotFound(msg) => AppError::with_message(ErrorCode::NotFound, msg),
            RepoError::Duplicate(msg) => AppError::with_message(ErrorCode::AlreadyExists, msg),
            RepoError::Validation(msg) => AppError::validation(msg),
            RepoError::Database(msg) => AppError::database(msg),
        }
    }
}

/// Result type for repository operations
pub type RepoResult<T> = Result<T, RepoError>;

// ID convention: all ids travel as "table:id" strings and parse into
// surrealdb::RecordId at the repository boundary.

/// Base repository with database reference
#[derive(Clone)]
pub struct BaseRepository {
    db: Surreal<Db>,
}

impl BaseRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self { db }
    }

    pub fn db(&self) -> &Surreal<Db> {
        &self.db
    }
}

/// Parse a "table:id" string, rejecting ids from other tables.
pub(crate) fn parse_id(id: &str, table: &str) -> RepoResult<surrealdb::RecordId> {
    let record: surrealdb::RecordId = id
        .parse()
        .map_err(|_| RepoError::Validation(format!("Invalid ID: {}", id)))?;
    if record.table() != table {
        return Err(RepoError::Validation(format!("Invalid ID: {}", id)));
    }
    Ok(record)
}
