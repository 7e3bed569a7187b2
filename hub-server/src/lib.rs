//! FixHub Server - multi-store repair shop management hub
//!
//! # Architecture
//!
//! - **Auth** (`auth`): JWT + Argon2, role-based access scopes
//! - **Database** (`db`): embedded SurrealDB storage
//! - **HTTP API** (`api`): RESTful routes per entity
//! - **Reports** (`reports`): CSV exports and the repair board
//!
//! # Module structure
//!
//! ```text
//! hub-server/src/
//! ├── core/          # configuration, state, server lifecycle
//! ├── auth/          # JWT auth, scope resolution
//! ├── services/      # HTTP service
//! ├── api/           # routes and handlers
//! ├── reports/       # CSV and board projections
//! ├── utils/         # logger, validation, error re-exports
//! └── db/            # models and repositories
//! ```

pub mod api;
pub mod auth;
pub mod core;
pub mod db;
pub mod reports;
pub mod services;
pub mod utils;

// Re-export common types
pub use auth::{CurrentUser, JwtService, Resource, Scope, StoreFilter};
pub use core::{Config, Server, ServerState};
pub use utils::{ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode};
pub use utils::logger::{init_logger, init_logger_with_file};

// Security logging macro - supports tracing format specifiers
#[macro_export]
macro_rules! security_log {
    ($level:expr, $event:expr, $($key:ident = $value:expr),*) => {
        tracing::info!(
            target: "security",
            level = $level,
            event = $event,
            $($key = $value),*
        );
    };
}

/// Load .env, create the work directory and initialize logging
pub fn setup_environment() -> Result<(), Box<dyn std::error::Error>> {
    dotenv::dotenv().ok();

    let config = Config::from_env();
    config.ensure_work_dir_structure()?;

    let log_level = std::env::var("LOG_LEVEL").ok();
    let logs_dir = config.logs_dir();
    init_logger_with_file(log_level.as_deref(), logs_dir.to_str());

    Ok(())
}

pub fn print_banner() {
    println!(
        r#"
    ______ _       __  __      __
   / ____/(_)_  __/ / / /_  __/ /_
  / /_   / /| |/_/ /_/ / / / / __ \
 / __/  / /_>  </ __  / /_/ / /_/ /
/_/    /_//_/|_/_/ /_/\__,_/_.___/
    "#
    );
}
