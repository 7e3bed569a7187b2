//! Authentication and access control
//!
//! - [`jwt`]: token service and [`CurrentUser`] context
//! - [`scope`]: role-based access scope resolution
//! - [`middleware`]: route protection
//! - [`extractor`]: axum extractor for [`CurrentUser`]

pub mod extractor;
pub mod jwt;
pub mod middleware;
pub mod scope;

pub use jwt::{Claims, CurrentUser, JwtConfig, JwtError, JwtService};
pub use middleware::require_auth;
pub use scope::{Resource, Scope, StoreFilter};
