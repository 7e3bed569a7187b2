//! HTTP API
//!
//! Route modules nest under `/api/<entity>`, one `router()` per module.

pub mod auth;
pub mod health;
pub mod products;
pub mod repairs;
pub mod reports;
pub mod requests;
pub mod stores;

use crate::auth::{CurrentUser, Resource, Scope};
use crate::core::ServerState;
use crate::db::repository::StoreRepository;
use crate::utils::AppError;
use serde::Deserialize;
use shared::error::ErrorCode;

/// Common list query parameters
///
/// - `store`: restrict an all-stores view to one store (super admin only)
/// - `q`: free-text search
#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    pub store: Option<String>,
    pub q: Option<String>,
}

/// Resolve the caller's scope for a list endpoint, applying the
/// optional `?store=` selector.
///
/// Only super admins may select a store; an unknown store id is a 404.
pub async fn resolve_list_scope(
    state: &ServerState,
    user: &CurrentUser,
    resource: Resource,
    query: &ListQuery,
) -> Result<Scope, AppError> {
    let scope = Scope::resolve(user, resource)?;
    scope.require_view()?;

    let Some(store_sel) = query.store.as_deref() else {
        return Ok(scope);
    };

    if !user.is_super_admin() {
        return Err(AppError::new(ErrorCode::PermissionDenied));
    }

    let store_repo = StoreRepository::new(state.db.clone());
    let store = store_repo
        .find_by_id(store_sel)
        .await
        .map_err(|_| AppError::new(ErrorCode::StoreNotFound))?
        .ok_or_else(|| AppError::new(ErrorCode::StoreNotFound))?;

    let store_id = store
        .id
        .ok_or_else(|| AppError::internal("Store record missing id"))?;
    scope.narrowed(store_id)
}

/// Case-insensitive substring match helper for `?q=` filters
pub(crate) fn matches_query(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}
