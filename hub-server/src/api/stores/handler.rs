//! Store directory handlers
//!
//! Super admin only. Operators resolve to a no-rights scope and get
//! PermissionDenied on every route here.

use axum::{
    Json,
    extract::{Path, State},
};

use crate::auth::{CurrentUser, Resource, Scope};
use crate::core::ServerState;
use crate::db::models::{Store, StorePayload};
use crate::db::repository::StoreRepository;
use crate::utils::{AppError, AppResult, ErrorCode};
use shared::client::Snapshot;

const RESOURCE_STORE: &str = "store";

/// GET /api/stores
pub async fn list(
    State(state): State<ServerState>,
    user: CurrentUser,
) -> AppResult<Json<Snapshot<Store>>> {
    let scope = Scope::resolve(&user, Resource::Stores)?;
    scope.require_view()?;

    let repo = StoreRepository::new(state.db.clone());
    let stores = repo.find_all().await?;

    let version = state.next_version(RESOURCE_STORE);
    Ok(Json(Snapshot::new(version, stores)))
}

/// GET /api/stores/{id}
pub async fn get_by_id(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<String>,
) -> AppResult<Json<Store>> {
    let scope = Scope::resolve(&user, Resource::Stores)?;
    scope.require_view()?;

    let repo = StoreRepository::new(state.db.clone());
    let store = repo
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::StoreNotFound))?;
    Ok(Json(store))
}

/// POST /api/stores
pub async fn create(
    State(state): State<ServerState>,
    user: CurrentUser,
    Json(payload): Json<StorePayload>,
) -> AppResult<Json<Store>> {
    let scope = Scope::resolve(&user, Resource::Stores)?;
    scope.require_create()?;
    payload.validate()?;

    let repo = StoreRepository::new(state.db.clone());
    let store = repo.create(payload).await?;

    tracing::info!(store = %store.name, "Store created");
    Ok(Json(store))
}

/// PUT /api/stores/{id}
pub async fn update(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<String>,
    Json(payload): Json<StorePayload>,
) -> AppResult<Json<Store>> {
    let scope = Scope::resolve(&user, Resource::Stores)?;
    scope.require_update()?;
    payload.validate()?;

    let repo = StoreRepository::new(state.db.clone());
    let store = repo.update(&id, payload).await?;
    Ok(Json(store))
}

/// DELETE /api/stores/{id}
///
/// Removes the store and everything belonging to it in one transaction.
pub async fn delete(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<String>,
) -> AppResult<Json<bool>> {
    let scope = Scope::resolve(&user, Resource::Stores)?;
    scope.require_delete()?;

    let repo = StoreRepository::new(state.db.clone());
    repo.delete_cascade(&id).await?;

    tracing::info!(store_id = %id, "Store deleted with all dependent records");
    Ok(Json(true))
}
