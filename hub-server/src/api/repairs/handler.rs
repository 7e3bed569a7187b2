//! Repair ticket handlers
//!
//! Status moves freely between the six states. Deletion additionally
//! requires the administrative passphrase from the configuration.

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;

use crate::api::{ListQuery, matches_query, resolve_list_scope};
use crate::auth::{CurrentUser, Resource, Scope};
use crate::core::ServerState;
use crate::db::models::{Repair, RepairPayload};
use crate::db::repository::RepairRepository;
use crate::reports::{BoardColumn, board_columns};
use crate::security_log;
use crate::utils::{AppError, AppResult, ErrorCode};
use shared::client::Snapshot;

const RESOURCE_REPAIR: &str = "repair";

fn matches_search(repair: &Repair, q: &str) -> bool {
    matches_query(&repair.customer_name, q)
        || matches_query(&repair.device_details, q)
        || matches_query(&repair.serial_number, q)
        || matches_query(repair.status.as_str(), q)
}

/// GET /api/repairs?store=&q=
pub async fn list(
    State(state): State<ServerState>,
    user: CurrentUser,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<Snapshot<Repair>>> {
    let scope = resolve_list_scope(&state, &user, Resource::Repairs, &query).await?;

    let repo = RepairRepository::new(state.db.clone());
    let mut repairs = repo.find_scoped(&scope.filter).await?;

    if let Some(q) = query.q.as_deref() {
        repairs.retain(|r| matches_search(r, q));
    }

    let version = state.next_version(RESOURCE_REPAIR);
    Ok(Json(Snapshot::new(version, repairs)))
}

/// GET /api/repairs/board?store=&q=
///
/// Kanban projection: all six columns in canonical order, empty ones
/// included.
pub async fn board(
    State(state): State<ServerState>,
    user: CurrentUser,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<Vec<BoardColumn>>> {
    let scope = resolve_list_scope(&state, &user, Resource::Repairs, &query).await?;

    let repo = RepairRepository::new(state.db.clone());
    let mut repairs = repo.find_scoped(&scope.filter).await?;

    if let Some(q) = query.q.as_deref() {
        repairs.retain(|r| matches_search(r, q));
    }

    Ok(Json(board_columns(&repairs)))
}

/// GET /api/repairs/{id}
pub async fn get_by_id(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<String>,
) -> AppResult<Json<Repair>> {
    let scope = Scope::resolve(&user, Resource::Repairs)?;
    scope.require_view()?;

    let repo = RepairRepository::new(state.db.clone());
    let repair = repo
        .find_by_id(&id)
        .await?
        .filter(|r| scope.covers(&r.store_id))
        .ok_or_else(|| AppError::new(ErrorCode::RepairNotFound))?;
    Ok(Json(repair))
}

/// POST /api/repairs
pub async fn create(
    State(state): State<ServerState>,
    user: CurrentUser,
    Json(payload): Json<RepairPayload>,
) -> AppResult<Json<Repair>> {
    let scope = Scope::resolve(&user, Resource::Repairs)?;
    scope.require_create()?;
    payload.validate()?;

    let store = scope
        .single_store()
        .cloned()
        .ok_or_else(|| AppError::new(ErrorCode::StoreNotAssigned))?;

    let repo = RepairRepository::new(state.db.clone());
    let repair = repo.create(store, payload).await?;
    Ok(Json(repair))
}

/// PUT /api/repairs/{id}
pub async fn update(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<String>,
    Json(payload): Json<RepairPayload>,
) -> AppResult<Json<Repair>> {
    let scope = Scope::resolve(&user, Resource::Repairs)?;
    scope.require_update()?;
    payload.validate()?;

    let repo = RepairRepository::new(state.db.clone());
    repo.find_by_id(&id)
        .await?
        .filter(|r| scope.covers(&r.store_id))
        .ok_or_else(|| AppError::new(ErrorCode::RepairNotFound))?;

    let repair = repo.update(&id, payload).await?;
    Ok(Json(repair))
}

/// Body for DELETE /api/repairs/{id}
#[derive(Debug, Deserialize, Default)]
pub struct DeleteRepairRequest {
    #[serde(default)]
    pub passphrase: Option<String>,
}

/// DELETE /api/repairs/{id}
///
/// Requires the REPAIR_DELETE_PASSPHRASE from the configuration. When
/// no passphrase is configured, deletion is always refused.
pub async fn delete(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<String>,
    body: Option<Json<DeleteRepairRequest>>,
) -> AppResult<Json<bool>> {
    let scope = Scope::resolve(&user, Resource::Repairs)?;
    scope.require_delete()?;

    let supplied = body.and_then(|Json(b)| b.passphrase);
    let configured = state.config.repair_delete_passphrase.as_deref();

    let passphrase_ok = matches!(
        (configured, supplied.as_deref()),
        (Some(expected), Some(given)) if expected == given
    );
    if !passphrase_ok {
        security_log!(
            "WARN",
            "repair_delete_refused",
            account_id = user.id.clone(),
            repair_id = id.clone()
        );
        return Err(AppError::new(ErrorCode::DeletePassphraseInvalid));
    }

    let repo = RepairRepository::new(state.db.clone());
    repo.find_by_id(&id)
        .await?
        .filter(|r| scope.covers(&r.store_id))
        .ok_or_else(|| AppError::new(ErrorCode::RepairNotFound))?;

    repo.delete(&id).await?;
    tracing::info!(repair_id = %id, "Repair ticket deleted");
    Ok(Json(true))
}
