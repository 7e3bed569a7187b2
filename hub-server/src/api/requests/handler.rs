//! Stock request handlers
//!
//! Operators raise requests, super admins move them through the
//! lifecycle. Terminal requests never change again and nothing goes
//! back to Pending.

use axum::{
    Json,
    extract::{Path, Query, State},
};

use crate::api::{ListQuery, resolve_list_scope};
use crate::auth::{CurrentUser, Resource, Scope};
use crate::core::ServerState;
use crate::db::models::{RequestCreate, RequestStatusUpdate, StockRequest};
use crate::db::repository::RequestRepository;
use crate::utils::{AppError, AppResult, ErrorCode};
use shared::client::Snapshot;

const RESOURCE_REQUEST: &str = "inventory_request";

/// GET /api/requests?store=
pub async fn list(
    State(state): State<ServerState>,
    user: CurrentUser,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<Snapshot<StockRequest>>> {
    let scope = resolve_list_scope(&state, &user, Resource::Requests, &query).await?;

    let repo = RequestRepository::new(state.db.clone());
    let requests = repo.find_scoped(&scope.filter).await?;

    let version = state.next_version(RESOURCE_REQUEST);
    Ok(Json(Snapshot::new(version, requests)))
}

/// GET /api/requests/{id}
pub async fn get_by_id(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<String>,
) -> AppResult<Json<StockRequest>> {
    let scope = Scope::resolve(&user, Resource::Requests)?;
    scope.require_view()?;

    let repo = RequestRepository::new(state.db.clone());
    let request = repo
        .find_by_id(&id)
        .await?
        .filter(|r| scope.covers(&r.store_id))
        .ok_or_else(|| AppError::new(ErrorCode::RequestNotFound))?;
    Ok(Json(request))
}

/// POST /api/requests
pub async fn create(
    State(state): State<ServerState>,
    user: CurrentUser,
    Json(payload): Json<RequestCreate>,
) -> AppResult<Json<StockRequest>> {
    let scope = Scope::resolve(&user, Resource::Requests)?;
    scope.require_create()?;
    payload.validate()?;

    let store = scope
        .single_store()
        .cloned()
        .ok_or_else(|| AppError::new(ErrorCode::StoreNotAssigned))?;

    let repo = RequestRepository::new(state.db.clone());
    let request = repo.create(store, payload).await?;
    Ok(Json(request))
}

/// PUT /api/requests/{id}/status
pub async fn set_status(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<String>,
    Json(payload): Json<RequestStatusUpdate>,
) -> AppResult<Json<StockRequest>> {
    let scope = Scope::resolve(&user, Resource::Requests)?;
    scope.require_update()?;

    let repo = RequestRepository::new(state.db.clone());
    let current = repo
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::RequestNotFound))?;

    if current.status.is_terminal() {
        return Err(AppError::new(ErrorCode::RequestAlreadyFinal)
            .with_detail("status", current.status.as_str()));
    }
    if !current.status.can_transition_to(payload.status) {
        return Err(AppError::new(ErrorCode::RequestStatusInvalid)
            .with_detail("from", current.status.as_str())
            .with_detail("to", payload.status.as_str()));
    }

    let request = repo.set_status(&id, payload.status).await?;
    tracing::info!(
        request_id = %id,
        from = %current.status,
        to = %request.status,
        "Stock request status updated"
    );
    Ok(Json(request))
}
