//! Stock ledger handlers
//!
//! Operators manage the stock of their own store; super admins see
//! everything read-only. Any store id in the payload is ignored, the
//! record always lands in the caller's store.

use axum::{
    Json,
    extract::{Path, Query, State},
};

use crate::api::{ListQuery, matches_query, resolve_list_scope};
use crate::auth::{CurrentUser, Resource, Scope};
use crate::core::ServerState;
use crate::db::models::{Product, ProductPayload};
use crate::db::repository::ProductRepository;
use crate::utils::{AppError, AppResult, ErrorCode};
use shared::client::Snapshot;

const RESOURCE_PRODUCT: &str = "product";

fn matches_search(product: &Product, q: &str) -> bool {
    matches_query(&product.name, q)
        || product
            .category
            .as_deref()
            .is_some_and(|c| matches_query(c, q))
        || product
            .vendor
            .as_deref()
            .is_some_and(|v| matches_query(v, q))
        || product
            .location
            .as_deref()
            .is_some_and(|l| matches_query(l, q))
        || product.serials.iter().any(|s| matches_query(s, q))
}

/// GET /api/products?store=&q=
pub async fn list(
    State(state): State<ServerState>,
    user: CurrentUser,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<Snapshot<Product>>> {
    let scope = resolve_list_scope(&state, &user, Resource::Products, &query).await?;

    let repo = ProductRepository::new(state.db.clone());
    let mut products = repo.find_scoped(&scope.filter).await?;

    if let Some(q) = query.q.as_deref() {
        products.retain(|p| matches_search(p, q));
    }

    let version = state.next_version(RESOURCE_PRODUCT);
    Ok(Json(Snapshot::new(version, products)))
}

/// GET /api/products/{id}
pub async fn get_by_id(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<String>,
) -> AppResult<Json<Product>> {
    let scope = Scope::resolve(&user, Resource::Products)?;
    scope.require_view()?;

    let repo = ProductRepository::new(state.db.clone());
    let product = repo
        .find_by_id(&id)
        .await?
        .filter(|p| scope.covers(&p.store_id))
        .ok_or_else(|| AppError::new(ErrorCode::ProductNotFound))?;
    Ok(Json(product))
}

/// POST /api/products
pub async fn create(
    State(state): State<ServerState>,
    user: CurrentUser,
    Json(payload): Json<ProductPayload>,
) -> AppResult<Json<Product>> {
    let scope = Scope::resolve(&user, Resource::Products)?;
    scope.require_create()?;
    payload.validate()?;

    let store = scope
        .single_store()
        .cloned()
        .ok_or_else(|| AppError::new(ErrorCode::StoreNotAssigned))?;

    let repo = ProductRepository::new(state.db.clone());
    let product = repo.create(store, payload).await?;
    Ok(Json(product))
}

/// PUT /api/products/{id}
pub async fn update(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<String>,
    Json(payload): Json<ProductPayload>,
) -> AppResult<Json<Product>> {
    let scope = Scope::resolve(&user, Resource::Products)?;
    scope.require_update()?;
    payload.validate()?;

    let repo = ProductRepository::new(state.db.clone());
    // Ownership check before the write
    repo.find_by_id(&id)
        .await?
        .filter(|p| scope.covers(&p.store_id))
        .ok_or_else(|| AppError::new(ErrorCode::ProductNotFound))?;

    let product = repo.update(&id, payload).await?;
    Ok(Json(product))
}

/// DELETE /api/products/{id}
pub async fn delete(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<String>,
) -> AppResult<Json<bool>> {
    let scope = Scope::resolve(&user, Resource::Products)?;
    scope.require_delete()?;

    let repo = ProductRepository::new(state.db.clone());
    repo.find_by_id(&id)
        .await?
        .filter(|p| scope.covers(&p.store_id))
        .ok_or_else(|| AppError::new(ErrorCode::ProductNotFound))?;

    repo.delete(&id).await?;
    Ok(Json(true))
}
