//! CSV report handlers
//!
//! Exports exactly what the corresponding list endpoint would return:
//! resolver-scoped rows, optional store selector, optional search.

use axum::extract::{Query, State};
use axum::http::header;
use axum::response::IntoResponse;
use std::collections::HashMap;

use crate::api::{ListQuery, matches_query, resolve_list_scope};
use crate::auth::{CurrentUser, Resource};
use crate::core::ServerState;
use crate::db::models::{Product, Repair};
use crate::db::repository::{ProductRepository, RepairRepository, StoreRepository};
use crate::reports::{products_csv, repairs_csv};
use crate::utils::AppError;

fn csv_response(filename: &str, csv: String) -> impl IntoResponse {
    (
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", filename),
            ),
        ],
        csv,
    )
}

fn product_matches(product: &Product, q: &str) -> bool {
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

fn repair_matches(repair: &Repair, q: &str) -> bool {
    matches_query(&repair.customer_name, q)
        || matches_query(&repair.device_details, q)
        || matches_query(&repair.serial_number, q)
        || matches_query(repair.status.as_str(), q)
}

/// GET /api/reports/products?store=&q=
pub async fn products(
    State(state): State<ServerState>,
    user: CurrentUser,
    Query(query): Query<ListQuery>,
) -> Result<impl IntoResponse, AppError> {
    let scope = resolve_list_scope(&state, &user, Resource::Products, &query).await?;

    let repo = ProductRepository::new(state.db.clone());
    let mut products = repo.find_scoped(&scope.filter).await?;

    if let Some(q) = query.q.as_deref() {
        products.retain(|p| product_matches(p, q));
    }

    Ok(csv_response("products.csv", products_csv(&products)))
}

/// GET /api/reports/repairs?store=&q=
///
/// Super admin exports carry a Store column after Date.
pub async fn repairs(
    State(state): State<ServerState>,
    user: CurrentUser,
    Query(query): Query<ListQuery>,
) -> Result<impl IntoResponse, AppError> {
    let scope = resolve_list_scope(&state, &user, Resource::Repairs, &query).await?;

    let repo = RepairRepository::new(state.db.clone());
    let mut repairs = repo.find_scoped(&scope.filter).await?;

    if let Some(q) = query.q.as_deref() {
        repairs.retain(|r| repair_matches(r, q));
    }

    let store_names = if user.is_super_admin() {
        let store_repo = StoreRepository::new(state.db.clone());
        let map: HashMap<String, String> = store_repo
            .find_all()
            .await?
            .into_iter()
            .filter_map(|s| s.id.map(|id| (id.to_string(), s.name)))
            .collect();
        Some(map)
    } else {
        None
    };

    Ok(csv_response(
        "repairs.csv",
        repairs_csv(&repairs, store_names.as_ref()),
    ))
}
