//! CSV report API

mod handler;

use axum::{Router, routing::get};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/reports", report_routes())
}

fn report_routes() -> Router<ServerState> {
    Router::new()
        .route("/products", get(handler::products))
        .route("/repairs", get(handler::repairs))
}
