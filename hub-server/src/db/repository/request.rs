//! Stock Request Repository

use super::{BaseRepository, RepoError, RepoResult, parse_id};
use crate::auth::StoreFilter;
use crate::db::models::{RequestCreate, RequestStatus, StockRequest};
use shared::util::now_millis;
use surrealdb::{RecordId, Surreal};
use surrealdb::engine::local::Db;

#[derive(Clone)]
pub struct RequestRepository {
    base: BaseRepository,
}

impl RequestRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Find requests visible through the given store filter
    pub async fn find_scoped(&self, filter: &StoreFilter) -> RepoResult<Vec<StockRequest>> {
        let requests: Vec<StockRequest> = match filter {
            StoreFilter::All => {
                self.base
                    .db()
                    .query("SELECT * FROM inventory_request ORDER BY created_at DESC")
                    .await?
                    .take(0)?
            }
            StoreFilter::Single(store) => {
                self.base
                    .db()
                    .query(
                        "SELECT * FROM inventory_request WHERE store_id = $store ORDER BY created_at DESC",
                    )
                    .bind(("store", store.clone()))
                    .await?
                    .take(0)?
            }
        };
        Ok(requests)
    }

    /// Find request by id
    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<StockRequest>> {
        let thing = parse_id(id, "inventory_request")?;
        let request: Option<StockRequest> = self.base.db().select(thing).await?;
        Ok(request)
    }

    /// Create a request in the given store. Always starts Pending.
    pub async fn create(&self, store: RecordId, data: RequestCreate) -> RepoResult<StockRequest> {
        let mut result = self
            .base
            .db()
            .query(
                r#"CREATE inventory_request SET
                    product_name = $product_name,
                    quantity = $quantity,
                    customer_name = $customer_name,
                    customer_phone = $customer_phone,
                    status = $status,
                    store_id = $store,
                    created_at = $created_at
                RETURN AFTER"#,
            )
            .bind(("product_name", data.product_name))
            .bind(("quantity", data.quantity))
            .bind(("customer_name", data.customer_name))
            .bind(("customer_phone", data.customer_phone))
            .bind(("status", RequestStatus::Pending))
            .bind(("store", store))
            .bind(("created_at", now_millis()))
            .await?;

        let created: Option<StockRequest> = result.take(0)?;
        created.ok_or_else(|| RepoError::Database("Failed to create request".to_string()))
    }

    /// Set the status of a request. Transition legality is checked by
    /// the caller against the current record.
    pub async fn set_status(&self, id: &str, status: RequestStatus) -> RepoResult<StockRequest> {
        let thing = parse_id(id, "inventory_request")?;
        let mut result = self
            .base
            .db()
            .query("UPDATE $thing SET status = $status RETURN AFTER")
            .bind(("thing", thing))
            .bind(("status", status))
            .await?;

        result
            .take::<Option<StockRequest>>(0)?
            .ok_or_else(|| RepoError::NotFound(format!("Request {} not found", id)))
    }
}
