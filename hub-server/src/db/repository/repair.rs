//! Repair Repository

use super::{BaseRepository, RepoError, RepoResult, parse_id};
use crate::auth::StoreFilter;
use crate::db::models::{Repair, RepairPayload};
use shared::util::now_millis;
use surrealdb::{RecordId, Surreal};
use surrealdb::engine::local::Db;

#[derive(Clone)]
pub struct RepairRepository {
    base: BaseRepository,
}

impl RepairRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Find repairs visible through the given store filter
    pub async fn find_scoped(&self, filter: &StoreFilter) -> RepoResult<Vec<Repair>> {
        let repairs: Vec<Repair> = match filter {
            StoreFilter::All => {
                self.base
                    .db()
                    .query("SELECT * FROM repair ORDER BY created_at DESC")
                    .await?
                    .take(0)?
            }
            StoreFilter::Single(store) => {
                self.base
                    .db()
                    .query("SELECT * FROM repair WHERE store_id = $store ORDER BY created_at DESC")
                    .bind(("store", store.clone()))
                    .await?
                    .take(0)?
            }
        };
        Ok(repairs)
    }

    /// Find repair by id
    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Repair>> {
        let thing = parse_id(id, "repair")?;
        let repair: Option<Repair> = self.base.db().select(thing).await?;
        Ok(repair)
    }

    /// Create a repair ticket in the given store. Cost clamps to ≥ 0.
    pub async fn create(&self, store: RecordId, data: RepairPayload) -> RepoResult<Repair> {
        let estimated_cost = data.estimated_cost();
        let mut result = self
            .base
            .db()
            .query(
                r#"CREATE repair SET
                    customer_name = $customer_name,
                    contact_number = $contact_number,
                    device_details = $device_details,
                    model_number = $model_number,
                    serial_number = $serial_number,
                    issue_description = $issue_description,
                    problem_found = $problem_found,
                    technician_name = $technician_name,
                    is_part_change = $is_part_change,
                    is_service_only = $is_service_only,
                    part_replaced_name = $part_replaced_name,
                    status = $status,
                    estimated_cost = $estimated_cost,
                    custom_message = $custom_message,
                    store_id = $store,
                    created_at = $created_at,
                    updated_at = $created_at
                RETURN AFTER"#,
            )
            .bind(("customer_name", data.customer_name))
            .bind(("contact_number", data.contact_number))
            .bind(("device_details", data.device_details))
            .bind(("model_number", data.model_number))
            .bind(("serial_number", data.serial_number))
            .bind(("issue_description", data.issue_description))
            .bind(("problem_found", data.problem_found))
            .bind(("technician_name", data.technician_name))
            .bind(("is_part_change", data.is_part_change))
            .bind(("is_service_only", data.is_service_only))
            .bind(("part_replaced_name", data.part_replaced_name))
            .bind(("status", data.status))
            .bind(("estimated_cost", estimated_cost))
            .bind(("custom_message", data.custom_message))
            .bind(("store", store))
            .bind(("created_at", now_millis()))
            .await?;

        let created: Option<Repair> = result.take(0)?;
        created.ok_or_else(|| RepoError::Database("Failed to create repair".to_string()))
    }

    /// Update a repair ticket. The store assignment never changes.
    pub async fn update(&self, id: &str, data: RepairPayload) -> RepoResult<Repair> {
        let thing = parse_id(id, "repair")?;
        self.find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Repair {} not found", id)))?;

        let estimated_cost = data.estimated_cost();
        let mut result = self
            .base
            .db()
            .query(
                r#"UPDATE $thing SET
                    customer_name = $customer_name,
                    contact_number = $contact_number,
                    device_details = $device_details,
                    model_number = $model_number,
                    serial_number = $serial_number,
                    issue_description = $issue_description,
                    problem_found = $problem_found,
                    technician_name = $technician_name,
                    is_part_change = $is_part_change,
                    is_service_only = $is_service_only,
                    part_replaced_name = $part_replaced_name,
                    status = $status,
                    estimated_cost = $estimated_cost,
                    custom_message = $custom_message,
                    updated_at = $updated_at
                RETURN AFTER"#,
            )
            .bind(("thing", thing))
            .bind(("updated_at", now_millis()))
            .bind(("customer_name", data.customer_name))
            .bind(("contact_number", data.contact_number))
            .bind(("device_details", data.device_details))
            .bind(("model_number", data.model_number))
            .bind(("serial_number", data.serial_number))
            .bind(("issue_description", data.issue_description))
            .bind(("problem_found", data.problem_found))
            .bind(("technician_name", data.technician_name))
            .bind(("is_part_change", data.is_part_change))
            .bind(("is_service_only", data.is_service_only))
            .bind(("part_replaced_name", data.part_replaced_name))
            .bind(("status", data.status))
            .bind(("estimated_cost", estimated_cost))
            .bind(("custom_message", data.custom_message))
            .await?;

        result
            .take::<Option<Repair>>(0)?
            .ok_or_else(|| RepoError::NotFound(format!("Repair {} not found", id)))
    }

    /// Delete a repair ticket
    pub async fn delete(&self, id: &str) -> RepoResult<bool> {
        let thing = parse_id(id, "repair")?;
        self.find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Repair {} not found", id)))?;

        self.base
            .db()
            .query("DELETE $thing")
            .bind(("thing", thing))
            .await?;
        Ok(true)
    }
}
