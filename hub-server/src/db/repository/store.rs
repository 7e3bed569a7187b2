//! Store Repository

use super::{BaseRepository, RepoError, RepoResult, parse_id};
use crate::db::models::{Store, StorePayload};
use shared::util::now_millis;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

#[derive(Clone)]
pub struct StoreRepository {
    base: BaseRepository,
}

impl StoreRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Find all stores ordered by name
    pub async fn find_all(&self) -> RepoResult<Vec<Store>> {
        let stores: Vec<Store> = self
            .base
            .db()
            .query("SELECT * FROM store ORDER BY name")
            .await?
            .take(0)?;
        Ok(stores)
    }

    /// Find store by id
    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Store>> {
        let thing = parse_id(id, "store")?;
        let store: Option<Store> = self.base.db().select(thing).await?;
        Ok(store)
    }

    /// Find store by name
    pub async fn find_by_name(&self, name: &str) -> RepoResult<Option<Store>> {
        let name_owned = name.to_string();
        let mut result = self
            .base
            .db()
            .query("SELECT * FROM store WHERE name = $name LIMIT 1")
            .bind(("name", name_owned))
            .await?;
        let stores: Vec<Store> = result.take(0)?;
        Ok(stores.into_iter().next())
    }

    /// Create a new store
    pub async fn create(&self, data: StorePayload) -> RepoResult<Store> {
        if self.find_by_name(&data.name).await?.is_some() {
            return Err(RepoError::Duplicate(format!(
                "Store '{}' already exists",
                data.name
            )));
        }

        let mut result = self
            .base
            .db()
            .query(
                r#"CREATE store SET
                    name = $name,
                    location = $location,
                    phone = $phone,
                    created_at = $created_at
                RETURN AFTER"#,
            )
            .bind(("name", data.name))
            .bind(("location", data.location))
            .bind(("phone", data.phone))
            .bind(("created_at", now_millis()))
            .await?;

        let created: Option<Store> = result.take(0)?;
        created.ok_or_else(|| RepoError::Database("Failed to create store".to_string()))
    }

    /// Update a store
    pub async fn update(&self, id: &str, data: StorePayload) -> RepoResult<Store> {
        let thing = parse_id(id, "store")?;
        let existing = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Store {} not found", id)))?;

        if data.name != existing.name && self.find_by_name(&data.name).await?.is_some() {
            return Err(RepoError::Duplicate(format!(
                "Store '{}' already exists",
                data.name
            )));
        }

        let mut result = self
            .base
            .db()
            .query(
                r#"UPDATE $thing SET
                    name = $name,
                    location = $location,
                    phone = $phone
                RETURN AFTER"#,
            )
            .bind(("thing", thing))
            .bind(("name", data.name))
            .bind(("location", data.location))
            .bind(("phone", data.phone))
            .await?;

        result
            .take::<Option<Store>>(0)?
            .ok_or_else(|| RepoError::NotFound(format!("Store {} not found", id)))
    }

    /// Delete a store together with every record that belongs to it.
    ///
    /// Runs as a single transaction so a failure leaves the store and
    /// its data fully intact.
    pub async fn delete_cascade(&self, id: &str) -> RepoResult<bool> {
        let thing = parse_id(id, "store")?;
        self.find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Store {} not found", id)))?;

        self.base
            .db()
            .query(
                r#"BEGIN TRANSACTION;
                DELETE product WHERE store_id = $store;
                DELETE repair WHERE store_id = $store;
                DELETE inventory_request WHERE store_id = $store;
                DELETE account WHERE store_id = $store;
                DELETE $store;
                COMMIT TRANSACTION;"#,
            )
            .bind(("store", thing))
            .await?;
        Ok(true)
    }
}
