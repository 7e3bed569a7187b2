//! Product Repository

use super::{BaseRepository, RepoError, RepoResult, parse_id};
use crate::auth::StoreFilter;
use crate::db::models::{Product, ProductPayload};
use shared::util::now_millis;
use surrealdb::{RecordId, Surreal};
use surrealdb::engine::local::Db;

#[derive(Clone)]
pub struct ProductRepository {
    base: BaseRepository,
}

impl ProductRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Find products visible through the given store filter
    pub async fn find_scoped(&self, filter: &StoreFilter) -> RepoResult<Vec<Product>> {
        let mut products: Vec<Product> = match filter {
            StoreFilter::All => {
                self.base
                    .db()
                    .query("SELECT * FROM product ORDER BY name")
                    .await?
                    .take(0)?
            }
            StoreFilter::Single(store) => {
                self.base
                    .db()
                    .query("SELECT * FROM product WHERE store_id = $store ORDER BY name")
                    .bind(("store", store.clone()))
                    .await?
                    .take(0)?
            }
        };
        for product in &mut products {
            product.refresh_low_stock();
        }
        Ok(products)
    }

    /// Find product by id
    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Product>> {
        let thing = parse_id(id, "product")?;
        let mut product: Option<Product> = self.base.db().select(thing).await?;
        if let Some(p) = &mut product {
            p.refresh_low_stock();
        }
        Ok(product)
    }

    /// Create a product in the given store. Numeric fields clamp to ≥ 0.
    pub async fn create(&self, store: RecordId, data: ProductPayload) -> RepoResult<Product> {
        let serials = data.normalized_serials();
        let (price, quantity, courier_charges) =
            (data.price(), data.quantity(), data.courier_charges());
        let mut result = self
            .base
            .db()
            .query(
                r#"CREATE product SET
                    name = $name,
                    category = $category,
                    price = $price,
                    quantity = $quantity,
                    vendor = $vendor,
                    location = $location,
                    courier_charges = $courier_charges,
                    serials = $serials,
                    store_id = $store,
                    created_at = $created_at
                RETURN AFTER"#,
            )
            .bind(("name", data.name))
            .bind(("category", data.category))
            .bind(("price", price))
            .bind(("quantity", quantity))
            .bind(("vendor", data.vendor))
            .bind(("location", data.location))
            .bind(("courier_charges", courier_charges))
            .bind(("serials", serials))
            .bind(("store", store))
            .bind(("created_at", now_millis()))
            .await?;

        let mut created: Option<Product> = result.take(0)?;
        if let Some(p) = &mut created {
            p.refresh_low_stock();
        }
        created.ok_or_else(|| RepoError::Database("Failed to create product".to_string()))
    }

    /// Update a product. The store assignment never changes on update.
    pub async fn update(&self, id: &str, data: ProductPayload) -> RepoResult<Product> {
        let thing = parse_id(id, "product")?;
        self.find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Product {} not found", id)))?;

        let serials = data.normalized_serials();
        let (price, quantity, courier_charges) =
            (data.price(), data.quantity(), data.courier_charges());
        let mut result = self
            .base
            .db()
            .query(
                r#"UPDATE $thing SET
                    name = $name,
                    category = $category,
                    price = $price,
                    quantity = $quantity,
                    vendor = $vendor,
                    location = $location,
                    courier_charges = $courier_charges,
                    serials = $serials
                RETURN AFTER"#,
            )
            .bind(("thing", thing))
            .bind(("name", data.name))
            .bind(("category", data.category))
            .bind(("price", price))
            .bind(("quantity", quantity))
            .bind(("vendor", data.vendor))
            .bind(("location", data.location))
            .bind(("courier_charges", courier_charges))
            .bind(("serials", serials))
            .await?;

        let mut updated: Option<Product> = result.take(0)?;
        if let Some(p) = &mut updated {
            p.refresh_low_stock();
        }
        updated.ok_or_else(|| RepoError::NotFound(format!("Product {} not found", id)))
    }

    /// Delete a product
    pub async fn delete(&self, id: &str) -> RepoResult<bool> {
        let thing = parse_id(id, "product")?;
        self.find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Product {} not found", id)))?;

        self.base
            .db()
            .query("DELETE $thing")
            .bind(("thing", thing))
            .await?;
        Ok(true)
    }
}
