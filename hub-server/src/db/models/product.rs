//! Product Model
//!
//! Stock ledger entries. Invariant: `serials.len() == quantity` at all
//! times, padding with empty strings for units without a recorded serial.

use super::serde_helpers;
use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

/// Product ID type
pub type ProductId = RecordId;

/// Quantity below which a product is flagged as running low
pub const LOW_STOCK_THRESHOLD: u32 = 5;

/// Product model matching SurrealDB schema
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub id: Option<ProductId>,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default)]
    pub price: f64,
    #[serde(default)]
    pub quantity: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vendor: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default)]
    pub courier_charges: f64,
    /// One entry per unit in stock. Empty string means no serial recorded.
    #[serde(default)]
    pub serials: Vec<String>,
    #[serde(with = "serde_helpers::record_id")]
    pub store_id: RecordId,
    /// Advisory flag, recomputed on every read. Never trusted from storage.
    #[serde(default)]
    pub low_stock: bool,
    #[serde(default)]
    pub created_at: i64,
}

impl Product {
    /// Recompute the low-stock advisory flag from the current quantity.
    pub fn refresh_low_stock(&mut self) {
        self.low_stock = self.quantity < LOW_STOCK_THRESHOLD;
    }
}

/// Create / update product payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductPayload {
    pub name: String,
    #[serde(default)]
    pub category: Option<String>,
    /// Negative values clamp to 0 on write
    #[serde(default)]
    pub price: f64,
    /// Negative values clamp to 0 on write
    #[serde(default)]
    pub quantity: i64,
    #[serde(default)]
    pub vendor: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    /// Negative values clamp to 0 on write
    #[serde(default)]
    pub courier_charges: f64,
    #[serde(default)]
    pub serials: Vec<String>,
    /// Ignored. The store is always taken from the caller's scope.
    #[serde(default)]
    pub store_id: Option<String>,
}

impl ProductPayload {
    pub fn validate(&self) -> Result<(), crate::utils::AppError> {
        use crate::utils::validation::*;
        use shared::error::ErrorCode;

        if self.name.trim().is_empty() {
            return Err(crate::utils::AppError::new(ErrorCode::ProductNameRequired));
        }
        validate_required_text(&self.name, "name", MAX_NAME_LEN)?;
        validate_optional_text(&self.category, "category", MAX_NAME_LEN)?;
        validate_optional_text(&self.vendor, "vendor", MAX_NAME_LEN)?;
        validate_optional_text(&self.location, "location", MAX_ADDRESS_LEN)?;
        for serial in &self.serials {
            if serial.len() > MAX_SHORT_TEXT_LEN {
                return Err(crate::utils::AppError::validation("serial is too long"));
            }
        }
        Ok(())
    }

    /// Quantity clamped to ≥ 0
    pub fn quantity(&self) -> u32 {
        self.quantity.clamp(0, u32::MAX as i64) as u32
    }

    /// Price clamped to ≥ 0
    pub fn price(&self) -> f64 {
        self.price.max(0.0)
    }

    /// Courier charges clamped to ≥ 0
    pub fn courier_charges(&self) -> f64 {
        self.courier_charges.max(0.0)
    }

    /// Normalize serials to exactly the clamped quantity.
    ///
    /// Existing serials keep their position. Missing entries are padded
    /// with empty strings, surplus entries are dropped from the tail.
    pub fn normalized_serials(&self) -> Vec<String> {
        resize_serials(&self.serials, self.quantity())
    }
}

/// Resize a serial list to the target quantity, preserving by position.
pub fn resize_serials(serials: &[String], quantity: u32) -> Vec<String> {
    let target = quantity as usize;
    let mut out: Vec<String> = serials.iter().take(target).cloned().collect();
    out.resize(target, String::new());
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn s(items: &[&str]) -> Vec<String> {
        items.iter().map(|x| x.to_string()).collect()
    }

    #[test]
    fn test_resize_serials_pads_with_empty() {
        let out = resize_serials(&s(&["SN1", "SN2"]), 4);
        assert_eq!(out, s(&["SN1", "SN2", "", ""]));
    }

    #[test]
    fn test_resize_serials_truncates_tail() {
        let out = resize_serials(&s(&["SN1", "SN2", "SN3"]), 1);
        assert_eq!(out, s(&["SN1"]));
    }

    #[test]
    fn test_resize_serials_zero_quantity() {
        let out = resize_serials(&s(&["SN1"]), 0);
        assert!(out.is_empty());
    }

    #[test]
    fn test_resize_serials_exact_is_noop() {
        let input = s(&["A", "B"]);
        assert_eq!(resize_serials(&input, 2), input);
    }

    #[test]
    fn test_low_stock_threshold() {
        let mut product = Product {
            id: None,
            name: "Screen".into(),
            category: None,
            price: 10.0,
            quantity: 4,
            vendor: None,
            location: None,
            courier_charges: 0.0,
            serials: vec![String::new(); 4],
            store_id: "store:main".parse().unwrap(),
            low_stock: false,
            created_at: 0,
        };
        product.refresh_low_stock();
        assert!(product.low_stock);

        product.quantity = 5;
        product.refresh_low_stock();
        assert!(!product.low_stock);
    }

    #[test]
    fn test_payload_requires_name() {
        let payload = ProductPayload {
            name: "".into(),
            category: None,
            price: 1.0,
            quantity: 1,
            vendor: None,
            location: None,
            courier_charges: 0.0,
            serials: vec![],
            store_id: None,
        };
        assert!(payload.validate().is_err());
    }

    #[test]
    fn test_payload_clamps_negative_numbers() {
        let payload = ProductPayload {
            name: "Battery".into(),
            category: None,
            price: -1.0,
            quantity: -3,
            vendor: None,
            location: None,
            courier_charges: -2.5,
            serials: vec!["SN1".into()],
            store_id: None,
        };
        // Negative numbers are accepted and clamp to zero
        assert!(payload.validate().is_ok());
        assert_eq!(payload.price(), 0.0);
        assert_eq!(payload.quantity(), 0);
        assert_eq!(payload.courier_charges(), 0.0);
        assert!(payload.normalized_serials().is_empty());
    }
}
