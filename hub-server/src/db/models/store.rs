//! Store Model

use super::serde_helpers;
use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

/// Store ID type
pub type StoreId = RecordId;

/// Store model matching SurrealDB schema
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Store {
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub id: Option<StoreId>,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default)]
    pub created_at: i64,
}

/// Create / update store payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorePayload {
    pub name: String,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
}

impl StorePayload {
    pub fn validate(&self) -> Result<(), crate::utils::AppError> {
        use crate::utils::validation::*;
        validate_required_text(&self.name, "name", MAX_NAME_LEN)?;
        validate_optional_text(&self.location, "location", MAX_ADDRESS_LEN)?;
        validate_optional_text(&self.phone, "phone", MAX_SHORT_TEXT_LEN)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payload_validation() {
        let payload = StorePayload {
            name: "Downtown Branch".into(),
            location: Some("12 Main St".into()),
            phone: None,
        };
        assert!(payload.validate().is_ok());

        let blank = StorePayload {
            name: "  ".into(),
            location: None,
            phone: None,
        };
        assert!(blank.validate().is_err());
    }
}
