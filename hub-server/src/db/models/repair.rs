//! Repair Ticket Model

use super::serde_helpers;
use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

/// Repair ID type
pub type RepairId = RecordId;

/// Repair ticket status
///
/// Tickets move freely between statuses. The order below is the
/// canonical kanban board column order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum RepairStatus {
    #[default]
    #[serde(rename = "Received")]
    Received,
    #[serde(rename = "In Process")]
    InProcess,
    #[serde(rename = "Part Not Available")]
    PartNotAvailable,
    #[serde(rename = "Repaired")]
    Repaired,
    #[serde(rename = "Delivered (Payment Pending)")]
    DeliveredPaymentPending,
    #[serde(rename = "Delivered")]
    Delivered,
}

impl RepairStatus {
    /// All statuses in board column order
    pub const ALL: [RepairStatus; 6] = [
        RepairStatus::Received,
        RepairStatus::InProcess,
        RepairStatus::PartNotAvailable,
        RepairStatus::Repaired,
        RepairStatus::DeliveredPaymentPending,
        RepairStatus::Delivered,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RepairStatus::Received => "Received",
            RepairStatus::InProcess => "In Process",
            RepairStatus::PartNotAvailable => "Part Not Available",
            RepairStatus::Repaired => "Repaired",
            RepairStatus::DeliveredPaymentPending => "Delivered (Payment Pending)",
            RepairStatus::Delivered => "Delivered",
        }
    }
}

impl std::fmt::Display for RepairStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Repair ticket model matching SurrealDB schema
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Repair {
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub id: Option<RepairId>,
    pub customer_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact_number: Option<String>,
    pub device_details: String,
    #[serde(default)]
    pub model_number: String,
    #[serde(default)]
    pub serial_number: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub issue_description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub problem_found: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub technician_name: Option<String>,
    #[serde(default, deserialize_with = "serde_helpers::bool_false")]
    pub is_part_change: bool,
    #[serde(default, deserialize_with = "serde_helpers::bool_false")]
    pub is_service_only: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub part_replaced_name: Option<String>,
    #[serde(default)]
    pub status: RepairStatus,
    #[serde(default)]
    pub estimated_cost: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_message: Option<String>,
    #[serde(with = "serde_helpers::record_id")]
    pub store_id: RecordId,
    #[serde(default)]
    pub created_at: i64,
    #[serde(default)]
    pub updated_at: i64,
}

/// Create / update repair payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RepairPayload {
    pub customer_name: String,
    #[serde(default)]
    pub contact_number: Option<String>,
    pub device_details: String,
    #[serde(default)]
    pub model_number: String,
    #[serde(default)]
    pub serial_number: String,
    #[serde(default)]
    pub issue_description: Option<String>,
    #[serde(default)]
    pub problem_found: Option<String>,
    #[serde(default)]
    pub technician_name: Option<String>,
    #[serde(default)]
    pub is_part_change: bool,
    #[serde(default)]
    pub is_service_only: bool,
    #[serde(default)]
    pub part_replaced_name: Option<String>,
    #[serde(default)]
    pub status: RepairStatus,
    /// Negative values clamp to 0 on write
    #[serde(default)]
    pub estimated_cost: f64,
    #[serde(default)]
    pub custom_message: Option<String>,
    /// Ignored. The store is always taken from the caller's scope.
    #[serde(default)]
    pub store_id: Option<String>,
}

impl RepairPayload {
    pub fn validate(&self) -> Result<(), crate::utils::AppError> {
        use crate::utils::validation::*;
        use shared::error::ErrorCode;

        validate_required_text(&self.customer_name, "customer_name", MAX_NAME_LEN)?;
        validate_required_text(&self.device_details, "device_details", MAX_NAME_LEN)?;
        validate_required_text(&self.model_number, "model_number", MAX_SHORT_TEXT_LEN)?;
        validate_required_text(&self.serial_number, "serial_number", MAX_SHORT_TEXT_LEN)?;
        validate_optional_text(&self.contact_number, "contact_number", MAX_SHORT_TEXT_LEN)?;
        validate_optional_text(&self.issue_description, "issue_description", MAX_NOTE_LEN)?;
        validate_optional_text(&self.problem_found, "problem_found", MAX_NOTE_LEN)?;
        validate_optional_text(&self.technician_name, "technician_name", MAX_NAME_LEN)?;
        validate_optional_text(&self.custom_message, "custom_message", MAX_NOTE_LEN)?;

        if self.is_part_change {
            let has_part = self
                .part_replaced_name
                .as_deref()
                .is_some_and(|p| !p.trim().is_empty());
            if !has_part {
                return Err(crate::utils::AppError::new(ErrorCode::PartNameRequired));
            }
        }
        Ok(())
    }

    /// Estimated cost clamped to ≥ 0
    pub fn estimated_cost(&self) -> f64 {
        self.estimated_cost.max(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_wire_format() {
        let json = serde_json::to_string(&RepairStatus::DeliveredPaymentPending).unwrap();
        assert_eq!(json, "\"Delivered (Payment Pending)\"");
        let status: RepairStatus = serde_json::from_str("\"Part Not Available\"").unwrap();
        assert_eq!(status, RepairStatus::PartNotAvailable);
    }

    #[test]
    fn test_status_default_is_received() {
        assert_eq!(RepairStatus::default(), RepairStatus::Received);
    }

    #[test]
    fn test_board_order() {
        let names: Vec<&str> = RepairStatus::ALL.iter().map(|s| s.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "Received",
                "In Process",
                "Part Not Available",
                "Repaired",
                "Delivered (Payment Pending)",
                "Delivered",
            ]
        );
    }

    fn base_payload() -> RepairPayload {
        RepairPayload {
            customer_name: "Ana".into(),
            contact_number: None,
            device_details: "Laptop".into(),
            model_number: "XPS-15".into(),
            serial_number: "SN-1".into(),
            issue_description: None,
            problem_found: None,
            technician_name: None,
            is_part_change: false,
            is_service_only: false,
            part_replaced_name: None,
            status: RepairStatus::Received,
            estimated_cost: 0.0,
            custom_message: None,
            store_id: None,
        }
    }

    #[test]
    fn test_part_change_requires_part_name() {
        let mut payload = base_payload();
        payload.is_part_change = true;
        assert!(payload.validate().is_err());

        payload.part_replaced_name = Some("Screen".into());
        assert!(payload.validate().is_ok());
    }

    #[test]
    fn test_negative_cost_clamps_to_zero() {
        let mut payload = base_payload();
        payload.estimated_cost = -20.0;
        assert!(payload.validate().is_ok());
        assert_eq!(payload.estimated_cost(), 0.0);
    }

    #[test]
    fn test_model_and_serial_required() {
        let mut payload = base_payload();
        payload.model_number = "".into();
        assert!(payload.validate().is_err());

        let mut payload = base_payload();
        payload.serial_number = "  ".into();
        assert!(payload.validate().is_err());
    }

    #[test]
    fn test_unknown_status_rejected() {
        let result: Result<RepairStatus, _> = serde_json::from_str("\"Lost\"");
        assert!(result.is_err());
    }
}
