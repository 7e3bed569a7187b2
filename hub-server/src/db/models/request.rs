//! Stock Request Model
//!
//! Operators raise requests for stock they need. Super admins move them
//! through the lifecycle: Pending is the only non-terminal start state,
//! Fulfilled and Cancelled are terminal, and nothing returns to Pending.

use super::serde_helpers;
use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

/// Request ID type
pub type RequestId = RecordId;

/// Stock request status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum RequestStatus {
    #[default]
    Pending,
    Ordered,
    Fulfilled,
    Cancelled,
}

impl RequestStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RequestStatus::Pending => "Pending",
            RequestStatus::Ordered => "Ordered",
            RequestStatus::Fulfilled => "Fulfilled",
            RequestStatus::Cancelled => "Cancelled",
        }
    }

    /// Terminal states accept no further transitions.
    pub fn is_terminal(&self) -> bool {
        matches!(self, RequestStatus::Fulfilled | RequestStatus::Cancelled)
    }

    /// Whether a transition from `self` to `next` is allowed.
    pub fn can_transition_to(&self, next: RequestStatus) -> bool {
        if self.is_terminal() {
            return false;
        }
        // No path leads back to Pending
        if next == RequestStatus::Pending {
            return false;
        }
        match self {
            RequestStatus::Pending => matches!(
                next,
                RequestStatus::Ordered | RequestStatus::Fulfilled | RequestStatus::Cancelled
            ),
            RequestStatus::Ordered => {
                matches!(next, RequestStatus::Fulfilled | RequestStatus::Cancelled)
            }
            _ => false,
        }
    }
}

impl std::fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Stock request model matching SurrealDB schema
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StockRequest {
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub id: Option<RequestId>,
    pub product_name: String,
    pub quantity: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_phone: Option<String>,
    #[serde(default)]
    pub status: RequestStatus,
    #[serde(with = "serde_helpers::record_id")]
    pub store_id: RecordId,
    #[serde(default)]
    pub created_at: i64,
}

/// Create stock request payload. Status always starts at Pending.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestCreate {
    pub product_name: String,
    pub quantity: u32,
    #[serde(default)]
    pub customer_name: Option<String>,
    #[serde(default)]
    pub customer_phone: Option<String>,
}

impl RequestCreate {
    pub fn validate(&self) -> Result<(), crate::utils::AppError> {
        use crate::utils::validation::*;
        validate_required_text(&self.product_name, "product_name", MAX_NAME_LEN)?;
        validate_optional_text(&self.customer_name, "customer_name", MAX_NAME_LEN)?;
        validate_optional_text(&self.customer_phone, "customer_phone", MAX_SHORT_TEXT_LEN)?;
        if self.quantity == 0 {
            return Err(crate::utils::AppError::validation(
                "quantity must be at least 1",
            ));
        }
        Ok(())
    }
}

/// Status update payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestStatusUpdate {
    pub status: RequestStatus,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_terminal_states() {
        assert!(!RequestStatus::Pending.is_terminal());
        assert!(!RequestStatus::Ordered.is_terminal());
        assert!(RequestStatus::Fulfilled.is_terminal());
        assert!(RequestStatus::Cancelled.is_terminal());
    }

    #[test]
    fn test_pending_transitions() {
        let pending = RequestStatus::Pending;
        assert!(pending.can_transition_to(RequestStatus::Ordered));
        assert!(pending.can_transition_to(RequestStatus::Fulfilled));
        assert!(pending.can_transition_to(RequestStatus::Cancelled));
        assert!(!pending.can_transition_to(RequestStatus::Pending));
    }

    #[test]
    fn test_ordered_transitions() {
        let ordered = RequestStatus::Ordered;
        assert!(ordered.can_transition_to(RequestStatus::Fulfilled));
        assert!(ordered.can_transition_to(RequestStatus::Cancelled));
        assert!(!ordered.can_transition_to(RequestStatus::Pending));
        assert!(!ordered.can_transition_to(RequestStatus::Ordered));
    }

    #[test]
    fn test_terminal_rejects_everything() {
        for terminal in [RequestStatus::Fulfilled, RequestStatus::Cancelled] {
            for next in [
                RequestStatus::Pending,
                RequestStatus::Ordered,
                RequestStatus::Fulfilled,
                RequestStatus::Cancelled,
            ] {
                assert!(!terminal.can_transition_to(next));
            }
        }
    }

    #[test]
    fn test_create_validation() {
        let create = RequestCreate {
            product_name: "Screen".into(),
            quantity: 0,
            customer_name: None,
            customer_phone: None,
        };
        assert!(create.validate().is_err());
    }
}
