//! Client-facing DTOs
//!
//! Request/response types shared between the server and its clients.

use serde::{Deserialize, Serialize};

/// Login request payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Authenticated user info returned by login and `/api/auth/me`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserInfo {
    pub id: String,
    pub email: String,
    /// "store_operator" or "super_admin"
    pub role: String,
    /// Home store id; None for super_admin
    #[serde(skip_serializing_if = "Option::is_none")]
    pub store_id: Option<String>,
    /// Home store display name, resolved at login
    #[serde(skip_serializing_if = "Option::is_none")]
    pub store_name: Option<String>,
    pub created_at: i64,
}

/// Login response with JWT token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: UserInfo,
}

/// Versioned list snapshot
///
/// Every list endpoint wraps its rows in a snapshot carrying a
/// monotonically increasing per-resource version. A client that issued
/// overlapping fetches keeps only the response with the highest version,
/// so a slow early response can never overwrite a newer one.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Snapshot<T> {
    pub version: u64,
    pub items: Vec<T>,
}

impl<T> Snapshot<T> {
    pub fn new(version: u64, items: Vec<T>) -> Self {
        Self { version, items }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snapshot_serialize() {
        let snap = Snapshot::new(3, vec!["a", "b"]);
        let json = serde_json::to_string(&snap).unwrap();
        assert!(json.contains("\"version\":3"));
        assert!(json.contains("\"items\":[\"a\",\"b\"]"));
    }

    #[test]
    fn test_user_info_omits_empty_store() {
        let user = UserInfo {
            id: "account:1".into(),
            email: "admin@fixhub.test".into(),
            role: "super_admin".into(),
            store_id: None,
            store_name: None,
            created_at: 0,
        };
        let json = serde_json::to_string(&user).unwrap();
        assert!(!json.contains("store_id"));
        assert!(!json.contains("store_name"));
    }
}
