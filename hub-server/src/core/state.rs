use dashmap::DashMap;
use std::sync::Arc;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use crate::auth::JwtService;
use crate::core::Config;
use crate::db::DbService;
use crate::db::repository::AccountRepository;

/// Resource version counter
///
/// Lock-free per-resource version numbers backed by DashMap. Every
/// list fetch gets a fresh version so clients can discard stale
/// snapshots that arrive out of order.
#[derive(Debug)]
pub struct ResourceVersions {
    versions: DashMap<String, u64>,
}

impl ResourceVersions {
    pub fn new() -> Self {
        Self {
            versions: DashMap::new(),
        }
    }

    /// Increment the version for a resource and return the new value.
    /// Starts at 1 for unseen resources.
    pub fn increment(&self, resource: &str) -> u64 {
        let mut entry = self.versions.entry(resource.to_string()).or_insert(0);
        *entry += 1;
        *entry
    }

    /// Current version for a resource, 0 if unseen
    pub fn get(&self, resource: &str) -> u64 {
        self.versions.get(resource).map(|v| *v).unwrap_or(0)
    }
}

impl Default for ResourceVersions {
    fn default() -> Self {
        Self::new()
    }
}

/// Server state - shared references to all services
///
/// Cloning is cheap: the database handle and services are Arc-backed.
#[derive(Clone)]
pub struct ServerState {
    pub config: Config,
    /// Embedded database (SurrealDB)
    pub db: Surreal<Db>,
    pub jwt_service: Arc<JwtService>,
    /// Per-resource snapshot versions
    pub resource_versions: Arc<ResourceVersions>,
}

impl ServerState {
    pub fn new(
        config: Config,
        db: Surreal<Db>,
        jwt_service: Arc<JwtService>,
        resource_versions: Arc<ResourceVersions>,
    ) -> Self {
        Self {
            config,
            db,
            jwt_service,
            resource_versions,
        }
    }

    /// Initialize the server state
    ///
    /// 1. Ensure the work directory layout exists
    /// 2. Open the database at work_dir/database
    /// 3. Build the JWT service
    /// 4. Bootstrap the default super admin if configured
    ///
    /// # Panics
    ///
    /// Panics when the database cannot be opened. The server cannot do
    /// anything useful without storage.
    pub async fn initialize(config: &Config) -> Self {
        config
            .ensure_work_dir_structure()
            .expect("Failed to create work directory structure");

        let db_service = DbService::new(&config.database_dir())
            .await
            .expect("Failed to initialize database");
        let db = db_service.db;

        let jwt_service = Arc::new(JwtService::with_config(config.jwt.clone()));
        let resource_versions = Arc::new(ResourceVersions::new());

        let state = Self::new(config.clone(), db, jwt_service, resource_versions);
        state.ensure_default_admin().await;
        state
    }

    /// Create the bootstrap super admin when ADMIN_PASSWORD is set and
    /// no super admin exists yet.
    async fn ensure_default_admin(&self) {
        let Some(password) = self.config.admin_password.clone() else {
            tracing::debug!("ADMIN_PASSWORD not set, skipping admin bootstrap");
            return;
        };

        let repo = AccountRepository::new(self.db.clone());
        if let Err(e) = repo
            .ensure_default_admin(&self.config.admin_email, &password)
            .await
        {
            tracing::error!("Failed to bootstrap super admin: {}", e);
        }
    }

    pub fn get_jwt_service(&self) -> Arc<JwtService> {
        self.jwt_service.clone()
    }

    /// Bump and return the snapshot version for a resource
    pub fn next_version(&self, resource: &str) -> u64 {
        self.resource_versions.increment(resource)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resource_versions_increment() {
        let versions = ResourceVersions::new();
        assert_eq!(versions.get("product"), 0);
        assert_eq!(versions.increment("product"), 1);
        assert_eq!(versions.increment("product"), 2);
        assert_eq!(versions.increment("repair"), 1);
        assert_eq!(versions.get("product"), 2);
    }
}
