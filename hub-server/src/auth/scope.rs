//! Access scope resolver
//!
//! Single decision point for what a caller may see and do. Every
//! handler resolves a [`Scope`] before touching a repository, so role
//! rules live here and nowhere else.
//!
//! Store operators work inside their own store: full control over its
//! products and repairs, and they can raise stock requests but never
//! move them through the lifecycle. Super admins see every store
//! read-only, process stock requests, and manage the store directory.

use crate::auth::CurrentUser;
use crate::db::models::Role;
use shared::error::{AppError, ErrorCode};
use surrealdb::RecordId;

/// Resource kinds covered by scope resolution
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    Products,
    Repairs,
    Requests,
    Stores,
}

/// Which stores a scope covers
#[derive(Debug, Clone, PartialEq)]
pub enum StoreFilter {
    /// Every store
    All,
    /// Exactly one store
    Single(RecordId),
}

/// Resolved access rights for one caller and one resource
#[derive(Debug, Clone)]
pub struct Scope {
    pub filter: StoreFilter,
    pub can_view: bool,
    pub can_create: bool,
    pub can_update: bool,
    pub can_delete: bool,
}

impl Scope {
    /// Resolve the scope for a caller and resource.
    ///
    /// Fails with `StoreNotAssigned` for operator accounts that have no
    /// store, since nothing they do is meaningful without one.
    pub fn resolve(user: &CurrentUser, resource: Resource) -> Result<Scope, AppError> {
        match user.role {
            Role::StoreOperator => {
                let store_id = user
                    .store_id
                    .as_deref()
                    .ok_or_else(|| AppError::new(ErrorCode::StoreNotAssigned))?;
                let store: RecordId = store_id
                    .parse()
                    .map_err(|_| AppError::new(ErrorCode::StoreNotAssigned))?;
                let filter = StoreFilter::Single(store);

                Ok(match resource {
                    Resource::Products | Resource::Repairs => Scope {
                        filter,
                        can_view: true,
                        can_create: true,
                        can_update: true,
                        can_delete: true,
                    },
                    Resource::Requests => Scope {
                        filter,
                        can_view: true,
                        can_create: true,
                        can_update: false,
                        can_delete: false,
                    },
                    Resource::Stores => Scope {
                        filter,
                        can_view: false,
                        can_create: false,
                        can_update: false,
                        can_delete: false,
                    },
                })
            }
            Role::SuperAdmin => Ok(match resource {
                Resource::Products | Resource::Repairs => Scope {
                    filter: StoreFilter::All,
                    can_view: true,
                    can_create: false,
                    can_update: false,
                    can_delete: false,
                },
                Resource::Requests => Scope {
                    filter: StoreFilter::All,
                    can_view: true,
                    can_create: false,
                    can_update: true,
                    can_delete: false,
                },
                Resource::Stores => Scope {
                    filter: StoreFilter::All,
                    can_view: true,
                    can_create: true,
                    can_update: true,
                    can_delete: true,
                },
            }),
        }
    }

    pub fn require_view(&self) -> Result<(), AppError> {
        if self.can_view {
            Ok(())
        } else {
            Err(AppError::new(ErrorCode::PermissionDenied))
        }
    }

    pub fn require_create(&self) -> Result<(), AppError> {
        if self.can_create {
            Ok(())
        } else {
            Err(AppError::new(ErrorCode::PermissionDenied))
        }
    }

    pub fn require_update(&self) -> Result<(), AppError> {
        if self.can_update {
            Ok(())
        } else {
            Err(AppError::new(ErrorCode::PermissionDenied))
        }
    }

    pub fn require_delete(&self) -> Result<(), AppError> {
        if self.can_delete {
            Ok(())
        } else {
            Err(AppError::new(ErrorCode::PermissionDenied))
        }
    }

    /// Whether a record belonging to `store` is inside this scope.
    pub fn covers(&self, store: &RecordId) -> bool {
        match &self.filter {
            StoreFilter::All => true,
            StoreFilter::Single(own) => own == store,
        }
    }

    /// Narrow an all-stores scope down to one store.
    ///
    /// Only meaningful for super admins; a single-store scope cannot be
    /// re-pointed at another store.
    pub fn narrowed(mut self, store: RecordId) -> Result<Scope, AppError> {
        match self.filter {
            StoreFilter::All => {
                self.filter = StoreFilter::Single(store);
                Ok(self)
            }
            StoreFilter::Single(_) => Err(AppError::new(ErrorCode::PermissionDenied)),
        }
    }

    /// The single store this scope writes into, if any.
    pub fn single_store(&self) -> Option<&RecordId> {
        match &self.filter {
            StoreFilter::Single(store) => Some(store),
            StoreFilter::All => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn operator() -> CurrentUser {
        CurrentUser {
            id: "account:op1".into(),
            email: "op@store.com".into(),
            role: Role::StoreOperator,
            store_id: Some("store:main".into()),
            store_name: Some("Main Street".into()),
        }
    }

    fn admin() -> CurrentUser {
        CurrentUser {
            id: "account:adm".into(),
            email: "admin@hub.com".into(),
            role: Role::SuperAdmin,
            store_id: None,
            store_name: None,
        }
    }

    #[test]
    fn test_operator_products_full_control_own_store() {
        let scope = Scope::resolve(&operator(), Resource::Products).unwrap();
        assert_eq!(
            scope.filter,
            StoreFilter::Single("store:main".parse().unwrap())
        );
        assert!(scope.can_view && scope.can_create && scope.can_update && scope.can_delete);
    }

    #[test]
    fn test_operator_repairs_full_control_own_store() {
        let scope = Scope::resolve(&operator(), Resource::Repairs).unwrap();
        assert!(scope.can_view && scope.can_create && scope.can_update && scope.can_delete);
        assert!(scope.single_store().is_some());
    }

    #[test]
    fn test_operator_requests_create_only() {
        let scope = Scope::resolve(&operator(), Resource::Requests).unwrap();
        assert!(scope.can_view);
        assert!(scope.can_create);
        assert!(!scope.can_update);
        assert!(!scope.can_delete);
    }

    #[test]
    fn test_operator_stores_no_access() {
        let scope = Scope::resolve(&operator(), Resource::Stores).unwrap();
        assert!(!scope.can_view);
        assert!(scope.require_view().is_err());
    }

    #[test]
    fn test_operator_without_store_rejected() {
        let mut user = operator();
        user.store_id = None;
        let err = Scope::resolve(&user, Resource::Products).unwrap_err();
        assert_eq!(err.code, ErrorCode::StoreNotAssigned);
    }

    #[test]
    fn test_admin_products_read_only_all_stores() {
        let scope = Scope::resolve(&admin(), Resource::Products).unwrap();
        assert_eq!(scope.filter, StoreFilter::All);
        assert!(scope.can_view);
        assert!(!scope.can_create && !scope.can_update && !scope.can_delete);
    }

    #[test]
    fn test_admin_repairs_read_only() {
        let scope = Scope::resolve(&admin(), Resource::Repairs).unwrap();
        assert!(scope.can_view);
        assert!(scope.require_update().is_err());
    }

    #[test]
    fn test_admin_requests_update_but_not_create() {
        let scope = Scope::resolve(&admin(), Resource::Requests).unwrap();
        assert!(scope.can_view);
        assert!(!scope.can_create);
        assert!(scope.can_update);
        assert!(!scope.can_delete);
    }

    #[test]
    fn test_admin_stores_full_control() {
        let scope = Scope::resolve(&admin(), Resource::Stores).unwrap();
        assert!(scope.can_view && scope.can_create && scope.can_update && scope.can_delete);
    }

    #[test]
    fn test_covers() {
        let scope = Scope::resolve(&operator(), Resource::Products).unwrap();
        assert!(scope.covers(&"store:main".parse().unwrap()));
        assert!(!scope.covers(&"store:other".parse().unwrap()));

        let all = Scope::resolve(&admin(), Resource::Products).unwrap();
        assert!(all.covers(&"store:anything".parse().unwrap()));
    }

    #[test]
    fn test_narrow_admin_scope() {
        let scope = Scope::resolve(&admin(), Resource::Products).unwrap();
        let narrowed = scope.narrowed("store:main".parse().unwrap()).unwrap();
        assert_eq!(
            narrowed.filter,
            StoreFilter::Single("store:main".parse().unwrap())
        );
    }

    #[test]
    fn test_operator_scope_cannot_be_repointed() {
        let scope = Scope::resolve(&operator(), Resource::Products).unwrap();
        assert!(scope.narrowed("store:other".parse().unwrap()).is_err());
    }
}
