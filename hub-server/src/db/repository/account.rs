//! Account Repository

use super::{BaseRepository, RepoError, RepoResult, parse_id};
use crate::db::models::{Account, AccountCreate, Role};
use shared::util::now_millis;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

#[derive(Clone)]
pub struct AccountRepository {
    base: BaseRepository,
}

impl AccountRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Find account by id
    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Account>> {
        let thing = parse_id(id, "account")?;
        let account: Option<Account> = self.base.db().select(thing).await?;
        Ok(account)
    }

    /// Find account by email
    pub async fn find_by_email(&self, email: &str) -> RepoResult<Option<Account>> {
        let email_owned = email.to_string();
        let mut result = self
            .base
            .db()
            .query("SELECT * FROM account WHERE email = $email LIMIT 1")
            .bind(("email", email_owned))
            .await?;
        let accounts: Vec<Account> = result.take(0)?;
        Ok(accounts.into_iter().next())
    }

    /// Create a new account
    pub async fn create(&self, data: AccountCreate) -> RepoResult<Account> {
        if self.find_by_email(&data.email).await?.is_some() {
            return Err(RepoError::Duplicate(format!(
                "Email '{}' already exists",
                data.email
            )));
        }

        if data.role == Role::StoreOperator && data.store_id.is_none() {
            return Err(RepoError::Validation(
                "Operator accounts require a store".to_string(),
            ));
        }

        let store_id = match data.store_id.as_deref() {
            Some(id) => Some(parse_id(id, "store")?),
            None => None,
        };

        let hash_pass = Account::hash_password(&data.password)
            .map_err(|e| RepoError::Database(format!("Failed to hash password: {}", e)))?;

        let mut result = self
            .base
            .db()
            .query(
                r#"CREATE account SET
                    email = $email,
                    hash_pass = $hash_pass,
                    role = $role,
                    store_id = $store_id,
                    is_active = true,
                    created_at = $created_at
                RETURN AFTER"#,
            )
            .bind(("email", data.email))
            .bind(("hash_pass", hash_pass))
            .bind(("role", data.role))
            .bind(("store_id", store_id))
            .bind(("created_at", now_millis()))
            .await?;

        let created: Option<Account> = result.take(0)?;
        created.ok_or_else(|| RepoError::Database("Failed to create account".to_string()))
    }

    /// Ensure a super admin account exists, creating one from the given
    /// credentials if the table has none.
    pub async fn ensure_default_admin(&self, email: &str, password: &str) -> RepoResult<()> {
        let mut result = self
            .base
            .db()
            .query("SELECT * FROM account WHERE role = $role LIMIT 1")
            .bind(("role", Role::SuperAdmin))
            .await?;
        let admins: Vec<Account> = result.take(0)?;
        if admins.is_empty() {
            self.create(AccountCreate {
                email: email.to_string(),
                password: password.to_string(),
                role: Role::SuperAdmin,
                store_id: None,
            })
            .await?;
            tracing::info!("Created default super admin account: {}", email);
        }
        Ok(())
    }
}
