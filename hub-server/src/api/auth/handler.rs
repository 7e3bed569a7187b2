//! Authentication Handlers

use std::time::Duration;

use axum::{Extension, Json, extract::State};

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::repository::{AccountRepository, StoreRepository};
use crate::security_log;
use crate::utils::AppError;
use shared::error::ErrorCode;

use shared::client::{LoginRequest, LoginResponse, UserInfo};

/// Fixed delay for authentication to prevent timing attacks
const AUTH_FIXED_DELAY_MS: u64 = 500;

/// POST /api/auth/login
///
/// Authenticates credentials and returns a JWT. The error for a wrong
/// password and an unknown email is identical, and the fixed delay runs
/// in both cases, so the response leaks nothing about which one it was.
pub async fn login(
    State(state): State<ServerState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    let repo = AccountRepository::new(state.db.clone());
    let account = repo.find_by_email(&req.email).await?;

    tokio::time::sleep(Duration::from_millis(AUTH_FIXED_DELAY_MS)).await;

    let account = match account {
        Some(a) => {
            if !a.is_active {
                return Err(AppError::new(ErrorCode::AccountDisabled));
            }

            let password_valid = a
                .verify_password(&req.password)
                .map_err(|e| AppError::internal(format!("Password verification failed: {}", e)))?;

            if !password_valid {
                security_log!(
                    "WARN",
                    "login_failed",
                    email = req.email.clone(),
                    reason = "invalid_credentials"
                );
                return Err(AppError::new(ErrorCode::InvalidCredentials));
            }

            a
        }
        None => {
            security_log!(
                "WARN",
                "login_failed",
                email = req.email.clone(),
                reason = "account_not_found"
            );
            return Err(AppError::new(ErrorCode::InvalidCredentials));
        }
    };

    // Resolve the store name for operator accounts
    let store_id = account.store_id.as_ref().map(|id| id.to_string());
    let store_name = match &store_id {
        Some(id) => {
            let store_repo = StoreRepository::new(state.db.clone());
            store_repo.find_by_id(id).await?.map(|s| s.name)
        }
        None => None,
    };

    let jwt_service = state.get_jwt_service();
    let account_id = account
        .id
        .as_ref()
        .map(|t| t.to_string())
        .unwrap_or_default();

    let token = jwt_service
        .generate_token(
            &account_id,
            &account.email,
            account.role,
            store_id.clone(),
            store_name.clone(),
        )
        .map_err(|e| AppError::internal(format!("Failed to generate token: {}", e)))?;

    tracing::info!(
        account_id = %account_id,
        email = %account.email,
        role = %account.role,
        "User logged in"
    );

    let response = LoginResponse {
        token,
        user: UserInfo {
            id: account_id,
            email: account.email,
            role: account.role.as_str().to_string(),
            store_id,
            store_name,
            created_at: account.created_at,
        },
    };

    Ok(Json(response))
}

/// GET /api/auth/me
pub async fn me(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
) -> Result<Json<UserInfo>, AppError> {
    // created_at is not carried in the token, fetch it fresh
    let repo = AccountRepository::new(state.db.clone());
    let created_at = repo
        .find_by_id(&user.id)
        .await?
        .map(|a| a.created_at)
        .unwrap_or(0);

    Ok(Json(UserInfo {
        id: user.id,
        email: user.email,
        role: user.role.as_str().to_string(),
        store_id: user.store_id,
        store_name: user.store_name,
        created_at,
    }))
}

/// POST /api/auth/logout
///
/// Stateless tokens cannot be revoked server side; this only logs the
/// event so clients have a uniform endpoint to call.
pub async fn logout(
    Extension(user): Extension<CurrentUser>,
) -> Result<Json<()>, AppError> {
    tracing::info!(
        account_id = %user.id,
        email = %user.email,
        "User logged out"
    );

    Ok(Json(()))
}
