//! Authentication Handlers
//!
//! Handles registration and login; both return a fresh access token.

use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};

use crate::AppError;
use crate::core::ServerState;
use crate::db::models::{UserCreate, UserRole};
use crate::db::repository::{RepoError, UserRepository};
use crate::security_log;
use crate::utils::validation::{
    MAX_NAME_LEN, MAX_PASSWORD_LEN, validate_email, validate_required_text,
};

/// Register payload
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    pub role: UserRole,
}

/// Login payload
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Token response for both register and login
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub token: String,
    pub email: String,
}

/// Register handler
///
/// Creates the user and returns a token so the caller is logged in
/// immediately.
pub async fn register(
    State(state): State<ServerState>,
    Json(req): Json<RegisterRequest>,
) -> Result<Json<AuthResponse>, AppError> {
    validate_required_text(&req.name, "name", MAX_NAME_LEN)?;
    validate_email(&req.email)?;
    validate_required_text(&req.password, "password", MAX_PASSWORD_LEN)?;

    let users = UserRepository::new(state.get_db());
    let user = users
        .create(UserCreate {
            name: req.name,
            email: req.email,
            password: req.password,
            role: req.role,
        })
        .await
        .map_err(|e| match e {
            RepoError::Duplicate(_) => AppError::conflict("Email already used"),
            other => AppError::from(other),
        })?;

    let user_id = user.id.as_ref().map(|t| t.to_string()).unwrap_or_default();
    let token = state
        .get_jwt_service()
        .generate_token(&user_id, &user.email, &user.name, user.role.as_str())
        .map_err(|e| AppError::internal(format!("Failed to generate token: {}", e)))?;

    tracing::info!(user_id = %user_id, email = %user.email, "User registered");

    Ok(Json(AuthResponse {
        token,
        email: user.email,
    }))
}

/// Login handler
///
/// Authenticates user credentials and returns a JWT token
pub async fn login(
    State(state): State<ServerState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<AuthResponse>, AppError> {
    let users = UserRepository::new(state.get_db());
    let user = users
        .find_by_email(&req.email)
        .await?
        .ok_or_else(|| AppError::not_found("No user found for this email"))?;

    let password_valid = user
        .verify_password(&req.password)
        .map_err(|e| AppError::internal(format!("Password verification failed: {}", e)))?;

    if !password_valid {
        security_log!("WARN", "login_failed", email = req.email.clone());
        tracing::warn!(email = %req.email, "Login failed - invalid password");
        return Err(AppError::invalid_credentials());
    }

    let user_id = user.id.as_ref().map(|t| t.to_string()).unwrap_or_default();
    let token = state
        .get_jwt_service()
        .generate_token(&user_id, &user.email, &user.name, user.role.as_str())
        .map_err(|e| AppError::internal(format!("Failed to generate token: {}", e)))?;

    tracing::info!(
        user_id = %user_id,
        email = %user.email,
        "User logged in successfully"
    );

    Ok(Json(AuthResponse {
        token,
        email: user.email,
    }))
}
