//! Authentication routes: register and login.

use axum::{Json, Router, extract::State, http::StatusCode, routing::post};
use serde::{Deserialize, Serialize};

use notes_store::{NewUser, StoreError};

use crate::auth;
use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

// ============================================================================
// Request/Response Types
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    #[serde(default)]
    pub username: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct RegisterResponse {
    pub message: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
}

// ============================================================================
// Route Handlers
// ============================================================================

/// POST /api/register
///
/// The email_exists pre-check is a fast path only; the unique index on
/// users.email is the authoritative guard, so an insert losing the race is
/// still reported as a conflict rather than an internal error.
async fn register(
    State(state): State<AppState>,
    Json(request): Json<RegisterRequest>,
) -> ApiResult<(StatusCode, Json<RegisterResponse>)> {
    if request.email.is_empty() || request.password.is_empty() {
        return Err(ApiError::BadRequest(
            "email and password required".to_string(),
        ));
    }

    let store = state.store();

    if store.email_exists(&request.email).await? {
        return Err(ApiError::Conflict("email already registered".to_string()));
    }

    let password_hash = auth::hash_password(&request.password)?;
    let new_user = NewUser::new(request.username, request.email, password_hash);

    let user = store.insert_user(&new_user).await.map_err(|e| match e {
        StoreError::DuplicateEmail(_) => {
            ApiError::Conflict("email already registered".to_string())
        }
        other => ApiError::Store(other),
    })?;

    tracing::info!(user_id = %user.id, "user registered");

    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            message: "user created".to_string(),
        }),
    ))
}

/// POST /api/login
///
/// Unknown email and wrong password produce the identical response, so the
/// endpoint cannot be used to enumerate accounts.
async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> ApiResult<Json<LoginResponse>> {
    let invalid = || ApiError::Unauthorized("invalid credentials".to_string());

    let user = state
        .store()
        .get_user_by_email(&request.email)
        .await?
        .ok_or_else(invalid)?;

    if !auth::verify_password(&request.password, &user.password_hash)? {
        return Err(invalid());
    }

    let config = state.config();
    let token = auth::create_token(user.id, &config.jwt_secret, config.jwt_expiry_hours)?;

    tracing::info!(user_id = %user.id, "user logged in");

    Ok(Json(LoginResponse { token }))
}

/// Build auth routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/register", post(register))
        .route("/api/login", post(login))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_request_deserialize() {
        let json = r#"{"username": "u", "email": "u@x.com", "password": "p1"}"#;
        let request: RegisterRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.username, "u");
        assert_eq!(request.email, "u@x.com");
        assert_eq!(request.password, "p1");
    }

    #[test]
    fn test_register_request_username_optional() {
        let json = r#"{"email": "u@x.com", "password": "p1"}"#;
        let request: RegisterRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.username, "");
    }

    #[test]
    fn test_login_response_serialize() {
        let response = LoginResponse {
            token: "jwt.token.here".to_string(),
        };
        let json = serde_json::to_string(&response).unwrap();
        assert_eq!(json, r#"{"token":"jwt.token.here"}"#);
    }
}
