use std::sync::Arc;

use axum::extract::State;
use axum::http::HeaderMap;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::models::{Notice, User};
use crate::services::auth;
use crate::state::AppState;

fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty())
}

/// Resolves the session behind the request's bearer token.
pub fn current_user(state: &AppState, headers: &HeaderMap) -> Result<User, AppError> {
    let token = bearer_token(headers).ok_or(AppError::Unauthorized)?;
    state
        .sessions()?
        .get(token)
        .cloned()
        .ok_or(AppError::Unauthorized)
}

// POST /api/auth/login
#[derive(Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Serialize)]
pub struct LoginResponse {
    token: String,
    user: User,
    notice: Notice,
}

pub async fn login(
    State(state): State<Arc<AppState>>,
    Json(body): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    let user = auth::login(state.backend.as_ref(), &body.email, &body.password).await?;
    let token = state.sessions()?.create(user.clone());

    let notice = Notice::success(
        "Welcome to TuneSpace!",
        format!("Logged in successfully as {}.", user.role.as_str()),
    );
    Ok(Json(LoginResponse {
        token,
        user,
        notice,
    }))
}

// POST /api/auth/register
#[derive(Deserialize)]
pub struct RegisterRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
    pub role: Option<String>,
}

pub async fn register(
    State(state): State<Arc<AppState>>,
    Json(body): Json<RegisterRequest>,
) -> Result<Json<Notice>, AppError> {
    auth::register(
        state.backend.as_ref(),
        &body.name,
        &body.email,
        &body.password,
        body.role.as_deref(),
    )
    .await?;

    Ok(Json(Notice::success(
        "Account Created!",
        "Welcome to TuneSpace. You can now log in.",
    )))
}

// POST /api/auth/logout
pub async fn logout(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Json<Notice>, AppError> {
    let token = bearer_token(&headers).ok_or(AppError::Unauthorized)?;
    let removed = state.sessions()?.remove(token);
    match removed {
        Some(user) => {
            tracing::info!(email = %user.id, "visitor logged out");
            Ok(Json(Notice::success("Logged out", "See you next time!")))
        }
        None => Err(AppError::Unauthorized),
    }
}
