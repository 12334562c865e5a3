use axum::{extract::State, http::StatusCode, Json};
use models::user::{validate_email, validate_name};
use models::User;
use serde::Deserialize;

use crate::errors::JsonApiError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct LoginInput {
    pub email: String,
}

#[derive(Debug, Deserialize)]
pub struct RegisterInput {
    pub name: String,
    pub email: String,
}

/// Current session user, or `null`.
pub async fn current(State(state): State<AppState>) -> Json<Option<User>> {
    let store = state.store.lock().await;
    Json(store.current_user().cloned())
}

pub async fn login(
    State(state): State<AppState>,
    Json(input): Json<LoginInput>,
) -> Result<Json<User>, JsonApiError> {
    let mut store = state.store.lock().await;
    store
        .login(&input.email)?
        .map(Json)
        .ok_or_else(|| JsonApiError::not_found("user"))
}

pub async fn register(
    State(state): State<AppState>,
    Json(input): Json<RegisterInput>,
) -> Result<Json<User>, JsonApiError> {
    validate_name(&input.name).map_err(|e| JsonApiError::bad_request(e.to_string()))?;
    validate_email(&input.email).map_err(|e| JsonApiError::bad_request(e.to_string()))?;
    let mut store = state.store.lock().await;
    let user = store.register(input.name.trim(), input.email.trim())?;
    Ok(Json(user))
}

pub async fn logout(State(state): State<AppState>) -> Result<StatusCode, JsonApiError> {
    let mut store = state.store.lock().await;
    store.logout()?;
    Ok(StatusCode::NO_CONTENT)
}
