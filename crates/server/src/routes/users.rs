use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use models::{Post, User};
use serde::Serialize;

use crate::errors::JsonApiError;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct FollowState {
    pub following: bool,
}

pub async fn list(State(state): State<AppState>) -> Json<Vec<User>> {
    let store = state.store.lock().await;
    Json(store.users().to_vec())
}

pub async fn get(State(state): State<AppState>, Path(id): Path<String>) -> Result<Json<User>, StatusCode> {
    let store = state.store.lock().await;
    store.user(&id).cloned().map(Json).ok_or(StatusCode::NOT_FOUND)
}

/// Replace a user's profile. The body must carry the same id as the path.
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(user): Json<User>,
) -> Result<Json<User>, JsonApiError> {
    if user.id != id {
        return Err(JsonApiError::bad_request("user id does not match path"));
    }
    let mut store = state.store.lock().await;
    if store.user(&id).is_none() {
        return Err(JsonApiError::not_found("user"));
    }
    store.update_user(user.clone())?;
    Ok(Json(user))
}

pub async fn posts(State(state): State<AppState>, Path(id): Path<String>) -> Json<Vec<Post>> {
    let store = state.store.lock().await;
    Json(store.posts_by_user(&id).into_iter().cloned().collect())
}

pub async fn follow_user(
    State(state): State<AppState>,
    Path((id, target)): Path<(String, String)>,
) -> Result<Json<FollowState>, JsonApiError> {
    let mut store = state.store.lock().await;
    store
        .toggle_follow_user(&id, &target)?
        .map(|following| Json(FollowState { following }))
        .ok_or_else(|| JsonApiError::not_found("user"))
}

pub async fn follow_book(
    State(state): State<AppState>,
    Path((id, book)): Path<(String, String)>,
) -> Result<Json<FollowState>, JsonApiError> {
    let mut store = state.store.lock().await;
    store
        .toggle_follow_book(&id, &book)?
        .map(|following| Json(FollowState { following }))
        .ok_or_else(|| JsonApiError::not_found("user"))
}
