use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use models::Comment;
use serde::Deserialize;
use service::{ids, CommentThread};

use crate::errors::JsonApiError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewComment {
    pub user_id: String,
    pub content: String,
    #[serde(default)]
    pub parent_id: Option<String>,
}

/// Comments on a post, oldest first.
pub async fn list(State(state): State<AppState>, Path(post_id): Path<String>) -> Json<Vec<Comment>> {
    let store = state.store.lock().await;
    Json(store.comments(&post_id).into_iter().cloned().collect())
}

pub async fn thread(State(state): State<AppState>, Path(post_id): Path<String>) -> Json<Vec<CommentThread>> {
    let store = state.store.lock().await;
    Json(store.comment_thread(&post_id))
}

pub async fn create(
    State(state): State<AppState>,
    Path(post_id): Path<String>,
    Json(input): Json<NewComment>,
) -> Result<(StatusCode, Json<Comment>), JsonApiError> {
    if input.content.trim().is_empty() {
        return Err(JsonApiError::bad_request("content is required"));
    }
    let mut store = state.store.lock().await;
    if store.post(&post_id).is_none() {
        return Err(JsonApiError::not_found("post"));
    }
    let comment = Comment {
        id: ids::new_comment_id(),
        post_id,
        user_id: input.user_id,
        content: input.content,
        parent_id: input.parent_id,
        created_at: ids::now_millis(),
    };
    store.add_comment(comment.clone())?;
    Ok((StatusCode::CREATED, Json(comment)))
}

/// Delete a comment together with its replies.
pub async fn remove(State(state): State<AppState>, Path(id): Path<String>) -> Result<StatusCode, JsonApiError> {
    let mut store = state.store.lock().await;
    match store.delete_comment(&id)? {
        0 => Err(JsonApiError::not_found("comment")),
        _ => Ok(StatusCode::NO_CONTENT),
    }
}
