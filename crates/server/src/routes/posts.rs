use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use models::Post;
use serde::{Deserialize, Serialize};
use service::{ids, FeedKind};

use crate::errors::JsonApiError;
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedQuery {
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub kind: FeedKind,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPost {
    pub user_id: String,
    pub book_id: String,
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub image_url: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LikeInput {
    pub user_id: String,
}

#[derive(Debug, Serialize)]
pub struct LikeState {
    pub liked: bool,
    pub likes: usize,
}

pub async fn list(State(state): State<AppState>) -> Json<Vec<Post>> {
    let store = state.store.lock().await;
    Json(store.posts().into_iter().cloned().collect())
}

pub async fn feed(State(state): State<AppState>, Query(query): Query<FeedQuery>) -> Json<Vec<Post>> {
    let store = state.store.lock().await;
    Json(store.feed(query.user_id.as_deref(), query.kind).into_iter().cloned().collect())
}

pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<NewPost>,
) -> Result<(StatusCode, Json<Post>), JsonApiError> {
    if input.title.trim().is_empty() || input.content.trim().is_empty() {
        return Err(JsonApiError::bad_request("title and content are required"));
    }
    let post = Post {
        id: ids::new_post_id(),
        user_id: input.user_id,
        book_id: input.book_id,
        title: input.title,
        content: input.content,
        image_url: input.image_url,
        created_at: ids::now_millis(),
        likes: Vec::new(),
    };
    let mut store = state.store.lock().await;
    store.add_post(post.clone())?;
    Ok((StatusCode::CREATED, Json(post)))
}

pub async fn get(State(state): State<AppState>, Path(id): Path<String>) -> Result<Json<Post>, StatusCode> {
    let store = state.store.lock().await;
    store.post(&id).cloned().map(Json).ok_or(StatusCode::NOT_FOUND)
}

/// Replace a post. The body must carry the same id as the path.
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(post): Json<Post>,
) -> Result<Json<Post>, JsonApiError> {
    if post.id != id {
        return Err(JsonApiError::bad_request("post id does not match path"));
    }
    let mut store = state.store.lock().await;
    if store.post(&id).is_none() {
        return Err(JsonApiError::not_found("post"));
    }
    store.update_post(post.clone())?;
    Ok(Json(post))
}

pub async fn like(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(input): Json<LikeInput>,
) -> Result<Json<LikeState>, JsonApiError> {
    let mut store = state.store.lock().await;
    let liked = store
        .toggle_like_post(&input.user_id, &id)?
        .ok_or_else(|| JsonApiError::not_found("post"))?;
    let likes = store.post(&id).map(|p| p.likes.len()).unwrap_or_default();
    Ok(Json(LikeState { liked, likes }))
}
