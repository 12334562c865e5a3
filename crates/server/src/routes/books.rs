use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use models::{Book, Post};
use serde::Deserialize;
use service::ids;

use crate::errors::JsonApiError;
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct BookQuery {
    #[serde(default)]
    pub q: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewBook {
    pub title: String,
    pub author: String,
    #[serde(default)]
    pub cover_url: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

/// All books, or those matching `?q=` on title or author.
pub async fn list(State(state): State<AppState>, Query(query): Query<BookQuery>) -> Json<Vec<Book>> {
    let store = state.store.lock().await;
    let books: Vec<Book> = match query.q.as_deref() {
        Some(term) => store.search_books(term).into_iter().cloned().collect(),
        None => store.books().to_vec(),
    };
    Json(books)
}

pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<NewBook>,
) -> Result<(StatusCode, Json<Book>), JsonApiError> {
    if input.title.trim().is_empty() || input.author.trim().is_empty() {
        return Err(JsonApiError::bad_request("title and author are required"));
    }
    let book = Book {
        id: ids::new_book_id(),
        title: input.title,
        author: input.author,
        cover_url: input.cover_url,
        description: input.description,
    };
    let mut store = state.store.lock().await;
    store.add_book(book.clone())?;
    Ok((StatusCode::CREATED, Json(book)))
}

pub async fn get(State(state): State<AppState>, Path(id): Path<String>) -> Result<Json<Book>, StatusCode> {
    let store = state.store.lock().await;
    store.book(&id).cloned().map(Json).ok_or(StatusCode::NOT_FOUND)
}

pub async fn posts(State(state): State<AppState>, Path(id): Path<String>) -> Json<Vec<Post>> {
    let store = state.store.lock().await;
    Json(store.posts_by_book(&id).into_iter().cloned().collect())
}
