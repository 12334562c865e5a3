pub mod session;
pub mod users;
pub mod books;
pub mod posts;
pub mod comments;
pub mod assist;

use axum::{
    routing::{delete, get, post},
    Json, Router,
};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

use common::types::Health;

use crate::state::AppState;

pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

/// Build the full application router over the shared store.
pub fn build_router(state: AppState, cors: CorsLayer) -> Router {
    let session_routes = Router::new()
        .route("/api/session", get(session::current))
        .route("/api/session/login", post(session::login))
        .route("/api/session/register", post(session::register))
        .route("/api/session/logout", post(session::logout));

    let user_routes = Router::new()
        .route("/api/users", get(users::list))
        .route("/api/users/:id", get(users::get).put(users::update))
        .route("/api/users/:id/posts", get(users::posts))
        .route("/api/users/:id/follow/users/:target", post(users::follow_user))
        .route("/api/users/:id/follow/books/:book", post(users::follow_book));

    let book_routes = Router::new()
        .route("/api/books", get(books::list).post(books::create))
        .route("/api/books/:id", get(books::get))
        .route("/api/books/:id/posts", get(books::posts));

    let post_routes = Router::new()
        .route("/api/posts", get(posts::list).post(posts::create))
        .route("/api/feed", get(posts::feed))
        .route("/api/posts/:id", get(posts::get).put(posts::update))
        .route("/api/posts/:id/like", post(posts::like))
        .route("/api/posts/:id/comments", get(comments::list).post(comments::create))
        .route("/api/posts/:id/thread", get(comments::thread))
        .route("/api/comments/:id", delete(comments::remove));

    Router::new()
        .route("/health", get(health))
        .merge(session_routes)
        .merge(user_routes)
        .merge(book_routes)
        .merge(post_routes)
        .route("/api/assist", post(assist::revise))
        .with_state(state)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO).include_headers(false))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO).include_headers(false))
                // 5xx is logged at ERROR
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}
