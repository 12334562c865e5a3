//! Entity records for the catalogue: users, books, review posts and comments,
//! plus the `Store` aggregate that is persisted as one JSON document.

pub mod errors;
pub mod user;
pub mod book;
pub mod post;
pub mod comment;
pub mod store;
pub mod assist;

pub use assist::AssistMode;
pub use book::Book;
pub use comment::Comment;
pub use post::Post;
pub use store::Store;
pub use user::User;
