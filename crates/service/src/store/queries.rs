use models::{Book, Comment, Post};
use serde::{Deserialize, Serialize};

use super::DataStore;
use crate::storage::BlobStorage;

/// Which posts a reader's home feed shows.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeedKind {
    #[default]
    All,
    /// Posts by followed users, about followed books, or by the reader.
    Following,
}

/// A top-level comment with its direct replies, both oldest first.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct CommentThread {
    pub comment: Comment,
    pub replies: Vec<Comment>,
}

impl<S: BlobStorage> DataStore<S> {
    /// Home feed for `user_id`. Without a known user the feed is every post.
    pub fn feed(&self, user_id: Option<&str>, kind: FeedKind) -> Vec<&Post> {
        let posts = self.posts();
        let user = user_id.and_then(|id| self.user(id));
        match (kind, user) {
            (FeedKind::Following, Some(user)) => posts
                .into_iter()
                .filter(|p| user.follows_user(&p.user_id) || user.follows_book(&p.book_id) || p.user_id == user.id)
                .collect(),
            _ => posts,
        }
    }

    /// Posts about one book, newest first.
    pub fn posts_by_book(&self, book_id: &str) -> Vec<&Post> {
        self.posts().into_iter().filter(|p| p.book_id == book_id).collect()
    }

    /// Posts written by one user, newest first.
    pub fn posts_by_user(&self, user_id: &str) -> Vec<&Post> {
        self.posts().into_iter().filter(|p| p.user_id == user_id).collect()
    }

    /// Books whose title or author contains `term`, ignoring case.
    pub fn search_books(&self, term: &str) -> Vec<&Book> {
        let term = term.trim();
        self.books().iter().filter(|b| b.matches(term)).collect()
    }

    /// Comments on a post grouped into one-level threads.
    ///
    /// Replies whose parent is missing or is itself a reply are not shown.
    pub fn comment_thread(&self, post_id: &str) -> Vec<CommentThread> {
        let comments = self.comments(post_id);
        comments
            .iter()
            .filter(|c| !c.is_reply())
            .map(|root| CommentThread {
                comment: (*root).clone(),
                replies: comments.iter().filter(|c| c.is_reply_to(&root.id)).map(|c| (*c).clone()).collect(),
            })
            .collect()
    }
}
