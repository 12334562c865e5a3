//! The data store service: sole owner of the catalogue dataset.
//!
//! Every mutating call rewrites the whole `Store` through the [`BlobStorage`]
//! port before returning. Reads are linear scans over the in-memory vectors.

mod queries;

pub use queries::{CommentThread, FeedKind};

use models::{Book, Comment, Post, Store, User};
use tracing::{debug, info, instrument, warn};

use crate::errors::ServiceError;
use crate::ids;
use crate::seed;
use crate::storage::BlobStorage;

/// Fixed key the serialized store lives under.
pub const STORAGE_KEY: &str = "biblioshare_data_v1";

pub struct DataStore<S: BlobStorage> {
    data: Store,
    storage: S,
}

impl<S: BlobStorage> DataStore<S> {
    /// Hydrate from `storage`, or seed and persist when nothing usable is stored.
    pub fn open(storage: S) -> Result<Self, ServiceError> {
        Self::open_at(storage, ids::now_millis())
    }

    /// Like [`DataStore::open`], with seed timestamps relative to `now` (ms).
    pub fn open_at(storage: S, now: i64) -> Result<Self, ServiceError> {
        let loaded = match storage.get_item(STORAGE_KEY)? {
            Some(raw) => match Store::from_json(&raw) {
                Ok(data) => Some(data),
                Err(e) => {
                    warn!(key = STORAGE_KEY, error = %e, "stored data unreadable; reseeding");
                    None
                }
            },
            None => None,
        };

        match loaded {
            Some(data) => {
                info!(
                    users = data.users.len(),
                    books = data.books.len(),
                    posts = data.posts.len(),
                    comments = data.comments.len(),
                    "store hydrated"
                );
                Ok(Self { data, storage })
            }
            None => {
                let store = Self { data: seed::seed_store(now), storage };
                store.save()?;
                info!(key = STORAGE_KEY, "store seeded");
                Ok(store)
            }
        }
    }

    fn save(&self) -> Result<(), ServiceError> {
        let raw = self.data.to_json().map_err(|e| ServiceError::Serialization(e.to_string()))?;
        self.storage.set_item(STORAGE_KEY, &raw)
    }

    /// Borrow the whole dataset.
    pub fn snapshot(&self) -> &Store {
        &self.data
    }

    // --- session ---

    /// Start a session for the first user with exactly this email.
    #[instrument(skip(self))]
    pub fn login(&mut self, email: &str) -> Result<Option<User>, ServiceError> {
        let Some(user) = self.data.users.iter().find(|u| u.email == email).cloned() else {
            debug!("no user with that email");
            return Ok(None);
        };
        self.data.current_user = Some(user.clone());
        self.save()?;
        info!(user_id = %user.id, "user_logged_in");
        Ok(Some(user))
    }

    /// Create a user and make it the session user. Emails are not checked for uniqueness.
    #[instrument(skip(self))]
    pub fn register(&mut self, name: &str, email: &str) -> Result<User, ServiceError> {
        let user = User::new(ids::new_user_id(), name, email);
        self.data.users.push(user.clone());
        self.data.current_user = Some(user.clone());
        self.save()?;
        info!(user_id = %user.id, "user_registered");
        Ok(user)
    }

    pub fn logout(&mut self) -> Result<(), ServiceError> {
        self.data.current_user = None;
        self.save()
    }

    pub fn current_user(&self) -> Option<&User> {
        self.data.current_user.as_ref()
    }

    // --- users ---

    pub fn users(&self) -> &[User] {
        &self.data.users
    }

    pub fn user(&self, id: &str) -> Option<&User> {
        self.data.users.iter().find(|u| u.id == id)
    }

    /// Replace the user with the same id; the session copy follows when it is that user.
    #[instrument(skip(self, user), fields(user_id = %user.id))]
    pub fn update_user(&mut self, user: User) -> Result<(), ServiceError> {
        if let Some(slot) = self.data.users.iter_mut().find(|u| u.id == user.id) {
            *slot = user.clone();
        }
        if self.data.current_user.as_ref().is_some_and(|c| c.id == user.id) {
            self.data.current_user = Some(user);
        }
        self.save()
    }

    // --- books ---

    pub fn books(&self) -> &[Book] {
        &self.data.books
    }

    pub fn book(&self, id: &str) -> Option<&Book> {
        self.data.books.iter().find(|b| b.id == id)
    }

    #[instrument(skip(self, book), fields(book_id = %book.id))]
    pub fn add_book(&mut self, book: Book) -> Result<(), ServiceError> {
        self.data.books.push(book);
        self.save()
    }

    // --- posts ---

    /// All posts, newest first. Equal timestamps keep their stored order.
    pub fn posts(&self) -> Vec<&Post> {
        let mut posts: Vec<&Post> = self.data.posts.iter().collect();
        posts.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        posts
    }

    pub fn post(&self, id: &str) -> Option<&Post> {
        self.data.posts.iter().find(|p| p.id == id)
    }

    #[instrument(skip(self, post), fields(post_id = %post.id, user_id = %post.user_id))]
    pub fn add_post(&mut self, post: Post) -> Result<(), ServiceError> {
        self.data.posts.insert(0, post);
        self.save()
    }

    /// Replace the post with the same id. Unknown ids change nothing.
    #[instrument(skip(self, post), fields(post_id = %post.id))]
    pub fn update_post(&mut self, post: Post) -> Result<(), ServiceError> {
        if let Some(slot) = self.data.posts.iter_mut().find(|p| p.id == post.id) {
            *slot = post;
        }
        self.save()
    }

    // --- comments ---

    /// Comments on `post_id`, oldest first.
    pub fn comments(&self, post_id: &str) -> Vec<&Comment> {
        let mut comments: Vec<&Comment> = self.data.comments.iter().filter(|c| c.post_id == post_id).collect();
        comments.sort_by_key(|c| c.created_at);
        comments
    }

    #[instrument(skip(self, comment), fields(comment_id = %comment.id, post_id = %comment.post_id))]
    pub fn add_comment(&mut self, comment: Comment) -> Result<(), ServiceError> {
        self.data.comments.push(comment);
        self.save()
    }

    /// Remove a comment and its direct replies. Returns how many comments were removed.
    #[instrument(skip(self))]
    pub fn delete_comment(&mut self, comment_id: &str) -> Result<usize, ServiceError> {
        let before = self.data.comments.len();
        self.data.comments.retain(|c| c.id != comment_id && !c.is_reply_to(comment_id));
        let removed = before - self.data.comments.len();
        self.save()?;
        debug!(removed, "comments deleted");
        Ok(removed)
    }

    // --- relationship toggles ---

    /// Follow or unfollow `target_id`. Returns the new state, or `None` if the follower is unknown.
    #[instrument(skip(self))]
    pub fn toggle_follow_user(&mut self, follower_id: &str, target_id: &str) -> Result<Option<bool>, ServiceError> {
        let Some(mut user) = self.user(follower_id).cloned() else {
            return Ok(None);
        };
        let following = toggle(&mut user.followed_user_ids, target_id);
        self.update_user(user)?;
        Ok(Some(following))
    }

    /// Follow or unfollow a book. Returns the new state, or `None` if the user is unknown.
    #[instrument(skip(self))]
    pub fn toggle_follow_book(&mut self, user_id: &str, book_id: &str) -> Result<Option<bool>, ServiceError> {
        let Some(mut user) = self.user(user_id).cloned() else {
            return Ok(None);
        };
        let following = toggle(&mut user.followed_book_ids, book_id);
        self.update_user(user)?;
        Ok(Some(following))
    }

    /// Like or unlike a post. Returns the new state, or `None` if the post is unknown.
    #[instrument(skip(self))]
    pub fn toggle_like_post(&mut self, user_id: &str, post_id: &str) -> Result<Option<bool>, ServiceError> {
        let Some(mut post) = self.post(post_id).cloned() else {
            return Ok(None);
        };
        let liked = toggle(&mut post.likes, user_id);
        self.update_post(post)?;
        Ok(Some(liked))
    }
}

/// Remove `id` if present, else append it. Returns whether it is now present.
fn toggle(ids: &mut Vec<String>, id: &str) -> bool {
    if ids.iter().any(|x| x == id) {
        ids.retain(|x| x != id);
        false
    } else {
        ids.push(id.to_string());
        true
    }
}
