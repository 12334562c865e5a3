use serde::{Deserialize, Serialize};

/// A review post about one book. `created_at` is milliseconds since the Unix epoch.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: String,
    pub user_id: String,
    pub book_id: String,
    pub title: String,
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    pub created_at: i64,
    /// Ids of users who liked the post, in the order they liked it.
    #[serde(default)]
    pub likes: Vec<String>,
}
