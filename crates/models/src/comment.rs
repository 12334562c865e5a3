use serde::{Deserialize, Serialize};

/// A comment on a post. A `parent_id` marks a reply to a top-level comment;
/// replies to replies are never produced.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: String,
    pub post_id: String,
    pub user_id: String,
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,
    pub created_at: i64,
}

impl Comment {
    pub fn is_reply(&self) -> bool {
        self.parent_id.is_some()
    }

    pub fn is_reply_to(&self, comment_id: &str) -> bool {
        self.parent_id.as_deref() == Some(comment_id)
    }
}
