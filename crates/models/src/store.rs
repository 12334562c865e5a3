use serde::{Deserialize, Serialize};

use crate::errors::ModelError;
use crate::{Book, Comment, Post, User};

/// The whole dataset, persisted as a single JSON document.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Store {
    #[serde(default)]
    pub users: Vec<User>,
    #[serde(default)]
    pub books: Vec<Book>,
    #[serde(default)]
    pub posts: Vec<Post>,
    #[serde(default)]
    pub comments: Vec<Comment>,
    #[serde(default)]
    pub current_user: Option<User>,
}

impl Store {
    pub fn to_json(&self) -> Result<String, ModelError> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_json(raw: &str) -> Result<Self, ModelError> {
        Ok(serde_json::from_str(raw)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn null_current_user_is_serialized() {
        let s = Store::default();
        let v: serde_json::Value = serde_json::from_str(&s.to_json().unwrap()).unwrap();
        assert!(v["currentUser"].is_null());
        assert!(v["users"].as_array().unwrap().is_empty());
    }

    #[test]
    fn partial_document_decodes_with_empty_collections() {
        let s = Store::from_json(r#"{"users":[{"id":"u1","name":"A","email":"a@e"}]}"#).unwrap();
        assert_eq!(s.users.len(), 1);
        assert!(s.books.is_empty());
        assert!(s.current_user.is_none());
    }

    #[test]
    fn garbage_is_a_decode_error() {
        assert!(matches!(Store::from_json("{not json"), Err(ModelError::Decode(_))));
    }
}
