use serde::{Deserialize, Serialize};

/// A registered reader. `email` doubles as the login key.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    #[serde(default)]
    pub followed_user_ids: Vec<String>,
    #[serde(default)]
    pub followed_book_ids: Vec<String>,
}

impl User {
    /// A user with no profile extras and nobody followed.
    pub fn new(id: impl Into<String>, name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            email: email.into(),
            avatar_url: None,
            bio: None,
            followed_user_ids: Vec::new(),
            followed_book_ids: Vec::new(),
        }
    }

    pub fn follows_user(&self, user_id: &str) -> bool {
        self.followed_user_ids.iter().any(|id| id == user_id)
    }

    pub fn follows_book(&self, book_id: &str) -> bool {
        self.followed_book_ids.iter().any(|id| id == book_id)
    }
}

pub fn validate_email(email: &str) -> Result<(), crate::errors::ModelError> {
    if !email.contains('@') {
        return Err(crate::errors::ModelError::Validation("invalid email".into()));
    }
    Ok(())
}

pub fn validate_name(name: &str) -> Result<(), crate::errors::ModelError> {
    if name.trim().is_empty() {
        return Err(crate::errors::ModelError::Validation("name required".into()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_camel_case_and_skips_absent_optionals() {
        let mut u = User::new("u1", "Alice", "a@example.com");
        u.followed_user_ids.push("u2".into());
        let v = serde_json::to_value(&u).unwrap();
        assert_eq!(v["followedUserIds"][0], "u2");
        assert!(v["followedBookIds"].as_array().unwrap().is_empty());
        assert!(v.get("avatarUrl").is_none());
        assert!(v.get("bio").is_none());
    }

    #[test]
    fn missing_follow_sets_decode_as_empty() {
        let u: User = serde_json::from_str(r#"{"id":"u9","name":"N","email":"n@e.com"}"#).unwrap();
        assert!(u.followed_user_ids.is_empty());
        assert!(u.followed_book_ids.is_empty());
    }

    #[test]
    fn validators() {
        assert!(validate_email("a@b").is_ok());
        assert!(validate_email("nope").is_err());
        assert!(validate_name("  ").is_err());
        assert!(validate_name("Bob").is_ok());
    }
}
