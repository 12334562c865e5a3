use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    pub id: String,
    pub title: String,
    pub author: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cover_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Book {
    /// Case-insensitive substring match against title or author.
    pub fn matches(&self, term: &str) -> bool {
        let term = term.to_lowercase();
        self.title.to_lowercase().contains(&term) || self.author.to_lowercase().contains(&term)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dune() -> Book {
        Book {
            id: "b1".into(),
            title: "Dune".into(),
            author: "Frank Herbert".into(),
            cover_url: None,
            description: None,
        }
    }

    #[test]
    fn matches_title_or_author_ignoring_case() {
        let b = dune();
        assert!(b.matches("dun"));
        assert!(b.matches("HERBERT"));
        assert!(b.matches(""));
        assert!(!b.matches("orwell"));
    }
}
