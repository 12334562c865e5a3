//! Identifier and timestamp generation.
//!
//! Ids are a one-letter entity prefix followed by a random v4 UUID, so two
//! records created within the same millisecond never collide.

use chrono::Utc;
use uuid::Uuid;

fn prefixed(prefix: &str) -> String {
    format!("{}-{}", prefix, Uuid::new_v4().simple())
}

pub fn new_user_id() -> String { prefixed("u") }
pub fn new_book_id() -> String { prefixed("b") }
pub fn new_post_id() -> String { prefixed("p") }
pub fn new_comment_id() -> String { prefixed("c") }

/// Current wall-clock time in milliseconds since the Unix epoch.
pub fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn ids_carry_entity_prefix() {
        assert!(new_user_id().starts_with("u-"));
        assert!(new_book_id().starts_with("b-"));
        assert!(new_post_id().starts_with("p-"));
        assert!(new_comment_id().starts_with("c-"));
    }

    #[test]
    fn rapid_generation_does_not_collide() {
        let ids: HashSet<String> = (0..1000).map(|_| new_post_id()).collect();
        assert_eq!(ids.len(), 1000);
    }
}
