//! Demo dataset used when no persisted store exists yet.

use models::{Book, Comment, Post, Store, User};

/// Build the seed store with timestamps relative to `now` (ms since epoch).
pub fn seed_store(now: i64) -> Store {
    let users = vec![
        User {
            id: "u1".into(),
            name: "Alice Reader".into(),
            email: "alice@example.com".into(),
            avatar_url: Some("https://picsum.photos/seed/alice/200/200".into()),
            bio: Some("Lover of sci-fi and philosophy.".into()),
            followed_user_ids: vec!["u2".into()],
            followed_book_ids: vec!["b1".into()],
        },
        User {
            id: "u2".into(),
            name: "Bob Critic".into(),
            email: "bob@example.com".into(),
            avatar_url: Some("https://picsum.photos/seed/bob/200/200".into()),
            bio: Some("I write harsh but fair reviews.".into()),
            followed_user_ids: Vec::new(),
            followed_book_ids: Vec::new(),
        },
    ];

    let books = vec![
        Book {
            id: "b1".into(),
            title: "Dune".into(),
            author: "Frank Herbert".into(),
            cover_url: Some("https://picsum.photos/seed/dune/300/450".into()),
            description: Some("A mythic and emotionally charged hero's journey.".into()),
        },
        Book {
            id: "b2".into(),
            title: "1984".into(),
            author: "George Orwell".into(),
            cover_url: Some("https://picsum.photos/seed/1984/300/450".into()),
            description: Some("A dystopian social science fiction novel.".into()),
        },
    ];

    let posts = vec![
        Post {
            id: "p1".into(),
            user_id: "u1".into(),
            book_id: "b1".into(),
            title: "Why Paul Atreides is a Warning, Not a Hero".into(),
            content: "Everyone thinks Dune is a typical hero journey, but reading deeper into the \
                      subtext reveals Herbert's warning about charismatic leaders..."
                .into(),
            image_url: Some("https://picsum.photos/seed/dunepost/800/400".into()),
            created_at: now - 10_000_000,
            likes: vec!["u2".into()],
        },
        Post {
            id: "p2".into(),
            user_id: "u2".into(),
            book_id: "b2".into(),
            title: "The Relevance of Newspeak Today".into(),
            content: "Language controls thought. In 1984, the reduction of vocabulary meant the \
                      reduction of the range of thought. We see this today in..."
                .into(),
            image_url: None,
            created_at: now - 5_000_000,
            likes: Vec::new(),
        },
    ];

    let comments = vec![
        Comment {
            id: "c1".into(),
            post_id: "p1".into(),
            user_id: "u2".into(),
            content: "Great insight! I missed that on my first read.".into(),
            parent_id: None,
            created_at: now - 9_000_000,
        },
        Comment {
            id: "c2".into(),
            post_id: "p1".into(),
            user_id: "u1".into(),
            content: "Thanks Bob! Messiah really drives the point home.".into(),
            parent_id: Some("c1".into()),
            created_at: now - 8_000_000,
        },
    ];

    Store { users, books, posts, comments, current_user: None }
}
