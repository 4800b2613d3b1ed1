use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::submission::NewPost;

/// A stored post. Immutable once appended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Post {
    pub id: u64,
    pub username: String,
    /// Raw message text; escaped when rendered.
    pub message: Option<String>,
    /// Pre-rendered snippet HTML; embedded verbatim.
    pub highlighted_code: Option<String>,
    /// Grammar name used for the snippet.
    pub language: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Default)]
struct Inner {
    posts: Vec<Post>,
    last_id: u64,
}

/// Append-only, in-memory list of posts shared by all request handlers.
///
/// A single lock covers id assignment and insertion, so ids are unique and
/// storage order always matches id order. Contents are lost on restart.
#[derive(Debug, Clone, Default)]
pub struct PostStore {
    inner: Arc<Mutex<Inner>>,
}

impl PostStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // Appends never leave the list half-written, so a poisoned lock is still usable.
    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Store a post and return its id. Ids start at 1 and are never reused.
    pub fn append(&self, new_post: NewPost) -> u64 {
        let mut inner = self.lock();
        inner.last_id += 1;
        let id = inner.last_id;
        inner.posts.push(Post {
            id,
            username: new_post.username,
            message: new_post.message,
            highlighted_code: new_post.highlighted_code,
            language: new_post.language,
            created_at: Utc::now(),
        });
        id
    }

    /// All posts, newest first.
    #[must_use]
    pub fn list_all(&self) -> Vec<Post> {
        self.lock().posts.iter().rev().cloned().collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.lock().posts.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lock().posts.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_post(message: &str) -> NewPost {
        NewPost {
            username: "tester".to_string(),
            message: Some(message.to_string()),
            highlighted_code: None,
            language: None,
        }
    }

    #[test]
    fn test_ids_start_at_one_and_increase() {
        let store = PostStore::new();
        assert!(store.is_empty());

        assert_eq!(store.append(new_post("a")), 1);
        assert_eq!(store.append(new_post("a")), 2);
        assert_eq!(store.append(new_post("a")), 3);
        assert_eq!(store.len(), 3);
    }

    #[test]
    fn test_list_all_is_newest_first() {
        let store = PostStore::new();
        store.append(new_post("A"));
        store.append(new_post("B"));
        store.append(new_post("C"));

        let messages: Vec<_> = store
            .list_all()
            .into_iter()
            .map(|p| p.message.unwrap())
            .collect();
        assert_eq!(messages, ["C", "B", "A"]);
    }

    #[test]
    fn test_list_all_does_not_mutate() {
        let store = PostStore::new();
        store.append(new_post("A"));
        store.append(new_post("B"));

        let first = store.list_all();
        let second = store.list_all();
        assert_eq!(first, second);
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_clones_share_storage() {
        let store = PostStore::new();
        let handle = store.clone();
        handle.append(new_post("shared"));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_concurrent_appends_get_unique_ids() {
        let store = PostStore::new();
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let store = store.clone();
                std::thread::spawn(move || {
                    (0..50)
                        .map(|_| store.append(new_post("x")))
                        .collect::<Vec<_>>()
                })
            })
            .collect();

        let mut ids: Vec<u64> = handles
            .into_iter()
            .flat_map(|h| h.join().unwrap())
            .collect();
        ids.sort_unstable();
        assert_eq!(ids, (1..=400).collect::<Vec<_>>());

        // Storage order matches id order
        let listed: Vec<u64> = store.list_all().iter().map(|p| p.id).collect();
        assert!(listed.windows(2).all(|w| w[0] > w[1]));
    }
}
