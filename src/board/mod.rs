//! The bulletin board itself: post records, the in-memory store, and the
//! rules for turning a submitted form into a post.

pub mod store;
pub mod submission;

pub use store::{Post, PostStore};
pub use submission::{prepare_post, NewPost, PostForm, DEFAULT_USERNAME};
