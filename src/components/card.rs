//! Card components for the post list.

use maud::{html, Markup, PreEscaped, Render};

use crate::board::Post;
use crate::sanitize::nl2br;

/// One post: author line, message, and optional highlighted snippet.
#[derive(Debug, Clone)]
pub struct PostCard<'a> {
    pub post: &'a Post,
}

impl<'a> PostCard<'a> {
    #[must_use]
    pub const fn new(post: &'a Post) -> Self {
        Self { post }
    }
}

impl Render for PostCard<'_> {
    fn render(&self) -> Markup {
        let post = self.post;
        let posted_at = post.created_at.format("%Y-%m-%d %H:%M:%S UTC").to_string();

        html! {
            article class="post-card" id={ "post-" (post.id) } {
                header {
                    span class="post-id" { "#" (post.id) }
                    span class="post-author" { (post.username) }
                    time datetime=(post.created_at.to_rfc3339()) { (posted_at) }
                }
                @if post.message.is_some() {
                    div class="post-message" { (nl2br(post.message.as_deref())) }
                }
                @if let Some(code) = &post.highlighted_code {
                    @if let Some(language) = &post.language {
                        div class="post-language" { (language) }
                    }
                    (PreEscaped(code))
                }
            }
        }
    }
}

/// Placeholder shown when a list has nothing in it.
#[derive(Debug, Clone)]
pub struct EmptyState<'a> {
    pub message: &'a str,
}

impl<'a> EmptyState<'a> {
    /// Create a default "no posts" empty state.
    #[must_use]
    pub const fn no_posts() -> Self {
        Self {
            message: "No posts yet.",
        }
    }
}

impl Render for EmptyState<'_> {
    fn render(&self) -> Markup {
        html! {
            p class="empty-state" { (self.message) }
        }
    }
}
