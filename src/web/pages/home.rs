//! The board page: flash messages, the post form, and every post, newest first.

use maud::{html, Markup, Render};

use crate::auth::Flash;
use crate::board::Post;
use crate::components::{
    BaseLayout, Button, EmptyState, FlashList, Form, FormGroup, Input, PostCard, Select,
    SelectOption, TextArea,
};
use crate::highlight::LANGUAGE_CHOICES;

/// Inputs for rendering the board page.
#[derive(Debug)]
pub struct BoardPageParams<'a> {
    /// Posts in display order (newest first)
    pub posts: &'a [Post],
    /// Highlighting stylesheet, embedded once in the page head
    pub stylesheet: &'a str,
    /// Flash messages to show once
    pub flashes: &'a [Flash],
    /// Whether the visitor may post
    pub logged_in: bool,
}

/// Render the board.
#[must_use]
pub fn render_board(params: &BoardPageParams<'_>) -> Markup {
    let content = html! {
        h1 { "Board" }

        (FlashList::new(params.flashes))

        @if params.logged_in {
            (render_post_form())
        } @else {
            p class="login-hint" {
                (Button::outline("Log in to post").href("/login"))
            }
        }

        section class="posts" {
            h2 { "Posts" }
            @if params.posts.is_empty() {
                (EmptyState::no_posts())
            } @else {
                @for post in params.posts {
                    (PostCard::new(post))
                }
            }
        }
    };

    BaseLayout::new("Board", params.logged_in)
        .with_stylesheet(params.stylesheet)
        .render(content)
}

fn render_post_form() -> Markup {
    let languages = LANGUAGE_CHOICES
        .iter()
        .map(|&(value, label)| SelectOption::new(value, label))
        .collect();

    let fields = html! {
        (FormGroup::new("username", "Name",
            Input::text("username").id("username").placeholder("Anonymous").maxlength(64).render()))
        (FormGroup::new("message", "Message",
            TextArea::new("message").id("message").rows(4).render()))
        (FormGroup::new("code_snippet", "Code (optional)",
            TextArea::new("code_snippet")
                .id("code_snippet")
                .rows(8)
                .class("code-input")
                .no_spellcheck()
                .render()))
        (FormGroup::new("language", "Language",
            Select::new("language").id("language").options(languages).selected("text").render()))
        (Button::primary("Post").r#type("submit"))
    };

    html! {
        section class="post-form" {
            h2 { "New post" }
            (Form::post("/post", fields))
        }
    }
}
