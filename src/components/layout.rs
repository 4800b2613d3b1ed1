//! Base layout components for the web UI.
//!
//! This module provides the main page layout structure including
//! the HTML skeleton, navigation, and footer.

use maud::{html, Markup, PreEscaped, DOCTYPE};

/// Site name shown in titles and the header.
pub const SITE_NAME: &str = "Code BBS";

/// Page styles, inlined so the service has no static-file dependency.
const BASE_STYLE: &str = r"
:root { --text: #18181b; --muted: #52525b; --border: #e4e4e7; --bg: #ffffff; --accent: #2563eb; }
* { box-sizing: border-box; }
body { margin: 0; font-family: system-ui, -apple-system, sans-serif; color: var(--text); background: var(--bg); line-height: 1.5; }
.container { max-width: 860px; margin: 0 auto; padding: 0 1rem; }
header nav { display: flex; justify-content: space-between; align-items: center; padding: 1rem 0; border-bottom: 1px solid var(--border); }
header nav ul { list-style: none; display: flex; gap: 1rem; margin: 0; padding: 0; }
a { color: var(--accent); }
article { padding: 0.75rem 1rem; border-radius: 0.375rem; margin: 1rem 0; border: 1px solid var(--border); }
article.success { background: #f0fdf4; border-color: #86efac; }
article.error { background: #fef2f2; border-color: #fca5a5; }
article.warning { background: #fffbeb; border-color: #fcd34d; }
article.info { background: #eff6ff; border-color: #93c5fd; }
.post-card header { display: flex; gap: 0.75rem; align-items: baseline; color: var(--muted); font-size: 0.875rem; }
.post-card .post-author { color: var(--text); font-weight: 600; }
.post-card .post-language { font-size: 0.75rem; color: var(--muted); margin-top: 0.5rem; }
.form-group { margin-bottom: 1rem; }
.form-group label { display: block; margin-bottom: 0.25rem; font-weight: 500; }
input[type=text], input[type=password], textarea, select { width: 100%; padding: 0.5rem; border: 1px solid var(--border); border-radius: 0.375rem; font: inherit; }
textarea.code-input { font-family: ui-monospace, monospace; }
.btn { display: inline-block; padding: 0.5rem 1rem; border-radius: 0.375rem; border: 1px solid var(--accent); cursor: pointer; font: inherit; text-decoration: none; }
.btn-primary { background: var(--accent); color: #ffffff; }
.btn.outline { background: transparent; color: var(--accent); }
footer { margin: 2rem auto; color: var(--muted); }
";

/// Base page layout builder.
///
/// # Example
///
/// ```ignore
/// use maud::html;
/// use crate::components::layout::BaseLayout;
///
/// let content = html! { h1 { "Hello World" } };
/// let page = BaseLayout::new("My Page", session.logged_in)
///     .with_stylesheet(highlighter.stylesheet())
///     .render(content);
/// ```
#[derive(Debug, Clone)]
pub struct BaseLayout<'a> {
    title: &'a str,
    logged_in: bool,
    stylesheet: Option<&'a str>,
}

impl<'a> BaseLayout<'a> {
    /// Create a new base layout with the given page title.
    ///
    /// `logged_in` decides whether the navigation offers Login or Logout.
    #[must_use]
    pub fn new(title: &'a str, logged_in: bool) -> Self {
        Self {
            title,
            logged_in,
            stylesheet: None,
        }
    }

    /// Embed an extra stylesheet (the code highlighting styles) in `<head>`.
    #[must_use]
    pub fn with_stylesheet(mut self, css: &'a str) -> Self {
        self.stylesheet = Some(css);
        self
    }

    /// Render the complete HTML page with the given content.
    ///
    /// The content will be placed inside the `<main class="container">` element.
    #[must_use]
    pub fn render(self, content: Markup) -> Markup {
        html! {
            (DOCTYPE)
            html lang="en" {
                head {
                    meta charset="UTF-8";
                    meta name="viewport" content="width=device-width, initial-scale=1.0";
                    title { (self.title) " - " (SITE_NAME) }
                    style { (PreEscaped(BASE_STYLE)) }
                    @if let Some(css) = self.stylesheet {
                        style id="highlight-style" { (PreEscaped(css)) }
                    }
                }
                body {
                    (self.render_header())
                    main class="container" {
                        (content)
                    }
                    (Self::render_footer())
                }
            }
        }
    }

    /// Render the page header with navigation.
    fn render_header(&self) -> Markup {
        html! {
            header class="container" {
                nav {
                    ul {
                        li {
                            a href="/" {
                                strong class="site-logo" { (SITE_NAME) }
                            }
                        }
                    }
                    ul {
                        li { a href="/" { "Board" } }
                        (self.render_auth_nav())
                    }
                }
            }
        }
    }

    /// Render authentication-related navigation items.
    fn render_auth_nav(&self) -> Markup {
        if self.logged_in {
            html! { li { a href="/logout" { "Logout" } } }
        } else {
            html! { li { a href="/login" { "Login" } } }
        }
    }

    /// Render the page footer.
    fn render_footer() -> Markup {
        html! {
            footer class="container" {
                small { (SITE_NAME) " | posts are kept in memory and vanish on restart" }
            }
        }
    }
}
