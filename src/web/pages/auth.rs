//! Login page.

use maud::{html, Markup, Render};
use urlencoding::encode;

use crate::auth::Flash;
use crate::components::{BaseLayout, Button, FlashList, Form, FormGroup, Input};

/// Render the login page.
///
/// `next` is carried through the form so a successful login can return the
/// visitor to where they were headed.
#[must_use]
pub fn render_login_page(flashes: &[Flash], next: Option<&str>) -> Markup {
    let action = match next {
        Some(next) => format!("/login?next={}", encode(next)),
        None => "/login".to_string(),
    };

    let fields = html! {
        (FormGroup::new("password", "Password",
            Input::password("password")
                .id("password")
                .autocomplete("current-password")
                .required()
                .render()))
        (Button::primary("Login").r#type("submit"))
    };

    let content = html! {
        div class="auth-container" style="max-width: 420px; margin: 2rem auto;" {
            h1 { "Login" }
            (FlashList::new(flashes))
            p { "Posting requires the board password." }
            (Form::post(&action, fields))
        }
    };

    BaseLayout::new("Login", false).render(content)
}
