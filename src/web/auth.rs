use axum::{
    extract::{Query, State},
    http::header,
    response::{Html, IntoResponse, Redirect, Response},
    Form,
};
use serde::Deserialize;

use crate::auth::{is_safe_redirect, CurrentSession, Flash};
use crate::web::{pages, AppState};

pub const LOGIN_SUCCESS_MESSAGE: &str = "Logged in.";
pub const LOGIN_FAILURE_MESSAGE: &str = "Incorrect password.";
pub const LOGOUT_MESSAGE: &str = "Logged out.";

/// Query string of the login page.
#[derive(Debug, Deserialize)]
pub struct LoginQuery {
    next: Option<String>,
}

impl LoginQuery {
    /// The return target, if it is a local path.
    fn next(&self) -> Option<&str> {
        self.next.as_deref().filter(|n| is_safe_redirect(n))
    }
}

/// Login form data.
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    password: Option<String>,
}

/// GET /login - Show login form.
pub async fn login_page(
    State(state): State<AppState>,
    session: CurrentSession,
    Query(query): Query<LoginQuery>,
) -> Response {
    // If already logged in, redirect to home
    if session.logged_in {
        return Redirect::to("/").into_response();
    }

    let flashes = session
        .token
        .as_deref()
        .map(|t| state.sessions.take_flashes(t))
        .unwrap_or_default();

    Html(pages::render_login_page(&flashes, query.next()).into_string()).into_response()
}

/// POST /login - Check the board password.
pub async fn login_post(
    State(state): State<AppState>,
    session: CurrentSession,
    Query(query): Query<LoginQuery>,
    Form(form): Form<LoginForm>,
) -> Response {
    if session.logged_in {
        return Redirect::to("/").into_response();
    }

    let attempt = form.password.unwrap_or_default();
    let password = state.password.clone();
    // Argon2 verification is CPU-bound
    let valid = match tokio::task::spawn_blocking(move || password.matches(&attempt)).await {
        Ok(valid) => valid,
        Err(e) => {
            tracing::error!("Password check task failed: {e}");
            false
        }
    };

    if !valid {
        tracing::info!("Login failed");
        let mut flashes = session
            .token
            .as_deref()
            .map(|t| state.sessions.take_flashes(t))
            .unwrap_or_default();
        flashes.push(Flash::danger(LOGIN_FAILURE_MESSAGE));

        return Html(pages::render_login_page(&flashes, query.next()).into_string())
            .into_response();
    }

    let token = state.sessions.login(session.token.as_deref());
    state
        .sessions
        .push_flash(&token, Flash::success(LOGIN_SUCCESS_MESSAGE));

    let target = query.next().unwrap_or("/");
    tracing::info!(next = %target, "Login succeeded");

    (
        [(header::SET_COOKIE, state.sessions.cookie_for(&token))],
        Redirect::to(target),
    )
        .into_response()
}

/// GET /logout - Log out and return to the login page.
///
/// A visitor with no session has nothing to log out of and is just
/// redirected.
pub async fn logout(State(state): State<AppState>, session: CurrentSession) -> Response {
    let Some(token) = session.token else {
        return Redirect::to("/login").into_response();
    };

    state.sessions.logout(&token);
    state.sessions.push_flash(&token, Flash::info(LOGOUT_MESSAGE));

    if session.logged_in {
        tracing::info!("Logged out");
    }

    (
        [(header::SET_COOKIE, state.sessions.cookie_for(&token))],
        Redirect::to("/login"),
    )
        .into_response()
}
