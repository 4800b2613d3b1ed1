use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::routing::get;
use axum::{Form, Router};

use super::auth;
use super::pages::{self, BoardPageParams};
use super::AppState;
use crate::auth::{CurrentSession, RequireLogin};
use crate::board::{prepare_post, PostForm};

/// Create the router with all routes.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(board))
        .route("/post", get(post_redirect).post(submit_post))
        .route("/login", get(auth::login_page).post(auth::login_post))
        .route("/logout", get(auth::logout))
        .route("/healthz", get(health))
}

async fn board(State(state): State<AppState>, session: CurrentSession) -> Response {
    let flashes = session
        .token
        .as_deref()
        .map(|t| state.sessions.take_flashes(t))
        .unwrap_or_default();
    let posts = state.posts.list_all();

    let html = pages::render_board(&BoardPageParams {
        posts: &posts,
        stylesheet: state.highlighter.stylesheet(),
        flashes: &flashes,
        logged_in: session.logged_in,
    });
    Html(html.into_string()).into_response()
}

/// Handler for new posts (POST /post).
///
/// Blank submissions are dropped; either way the visitor lands back on the board.
async fn submit_post(
    State(state): State<AppState>,
    RequireLogin { .. }: RequireLogin,
    Form(form): Form<PostForm>,
) -> Response {
    let highlighter = state.highlighter;
    let prepared = match tokio::task::spawn_blocking(move || prepare_post(form, highlighter)).await
    {
        Ok(p) => p,
        Err(e) => {
            tracing::error!("Post preparation task failed: {e}");
            return (StatusCode::INTERNAL_SERVER_ERROR, "Failed to create post").into_response();
        }
    };

    match prepared {
        Some(new_post) => {
            let language = new_post.language.clone();
            let post_id = state.posts.append(new_post);
            tracing::info!(post_id, language = ?language, "Post created");
        }
        None => {
            tracing::debug!("Dropped empty submission");
        }
    }

    Redirect::to("/").into_response()
}

/// GET /post has nothing to show; it is where a login started from the post
/// form returns to.
async fn post_redirect() -> Redirect {
    Redirect::to("/")
}

async fn health() -> &'static str {
    "OK"
}
