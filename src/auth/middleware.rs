use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::{header, request::Parts},
    response::{IntoResponse, Redirect, Response},
};

use super::store::{Flash, SessionStore};

/// Shown when an anonymous visitor tries to write.
pub const LOGIN_REQUIRED_MESSAGE: &str = "You must be logged in to do that.";

/// The visitor's session, if any.
/// Use this extractor when authentication is optional.
#[derive(Debug, Clone)]
pub struct CurrentSession {
    pub token: Option<String>,
    pub logged_in: bool,
}

#[async_trait]
impl<S> FromRequestParts<S> for CurrentSession
where
    S: Send + Sync,
    SessionStore: FromRef<S>,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let sessions = SessionStore::from_ref(state);

        let cookie_header = parts
            .headers
            .get(header::COOKIE)
            .and_then(|h| h.to_str().ok());

        let token = sessions.resolve(cookie_header);
        let logged_in = token.as_deref().is_some_and(|t| sessions.is_logged_in(t));

        Ok(CurrentSession { token, logged_in })
    }
}

/// An authenticated session (required).
/// Anonymous visitors are redirected to `/login?next=<requested path>` with a
/// warning flash queued.
#[derive(Debug, Clone)]
pub struct RequireLogin {
    pub token: String,
}

#[async_trait]
impl<S> FromRequestParts<S> for RequireLogin
where
    S: Send + Sync,
    SessionStore: FromRef<S>,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let CurrentSession { token, logged_in } =
            CurrentSession::from_request_parts(parts, state).await?;

        if let (Some(token), true) = (&token, logged_in) {
            return Ok(RequireLogin {
                token: token.clone(),
            });
        }

        let next = parts
            .uri
            .path_and_query()
            .map_or("/", |pq| pq.as_str());
        let redirect = Redirect::to(&login_url(Some(next)));

        tracing::debug!(next = %next, "Anonymous write attempt, redirecting to login");

        // Without a session slot the redirect goes out with no flash
        let sessions = SessionStore::from_ref(state);
        let Some(token) = sessions.ensure(token.as_deref()) else {
            return Err(redirect.into_response());
        };
        sessions.push_flash(&token, Flash::warning(LOGIN_REQUIRED_MESSAGE));

        Err((
            [(header::SET_COOKIE, sessions.cookie_for(&token))],
            redirect,
        )
            .into_response())
    }
}

/// `/login`, with a `next` parameter when there is somewhere to return to.
#[must_use]
pub fn login_url(next: Option<&str>) -> String {
    match next.filter(|n| is_safe_redirect(n)) {
        Some(next) if next != "/" => format!("/login?next={}", urlencoding::encode(next)),
        _ => "/login".to_string(),
    }
}

/// Only same-site absolute paths are followed after login.
#[must_use]
pub fn is_safe_redirect(target: &str) -> bool {
    target.starts_with('/')
        && !target.starts_with("//")
        && !target.starts_with("/\\")
        && !target.chars().any(char::is_control)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_safe_redirects() {
        assert!(is_safe_redirect("/"));
        assert!(is_safe_redirect("/post"));
        assert!(is_safe_redirect("/?page=2"));

        assert!(!is_safe_redirect("https://evil.example"));
        assert!(!is_safe_redirect("//evil.example"));
        assert!(!is_safe_redirect("/\\evil.example"));
        assert!(!is_safe_redirect("post"));
        assert!(!is_safe_redirect("/a\r\nSet-Cookie: x"));
        assert!(!is_safe_redirect(""));
    }

    #[test]
    fn test_login_url() {
        assert_eq!(login_url(None), "/login");
        assert_eq!(login_url(Some("/")), "/login");
        assert_eq!(login_url(Some("/post")), "/login?next=%2Fpost");
        assert_eq!(login_url(Some("//evil")), "/login");
    }
}
