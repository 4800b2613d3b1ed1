//! Integration tests for the login gate.

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::response::Response;
use axum::Router;
use code_bbs::config::Config;
use code_bbs::web::{create_app, AppState};
use tower::ServiceExt;

const PASSWORD: &str = "correct horse";

fn setup() -> (Router, AppState) {
    setup_with(Config::for_tests(PASSWORD))
}

fn setup_with(config: Config) -> (Router, AppState) {
    let state = AppState::new(config).expect("Failed to create state");
    (create_app(state.clone()), state)
}

/// `name=value` part of the response's `Set-Cookie` header.
fn session_cookie(response: &Response) -> Option<String> {
    response
        .headers()
        .get(header::SET_COOKIE)
        .and_then(|h| h.to_str().ok())
        .and_then(|c| c.split(';').next())
        .map(String::from)
}

fn location(response: &Response) -> &str {
    response
        .headers()
        .get(header::LOCATION)
        .and_then(|h| h.to_str().ok())
        .unwrap_or("")
}

async fn body_string(response: Response) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

async fn get(app: &Router, uri: &str, cookie: Option<&str>) -> Response {
    let mut builder = Request::builder().method("GET").uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    app.clone()
        .oneshot(builder.body(Body::empty()).unwrap())
        .await
        .unwrap()
}

async fn post_form(app: &Router, uri: &str, body: &str, cookie: Option<&str>) -> Response {
    let mut builder = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    app.clone()
        .oneshot(builder.body(Body::from(body.to_string())).unwrap())
        .await
        .unwrap()
}

#[tokio::test]
async fn test_login_page_renders() {
    let (app, _) = setup();

    let response = get(&app, "/login", None).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_string(response).await;
    assert!(body.contains(r#"name="password""#));
}

#[tokio::test]
async fn test_wrong_password_rerenders_form_with_error() {
    let (app, state) = setup();

    let response = post_form(&app, "/login", "password=nope", None).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(session_cookie(&response).is_none());

    let body = body_string(response).await;
    assert!(body.contains("Incorrect password."));
    assert!(body.contains(r#"name="password""#));
    assert!(state.sessions.is_empty());
}

#[tokio::test]
async fn test_missing_password_field_is_a_failed_login() {
    let (app, _) = setup();

    let response = post_form(&app, "/login", "", None).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_string(response).await.contains("Incorrect password."));
}

#[tokio::test]
async fn test_correct_password_logs_in() {
    let (app, _) = setup();

    let response = post_form(&app, "/login", "password=correct+horse", None).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/");
    let cookie = session_cookie(&response).expect("session cookie");

    // Success flash shows once, and the form is available
    let body = body_string(get(&app, "/", Some(&cookie)).await).await;
    assert!(body.contains("Logged in."));
    assert!(body.contains(r#"action="/post""#));
    assert!(body.contains(r#"href="/logout""#));

    let body = body_string(get(&app, "/", Some(&cookie)).await).await;
    assert!(!body.contains("Logged in."));
    assert!(body.contains(r#"action="/post""#));
}

#[tokio::test]
async fn test_login_while_logged_in_redirects_home() {
    let (app, _) = setup();

    let response = post_form(&app, "/login", "password=correct+horse", None).await;
    let cookie = session_cookie(&response).unwrap();

    let response = get(&app, "/login", Some(&cookie)).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/");

    let response = post_form(&app, "/login?next=%2Fpost", "password=whatever", Some(&cookie)).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/");
}

#[tokio::test]
async fn test_anonymous_post_redirects_to_login_and_appends_nothing() {
    let (app, state) = setup();

    let response = post_form(&app, "/post", "username=a&message=hello", None).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/login?next=%2Fpost");
    assert!(state.posts.is_empty());

    // The advisory message is waiting on the login page
    let cookie = session_cookie(&response).expect("session cookie for flash");
    let body = body_string(get(&app, "/login?next=%2Fpost", Some(&cookie)).await).await;
    assert!(body.contains("You must be logged in to do that."));
    assert!(body.contains(r#"action="/login?next=%2Fpost""#));
}

#[tokio::test]
async fn test_return_target_is_honored_exactly_once() {
    let (app, _) = setup();

    let response = post_form(&app, "/post", "message=hello", None).await;
    let anon_cookie = session_cookie(&response).unwrap();
    let login_url = location(&response).to_string();

    let response = post_form(&app, &login_url, "password=correct+horse", Some(&anon_cookie)).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/post");
    let cookie = session_cookie(&response).unwrap();
    assert_ne!(cookie, anon_cookie);

    // Following the target lands on the board
    let response = get(&app, "/post", Some(&cookie)).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/");

    // After logout, a plain login goes home: the old target is gone
    let response = get(&app, "/logout", Some(&cookie)).await;
    let cookie = session_cookie(&response).unwrap();
    let response = post_form(&app, "/login", "password=correct+horse", Some(&cookie)).await;
    assert_eq!(location(&response), "/");
}

#[tokio::test]
async fn test_external_return_target_is_ignored() {
    let (app, _) = setup();

    let response = post_form(
        &app,
        "/login?next=https%3A%2F%2Fevil.example%2F",
        "password=correct+horse",
        None,
    )
    .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/");

    let response = post_form(&app, "/login?next=%2F%2Fevil.example", "password=correct+horse", None).await;
    assert_eq!(location(&response), "/");
}

#[tokio::test]
async fn test_old_anonymous_cookie_is_not_logged_in() {
    let (app, state) = setup();

    let response = post_form(&app, "/post", "message=hello", None).await;
    let anon_cookie = session_cookie(&response).unwrap();
    post_form(&app, "/login", "password=correct+horse", Some(&anon_cookie)).await;

    // The pre-login token was replaced; reusing it cannot post
    let response = post_form(&app, "/post", "message=hello", Some(&anon_cookie)).await;
    assert_eq!(location(&response), "/login?next=%2Fpost");
    assert!(state.posts.is_empty());
}

#[tokio::test]
async fn test_logout_clears_login() {
    let (app, state) = setup();

    let response = post_form(&app, "/login", "password=correct+horse", None).await;
    let cookie = session_cookie(&response).unwrap();

    let response = get(&app, "/logout", Some(&cookie)).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/login");
    let cookie = session_cookie(&response).unwrap();

    let body = body_string(get(&app, "/login", Some(&cookie)).await).await;
    assert!(body.contains("Logged out."));

    let response = post_form(&app, "/post", "message=after+logout", Some(&cookie)).await;
    assert_eq!(location(&response), "/login?next=%2Fpost");
    assert!(state.posts.is_empty());
}

#[tokio::test]
async fn test_forged_cookie_is_anonymous() {
    let (app, state) = setup();

    let response = post_form(&app, "/login", "password=correct+horse", None).await;
    let cookie = session_cookie(&response).unwrap();
    let (name_and_token, _sig) = cookie.rsplit_once('.').unwrap();
    let forged = format!("{name_and_token}.{}", "0".repeat(64));

    let response = post_form(&app, "/post", "message=forged", Some(&forged)).await;
    assert_eq!(location(&response), "/login?next=%2Fpost");
    assert!(state.posts.is_empty());
}

#[tokio::test]
async fn test_logout_without_session_creates_nothing() {
    let (app, state) = setup();

    for _ in 0..20 {
        let response = get(&app, "/logout", None).await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&response), "/login");
        assert!(session_cookie(&response).is_none());
    }
    assert!(state.sessions.is_empty());
}

#[tokio::test]
async fn test_anonymous_sessions_stay_bounded() {
    let mut config = Config::for_tests(PASSWORD);
    config.max_anon_sessions = 5;
    let (app, state) = setup_with(config);

    for _ in 0..30 {
        let response = post_form(&app, "/post", "message=spam", None).await;
        // The gate still redirects once the session table is full
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&response), "/login?next=%2Fpost");
    }

    assert_eq!(state.sessions.len(), 5);
    assert!(state.posts.is_empty());

    // Logging in still works at the cap
    let response = post_form(&app, "/login", "password=correct+horse", None).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    let cookie = session_cookie(&response).unwrap();
    post_form(&app, "/post", "message=real", Some(&cookie)).await;
    assert_eq!(state.posts.len(), 1);
}

#[tokio::test]
async fn test_anonymous_sessions_expire_quickly() {
    let mut config = Config::for_tests(PASSWORD);
    config.anon_session_ttl = std::time::Duration::ZERO;
    let (app, state) = setup_with(config);

    let response = post_form(&app, "/post", "message=hello", None).await;
    let cookie = session_cookie(&response).unwrap();

    // Already past its lifetime: the flash is gone and the session is dropped
    let body = body_string(get(&app, "/login", Some(&cookie)).await).await;
    assert!(!body.contains("You must be logged in to do that."));
    assert!(state.sessions.is_empty());
}
