//! Server-side session state.
//!
//! Each browser holds a signed random token; everything else (the login
//! flag and pending flash messages) lives here, in process memory.
//!
//! Anonymous sessions only exist to carry a flash message to the next page,
//! so they get a short lifetime and their number is capped.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use chrono::{DateTime, Utc};

use super::session::{
    generate_session_token, session_cookie, session_cookie_value, verify_signed_token,
};

/// Severity of a flash message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlashLevel {
    Success,
    Danger,
    Warning,
    Info,
}

/// A message shown once on the next rendered page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Flash {
    pub level: FlashLevel,
    pub message: String,
}

impl Flash {
    #[must_use]
    pub fn new(level: FlashLevel, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
        }
    }

    #[must_use]
    pub fn success(message: impl Into<String>) -> Self {
        Self::new(FlashLevel::Success, message)
    }

    #[must_use]
    pub fn danger(message: impl Into<String>) -> Self {
        Self::new(FlashLevel::Danger, message)
    }

    #[must_use]
    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(FlashLevel::Warning, message)
    }

    #[must_use]
    pub fn info(message: impl Into<String>) -> Self {
        Self::new(FlashLevel::Info, message)
    }
}

#[derive(Debug, Clone)]
struct SessionData {
    logged_in: bool,
    flashes: Vec<Flash>,
    expires_at: DateTime<Utc>,
}

impl SessionData {
    fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at <= now
    }
}

/// Lifetime of a session that has not logged in.
pub const DEFAULT_ANON_SESSION_TTL: Duration = Duration::from_secs(600);

/// Most anonymous sessions held at once.
pub const DEFAULT_MAX_ANON_SESSIONS: usize = 10_000;

/// In-memory session table keyed by token.
#[derive(Debug, Clone)]
pub struct SessionStore {
    sessions: Arc<Mutex<HashMap<String, SessionData>>>,
    secret: Arc<str>,
    ttl: chrono::Duration,
    anon_ttl: chrono::Duration,
    max_anon: usize,
    cookie_secure: bool,
}

fn to_chrono(d: Duration) -> chrono::Duration {
    chrono::Duration::from_std(d).unwrap_or(chrono::Duration::MAX)
}

impl SessionStore {
    /// `ttl` is the lifetime of a logged-in session.
    #[must_use]
    pub fn new(secret: &str, ttl: Duration, cookie_secure: bool) -> Self {
        Self {
            sessions: Arc::new(Mutex::new(HashMap::new())),
            secret: Arc::from(secret),
            ttl: to_chrono(ttl),
            anon_ttl: to_chrono(DEFAULT_ANON_SESSION_TTL),
            max_anon: DEFAULT_MAX_ANON_SESSIONS,
            cookie_secure,
        }
    }

    /// Set the lifetime and cap for sessions that have not logged in.
    #[must_use]
    pub fn with_anonymous_limits(mut self, ttl: Duration, max_sessions: usize) -> Self {
        self.anon_ttl = to_chrono(ttl);
        self.max_anon = max_sessions;
        self
    }

    // No mutation leaves the map half-updated, so a poisoned lock is still usable.
    fn lock(&self) -> MutexGuard<'_, HashMap<String, SessionData>> {
        self.sessions.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn expiry_from_now(ttl: chrono::Duration) -> DateTime<Utc> {
        Utc::now()
            .checked_add_signed(ttl)
            .unwrap_or(DateTime::<Utc>::MAX_UTC)
    }

    /// Map a `Cookie` header to a live session token.
    ///
    /// Returns `None` for a missing or forged cookie, an unknown token, or an
    /// expired session (which is removed on the spot).
    #[must_use]
    pub fn resolve(&self, cookie_header: Option<&str>) -> Option<String> {
        let value = session_cookie_value(cookie_header?)?;
        let token = verify_signed_token(&self.secret, value)?;

        let mut sessions = self.lock();
        let expired = sessions.get(token)?.is_expired(Utc::now());
        if expired {
            sessions.remove(token);
            return None;
        }
        Some(token.to_string())
    }

    /// Start a new anonymous session and return its token.
    ///
    /// Returns `None` when the anonymous cap is reached even after expired
    /// sessions are dropped.
    #[must_use]
    pub fn create_anonymous(&self) -> Option<String> {
        let mut sessions = self.lock();
        if count_anonymous(&sessions) >= self.max_anon {
            let now = Utc::now();
            sessions.retain(|_, s| !s.is_expired(now));
            if count_anonymous(&sessions) >= self.max_anon {
                tracing::warn!(
                    max_anon_sessions = self.max_anon,
                    "Anonymous session limit reached"
                );
                return None;
            }
        }

        let token = generate_session_token();
        let data = SessionData {
            logged_in: false,
            flashes: Vec::new(),
            expires_at: Self::expiry_from_now(self.anon_ttl),
        };
        sessions.insert(token.clone(), data);
        Some(token)
    }

    /// Return `token` if it is still live, otherwise a fresh anonymous session
    /// (if one can be created).
    #[must_use]
    pub fn ensure(&self, token: Option<&str>) -> Option<String> {
        if let Some(t) = token {
            if self.lock().contains_key(t) {
                return Some(t.to_string());
            }
        }
        self.create_anonymous()
    }

    /// Whether the session has passed the password check.
    #[must_use]
    pub fn is_logged_in(&self, token: &str) -> bool {
        self.lock().get(token).is_some_and(|s| s.logged_in)
    }

    /// Replace `old` with a new authenticated session, carrying over pending
    /// flashes, and return the new token. The old token stops working.
    #[must_use]
    pub fn login(&self, old: Option<&str>) -> String {
        let mut sessions = self.lock();
        let flashes = old
            .and_then(|t| sessions.remove(t))
            .map(|s| s.flashes)
            .unwrap_or_default();

        let token = generate_session_token();
        sessions.insert(
            token.clone(),
            SessionData {
                logged_in: true,
                flashes,
                expires_at: Self::expiry_from_now(self.ttl),
            },
        );
        token
    }

    /// Drop the login flag but keep the session, now short-lived, for flash
    /// messages.
    pub fn logout(&self, token: &str) {
        if let Some(session) = self.lock().get_mut(token) {
            session.logged_in = false;
            session.expires_at = Self::expiry_from_now(self.anon_ttl);
        }
    }

    /// Queue a flash message for the next page render.
    pub fn push_flash(&self, token: &str, flash: Flash) {
        if let Some(session) = self.lock().get_mut(token) {
            session.flashes.push(flash);
        }
    }

    /// Remove and return all pending flash messages.
    #[must_use]
    pub fn take_flashes(&self, token: &str) -> Vec<Flash> {
        self.lock()
            .get_mut(token)
            .map(|s| std::mem::take(&mut s.flashes))
            .unwrap_or_default()
    }

    /// Delete every expired session. Returns how many were removed.
    pub fn purge_expired(&self) -> usize {
        let now = Utc::now();
        let mut sessions = self.lock();
        let before = sessions.len();
        sessions.retain(|_, s| !s.is_expired(now));
        before - sessions.len()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// `Set-Cookie` header value carrying `token`.
    #[must_use]
    pub fn cookie_for(&self, token: &str) -> String {
        session_cookie(&self.secret, token, self.cookie_secure)
    }
}

fn count_anonymous(sessions: &HashMap<String, SessionData>) -> usize {
    sessions.values().filter(|s| !s.logged_in).count()
}
