use rand::{distributions::Alphanumeric, thread_rng, Rng};
use sha2::{Digest, Sha256};

/// Name of the session cookie.
pub const SESSION_COOKIE: &str = "bbs_session";

/// Generate a cryptographically secure random session token.
pub fn generate_session_token() -> String {
    thread_rng()
        .sample_iter(&Alphanumeric)
        .take(64)
        .map(char::from)
        .collect()
}

/// Signature binding a token to the server's secret key.
fn signature(secret: &str, token: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(secret.as_bytes());
    hasher.update(b":");
    hasher.update(token.as_bytes());
    hex::encode(hasher.finalize())
}

/// Cookie value for a token: `<token>.<signature>`.
#[must_use]
pub fn sign_token(secret: &str, token: &str) -> String {
    format!("{token}.{}", signature(secret, token))
}

/// Recover the token from a cookie value, or `None` if the signature is wrong.
#[must_use]
pub fn verify_signed_token<'a>(secret: &str, value: &'a str) -> Option<&'a str> {
    let (token, sig) = value.rsplit_once('.')?;
    if token.is_empty() {
        return None;
    }
    let expected = signature(secret, token);
    constant_time_eq(expected.as_bytes(), sig.as_bytes()).then_some(token)
}

fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    a.len() == b.len() && a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}

/// Find the raw session cookie value in a `Cookie` header.
#[must_use]
pub fn session_cookie_value(cookie_header: &str) -> Option<&str> {
    cookie_header.split(';').find_map(|cookie| {
        cookie
            .trim()
            .strip_prefix(SESSION_COOKIE)
            .and_then(|rest| rest.strip_prefix('='))
    })
}

/// `Set-Cookie` value that stores a signed token in the browser.
#[must_use]
pub fn session_cookie(secret: &str, token: &str, secure: bool) -> String {
    let value = sign_token(secret, token);
    let secure = if secure { "; Secure" } else { "" };
    format!("{SESSION_COOKIE}={value}; HttpOnly; SameSite=Lax; Path=/{secure}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_session_token() {
        let token1 = generate_session_token();
        let token2 = generate_session_token();

        assert_eq!(token1.len(), 64);
        assert_eq!(token2.len(), 64);
        assert_ne!(token1, token2); // Should be unique
        assert!(token1.chars().all(|c| c.is_alphanumeric()));
    }

    #[test]
    fn test_sign_and_verify() {
        let signed = sign_token("secret", "abc123");
        assert_eq!(verify_signed_token("secret", &signed), Some("abc123"));
    }

    #[test]
    fn test_wrong_secret_or_tampered_value_is_rejected() {
        let signed = sign_token("secret", "abc123");
        assert_eq!(verify_signed_token("other", &signed), None);

        let tampered = signed.replacen("abc123", "abc124", 1);
        assert_eq!(verify_signed_token("secret", &tampered), None);

        assert_eq!(verify_signed_token("secret", "abc123"), None);
        assert_eq!(verify_signed_token("secret", ""), None);
        assert_eq!(verify_signed_token("secret", ".deadbeef"), None);
    }

    #[test]
    fn test_session_cookie_value() {
        let header = "theme=dark; bbs_session=tok.sig; other=1";
        assert_eq!(session_cookie_value(header), Some("tok.sig"));
        assert_eq!(session_cookie_value("bbs_session_old=x"), None);
        assert_eq!(session_cookie_value("theme=dark"), None);
    }

    #[test]
    fn test_cookie_attributes() {
        let cookie = session_cookie("s", "t", false);
        assert!(cookie.starts_with("bbs_session=t."));
        assert!(cookie.contains("HttpOnly"));
        assert!(!cookie.contains("Secure"));

        assert!(session_cookie("s", "t", true).ends_with("; Secure"));
    }
}
