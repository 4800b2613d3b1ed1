use std::time::Duration;

use thiserror::Error;

/// Signing key used when `SECRET_KEY` is unset. Fine for local runs only.
pub const DEFAULT_SECRET_KEY: &str = "change-me-session-signing-key";

/// Write password used when `BBS_PASSWORD` is unset.
pub const DEFAULT_BBS_PASSWORD: &str = "password";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {name}: {message}")]
    InvalidValue { name: String, message: String },
    #[error("failed to parse {name} as integer: {source}")]
    ParseInt {
        name: String,
        #[source]
        source: std::num::ParseIntError,
    },
    #[error("failed to parse {name} as boolean: {value}")]
    ParseBool { name: String, value: String },
}

/// Application configuration loaded from environment variables.
#[derive(Clone)]
pub struct Config {
    // Web Server
    pub web_host: String,
    pub web_port: u16,

    // Sessions
    pub secret_key: String,
    pub session_ttl: Duration,
    pub session_cleanup_interval: Duration,
    pub anon_session_ttl: Duration,
    pub max_anon_sessions: usize,
    pub cookie_secure: bool,

    // Board
    pub bbs_password: String,
}

// Secrets are redacted.
impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("web_host", &self.web_host)
            .field("web_port", &self.web_port)
            .field("secret_key", &"<redacted>")
            .field("session_ttl", &self.session_ttl)
            .field("session_cleanup_interval", &self.session_cleanup_interval)
            .field("anon_session_ttl", &self.anon_session_ttl)
            .field("max_anon_sessions", &self.max_anon_sessions)
            .field("cookie_secure", &self.cookie_secure)
            .field("bbs_password", &"<redacted>")
            .finish()
    }
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Every variable has a default, so an empty environment yields a usable
    /// (if insecure) development configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if a variable is set but cannot be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            // Web Server
            web_host: env_or_default("WEB_HOST", "0.0.0.0"),
            web_port: parse_env_u16("WEB_PORT", 5000)?,

            // Sessions
            secret_key: env_or_default("SECRET_KEY", DEFAULT_SECRET_KEY),
            session_ttl: Duration::from_secs(parse_env_u64("SESSION_TTL_SECS", 2_678_400)?),
            session_cleanup_interval: Duration::from_secs(parse_env_u64(
                "SESSION_CLEANUP_INTERVAL_SECS",
                3600,
            )?),
            anon_session_ttl: Duration::from_secs(parse_env_u64("ANON_SESSION_TTL_SECS", 600)?),
            max_anon_sessions: parse_env_usize("MAX_ANON_SESSIONS", 10_000)?,
            cookie_secure: parse_env_bool("COOKIE_SECURE", false)?,

            // Board
            bbs_password: env_or_default("BBS_PASSWORD", DEFAULT_BBS_PASSWORD),
        })
    }

    /// Validate that the configuration is usable.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.secret_key.is_empty() {
            return Err(ConfigError::InvalidValue {
                name: "SECRET_KEY".to_string(),
                message: "cannot be empty".to_string(),
            });
        }
        if self.bbs_password.is_empty() {
            return Err(ConfigError::InvalidValue {
                name: "BBS_PASSWORD".to_string(),
                message: "cannot be empty".to_string(),
            });
        }
        if self.session_ttl.is_zero() {
            return Err(ConfigError::InvalidValue {
                name: "SESSION_TTL_SECS".to_string(),
                message: "must be at least 1".to_string(),
            });
        }
        if self.anon_session_ttl.is_zero() {
            return Err(ConfigError::InvalidValue {
                name: "ANON_SESSION_TTL_SECS".to_string(),
                message: "must be at least 1".to_string(),
            });
        }
        if self.session_cleanup_interval.is_zero() {
            return Err(ConfigError::InvalidValue {
                name: "SESSION_CLEANUP_INTERVAL_SECS".to_string(),
                message: "must be at least 1".to_string(),
            });
        }
        Ok(())
    }

    /// Whether the built-in development secret is still in use.
    #[must_use]
    pub fn uses_default_secret(&self) -> bool {
        self.secret_key == DEFAULT_SECRET_KEY
    }

    /// Whether the built-in development password is still in use.
    #[must_use]
    pub fn uses_default_password(&self) -> bool {
        self.bbs_password == DEFAULT_BBS_PASSWORD
    }

    /// Configuration for tests: loopback address, fixed secrets.
    #[must_use]
    pub fn for_tests(bbs_password: &str) -> Self {
        Self {
            web_host: "127.0.0.1".to_string(),
            web_port: 0,
            secret_key: "test-secret-key".to_string(),
            session_ttl: Duration::from_secs(3600),
            session_cleanup_interval: Duration::from_secs(3600),
            anon_session_ttl: Duration::from_secs(600),
            max_anon_sessions: 10_000,
            cookie_secure: false,
            bbs_password: bbs_password.to_string(),
        }
    }
}

fn env_or_default(name: &str, default: &str) -> String {
    std::env::var(name)
        .ok()
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| default.to_string())
}

fn parse_env_u64(name: &str, default: u64) -> Result<u64, ConfigError> {
    match std::env::var(name) {
        Ok(val) if !val.is_empty() => val.parse().map_err(|e| ConfigError::ParseInt {
            name: name.to_string(),
            source: e,
        }),
        _ => Ok(default),
    }
}

fn parse_env_usize(name: &str, default: usize) -> Result<usize, ConfigError> {
    match std::env::var(name) {
        Ok(val) if !val.is_empty() => val.parse().map_err(|e| ConfigError::ParseInt {
            name: name.to_string(),
            source: e,
        }),
        _ => Ok(default),
    }
}

fn parse_env_u16(name: &str, default: u16) -> Result<u16, ConfigError> {
    match std::env::var(name) {
        Ok(val) if !val.is_empty() => val.parse().map_err(|e| ConfigError::ParseInt {
            name: name.to_string(),
            source: e,
        }),
        _ => Ok(default),
    }
}

fn parse_env_bool(name: &str, default: bool) -> Result<bool, ConfigError> {
    match std::env::var(name) {
        Ok(val) if !val.is_empty() => match val.to_lowercase().as_str() {
            "true" | "1" | "yes" | "on" => Ok(true),
            "false" | "0" | "no" | "off" => Ok(false),
            _ => Err(ConfigError::ParseBool {
                name: name.to_string(),
                value: val,
            }),
        },
        _ => Ok(default),
    }
}
