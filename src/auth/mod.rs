pub mod cleanup;
pub mod middleware;
pub mod password;
pub mod session;
pub mod store;

pub use cleanup::run_cleanup_worker;
pub use middleware::{is_safe_redirect, login_url, CurrentSession, RequireLogin};
pub use password::{hash_password, verify_password, SharedPassword};
pub use session::{generate_session_token, SESSION_COOKIE};
pub use store::{Flash, FlashLevel, SessionStore};
