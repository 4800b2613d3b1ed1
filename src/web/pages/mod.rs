//! Maud-based page templates for the web UI.
//!
//! Each page module exports a render function that produces the complete HTML.

pub mod auth;
pub mod home;

pub use auth::render_login_page;
pub use home::{render_board, BoardPageParams};
