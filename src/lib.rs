//! Code BBS library.
//!
//! A small bulletin board: anyone can read the posts, and visitors who know
//! the shared password can add posts with an optional syntax-highlighted
//! code snippet. Everything lives in process memory.

// Allow raw string hashes for safety - they're harmless and prevent issues if content changes
#![allow(clippy::needless_raw_string_hashes)]

pub mod auth;
pub mod board;
pub mod components;
pub mod config;
pub mod highlight;
pub mod sanitize;
pub mod web;
