//! # Session Feature
//!
//! Mocked login/logout with persisted identity.
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.1.0
//! - **Toggleable**: false

pub mod auth;

pub use auth::{SessionManager, User};
