//! # Dashboard Feature
//!
//! Workflow composition over the store, intake adapter, and sounds.
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.1.0
//! - **Toggleable**: false

pub mod service;

pub use service::Dashboard;
