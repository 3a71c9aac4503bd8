//! # Profiles Core Library
//!
//! Account and profile-feed data model shared by every profiles entry point.
//!
//! ## Module Organization
//!
//! - `models`: `UserProfile`, `ProfileFeedItem` and the `UserProfileManager` factory
//! - `auth`: password hashing, email normalization, capability traits
//! - `db`: connection pool and embedded migrations
//! - `config`: layered settings (file, environment)

pub mod auth;
pub mod config;
pub mod db;
pub mod models;

/// Current version of the profiles core library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
