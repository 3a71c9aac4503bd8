//! Database models for profiles
//!
//! - `user_profile`: authenticatable accounts (email login, status flags)
//! - `profile_feed_item`: status updates owned by a profile
//! - `manager`: the account factory that validates, normalizes and hashes
//!
//! # Example
//!
//! ```no_run
//! use profiles_core::auth::password::Argon2Hasher;
//! use profiles_core::models::manager::UserProfileManager;
//! use profiles_core::models::profile_feed_item::{CreateProfileFeedItem, ProfileFeedItem};
//! use sqlx::PgPool;
//! use std::sync::Arc;
//!
//! # async fn example(pool: PgPool) -> Result<(), Box<dyn std::error::Error>> {
//! let manager = UserProfileManager::new(pool.clone(), Arc::new(Argon2Hasher::default()));
//! let profile = manager.create_user(Some("user@example.com"), "User", Some("pw")).await?;
//!
//! ProfileFeedItem::create(
//!     &pool,
//!     CreateProfileFeedItem {
//!         user_profile_id: profile.id,
//!         status_text: "First post".to_string(),
//!     },
//! )
//! .await?;
//! # Ok(())
//! # }
//! ```

pub mod manager;
pub mod profile_feed_item;
pub mod user_profile;
