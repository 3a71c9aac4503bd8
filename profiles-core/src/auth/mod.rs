//! Authentication primitives for profiles
//!
//! # Modules
//!
//! - [`password`]: the [`password::PasswordHasher`] capability and Argon2id implementation
//! - [`email`]: login identifier normalization
//! - [`capability`]: credential and permission traits implemented by account entities
//!
//! # Example
//!
//! ```
//! use profiles_core::auth::email::normalize_email;
//! use profiles_core::auth::password::{Argon2Hasher, PasswordHasher};
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let hasher = Argon2Hasher::default();
//! let hash = hasher.hash("user_password")?;
//! assert!(hasher.verify("user_password", &hash)?);
//!
//! assert_eq!(normalize_email("user@EXAMPLE.com"), "user@example.com");
//! # Ok(())
//! # }
//! ```

pub mod capability;
pub mod email;
pub mod password;
