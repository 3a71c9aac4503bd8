/// Account factory for [`UserProfile`]
///
/// `UserProfileManager` is the supported way to create accounts. It owns the
/// two collaborators account creation needs: the connection pool and the
/// password hasher. Both are passed in, so tests and deployments choose
/// their own hashing cost without global state.
///
/// # Example
///
/// ```no_run
/// use profiles_core::auth::password::Argon2Hasher;
/// use profiles_core::models::manager::UserProfileManager;
/// use sqlx::PgPool;
/// use std::sync::Arc;
///
/// # async fn example(pool: PgPool) -> Result<(), Box<dyn std::error::Error>> {
/// let manager = UserProfileManager::new(pool, Arc::new(Argon2Hasher::default()));
///
/// let user = manager
///     .create_user(Some("jane@EXAMPLE.com"), "Jane", Some("s3cret"))
///     .await?;
/// assert_eq!(user.email, "jane@example.com");
///
/// let admin = manager
///     .create_superuser(Some("root@example.com"), "Root", Some("t0psecret"))
///     .await?;
/// assert!(admin.is_superuser && admin.is_staff);
/// # Ok(())
/// # }
/// ```
///
/// [`UserProfile`]: super::user_profile::UserProfile

use super::user_profile::{CreateUserProfile, UserProfile};
use crate::auth::{
    email::normalize_email,
    password::{make_password, PasswordError, PasswordHasher},
};
use sqlx::PgPool;
use std::sync::Arc;
use tracing::info;

/// Error type for account creation
///
/// Only [`ManagerError::InvalidArgument`] originates here. Store and hasher
/// failures pass through untouched.
#[derive(Debug, thiserror::Error)]
pub enum ManagerError {
    /// A required argument was missing or empty
    #[error("{0}")]
    InvalidArgument(String),

    #[error(transparent)]
    Database(#[from] sqlx::Error),

    #[error(transparent)]
    Password(#[from] PasswordError),
}

impl ManagerError {
    /// Whether the store rejected the email as already taken
    pub fn is_duplicate_email(&self) -> bool {
        match self {
            ManagerError::Database(sqlx::Error::Database(db_err)) => {
                db_err.constraint() == Some("user_profiles_email_key")
            }
            _ => false,
        }
    }
}

/// Creates and persists [`UserProfile`] rows
#[derive(Clone)]
pub struct UserProfileManager {
    pool: PgPool,
    hasher: Arc<dyn PasswordHasher>,
}

impl UserProfileManager {
    pub fn new(pool: PgPool, hasher: Arc<dyn PasswordHasher>) -> Self {
        Self { pool, hasher }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    pub fn hasher(&self) -> &dyn PasswordHasher {
        self.hasher.as_ref()
    }

    /// Creates a regular account
    ///
    /// The email's domain is normalized before insert. A `None` password
    /// stores an unusable-password sentinel, so the account exists but
    /// cannot log in with a password.
    ///
    /// # Errors
    ///
    /// - [`ManagerError::InvalidArgument`] if `email` is `None` or empty
    /// - [`ManagerError::Password`] if hashing fails
    /// - [`ManagerError::Database`] if the insert fails, including a
    ///   duplicate email (see [`ManagerError::is_duplicate_email`])
    pub async fn create_user(
        &self,
        email: Option<&str>,
        name: &str,
        password: Option<&str>,
    ) -> Result<UserProfile, ManagerError> {
        let email = validate_email_present(email)?;
        let email = normalize_email(email);

        let password = make_password(self.hasher.as_ref(), password)?;

        let profile =
            UserProfile::create(&self.pool, CreateUserProfile::new(email, name, password)).await?;

        info!(user_profile_id = %profile.id, email = %profile.email, "Created user profile");
        Ok(profile)
    }

    /// Creates an account with `is_superuser` and `is_staff` set
    ///
    /// The account is created exactly as [`create_user`](Self::create_user)
    /// would, then the flags are set and the row saved again. Fails under the
    /// same conditions.
    pub async fn create_superuser(
        &self,
        email: Option<&str>,
        name: &str,
        password: Option<&str>,
    ) -> Result<UserProfile, ManagerError> {
        let mut profile = self.create_user(email, name, password).await?;

        profile.is_superuser = true;
        profile.is_staff = true;
        profile.save(&self.pool).await?;

        info!(user_profile_id = %profile.id, email = %profile.email, "Granted superuser");
        Ok(profile)
    }
}

fn validate_email_present(email: Option<&str>) -> Result<&str, ManagerError> {
    match email {
        Some(email) if !email.is_empty() => Ok(email),
        _ => Err(ManagerError::InvalidArgument(
            "User must have an email address".to_string(),
        )),
    }
}
