/// UserProfile model and database operations
///
/// A `UserProfile` is an authenticatable account that logs in by email. New
/// accounts are normally created through
/// [`UserProfileManager`](super::manager::UserProfileManager), which validates,
/// normalizes and hashes before calling [`UserProfile::create`].
///
/// # Schema
///
/// ```sql
/// CREATE TABLE user_profiles (
///     id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
///     email VARCHAR(255) NOT NULL UNIQUE CHECK (email <> ''),
///     name VARCHAR(255) NOT NULL,
///     password VARCHAR(255) NOT NULL,
///     last_login TIMESTAMPTZ,
///     is_active BOOLEAN NOT NULL DEFAULT TRUE,
///     is_staff BOOLEAN NOT NULL DEFAULT FALSE,
///     is_superuser BOOLEAN NOT NULL DEFAULT FALSE
/// );
/// ```
///
/// # Example
///
/// ```no_run
/// use profiles_core::models::user_profile::UserProfile;
/// use sqlx::PgPool;
///
/// # async fn example(pool: PgPool) -> Result<(), sqlx::Error> {
/// if let Some(profile) = UserProfile::find_by_email(&pool, "user@EXAMPLE.com").await? {
///     println!("{} ({})", profile, profile.get_full_name());
/// }
/// # Ok(())
/// # }
/// ```

use crate::auth::{
    capability::{CredentialHolder, PermissionHolder},
    email::normalize_email,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use std::fmt;
use tracing::debug;
use uuid::Uuid;

/// Account entity
///
/// `password` holds an Argon2id PHC string or an unusable-password sentinel,
/// never plaintext. It is skipped when serializing, and a deserialized
/// profile gets a fresh unusable password in its place.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct UserProfile {
    /// Unique profile ID (UUID v4)
    pub id: Uuid,

    /// Login identifier, unique across all profiles
    ///
    /// Stored with its domain normalized to lower case.
    pub email: String,

    /// Display name
    pub name: String,

    /// Stored credential
    #[serde(
        skip_serializing,
        default = "crate::auth::password::make_unusable_password"
    )]
    pub password: String,

    /// When the profile last logged in (None if never)
    pub last_login: Option<DateTime<Utc>>,

    /// Whether the account may log in
    pub is_active: bool,

    /// Whether the account may access the admin console
    pub is_staff: bool,

    /// Whether the account implicitly holds every permission
    pub is_superuser: bool,
}

/// Input for inserting a new profile
///
/// `password` must already be a hash or sentinel. `email` is inserted as given;
/// normalization is the manager's job.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateUserProfile {
    pub email: String,
    pub name: String,
    pub password: String,
    pub is_active: bool,
    pub is_staff: bool,
    pub is_superuser: bool,
}

impl CreateUserProfile {
    /// A regular active account with the given credential
    pub fn new(email: impl Into<String>, name: impl Into<String>, password: String) -> Self {
        Self {
            email: email.into(),
            name: name.into(),
            password,
            is_active: true,
            is_staff: false,
            is_superuser: false,
        }
    }
}

/// Input for updating an existing profile
///
/// All fields are optional. Only non-None fields will be updated. The email
/// is the login identifier and is not updatable here.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateUserProfile {
    /// New display name
    pub name: Option<String>,

    /// New stored credential (hash or sentinel)
    pub password: Option<String>,

    pub is_active: Option<bool>,

    pub is_staff: Option<bool>,

    pub is_superuser: Option<bool>,
}

impl UpdateUserProfile {
    /// Whether no field would change
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.password.is_none()
            && self.is_active.is_none()
            && self.is_staff.is_none()
            && self.is_superuser.is_none()
    }
}

impl UserProfile {
    /// Returns the profile's full name
    pub fn get_full_name(&self) -> &str {
        &self.name
    }

    /// Returns the profile's short name
    pub fn get_short_name(&self) -> &str {
        &self.name
    }

    /// Inserts a new profile
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Email already exists (unique constraint `user_profiles_email_key`)
    /// - Email is empty (check constraint `user_profiles_email_not_empty`)
    /// - Database connection fails
    pub async fn create(pool: &PgPool, data: CreateUserProfile) -> Result<Self, sqlx::Error> {
        let profile = sqlx::query_as::<_, UserProfile>(
            r#"
            INSERT INTO user_profiles (email, name, password, is_active, is_staff, is_superuser)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, email, name, password, last_login, is_active, is_staff, is_superuser
            "#,
        )
        .bind(data.email)
        .bind(data.name)
        .bind(data.password)
        .bind(data.is_active)
        .bind(data.is_staff)
        .bind(data.is_superuser)
        .fetch_one(pool)
        .await?;

        Ok(profile)
    }

    /// Finds a profile by ID
    pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Self>, sqlx::Error> {
        let profile = sqlx::query_as::<_, UserProfile>(
            r#"
            SELECT id, email, name, password, last_login, is_active, is_staff, is_superuser
            FROM user_profiles
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(profile)
    }

    /// Finds a profile by email address
    ///
    /// The query is normalized first, so `user@EXAMPLE.com` finds
    /// `user@example.com`. The local part remains case-sensitive.
    pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<Self>, sqlx::Error> {
        let email = normalize_email(email);
        debug!(email = %email, "Looking up profile by email");

        let profile = sqlx::query_as::<_, UserProfile>(
            r#"
            SELECT id, email, name, password, last_login, is_active, is_staff, is_superuser
            FROM user_profiles
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(pool)
        .await?;

        Ok(profile)
    }

    /// Writes every mutable column of this profile back to the database
    ///
    /// # Errors
    ///
    /// Returns `sqlx::Error::RowNotFound` if the profile no longer exists.
    pub async fn save(&self, pool: &PgPool) -> Result<(), sqlx::Error> {
        let result = sqlx::query(
            r#"
            UPDATE user_profiles
            SET name = $2, password = $3, last_login = $4,
                is_active = $5, is_staff = $6, is_superuser = $7
            WHERE id = $1
            "#,
        )
        .bind(self.id)
        .bind(&self.name)
        .bind(&self.password)
        .bind(self.last_login)
        .bind(self.is_active)
        .bind(self.is_staff)
        .bind(self.is_superuser)
        .execute(pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(sqlx::Error::RowNotFound);
        }

        Ok(())
    }

    /// Updates selected columns of an existing profile
    ///
    /// Returns the updated profile, or None if it doesn't exist. An empty
    /// update behaves like [`UserProfile::find_by_id`].
    pub async fn update(
        pool: &PgPool,
        id: Uuid,
        data: UpdateUserProfile,
    ) -> Result<Option<Self>, sqlx::Error> {
        if data.is_empty() {
            return Self::find_by_id(pool, id).await;
        }

        // Build dynamic update query based on which fields are present
        let mut assignments = Vec::new();
        let mut bind_count = 1;

        if data.name.is_some() {
            bind_count += 1;
            assignments.push(format!("name = ${}", bind_count));
        }
        if data.password.is_some() {
            bind_count += 1;
            assignments.push(format!("password = ${}", bind_count));
        }
        if data.is_active.is_some() {
            bind_count += 1;
            assignments.push(format!("is_active = ${}", bind_count));
        }
        if data.is_staff.is_some() {
            bind_count += 1;
            assignments.push(format!("is_staff = ${}", bind_count));
        }
        if data.is_superuser.is_some() {
            bind_count += 1;
            assignments.push(format!("is_superuser = ${}", bind_count));
        }

        let query = format!(
            "UPDATE user_profiles SET {} WHERE id = $1 \
             RETURNING id, email, name, password, last_login, is_active, is_staff, is_superuser",
            assignments.join(", ")
        );

        let mut q = sqlx::query_as::<_, UserProfile>(&query).bind(id);

        if let Some(name) = data.name {
            q = q.bind(name);
        }
        if let Some(password) = data.password {
            q = q.bind(password);
        }
        if let Some(is_active) = data.is_active {
            q = q.bind(is_active);
        }
        if let Some(is_staff) = data.is_staff {
            q = q.bind(is_staff);
        }
        if let Some(is_superuser) = data.is_superuser {
            q = q.bind(is_superuser);
        }

        let profile = q.fetch_optional(pool).await?;

        Ok(profile)
    }

    /// Deletes a profile by ID
    ///
    /// Feed items owned by the profile are removed by the database
    /// (`ON DELETE CASCADE`).
    ///
    /// Returns true if a profile was deleted.
    pub async fn delete(pool: &PgPool, id: Uuid) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM user_profiles WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Sets `last_login` to the current time
    ///
    /// Returns true if the profile was found and updated.
    pub async fn update_last_login(pool: &PgPool, id: Uuid) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            r#"
            UPDATE user_profiles
            SET last_login = NOW()
            WHERE id = $1
            "#,
        )
        .bind(id)
        .execute(pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Lists profiles ordered by email
    pub async fn list(pool: &PgPool, limit: i64, offset: i64) -> Result<Vec<Self>, sqlx::Error> {
        let profiles = sqlx::query_as::<_, UserProfile>(
            r#"
            SELECT id, email, name, password, last_login, is_active, is_staff, is_superuser
            FROM user_profiles
            ORDER BY email
            LIMIT $1 OFFSET $2
            "#,
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(pool)
        .await?;

        Ok(profiles)
    }

    /// Counts all profiles
    pub async fn count(pool: &PgPool) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM user_profiles")
            .fetch_one(pool)
            .await?;

        Ok(count)
    }
}

impl fmt::Display for UserProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.email)
    }
}

impl CredentialHolder for UserProfile {
    const USERNAME_FIELD: &'static str = "email";
    const REQUIRED_FIELDS: &'static [&'static str] = &["name"];

    fn username(&self) -> &str {
        &self.email
    }

    fn password_hash(&self) -> &str {
        &self.password
    }

    fn set_password_hash(&mut self, hash: String) {
        self.password = hash;
    }
}

impl PermissionHolder for UserProfile {
    fn is_active(&self) -> bool {
        self.is_active
    }

    fn is_staff(&self) -> bool {
        self.is_staff
    }

    fn is_superuser(&self) -> bool {
        self.is_superuser
    }
}
