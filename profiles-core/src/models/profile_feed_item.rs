/// ProfileFeedItem model and database operations
///
/// A feed item is a status update owned by exactly one [`UserProfile`]. Items
/// are immutable once written: there is no update operation, and `created_on`
/// is assigned by the database. Deleting the owning profile deletes its items.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE profile_feed_items (
///     id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
///     user_profile_id UUID NOT NULL REFERENCES user_profiles(id) ON DELETE CASCADE,
///     status_text VARCHAR(255) NOT NULL,
///     created_on TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
/// ```
///
/// # Example
///
/// ```no_run
/// use profiles_core::models::profile_feed_item::{CreateProfileFeedItem, ProfileFeedItem};
/// use sqlx::PgPool;
/// use uuid::Uuid;
///
/// # async fn example(pool: PgPool, profile_id: Uuid) -> Result<(), sqlx::Error> {
/// let item = ProfileFeedItem::create(
///     &pool,
///     CreateProfileFeedItem {
///         user_profile_id: profile_id,
///         status_text: "Hello, world".to_string(),
///     },
/// )
/// .await?;
///
/// println!("{} at {}", item, item.created_on);
/// # Ok(())
/// # }
/// ```
///
/// [`UserProfile`]: super::user_profile::UserProfile

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use std::fmt;
use uuid::Uuid;

/// Maximum length of `status_text`, enforced by the column type
pub const STATUS_TEXT_MAX_LENGTH: usize = 255;

/// Status update entity
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct ProfileFeedItem {
    pub id: Uuid,

    /// Owning profile
    pub user_profile_id: Uuid,

    /// Status text (at most 255 characters)
    pub status_text: String,

    /// Set once at creation
    pub created_on: DateTime<Utc>,
}

/// Input for creating a feed item
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateProfileFeedItem {
    pub user_profile_id: Uuid,
    pub status_text: String,
}

impl ProfileFeedItem {
    /// Creates a feed item for an existing profile
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The profile doesn't exist (foreign key violation)
    /// - `status_text` exceeds 255 characters
    /// - Database connection fails
    pub async fn create(pool: &PgPool, data: CreateProfileFeedItem) -> Result<Self, sqlx::Error> {
        let item = sqlx::query_as::<_, ProfileFeedItem>(
            r#"
            INSERT INTO profile_feed_items (user_profile_id, status_text)
            VALUES ($1, $2)
            RETURNING id, user_profile_id, status_text, created_on
            "#,
        )
        .bind(data.user_profile_id)
        .bind(data.status_text)
        .fetch_one(pool)
        .await?;

        Ok(item)
    }

    pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Self>, sqlx::Error> {
        let item = sqlx::query_as::<_, ProfileFeedItem>(
            r#"
            SELECT id, user_profile_id, status_text, created_on
            FROM profile_feed_items
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(item)
    }

    /// Lists a profile's feed items, newest first
    pub async fn list_by_user(
        pool: &PgPool,
        user_profile_id: Uuid,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Self>, sqlx::Error> {
        let items = sqlx::query_as::<_, ProfileFeedItem>(
            r#"
            SELECT id, user_profile_id, status_text, created_on
            FROM profile_feed_items
            WHERE user_profile_id = $1
            ORDER BY created_on DESC, id
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(user_profile_id)
        .bind(limit)
        .bind(offset)
        .fetch_all(pool)
        .await?;

        Ok(items)
    }

    pub async fn count_by_user(pool: &PgPool, user_profile_id: Uuid) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM profile_feed_items WHERE user_profile_id = $1")
                .bind(user_profile_id)
                .fetch_one(pool)
                .await?;

        Ok(count)
    }

    /// Deletes a feed item by ID
    ///
    /// Returns true if an item was deleted.
    pub async fn delete(pool: &PgPool, id: Uuid) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM profile_feed_items WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

impl fmt::Display for ProfileFeedItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.status_text)
    }
}
