/// Integration tests for ProfileFeedItem
///
/// Run with: cargo test -p profiles-core --test profile_feed_item_tests

mod common;

use common::{test_manager, unique_email};
use profiles_core::models::manager::UserProfileManager;
use profiles_core::models::profile_feed_item::{
    CreateProfileFeedItem, ProfileFeedItem, STATUS_TEXT_MAX_LENGTH,
};
use profiles_core::models::user_profile::UserProfile;
use uuid::Uuid;

async fn create_owner(manager: &UserProfileManager) -> UserProfile {
    manager
        .create_user(Some(&unique_email()), "Feed Owner", None)
        .await
        .expect("Failed to create owner")
}

fn status(owner: &UserProfile, text: &str) -> CreateProfileFeedItem {
    CreateProfileFeedItem {
        user_profile_id: owner.id,
        status_text: text.to_string(),
    }
}

#[tokio::test]
async fn test_create_and_find_feed_item() {
    let manager = test_manager().await;
    let pool = manager.pool();
    let owner = create_owner(&manager).await;

    let item = ProfileFeedItem::create(pool, status(&owner, "Hello feed"))
        .await
        .expect("create should succeed");

    assert_eq!(item.user_profile_id, owner.id);
    assert_eq!(item.to_string(), "Hello feed");

    let found = ProfileFeedItem::find_by_id(pool, item.id)
        .await
        .unwrap()
        .expect("Item should exist");
    assert_eq!(found.status_text, "Hello feed");
    assert_eq!(found.created_on, item.created_on);

    UserProfile::delete(pool, owner.id).await.unwrap();
}

#[tokio::test]
async fn test_feed_item_requires_existing_profile() {
    let manager = test_manager().await;

    let orphan = CreateProfileFeedItem {
        user_profile_id: Uuid::new_v4(),
        status_text: "No owner".to_string(),
    };

    let result = ProfileFeedItem::create(manager.pool(), orphan).await;
    match result {
        Err(sqlx::Error::Database(db_err)) => assert!(db_err.is_foreign_key_violation()),
        other => panic!("Expected foreign key violation, got {:?}", other),
    }
}

#[tokio::test]
async fn test_status_text_length_limit() {
    let manager = test_manager().await;
    let pool = manager.pool();
    let owner = create_owner(&manager).await;

    let at_limit = "x".repeat(STATUS_TEXT_MAX_LENGTH);
    let item = ProfileFeedItem::create(pool, status(&owner, &at_limit))
        .await
        .expect("255 characters should fit");
    assert_eq!(item.status_text.chars().count(), STATUS_TEXT_MAX_LENGTH);

    let too_long = "x".repeat(STATUS_TEXT_MAX_LENGTH + 1);
    let result = ProfileFeedItem::create(pool, status(&owner, &too_long)).await;
    assert!(result.is_err(), "256 characters must be rejected");

    UserProfile::delete(pool, owner.id).await.unwrap();
}

#[tokio::test]
async fn test_list_by_user_newest_first() {
    let manager = test_manager().await;
    let pool = manager.pool();
    let owner = create_owner(&manager).await;
    let other = create_owner(&manager).await;

    for text in ["first", "second", "third"] {
        ProfileFeedItem::create(pool, status(&owner, text)).await.unwrap();
        // Distinct timestamps for a stable order
        tokio::time::sleep(std::time::Duration::from_millis(5)).await;
    }
    ProfileFeedItem::create(pool, status(&other, "not mine")).await.unwrap();

    let items = ProfileFeedItem::list_by_user(pool, owner.id, 10, 0).await.unwrap();
    let texts: Vec<&str> = items.iter().map(|i| i.status_text.as_str()).collect();
    assert_eq!(texts, vec!["third", "second", "first"]);

    let page = ProfileFeedItem::list_by_user(pool, owner.id, 1, 1).await.unwrap();
    assert_eq!(page.len(), 1);
    assert_eq!(page[0].status_text, "second");

    assert_eq!(ProfileFeedItem::count_by_user(pool, owner.id).await.unwrap(), 3);
    assert_eq!(ProfileFeedItem::count_by_user(pool, other.id).await.unwrap(), 1);

    UserProfile::delete(pool, owner.id).await.unwrap();
    UserProfile::delete(pool, other.id).await.unwrap();
}

#[tokio::test]
async fn test_deleting_profile_cascades_to_feed_items() {
    let manager = test_manager().await;
    let pool = manager.pool();
    let owner = create_owner(&manager).await;
    let bystander = create_owner(&manager).await;

    let first = ProfileFeedItem::create(pool, status(&owner, "one")).await.unwrap();
    let second = ProfileFeedItem::create(pool, status(&owner, "two")).await.unwrap();
    let kept = ProfileFeedItem::create(pool, status(&bystander, "stays")).await.unwrap();

    assert!(UserProfile::delete(pool, owner.id).await.unwrap());

    assert!(ProfileFeedItem::find_by_id(pool, first.id).await.unwrap().is_none());
    assert!(ProfileFeedItem::find_by_id(pool, second.id).await.unwrap().is_none());
    assert_eq!(ProfileFeedItem::count_by_user(pool, owner.id).await.unwrap(), 0);
    assert!(ProfileFeedItem::find_by_id(pool, kept.id).await.unwrap().is_some());

    UserProfile::delete(pool, bystander.id).await.unwrap();
}

#[tokio::test]
async fn test_delete_feed_item_directly() {
    let manager = test_manager().await;
    let pool = manager.pool();
    let owner = create_owner(&manager).await;

    let item = ProfileFeedItem::create(pool, status(&owner, "short-lived")).await.unwrap();

    assert!(ProfileFeedItem::delete(pool, item.id).await.unwrap());
    assert!(!ProfileFeedItem::delete(pool, item.id).await.unwrap());
    assert!(UserProfile::find_by_id(pool, owner.id).await.unwrap().is_some());

    UserProfile::delete(pool, owner.id).await.unwrap();
}
