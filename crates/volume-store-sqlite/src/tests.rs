//! Integration tests for `SqliteStore` against an in-memory database.

use uuid::Uuid;
use volume_core::{
  identity::DeviceIdentity,
  prefs::{BookmarkKind, PreferencesStore},
};

use crate::SqliteStore;

async fn store() -> SqliteStore {
  SqliteStore::open_in_memory()
    .await
    .expect("in-memory store")
}

// ─── Identity ────────────────────────────────────────────────────────────────

#[tokio::test]
async fn identity_missing_returns_none() {
  let s = store().await;
  assert!(s.identity().await.unwrap().is_none());
}

#[tokio::test]
async fn save_and_load_identity() {
  let s = store().await;
  let id = DeviceIdentity {
    device_token: "apns-token".into(),
    user_uuid:    Uuid::new_v4(),
  };

  s.save_identity(&id).await.unwrap();
  assert_eq!(s.identity().await.unwrap(), Some(id));
}

#[tokio::test]
async fn save_identity_replaces_previous() {
  let s = store().await;
  let first = DeviceIdentity {
    device_token: "old".into(),
    user_uuid:    Uuid::new_v4(),
  };
  let second = DeviceIdentity {
    device_token: "new".into(),
    user_uuid:    Uuid::new_v4(),
  };

  s.save_identity(&first).await.unwrap();
  s.save_identity(&second).await.unwrap();
  assert_eq!(s.identity().await.unwrap(), Some(second));
}

// ─── Bookmarks ───────────────────────────────────────────────────────────────

#[tokio::test]
async fn bookmark_add_is_idempotent() {
  let s = store().await;

  assert!(s.set_bookmarked(BookmarkKind::Article, "42", true).await.unwrap());
  assert!(!s.set_bookmarked(BookmarkKind::Article, "42", true).await.unwrap());

  assert!(s.is_bookmarked(BookmarkKind::Article, "42").await.unwrap());
  assert_eq!(s.bookmarks(BookmarkKind::Article).await.unwrap(), vec!["42"]);
}

#[tokio::test]
async fn bookmark_remove_absent_reports_unchanged() {
  let s = store().await;
  assert!(!s.set_bookmarked(BookmarkKind::Article, "nope", false).await.unwrap());
}

#[tokio::test]
async fn bookmarks_are_newest_first_and_scoped_by_kind() {
  let s = store().await;
  s.set_bookmarked(BookmarkKind::Article, "a", true).await.unwrap();
  s.set_bookmarked(BookmarkKind::Magazine, "m", true).await.unwrap();
  s.set_bookmarked(BookmarkKind::Article, "b", true).await.unwrap();

  assert_eq!(s.bookmarks(BookmarkKind::Article).await.unwrap(), vec!["b", "a"]);
  assert_eq!(s.bookmarks(BookmarkKind::Magazine).await.unwrap(), vec!["m"]);
  assert!(!s.is_bookmarked(BookmarkKind::Magazine, "a").await.unwrap());
}

#[tokio::test]
async fn unbookmark_removes() {
  let s = store().await;
  s.set_bookmarked(BookmarkKind::Article, "a", true).await.unwrap();
  assert!(s.set_bookmarked(BookmarkKind::Article, "a", false).await.unwrap());
  assert!(s.bookmarks(BookmarkKind::Article).await.unwrap().is_empty());
}

// ─── Follows ─────────────────────────────────────────────────────────────────

#[tokio::test]
async fn follows_keep_insertion_order() {
  let s = store().await;
  s.set_followed("cornell-daily-sun", true).await.unwrap();
  s.set_followed("slope-media", true).await.unwrap();
  s.set_followed("cornell-review", true).await.unwrap();

  assert_eq!(
    s.followed_publications().await.unwrap(),
    vec!["cornell-daily-sun", "slope-media", "cornell-review"]
  );
}

#[tokio::test]
async fn unfollow_and_refollow_moves_to_end() {
  let s = store().await;
  s.set_followed("a", true).await.unwrap();
  s.set_followed("b", true).await.unwrap();

  assert!(s.set_followed("a", false).await.unwrap());
  assert!(!s.set_followed("a", false).await.unwrap());
  s.set_followed("a", true).await.unwrap();

  assert_eq!(s.followed_publications().await.unwrap(), vec!["b", "a"]);
}

#[tokio::test]
async fn clear_library_keeps_identity() {
  let s = store().await;
  let id = DeviceIdentity {
    device_token: "t".into(),
    user_uuid:    Uuid::new_v4(),
  };
  s.save_identity(&id).await.unwrap();
  s.set_followed("a", true).await.unwrap();
  s.set_bookmarked(BookmarkKind::Article, "x", true).await.unwrap();

  s.clear_library().await.unwrap();

  assert!(s.followed_publications().await.unwrap().is_empty());
  assert!(s.bookmarks(BookmarkKind::Article).await.unwrap().is_empty());
  assert_eq!(s.identity().await.unwrap(), Some(id));
}

#[tokio::test]
async fn reopening_a_file_keeps_data() {
  let dir = std::env::temp_dir().join(format!("volume-store-{}", Uuid::new_v4()));
  std::fs::create_dir_all(&dir).unwrap();
  let path = dir.join("prefs.sqlite");

  {
    let s = SqliteStore::open(&path).await.unwrap();
    s.set_followed("slope-media", true).await.unwrap();
  }
  let s = SqliteStore::open(&path).await.unwrap();
  assert_eq!(s.followed_publications().await.unwrap(), vec!["slope-media"]);

  std::fs::remove_dir_all(&dir).ok();
}
