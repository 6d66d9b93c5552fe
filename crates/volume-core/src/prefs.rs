//! The `PreferencesStore` trait — durable per-installation user state.
//!
//! Holds what the backend does not: the device identity, the set of
//! bookmarked items and the set of followed publications. Implemented by
//! `volume-store-sqlite`.

use std::future::Future;

use serde::{Deserialize, Serialize};

use crate::identity::DeviceIdentity;

/// What a bookmark points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookmarkKind {
  Article,
  Magazine,
}

impl BookmarkKind {
  pub fn as_str(self) -> &'static str {
    match self {
      Self::Article => "article",
      Self::Magazine => "magazine",
    }
  }
}

/// Abstraction over a preferences backend.
///
/// Set operations are idempotent: adding an existing bookmark or removing an
/// absent one succeeds and reports whether anything changed.
pub trait PreferencesStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  // ── Identity ──────────────────────────────────────────────────────────

  fn identity(
    &self,
  ) -> impl Future<Output = Result<Option<DeviceIdentity>, Self::Error>> + Send + '_;

  /// Persist the identity, replacing any previous one.
  fn save_identity<'a>(
    &'a self,
    identity: &'a DeviceIdentity,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + 'a;

  // ── Bookmarks ─────────────────────────────────────────────────────────

  /// Bookmarked ids of `kind`, most recently bookmarked first.
  fn bookmarks(
    &self,
    kind: BookmarkKind,
  ) -> impl Future<Output = Result<Vec<String>, Self::Error>> + Send + '_;

  fn is_bookmarked<'a>(
    &'a self,
    kind: BookmarkKind,
    id: &'a str,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + 'a;

  /// Add or remove a bookmark. Returns `true` if the set changed.
  fn set_bookmarked<'a>(
    &'a self,
    kind: BookmarkKind,
    id: &'a str,
    bookmarked: bool,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + 'a;

  // ── Follows ───────────────────────────────────────────────────────────

  /// Followed publication slugs in the order they were followed.
  fn followed_publications(
    &self,
  ) -> impl Future<Output = Result<Vec<String>, Self::Error>> + Send + '_;

  /// Follow or unfollow a publication. Returns `true` if the set changed.
  fn set_followed<'a>(
    &'a self,
    slug: &'a str,
    followed: bool,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + 'a;
}
