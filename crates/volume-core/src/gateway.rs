//! The `Gateway` trait — one async operation per backend query or mutation.
//!
//! The trait is implemented by `volume-graphql` over HTTP. The repository and
//! the state holders depend on this abstraction, not on the transport, so the
//! state layer can be exercised against a scripted gateway in tests.
//!
//! Every call is a single round trip: no retries, no caching. Lookups by id,
//! slug or uuid return `None` when the backend answers `null`.

use std::future::Future;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::{
  article::Article,
  error::Classify,
  flyer::Flyer,
  magazine::Magazine,
  organization::Organization,
  publication::Publication,
  user::User,
};

/// Abstraction over the Volume backend.
///
/// All methods return `Send` futures so a gateway can be shared across tasks
/// on a multi-threaded tokio runtime.
pub trait Gateway: Send + Sync {
  type Error: std::error::Error + Classify + Send + Sync + 'static;

  // ── Articles ──────────────────────────────────────────────────────────

  fn all_articles(
    &self,
    limit: Option<u32>,
  ) -> impl Future<Output = Result<Vec<Article>, Self::Error>> + Send + '_;

  fn trending_articles(
    &self,
    limit: Option<u32>,
  ) -> impl Future<Output = Result<Vec<Article>, Self::Error>> + Send + '_;

  fn article_by_id<'a>(
    &'a self,
    id: &'a str,
  ) -> impl Future<Output = Result<Option<Article>, Self::Error>> + Send + 'a;

  /// Articles for each id that still exists; unknown ids are skipped.
  fn articles_by_ids<'a>(
    &'a self,
    ids: &'a [String],
  ) -> impl Future<Output = Result<Vec<Article>, Self::Error>> + Send + 'a;

  fn articles_by_publication_slug<'a>(
    &'a self,
    slug: &'a str,
    limit: Option<u32>,
  ) -> impl Future<Output = Result<Vec<Article>, Self::Error>> + Send + 'a;

  fn articles_by_publication_slugs<'a>(
    &'a self,
    slugs: &'a [String],
    limit: Option<u32>,
  ) -> impl Future<Output = Result<Vec<Article>, Self::Error>> + Send + 'a;

  fn shuffled_articles_by_publication_slugs<'a>(
    &'a self,
    slugs: &'a [String],
    limit: Option<u32>,
  ) -> impl Future<Output = Result<Vec<Article>, Self::Error>> + Send + 'a;

  fn search_articles<'a>(
    &'a self,
    query: &'a str,
    limit: Option<u32>,
  ) -> impl Future<Output = Result<Vec<Article>, Self::Error>> + Send + 'a;

  /// Record a shoutout from `user` and return the article's new count.
  fn increment_shoutouts<'a>(
    &'a self,
    id: &'a str,
    user: Uuid,
  ) -> impl Future<Output = Result<u32, Self::Error>> + Send + 'a;

  /// Tell the backend `user` bookmarked an article (feeds the weekly debrief).
  fn bookmark_article(
    &self,
    user: Uuid,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  // ── Publications ──────────────────────────────────────────────────────

  fn all_publications(
    &self,
  ) -> impl Future<Output = Result<Vec<Publication>, Self::Error>> + Send + '_;

  fn publication_by_slug<'a>(
    &'a self,
    slug: &'a str,
  ) -> impl Future<Output = Result<Option<Publication>, Self::Error>> + Send + 'a;

  fn follow_publication<'a>(
    &'a self,
    slug: &'a str,
    user: Uuid,
  ) -> impl Future<Output = Result<User, Self::Error>> + Send + 'a;

  fn unfollow_publication<'a>(
    &'a self,
    slug: &'a str,
    user: Uuid,
  ) -> impl Future<Output = Result<User, Self::Error>> + Send + 'a;

  // ── Magazines ─────────────────────────────────────────────────────────

  fn all_magazines(
    &self,
    limit: Option<u32>,
  ) -> impl Future<Output = Result<Vec<Magazine>, Self::Error>> + Send + '_;

  fn featured_magazines(
    &self,
    limit: Option<u32>,
  ) -> impl Future<Output = Result<Vec<Magazine>, Self::Error>> + Send + '_;

  fn magazine_by_id<'a>(
    &'a self,
    id: &'a str,
  ) -> impl Future<Output = Result<Option<Magazine>, Self::Error>> + Send + 'a;

  fn increment_magazine_shoutouts<'a>(
    &'a self,
    id: &'a str,
    user: Uuid,
  ) -> impl Future<Output = Result<u32, Self::Error>> + Send + 'a;

  // ── Organizations & flyers ────────────────────────────────────────────

  fn all_organizations(
    &self,
  ) -> impl Future<Output = Result<Vec<Organization>, Self::Error>> + Send + '_;

  /// Flyers whose event ends after `since`.
  fn flyers_after_date(
    &self,
    since: DateTime<Utc>,
  ) -> impl Future<Output = Result<Vec<Flyer>, Self::Error>> + Send + '_;

  /// Flyers whose event ended before `before`, most recent first.
  fn flyers_before_date(
    &self,
    before: DateTime<Utc>,
    limit: Option<u32>,
  ) -> impl Future<Output = Result<Vec<Flyer>, Self::Error>> + Send + '_;

  fn trending_flyers(
    &self,
    limit: Option<u32>,
  ) -> impl Future<Output = Result<Vec<Flyer>, Self::Error>> + Send + '_;

  // ── Users ─────────────────────────────────────────────────────────────

  /// Register this installation. The backend assigns the user UUID.
  fn create_user<'a>(
    &'a self,
    followed_slugs: &'a [String],
    device_token: &'a str,
  ) -> impl Future<Output = Result<User, Self::Error>> + Send + 'a;

  fn user_by_uuid(
    &self,
    user: Uuid,
  ) -> impl Future<Output = Result<Option<User>, Self::Error>> + Send + '_;
}
