//! [`Repository`] — turns gateway calls into domain results.
//!
//! The repository may fan out to several queries and join them, and it turns
//! `null` lookups into [`Error::NotFound`]. It has no cache: every call goes
//! to the network, and gateway errors propagate unchanged (boxed) with no
//! retry.

use chrono::{DateTime, Utc};
use uuid::Uuid;
use volume_core::{
  article::Article,
  flyer::Flyer,
  gateway::Gateway,
  magazine::Magazine,
  organization::Organization,
  publication::Publication,
  user::User,
};

use crate::{Error, Result};

/// The three article lists on the home screen.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HomeFeed {
  pub trending: Vec<Article>,
  pub followed: Vec<Article>,
  pub other:    Vec<Article>,
}

/// Page sizes for [`Repository::home_feed`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HomeLimits {
  pub trending: u32,
  pub followed: u32,
  pub other:    u32,
}

impl Default for HomeLimits {
  fn default() -> Self {
    Self {
      trending: 10,
      followed: 20,
      other:    20,
    }
  }
}

/// A publication together with its latest articles.
#[derive(Debug, Clone, PartialEq)]
pub struct PublicationDetail {
  pub publication: Publication,
  pub articles:    Vec<Article>,
}

pub struct Repository<G> {
  gateway: G,
}

impl<G: Gateway> Repository<G> {
  pub fn new(gateway: G) -> Self { Self { gateway } }

  pub fn gateway(&self) -> &G { &self.gateway }

  // ── Articles ──────────────────────────────────────────────────────────────

  pub async fn article(&self, id: &str) -> Result<Article> {
    self
      .gateway
      .article_by_id(id)
      .await
      .map_err(Error::gateway)?
      .ok_or_else(|| Error::not_found("article", id))
  }

  /// The newest articles across every publication.
  pub async fn latest_articles(&self, limit: Option<u32>) -> Result<Vec<Article>> {
    self
      .gateway
      .all_articles(limit)
      .await
      .map_err(Error::gateway)
  }

  pub async fn trending_articles(&self, limit: Option<u32>) -> Result<Vec<Article>> {
    self
      .gateway
      .trending_articles(limit)
      .await
      .map_err(Error::gateway)
  }

  /// Latest articles from the followed publications.
  ///
  /// Following nothing yields an empty list without a network call.
  pub async fn followed_articles(&self, slugs: &[String], limit: Option<u32>) -> Result<Vec<Article>> {
    if slugs.is_empty() {
      return Ok(Vec::new());
    }
    self
      .gateway
      .articles_by_publication_slugs(slugs, limit)
      .await
      .map_err(Error::gateway)
  }

  /// A shuffled sample of articles from every publication not followed.
  pub async fn other_articles(&self, followed: &[String], limit: Option<u32>) -> Result<Vec<Article>> {
    let others: Vec<String> = self
      .publications()
      .await?
      .into_iter()
      .map(|p| p.slug)
      .filter(|slug| !followed.contains(slug))
      .collect();
    if others.is_empty() {
      return Ok(Vec::new());
    }
    self
      .gateway
      .shuffled_articles_by_publication_slugs(&others, limit)
      .await
      .map_err(Error::gateway)
  }

  /// All three home lists at once. Fails if any of them fails.
  pub async fn home_feed(&self, followed: &[String], limits: HomeLimits) -> Result<HomeFeed> {
    let (trending, followed_articles, other) = tokio::try_join!(
      self.trending_articles(Some(limits.trending)),
      self.followed_articles(followed, Some(limits.followed)),
      self.other_articles(followed, Some(limits.other)),
    )?;
    Ok(HomeFeed {
      trending,
      followed: followed_articles,
      other,
    })
  }

  /// Articles for the given ids, in the same order as `ids`.
  ///
  /// Ids the backend no longer knows are skipped.
  pub async fn bookmarked_articles(&self, ids: &[String]) -> Result<Vec<Article>> {
    if ids.is_empty() {
      return Ok(Vec::new());
    }
    let mut found = self
      .gateway
      .articles_by_ids(ids)
      .await
      .map_err(Error::gateway)?;
    found.sort_by_key(|a| ids.iter().position(|id| *id == a.id).unwrap_or(usize::MAX));
    Ok(found)
  }

  pub async fn search_articles(&self, query: &str, limit: Option<u32>) -> Result<Vec<Article>> {
    self
      .gateway
      .search_articles(query, limit)
      .await
      .map_err(Error::gateway)
  }

  /// Returns the article's shoutout count after the increment.
  pub async fn shoutout_article(&self, id: &str, user: Uuid) -> Result<u32> {
    self
      .gateway
      .increment_shoutouts(id, user)
      .await
      .map_err(Error::gateway)
  }

  pub async fn bookmark_article(&self, user: Uuid) -> Result<()> {
    self
      .gateway
      .bookmark_article(user)
      .await
      .map_err(Error::gateway)
  }

  // ── Publications ──────────────────────────────────────────────────────────

  pub async fn publications(&self) -> Result<Vec<Publication>> {
    self
      .gateway
      .all_publications()
      .await
      .map_err(Error::gateway)
  }

  pub async fn publication(&self, slug: &str) -> Result<Publication> {
    self
      .gateway
      .publication_by_slug(slug)
      .await
      .map_err(Error::gateway)?
      .ok_or_else(|| Error::not_found("publication", slug))
  }

  pub async fn publication_articles(&self, slug: &str, limit: Option<u32>) -> Result<Vec<Article>> {
    self
      .gateway
      .articles_by_publication_slug(slug, limit)
      .await
      .map_err(Error::gateway)
  }

  /// Fetch a publication and its articles concurrently and join them.
  pub async fn publication_with_articles(&self, slug: &str, limit: Option<u32>) -> Result<PublicationDetail> {
    let (publication, articles) = tokio::try_join!(
      self.publication(slug),
      self.publication_articles(slug, limit),
    )?;
    Ok(PublicationDetail {
      publication,
      articles,
    })
  }

  pub async fn set_following(&self, slug: &str, user: Uuid, follow: bool) -> Result<User> {
    let result = if follow {
      self.gateway.follow_publication(slug, user).await
    } else {
      self.gateway.unfollow_publication(slug, user).await
    };
    result.map_err(Error::gateway)
  }

  // ── Magazines ─────────────────────────────────────────────────────────────

  pub async fn featured_magazines(&self, limit: Option<u32>) -> Result<Vec<Magazine>> {
    self
      .gateway
      .featured_magazines(limit)
      .await
      .map_err(Error::gateway)
  }

  pub async fn magazines(&self, limit: Option<u32>) -> Result<Vec<Magazine>> {
    self
      .gateway
      .all_magazines(limit)
      .await
      .map_err(Error::gateway)
  }

  pub async fn magazine(&self, id: &str) -> Result<Magazine> {
    self
      .gateway
      .magazine_by_id(id)
      .await
      .map_err(Error::gateway)?
      .ok_or_else(|| Error::not_found("magazine", id))
  }

  pub async fn shoutout_magazine(&self, id: &str, user: Uuid) -> Result<u32> {
    self
      .gateway
      .increment_magazine_shoutouts(id, user)
      .await
      .map_err(Error::gateway)
  }

  // ── Organizations & flyers ────────────────────────────────────────────────

  pub async fn organizations(&self) -> Result<Vec<Organization>> {
    self
      .gateway
      .all_organizations()
      .await
      .map_err(Error::gateway)
  }

  /// Flyers still running at `now`, soonest-ending first.
  pub async fn upcoming_flyers(&self, now: DateTime<Utc>) -> Result<Vec<Flyer>> {
    let mut flyers = self
      .gateway
      .flyers_after_date(now)
      .await
      .map_err(Error::gateway)?;
    flyers.sort_by(Flyer::by_end);
    Ok(flyers)
  }

  /// Flyers that ended before `now`, most recently ended first.
  pub async fn past_flyers(&self, now: DateTime<Utc>, limit: Option<u32>) -> Result<Vec<Flyer>> {
    let mut flyers = self
      .gateway
      .flyers_before_date(now, limit)
      .await
      .map_err(Error::gateway)?;
    flyers.sort_by(|a, b| Flyer::by_end(b, a));
    Ok(flyers)
  }

  pub async fn trending_flyers(&self, limit: Option<u32>) -> Result<Vec<Flyer>> {
    self
      .gateway
      .trending_flyers(limit)
      .await
      .map_err(Error::gateway)
  }

  // ── Users ─────────────────────────────────────────────────────────────────

  pub async fn create_user(&self, followed: &[String], device_token: &str) -> Result<User> {
    self
      .gateway
      .create_user(followed, device_token)
      .await
      .map_err(Error::gateway)
  }

  pub async fn user(&self, uuid: Uuid) -> Result<User> {
    self
      .gateway
      .user_by_uuid(uuid)
      .await
      .map_err(Error::gateway)?
      .ok_or_else(|| Error::not_found("user", uuid.to_string()))
  }
}
