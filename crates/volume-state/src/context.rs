//! [`Context`] — the repository and preferences shared by every holder.

use std::sync::Arc;

use volume_core::{
  gateway::Gateway,
  identity::DeviceIdentity,
  prefs::{BookmarkKind, PreferencesStore},
};

use crate::{Error, Result, Repository};

/// Everything a state holder needs to fetch and mutate.
///
/// Holders keep an `Arc<Context>`; the gateway's HTTP client and the
/// preferences connection are shared, never duplicated.
pub struct Context<G, P> {
  pub repo:  Repository<G>,
  pub prefs: P,
}

impl<G, P> Context<G, P>
where
  G: Gateway,
  P: PreferencesStore,
{
  pub fn new(gateway: G, prefs: P) -> Arc<Self> {
    Arc::new(Self {
      repo: Repository::new(gateway),
      prefs,
    })
  }

  // ── Preferences ───────────────────────────────────────────────────────────

  /// The device identity, or [`Error::MissingIdentity`] before `createUser`.
  pub async fn identity(&self) -> Result<DeviceIdentity> {
    self
      .prefs
      .identity()
      .await
      .map_err(Error::preferences)?
      .ok_or(Error::MissingIdentity)
  }

  pub async fn followed_slugs(&self) -> Result<Vec<String>> {
    self
      .prefs
      .followed_publications()
      .await
      .map_err(Error::preferences)
  }

  pub async fn is_following(&self, slug: &str) -> Result<bool> {
    Ok(self.followed_slugs().await?.iter().any(|s| s == slug))
  }

  pub async fn bookmark_ids(&self, kind: BookmarkKind) -> Result<Vec<String>> {
    self.prefs.bookmarks(kind).await.map_err(Error::preferences)
  }

  pub async fn is_bookmarked(&self, kind: BookmarkKind, id: &str) -> Result<bool> {
    self
      .prefs
      .is_bookmarked(kind, id)
      .await
      .map_err(Error::preferences)
  }

  // ── Confirmed mutations ───────────────────────────────────────────────────
  //
  // These talk to the backend first and persist locally only once it agrees.
  // Holders wrap them with their own optimistic apply and rollback.

  /// Follow or unfollow `slug` on the backend, then record it locally.
  pub async fn set_following(&self, slug: &str, follow: bool) -> Result<()> {
    let identity = self.identity().await?;
    self.repo.set_following(slug, identity.user_uuid, follow).await?;
    self
      .prefs
      .set_followed(slug, follow)
      .await
      .map_err(Error::preferences)?;
    tracing::info!(slug, follow, "updated publication follow");
    Ok(())
  }

  /// Bookmark or unbookmark an item.
  ///
  /// Adding an article bookmark is reported to the backend (it feeds the
  /// weekly debrief) when an identity exists; everything else is local.
  pub async fn set_bookmarked(&self, kind: BookmarkKind, id: &str, bookmarked: bool) -> Result<()> {
    if bookmarked && kind == BookmarkKind::Article {
      match self.identity().await {
        Ok(identity) => self.repo.bookmark_article(identity.user_uuid).await?,
        Err(Error::MissingIdentity) => {
          tracing::debug!(id, "no identity; bookmark kept local only");
        }
        Err(e) => return Err(e),
      }
    }
    self
      .prefs
      .set_bookmarked(kind, id, bookmarked)
      .await
      .map_err(Error::preferences)?;
    Ok(())
  }
}
