//! [`ArticleState`] — one article, its bookmark flag and shoutouts.

use std::sync::Arc;

use tokio::sync::watch;
use volume_core::{
  article::Article,
  gateway::Gateway,
  prefs::{BookmarkKind, PreferencesStore},
};

use crate::{Context, Error, Result, StateField};

pub struct ArticleState<G, P> {
  ctx:         Arc<Context<G, P>>,
  pub article: StateField<Article>,
  bookmarked:  watch::Sender<bool>,
}

impl<G, P> ArticleState<G, P>
where
  G: Gateway,
  P: PreferencesStore,
{
  pub fn new(ctx: Arc<Context<G, P>>) -> Self {
    let (bookmarked, _) = watch::channel(false);
    Self {
      ctx,
      article: StateField::new("article", "Unable to load this article"),
      bookmarked,
    }
  }

  /// Whether the loaded article is bookmarked.
  pub fn is_bookmarked(&self) -> watch::Receiver<bool> { self.bookmarked.subscribe() }

  pub fn bookmarked(&self) -> bool { *self.bookmarked.borrow() }

  /// Fetch article `id`.
  ///
  /// Also used when opening an article from a notification.
  pub async fn load(&self, id: &str) -> bool {
    let generation = self.article.begin();
    let outcome = self.ctx.repo.article(id).await;
    let applied = self.article.complete(generation, outcome);
    if applied {
      match self.ctx.is_bookmarked(BookmarkKind::Article, id).await {
        Ok(flag) => {
          self.bookmarked.send_replace(flag);
        }
        Err(e) => tracing::warn!(id, error = %e, "could not read bookmark flag"),
      }
    }
    applied
  }

  /// Give the loaded article a shoutout.
  ///
  /// The count is bumped immediately and replaced by the server's count once
  /// it answers; on failure the bump is undone.
  pub async fn shoutout(&self) -> Result<u32> {
    let article = self.article.value().ok_or(Error::NotLoaded)?;
    let identity = self.ctx.identity().await?;

    let generation = self
      .article
      .update(|a| a.with_shoutouts(a.shoutouts.saturating_add(1)))
      .ok_or(Error::NotLoaded)?;

    match self
      .ctx
      .repo
      .shoutout_article(&article.id, identity.user_uuid)
      .await
    {
      Ok(count) => {
        self.article.update_at(generation, |a| a.with_shoutouts(count));
        Ok(count)
      }
      Err(e) => {
        tracing::warn!(id = %article.id, error = %e, "shoutout failed; rolling back");
        self
          .article
          .rollback(generation, |a| a.with_shoutouts(a.shoutouts.saturating_sub(1)));
        Err(e)
      }
    }
  }

  /// Flip the bookmark on the loaded article. Returns the new flag.
  pub async fn toggle_bookmark(&self) -> Result<bool> {
    let article = self.article.value().ok_or(Error::NotLoaded)?;
    let next = !self.bookmarked();
    self.bookmarked.send_replace(next);

    match self
      .ctx
      .set_bookmarked(BookmarkKind::Article, &article.id, next)
      .await
    {
      Ok(()) => Ok(next),
      Err(e) => {
        tracing::warn!(id = %article.id, error = %e, "bookmark failed; rolling back");
        self.bookmarked.send_replace(!next);
        Err(e)
      }
    }
  }
}
