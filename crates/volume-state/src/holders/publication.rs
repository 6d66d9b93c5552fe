//! [`PublicationState`] — a publication's profile and its articles.

use std::sync::Arc;

use tokio::sync::watch;
use volume_core::{
  article::Article,
  gateway::Gateway,
  prefs::PreferencesStore,
  publication::Publication,
};

use crate::{Context, Error, Result, StateField};

const ARTICLE_LIMIT: u32 = 20;

pub struct PublicationState<G, P> {
  ctx:             Arc<Context<G, P>>,
  pub publication: StateField<Publication>,
  pub articles:    StateField<Vec<Article>>,
  following:       watch::Sender<bool>,
}

impl<G, P> PublicationState<G, P>
where
  G: Gateway,
  P: PreferencesStore,
{
  pub fn new(ctx: Arc<Context<G, P>>) -> Self {
    let (following, _) = watch::channel(false);
    Self {
      ctx,
      publication: StateField::new("publication", "Unable to load this publication"),
      articles: StateField::new("publication.articles", "Unable to load articles"),
      following,
    }
  }

  pub fn is_following(&self) -> watch::Receiver<bool> { self.following.subscribe() }

  pub fn following(&self) -> bool { *self.following.borrow() }

  /// Fetch the profile and the articles for `slug` side by side.
  ///
  /// The follow flag is only taken when this fetch's profile is applied.
  /// Returns whether it was.
  pub async fn load(&self, slug: &str) -> bool {
    let repo = &self.ctx.repo;
    let (applied, _, following) = tokio::join!(
      self.publication.load(repo.publication(slug)),
      self.articles.load(repo.publication_articles(slug, Some(ARTICLE_LIMIT))),
      self.ctx.is_following(slug),
    );
    if !applied || !self.publication.get().is_success() {
      return applied;
    }
    match following {
      Ok(flag) => {
        self.following.send_replace(flag);
      }
      Err(e) => tracing::warn!(slug, error = %e, "could not read follow flag"),
    }
    applied
  }

  /// Follow or unfollow the loaded publication. Returns the new flag.
  pub async fn toggle_follow(&self) -> Result<bool> {
    let publication = self.publication.value().ok_or(Error::NotLoaded)?;
    let next = !self.following();
    self.following.send_replace(next);

    match self.ctx.set_following(&publication.slug, next).await {
      Ok(()) => Ok(next),
      Err(e) => {
        tracing::warn!(slug = %publication.slug, error = %e, "follow failed; rolling back");
        self.following.send_replace(!next);
        Err(e)
      }
    }
  }
}
