//! [`HomeState`] — the trending, followed and "other" article feeds.

use std::sync::Arc;

use volume_core::{article::Article, gateway::Gateway, prefs::PreferencesStore};

use crate::{Context, StateField, repository::HomeLimits};

pub struct HomeState<G, P> {
  ctx:          Arc<Context<G, P>>,
  limits:       HomeLimits,
  pub trending: StateField<Vec<Article>>,
  pub followed: StateField<Vec<Article>>,
  pub other:    StateField<Vec<Article>>,
}

impl<G, P> HomeState<G, P>
where
  G: Gateway,
  P: PreferencesStore,
{
  pub fn new(ctx: Arc<Context<G, P>>) -> Self { Self::with_limits(ctx, HomeLimits::default()) }

  pub fn with_limits(ctx: Arc<Context<G, P>>, limits: HomeLimits) -> Self {
    Self {
      ctx,
      limits,
      trending: StateField::new("home.trending", "Unable to load trending articles"),
      followed: StateField::new("home.followed", "Unable to load articles from followed publications"),
      other: StateField::new("home.other", "Unable to load other articles"),
    }
  }

  /// Re-fetch all three feeds concurrently.
  ///
  /// Each feed fails on its own; a failed trending fetch does not hold back
  /// the followed list.
  pub async fn refresh(&self) {
    let repo = &self.ctx.repo;
    tokio::join!(
      self.trending.load(repo.trending_articles(Some(self.limits.trending))),
      self.refresh_by_follows(),
    );
  }

  /// `followed` and `other` both depend on the followed slugs, read once.
  async fn refresh_by_follows(&self) {
    let followed_gen = self.followed.begin();
    let other_gen = self.other.begin();

    let slugs = match self.ctx.followed_slugs().await {
      Ok(slugs) => slugs,
      Err(e) => {
        self.followed.fail(followed_gen, &e);
        self.other.fail(other_gen, &e);
        return;
      }
    };

    let repo = &self.ctx.repo;
    let (followed, other) = tokio::join!(
      repo.followed_articles(&slugs, Some(self.limits.followed)),
      repo.other_articles(&slugs, Some(self.limits.other)),
    );
    self.followed.complete(followed_gen, followed);
    self.other.complete(other_gen, other);
  }
}
