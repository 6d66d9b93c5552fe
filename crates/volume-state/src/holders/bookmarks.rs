//! [`BookmarksState`] — the saved-articles list.

use std::sync::Arc;

use volume_core::{
  article::Article,
  gateway::Gateway,
  prefs::{BookmarkKind, PreferencesStore},
};

use crate::{Context, Error, Result, StateField, field::reinsert};

pub struct BookmarksState<G, P> {
  ctx:          Arc<Context<G, P>>,
  /// Most recently bookmarked first.
  pub articles: StateField<Vec<Article>>,
}

impl<G, P> BookmarksState<G, P>
where
  G: Gateway,
  P: PreferencesStore,
{
  pub fn new(ctx: Arc<Context<G, P>>) -> Self {
    Self {
      ctx,
      articles: StateField::new("bookmarks.articles", "Unable to load bookmarked articles"),
    }
  }

  pub async fn refresh(&self) -> bool {
    let ctx = &self.ctx;
    self
      .articles
      .load(async {
        let ids = ctx.bookmark_ids(BookmarkKind::Article).await?;
        ctx.repo.bookmarked_articles(&ids).await
      })
      .await
  }

  /// Unbookmark `id` and drop it from the list.
  pub async fn remove(&self, id: &str) -> Result<()> {
    let list = self.articles.value().ok_or(Error::NotLoaded)?;
    let removed = list.iter().position(|a| a.id == id).map(|i| (i, list[i].clone()));
    let generation = self
      .articles
      .update(|list| list.iter().filter(|a| a.id != id).cloned().collect())
      .ok_or(Error::NotLoaded)?;

    match self
      .ctx
      .set_bookmarked(BookmarkKind::Article, id, false)
      .await
    {
      Ok(()) => Ok(()),
      Err(e) => {
        tracing::warn!(id, error = %e, "unbookmark failed; rolling back");
        if let Some((index, article)) = removed {
          self
            .articles
            .rollback(generation, |list| reinsert(list, index, &article, |a| a.id == id));
        }
        Err(e)
      }
    }
  }
}
