//! [`SearchState`] — article search results.

use std::sync::Arc;

use volume_core::{article::Article, gateway::Gateway, prefs::PreferencesStore};

use crate::{Context, StateField};

const RESULT_LIMIT: u32 = 20;

pub struct SearchState<G, P> {
  ctx:         Arc<Context<G, P>>,
  pub results: StateField<Vec<Article>>,
}

impl<G, P> SearchState<G, P>
where
  G: Gateway,
  P: PreferencesStore,
{
  pub fn new(ctx: Arc<Context<G, P>>) -> Self {
    Self {
      ctx,
      results: StateField::new("search.results", "Unable to search articles"),
    }
  }

  /// Search for `query`. Typing fast is safe: only the newest query's
  /// results are kept.
  ///
  /// A blank query finishes at once with no results and no request.
  pub async fn search(&self, query: &str) -> bool {
    let query = query.trim();
    if query.is_empty() {
      let generation = self.results.begin();
      return self.results.succeed(generation, Vec::new());
    }
    self
      .results
      .load(self.ctx.repo.search_articles(query, Some(RESULT_LIMIT)))
      .await
  }
}
