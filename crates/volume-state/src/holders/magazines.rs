//! [`MagazinesState`] — featured and all magazines.

use std::sync::Arc;

use volume_core::{gateway::Gateway, magazine::Magazine, prefs::PreferencesStore};

use crate::{Context, Result, StateField};

const FEATURED_LIMIT: u32 = 7;
const ALL_LIMIT: u32 = 20;

pub struct MagazinesState<G, P> {
  ctx:          Arc<Context<G, P>>,
  pub featured: StateField<Vec<Magazine>>,
  pub all:      StateField<Vec<Magazine>>,
}

fn set_count(list: &[Magazine], id: &str, count: impl Fn(u32) -> u32) -> Vec<Magazine> {
  list
    .iter()
    .map(|m| {
      if m.id == id {
        m.with_shoutouts(count(m.shoutouts))
      } else {
        m.clone()
      }
    })
    .collect()
}

impl<G, P> MagazinesState<G, P>
where
  G: Gateway,
  P: PreferencesStore,
{
  pub fn new(ctx: Arc<Context<G, P>>) -> Self {
    Self {
      ctx,
      featured: StateField::new("magazines.featured", "Unable to load featured magazines"),
      all: StateField::new("magazines.all", "Unable to load magazines"),
    }
  }

  pub async fn refresh(&self) {
    let repo = &self.ctx.repo;
    tokio::join!(
      self.featured.load(repo.featured_magazines(Some(FEATURED_LIMIT))),
      self.all.load(repo.magazines(Some(ALL_LIMIT))),
    );
  }

  /// Give magazine `id` a shoutout.
  ///
  /// The mutation is sent whether or not the magazine is listed here; lists
  /// that do hold it show the bump at once and the server's count after.
  pub async fn shoutout(&self, id: &str) -> Result<u32> {
    let identity = self.ctx.identity().await?;

    let listed = |field: &StateField<Vec<Magazine>>| {
      field
        .value()
        .is_some_and(|list| list.iter().any(|m| m.id == id))
    };
    let bumped: Vec<_> = [&self.featured, &self.all]
      .into_iter()
      .filter(|field| listed(field))
      .filter_map(|field| {
        field
          .update(|list| set_count(list, id, |n| n.saturating_add(1)))
          .map(|generation| (field, generation))
      })
      .collect();

    match self
      .ctx
      .repo
      .shoutout_magazine(id, identity.user_uuid)
      .await
    {
      Ok(count) => {
        for (field, generation) in bumped {
          field.update_at(generation, |list| set_count(list, id, |_| count));
        }
        Ok(count)
      }
      Err(e) => {
        tracing::warn!(id, error = %e, "magazine shoutout failed; rolling back");
        for (field, generation) in bumped {
          field.rollback(generation, |list| set_count(list, id, |n| n.saturating_sub(1)));
        }
        Err(e)
      }
    }
  }
}
