//! [`FlyersState`] — upcoming, past and trending flyers.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use volume_core::{flyer::Flyer, gateway::Gateway, prefs::PreferencesStore};

use crate::{Context, StateField};

const PAST_LIMIT: u32 = 20;
const TRENDING_LIMIT: u32 = 10;

pub struct FlyersState<G, P> {
  ctx:          Arc<Context<G, P>>,
  /// Soonest-ending first.
  pub upcoming: StateField<Vec<Flyer>>,
  pub past:     StateField<Vec<Flyer>>,
  pub trending: StateField<Vec<Flyer>>,
}

impl<G, P> FlyersState<G, P>
where
  G: Gateway,
  P: PreferencesStore,
{
  pub fn new(ctx: Arc<Context<G, P>>) -> Self {
    Self {
      ctx,
      upcoming: StateField::new("flyers.upcoming", "Unable to load upcoming flyers"),
      past: StateField::new("flyers.past", "Unable to load past flyers"),
      trending: StateField::new("flyers.trending", "Unable to load trending flyers"),
    }
  }

  /// Re-fetch every list relative to `now`.
  pub async fn refresh(&self, now: DateTime<Utc>) {
    let repo = &self.ctx.repo;
    tokio::join!(
      self.upcoming.load(repo.upcoming_flyers(now)),
      self.past.load(repo.past_flyers(now, Some(PAST_LIMIT))),
      self.trending.load(repo.trending_flyers(Some(TRENDING_LIMIT))),
    );
  }

  /// Upcoming flyers in category `slug`, still soonest-ending first.
  ///
  /// Empty until `upcoming` has loaded.
  pub fn by_category(&self, slug: &str) -> Vec<Flyer> {
    self
      .upcoming
      .value()
      .unwrap_or_default()
      .into_iter()
      .filter(|f| f.category_slug == slug)
      .collect()
  }
}
