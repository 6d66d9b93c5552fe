//! [`DebriefState`] — the user's weekly debrief.

use std::sync::Arc;

use volume_core::{gateway::Gateway, prefs::PreferencesStore, user::WeeklyDebrief};

use crate::{Context, Error, StateField};

pub struct DebriefState<G, P> {
  ctx:         Arc<Context<G, P>>,
  pub debrief: StateField<WeeklyDebrief>,
}

impl<G, P> DebriefState<G, P>
where
  G: Gateway,
  P: PreferencesStore,
{
  pub fn new(ctx: Arc<Context<G, P>>) -> Self {
    Self {
      ctx,
      debrief: StateField::new("debrief", "Unable to load your weekly debrief"),
    }
  }

  /// Fetch the current user's debrief. Fails without an identity or when
  /// the backend has not generated one yet.
  pub async fn refresh(&self) -> bool {
    let ctx = &self.ctx;
    self
      .debrief
      .load(async {
        let identity = ctx.identity().await?;
        let user = ctx.repo.user(identity.user_uuid).await?;
        user
          .weekly_debrief
          .ok_or_else(|| Error::not_found("weekly debrief", identity.user_uuid.to_string()))
      })
      .await
  }
}
