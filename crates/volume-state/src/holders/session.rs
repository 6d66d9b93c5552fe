//! [`Session`] — first-run registration and follow reconciliation.

use std::sync::Arc;

use volume_core::{gateway::Gateway, identity::DeviceIdentity, prefs::PreferencesStore};

use crate::{Context, Error, Result};

pub struct Session<G, P> {
  ctx: Arc<Context<G, P>>,
}

impl<G, P> Session<G, P>
where
  G: Gateway,
  P: PreferencesStore,
{
  pub fn new(ctx: Arc<Context<G, P>>) -> Self { Self { ctx } }

  /// Return the stored identity, registering this device first if needed.
  ///
  /// Registration sends the locally followed slugs so the backend starts
  /// in step with this device.
  pub async fn ensure_identity(&self, device_token: &str) -> Result<DeviceIdentity> {
    match self.ctx.identity().await {
      Ok(identity) => return Ok(identity),
      Err(Error::MissingIdentity) => {}
      Err(e) => return Err(e),
    }

    let followed = self.ctx.followed_slugs().await?;
    let user = self.ctx.repo.create_user(&followed, device_token).await?;
    let identity = DeviceIdentity {
      device_token: device_token.to_owned(),
      user_uuid:    user.uuid,
    };
    self
      .ctx
      .prefs
      .save_identity(&identity)
      .await
      .map_err(Error::preferences)?;

    tracing::info!(user = %identity.user_uuid, "registered device");
    Ok(identity)
  }

  /// Make the local follow list match the backend's.
  ///
  /// Returns the number of slugs added or removed locally.
  pub async fn sync_follows(&self) -> Result<usize> {
    let identity = self.ctx.identity().await?;
    let remote = self.ctx.repo.user(identity.user_uuid).await?.followed_publication_slugs;
    let local = self.ctx.followed_slugs().await?;

    let mut changed = 0;
    for slug in remote.iter().filter(|s| !local.contains(s)) {
      changed += usize::from(self.set_followed_locally(slug, true).await?);
    }
    for slug in local.iter().filter(|s| !remote.contains(s)) {
      changed += usize::from(self.set_followed_locally(slug, false).await?);
    }

    tracing::debug!(changed, "synced follows");
    Ok(changed)
  }

  async fn set_followed_locally(&self, slug: &str, followed: bool) -> Result<bool> {
    self
      .ctx
      .prefs
      .set_followed(slug, followed)
      .await
      .map_err(Error::preferences)
  }
}
