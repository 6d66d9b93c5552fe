//! [`PublicationsState`] — followed publications and everything else.

use std::sync::Arc;

use volume_core::{gateway::Gateway, prefs::PreferencesStore, publication::Publication};

use crate::{Context, Error, Result, StateField, field::reinsert};

pub struct PublicationsState<G, P> {
  ctx:          Arc<Context<G, P>>,
  /// In the order they were followed.
  pub followed: StateField<Vec<Publication>>,
  pub more:     StateField<Vec<Publication>>,
}

impl<G, P> PublicationsState<G, P>
where
  G: Gateway,
  P: PreferencesStore,
{
  pub fn new(ctx: Arc<Context<G, P>>) -> Self {
    Self {
      ctx,
      followed: StateField::new("publications.followed", "Unable to load followed publications"),
      more: StateField::new("publications.more", "Unable to load publications"),
    }
  }

  /// Fetch every publication and split it by the local follow list.
  pub async fn refresh(&self) {
    let followed_gen = self.followed.begin();
    let more_gen = self.more.begin();

    let (slugs, all) = tokio::join!(self.ctx.followed_slugs(), self.ctx.repo.publications());
    let split = slugs.and_then(|slugs| Ok((slugs, all?)));

    match split {
      Ok((slugs, all)) => {
        let (mut followed, more): (Vec<_>, Vec<_>) =
          all.into_iter().partition(|p| slugs.contains(&p.slug));
        followed.sort_by_key(|p| slugs.iter().position(|s| *s == p.slug));
        self.followed.succeed(followed_gen, followed);
        self.more.succeed(more_gen, more);
      }
      Err(e) => {
        self.followed.fail(followed_gen, &e);
        self.more.fail(more_gen, &e);
      }
    }
  }

  /// Follow or unfollow `slug`, moving it between the two lists.
  ///
  /// The move is shown at once and undone if the backend refuses. Returns
  /// whether the publication is now followed.
  pub async fn toggle_follow(&self, slug: &str) -> Result<bool> {
    let follow = !self
      .followed
      .value()
      .ok_or(Error::NotLoaded)?
      .iter()
      .any(|p| p.slug == slug);
    let (from, to) = if follow {
      (&self.more, &self.followed)
    } else {
      (&self.followed, &self.more)
    };

    let source = from.value().ok_or(Error::NotLoaded)?;
    let index = source
      .iter()
      .position(|p| p.slug == slug)
      .ok_or_else(|| Error::not_found("publication", slug))?;
    let moved = source[index].clone();

    let take_out = |list: &Vec<Publication>| -> Vec<Publication> {
      list.iter().filter(|p| p.slug != slug).cloned().collect()
    };
    let put_back = |list: &Vec<Publication>| reinsert(list, index, &moved, |p| p.slug == slug);

    let removed = from.update(take_out).ok_or(Error::NotLoaded)?;
    let Some(added) = to.update(|list| {
      let mut next = list.clone();
      next.push(moved.clone());
      next
    }) else {
      from.rollback(removed, put_back);
      return Err(Error::NotLoaded);
    };

    match self.ctx.set_following(slug, follow).await {
      Ok(()) => Ok(follow),
      Err(e) => {
        tracing::warn!(slug, follow, error = %e, "follow failed; rolling back");
        to.rollback(added, take_out);
        from.rollback(removed, put_back);
        Err(e)
      }
    }
  }
}
