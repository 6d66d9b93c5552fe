//! Articles — the primary unit of content in the feed.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::publication::Publication;

/// An article as returned by the backend.
///
/// Articles are never updated in place: a new shoutout count arrives either by
/// re-fetching or through [`Article::with_shoutouts`], which builds a
/// replacement value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Article {
  pub id:               String,
  pub title:            String,
  pub article_url:      String,
  pub image_url:        Option<String>,
  /// Snapshot of the owning publication, duplicated inline by the query.
  pub publication:      Publication,
  pub publication_slug: String,
  pub date:             DateTime<Utc>,
  pub shoutouts:        u32,
  pub nsfw:             bool,
  pub trendiness:       Option<f64>,
}

impl Article {
  /// A copy of this article carrying a different shoutout count.
  pub fn with_shoutouts(&self, shoutouts: u32) -> Self {
    Self {
      shoutouts,
      ..self.clone()
    }
  }

  /// Whether the image should be blurred before display.
  pub fn hides_image(&self) -> bool { self.nsfw && self.image_url.is_some() }
}
