//! Magazines — PDF issues published by a publication.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::publication::Publication;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Magazine {
  pub id:               String,
  pub title:            String,
  pub publication_slug: String,
  pub publication:      Option<Publication>,
  pub date:             DateTime<Utc>,
  /// Academic term label, e.g. `"fa22"`.
  pub semester:         String,
  pub pdf_url:          String,
  pub image_url:        Option<String>,
  pub shoutouts:        u32,
  pub nsfw:             bool,
  pub trendiness:       Option<f64>,
}

impl Magazine {
  pub fn with_shoutouts(&self, shoutouts: u32) -> Self {
    Self {
      shoutouts,
      ..self.clone()
    }
  }
}
