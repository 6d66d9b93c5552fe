//! Publications — the student outlets that own articles and magazines.

use serde::{Deserialize, Serialize};

use crate::{article::Article, social::Social};

/// The kind of content a publication produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentType {
  Articles,
  Magazines,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Publication {
  pub id:                   String,
  pub slug:                 String,
  pub name:                 String,
  pub bio:                  String,
  pub bio_short:            String,
  pub background_image_url: Option<String>,
  pub profile_image_url:    Option<String>,
  pub rss_name:             String,
  pub rss_url:              String,
  pub website_url:          Option<String>,
  pub content_types:        Vec<ContentType>,
  pub shoutouts:            u32,
  pub num_articles:         u32,
  pub socials:              Vec<Social>,
  /// Absent until a query that selects it has been made.
  pub most_recent_article:  Option<Box<Article>>,
}

impl Publication {
  pub fn publishes(&self, kind: ContentType) -> bool {
    self.content_types.contains(&kind)
  }
}
