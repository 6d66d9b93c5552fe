//! Organizations — campus groups that post flyers.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Organization {
  pub id:                   String,
  pub slug:                 String,
  pub name:                 String,
  pub category_slug:        String,
  pub bio:                  Option<String>,
  pub background_image_url: Option<String>,
  pub profile_image_url:    Option<String>,
  pub website_url:          Option<String>,
  pub shoutouts:            u32,
}
