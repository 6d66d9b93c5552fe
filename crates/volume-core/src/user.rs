//! Users and their weekly debrief.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::article::Article;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
  pub uuid:                       Uuid,
  pub followed_publication_slugs: Vec<String>,
  pub weekly_debrief:             Option<WeeklyDebrief>,
}

/// A once-a-week summary of the user's reading activity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeeklyDebrief {
  pub creation_date:           DateTime<Utc>,
  pub expiration_date:         DateTime<Utc>,
  pub num_shoutouts:           u32,
  pub num_bookmarked_articles: u32,
  pub num_read_articles:       u32,
  pub num_read_magazines:      u32,
  pub num_creations:           u32,
  pub read_articles:           Vec<Article>,
  pub random_articles:         Vec<Article>,
}

impl WeeklyDebrief {
  pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
    now >= self.expiration_date
  }
}

#[cfg(test)]
mod tests {
  use chrono::{Duration, TimeZone};

  use super::*;

  fn debrief(expires: DateTime<Utc>) -> WeeklyDebrief {
    WeeklyDebrief {
      creation_date:           expires - Duration::days(7),
      expiration_date:         expires,
      num_shoutouts:           3,
      num_bookmarked_articles: 1,
      num_read_articles:       12,
      num_read_magazines:      0,
      num_creations:           2,
      read_articles:           vec![],
      random_articles:         vec![],
    }
  }

  #[test]
  fn expires_at_expiration_date() {
    let expires = Utc.with_ymd_and_hms(2023, 4, 10, 0, 0, 0).unwrap();
    let d = debrief(expires);
    assert!(!d.is_expired(expires - Duration::seconds(1)));
    assert!(d.is_expired(expires));
  }
}
