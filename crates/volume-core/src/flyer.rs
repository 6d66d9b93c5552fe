//! Flyers — time-bounded event announcements posted by organizations.
//!
//! The backend sends start and end times as ISO-8601 strings; they are parsed
//! once, when the [`Flyer`] is built, so an unparseable timestamp is rejected
//! up front instead of surfacing later during sorting.

use std::cmp::Ordering;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{Error, Result, organization::Organization};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Flyer {
  pub id:            String,
  pub title:         String,
  pub organizations: Vec<Organization>,
  pub location:      String,
  pub flyer_url:     Option<String>,
  pub image_url:     Option<String>,
  pub category_slug: String,
  pub trendiness:    Option<f64>,
  pub start:         DateTime<Utc>,
  pub end:           DateTime<Utc>,
}

/// Everything needed to build a [`Flyer`], with timestamps still unparsed.
#[derive(Debug, Clone)]
pub struct NewFlyer {
  pub id:            String,
  pub title:         String,
  pub organizations: Vec<Organization>,
  pub location:      String,
  pub flyer_url:     Option<String>,
  pub image_url:     Option<String>,
  pub category_slug: String,
  pub trendiness:    Option<f64>,
  pub start_date:    String,
  pub end_date:      String,
}

impl Flyer {
  pub fn new(input: NewFlyer) -> Result<Self> {
    let start = parse_iso8601("startDate", &input.start_date)?;
    let end = parse_iso8601("endDate", &input.end_date)?;
    Ok(Self {
      id: input.id,
      title: input.title,
      organizations: input.organizations,
      location: input.location,
      flyer_url: input.flyer_url,
      image_url: input.image_url,
      category_slug: input.category_slug,
      trendiness: input.trendiness,
      start,
      end,
    })
  }

  /// Order by end time; earlier-ending flyers sort first.
  ///
  /// Use with `sort_by(Flyer::by_end)`.
  pub fn by_end(a: &Flyer, b: &Flyer) -> Ordering { a.end.cmp(&b.end) }

  /// Whether the event has not finished yet at `now`.
  pub fn is_upcoming(&self, now: DateTime<Utc>) -> bool { self.end > now }

  pub fn organization_names(&self) -> Vec<&str> {
    self.organizations.iter().map(|o| o.name.as_str()).collect()
  }
}

/// Parse an RFC 3339 timestamp, accepting the backend's trailing-`Z` and
/// offset forms alike.
pub fn parse_iso8601(field: &'static str, value: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(value)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::InvalidTimestamp {
      field,
      value: value.to_owned(),
      reason: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
  use super::*;

  fn new_flyer(id: &str, start: &str, end: &str) -> NewFlyer {
    NewFlyer {
      id:            id.into(),
      title:         format!("Flyer {id}"),
      organizations: vec![],
      location:      "Willard Straight Hall".into(),
      flyer_url:     None,
      image_url:     None,
      category_slug: "music".into(),
      trendiness:    None,
      start_date:    start.into(),
      end_date:      end.into(),
    }
  }

  #[test]
  fn parses_timestamps_at_construction() {
    let f = Flyer::new(new_flyer(
      "a",
      "2023-03-01T18:00:00Z",
      "2023-03-01T20:30:00-05:00",
    ))
    .unwrap();
    assert_eq!(f.start.to_rfc3339(), "2023-03-01T18:00:00+00:00");
    assert_eq!(f.end.to_rfc3339(), "2023-03-02T01:30:00+00:00");
  }

  #[test]
  fn invalid_timestamp_is_rejected() {
    let err = Flyer::new(new_flyer("a", "yesterday", "2023-03-01T20:00:00Z"))
      .unwrap_err();
    assert!(matches!(
      err,
      Error::InvalidTimestamp { field: "startDate", .. }
    ));
  }

  #[test]
  fn orders_by_end_time() {
    let early = Flyer::new(new_flyer(
      "early",
      "2023-03-05T10:00:00Z",
      "2023-03-05T11:00:00Z",
    ))
    .unwrap();
    let late = Flyer::new(new_flyer(
      "late",
      "2023-03-01T10:00:00Z",
      "2023-03-09T11:00:00Z",
    ))
    .unwrap();
    let tie = Flyer::new(new_flyer(
      "tie",
      "2023-03-04T10:00:00Z",
      "2023-03-05T11:00:00Z",
    ))
    .unwrap();

    assert_eq!(Flyer::by_end(&early, &late), Ordering::Less);
    assert_eq!(Flyer::by_end(&late, &early), Ordering::Greater);
    // Equal end times never compare as strictly less.
    assert_eq!(Flyer::by_end(&early, &tie), Ordering::Equal);

    let mut flyers = vec![late.clone(), early.clone()];
    flyers.sort_by(Flyer::by_end);
    assert_eq!(flyers[0].id, "early");
    assert_eq!(flyers[1].id, "late");
  }
}
