//! Plain-text rendering of domain values for the terminal.

use chrono::{DateTime, Utc};
use volume_core::{
  RetrievalState,
  article::Article,
  category,
  flyer::Flyer,
  magazine::Magazine,
  publication::Publication,
  user::WeeklyDebrief,
};

fn date(dt: DateTime<Utc>) -> String { dt.format("%b %-d, %Y").to_string() }

fn plural(n: u32, one: &str, many: &str) -> String {
  if n == 1 {
    format!("{n} {one}")
  } else {
    format!("{n} {many}")
  }
}

pub fn article(a: &Article) -> String {
  let nsfw = if a.nsfw { " [nsfw]" } else { "" };
  format!(
    "{id}  {title}{nsfw}\n    {publication} · {date} · {shoutouts}",
    id = a.id,
    title = a.title,
    publication = a.publication.name,
    date = date(a.date),
    shoutouts = plural(a.shoutouts, "shoutout", "shoutouts"),
  )
}

pub fn publication(p: &Publication) -> String {
  let mut out = format!(
    "{slug}  {name}\n    {bio}\n    {articles} · {shoutouts}",
    slug = p.slug,
    name = p.name,
    bio = p.bio_short,
    articles = plural(p.num_articles, "article", "articles"),
    shoutouts = plural(p.shoutouts, "shoutout", "shoutouts"),
  );
  for s in &p.socials {
    out.push_str(&format!("\n    {}: {}", s.display_name().unwrap_or(s.platform.as_str()), s.url));
  }
  out
}

pub fn magazine(m: &Magazine) -> String {
  format!(
    "{id}  {title} ({semester})\n    {slug} · {shoutouts}",
    id = m.id,
    title = m.title,
    semester = m.semester,
    slug = m.publication_slug,
    shoutouts = plural(m.shoutouts, "shoutout", "shoutouts"),
  )
}

pub fn flyer(f: &Flyer) -> String {
  let category = category::display_name(&f.category_slug).unwrap_or(f.category_slug.as_str());
  format!(
    "{title}  [{category}]\n    {orgs} · {location} · {start} – {end}",
    title = f.title,
    orgs = f.organization_names().join(", "),
    location = f.location,
    start = f.start.format("%b %-d %H:%M"),
    end = f.end.format("%H:%M"),
  )
}

pub fn debrief(d: &WeeklyDebrief, now: DateTime<Utc>) -> String {
  let mut out = format!(
    "Weekly debrief ({from} to {to}){expired}\n  {read} read, {mags} read, {shoutouts} given, {bookmarks} saved",
    from = date(d.creation_date),
    to = date(d.expiration_date),
    expired = if d.is_expired(now) { " [expired]" } else { "" },
    read = plural(d.num_read_articles, "article", "articles"),
    mags = plural(d.num_read_magazines, "magazine", "magazines"),
    shoutouts = plural(d.num_shoutouts, "shoutout", "shoutouts"),
    bookmarks = plural(d.num_bookmarked_articles, "article", "articles"),
  );
  for a in d.read_articles.iter().chain(&d.random_articles) {
    out.push_str(&format!("\n  - {}", a.title));
  }
  out
}

/// The list under `heading`, or the field's error message in its place.
pub fn section<T>(heading: &str, state: &RetrievalState<Vec<T>>, item: impl Fn(&T) -> String) -> String {
  let body = match state {
    RetrievalState::Success(items) if items.is_empty() => "  (nothing here)".to_owned(),
    RetrievalState::Success(items) => items
      .iter()
      .map(|i| format!("  {}", item(i).replace('\n', "\n  ")))
      .collect::<Vec<_>>()
      .join("\n"),
    RetrievalState::Error(message) => format!("  ! {message}"),
    RetrievalState::Empty | RetrievalState::Loading => format!("  ({})", state.label()),
  };
  format!("── {heading} ──\n{body}")
}

#[cfg(test)]
mod tests {
  use chrono::TimeZone;
  use volume_core::{organization::Organization, publication::ContentType, social::Social};

  use super::*;

  fn publication_fixture() -> Publication {
    Publication {
      id:                   "p1".into(),
      slug:                 "cornell-daily-sun".into(),
      name:                 "The Cornell Daily Sun".into(),
      bio:                  String::new(),
      bio_short:            "Independent since 1880".into(),
      background_image_url: None,
      profile_image_url:    None,
      rss_name:             "sun".into(),
      rss_url:              "https://cornellsun.com/feed".into(),
      website_url:          None,
      content_types:        vec![ContentType::Articles],
      shoutouts:            1,
      num_articles:         12,
      socials:              vec![Social {
        platform: "insta".into(),
        url:      "https://instagram.com/cornellsun".into(),
      }],
      most_recent_article:  None,
    }
  }

  #[test]
  fn article_line_shows_counts() {
    let a = Article {
      id:               "42".into(),
      title:            "Slope Day".into(),
      article_url:      "https://cornellsun.com/slope-day".into(),
      image_url:        None,
      publication:      publication_fixture(),
      publication_slug: "cornell-daily-sun".into(),
      date:             Utc.with_ymd_and_hms(2023, 5, 3, 12, 0, 0).unwrap(),
      shoutouts:        1,
      nsfw:             false,
      trendiness:       None,
    };
    assert_eq!(
      article(&a),
      "42  Slope Day\n    The Cornell Daily Sun · May 3, 2023 · 1 shoutout"
    );
  }

  #[test]
  fn publication_lists_socials_by_display_name() {
    let out = publication(&publication_fixture());
    assert!(out.contains("Instagram: https://instagram.com/cornellsun"));
    assert!(out.contains("12 articles"));
  }

  #[test]
  fn flyer_uses_category_display_name() {
    let end = Utc.with_ymd_and_hms(2023, 4, 10, 20, 0, 0).unwrap();
    let f = Flyer {
      id:            "f1".into(),
      title:         "Open mic".into(),
      organizations: vec![Organization {
        id:                   "o1".into(),
        slug:                 "acsu".into(),
        name:                 "ACSU".into(),
        category_slug:        "academic".into(),
        bio:                  None,
        background_image_url: None,
        profile_image_url:    None,
        website_url:          None,
        shoutouts:            0,
      }],
      location:      "Willard Straight".into(),
      flyer_url:     None,
      image_url:     None,
      category_slug: "academic".into(),
      trendiness:    None,
      start:         end - chrono::Duration::hours(2),
      end,
    };
    let out = flyer(&f);
    assert!(out.starts_with("Open mic  [Academic]"));
    assert!(out.contains("ACSU · Willard Straight"));
  }

  #[test]
  fn section_shows_error_message_instead_of_items() {
    let state: RetrievalState<Vec<u32>> = RetrievalState::Error("Unable to load".into());
    assert_eq!(section("Trending", &state, |n| n.to_string()), "── Trending ──\n  ! Unable to load");
  }

  #[test]
  fn section_marks_empty_lists() {
    let state: RetrievalState<Vec<u32>> = RetrievalState::Success(vec![]);
    assert!(section("Saved", &state, |n| n.to_string()).ends_with("(nothing here)"));
  }
}
