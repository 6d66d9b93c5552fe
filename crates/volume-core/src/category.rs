//! Flyer categories.
//!
//! Organizations are grouped under a fixed set of category slugs; this table
//! maps them to display names and is read-only.

/// `(slug, display name)` for every category, in display order.
pub const CATEGORIES: &[(&str, &str)] = &[
  ("academic", "Academic"),
  ("art", "Art"),
  ("awareness", "Awareness"),
  ("comedy", "Comedy"),
  ("cultural", "Cultural"),
  ("dance", "Dance"),
  ("foodDrinks", "Food & Drinks"),
  ("greek", "Greek"),
  ("music", "Music"),
  ("political", "Political"),
  ("religious", "Religious"),
  ("spiritual", "Spiritual"),
  ("sports", "Sports"),
  ("techEngineering", "Tech & Engineering"),
];

pub fn display_name(slug: &str) -> Option<&'static str> {
  CATEGORIES
    .iter()
    .find(|(s, _)| *s == slug)
    .map(|(_, name)| *name)
}

pub fn is_known(slug: &str) -> bool { display_name(slug).is_some() }
