//! Wire shapes returned by the backend and their conversion into domain
//! models.
//!
//! Field names follow the backend's camelCase, with its `URL`/`ID`
//! capitalisation renamed explicitly. Timestamps arrive as ISO-8601 strings
//! and are parsed here; a malformed timestamp fails the whole response.

use serde::Deserialize;
use uuid::Uuid;
use volume_core::{
  article::Article,
  flyer::{Flyer, NewFlyer, parse_iso8601},
  magazine::Magazine,
  organization::Organization,
  publication::{ContentType, Publication},
  social::Social,
  user::{User, WeeklyDebrief},
};

use crate::Result;

// ─── Publication ─────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct RawSocial {
  pub social: String,
  #[serde(rename = "URL")]
  pub url:    String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawPublication {
  pub id:                   String,
  pub slug:                 String,
  pub name:                 String,
  #[serde(default)]
  pub bio:                  String,
  #[serde(default)]
  pub bio_short:            String,
  #[serde(rename = "backgroundImageURL")]
  pub background_image_url: Option<String>,
  #[serde(rename = "profileImageURL")]
  pub profile_image_url:    Option<String>,
  #[serde(default)]
  pub rss_name:             String,
  #[serde(rename = "rssURL", default)]
  pub rss_url:              String,
  #[serde(rename = "websiteURL")]
  pub website_url:          Option<String>,
  #[serde(default)]
  pub content_types:        Vec<ContentType>,
  #[serde(default)]
  pub shoutouts:            f64,
  #[serde(default)]
  pub num_articles:         f64,
  #[serde(default)]
  pub socials:              Vec<RawSocial>,
  #[serde(default)]
  pub most_recent_article:  Option<Box<RawArticle>>,
}

impl RawPublication {
  pub fn into_publication(self) -> Result<Publication> {
    let most_recent_article = self
      .most_recent_article
      .map(|a| a.into_article().map(Box::new))
      .transpose()?;
    Ok(Publication {
      id: self.id,
      slug: self.slug,
      name: self.name,
      bio: self.bio,
      bio_short: self.bio_short,
      background_image_url: self.background_image_url,
      profile_image_url: self.profile_image_url,
      rss_name: self.rss_name,
      rss_url: self.rss_url,
      website_url: self.website_url,
      content_types: self.content_types,
      shoutouts: count(self.shoutouts),
      num_articles: count(self.num_articles),
      socials: self
        .socials
        .into_iter()
        .map(|s| Social {
          platform: s.social,
          url:      s.url,
        })
        .collect(),
      most_recent_article,
    })
  }
}

// ─── Article ─────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawArticle {
  pub id:               String,
  pub title:            String,
  #[serde(rename = "articleURL")]
  pub article_url:      String,
  #[serde(rename = "imageURL")]
  pub image_url:        Option<String>,
  pub date:             String,
  #[serde(default)]
  pub nsfw:             bool,
  #[serde(default)]
  pub shoutouts:        f64,
  pub trendiness:       Option<f64>,
  pub publication_slug: String,
  pub publication:      RawPublication,
}

impl RawArticle {
  pub fn into_article(self) -> Result<Article> {
    Ok(Article {
      date: parse_iso8601("date", &self.date)?,
      id: self.id,
      title: self.title,
      article_url: self.article_url,
      image_url: non_empty(self.image_url),
      publication: self.publication.into_publication()?,
      publication_slug: self.publication_slug,
      shoutouts: count(self.shoutouts),
      nsfw: self.nsfw,
      trendiness: self.trendiness,
    })
  }
}

/// `incrementShoutouts` and `incrementMagazineShoutouts` select only the count.
#[derive(Debug, Deserialize)]
pub struct RawShoutouts {
  pub shoutouts: f64,
}

impl RawShoutouts {
  pub fn count(&self) -> u32 { count(self.shoutouts) }
}

// ─── Magazine ────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawMagazine {
  pub id:               String,
  pub title:            String,
  pub date:             String,
  #[serde(default)]
  pub semester:         String,
  #[serde(rename = "pdfURL")]
  pub pdf_url:          String,
  #[serde(rename = "imageURL")]
  pub image_url:        Option<String>,
  #[serde(default)]
  pub nsfw:             bool,
  #[serde(default)]
  pub shoutouts:        f64,
  pub trendiness:       Option<f64>,
  pub publication_slug: String,
  pub publication:      Option<RawPublication>,
}

impl RawMagazine {
  pub fn into_magazine(self) -> Result<Magazine> {
    Ok(Magazine {
      date: parse_iso8601("date", &self.date)?,
      id: self.id,
      title: self.title,
      publication_slug: self.publication_slug,
      publication: self
        .publication
        .map(RawPublication::into_publication)
        .transpose()?,
      semester: self.semester,
      pdf_url: self.pdf_url,
      image_url: non_empty(self.image_url),
      shoutouts: count(self.shoutouts),
      nsfw: self.nsfw,
      trendiness: self.trendiness,
    })
  }
}

// ─── Organization & flyer ────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawOrganization {
  pub id:                   String,
  pub slug:                 String,
  pub name:                 String,
  #[serde(default)]
  pub category_slug:        String,
  pub bio:                  Option<String>,
  #[serde(rename = "backgroundImageURL")]
  pub background_image_url: Option<String>,
  #[serde(rename = "profileImageURL")]
  pub profile_image_url:    Option<String>,
  #[serde(rename = "websiteURL")]
  pub website_url:          Option<String>,
  #[serde(default)]
  pub shoutouts:            f64,
}

impl RawOrganization {
  pub fn into_organization(self) -> Organization {
    Organization {
      id:                   self.id,
      slug:                 self.slug,
      name:                 self.name,
      category_slug:        self.category_slug,
      bio:                  self.bio,
      background_image_url: self.background_image_url,
      profile_image_url:    self.profile_image_url,
      website_url:          self.website_url,
      shoutouts:            count(self.shoutouts),
    }
  }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawFlyer {
  pub id:            String,
  pub title:         String,
  pub start_date:    String,
  pub end_date:      String,
  #[serde(default)]
  pub location:      String,
  #[serde(rename = "flyerURL")]
  pub flyer_url:     Option<String>,
  #[serde(rename = "imageURL")]
  pub image_url:     Option<String>,
  #[serde(default)]
  pub category_slug: String,
  pub trendiness:    Option<f64>,
  #[serde(default)]
  pub organizations: Vec<RawOrganization>,
}

impl RawFlyer {
  pub fn into_flyer(self) -> Result<Flyer> {
    Ok(Flyer::new(NewFlyer {
      id:            self.id,
      title:         self.title,
      organizations: self
        .organizations
        .into_iter()
        .map(RawOrganization::into_organization)
        .collect(),
      location:      self.location,
      flyer_url:     non_empty(self.flyer_url),
      image_url:     non_empty(self.image_url),
      category_slug: self.category_slug,
      trendiness:    self.trendiness,
      start_date:    self.start_date,
      end_date:      self.end_date,
    })?)
  }
}

// ─── User ────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawWeeklyDebrief {
  pub creation_date:           String,
  pub expiration_date:         String,
  #[serde(default)]
  pub num_shoutouts:           f64,
  #[serde(default)]
  pub num_bookmarked_articles: f64,
  #[serde(default)]
  pub num_read_articles:       f64,
  #[serde(default)]
  pub num_read_magazines:      f64,
  #[serde(default)]
  pub num_creations:           f64,
  #[serde(default)]
  pub read_articles:           Vec<RawArticle>,
  #[serde(default)]
  pub random_articles:         Vec<RawArticle>,
}

impl RawWeeklyDebrief {
  pub fn into_debrief(self) -> Result<WeeklyDebrief> {
    Ok(WeeklyDebrief {
      creation_date:           parse_iso8601("creationDate", &self.creation_date)?,
      expiration_date:         parse_iso8601("expirationDate", &self.expiration_date)?,
      num_shoutouts:           count(self.num_shoutouts),
      num_bookmarked_articles: count(self.num_bookmarked_articles),
      num_read_articles:       count(self.num_read_articles),
      num_read_magazines:      count(self.num_read_magazines),
      num_creations:           count(self.num_creations),
      read_articles:           articles(self.read_articles)?,
      random_articles:         articles(self.random_articles)?,
    })
  }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawUser {
  pub uuid:                       Uuid,
  #[serde(default)]
  pub followed_publication_slugs: Vec<String>,
  #[serde(default)]
  pub weekly_debrief:             Option<RawWeeklyDebrief>,
}

impl RawUser {
  pub fn into_user(self) -> Result<User> {
    Ok(User {
      uuid:                       self.uuid,
      followed_publication_slugs: self.followed_publication_slugs,
      weekly_debrief:             self
        .weekly_debrief
        .map(RawWeeklyDebrief::into_debrief)
        .transpose()?,
    })
  }
}

// ─── Helpers ─────────────────────────────────────────────────────────────────

pub fn articles(raw: Vec<RawArticle>) -> Result<Vec<Article>> {
  raw.into_iter().map(RawArticle::into_article).collect()
}

pub fn magazines(raw: Vec<RawMagazine>) -> Result<Vec<Magazine>> {
  raw.into_iter().map(RawMagazine::into_magazine).collect()
}

pub fn flyers(raw: Vec<RawFlyer>) -> Result<Vec<Flyer>> {
  raw.into_iter().map(RawFlyer::into_flyer).collect()
}

pub fn publications(raw: Vec<RawPublication>) -> Result<Vec<Publication>> {
  raw.into_iter().map(RawPublication::into_publication).collect()
}

/// GraphQL `Float` counters are whole numbers in practice; clamp anything else.
fn count(v: f64) -> u32 {
  if v.is_finite() && v > 0.0 {
    v.min(u32::MAX as f64) as u32
  } else {
    0
  }
}

/// The backend sends `""` for a missing image or link.
fn non_empty(s: Option<String>) -> Option<String> { s.filter(|s| !s.is_empty()) }
