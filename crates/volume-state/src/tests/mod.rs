//! Tests for the state layer against a scripted in-process gateway and an
//! in-memory preferences store.

mod repository;

use std::{
  collections::{HashMap, VecDeque},
  sync::{Arc, Mutex},
};

use chrono::{DateTime, Duration, TimeZone, Utc};
use tokio::sync::oneshot;
use uuid::Uuid;
use volume_core::{
  article::Article,
  error::{Classify, FailureKind},
  flyer::Flyer,
  gateway::Gateway,
  identity::DeviceIdentity,
  magazine::Magazine,
  organization::Organization,
  prefs::PreferencesStore,
  publication::{ContentType, Publication},
  user::{User, WeeklyDebrief},
};
use volume_store_sqlite::SqliteStore;

use crate::Context;

// ─── Fake gateway ────────────────────────────────────────────────────────────

#[derive(Debug, thiserror::Error)]
#[error("{op} failed: {kind}")]
pub struct FakeError {
  op:   &'static str,
  kind: FailureKind,
}

impl Classify for FakeError {
  fn kind(&self) -> FailureKind { self.kind }
}

/// A backend held in memory. Operations can be made to fail by name, and
/// `article_by_id` can be held until the test releases it.
#[derive(Default)]
pub struct FakeGateway {
  pub articles:     Mutex<Vec<Article>>,
  pub publications: Mutex<Vec<Publication>>,
  pub magazines:    Mutex<Vec<Magazine>>,
  pub flyers:       Mutex<Vec<Flyer>>,
  pub users:        Mutex<Vec<User>>,
  failing:          Mutex<HashMap<&'static str, FailureKind>>,
  gates:            Mutex<VecDeque<oneshot::Receiver<()>>>,
  calls:            Mutex<Vec<&'static str>>,
}

impl FakeGateway {
  pub fn fail(&self, op: &'static str, kind: FailureKind) {
    self.failing.lock().unwrap().insert(op, kind);
  }

  pub fn recover(&self, op: &'static str) { self.failing.lock().unwrap().remove(op); }

  /// Hold the next `article_by_id` call until the returned sender fires.
  pub fn gate(&self) -> oneshot::Sender<()> {
    let (tx, rx) = oneshot::channel();
    self.gates.lock().unwrap().push_back(rx);
    tx
  }

  pub fn calls(&self) -> Vec<&'static str> { self.calls.lock().unwrap().clone() }

  pub fn called(&self, op: &'static str) -> bool { self.calls().contains(&op) }

  fn enter(&self, op: &'static str) -> Result<(), FakeError> {
    self.calls.lock().unwrap().push(op);
    match self.failing.lock().unwrap().get(op) {
      Some(&kind) => Err(FakeError { op, kind }),
      None => Ok(()),
    }
  }

  fn articles_where(&self, pred: impl Fn(&Article) -> bool) -> Vec<Article> {
    self
      .articles
      .lock()
      .unwrap()
      .iter()
      .filter(|a| pred(a))
      .cloned()
      .collect()
  }

  fn bump_article(&self, id: &str) -> u32 {
    let mut articles = self.articles.lock().unwrap();
    match articles.iter_mut().find(|a| a.id == id) {
      Some(a) => {
        a.shoutouts += 1;
        a.shoutouts
      }
      None => 0,
    }
  }

  fn follow(&self, slug: &str, user: Uuid, follow: bool) -> User {
    let mut users = self.users.lock().unwrap();
    let index = match users.iter().position(|u| u.uuid == user) {
      Some(i) => i,
      None => {
        users.push(user_with(user, &[]));
        users.len() - 1
      }
    };
    let slugs = &mut users[index].followed_publication_slugs;
    slugs.retain(|s| s != slug);
    if follow {
      slugs.push(slug.to_owned());
    }
    users[index].clone()
  }
}

fn take(list: Vec<Article>, limit: Option<u32>) -> Vec<Article> {
  match limit {
    Some(n) => list.into_iter().take(n as usize).collect(),
    None => list,
  }
}

impl Gateway for FakeGateway {
  type Error = FakeError;

  async fn all_articles(&self, limit: Option<u32>) -> Result<Vec<Article>, FakeError> {
    self.enter("all_articles")?;
    Ok(take(self.articles_where(|_| true), limit))
  }

  async fn trending_articles(&self, limit: Option<u32>) -> Result<Vec<Article>, FakeError> {
    self.enter("trending_articles")?;
    let mut list = self.articles_where(|a| a.trendiness.is_some());
    list.sort_by(|a, b| b.trendiness.partial_cmp(&a.trendiness).unwrap());
    Ok(take(list, limit))
  }

  async fn article_by_id(&self, id: &str) -> Result<Option<Article>, FakeError> {
    let gate = self.gates.lock().unwrap().pop_front();
    if let Some(gate) = gate {
      let _ = gate.await;
    }
    self.enter("article_by_id")?;
    Ok(self.articles_where(|a| a.id == id).into_iter().next())
  }

  async fn articles_by_ids(&self, ids: &[String]) -> Result<Vec<Article>, FakeError> {
    self.enter("articles_by_ids")?;
    // Backend order, not request order.
    Ok(self.articles_where(|a| ids.contains(&a.id)))
  }

  async fn articles_by_publication_slug(
    &self,
    slug: &str,
    limit: Option<u32>,
  ) -> Result<Vec<Article>, FakeError> {
    self.enter("articles_by_publication_slug")?;
    Ok(take(self.articles_where(|a| a.publication_slug == slug), limit))
  }

  async fn articles_by_publication_slugs(
    &self,
    slugs: &[String],
    limit: Option<u32>,
  ) -> Result<Vec<Article>, FakeError> {
    self.enter("articles_by_publication_slugs")?;
    Ok(take(self.articles_where(|a| slugs.contains(&a.publication_slug)), limit))
  }

  async fn shuffled_articles_by_publication_slugs(
    &self,
    slugs: &[String],
    limit: Option<u32>,
  ) -> Result<Vec<Article>, FakeError> {
    self.enter("shuffled_articles_by_publication_slugs")?;
    Ok(take(self.articles_where(|a| slugs.contains(&a.publication_slug)), limit))
  }

  async fn search_articles(&self, query: &str, limit: Option<u32>) -> Result<Vec<Article>, FakeError> {
    self.enter("search_articles")?;
    let query = query.to_lowercase();
    Ok(take(self.articles_where(|a| a.title.to_lowercase().contains(&query)), limit))
  }

  async fn increment_shoutouts(&self, id: &str, _user: Uuid) -> Result<u32, FakeError> {
    self.enter("increment_shoutouts")?;
    Ok(self.bump_article(id))
  }

  async fn bookmark_article(&self, _user: Uuid) -> Result<(), FakeError> {
    self.enter("bookmark_article")
  }

  async fn all_publications(&self) -> Result<Vec<Publication>, FakeError> {
    self.enter("all_publications")?;
    Ok(self.publications.lock().unwrap().clone())
  }

  async fn publication_by_slug(&self, slug: &str) -> Result<Option<Publication>, FakeError> {
    self.enter("publication_by_slug")?;
    Ok(self.publications.lock().unwrap().iter().find(|p| p.slug == slug).cloned())
  }

  async fn follow_publication(&self, slug: &str, user: Uuid) -> Result<User, FakeError> {
    self.enter("follow_publication")?;
    Ok(self.follow(slug, user, true))
  }

  async fn unfollow_publication(&self, slug: &str, user: Uuid) -> Result<User, FakeError> {
    self.enter("unfollow_publication")?;
    Ok(self.follow(slug, user, false))
  }

  async fn all_magazines(&self, limit: Option<u32>) -> Result<Vec<Magazine>, FakeError> {
    self.enter("all_magazines")?;
    let list = self.magazines.lock().unwrap().clone();
    Ok(list.into_iter().take(limit.unwrap_or(u32::MAX) as usize).collect())
  }

  async fn featured_magazines(&self, limit: Option<u32>) -> Result<Vec<Magazine>, FakeError> {
    self.enter("featured_magazines")?;
    let list = self.magazines.lock().unwrap().clone();
    Ok(list.into_iter().take(limit.unwrap_or(u32::MAX) as usize).collect())
  }

  async fn magazine_by_id(&self, id: &str) -> Result<Option<Magazine>, FakeError> {
    self.enter("magazine_by_id")?;
    Ok(self.magazines.lock().unwrap().iter().find(|m| m.id == id).cloned())
  }

  async fn increment_magazine_shoutouts(&self, id: &str, _user: Uuid) -> Result<u32, FakeError> {
    self.enter("increment_magazine_shoutouts")?;
    let mut magazines = self.magazines.lock().unwrap();
    Ok(match magazines.iter_mut().find(|m| m.id == id) {
      Some(m) => {
        m.shoutouts += 1;
        m.shoutouts
      }
      None => 0,
    })
  }

  async fn all_organizations(&self) -> Result<Vec<Organization>, FakeError> {
    self.enter("all_organizations")?;
    Ok(vec![organization("acsu", "academic")])
  }

  async fn flyers_after_date(&self, since: DateTime<Utc>) -> Result<Vec<Flyer>, FakeError> {
    self.enter("flyers_after_date")?;
    let list = self.flyers.lock().unwrap().clone();
    Ok(list.into_iter().filter(|f| f.end > since).collect())
  }

  async fn flyers_before_date(
    &self,
    before: DateTime<Utc>,
    limit: Option<u32>,
  ) -> Result<Vec<Flyer>, FakeError> {
    self.enter("flyers_before_date")?;
    let list = self.flyers.lock().unwrap().clone();
    Ok(
      list
        .into_iter()
        .filter(|f| f.end < before)
        .take(limit.unwrap_or(u32::MAX) as usize)
        .collect(),
    )
  }

  async fn trending_flyers(&self, limit: Option<u32>) -> Result<Vec<Flyer>, FakeError> {
    self.enter("trending_flyers")?;
    let list = self.flyers.lock().unwrap().clone();
    Ok(
      list
        .into_iter()
        .filter(|f| f.trendiness.is_some())
        .take(limit.unwrap_or(u32::MAX) as usize)
        .collect(),
    )
  }

  async fn create_user(&self, followed_slugs: &[String], _device_token: &str) -> Result<User, FakeError> {
    self.enter("create_user")?;
    let user = User {
      uuid:                       Uuid::new_v4(),
      followed_publication_slugs: followed_slugs.to_vec(),
      weekly_debrief:             None,
    };
    self.users.lock().unwrap().push(user.clone());
    Ok(user)
  }

  async fn user_by_uuid(&self, user: Uuid) -> Result<Option<User>, FakeError> {
    self.enter("user_by_uuid")?;
    Ok(self.users.lock().unwrap().iter().find(|u| u.uuid == user).cloned())
  }
}

// ─── Fixtures ────────────────────────────────────────────────────────────────

pub type TestContext = Arc<Context<FakeGateway, SqliteStore>>;

pub async fn context(gateway: FakeGateway) -> TestContext {
  let prefs = SqliteStore::open_in_memory()
    .await
    .expect("in-memory store");
  Context::new(gateway, prefs)
}

/// A context whose device is already registered as `user`.
pub async fn registered(gateway: FakeGateway, user: Uuid) -> TestContext {
  gateway.users.lock().unwrap().push(user_with(user, &[]));
  let ctx = context(gateway).await;
  ctx
    .prefs
    .save_identity(&DeviceIdentity {
      device_token: "device".into(),
      user_uuid:    user,
    })
    .await
    .unwrap();
  ctx
}

pub fn at(day: u32, hour: u32) -> DateTime<Utc> {
  Utc.with_ymd_and_hms(2023, 4, day, hour, 0, 0).unwrap()
}

pub fn publication(slug: &str) -> Publication {
  Publication {
    id:                   format!("pub-{slug}"),
    slug:                 slug.into(),
    name:                 slug.replace('-', " "),
    bio:                  String::new(),
    bio_short:            String::new(),
    background_image_url: None,
    profile_image_url:    None,
    rss_name:             slug.into(),
    rss_url:              format!("https://example.com/{slug}.rss"),
    website_url:          None,
    content_types:        vec![ContentType::Articles],
    shoutouts:            0,
    num_articles:         0,
    socials:              vec![],
    most_recent_article:  None,
  }
}

pub fn article(id: &str, slug: &str) -> Article {
  Article {
    id:               id.into(),
    title:            format!("Article {id}"),
    article_url:      format!("https://example.com/a/{id}"),
    image_url:        None,
    publication:      publication(slug),
    publication_slug: slug.into(),
    date:             at(1, 12),
    shoutouts:        0,
    nsfw:             false,
    trendiness:       None,
  }
}

pub fn magazine(id: &str) -> Magazine {
  Magazine {
    id:               id.into(),
    title:            format!("Magazine {id}"),
    publication_slug: "slope-media".into(),
    publication:      None,
    date:             at(1, 12),
    semester:         "sp23".into(),
    pdf_url:          format!("https://example.com/m/{id}.pdf"),
    image_url:        None,
    shoutouts:        0,
    nsfw:             false,
    trendiness:       None,
  }
}

pub fn organization(slug: &str, category: &str) -> Organization {
  Organization {
    id:                   format!("org-{slug}"),
    slug:                 slug.into(),
    name:                 slug.to_uppercase(),
    category_slug:        category.into(),
    bio:                  None,
    background_image_url: None,
    profile_image_url:    None,
    website_url:          None,
    shoutouts:            0,
  }
}

pub fn flyer(id: &str, category: &str, end: DateTime<Utc>) -> Flyer {
  Flyer {
    id:            id.into(),
    title:         format!("Flyer {id}"),
    organizations: vec![organization("acsu", category)],
    location:      "Duffield".into(),
    flyer_url:     None,
    image_url:     None,
    category_slug: category.into(),
    trendiness:    None,
    start:         end - Duration::hours(2),
    end,
  }
}

pub fn user_with(uuid: Uuid, slugs: &[&str]) -> User {
  User {
    uuid,
    followed_publication_slugs: slugs.iter().map(|s| s.to_string()).collect(),
    weekly_debrief: None,
  }
}

pub fn debrief() -> WeeklyDebrief {
  WeeklyDebrief {
    creation_date:           at(3, 0),
    expiration_date:         at(10, 0),
    num_shoutouts:           4,
    num_bookmarked_articles: 2,
    num_read_articles:       9,
    num_read_magazines:      1,
    num_creations:           3,
    read_articles:           vec![],
    random_articles:         vec![],
  }
}
