//! [`GraphQlGateway`] — the reqwest implementation of [`Gateway`].

use chrono::{DateTime, SecondsFormat, Utc};
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde_json::json;
use uuid::Uuid;
use volume_core::{
  article::Article,
  flyer::Flyer,
  gateway::Gateway,
  magazine::Magazine,
  organization::Organization,
  publication::Publication,
  user::User,
};

use crate::{
  Error, Result,
  config::GatewayConfig,
  envelope::{GraphQlRequest, GraphQlResponse, Rooted},
  queries::{self, Operation},
  wire::{self, RawArticle, RawMagazine, RawOrganization, RawPublication, RawShoutouts, RawUser},
};

/// Async GraphQL client for the Volume backend.
///
/// Cheap to clone: the inner [`reqwest::Client`] is `Arc`-based, so one
/// instance can be shared by every concurrent fetch in the process.
#[derive(Clone)]
pub struct GraphQlGateway {
  client: Client,
  config: GatewayConfig,
}

impl GraphQlGateway {
  pub fn new(config: GatewayConfig) -> Result<Self> {
    let client = Client::builder()
      .connect_timeout(config.timeout)
      .read_timeout(config.timeout)
      .build()
      .map_err(Error::Client)?;
    Ok(Self { client, config })
  }

  pub fn config(&self) -> &GatewayConfig { &self.config }

  /// Send one operation and return the raw envelope.
  ///
  /// Fails only on transport and protocol problems (timeouts, non-2xx status,
  /// an unparseable body). GraphQL `errors` are left in the envelope.
  pub async fn execute<T: DeserializeOwned>(
    &self,
    operation: Operation,
    variables: serde_json::Value,
  ) -> Result<GraphQlResponse<T>> {
    tracing::debug!(operation = operation.name, "sending GraphQL request");

    let body = GraphQlRequest {
      query: operation.document,
      operation_name: operation.name,
      variables,
    };
    let resp = self
      .client
      .post(&self.config.endpoint)
      .json(&body)
      .send()
      .await
      .map_err(Error::from_transport)?;

    let status = resp.status();
    if !status.is_success() {
      return Err(Error::Status {
        operation: operation.name,
        status:    status.as_u16(),
      });
    }

    let bytes = resp.bytes().await.map_err(Error::from_transport)?;
    Ok(serde_json::from_slice(&bytes)?)
  }

  /// Send one operation and unwrap its aliased `result` root field.
  async fn fetch<T: DeserializeOwned>(
    &self,
    operation: Operation,
    variables: serde_json::Value,
  ) -> Result<T> {
    let envelope = self.execute::<Rooted<T>>(operation, variables).await?;
    if envelope.has_errors() {
      tracing::debug!(operation = operation.name, "server returned GraphQL errors");
    }
    Ok(envelope.into_result(operation.name)?.result)
  }

  async fn fetch_articles(
    &self,
    operation: Operation,
    variables: serde_json::Value,
  ) -> Result<Vec<Article>> {
    wire::articles(self.fetch::<Vec<RawArticle>>(operation, variables).await?)
  }

  async fn fetch_magazines(
    &self,
    operation: Operation,
    variables: serde_json::Value,
  ) -> Result<Vec<Magazine>> {
    wire::magazines(self.fetch::<Vec<RawMagazine>>(operation, variables).await?)
  }

  async fn fetch_flyers(
    &self,
    operation: Operation,
    variables: serde_json::Value,
  ) -> Result<Vec<Flyer>> {
    wire::flyers(self.fetch(operation, variables).await?)
  }
}

fn timestamp(dt: DateTime<Utc>) -> String { dt.to_rfc3339_opts(SecondsFormat::Millis, true) }

// ─── Gateway impl ────────────────────────────────────────────────────────────

impl Gateway for GraphQlGateway {
  type Error = Error;

  // ── Articles ──────────────────────────────────────────────────────────────

  async fn all_articles(&self, limit: Option<u32>) -> Result<Vec<Article>> {
    self
      .fetch_articles(queries::ALL_ARTICLES, json!({ "limit": limit }))
      .await
  }

  async fn trending_articles(&self, limit: Option<u32>) -> Result<Vec<Article>> {
    self
      .fetch_articles(queries::TRENDING_ARTICLES, json!({ "limit": limit }))
      .await
  }

  async fn article_by_id(&self, id: &str) -> Result<Option<Article>> {
    self
      .fetch::<Option<RawArticle>>(queries::ARTICLE_BY_ID, json!({ "id": id }))
      .await?
      .map(RawArticle::into_article)
      .transpose()
  }

  async fn articles_by_ids(&self, ids: &[String]) -> Result<Vec<Article>> {
    // The backend answers `null` in place of ids it no longer knows.
    let raw: Vec<Option<RawArticle>> = self
      .fetch(queries::ARTICLES_BY_IDS, json!({ "ids": ids }))
      .await?;
    wire::articles(raw.into_iter().flatten().collect())
  }

  async fn articles_by_publication_slug(
    &self,
    slug: &str,
    limit: Option<u32>,
  ) -> Result<Vec<Article>> {
    self
      .fetch_articles(
        queries::ARTICLES_BY_PUBLICATION_SLUG,
        json!({ "slug": slug, "limit": limit }),
      )
      .await
  }

  async fn articles_by_publication_slugs(
    &self,
    slugs: &[String],
    limit: Option<u32>,
  ) -> Result<Vec<Article>> {
    self
      .fetch_articles(
        queries::ARTICLES_BY_PUBLICATION_SLUGS,
        json!({ "slugs": slugs, "limit": limit }),
      )
      .await
  }

  async fn shuffled_articles_by_publication_slugs(
    &self,
    slugs: &[String],
    limit: Option<u32>,
  ) -> Result<Vec<Article>> {
    self
      .fetch_articles(
        queries::SHUFFLED_ARTICLES_BY_PUBLICATION_SLUGS,
        json!({ "slugs": slugs, "limit": limit }),
      )
      .await
  }

  async fn search_articles(&self, query: &str, limit: Option<u32>) -> Result<Vec<Article>> {
    self
      .fetch_articles(
        queries::SEARCH_ARTICLES,
        json!({ "query": query, "limit": limit }),
      )
      .await
  }

  async fn increment_shoutouts(&self, id: &str, user: Uuid) -> Result<u32> {
    let raw: RawShoutouts = self
      .fetch(
        queries::INCREMENT_SHOUTOUTS,
        json!({ "id": id, "uuid": user.to_string() }),
      )
      .await?;
    Ok(raw.count())
  }

  async fn bookmark_article(&self, user: Uuid) -> Result<()> {
    self
      .fetch::<serde_json::Value>(
        queries::BOOKMARK_ARTICLE,
        json!({ "uuid": user.to_string() }),
      )
      .await?;
    Ok(())
  }

  // ── Publications ──────────────────────────────────────────────────────────

  async fn all_publications(&self) -> Result<Vec<Publication>> {
    wire::publications(self.fetch(queries::ALL_PUBLICATIONS, json!({})).await?)
  }

  async fn publication_by_slug(&self, slug: &str) -> Result<Option<Publication>> {
    self
      .fetch::<Option<RawPublication>>(
        queries::PUBLICATION_BY_SLUG,
        json!({ "slug": slug }),
      )
      .await?
      .map(RawPublication::into_publication)
      .transpose()
  }

  async fn follow_publication(&self, slug: &str, user: Uuid) -> Result<User> {
    self
      .fetch::<RawUser>(
        queries::FOLLOW_PUBLICATION,
        json!({ "slug": slug, "uuid": user.to_string() }),
      )
      .await?
      .into_user()
  }

  async fn unfollow_publication(&self, slug: &str, user: Uuid) -> Result<User> {
    self
      .fetch::<RawUser>(
        queries::UNFOLLOW_PUBLICATION,
        json!({ "slug": slug, "uuid": user.to_string() }),
      )
      .await?
      .into_user()
  }

  // ── Magazines ─────────────────────────────────────────────────────────────

  async fn all_magazines(&self, limit: Option<u32>) -> Result<Vec<Magazine>> {
    self
      .fetch_magazines(queries::ALL_MAGAZINES, json!({ "limit": limit }))
      .await
  }

  async fn featured_magazines(&self, limit: Option<u32>) -> Result<Vec<Magazine>> {
    self
      .fetch_magazines(queries::FEATURED_MAGAZINES, json!({ "limit": limit }))
      .await
  }

  async fn magazine_by_id(&self, id: &str) -> Result<Option<Magazine>> {
    self
      .fetch::<Option<RawMagazine>>(queries::MAGAZINE_BY_ID, json!({ "id": id }))
      .await?
      .map(RawMagazine::into_magazine)
      .transpose()
  }

  async fn increment_magazine_shoutouts(&self, id: &str, user: Uuid) -> Result<u32> {
    let raw: RawShoutouts = self
      .fetch(
        queries::INCREMENT_MAGAZINE_SHOUTOUTS,
        json!({ "id": id, "uuid": user.to_string() }),
      )
      .await?;
    Ok(raw.count())
  }

  // ── Organizations & flyers ────────────────────────────────────────────────

  async fn all_organizations(&self) -> Result<Vec<Organization>> {
    let raw: Vec<RawOrganization> =
      self.fetch(queries::ALL_ORGANIZATIONS, json!({})).await?;
    Ok(raw.into_iter().map(RawOrganization::into_organization).collect())
  }

  async fn flyers_after_date(&self, since: DateTime<Utc>) -> Result<Vec<Flyer>> {
    self
      .fetch_flyers(
        queries::FLYERS_AFTER_DATE,
        json!({ "since": timestamp(since) }),
      )
      .await
  }

  async fn flyers_before_date(
    &self,
    before: DateTime<Utc>,
    limit: Option<u32>,
  ) -> Result<Vec<Flyer>> {
    self
      .fetch_flyers(
        queries::FLYERS_BEFORE_DATE,
        json!({ "before": timestamp(before), "limit": limit }),
      )
      .await
  }

  async fn trending_flyers(&self, limit: Option<u32>) -> Result<Vec<Flyer>> {
    self
      .fetch_flyers(queries::TRENDING_FLYERS, json!({ "limit": limit }))
      .await
  }

  // ── Users ─────────────────────────────────────────────────────────────────

  async fn create_user(&self, followed_slugs: &[String], device_token: &str) -> Result<User> {
    self
      .fetch::<RawUser>(
        queries::CREATE_USER,
        json!({
          "deviceToken": device_token,
          "followedPublicationSlugs": followed_slugs,
        }),
      )
      .await?
      .into_user()
  }

  async fn user_by_uuid(&self, user: Uuid) -> Result<Option<User>> {
    self
      .fetch::<Option<RawUser>>(queries::GET_USER, json!({ "uuid": user.to_string() }))
      .await?
      .map(RawUser::into_user)
      .transpose()
  }
}
