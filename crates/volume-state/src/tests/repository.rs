use uuid::Uuid;
use volume_core::error::FailureKind;

use super::*;
use crate::{Error, repository::HomeLimits};

#[tokio::test]
async fn missing_article_is_not_found() {
  let ctx = context(FakeGateway::default()).await;
  let err = ctx.repo.article("nope").await.unwrap_err();
  assert!(matches!(err, Error::NotFound { entity: "article", .. }));
}

#[tokio::test]
async fn gateway_failure_keeps_its_kind() {
  let gateway = FakeGateway::default();
  gateway.fail("article_by_id", FailureKind::Timeout);
  let ctx = context(gateway).await;

  let err = ctx.repo.article("1").await.unwrap_err();
  assert_eq!(err.kind(), Some(FailureKind::Timeout));
}

#[tokio::test]
async fn no_ids_means_no_request() {
  let ctx = context(FakeGateway::default()).await;
  assert!(ctx.repo.bookmarked_articles(&[]).await.unwrap().is_empty());
  assert!(ctx.repo.followed_articles(&[], None).await.unwrap().is_empty());
  assert!(ctx.repo.gateway().calls().is_empty());
}

#[tokio::test]
async fn bookmarked_articles_follow_request_order() {
  let gateway = FakeGateway::default();
  *gateway.articles.lock().unwrap() = vec![article("a", "p"), article("b", "p"), article("c", "p")];
  let ctx = context(gateway).await;

  let ids = vec!["c".to_string(), "gone".to_string(), "a".to_string()];
  let found = ctx.repo.bookmarked_articles(&ids).await.unwrap();
  let found: Vec<_> = found.iter().map(|a| a.id.as_str()).collect();
  assert_eq!(found, ["c", "a"]);
}

#[tokio::test]
async fn other_articles_exclude_followed_publications() {
  let gateway = FakeGateway::default();
  *gateway.publications.lock().unwrap() = vec![publication("sun"), publication("slope")];
  *gateway.articles.lock().unwrap() = vec![article("1", "sun"), article("2", "slope")];
  let ctx = context(gateway).await;

  let other = ctx.repo.other_articles(&["sun".into()], None).await.unwrap();
  assert_eq!(other.len(), 1);
  assert_eq!(other[0].publication_slug, "slope");
}

#[tokio::test]
async fn other_articles_skip_request_when_everything_is_followed() {
  let gateway = FakeGateway::default();
  *gateway.publications.lock().unwrap() = vec![publication("sun")];
  let ctx = context(gateway).await;

  assert!(ctx.repo.other_articles(&["sun".into()], None).await.unwrap().is_empty());
  assert!(!ctx.repo.gateway().called("shuffled_articles_by_publication_slugs"));
}

#[tokio::test]
async fn home_feed_joins_three_lists() {
  let gateway = FakeGateway::default();
  *gateway.publications.lock().unwrap() = vec![publication("sun"), publication("slope")];
  let mut hot = article("1", "sun");
  hot.trendiness = Some(9.0);
  *gateway.articles.lock().unwrap() = vec![hot, article("2", "slope")];
  let ctx = context(gateway).await;

  let feed = ctx.repo.home_feed(&["sun".into()], HomeLimits::default()).await.unwrap();
  assert_eq!(feed.trending.len(), 1);
  assert_eq!(feed.followed[0].id, "1");
  assert_eq!(feed.other[0].id, "2");
}

#[tokio::test]
async fn publication_with_articles_fails_if_either_half_fails() {
  let gateway = FakeGateway::default();
  *gateway.publications.lock().unwrap() = vec![publication("sun")];
  gateway.fail("articles_by_publication_slug", FailureKind::ServerError);
  let ctx = context(gateway).await;

  let err = ctx.repo.publication_with_articles("sun", None).await.unwrap_err();
  assert_eq!(err.kind(), Some(FailureKind::ServerError));
}

#[tokio::test]
async fn upcoming_flyers_sorted_by_end() {
  let gateway = FakeGateway::default();
  *gateway.flyers.lock().unwrap() = vec![
    flyer("late", "music", at(20, 0)),
    flyer("soon", "music", at(11, 0)),
    flyer("over", "music", at(2, 0)),
  ];
  let ctx = context(gateway).await;

  let upcoming = ctx.repo.upcoming_flyers(at(10, 0)).await.unwrap();
  let ids: Vec<_> = upcoming.iter().map(|f| f.id.as_str()).collect();
  assert_eq!(ids, ["soon", "late"]);
}

#[tokio::test]
async fn unknown_user_is_not_found() {
  let ctx = context(FakeGateway::default()).await;
  let err = ctx.repo.user(Uuid::new_v4()).await.unwrap_err();
  assert!(matches!(err, Error::NotFound { entity: "user", .. }));
}

#[tokio::test]
async fn latest_articles_respects_limit() {
  let gateway = FakeGateway::default();
  *gateway.articles.lock().unwrap() = vec![article("1", "sun"), article("2", "sun"), article("3", "sun")];
  let ctx = context(gateway).await;

  assert_eq!(ctx.repo.latest_articles(Some(2)).await.unwrap().len(), 2);
  assert!(ctx.repo.gateway().called("all_articles"));
}
