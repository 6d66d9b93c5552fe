//! One function per subcommand. Each builds the holder its screen would use,
//! drives it once and prints the result.

use std::sync::Arc;

use anyhow::{Context as _, bail};
use chrono::Utc;
use clap::Subcommand;
use volume_core::{RetrievalState, prefs::BookmarkKind};
use volume_graphql::GraphQlGateway;
use volume_state::{
  Context,
  StateField,
  holders::{
    ArticleState, BookmarksState, DebriefState, FlyersState, HomeState, MagazinesState,
    PublicationState, PublicationsState, SearchState, Session,
  },
};
use volume_store_sqlite::SqliteStore;

use crate::render;

pub type AppContext = Arc<Context<GraphQlGateway, SqliteStore>>;

#[derive(Subcommand, Debug)]
pub enum Command {
  /// Register this device with the backend (done automatically when needed).
  Register,
  /// Trending, followed and other articles.
  Home,
  /// The newest articles across every publication.
  Latest {
    #[arg(long, default_value_t = 20)]
    limit: u32,
  },
  /// Show one article.
  Article { id: String },
  /// Show one magazine.
  Magazine { id: String },
  /// Give an article (or with --magazine, a magazine) a shoutout.
  Shoutout {
    id:       String,
    #[arg(long)]
    magazine: bool,
  },
  /// Bookmark an article or magazine.
  Bookmark {
    id:       String,
    #[arg(long)]
    magazine: bool,
    /// Remove the bookmark instead.
    #[arg(long)]
    remove:   bool,
  },
  /// List bookmarked articles and magazines.
  Bookmarks,
  /// Followed publications and the rest.
  Publications,
  /// Show a publication and its latest articles.
  Publication { slug: String },
  Follow { slug: String },
  Unfollow { slug: String },
  /// Replace the local follow list with the backend's.
  Sync,
  /// Featured and recent magazines.
  Magazines,
  /// Upcoming, past and trending flyers.
  Flyers {
    /// Only upcoming flyers in this category.
    #[arg(long)]
    category: Option<String>,
  },
  /// Campus organizations that post flyers.
  Organizations,
  Search { query: String },
  /// This week's reading summary.
  Debrief,
}

/// The value of `field`, or its error message as an error.
fn loaded<T: Clone + Send + Sync>(field: &StateField<T>) -> anyhow::Result<T> {
  match field.get() {
    RetrievalState::Success(value) => Ok(value),
    RetrievalState::Error(message) => bail!(message),
    other => bail!("{} is still {}", field.name(), other.label()),
  }
}

/// Prints list sections and remembers which of them ended in `Error`, so
/// the command can fail after showing everything it has.
#[derive(Default)]
struct Report {
  failed: Vec<String>,
}

impl Report {
  fn note<T>(&mut self, state: &RetrievalState<T>) {
    if let Some(message) = state.error_message() {
      self.failed.push(message.to_owned());
    }
  }

  fn section<T>(&mut self, heading: &str, state: &RetrievalState<Vec<T>>, item: impl Fn(&T) -> String) {
    println!("{}", render::section(heading, state, item));
    self.note(state);
  }

  fn finish(self) -> anyhow::Result<()> {
    if self.failed.is_empty() {
      Ok(())
    } else {
      bail!(self.failed.join("; "))
    }
  }
}

pub async fn run(command: Command, ctx: AppContext, device_token: &str) -> anyhow::Result<()> {
  let session = Session::new(ctx.clone());
  let mut report = Report::default();

  match command {
    Command::Register => {
      let identity = session.ensure_identity(device_token).await?;
      println!("registered as {}", identity.user_uuid);
    }

    Command::Home => {
      let home = HomeState::new(ctx);
      home.refresh().await;
      report.section("Trending", &home.trending.get(), render::article);
      report.section("Following", &home.followed.get(), render::article);
      report.section("Other articles", &home.other.get(), render::article);
    }

    Command::Latest { limit } => {
      let articles = ctx.repo.latest_articles(Some(limit)).await?;
      println!("{}", render::section("Latest", &RetrievalState::Success(articles), render::article));
    }

    Command::Article { id } => {
      let state = ArticleState::new(ctx);
      state.load(&id).await;
      let article = loaded(&state.article)?;
      println!("{}", render::article(&article));
      println!("    {}", article.article_url);
      if state.bookmarked() {
        println!("    (bookmarked)");
      }
    }

    Command::Magazine { id } => {
      let magazine = ctx.repo.magazine(&id).await?;
      println!("{}", render::magazine(&magazine));
      println!("    {}", magazine.pdf_url);
    }

    Command::Shoutout { id, magazine } => {
      session.ensure_identity(device_token).await?;
      let count = if magazine {
        let state = MagazinesState::new(ctx);
        state.refresh().await;
        state.shoutout(&id).await?
      } else {
        let state = ArticleState::new(ctx);
        state.load(&id).await;
        loaded(&state.article)?;
        state.shoutout().await?
      };
      println!("{id} now has {count} shoutouts");
    }

    Command::Bookmark {
      id,
      magazine,
      remove,
    } => {
      let kind = if magazine {
        BookmarkKind::Magazine
      } else {
        BookmarkKind::Article
      };
      ctx.set_bookmarked(kind, &id, !remove).await?;
      let verb = if remove { "removed" } else { "saved" };
      println!("{verb} {} {id}", kind.as_str());
    }

    Command::Bookmarks => {
      let state = BookmarksState::new(ctx.clone());
      state.refresh().await;
      report.section("Saved articles", &state.articles.get(), render::article);
      let magazines = ctx.bookmark_ids(BookmarkKind::Magazine).await?;
      println!(
        "{}",
        render::section("Saved magazines", &RetrievalState::Success(magazines), |id| id.clone())
      );
    }

    Command::Publications => {
      let state = PublicationsState::new(ctx);
      state.refresh().await;
      report.section("Following", &state.followed.get(), render::publication);
      report.section("More publications", &state.more.get(), render::publication);
    }

    Command::Publication { slug } => {
      let state = PublicationState::new(ctx);
      state.load(&slug).await;
      let publication = loaded(&state.publication)?;
      let following = if state.following() { " (following)" } else { "" };
      println!("{}{following}", render::publication(&publication));
      report.section("Articles", &state.articles.get(), render::article);
    }

    Command::Follow { slug } => set_following(ctx, &session, device_token, &slug, true).await?,
    Command::Unfollow { slug } => set_following(ctx, &session, device_token, &slug, false).await?,

    Command::Sync => {
      session.ensure_identity(device_token).await?;
      let changed = session.sync_follows().await?;
      println!("{changed} follows changed");
    }

    Command::Magazines => {
      let state = MagazinesState::new(ctx);
      state.refresh().await;
      report.section("Featured", &state.featured.get(), render::magazine);
      report.section("All magazines", &state.all.get(), render::magazine);
    }

    Command::Flyers { category } => {
      let state = FlyersState::new(ctx);
      state.refresh(Utc::now()).await;
      match category {
        Some(slug) => {
          let flyers = state.upcoming.get().map(|_| state.by_category(&slug));
          report.section(&format!("Upcoming in {slug}"), &flyers, render::flyer);
        }
        None => {
          report.section("Upcoming", &state.upcoming.get(), render::flyer);
          report.section("Trending", &state.trending.get(), render::flyer);
          report.section("Past", &state.past.get(), render::flyer);
        }
      }
    }

    Command::Organizations => {
      let organizations = ctx.repo.organizations().await?;
      for org in organizations {
        println!("{}  {} [{}]", org.slug, org.name, org.category_slug);
      }
    }

    Command::Search { query } => {
      let state = SearchState::new(ctx);
      state.search(&query).await;
      report.section(&format!("Results for {query:?}"), &state.results.get(), render::article);
    }

    Command::Debrief => {
      session.ensure_identity(device_token).await?;
      let state = DebriefState::new(ctx);
      state.refresh().await;
      let debrief = loaded(&state.debrief)?;
      println!("{}", render::debrief(&debrief, Utc::now()));
    }
  }

  report.finish()
}

async fn set_following(
  ctx: AppContext,
  session: &Session<GraphQlGateway, SqliteStore>,
  device_token: &str,
  slug: &str,
  follow: bool,
) -> anyhow::Result<()> {
  session.ensure_identity(device_token).await?;
  ctx
    .set_following(slug, follow)
    .await
    .with_context(|| format!("could not update follow for {slug}"))?;
  let verb = if follow { "following" } else { "no longer following" };
  println!("{verb} {slug}");
  Ok(())
}
