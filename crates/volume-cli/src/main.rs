//! `volume` — command-line client for the Volume student-publication backend.
//!
//! # Usage
//!
//! ```text
//! volume home
//! volume --env dev article 6411d1a3e4b0
//! volume --config ~/.config/volume/volume.toml follow cornell-daily-sun
//! ```
//!
//! Settings are read from `volume.toml` (or `--config`), then `VOLUME_*`
//! environment variables, then flags.

mod commands;
mod render;
mod settings;

use std::path::PathBuf;

use anyhow::Context as _;
use clap::Parser;
use commands::Command;
use settings::{Overrides, Settings};
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;
use volume_graphql::{Environment, GraphQlGateway};
use volume_state::Context;
use volume_store_sqlite::SqliteStore;

// ─── CLI args ─────────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(name = "volume", version, about = "Read Cornell student publications")]
struct Cli {
  /// Path to a TOML config file.
  #[arg(short, long, value_name = "FILE", default_value = "volume.toml")]
  config: PathBuf,

  /// Backend deployment: dev or prod.
  #[arg(long)]
  env: Option<Environment>,

  /// GraphQL endpoint URL; overrides --env.
  #[arg(long)]
  endpoint: Option<String>,

  /// Per-request timeout in seconds.
  #[arg(long, value_name = "SECS")]
  timeout_secs: Option<u64>,

  /// Path of the SQLite preferences file.
  #[arg(long, value_name = "FILE")]
  store: Option<PathBuf>,

  /// Device token sent when registering.
  #[arg(long)]
  device_token: Option<String>,

  #[command(subcommand)]
  command: Command,
}

// ─── Entry point ──────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .with_writer(std::io::stderr)
    .init();

  let cli = Cli::parse();

  let settings = Settings::load(&cli.config)?.apply(Overrides {
    env:          cli.env,
    endpoint:     cli.endpoint,
    timeout_secs: cli.timeout_secs,
    store_path:   cli.store,
    device_token: cli.device_token,
  });

  let gateway_config = settings.gateway_config();
  tracing::debug!(endpoint = %gateway_config.endpoint, "using backend");
  let gateway = GraphQlGateway::new(gateway_config).context("failed to build HTTP client")?;

  let store_path = settings.store_path();
  if let Some(dir) = store_path.parent() {
    std::fs::create_dir_all(dir)
      .with_context(|| format!("failed to create {}", dir.display()))?;
  }
  let store = SqliteStore::open(&store_path)
    .await
    .with_context(|| format!("failed to open store at {store_path:?}"))?;

  let ctx = Context::new(gateway, store);
  commands::run(cli.command, ctx, &settings.device_token).await
}
