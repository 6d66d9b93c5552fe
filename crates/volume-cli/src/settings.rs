//! Layered settings: defaults, then the config file, then `VOLUME_*`
//! environment variables, then command-line flags.

use std::{
  path::{Path, PathBuf},
  time::Duration,
};

use anyhow::Context as _;
use serde::Deserialize;
use volume_graphql::{Environment, GatewayConfig, config::DEFAULT_TIMEOUT};

/// Shape of `volume.toml`. Every key is optional.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Settings {
  pub env:          Environment,
  /// Overrides the endpoint `env` would pick.
  pub endpoint:     Option<String>,
  pub timeout_secs: u64,
  pub store_path:   PathBuf,
  pub device_token: String,
}

impl Default for Settings {
  fn default() -> Self {
    Self {
      env:          Environment::default(),
      endpoint:     None,
      timeout_secs: DEFAULT_TIMEOUT.as_secs(),
      store_path:   PathBuf::from("~/.local/share/volume/prefs.sqlite"),
      device_token: "volume-cli".into(),
    }
  }
}

/// Values given on the command line; `None` means "not given".
#[derive(Debug, Default)]
pub struct Overrides {
  pub env:          Option<Environment>,
  pub endpoint:     Option<String>,
  pub timeout_secs: Option<u64>,
  pub store_path:   Option<PathBuf>,
  pub device_token: Option<String>,
}

impl Settings {
  /// Read `path` (if it exists) and the environment.
  pub fn load(path: &Path) -> anyhow::Result<Self> {
    config::Config::builder()
      .add_source(config::File::from(path).required(false))
      .add_source(config::Environment::with_prefix("VOLUME"))
      .build()
      .context("failed to read config file")?
      .try_deserialize()
      .context("failed to deserialise settings")
  }

  /// Command-line flags win over everything else.
  pub fn apply(mut self, overrides: Overrides) -> Self {
    if let Some(env) = overrides.env {
      self.env = env;
    }
    self.endpoint = overrides.endpoint.or(self.endpoint);
    self.timeout_secs = overrides.timeout_secs.unwrap_or(self.timeout_secs);
    self.store_path = overrides.store_path.unwrap_or(self.store_path);
    self.device_token = overrides.device_token.unwrap_or(self.device_token);
    self
  }

  pub fn gateway_config(&self) -> GatewayConfig {
    let config = match &self.endpoint {
      Some(url) => GatewayConfig::with_endpoint(url.clone()),
      None => GatewayConfig::for_environment(self.env),
    };
    config.timeout(Duration::from_secs(self.timeout_secs))
  }

  /// The store path with a leading `~` expanded.
  pub fn store_path(&self) -> PathBuf { expand_tilde(&self.store_path) }
}

fn expand_tilde(path: &Path) -> PathBuf {
  let s = path.to_string_lossy();
  if let Some(rest) = s.strip_prefix("~/")
    && let Ok(home) = std::env::var("HOME")
  {
    return PathBuf::from(home).join(rest);
  }
  path.to_path_buf()
}

#[cfg(test)]
mod tests {
  use volume_graphql::config::{DEV_ENDPOINT, PROD_ENDPOINT};

  use super::*;

  #[test]
  fn defaults_target_prod() {
    let cfg = Settings::default().gateway_config();
    assert_eq!(cfg.endpoint, PROD_ENDPOINT);
    assert_eq!(cfg.timeout, DEFAULT_TIMEOUT);
  }

  #[test]
  fn missing_file_falls_back_to_defaults() {
    let settings = Settings::load(Path::new("/nonexistent/volume.toml")).unwrap();
    assert_eq!(settings.timeout_secs, DEFAULT_TIMEOUT.as_secs());
  }

  #[test]
  fn flags_override_file_values() {
    let file = Settings {
      endpoint: Some("http://localhost:3000/graphql".into()),
      ..Settings::default()
    };
    let settings = file.apply(Overrides {
      env: Some(Environment::Dev),
      timeout_secs: Some(3),
      ..Overrides::default()
    });

    let cfg = settings.gateway_config();
    assert_eq!(cfg.endpoint, "http://localhost:3000/graphql");
    assert_eq!(cfg.timeout, Duration::from_secs(3));
  }

  #[test]
  fn env_picks_endpoint_when_none_given() {
    let settings = Settings::default().apply(Overrides {
      env: Some(Environment::Dev),
      ..Overrides::default()
    });
    assert_eq!(settings.gateway_config().endpoint, DEV_ENDPOINT);
  }

  #[test]
  fn tilde_expands_to_home() {
    let home = std::env::var("HOME").unwrap_or_default();
    if home.is_empty() {
      return;
    }
    assert_eq!(
      expand_tilde(Path::new("~/prefs.sqlite")),
      PathBuf::from(home).join("prefs.sqlite")
    );
  }
}
