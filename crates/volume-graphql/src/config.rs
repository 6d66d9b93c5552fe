//! Endpoint and transport settings for [`GraphQlGateway`](crate::GraphQlGateway).

use std::{str::FromStr, time::Duration};

use serde::Deserialize;

/// Connect and read timeout applied to every call.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(15);

pub const DEV_ENDPOINT: &str = "https://volume-backend-dev.cornellappdev.com/graphql";
pub const PROD_ENDPOINT: &str = "https://volume-backend.cornellappdev.com/graphql";

/// Which deployment of the backend to talk to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
  Dev,
  #[default]
  Prod,
}

impl Environment {
  pub fn endpoint(self) -> &'static str {
    match self {
      Self::Dev => DEV_ENDPOINT,
      Self::Prod => PROD_ENDPOINT,
    }
  }
}

impl FromStr for Environment {
  type Err = String;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s.to_ascii_lowercase().as_str() {
      "dev" | "development" => Ok(Self::Dev),
      "prod" | "production" => Ok(Self::Prod),
      other => Err(format!("unknown environment {other:?} (expected dev or prod)")),
    }
  }
}

/// Connection settings for the GraphQL gateway.
#[derive(Debug, Clone)]
pub struct GatewayConfig {
  /// Full URL of the GraphQL endpoint.
  pub endpoint: String,
  pub timeout:  Duration,
}

impl GatewayConfig {
  pub fn for_environment(env: Environment) -> Self {
    Self {
      endpoint: env.endpoint().to_owned(),
      timeout:  DEFAULT_TIMEOUT,
    }
  }

  /// Point at an arbitrary endpoint, e.g. a local backend or a test server.
  pub fn with_endpoint(endpoint: impl Into<String>) -> Self {
    Self {
      endpoint: endpoint.into(),
      timeout:  DEFAULT_TIMEOUT,
    }
  }

  pub fn timeout(mut self, timeout: Duration) -> Self {
    self.timeout = timeout;
    self
  }
}

impl Default for GatewayConfig {
  fn default() -> Self { Self::for_environment(Environment::default()) }
}
