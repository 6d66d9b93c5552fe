//! Error type for `volume-graphql`.

use thiserror::Error;
use volume_core::error::{Classify, FailureKind};

#[derive(Debug, Error)]
pub enum Error {
  #[error("failed to build HTTP client: {0}")]
  Client(#[source] reqwest::Error),

  #[error("request timed out: {0}")]
  Timeout(#[source] reqwest::Error),

  #[error("transport error: {0}")]
  Transport(#[source] reqwest::Error),

  #[error("{operation} → HTTP {status}")]
  Status {
    operation: &'static str,
    status:    u16,
  },

  /// The server answered with GraphQL `errors`.
  #[error("{operation} returned errors: {}", messages.join("; "))]
  GraphQl {
    operation: &'static str,
    messages:  Vec<String>,
  },

  #[error("{operation} returned no data")]
  MissingData { operation: &'static str },

  #[error("malformed response: {0}")]
  Decode(#[from] serde_json::Error),

  #[error("model error: {0}")]
  Model(#[from] volume_core::Error),
}

impl Error {
  /// Sort a reqwest failure into timeout versus other transport failures.
  pub(crate) fn from_transport(e: reqwest::Error) -> Self {
    if e.is_timeout() {
      Self::Timeout(e)
    } else {
      Self::Transport(e)
    }
  }
}

impl Classify for Error {
  fn kind(&self) -> FailureKind {
    match self {
      Error::Timeout(_) => FailureKind::Timeout,
      Error::Client(_) | Error::Transport(_) => FailureKind::NetworkFailure,
      Error::Status { .. }
      | Error::GraphQl { .. }
      | Error::MissingData { .. }
      | Error::Decode(_)
      | Error::Model(_) => FailureKind::ServerError,
    }
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
