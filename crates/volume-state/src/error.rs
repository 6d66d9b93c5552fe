//! Error type for `volume-state`.

use thiserror::Error;
use volume_core::error::{Classify, FailureKind};

type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Debug, Error)]
pub enum Error {
  #[error("{kind}: {source}")]
  Gateway {
    kind:   FailureKind,
    source: BoxError,
  },

  #[error("preferences error: {0}")]
  Preferences(#[source] BoxError),

  #[error("{entity} not found: {id}")]
  NotFound { entity: &'static str, id: String },

  #[error("no device identity; the user has not been created yet")]
  MissingIdentity,

  #[error("nothing is loaded to act on")]
  NotLoaded,
}

impl Error {
  pub(crate) fn gateway<E>(e: E) -> Self
  where
    E: std::error::Error + Classify + Send + Sync + 'static,
  {
    Self::Gateway {
      kind:   e.kind(),
      source: Box::new(e),
    }
  }

  pub(crate) fn preferences<E>(e: E) -> Self
  where
    E: std::error::Error + Send + Sync + 'static,
  {
    Self::Preferences(Box::new(e))
  }

  pub(crate) fn not_found(entity: &'static str, id: impl Into<String>) -> Self {
    Self::NotFound {
      entity,
      id: id.into(),
    }
  }

  /// The failure class, for errors that came from the gateway.
  pub fn kind(&self) -> Option<FailureKind> {
    match self {
      Self::Gateway { kind, .. } => Some(*kind),
      _ => None,
    }
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
