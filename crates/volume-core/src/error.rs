//! Error types for `volume-core`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("invalid {field} timestamp {value:?}: {reason}")]
  InvalidTimestamp {
    field:  &'static str,
    value:  String,
    reason: String,
  },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

// ─── Failure taxonomy ────────────────────────────────────────────────────────

/// The coarse class of a failed remote call.
///
/// Every failure is surfaced to the user through one generic message; the
/// class only feeds logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
  /// The request never produced a usable HTTP response.
  NetworkFailure,
  /// The server answered, but with an error status, GraphQL errors, or a body
  /// we could not use.
  ServerError,
  /// The connect or read timeout elapsed.
  Timeout,
}

impl std::fmt::Display for FailureKind {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.write_str(match self {
      Self::NetworkFailure => "network failure",
      Self::ServerError => "server error",
      Self::Timeout => "timeout",
    })
  }
}

/// Implemented by gateway errors so callers can log which class of failure
/// occurred without depending on the concrete transport.
pub trait Classify {
  fn kind(&self) -> FailureKind;
}
