//! Retrieval state — the progress/outcome of fetching one piece of data.
//!
//! Each state holder field carries exactly one [`RetrievalState`] at a time.
//! The legal transitions are:
//!
//! ```text
//! Empty ──► Loading ──► Success | Error
//!              ▲              │
//!              └──────────────┘   (any re-fetch)
//! ```

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "state", content = "value", rename_all = "snake_case")]
pub enum RetrievalState<T> {
  /// Nothing has been requested yet.
  #[default]
  Empty,
  Loading,
  Success(T),
  /// A fixed, human-readable message. The underlying cause is not kept.
  Error(String),
}

impl<T> RetrievalState<T> {
  pub fn is_empty(&self) -> bool { matches!(self, Self::Empty) }

  pub fn is_loading(&self) -> bool { matches!(self, Self::Loading) }

  pub fn is_success(&self) -> bool { matches!(self, Self::Success(_)) }

  pub fn is_error(&self) -> bool { matches!(self, Self::Error(_)) }

  /// The loaded value, if the last fetch succeeded.
  pub fn value(&self) -> Option<&T> {
    match self {
      Self::Success(v) => Some(v),
      _ => None,
    }
  }

  pub fn error_message(&self) -> Option<&str> {
    match self {
      Self::Error(m) => Some(m),
      _ => None,
    }
  }

  pub fn as_ref(&self) -> RetrievalState<&T> {
    match self {
      Self::Empty => RetrievalState::Empty,
      Self::Loading => RetrievalState::Loading,
      Self::Success(v) => RetrievalState::Success(v),
      Self::Error(m) => RetrievalState::Error(m.clone()),
    }
  }

  pub fn map<U>(self, f: impl FnOnce(T) -> U) -> RetrievalState<U> {
    match self {
      Self::Empty => RetrievalState::Empty,
      Self::Loading => RetrievalState::Loading,
      Self::Success(v) => RetrievalState::Success(f(v)),
      Self::Error(m) => RetrievalState::Error(m),
    }
  }

  /// Short lowercase tag, used in logs.
  pub fn label(&self) -> &'static str {
    match self {
      Self::Empty => "empty",
      Self::Loading => "loading",
      Self::Success(_) => "success",
      Self::Error(_) => "error",
    }
  }

  /// Whether moving from `self` to `next` is a legal fetch-cycle transition.
  ///
  /// `Loading → Loading` is allowed: a superseding fetch restarts the cycle
  /// while the field already shows progress.
  pub fn can_transition_to<U>(&self, next: &RetrievalState<U>) -> bool {
    use RetrievalState::*;
    match (self, next) {
      (_, Loading) => true,
      (Loading, Success(_) | Error(_)) => true,
      _ => false,
    }
  }
}
