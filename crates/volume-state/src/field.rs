//! [`StateField`] — one observable, generation-tagged retrieval state.
//!
//! Every fetch calls [`StateField::begin`], which moves the field to
//! `Loading` and hands out the next [`Generation`]. A completion is applied
//! only if its generation is still the newest one; anything older is a
//! superseded fetch and is dropped. Both steps run under the watch channel's
//! write lock, so a `begin` and a stale completion can never interleave.
//!
//! Optimistic edits go through [`StateField::update`]. An edit is undone with
//! [`StateField::rollback`] and an inverse of that one edit, applied to the
//! value as it is now, so overlapping edits never erase each other. A
//! rollback is skipped if a new fetch has started since the edit.

use std::{
  future::Future,
  sync::atomic::{AtomicU64, Ordering},
};

use tokio::sync::watch;
use volume_core::RetrievalState;

use crate::Error;

/// Sequence number of one fetch cycle on one field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Generation(u64);

impl Generation {
  pub fn get(self) -> u64 { self.0 }
}

pub struct StateField<T> {
  name:            &'static str,
  failure_message: &'static str,
  tx:              watch::Sender<RetrievalState<T>>,
  generation:      AtomicU64,
}

impl<T> StateField<T>
where
  T: Clone + Send + Sync,
{
  /// A new field in the `Empty` state.
  ///
  /// `failure_message` is what the field shows on any failure; the cause is
  /// only logged.
  pub fn new(name: &'static str, failure_message: &'static str) -> Self {
    let (tx, _rx) = watch::channel(RetrievalState::Empty);
    Self {
      name,
      failure_message,
      tx,
      generation: AtomicU64::new(0),
    }
  }

  pub fn name(&self) -> &'static str { self.name }

  pub fn subscribe(&self) -> watch::Receiver<RetrievalState<T>> { self.tx.subscribe() }

  /// A clone of the current state.
  pub fn get(&self) -> RetrievalState<T> { self.tx.borrow().clone() }

  /// A clone of the loaded value, if the field is in `Success`.
  pub fn value(&self) -> Option<T> { self.tx.borrow().value().cloned() }

  /// The generation of the newest fetch started so far.
  pub fn current_generation(&self) -> Generation {
    Generation(self.generation.load(Ordering::SeqCst))
  }

  // ── Fetch cycle ───────────────────────────────────────────────────────────

  /// Start a fetch: move to `Loading` and claim the next generation.
  pub fn begin(&self) -> Generation {
    let mut generation = Generation(0);
    self.tx.send_modify(|state| {
      generation = Generation(self.generation.fetch_add(1, Ordering::SeqCst) + 1);
      *state = RetrievalState::Loading;
    });
    tracing::trace!(field = self.name, generation = generation.0, "fetch started");
    generation
  }

  /// Finish the fetch tagged `generation` with a value.
  ///
  /// Returns `false` (and leaves the field alone) if a newer fetch has begun.
  pub fn succeed(&self, generation: Generation, value: T) -> bool {
    self.apply(generation, RetrievalState::Success(value))
  }

  /// Finish the fetch tagged `generation` with a failure.
  pub fn fail(&self, generation: Generation, error: &Error) -> bool {
    tracing::warn!(
      field = self.name,
      kind = ?error.kind(),
      error = %error,
      "fetch failed"
    );
    self.apply(
      generation,
      RetrievalState::Error(self.failure_message.to_owned()),
    )
  }

  pub fn complete(&self, generation: Generation, outcome: Result<T, Error>) -> bool {
    match outcome {
      Ok(value) => self.succeed(generation, value),
      Err(e) => self.fail(generation, &e),
    }
  }

  /// Run one whole fetch cycle: `begin`, await `fetch`, `complete`.
  ///
  /// Returns whether this fetch's result was applied.
  pub async fn load<F>(&self, fetch: F) -> bool
  where
    F: Future<Output = Result<T, Error>>,
  {
    let generation = self.begin();
    let outcome = fetch.await;
    self.complete(generation, outcome)
  }

  fn apply(&self, generation: Generation, next: RetrievalState<T>) -> bool {
    let applied = self.tx.send_if_modified(|state| {
      if self.generation.load(Ordering::SeqCst) != generation.0 {
        return false;
      }
      debug_assert!(state.can_transition_to(&next), "{} → {}", state.label(), next.label());
      *state = next;
      true
    });
    if !applied {
      tracing::debug!(
        field = self.name,
        generation = generation.0,
        "dropping superseded response"
      );
    }
    applied
  }

  // ── Optimistic edits ──────────────────────────────────────────────────────

  /// Replace the loaded value with `f(current)`.
  ///
  /// Only applies in `Success`; the state stays `Success`. Returns the
  /// generation the edit was made under, or `None` if nothing is loaded.
  pub fn update(&self, f: impl FnOnce(&T) -> T) -> Option<Generation> {
    let mut edited = None;
    self.tx.send_if_modified(|state| match state {
      RetrievalState::Success(current) => {
        *current = f(current);
        edited = Some(Generation(self.generation.load(Ordering::SeqCst)));
        true
      }
      _ => false,
    });
    edited
  }

  /// Like [`StateField::update`], but only while `generation` is current.
  pub fn update_at(&self, generation: Generation, f: impl FnOnce(&T) -> T) -> bool {
    self.tx.send_if_modified(|state| {
      if self.generation.load(Ordering::SeqCst) != generation.0 {
        return false;
      }
      match state {
        RetrievalState::Success(current) => {
          *current = f(current);
          true
        }
        _ => false,
      }
    })
  }

  /// Undo one optimistic edit made under `generation`.
  ///
  /// `undo` inverts only that edit and runs against the current value, so
  /// edits made since are kept. Skipped if a fetch has started since the
  /// edit: that fetch's result is authoritative.
  pub fn rollback(&self, generation: Generation, undo: impl FnOnce(&T) -> T) -> bool {
    let undone = self.update_at(generation, undo);
    if !undone {
      tracing::debug!(
        field = self.name,
        generation = generation.0,
        "rollback skipped after refetch"
      );
    }
    undone
  }
}

/// `list` with `item` put back at `index`, unless `same` finds it already.
pub fn reinsert<T: Clone>(list: &[T], index: usize, item: &T, same: impl Fn(&T) -> bool) -> Vec<T> {
  let mut next = list.to_vec();
  if !next.iter().any(same) {
    next.insert(index.min(next.len()), item.clone());
  }
  next
}

impl<T> std::fmt::Debug for StateField<T>
where
  T: std::fmt::Debug,
{
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("StateField")
      .field("name", &self.name)
      .field("state", &*self.tx.borrow())
      .field("generation", &self.generation.load(Ordering::SeqCst))
      .finish()
  }
}
