//! Repository and screen-scoped state holders for the Volume client.
//!
//! A state holder owns one [`StateField`] per piece of data its screen shows.
//! Each field is observable through a [`tokio::sync::watch`] receiver and moves
//! through the [`RetrievalState`](volume_core::RetrievalState) cycle as fetches
//! start and finish. Fetches are generation-tagged: when two overlap, only the
//! one started last may write the field.
//!
//! User actions (bookmark, follow, shoutout) are applied optimistically and
//! rolled back if the backend rejects them.

pub mod context;
pub mod error;
pub mod field;
pub mod holders;
pub mod repository;

pub use context::Context;
pub use error::{Error, Result};
pub use field::{Generation, StateField};
pub use repository::Repository;

#[cfg(test)]
mod tests;
