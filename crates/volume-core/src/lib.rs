//! Core types and trait definitions for the Volume client data layer.
//!
//! This crate is deliberately free of HTTP and database dependencies. The
//! GraphQL gateway, the preferences store and the state holders all depend on
//! it; it depends on nothing proprietary.

// We intentionally use native `async fn` in traits (stabilised in Rust 1.75).
// Suppress the advisory lint about `Send` bounds on the returned futures.
#![allow(async_fn_in_trait)]

pub mod article;
pub mod category;
pub mod error;
pub mod flyer;
pub mod gateway;
pub mod identity;
pub mod magazine;
pub mod organization;
pub mod prefs;
pub mod publication;
pub mod retrieval;
pub mod social;
pub mod user;

pub use error::{Error, Result};
pub use retrieval::RetrievalState;
