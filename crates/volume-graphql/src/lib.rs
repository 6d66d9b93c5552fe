//! GraphQL gateway for the Volume backend.
//!
//! Implements [`volume_core::gateway::Gateway`] over a single shared
//! [`reqwest::Client`]. Each operation is one `POST` with a fixed timeout; the
//! gateway never retries and never caches.

mod client;
mod wire;

pub mod config;
pub mod envelope;
pub mod error;
pub mod queries;

pub use client::GraphQlGateway;
pub use config::{Environment, GatewayConfig};
pub use error::{Error, Result};
