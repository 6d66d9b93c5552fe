//! The GraphQL response envelope.
//!
//! A GraphQL server reports its own failures inside a `200 OK` body. The
//! envelope keeps `data` and `errors` side by side so the caller decides how to
//! interpret them; [`GraphQlResponse::into_result`] is the interpretation the
//! gateway's typed operations use.

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// The request body sent for every operation.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphQlRequest<'a> {
  pub query:          &'a str,
  pub operation_name: &'a str,
  pub variables:      serde_json::Value,
}

#[derive(Debug, Deserialize)]
pub struct GraphQlResponse<T> {
  pub data:   Option<T>,
  #[serde(default)]
  pub errors: Option<Vec<GraphQlError>>,
}

/// One entry of the `errors` array.
#[derive(Debug, Clone, Deserialize)]
pub struct GraphQlError {
  pub message: String,
  #[serde(default)]
  pub path:    Option<Vec<serde_json::Value>>,
}

impl<T> GraphQlResponse<T> {
  pub fn has_errors(&self) -> bool {
    self.errors.as_ref().is_some_and(|e| !e.is_empty())
  }

  /// Server-declared errors win over any partial data.
  pub fn into_result(self, operation: &'static str) -> Result<T> {
    if let Some(errors) = self.errors.filter(|e| !e.is_empty()) {
      return Err(Error::GraphQl {
        operation,
        messages: errors.into_iter().map(|e| e.message).collect(),
      });
    }
    self.data.ok_or(Error::MissingData { operation })
  }
}

/// Every operation aliases its root field to `result`.
#[derive(Debug, Deserialize)]
pub struct Rooted<T> {
  pub result: T,
}
