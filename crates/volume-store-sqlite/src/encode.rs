//! Encoding and decoding helpers between domain types and the plain-text
//! representations stored in SQLite columns.
//!
//! Timestamps are stored as RFC 3339 strings and UUIDs as hyphenated
//! lowercase strings.

use chrono::{DateTime, Utc};
use uuid::Uuid;
use volume_core::{identity::DeviceIdentity, prefs::BookmarkKind};

use crate::Result;

// ─── Uuid ─────────────────────────────────────────────────────────────────────

pub fn encode_uuid(id: Uuid) -> String { id.hyphenated().to_string() }

pub fn decode_uuid(s: &str) -> Result<Uuid> { Ok(Uuid::parse_str(s)?) }

// ─── DateTime<Utc> ────────────────────────────────────────────────────────────

pub fn encode_dt(dt: DateTime<Utc>) -> String { dt.to_rfc3339() }

// ─── BookmarkKind ─────────────────────────────────────────────────────────────

pub fn encode_bookmark_kind(k: BookmarkKind) -> &'static str { k.as_str() }

// ─── Raw row types ────────────────────────────────────────────────────────────

/// The identity row as read from SQLite, before UUID parsing.
pub struct RawIdentity {
  pub device_token: String,
  pub user_uuid:    String,
}

impl RawIdentity {
  pub fn into_identity(self) -> Result<DeviceIdentity> {
    Ok(DeviceIdentity {
      device_token: self.device_token,
      user_uuid:    decode_uuid(&self.user_uuid)?,
    })
  }
}
