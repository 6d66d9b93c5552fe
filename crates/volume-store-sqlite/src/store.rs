//! [`SqliteStore`] — the SQLite implementation of [`PreferencesStore`].

use std::path::Path;

use chrono::Utc;
use rusqlite::OptionalExtension as _;
use volume_core::{
  identity::DeviceIdentity,
  prefs::{BookmarkKind, PreferencesStore},
};

use crate::{
  Error, Result,
  encode::{RawIdentity, encode_bookmark_kind, encode_dt, encode_uuid},
  schema::SCHEMA,
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// Preferences for one installation, backed by a single SQLite file.
///
/// Cloning is cheap; the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store, as the tests do.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  /// Remove every bookmark and follow, keeping the identity.
  pub async fn clear_library(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch("DELETE FROM bookmarks; DELETE FROM followed_publications;")?;
        Ok(())
      })
      .await?;
    Ok(())
  }
}

// ─── PreferencesStore impl ───────────────────────────────────────────────────

impl PreferencesStore for SqliteStore {
  type Error = Error;

  // ── Identity ──────────────────────────────────────────────────────────────

  async fn identity(&self) -> Result<Option<DeviceIdentity>> {
    let raw: Option<RawIdentity> = self
      .conn
      .call(|conn| {
        Ok(conn
          .query_row(
            "SELECT device_token, user_uuid FROM identity WHERE slot = 0",
            [],
            |row| {
              Ok(RawIdentity {
                device_token: row.get(0)?,
                user_uuid:    row.get(1)?,
              })
            },
          )
          .optional()?)
      })
      .await?;

    raw.map(RawIdentity::into_identity).transpose()
  }

  async fn save_identity(&self, identity: &DeviceIdentity) -> Result<()> {
    let token    = identity.device_token.clone();
    let uuid_str = encode_uuid(identity.user_uuid);
    let at_str   = encode_dt(Utc::now());

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO identity (slot, device_token, user_uuid, saved_at)
           VALUES (0, ?1, ?2, ?3)
           ON CONFLICT (slot) DO UPDATE SET
             device_token = excluded.device_token,
             user_uuid    = excluded.user_uuid,
             saved_at     = excluded.saved_at",
          rusqlite::params![token, uuid_str, at_str],
        )?;
        Ok(())
      })
      .await?;

    tracing::debug!(user = %identity.user_uuid, "saved device identity");
    Ok(())
  }

  // ── Bookmarks ─────────────────────────────────────────────────────────────

  async fn bookmarks(&self, kind: BookmarkKind) -> Result<Vec<String>> {
    let kind_str = encode_bookmark_kind(kind);

    let ids = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(
          "SELECT item_id FROM bookmarks WHERE kind = ?1 ORDER BY seq DESC",
        )?;
        let rows = stmt
          .query_map(rusqlite::params![kind_str], |row| row.get::<_, String>(0))?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;
    Ok(ids)
  }

  async fn is_bookmarked(&self, kind: BookmarkKind, id: &str) -> Result<bool> {
    let kind_str = encode_bookmark_kind(kind);
    let id_str   = id.to_owned();

    let found = self
      .conn
      .call(move |conn| {
        Ok(conn
          .query_row(
            "SELECT 1 FROM bookmarks WHERE kind = ?1 AND item_id = ?2",
            rusqlite::params![kind_str, id_str],
            |_| Ok(true),
          )
          .optional()?
          .unwrap_or(false))
      })
      .await?;
    Ok(found)
  }

  async fn set_bookmarked(&self, kind: BookmarkKind, id: &str, bookmarked: bool) -> Result<bool> {
    let kind_str = encode_bookmark_kind(kind);
    let id_str   = id.to_owned();
    let at_str   = encode_dt(Utc::now());

    let changed = self
      .conn
      .call(move |conn| {
        let n = if bookmarked {
          conn.execute(
            "INSERT OR IGNORE INTO bookmarks (kind, item_id, created_at, seq)
             VALUES (?1, ?2, ?3,
               (SELECT COALESCE(MAX(seq), 0) + 1 FROM bookmarks))",
            rusqlite::params![kind_str, id_str, at_str],
          )?
        } else {
          conn.execute(
            "DELETE FROM bookmarks WHERE kind = ?1 AND item_id = ?2",
            rusqlite::params![kind_str, id_str],
          )?
        };
        Ok(n > 0)
      })
      .await?;
    Ok(changed)
  }

  // ── Follows ───────────────────────────────────────────────────────────────

  async fn followed_publications(&self) -> Result<Vec<String>> {
    let slugs = self
      .conn
      .call(|conn| {
        let mut stmt =
          conn.prepare("SELECT slug FROM followed_publications ORDER BY seq ASC")?;
        let rows = stmt
          .query_map([], |row| row.get::<_, String>(0))?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;
    Ok(slugs)
  }

  async fn set_followed(&self, slug: &str, followed: bool) -> Result<bool> {
    let slug_str = slug.to_owned();
    let at_str   = encode_dt(Utc::now());

    let changed = self
      .conn
      .call(move |conn| {
        let n = if followed {
          conn.execute(
            "INSERT OR IGNORE INTO followed_publications (slug, created_at, seq)
             VALUES (?1, ?2,
               (SELECT COALESCE(MAX(seq), 0) + 1 FROM followed_publications))",
            rusqlite::params![slug_str, at_str],
          )?
        } else {
          conn.execute(
            "DELETE FROM followed_publications WHERE slug = ?1",
            rusqlite::params![slug_str],
          )?
        };
        Ok(n > 0)
      })
      .await?;
    Ok(changed)
  }
}
