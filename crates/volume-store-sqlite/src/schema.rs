//! SQL schema for the Volume preferences store.
//!
//! Executed once at connection startup. Future migrations will be gated on
//! `PRAGMA user_version`.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;

-- At most one row: the identity of this installation.
CREATE TABLE IF NOT EXISTS identity (
    slot         INTEGER PRIMARY KEY CHECK (slot = 0),
    device_token TEXT NOT NULL,
    user_uuid    TEXT NOT NULL,   -- hyphenated lowercase UUID
    saved_at     TEXT NOT NULL    -- ISO 8601 UTC
);

CREATE TABLE IF NOT EXISTS bookmarks (
    kind       TEXT NOT NULL,     -- 'article' | 'magazine'
    item_id    TEXT NOT NULL,
    created_at TEXT NOT NULL,
    seq        INTEGER NOT NULL,  -- insertion order; newest is highest
    PRIMARY KEY (kind, item_id)
);

CREATE TABLE IF NOT EXISTS followed_publications (
    slug       TEXT PRIMARY KEY,
    created_at TEXT NOT NULL,
    seq        INTEGER NOT NULL
);

CREATE INDEX IF NOT EXISTS bookmarks_seq_idx ON bookmarks(kind, seq);

PRAGMA user_version = 1;
";
