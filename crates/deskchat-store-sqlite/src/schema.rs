//! SQL schema for the deskchat SQLite store.
//!
//! Executed once at connection startup. Future migrations will be gated on
//! `PRAGMA user_version`.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;
PRAGMA foreign_keys = ON;

CREATE TABLE IF NOT EXISTS conversations (
    conversation_id TEXT PRIMARY KEY,
    created_at      TEXT NOT NULL
);

-- Messages are strictly append-only.
-- No UPDATE or DELETE is ever issued against this table.
-- `seq` breaks ties between messages recorded within the same instant.
CREATE TABLE IF NOT EXISTS messages (
    seq             INTEGER PRIMARY KEY AUTOINCREMENT,
    message_id      TEXT NOT NULL UNIQUE,
    conversation_id TEXT NOT NULL REFERENCES conversations(conversation_id),
    sender          TEXT NOT NULL CHECK (sender IN ('user', 'ai')),
    text            TEXT NOT NULL,
    created_at      TEXT NOT NULL   -- fixed-width RFC 3339 UTC; server-assigned
);

CREATE INDEX IF NOT EXISTS messages_conversation_idx
    ON messages(conversation_id, created_at, seq);

PRAGMA user_version = 1;
";
