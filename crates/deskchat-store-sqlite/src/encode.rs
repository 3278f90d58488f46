//! Encoding and decoding helpers between domain types and the plain-text
//! representations stored in SQLite columns.
//!
//! Timestamps are stored as RFC 3339 strings with a fixed nine-digit
//! fraction, so lexical order equals chronological order. UUIDs are stored as
//! hyphenated lowercase strings.

use chrono::{DateTime, SecondsFormat, Utc};
use deskchat_core::conversation::{Conversation, Message, Sender};
use uuid::Uuid;

use crate::{Error, Result};

// ─── Uuid ─────────────────────────────────────────────────────────────────────

pub fn encode_uuid(id: Uuid) -> String { id.hyphenated().to_string() }

pub fn decode_uuid(s: &str) -> Result<Uuid> { Ok(Uuid::parse_str(s)?) }

// ─── DateTime<Utc> ───────────────────────────────────────────────────────────

pub fn encode_dt(dt: DateTime<Utc>) -> String {
  dt.to_rfc3339_opts(SecondsFormat::Nanos, true)
}

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::DateParse(e.to_string()))
}

// ─── Sender ──────────────────────────────────────────────────────────────────

pub fn encode_sender(s: Sender) -> &'static str {
  match s {
    Sender::User => "user",
    Sender::Ai => "ai",
  }
}

pub fn decode_sender(s: &str) -> Result<Sender> {
  match s {
    "user" => Ok(Sender::User),
    "ai" => Ok(Sender::Ai),
    other => Err(Error::UnknownSender(other.to_owned())),
  }
}

// ─── Row types ───────────────────────────────────────────────────────────────

/// Raw strings read directly from a `conversations` row.
pub struct RawConversation {
  pub conversation_id: String,
  pub created_at:      String,
}

impl RawConversation {
  pub fn into_conversation(self) -> Result<Conversation> {
    Ok(Conversation {
      conversation_id: decode_uuid(&self.conversation_id)?,
      created_at:      decode_dt(&self.created_at)?,
    })
  }
}

/// Raw strings read directly from a `messages` row.
pub struct RawMessage {
  pub message_id:      String,
  pub conversation_id: String,
  pub sender:          String,
  pub text:            String,
  pub created_at:      String,
}

impl RawMessage {
  pub fn into_message(self) -> Result<Message> {
    Ok(Message {
      message_id:      decode_uuid(&self.message_id)?,
      conversation_id: decode_uuid(&self.conversation_id)?,
      sender:          decode_sender(&self.sender)?,
      text:            self.text,
      created_at:      decode_dt(&self.created_at)?,
    })
  }
}
