//! Conversations, messages, and the role-tagged turns handed to a model.
//!
//! A conversation is a thin envelope: an id and a creation timestamp. All of
//! its content lives in messages, which are immutable once written and are
//! replayed in creation order.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ─── Conversation ────────────────────────────────────────────────────────────

/// A persisted chat thread. Its id doubles as the client's session id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Conversation {
  #[serde(rename = "id")]
  pub conversation_id: Uuid,
  pub created_at:      DateTime<Utc>,
}

// ─── Messages ────────────────────────────────────────────────────────────────

/// Who authored a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
  User,
  Ai,
}

impl Sender {
  /// The model-facing role for messages from this sender.
  pub fn role(self) -> Role {
    match self {
      Sender::User => Role::User,
      Sender::Ai => Role::Assistant,
    }
  }
}

/// A single stored turn of a conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
  #[serde(rename = "id")]
  pub message_id:      Uuid,
  pub conversation_id: Uuid,
  pub sender:          Sender,
  pub text:            String,
  pub created_at:      DateTime<Utc>,
}

/// Input to [`ChatStore::append_message`](crate::store::ChatStore::append_message).
/// The id and timestamp are assigned by the store.
#[derive(Debug, Clone)]
pub struct NewMessage {
  pub conversation_id: Uuid,
  pub sender:          Sender,
  pub text:            String,
}

impl NewMessage {
  pub fn new(conversation_id: Uuid, sender: Sender, text: impl Into<String>) -> Self {
    Self { conversation_id, sender, text: text.into() }
  }
}

// ─── Model-facing turns ──────────────────────────────────────────────────────

/// Chat-completion role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
  System,
  User,
  Assistant,
}

/// A `{role, content}` pair as consumed by completion providers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatTurn {
  pub role:    Role,
  pub content: String,
}

impl ChatTurn {
  pub fn new(role: Role, content: impl Into<String>) -> Self {
    Self { role, content: content.into() }
  }
}

impl From<&Message> for ChatTurn {
  fn from(message: &Message) -> Self {
    Self { role: message.sender.role(), content: message.text.clone() }
  }
}
