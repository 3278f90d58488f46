//! [`SqliteStore`] — the SQLite implementation of [`ChatStore`].

use std::path::Path;

use chrono::Utc;
use rusqlite::OptionalExtension as _;
use uuid::Uuid;

use deskchat_core::{
  conversation::{Conversation, Message, NewMessage},
  store::ChatStore,
};

use crate::{
  Error, Result,
  encode::{RawConversation, RawMessage, encode_dt, encode_sender, encode_uuid},
  schema::SCHEMA,
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A conversation store backed by a single SQLite file.
///
/// Cloning is cheap — the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  pub(crate) conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store — useful for testing.
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
}

// ─── ChatStore impl ──────────────────────────────────────────────────────────

impl ChatStore for SqliteStore {
  type Error = Error;

  async fn create_conversation(&self) -> Result<Conversation> {
    let conversation = Conversation {
      conversation_id: Uuid::new_v4(),
      created_at:      Utc::now(),
    };

    let id_str = encode_uuid(conversation.conversation_id);
    let at_str = encode_dt(conversation.created_at);

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO conversations (conversation_id, created_at) VALUES (?1, ?2)",
          rusqlite::params![id_str, at_str],
        )?;
        Ok(())
      })
      .await?;

    Ok(conversation)
  }

  async fn find_conversation(&self, id: Uuid) -> Result<Option<Conversation>> {
    let id_str = encode_uuid(id);

    let raw: Option<RawConversation> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              "SELECT conversation_id, created_at FROM conversations
               WHERE conversation_id = ?1",
              rusqlite::params![id_str],
              |row| {
                Ok(RawConversation {
                  conversation_id: row.get(0)?,
                  created_at:      row.get(1)?,
                })
              },
            )
            .optional()?,
        )
      })
      .await?;

    raw.map(RawConversation::into_conversation).transpose()
  }

  async fn append_message(&self, input: NewMessage) -> Result<Message> {
    let message = Message {
      message_id:      Uuid::new_v4(),
      conversation_id: input.conversation_id,
      sender:          input.sender,
      text:            input.text,
      created_at:      Utc::now(),
    };

    let id_str           = encode_uuid(message.message_id);
    let conversation_str = encode_uuid(message.conversation_id);
    let sender_str       = encode_sender(message.sender);
    let text             = message.text.clone();
    let at_str           = encode_dt(message.created_at);

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO messages (message_id, conversation_id, sender, text, created_at)
           VALUES (?1, ?2, ?3, ?4, ?5)",
          rusqlite::params![id_str, conversation_str, sender_str, text, at_str],
        )?;
        Ok(())
      })
      .await?;

    Ok(message)
  }

  async fn list_messages(&self, conversation_id: Uuid) -> Result<Vec<Message>> {
    let id_str = encode_uuid(conversation_id);

    let raws: Vec<RawMessage> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(
          "SELECT message_id, conversation_id, sender, text, created_at
           FROM messages
           WHERE conversation_id = ?1
           ORDER BY created_at ASC, seq ASC",
        )?;
        let rows = stmt
          .query_map(rusqlite::params![id_str], |row| {
            Ok(RawMessage {
              message_id:      row.get(0)?,
              conversation_id: row.get(1)?,
              sender:          row.get(2)?,
              text:            row.get(3)?,
              created_at:      row.get(4)?,
            })
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawMessage::into_message).collect()
  }
}
