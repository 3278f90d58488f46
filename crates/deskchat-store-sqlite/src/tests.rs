//! Integration tests for `SqliteStore` against an in-memory database.

use chrono::Utc;
use deskchat_core::{
  conversation::{NewMessage, Sender},
  store::ChatStore,
};
use uuid::Uuid;

use crate::{
  SqliteStore,
  encode::{encode_dt, encode_uuid},
};

async fn store() -> SqliteStore {
  SqliteStore::open_in_memory()
    .await
    .expect("in-memory store")
}

// ─── Conversations ───────────────────────────────────────────────────────────

#[tokio::test]
async fn create_and_find_conversation() {
  let s = store().await;

  let created = s.create_conversation().await.unwrap();
  let fetched = s.find_conversation(created.conversation_id).await.unwrap();
  assert_eq!(fetched, Some(created));
}

#[tokio::test]
async fn find_missing_conversation_returns_none() {
  let s = store().await;
  let result = s.find_conversation(Uuid::new_v4()).await.unwrap();
  assert!(result.is_none());
}

#[tokio::test]
async fn conversations_get_distinct_ids() {
  let s = store().await;
  let a = s.create_conversation().await.unwrap();
  let b = s.create_conversation().await.unwrap();
  assert_ne!(a.conversation_id, b.conversation_id);
}

// ─── Messages ────────────────────────────────────────────────────────────────

#[tokio::test]
async fn append_and_list_messages_in_order() {
  let s = store().await;
  let c = s.create_conversation().await.unwrap();
  let id = c.conversation_id;

  let texts = ["first", "second", "third", "fourth"];
  let senders = [Sender::User, Sender::Ai, Sender::User, Sender::Ai];
  for (text, sender) in texts.iter().zip(senders) {
    s.append_message(NewMessage::new(id, sender, *text)).await.unwrap();
  }

  let messages = s.list_messages(id).await.unwrap();
  assert_eq!(messages.len(), 4);
  assert_eq!(messages.iter().map(|m| m.text.as_str()).collect::<Vec<_>>(), texts);
  assert_eq!(messages.iter().map(|m| m.sender).collect::<Vec<_>>(), senders);
  assert!(messages.windows(2).all(|w| w[0].created_at <= w[1].created_at));
}

#[tokio::test]
async fn identical_timestamps_keep_insertion_order() {
  let s = store().await;
  let c = s.create_conversation().await.unwrap();
  let conversation = encode_uuid(c.conversation_id);
  let at = encode_dt(Utc::now());

  // Texts sort differently from insertion order, so only `seq` can explain
  // the result.
  s.conn
    .call(move |conn| {
      for text in ["z-first", "a-second", "m-third"] {
        conn.execute(
          "INSERT INTO messages (message_id, conversation_id, sender, text, created_at)
           VALUES (?1, ?2, 'user', ?3, ?4)",
          rusqlite::params![encode_uuid(Uuid::new_v4()), conversation, text, at],
        )?;
      }
      Ok(())
    })
    .await
    .unwrap();

  let messages = s.list_messages(c.conversation_id).await.unwrap();
  let texts: Vec<_> = messages.iter().map(|m| m.text.as_str()).collect();
  assert_eq!(texts, ["z-first", "a-second", "m-third"]);
  assert!(messages.windows(2).all(|w| w[0].created_at == w[1].created_at));
}

#[tokio::test]
async fn appended_message_round_trips() {
  let s = store().await;
  let c = s.create_conversation().await.unwrap();

  let saved = s
    .append_message(NewMessage::new(c.conversation_id, Sender::User, "héllo ✓"))
    .await
    .unwrap();
  let listed = s.list_messages(c.conversation_id).await.unwrap();
  assert_eq!(listed, vec![saved]);
}

#[tokio::test]
async fn messages_are_scoped_to_their_conversation() {
  let s = store().await;
  let a = s.create_conversation().await.unwrap();
  let b = s.create_conversation().await.unwrap();

  s.append_message(NewMessage::new(a.conversation_id, Sender::User, "for a"))
    .await
    .unwrap();
  s.append_message(NewMessage::new(b.conversation_id, Sender::User, "for b"))
    .await
    .unwrap();

  let in_a = s.list_messages(a.conversation_id).await.unwrap();
  assert_eq!(in_a.len(), 1);
  assert_eq!(in_a[0].text, "for a");
}

#[tokio::test]
async fn list_for_unknown_conversation_is_empty() {
  let s = store().await;
  assert!(s.list_messages(Uuid::new_v4()).await.unwrap().is_empty());
}

#[tokio::test]
async fn append_to_unknown_conversation_fails() {
  let s = store().await;
  let result = s
    .append_message(NewMessage::new(Uuid::new_v4(), Sender::User, "orphan"))
    .await;
  assert!(result.is_err());
}

#[tokio::test]
async fn reopening_a_file_keeps_data() {
  let dir = std::env::temp_dir().join(format!("deskchat-test-{}", Uuid::new_v4()));
  std::fs::create_dir_all(&dir).unwrap();
  let path = dir.join("chat.db");

  let id = {
    let s = SqliteStore::open(&path).await.unwrap();
    let c = s.create_conversation().await.unwrap();
    s.append_message(NewMessage::new(c.conversation_id, Sender::User, "persisted"))
      .await
      .unwrap();
    c.conversation_id
  };

  let s = SqliteStore::open(&path).await.unwrap();
  assert!(s.find_conversation(id).await.unwrap().is_some());
  assert_eq!(s.list_messages(id).await.unwrap()[0].text, "persisted");

  drop(s);
  let _ = std::fs::remove_dir_all(&dir);
}
