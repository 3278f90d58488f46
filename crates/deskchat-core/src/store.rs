//! The `ChatStore` trait.
//!
//! Implemented by storage backends (e.g. `deskchat-store-sqlite`). Higher
//! layers depend on this abstraction, not on any concrete backend.

use std::future::Future;

use uuid::Uuid;

use crate::conversation::{Conversation, Message, NewMessage};

/// Abstraction over the conversation/message store.
///
/// Both relations are append-only: nothing is updated or deleted. Each call
/// is an independent operation; callers that need several of them to succeed
/// together must say so explicitly.
///
/// All methods return `Send` futures so the trait can be used in
/// multi-threaded async runtimes (e.g. tokio with `axum`).
pub trait ChatStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Create and persist a new, empty conversation.
  fn create_conversation(
    &self,
  ) -> impl Future<Output = Result<Conversation, Self::Error>> + Send + '_;

  /// Retrieve a conversation by id. Returns `None` if not found.
  fn find_conversation(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<Option<Conversation>, Self::Error>> + Send + '_;

  /// Persist a message. The store assigns `message_id` and `created_at`.
  fn append_message(
    &self,
    input: NewMessage,
  ) -> impl Future<Output = Result<Message, Self::Error>> + Send + '_;

  /// All messages of a conversation, oldest first. Messages created within
  /// the same timestamp come back in insertion order. Unknown conversations
  /// yield an empty list.
  fn list_messages(
    &self,
    conversation_id: Uuid,
  ) -> impl Future<Output = Result<Vec<Message>, Self::Error>> + Send + '_;
}
