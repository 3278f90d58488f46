//! [`ChatService`] — the conversation orchestrator.
//!
//! One user turn is: validate, resolve the session, save the user message,
//! replay the history to the reply generator, save the reply.

use std::sync::Arc;

use uuid::Uuid;

use crate::{
  Error, Result,
  conversation::{ChatTurn, Conversation, Message, NewMessage, Sender},
  generator::ReplyGenerator,
  store::ChatStore,
};

/// Upper bound on a single user message, in characters.
pub const MAX_MESSAGE_CHARS: usize = 2000;

// ─── Validation ──────────────────────────────────────────────────────────────

/// Check a raw user message and return it trimmed.
///
/// Trimming strips Unicode whitespace and U+FEFF. The length limit applies to
/// the raw input, before trimming.
pub fn validate_message(raw: &str) -> Result<&str> {
  let trimmed = raw.trim_matches(|c: char| c.is_whitespace() || c == '\u{feff}');
  if trimmed.is_empty() {
    return Err(Error::InvalidInput(
      "Message must be a non-empty string".to_owned(),
    ));
  }
  if raw.chars().count() > MAX_MESSAGE_CHARS {
    return Err(Error::InvalidInput(format!(
      "Message is too long (max {MAX_MESSAGE_CHARS} characters)"
    )));
  }
  Ok(trimmed)
}

// ─── Session resolution ──────────────────────────────────────────────────────

/// Outcome of looking up a client-supplied session id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionLookup {
  Found(Conversation),
  /// Absent, blank, malformed, or unknown. All of these start a new session.
  NotFound,
}

/// Parse a client session id. Blank and non-UUID ids are treated as absent.
fn parse_session_id(session_id: Option<&str>) -> Option<Uuid> {
  session_id
    .map(str::trim)
    .filter(|s| !s.is_empty())
    .and_then(|s| Uuid::parse_str(s).ok())
}

// ─── Service ─────────────────────────────────────────────────────────────────

/// The reply to a user turn, plus the session it landed in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
  pub reply:      String,
  pub session_id: Uuid,
}

/// Orchestrates a conversation over a [`ChatStore`] and a [`ReplyGenerator`].
///
/// The steps of [`handle_user_message`](Self::handle_user_message) are
/// independent store calls and are not wrapped in a transaction: the model
/// call sits between the two writes and must not hold a database
/// transaction open. If the process fails after the user message is saved,
/// the conversation is left with an unanswered user turn. Nothing rolls that
/// back; the next turn simply replays it as history.
pub struct ChatService<S, G> {
  store:     Arc<S>,
  generator: Arc<G>,
}

impl<S, G> Clone for ChatService<S, G> {
  fn clone(&self) -> Self {
    Self { store: self.store.clone(), generator: self.generator.clone() }
  }
}

impl<S, G> ChatService<S, G>
where
  S: ChatStore,
  G: ReplyGenerator,
{
  pub fn new(store: Arc<S>, generator: Arc<G>) -> Self { Self { store, generator } }

  pub fn store(&self) -> &S { &self.store }

  /// Look up `session_id` without creating anything.
  pub async fn lookup(&self, session_id: Option<&str>) -> Result<SessionLookup> {
    let Some(id) = parse_session_id(session_id) else {
      return Ok(SessionLookup::NotFound);
    };
    let found = self.store.find_conversation(id).await.map_err(Error::store)?;
    Ok(found.map_or(SessionLookup::NotFound, SessionLookup::Found))
  }

  /// Reuse the conversation behind `session_id`, or start a new one.
  pub async fn resolve_conversation(&self, session_id: Option<&str>) -> Result<Conversation> {
    match self.lookup(session_id).await? {
      SessionLookup::Found(conversation) => Ok(conversation),
      SessionLookup::NotFound => {
        let conversation = self.store.create_conversation().await.map_err(Error::store)?;
        tracing::debug!(
          requested = session_id.unwrap_or_default(),
          session_id = %conversation.conversation_id,
          "started new conversation"
        );
        Ok(conversation)
      }
    }
  }

  /// Handle one inbound user message and return the assistant's reply.
  pub async fn handle_user_message(
    &self,
    raw_message: &str,
    session_id: Option<&str>,
  ) -> Result<Reply> {
    let message = validate_message(raw_message)?;
    let conversation = self.resolve_conversation(session_id).await?;
    let conversation_id = conversation.conversation_id;

    self
      .store
      .append_message(NewMessage::new(conversation_id, Sender::User, message))
      .await
      .map_err(Error::store)?;

    let history: Vec<ChatTurn> = self
      .store
      .list_messages(conversation_id)
      .await
      .map_err(Error::store)?
      .iter()
      .map(ChatTurn::from)
      .collect();

    let reply = self.generator.generate_reply(&history, message).await;

    self
      .store
      .append_message(NewMessage::new(conversation_id, Sender::Ai, reply.clone()))
      .await
      .map_err(Error::store)?;

    Ok(Reply { reply, session_id: conversation_id })
  }

  /// Full ordered history of a session.
  ///
  /// Unknown and malformed ids yield an empty list, the same as a session
  /// with no messages.
  pub async fn history(&self, session_id: &str) -> Result<Vec<Message>> {
    if session_id.trim().is_empty() {
      return Err(Error::InvalidInput("sessionId is required".to_owned()));
    }
    let Some(id) = parse_session_id(Some(session_id)) else {
      return Ok(Vec::new());
    };
    self.store.list_messages(id).await.map_err(Error::store)
  }
}
