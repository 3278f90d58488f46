//! Handlers for `/chat` endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `POST` | `/chat/message` | Body: `{"message":"...","sessionId":"..."?}` |
//! | `GET`  | `/chat/:sessionId` | Full ordered history; empty for unknown sessions |
//!
//! `GET /chat/message` is a history lookup for the session id `"message"`;
//! only `POST` on that path submits.

use axum::{
  Json,
  extract::{Path, State, rejection::JsonRejection},
};
use deskchat_core::{
  chat::ChatService, conversation::Message, generator::ReplyGenerator, store::ChatStore,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ApiError;

const SUBMIT_FAILED: &str = "Something went wrong. Please try again.";
const HISTORY_FAILED: &str = "Could not fetch conversation history";

// ─── Submit ───────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitBody {
  #[serde(default)]
  pub message:    Option<String>,
  /// `null`, missing, and `""` all mean "start a new session".
  #[serde(default)]
  pub session_id: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitResponse {
  pub reply:      String,
  pub session_id: Uuid,
}

/// `POST /chat/message`
pub async fn submit<S, G>(
  State(chat): State<ChatService<S, G>>,
  body: Result<Json<SubmitBody>, JsonRejection>,
) -> Result<Json<SubmitResponse>, ApiError>
where
  S: ChatStore,
  G: ReplyGenerator,
{
  let Json(body) = body.map_err(|e| ApiError::BadRequest(e.body_text()))?;

  let reply = chat
    .handle_user_message(body.message.as_deref().unwrap_or_default(), body.session_id.as_deref())
    .await
    .map_err(|e| ApiError::from_core(e, SUBMIT_FAILED))?;

  Ok(Json(SubmitResponse { reply: reply.reply, session_id: reply.session_id }))
}

// ─── History ──────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryResponse {
  pub session_id: String,
  pub messages:   Vec<Message>,
}

/// `GET /chat/:sessionId`
pub async fn history<S, G>(
  State(chat): State<ChatService<S, G>>,
  Path(session_id): Path<String>,
) -> Result<Json<HistoryResponse>, ApiError>
where
  S: ChatStore,
  G: ReplyGenerator,
{
  history_of(&chat, session_id).await
}

/// `GET /chat/message` — shares its path with the submit route.
pub async fn history_of_literal_message<S, G>(
  State(chat): State<ChatService<S, G>>,
) -> Result<Json<HistoryResponse>, ApiError>
where
  S: ChatStore,
  G: ReplyGenerator,
{
  history_of(&chat, "message".to_owned()).await
}

async fn history_of<S, G>(
  chat: &ChatService<S, G>,
  session_id: String,
) -> Result<Json<HistoryResponse>, ApiError>
where
  S: ChatStore,
  G: ReplyGenerator,
{
  let messages = chat
    .history(&session_id)
    .await
    .map_err(|e| ApiError::from_core(e, HISTORY_FAILED))?;
  Ok(Json(HistoryResponse { session_id, messages }))
}

/// `GET /chat/` — the session id segment is empty.
pub async fn history_without_id() -> ApiError {
  ApiError::BadRequest("sessionId is required".to_owned())
}
