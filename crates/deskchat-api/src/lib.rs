//! JSON HTTP API for the deskchat widget.
//!
//! Exposes an axum [`Router`] backed by a [`ChatService`]. CORS, TLS, and
//! transport concerns are the caller's responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! let app = deskchat_api::chat_router(chat).layer(cors);
//! ```

pub mod chat;
pub mod error;

use axum::{
  Router,
  routing::{get, post},
};
use deskchat_core::{chat::ChatService, generator::ReplyGenerator, store::ChatStore};

pub use error::ApiError;

/// Build the `/chat` router for `chat`.
pub fn chat_router<S, G>(chat: ChatService<S, G>) -> Router<()>
where
  S: ChatStore + 'static,
  G: ReplyGenerator + 'static,
{
  Router::new()
    .route(
      "/chat/message",
      post(chat::submit::<S, G>).get(chat::history_of_literal_message::<S, G>),
    )
    .route("/chat/", get(chat::history_without_id))
    .route("/chat/{session_id}", get(chat::history::<S, G>))
    .with_state(chat)
}

// ─── Integration tests ────────────────────────────────────────────────────────
