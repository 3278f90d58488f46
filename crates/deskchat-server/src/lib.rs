//! Server assembly for deskchat: configuration, CORS, and the composed
//! application router.

pub mod config;
pub mod cors;

use deskchat_core::{chat::ChatService, generator::ReplyGenerator, store::ChatStore};
use tower_http::trace::TraceLayer;

pub use self::config::ServerConfig;

/// The chat API with CORS and request tracing applied.
pub fn app<S, G>(chat: ChatService<S, G>, config: &ServerConfig) -> axum::Router
where
  S: ChatStore + 'static,
  G: ReplyGenerator + 'static,
{
  deskchat_api::chat_router(chat)
    .layer(cors::cors_layer(&config.allowed_origins))
    .layer(TraceLayer::new_for_http())
}
