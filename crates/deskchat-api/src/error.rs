//! API error type and [`axum::response::IntoResponse`] implementation.

use axum::{
  Json,
  http::StatusCode,
  response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

/// An error returned by an API handler.
#[derive(Debug, Error)]
pub enum ApiError {
  /// Caller-caused; the message is returned verbatim.
  #[error("bad request: {0}")]
  BadRequest(String),

  /// Anything else. Only `public` reaches the client; `source` is logged.
  #[error("{public}: {source}")]
  Internal {
    public: &'static str,
    #[source]
    source: Box<dyn std::error::Error + Send + Sync>,
  },
}

impl ApiError {
  /// Map a core error, using `public` as the client-facing text for
  /// anything that is not caller-caused.
  pub fn from_core(e: deskchat_core::Error, public: &'static str) -> Self {
    match e {
      deskchat_core::Error::InvalidInput(msg) => ApiError::BadRequest(msg),
      other => ApiError::Internal { public, source: Box::new(other) },
    }
  }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let (status, message) = match self {
      ApiError::BadRequest(m) => {
        tracing::debug!(reason = %m, "rejected request");
        (StatusCode::BAD_REQUEST, m)
      }
      ApiError::Internal { public, source } => {
        tracing::error!(error = %source, "{}", public);
        (StatusCode::INTERNAL_SERVER_ERROR, public.to_owned())
      }
    };
    (status, Json(json!({ "error": message }))).into_response()
  }
}
