//! Upstream failures. These never leave [`CompletionClient`](crate::CompletionClient)
//! through `generate_reply`; they are logged and replaced by an apology.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("http client error: {0}")]
  Transport(#[from] reqwest::Error),

  #[error("completion API returned {status}: {body}")]
  Status {
    status: reqwest::StatusCode,
    body:   String,
  },

  #[error("malformed completion response: {0}")]
  Decode(#[from] serde_json::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
