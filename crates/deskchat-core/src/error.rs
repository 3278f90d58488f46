//! Error types for `deskchat-core`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  /// Caller-supplied input was rejected. The message is safe to show to the
  /// end user.
  #[error("{0}")]
  InvalidInput(String),

  /// The persistence layer failed.
  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl Error {
  pub fn is_invalid_input(&self) -> bool { matches!(self, Self::InvalidInput(_)) }

  pub(crate) fn store<E>(e: E) -> Self
  where
    E: std::error::Error + Send + Sync + 'static,
  {
    Self::Store(Box::new(e))
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
