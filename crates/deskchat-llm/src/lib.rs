//! Completion client for deskchat.
//!
//! [`CompletionClient`] talks to any OpenAI-compatible chat-completions
//! endpoint. Without a credential it answers from the keyword fallback in
//! [`deskchat_core::fallback`]; with one, upstream failures are logged and
//! turned into an apology so callers always get text back.

mod client;
mod config;
mod prompt;

pub mod error;

pub use client::{CompletionClient, EMPTY_REPLY, UNAVAILABLE_REPLY};
pub use config::CompletionConfig;
pub use error::{Error, Result};
pub use prompt::SYSTEM_PROMPT;
