//! Core types and trait definitions for the deskchat support widget.
//!
//! This crate is deliberately free of HTTP and database dependencies.
//! Storage backends implement [`store::ChatStore`], model backends implement
//! [`generator::ReplyGenerator`], and [`chat::ChatService`] ties the two
//! together.

pub mod chat;
pub mod conversation;
pub mod error;
pub mod fallback;
pub mod generator;
pub mod store;

pub use error::{Error, Result};
