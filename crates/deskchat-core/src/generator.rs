//! The `ReplyGenerator` trait — anything that can answer the next turn.

use std::future::Future;

use crate::conversation::ChatTurn;

/// Produces the assistant's next reply.
///
/// Implementations never fail: upstream problems are absorbed and turned into
/// a textual reply, so the conversation always gets an answer.
pub trait ReplyGenerator: Send + Sync {
  /// `history` is the conversation so far, oldest first. `new_message` is the
  /// user's latest text; it may already be the last entry of `history`.
  fn generate_reply<'a>(
    &'a self,
    history: &'a [ChatTurn],
    new_message: &'a str,
  ) -> impl Future<Output = String> + Send + 'a;
}
