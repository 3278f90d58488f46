//! The fixed system prompt and request message assembly.

use deskchat_core::conversation::{ChatTurn, Role};

/// Store policy text sent ahead of every conversation.
pub const SYSTEM_PROMPT: &str = "\
You are a helpful support agent for a small e-commerce store.

Store Policies:
- Shipping: We ship worldwide. Orders arrive in 5–7 business days.
- Returns: 30-day hassle-free returns.
- Refunds: Processed within 5 business days.
- Support hours: Mon–Fri, 9am–6pm IST.

Answer clearly, concisely, and politely.
If you do not know the answer, say so honestly.
";

/// System prompt, then `history`, then `new_message` as the final user turn.
///
/// `new_message` is not appended again when `history` already ends with it.
pub fn build_messages(history: &[ChatTurn], new_message: &str) -> Vec<ChatTurn> {
  let mut messages = Vec::with_capacity(history.len() + 2);
  messages.push(ChatTurn::new(Role::System, SYSTEM_PROMPT));
  messages.extend_from_slice(history);

  let already_last = history
    .last()
    .is_some_and(|t| t.role == Role::User && t.content == new_message);
  if !already_last {
    messages.push(ChatTurn::new(Role::User, new_message));
  }
  messages
}
