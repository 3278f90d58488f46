//! Deterministic keyword responder used when no model backend is configured.
//!
//! Rules are checked in table order and the first keyword found in the
//! lower-cased message wins, so "can I return something you ship?" gets the
//! shipping answer.

#[cfg(test)]
use std::future::{Future, ready};

#[cfg(test)]
use crate::{conversation::ChatTurn, generator::ReplyGenerator};

/// A keyword and the canned answer it triggers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FallbackRule {
  /// Lower-case substring searched for in the message.
  pub keyword: &'static str,
  pub answer:  &'static str,
}

/// Priority-ordered rule table.
pub const RULES: &[FallbackRule] = &[
  FallbackRule {
    keyword: "ship",
    answer:  "Yes, we ship worldwide. Orders usually arrive within 5–7 business days.",
  },
  FallbackRule {
    keyword: "return",
    answer:  "We offer a 30-day hassle-free return policy for unused items.",
  },
  FallbackRule {
    keyword: "refund",
    answer:  "Refunds are processed within 5 business days after we receive the returned item.",
  },
  FallbackRule {
    keyword: "support",
    answer:  "Our support hours are Monday to Friday, 9am to 6pm IST.",
  },
];

/// Returned when no rule matches.
pub const DEFAULT_ANSWER: &str =
  "Thanks for your message! Our support team will be happy to assist you.";

/// The first rule whose keyword occurs in `message`, ignoring case.
pub fn matching_rule(message: &str) -> Option<&'static FallbackRule> {
  let text = message.to_lowercase();
  RULES.iter().find(|rule| text.contains(rule.keyword))
}

/// Canned answer for `message`.
pub fn reply(message: &str) -> &'static str {
  matching_rule(message).map_or(DEFAULT_ANSWER, |rule| rule.answer)
}

/// [`ReplyGenerator`] that only ever consults the rule table.
#[cfg(test)]
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct FallbackResponder;

#[cfg(test)]
impl ReplyGenerator for FallbackResponder {
  fn generate_reply<'a>(
    &'a self,
    _history: &'a [ChatTurn],
    new_message: &'a str,
  ) -> impl Future<Output = String> + Send + 'a {
    ready(reply(new_message).to_owned())
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn answer_for(keyword: &str) -> &'static str {
    RULES
      .iter()
      .find(|r| r.keyword == keyword)
      .map(|r| r.answer)
      .unwrap()
  }

  #[test]
  fn priority_order_is_explicit() {
    let keywords: Vec<_> = RULES.iter().map(|r| r.keyword).collect();
    assert_eq!(keywords, ["ship", "return", "refund", "support"]);
  }

  #[test]
  fn each_keyword_maps_to_its_answer() {
    assert_eq!(reply("Do you ship internationally?"), answer_for("ship"));
    assert_eq!(reply("How do I return a jacket?"), answer_for("return"));
    assert_eq!(reply("Where is my refund"), answer_for("refund"));
    assert_eq!(reply("When is support open?"), answer_for("support"));
  }

  #[test]
  fn matching_ignores_case() {
    assert_eq!(reply("SHIPPING COSTS?"), answer_for("ship"));
    assert_eq!(reply("ReFuNd please"), answer_for("refund"));
  }

  #[test]
  fn earliest_rule_wins_over_position_in_message() {
    // "return" appears first in the text but "ship" has priority.
    assert_eq!(reply("return it or ship a new one"), answer_for("ship"));
    assert_eq!(reply("support for my refund"), answer_for("refund"));
    assert_eq!(reply("refund or return?"), answer_for("return"));
  }

  #[test]
  fn substring_matches_count() {
    // "relationship" contains "ship".
    assert_eq!(reply("our relationship"), answer_for("ship"));
  }

  #[test]
  fn unmatched_message_gets_default() {
    assert_eq!(reply("hello there"), DEFAULT_ANSWER);
    assert!(matching_rule("hello there").is_none());
  }

  #[tokio::test]
  async fn responder_ignores_history() {
    let history = vec![ChatTurn::new(crate::conversation::Role::User, "refund")];
    let text = FallbackResponder.generate_reply(&history, "hi").await;
    assert_eq!(text, DEFAULT_ANSWER);
  }
}
