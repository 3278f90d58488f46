//! Completion client configuration.

use std::fmt;

use serde::Deserialize;

/// Settings for the upstream completion API.
///
/// Only `api_key` is required to leave fallback mode; everything else has a
/// default suited to OpenAI.
#[derive(Clone, Deserialize)]
pub struct CompletionConfig {
  /// Bearer credential. Absent or blank means fallback mode.
  #[serde(default)]
  pub api_key:      Option<String>,
  #[serde(default = "default_base_url")]
  pub base_url:     String,
  #[serde(default = "default_model")]
  pub model:        String,
  #[serde(default = "default_temperature")]
  pub temperature:  f32,
  #[serde(default = "default_max_tokens")]
  pub max_tokens:   u32,
  /// Whole-request timeout. Unset means the request may wait indefinitely.
  #[serde(default)]
  pub timeout_secs: Option<u64>,
}

fn default_base_url() -> String { "https://api.openai.com/v1".to_owned() }

fn default_model() -> String { "gpt-4o-mini".to_owned() }

fn default_temperature() -> f32 { 0.3 }

fn default_max_tokens() -> u32 { 300 }

impl Default for CompletionConfig {
  fn default() -> Self {
    Self {
      api_key:      None,
      base_url:     default_base_url(),
      model:        default_model(),
      temperature:  default_temperature(),
      max_tokens:   default_max_tokens(),
      timeout_secs: None,
    }
  }
}

impl CompletionConfig {
  /// The configured credential, if it is non-blank.
  pub fn credential(&self) -> Option<&str> {
    self.api_key.as_deref().map(str::trim).filter(|k| !k.is_empty())
  }
}

impl fmt::Debug for CompletionConfig {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("CompletionConfig")
      .field("api_key", &self.credential().map(|_| "<redacted>"))
      .field("base_url", &self.base_url)
      .field("model", &self.model)
      .field("temperature", &self.temperature)
      .field("max_tokens", &self.max_tokens)
      .field("timeout_secs", &self.timeout_secs)
      .finish()
  }
}
