//! [`CompletionClient`] — one request/response exchange per reply.

use std::{future::Future, time::Duration};

use deskchat_core::{conversation::ChatTurn, fallback, generator::ReplyGenerator};
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::{CompletionConfig, Error, Result, prompt::build_messages};

/// Sent when the upstream request fails for any reason.
pub const UNAVAILABLE_REPLY: &str =
  "Sorry, I'm having trouble right now. Please try again later.";

/// Sent when the upstream answers but with no usable content.
pub const EMPTY_REPLY: &str = "Sorry, I couldn't generate a response.";

// ─── Wire types ──────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
struct CompletionRequest<'a> {
  model:       &'a str,
  messages:    Vec<ChatTurn>,
  temperature: f32,
  max_tokens:  u32,
}

#[derive(Debug, Deserialize)]
struct CompletionResponse {
  #[serde(default)]
  choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
  message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
  content: Option<String>,
}

// ─── Backend ─────────────────────────────────────────────────────────────────

/// A configured, credentialed upstream.
#[derive(Clone)]
struct Upstream {
  client:      Client,
  api_key:     String,
  url:         String,
  model:       String,
  temperature: f32,
  max_tokens:  u32,
}

impl Upstream {
  /// Returns `Ok(None)` when the response carries no usable text.
  async fn complete(&self, history: &[ChatTurn], new_message: &str) -> Result<Option<String>> {
    let request = CompletionRequest {
      model:       &self.model,
      messages:    build_messages(history, new_message),
      temperature: self.temperature,
      max_tokens:  self.max_tokens,
    };

    let response = self
      .client
      .post(&self.url)
      .bearer_auth(&self.api_key)
      .json(&request)
      .send()
      .await?;

    let status = response.status();
    let body = response.text().await?;
    if !status.is_success() {
      return Err(Error::Status { status, body });
    }

    let parsed: CompletionResponse = serde_json::from_str(&body)?;
    Ok(
      parsed
        .choices
        .into_iter()
        .next()
        .and_then(|c| c.message.content)
        .filter(|c| !c.trim().is_empty()),
    )
  }
}

// ─── Client ──────────────────────────────────────────────────────────────────

/// Model-backed [`ReplyGenerator`] with a keyword fallback.
///
/// Cheap to clone — the inner [`reqwest::Client`] is `Arc`-based.
#[derive(Clone)]
pub struct CompletionClient {
  upstream: Option<Upstream>,
}

impl CompletionClient {
  /// Build a client from `config`. Without a credential the client never
  /// touches the network.
  pub fn new(config: &CompletionConfig) -> Result<Self> {
    let Some(api_key) = config.credential() else {
      return Ok(Self::fallback_only());
    };

    let mut builder = Client::builder();
    if let Some(secs) = config.timeout_secs {
      builder = builder.timeout(Duration::from_secs(secs));
    }

    Ok(Self {
      upstream: Some(Upstream {
        client:      builder.build()?,
        api_key:     api_key.to_owned(),
        url:         format!("{}/chat/completions", config.base_url.trim_end_matches('/')),
        model:       config.model.clone(),
        temperature: config.temperature,
        max_tokens:  config.max_tokens,
      }),
    })
  }

  /// A client that always answers from the keyword fallback.
  pub fn fallback_only() -> Self { Self { upstream: None } }

  /// Whether replies come from the upstream model.
  pub fn is_model_backed(&self) -> bool { self.upstream.is_some() }
}

impl ReplyGenerator for CompletionClient {
  fn generate_reply<'a>(
    &'a self,
    history: &'a [ChatTurn],
    new_message: &'a str,
  ) -> impl Future<Output = String> + Send + 'a {
    async move {
      let Some(upstream) = &self.upstream else {
        return fallback::reply(new_message).to_owned();
      };

      match upstream.complete(history, new_message).await {
        Ok(Some(text)) => text,
        Ok(None) => {
          tracing::warn!(model = %upstream.model, "completion response had no content");
          EMPTY_REPLY.to_owned()
        }
        Err(e) => {
          tracing::warn!(error = %e, model = %upstream.model, "completion request failed");
          UNAVAILABLE_REPLY.to_owned()
        }
      }
    }
  }
}
