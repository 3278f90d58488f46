//! Runtime configuration, read from an optional TOML file and then from
//! `DESKCHAT_*` environment variables.
//!
//! Nested keys use `__` in the environment, e.g.
//! `DESKCHAT_COMPLETION__MODEL=gpt-4o`. `DESKCHAT_ALLOWED_ORIGINS` takes a
//! comma-separated list.

use std::path::{Path, PathBuf};

use deskchat_llm::CompletionConfig;
use serde::Deserialize;

/// Runtime server configuration.
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
  pub host:            String,
  pub port:            u16,
  pub store_path:      PathBuf,
  /// Origins allowed to call the API from a browser, with credentials.
  pub allowed_origins: Vec<String>,
  #[serde(default)]
  pub completion:      CompletionConfig,
}

impl ServerConfig {
  /// Load from `path` (missing file is fine) layered under the environment.
  pub fn load(path: &Path) -> Result<Self, config::ConfigError> {
    config::Config::builder()
      .set_default("host", "127.0.0.1")?
      .set_default("port", 3000_i64)?
      .set_default("store_path", "deskchat.db")?
      .set_default("allowed_origins", vec!["http://localhost:5173"])?
      .add_source(config::File::from(path).required(false))
      .add_source(
        config::Environment::with_prefix("DESKCHAT")
          .prefix_separator("_")
          .separator("__")
          .list_separator(",")
          .with_list_parse_key("allowed_origins")
          .try_parsing(true),
      )
      .build()?
      .try_deserialize()
  }

  pub fn address(&self) -> String { format!("{}:{}", self.host, self.port) }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn temp_file(contents: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("deskchat-cfg-{}", uuid::Uuid::new_v4()));
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("config.toml");
    std::fs::write(&path, contents).unwrap();
    path
  }

  #[test]
  fn defaults_without_file() {
    let cfg = ServerConfig::load(Path::new("/nonexistent/deskchat.toml")).unwrap();
    assert_eq!(cfg.port, 3000);
    assert_eq!(cfg.store_path, PathBuf::from("deskchat.db"));
    assert_eq!(cfg.allowed_origins, ["http://localhost:5173"]);
    assert_eq!(cfg.completion.model, "gpt-4o-mini");
  }

  #[test]
  fn file_overrides_defaults() {
    let path = temp_file(
      r#"
port = 8080
allowed_origins = ["https://shop.example", "https://admin.example"]

[completion]
api_key = "sk-file"
model = "gpt-4o"
max_tokens = 120
"#,
    );
    let cfg = ServerConfig::load(&path).unwrap();
    assert_eq!(cfg.address(), "127.0.0.1:8080");
    assert_eq!(cfg.allowed_origins.len(), 2);
    assert_eq!(cfg.completion.credential(), Some("sk-file"));
    assert_eq!(cfg.completion.model, "gpt-4o");
    assert_eq!(cfg.completion.max_tokens, 120);
    assert_eq!(cfg.completion.base_url, "https://api.openai.com/v1");
  }
}
