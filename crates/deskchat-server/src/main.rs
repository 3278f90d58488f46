//! deskchat server binary.
//!
//! Reads `config.toml` (or the path given with `--config`), opens the SQLite
//! store, and serves the chat API over HTTP.
//!
//! ```
//! OPENAI_API_KEY=sk-... cargo run -p deskchat-server -- --config config.toml
//! ```
//!
//! Without a completion credential the server answers from the keyword
//! fallback.

use std::{
  path::{Path, PathBuf},
  sync::Arc,
};

use anyhow::Context as _;
use clap::Parser;
use deskchat_core::chat::ChatService;
use deskchat_llm::CompletionClient;
use deskchat_server::ServerConfig;
use deskchat_store_sqlite::SqliteStore;
use tokio::net::TcpListener;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about = "deskchat support chat server")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "config.toml")]
  config: PathBuf,

  /// Completion API credential; overrides `completion.api_key`.
  #[arg(long, env = "OPENAI_API_KEY", hide_env_values = true)]
  openai_api_key: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .init();

  let cli = Cli::parse();

  let mut server_cfg = ServerConfig::load(&cli.config)
    .with_context(|| format!("failed to load configuration from {:?}", cli.config))?;
  if let Some(key) = cli.openai_api_key {
    server_cfg.completion.api_key = Some(key);
  }

  let store_path = expand_tilde(&server_cfg.store_path);
  let store = SqliteStore::open(&store_path)
    .await
    .with_context(|| format!("failed to open store at {store_path:?}"))?;

  let completion = CompletionClient::new(&server_cfg.completion)
    .context("failed to build completion client")?;
  if completion.is_model_backed() {
    tracing::info!(model = %server_cfg.completion.model, "replies come from the completion API");
  } else {
    tracing::info!("no completion credential configured; using keyword fallback");
  }

  let chat = ChatService::new(Arc::new(store), Arc::new(completion));
  let app = deskchat_server::app(chat, &server_cfg);
  let address = server_cfg.address();

  tracing::info!(origins = ?server_cfg.allowed_origins, "Listening on http://{address}");
  let listener = TcpListener::bind(&address)
    .await
    .with_context(|| format!("failed to bind {address}"))?;

  axum::serve(listener, app).await.context("server error")?;

  Ok(())
}

/// Expand a leading `~` to the user's home directory.
fn expand_tilde(path: &Path) -> PathBuf {
  let s = path.to_string_lossy();
  if let Some(rest) = s.strip_prefix("~/")
    && let Ok(home) = std::env::var("HOME")
  {
    return PathBuf::from(home).join(rest);
  }
  path.to_path_buf()
}
