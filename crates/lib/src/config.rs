//! Configuration types and loading.
//!
//! Config is loaded from a JSON file (e.g. `~/.bookbot/config.json`). The binary then overlays
//! environment values with [`Config::apply_env`]; resolvers below only read the config itself.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_TELEGRAM_API_BASE: &str = "https://api.telegram.org";
pub const DEFAULT_BOOKS_API_BASE: &str = "https://www.googleapis.com/books/v1/volumes";

/// Top-level application config.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Webhook server settings.
    #[serde(default)]
    pub gateway: GatewayConfig,

    /// Channel settings (Telegram).
    #[serde(default)]
    pub channels: ChannelsConfig,

    /// Book catalog API settings.
    #[serde(default)]
    pub books: BooksConfig,

    /// Outbound HTTP settings shared by every client.
    #[serde(default)]
    pub http: HttpConfig,
}

/// Gateway bind and port settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GatewayConfig {
    /// Port for the webhook endpoint (default 5000).
    #[serde(default = "default_gateway_port")]
    pub port: u16,

    /// Bind address (default "127.0.0.1").
    #[serde(default = "default_gateway_bind")]
    pub bind: String,
}

fn default_gateway_port() -> u16 {
    5000
}

fn default_gateway_bind() -> String {
    "127.0.0.1".to_string()
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            port: default_gateway_port(),
            bind: default_gateway_bind(),
        }
    }
}

/// Per-channel config.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChannelsConfig {
    #[serde(default)]
    pub telegram: TelegramChannelConfig,
}

/// Telegram channel config.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TelegramChannelConfig {
    /// Bot token from BotFather. Overridden by TELEGRAM_TOKEN env when set.
    pub bot_token: Option<String>,
    /// Public URL Telegram should POST updates to. Registered via setWebhook at startup when set.
    pub webhook_url: Option<String>,
    /// Bot API base URL. Overridden by TELEGRAM_API_BASE env when set.
    pub api_base: Option<String>,
}

/// Book catalog config.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BooksConfig {
    /// API key for the book catalog. Overridden by GOOGLE_BOOKS_API_KEY env when set.
    pub api_key: Option<String>,
    /// Volumes endpoint. Overridden by GOOGLE_BOOKS_API_BASE env when set.
    pub api_base: Option<String>,
}

/// Outbound HTTP config.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HttpConfig {
    /// Whole-request timeout for book search and sendMessage calls (default 10).
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_timeout_secs() -> u64 {
    10
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl HttpConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs.max(1))
    }
}

/// Secrets the server cannot start without.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub telegram_token: String,
    pub books_api_key: String,
}

/// Environment variables that override config fields in [`Config::apply_env`].
pub const ENV_TELEGRAM_TOKEN: &str = "TELEGRAM_TOKEN";
pub const ENV_TELEGRAM_API_BASE: &str = "TELEGRAM_API_BASE";
pub const ENV_BOOKS_API_KEY: &str = "GOOGLE_BOOKS_API_KEY";
pub const ENV_BOOKS_API_BASE: &str = "GOOGLE_BOOKS_API_BASE";

/// Trimmed value, or None when missing or blank.
fn non_empty(value: Option<&String>) -> Option<String> {
    value.map(|s| s.trim().to_string()).filter(|s| !s.is_empty())
}

impl Config {
    /// Overlay secrets and API bases from the environment. Blank values are ignored.
    /// `lookup` is usually `|k| std::env::var(k).ok()`.
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let fields = [
            (ENV_TELEGRAM_TOKEN, &mut self.channels.telegram.bot_token),
            (ENV_TELEGRAM_API_BASE, &mut self.channels.telegram.api_base),
            (ENV_BOOKS_API_KEY, &mut self.books.api_key),
            (ENV_BOOKS_API_BASE, &mut self.books.api_base),
        ];
        for (name, field) in fields {
            if let Some(value) = non_empty(lookup(name).as_ref()) {
                *field = Some(value);
            }
        }
    }
}

/// Resolve the Telegram bot token.
pub fn resolve_telegram_token(config: &Config) -> Option<String> {
    non_empty(config.channels.telegram.bot_token.as_ref())
}

/// Resolve the book API key.
pub fn resolve_books_api_key(config: &Config) -> Option<String> {
    non_empty(config.books.api_key.as_ref())
}

/// Resolve the Bot API base URL (config, then the public endpoint). No trailing slash.
pub fn resolve_telegram_api_base(config: &Config) -> String {
    non_empty(config.channels.telegram.api_base.as_ref())
        .unwrap_or_else(|| DEFAULT_TELEGRAM_API_BASE.to_string())
        .trim_end_matches('/')
        .to_string()
}

/// Resolve the volumes endpoint (config, then the public endpoint).
pub fn resolve_books_api_base(config: &Config) -> String {
    non_empty(config.books.api_base.as_ref())
        .unwrap_or_else(|| DEFAULT_BOOKS_API_BASE.to_string())
        .trim_end_matches('/')
        .to_string()
}

/// Resolve both secrets. Fails naming every missing one so startup can refuse before serving.
pub fn resolve_credentials(config: &Config) -> Result<Credentials> {
    let telegram_token = resolve_telegram_token(config);
    let books_api_key = resolve_books_api_key(config);
    match (telegram_token, books_api_key) {
        (Some(telegram_token), Some(books_api_key)) => Ok(Credentials {
            telegram_token,
            books_api_key,
        }),
        (t, k) => {
            let mut missing = Vec::new();
            if t.is_none() {
                missing.push("Telegram token (TELEGRAM_TOKEN or channels.telegram.botToken)");
            }
            if k.is_none() {
                missing.push("Google Books API key (GOOGLE_BOOKS_API_KEY or books.apiKey)");
            }
            anyhow::bail!("missing configuration: {}", missing.join(", "))
        }
    }
}

/// Build the pooled HTTP client used for every outbound call, bounded by `http.timeoutSecs`.
pub fn build_http_client(config: &Config) -> Result<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(config.http.timeout())
        .build()
        .context("building HTTP client")
}

/// Resolve config path from env or default.
pub fn default_config_path() -> PathBuf {
    std::env::var("BOOKBOT_CONFIG_PATH")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            dirs::home_dir()
                .map(|h| h.join(".bookbot").join("config.json"))
                .unwrap_or_else(|| PathBuf::from("config.json"))
        })
}

/// Load config from the given path, else the default path (or BOOKBOT_CONFIG_PATH). Missing file => default config.
/// Returns the config and the path that was used.
pub fn load_config(path: Option<PathBuf>) -> Result<(Config, PathBuf)> {
    let path = path.unwrap_or_else(default_config_path);
    let config = if !path.exists() {
        log::debug!("config file not found, using defaults: {}", path.display());
        Config::default()
    } else {
        let s = std::fs::read_to_string(&path)
            .with_context(|| format!("reading config from {}", path.display()))?;
        serde_json::from_str(&s)
            .with_context(|| format!("parsing config from {}", path.display()))?
    };
    Ok((config, path))
}
