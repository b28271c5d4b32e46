//! Initialize the configuration directory: create ~/.bookbot and a template config.json.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

use crate::config::{self, Config};

/// Template written by `bookbot init`: every default spelled out, secrets left empty.
pub fn template_config() -> Config {
    let mut config = Config::default();
    config.channels.telegram.bot_token = Some(String::new());
    config.channels.telegram.api_base = Some(config::DEFAULT_TELEGRAM_API_BASE.to_string());
    config.books.api_key = Some(String::new());
    config.books.api_base = Some(config::DEFAULT_BOOKS_API_BASE.to_string());
    config
}

/// Create the config directory and a template config if it does not exist.
/// An existing config file is left untouched. Returns the config directory.
pub fn init_config_dir(config_path: &Path) -> Result<PathBuf> {
    let config_dir = config_path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    std::fs::create_dir_all(config_dir)
        .with_context(|| format!("creating config directory {}", config_dir.display()))?;

    if config_path.exists() {
        log::debug!("config already exists at {}, skipping", config_path.display());
    } else {
        let body = serde_json::to_string_pretty(&template_config())
            .context("serializing template config")?;
        std::fs::write(config_path, body)
            .with_context(|| format!("writing default config to {}", config_path.display()))?;
        log::info!("created default config at {}", config_path.display());
    }

    Ok(config_dir.to_path_buf())
}
