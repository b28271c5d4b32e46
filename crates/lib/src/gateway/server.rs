//! Webhook HTTP server.

use crate::books::GoogleBooksClient;
use crate::channels::{TelegramChannel, TelegramUpdate};
use crate::config::{self, Config};
use crate::gateway::handler::{handle_update, AppState};
use crate::nlp::NounPhraseChunker;
use anyhow::{Context, Result};
use axum::{
    body::Body,
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde_json::json;
use std::sync::Arc;

/// Largest update body read from Telegram. Anything bigger is acknowledged and dropped.
const MAX_UPDATE_BYTES: usize = 2 * 1024 * 1024;

/// Routes: `POST /webhook` for Telegram updates, `GET /` for health probes.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(health_http))
        .route("/webhook", post(webhook))
        .with_state(state)
}

/// Run the webhook server; binds to config.gateway.bind:config.gateway.port.
/// Fails before binding when the bot token or book API key is missing.
/// Blocks until shutdown (e.g. Ctrl+C).
pub async fn run_gateway(config: Config) -> Result<()> {
    let credentials = config::resolve_credentials(&config)?;
    let http = config::build_http_client(&config)?;

    let telegram = Arc::new(TelegramChannel::new(
        credentials.telegram_token,
        config::resolve_telegram_api_base(&config),
        http.clone(),
    ));
    let books = Arc::new(GoogleBooksClient::new(
        config::resolve_books_api_base(&config),
        credentials.books_api_key,
        http,
    ));
    let extractor = Arc::new(NounPhraseChunker::default());

    let webhook_registered = match config.channels.telegram.webhook_url.as_deref() {
        Some(url) if !url.trim().is_empty() => match telegram.set_webhook(url.trim()).await {
            Ok(()) => {
                log::info!("telegram webhook registered: {}", url.trim());
                true
            }
            Err(e) => {
                log::warn!("telegram set_webhook failed: {}", e);
                false
            }
        },
        _ => false,
    };

    let state = AppState {
        config: Arc::new(config.clone()),
        extractor,
        books,
        sender: telegram.clone(),
    };
    let app = router(state);

    let bind_addr = format!("{}:{}", config.gateway.bind.trim(), config.gateway.port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("binding to {}", bind_addr))?;
    log::info!("webhook listening on {}", bind_addr);

    let webhook_owner = webhook_registered.then_some(telegram);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(webhook_owner))
        .await
        .context("webhook server exited")?;
    log::info!("webhook server stopped");
    Ok(())
}

/// Future that completes when the process should shut down (SIGINT or SIGTERM).
/// Removes the Telegram webhook if this process registered it.
async fn shutdown_signal(telegram_webhook: Option<Arc<TelegramChannel>>) {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            log::warn!("failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                log::warn!("failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    log::info!("shutdown signal received, draining connections");

    if let Some(t) = telegram_webhook {
        if let Err(e) = t.delete_webhook().await {
            log::debug!("telegram delete_webhook on shutdown: {}", e);
        }
    }
}

/// POST /webhook: runs the reply pipeline for text messages. Always 200 "OK", whatever happened inside.
async fn webhook(State(state): State<AppState>, body: Body) -> (StatusCode, &'static str) {
    let body = match axum::body::to_bytes(body, MAX_UPDATE_BYTES).await {
        Ok(body) => body,
        Err(e) => {
            log::warn!("webhook: dropping unreadable or oversized body: {}", e);
            return (StatusCode::OK, "OK");
        }
    };
    log::info!("Received data: {}", String::from_utf8_lossy(&body));
    match serde_json::from_slice::<TelegramUpdate>(&body) {
        Ok(update) => handle_update(&state, &update).await,
        Err(e) => log::debug!("webhook: ignoring unrecognized payload: {}", e),
    }
    (StatusCode::OK, "OK")
}

/// GET / returns a simple health JSON (for probes).
async fn health_http(State(state): State<AppState>) -> Json<serde_json::Value> {
    Json(json!({
        "runtime": "running",
        "port": state.config.gateway.port,
    }))
}
