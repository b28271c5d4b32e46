//! Integration tests: the real gateway against fake Telegram and Google Books servers.
//!
//! The fake upstream records every sendMessage body and every volumes query so tests can
//! assert exactly which outbound calls a webhook delivery produced.

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use bookbot_core::config::Config;
use bookbot_core::gateway;
use bookbot_core::reply::{NO_BOOKS_REPLY, NO_TOPICS_REPLY};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

const TOKEN: &str = "test-token";
const BOOKS_KEY: &str = "test-key";

#[derive(Default)]
struct Upstream {
    queries: Mutex<Vec<HashMap<String, String>>>,
    sent: Mutex<Vec<Value>>,
}

async fn volumes(
    State(up): State<Arc<Upstream>>,
    Query(params): Query<HashMap<String, String>>,
) -> Json<Value> {
    up.queries.lock().unwrap().push(params);
    Json(json!({
        "kind": "books#volumes",
        "totalItems": 1,
        "items": [
            { "volumeInfo": { "title": "Dune", "authors": ["Frank Herbert"], "infoLink": "http://example.com/dune" } }
        ]
    }))
}

async fn broken_volumes(
    State(up): State<Arc<Upstream>>,
    Query(params): Query<HashMap<String, String>>,
) -> (StatusCode, &'static str) {
    up.queries.lock().unwrap().push(params);
    (StatusCode::INTERNAL_SERVER_ERROR, "backend error")
}

async fn send_message(State(up): State<Arc<Upstream>>, Json(body): Json<Value>) -> Json<Value> {
    up.sent.lock().unwrap().push(body);
    Json(json!({ "ok": true, "result": {} }))
}

async fn start_upstream() -> (Arc<Upstream>, SocketAddr) {
    let up = Arc::new(Upstream::default());
    let app = Router::new()
        .route("/books/v1/volumes", get(volumes))
        .route("/broken/volumes", get(broken_volumes))
        .route(&format!("/bot{}/sendMessage", TOKEN), post(send_message))
        .with_state(up.clone());
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind upstream");
    let addr = listener.local_addr().expect("upstream addr");
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    (up, addr)
}

fn free_port() -> u16 {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind free port");
    listener.local_addr().expect("local_addr").port()
}

fn config_for(upstream: SocketAddr, books_path: &str, token: &str) -> Config {
    let mut config = Config::default();
    config.gateway.port = free_port();
    config.gateway.bind = "127.0.0.1".to_string();
    config.channels.telegram.bot_token = Some(token.to_string());
    config.channels.telegram.api_base = Some(format!("http://{}", upstream));
    config.books.api_key = Some(BOOKS_KEY.to_string());
    config.books.api_base = Some(format!("http://{}{}", upstream, books_path));
    config.http.timeout_secs = 5;
    config
}

/// Start the gateway and wait until GET / answers. Returns the webhook URL.
async fn start_gateway(config: Config) -> String {
    let port = config.gateway.port;
    tokio::spawn(async move {
        let _ = gateway::run_gateway(config).await;
    });
    let client = reqwest::Client::new();
    let health = format!("http://127.0.0.1:{}/", port);
    for _ in 0..100 {
        if let Ok(resp) = client.get(&health).send().await {
            if resp.status().is_success() {
                return format!("http://127.0.0.1:{}/webhook", port);
            }
        }
        tokio::time::sleep(Duration::from_millis(50)).await;
    }
    panic!("gateway on port {} did not come up within 5s", port);
}

async fn post_raw(url: &str, body: &str) -> (StatusCode, String) {
    let resp = reqwest::Client::new()
        .post(url)
        .header("content-type", "application/json")
        .body(body.to_string())
        .send()
        .await
        .expect("webhook POST");
    let status = StatusCode::from_u16(resp.status().as_u16()).expect("status");
    (status, resp.text().await.expect("body"))
}

#[tokio::test]
async fn text_message_gets_book_reply() {
    let (up, addr) = start_upstream().await;
    let url = start_gateway(config_for(addr, "/books/v1/volumes", TOKEN)).await;

    let (status, body) = post_raw(
        &url,
        r#"{"message": {"chat": {"id": 42}, "text": "I love science fiction novels"}}"#,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "OK");

    let queries = up.queries.lock().unwrap().clone();
    assert_eq!(queries.len(), 1);
    let q = &queries[0];
    assert_eq!(q.get("q").map(String::as_str), Some("science fiction novels"));
    assert_eq!(q.get("maxResults").map(String::as_str), Some("10"));
    assert_eq!(q.get("printType").map(String::as_str), Some("books"));
    assert_eq!(q.get("key").map(String::as_str), Some(BOOKS_KEY));

    let sent = up.sent.lock().unwrap().clone();
    assert_eq!(
        sent,
        vec![json!({
            "chat_id": 42,
            "text": "Here are top books from the internet:\n-- Dune by Frank Herbert\nLink(http://example.com/dune)\n\n"
        })]
    );
}

#[tokio::test]
async fn non_text_and_malformed_payloads_are_acknowledged_silently() {
    let (up, addr) = start_upstream().await;
    let url = start_gateway(config_for(addr, "/books/v1/volumes", TOKEN)).await;

    for payload in [
        r#"{"update_id": 1, "message": {"chat": {"id": 1}, "sticker": {}}}"#,
        r#"{"update_id": 2, "edited_message": {"chat": {"id": 1}, "text": "edited"}}"#,
        r#"{"message": "not an object"}"#,
        "this is not json",
        "",
    ] {
        let (status, body) = post_raw(&url, payload).await;
        assert_eq!(status, StatusCode::OK, "payload {:?}", payload);
        assert_eq!(body, "OK");
    }

    assert!(up.queries.lock().unwrap().is_empty());
    assert!(up.sent.lock().unwrap().is_empty());
}

#[tokio::test]
async fn empty_text_replies_without_searching() {
    let (up, addr) = start_upstream().await;
    let url = start_gateway(config_for(addr, "/books/v1/volumes", TOKEN)).await;

    let (status, _) = post_raw(&url, r#"{"message": {"chat": {"id": 5}, "text": ""}}"#).await;
    assert_eq!(status, StatusCode::OK);

    assert!(up.queries.lock().unwrap().is_empty());
    assert_eq!(
        up.sent.lock().unwrap().clone(),
        vec![json!({ "chat_id": 5, "text": NO_TOPICS_REPLY })]
    );
}

#[tokio::test]
async fn search_failure_degrades_to_no_books() {
    let (up, addr) = start_upstream().await;
    let url = start_gateway(config_for(addr, "/broken/volumes", TOKEN)).await;

    let (status, body) = post_raw(
        &url,
        r#"{"message": {"chat": {"id": 8}, "text": "books about dragons"}}"#,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "OK");

    assert_eq!(up.queries.lock().unwrap().len(), 1);
    assert_eq!(
        up.sent.lock().unwrap().clone(),
        vec![json!({ "chat_id": 8, "text": NO_BOOKS_REPLY })]
    );
}

#[tokio::test]
async fn send_failure_still_acknowledges() {
    let (up, addr) = start_upstream().await;
    // The fake only serves sendMessage for TOKEN, so this token gets a 404.
    let url = start_gateway(config_for(addr, "/books/v1/volumes", "revoked-token")).await;

    let (status, body) = post_raw(
        &url,
        r#"{"message": {"chat": {"id": 9}, "text": "space opera"}}"#,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "OK");
    assert_eq!(up.queries.lock().unwrap().len(), 1);
    assert!(up.sent.lock().unwrap().is_empty());
}
