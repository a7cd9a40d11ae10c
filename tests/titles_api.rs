//! Title truncation API over HTTP.

use serde_json::{json, Value};
use std::net::SocketAddr;
use std::time::Duration;

use note_studio::config::AppConfig;

mod common;

async fn post(server: &common::TestServer, path: &str, body: Value) -> Value {
    let res = common::client()
        .post(server.url(path))
        .json(&body)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 200, "POST {} with {}", path, body);
    res.json().await.unwrap()
}

#[tokio::test]
async fn test_truncate_single() {
    let addr: SocketAddr = "127.0.0.1:28311".parse().unwrap();
    let server = common::start_server(addr, AppConfig::default()).await;

    let body = post(&server, "/api/titles/truncate", json!({ "title": "  hello  " })).await;
    assert_eq!(body["title"], "hello");

    let long = "字".repeat(25);
    let body = post(&server, "/api/titles/truncate", json!({ "title": long })).await;
    assert_eq!(body["title"], "字".repeat(20));

    let body = post(
        &server,
        "/api/titles/truncate",
        json!({ "title": "abcdef", "max_length": 3 }),
    )
    .await;
    assert_eq!(body["title"], "abc");
}

#[tokio::test]
async fn test_truncate_single_fail_soft() {
    let addr: SocketAddr = "127.0.0.1:28312".parse().unwrap();
    let server = common::start_server(addr, AppConfig::default()).await;

    for title in [json!(null), json!(42), json!({"a": 1}), json!([1, 2])] {
        let body = post(&server, "/api/titles/truncate", json!({ "title": title })).await;
        assert_eq!(body["title"], "");
    }

    let body = post(&server, "/api/titles/truncate", json!({})).await;
    assert_eq!(body["title"], "");
}

#[tokio::test]
async fn test_truncate_many() {
    let addr: SocketAddr = "127.0.0.1:28313".parse().unwrap();
    let server = common::start_server(addr, AppConfig::default()).await;

    let body = post(
        &server,
        "/api/titles/truncate-many",
        json!({ "titles": ["", "  ", "abc"] }),
    )
    .await;
    assert_eq!(body["titles"], json!(["abc"]));

    let body = post(
        &server,
        "/api/titles/truncate-many",
        json!({ "titles": "not-an-array" }),
    )
    .await;
    assert_eq!(body["titles"], json!([]));

    let body = post(
        &server,
        "/api/titles/truncate-many",
        json!({ "titles": ["a".repeat(25), "short", null, 0, 7] }),
    )
    .await;
    assert_eq!(body["titles"], json!(["a".repeat(20), "short", "7"]));
}

#[tokio::test]
async fn test_reloaded_title_length() {
    let addr: SocketAddr = "127.0.0.1:28314".parse().unwrap();
    let server = common::start_server(addr, AppConfig::default()).await;

    let mut updated = AppConfig::default();
    updated.titles.max_length = 4;
    server.config_tx.send(updated).unwrap();
    tokio::time::sleep(Duration::from_millis(100)).await;

    let body = post(&server, "/api/titles/truncate", json!({ "title": "abcdefgh" })).await;
    assert_eq!(body["title"], "abcd");

    // explicit length still wins
    let body = post(
        &server,
        "/api/titles/truncate",
        json!({ "title": "abcdefgh", "max_length": 6 }),
    )
    .await;
    assert_eq!(body["title"], "abcdef");
}
