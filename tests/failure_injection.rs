//! Failure injection tests for the webchat proxy.

use std::time::{Duration, Instant};

use reqwest::StatusCode;
use serde_json::{json, Value};

mod common;

use common::{start_fixed_upstream, start_proxy, start_upstream, test_config, MockResponse};

#[tokio::test]
async fn test_upstream_error_status_translated_to_json() {
    let upstream = start_fixed_upstream(MockResponse::status(429, "Too Many Requests")).await;

    let mut config = test_config();
    config.upstream.api_key = Some("sk-server".into());
    config.upstream.default_url = Some(upstream.url());
    let (proxy, shutdown) = start_proxy(config).await;

    let res = common::client()
        .post(format!("{}/proxy/chat/completions", proxy))
        .body("{}")
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::TOO_MANY_REQUESTS);
    assert_eq!(res.headers()["access-control-allow-origin"], "*");
    let body: Value = res.json().await.unwrap();
    assert_eq!(
        body,
        json!({"error": {"message": "Too Many Requests", "type": "http_error", "code": 429}})
    );

    shutdown.trigger();
}

#[tokio::test]
async fn test_upstream_reason_phrase_relayed_verbatim() {
    for (status, reason) in [(429, "Slow Down"), (599, "Network Connect Timeout")] {
        let upstream = start_fixed_upstream(MockResponse::status(status, reason)).await;

        let mut config = test_config();
        config.upstream.api_key = Some("sk-server".into());
        config.upstream.default_url = Some(upstream.url());
        let (proxy, shutdown) = start_proxy(config).await;

        let res = common::client()
            .get(format!("{}/proxy/models", proxy))
            .send()
            .await
            .unwrap();

        assert_eq!(res.status().as_u16(), status);
        let body: Value = res.json().await.unwrap();
        assert_eq!(
            body,
            json!({"error": {"message": reason, "type": "http_error", "code": status}})
        );

        shutdown.trigger();
    }
}

#[tokio::test]
async fn test_upstream_server_error_keeps_status() {
    let upstream = start_fixed_upstream(MockResponse::status(502, "Bad Gateway")).await;

    let mut config = test_config();
    config.upstream.api_key = Some("sk-server".into());
    config.upstream.default_url = Some(upstream.url());
    let (proxy, shutdown) = start_proxy(config).await;

    let res = common::client()
        .get(format!("{}/proxy/models", proxy))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::BAD_GATEWAY);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["error"]["code"], 502);
    assert_eq!(body["error"]["type"], "http_error");
    // One attempt only.
    assert_eq!(upstream.requests().len(), 1);

    shutdown.trigger();
}

#[tokio::test]
async fn test_unreachable_upstream_is_500_and_server_survives() {
    let dead = common::dead_address().await;

    let mut config = test_config();
    config.upstream.api_key = Some("sk-server".into());
    config.upstream.default_url = Some(format!("http://{}", dead));
    let (proxy, shutdown) = start_proxy(config).await;

    let client = common::client();
    let res = client
        .get(format!("{}/proxy/models", proxy))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = res.text().await.unwrap();
    assert!(body.starts_with("URL Error:"), "unexpected body: {}", body);

    // Still serving.
    let res = client
        .get(format!("{}/not-a-route", proxy))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    assert_eq!(res.text().await.unwrap(), "Not Found");

    shutdown.trigger();
}

#[tokio::test]
async fn test_invalid_key_encoding_makes_no_upstream_call() {
    let upstream = start_fixed_upstream(MockResponse::ok("{}")).await;

    let mut config = test_config();
    config.upstream.default_url = Some(upstream.url());
    let (proxy, shutdown) = start_proxy(config).await;

    let res = common::client()
        .get(format!("{}/proxy/models", proxy))
        .header("X-API-Key", "not*valid*base64")
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    assert!(res
        .text()
        .await
        .unwrap()
        .starts_with("Invalid API key encoding"));
    assert!(upstream.requests().is_empty());

    shutdown.trigger();
}

#[tokio::test]
async fn test_missing_key_and_missing_target() {
    let mut config = test_config();
    let (proxy, shutdown) = start_proxy(config.clone()).await;

    let res = common::client()
        .get(format!("{}/proxy/models", proxy))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body = res.text().await.unwrap();
    assert!(body.contains("X-API-Key"));
    assert!(body.contains("OPENWEBUI_API_KEY"));
    shutdown.trigger();

    config.upstream.api_key = Some("sk-server".into());
    let (proxy, shutdown) = start_proxy(config).await;
    let res = common::client()
        .get(format!("{}/proxy/models", proxy))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    assert!(res.text().await.unwrap().contains("X-OpenWebUI-URL"));
    shutdown.trigger();
}

#[tokio::test]
async fn test_slow_upstream_does_not_block_other_requests() {
    let upstream = start_upstream(|request| async move {
        if request.target.starts_with("/slow") {
            tokio::time::sleep(Duration::from_millis(1500)).await;
            MockResponse::ok("slow")
        } else {
            MockResponse::ok("fast")
        }
    })
    .await;

    let mut config = test_config();
    config.upstream.api_key = Some("sk-server".into());
    config.upstream.default_url = Some(upstream.url());
    let (proxy, shutdown) = start_proxy(config).await;

    let client = common::client();
    let slow_url = format!("{}/proxy/slow", proxy);
    let slow_client = client.clone();
    let slow = tokio::spawn(async move { slow_client.get(&slow_url).send().await });

    tokio::time::sleep(Duration::from_millis(100)).await;

    let start = Instant::now();
    let res = client
        .get(format!("{}/proxy/fast", proxy))
        .send()
        .await
        .unwrap();
    assert_eq!(res.text().await.unwrap(), "fast");
    assert!(
        start.elapsed() < Duration::from_millis(1000),
        "fast request waited on the slow one: {:?}",
        start.elapsed()
    );
    assert!(!slow.is_finished(), "slow request should still be in flight");

    let slow_res = slow.await.unwrap().unwrap();
    assert_eq!(slow_res.text().await.unwrap(), "slow");

    shutdown.trigger();
}
