//! End-to-end tests for the HTTP API.
//!
//! Each test binds an ephemeral port, drives the pet through a manual clock,
//! and talks to it with a real HTTP client.

use std::net::SocketAddr;
use std::sync::Arc;

use chrono::{TimeZone, Utc};
use serde_json::{json, Value};
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;

use nova_pet::{serve, ManualClock, PetService, Result};

struct TestServer {
    addr: SocketAddr,
    clock: Arc<ManualClock>,
    client: reqwest::Client,
    shutdown: Option<oneshot::Sender<()>>,
    handle: JoinHandle<Result<()>>,
}

impl TestServer {
    async fn start() -> Self {
        let clock = Arc::new(ManualClock::new(
            Utc.with_ymd_and_hms(2024, 5, 4, 10, 0, 0).unwrap(),
        ));
        let service = PetService::with_clock("Nova", clock.clone());

        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind test listener");
        let addr = listener.local_addr().expect("No local addr");

        let (tx, rx) = oneshot::channel::<()>();
        let handle = tokio::spawn(serve(listener, service, async move {
            let _ = rx.await;
        }));

        Self {
            addr,
            clock,
            client: reqwest::Client::new(),
            shutdown: Some(tx),
            handle,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    async fn get(&self, path: &str) -> Value {
        let response = self
            .client
            .get(self.url(path))
            .send()
            .await
            .expect("GET failed");
        assert_eq!(response.status(), reqwest::StatusCode::OK);
        response.json().await.expect("Invalid JSON")
    }

    async fn post(&self, path: &str) -> Value {
        let response = self
            .client
            .post(self.url(path))
            .send()
            .await
            .expect("POST failed");
        assert_eq!(response.status(), reqwest::StatusCode::OK);
        response.json().await.expect("Invalid JSON")
    }

    async fn stop(mut self) {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }
        self.handle
            .await
            .expect("Server task panicked")
            .expect("Server returned an error");
    }
}

#[tokio::test]
async fn test_status_of_new_pet() {
    let server = TestServer::start().await;

    let body = server.get("/status").await;
    assert_eq!(
        body,
        json!({"name": "Nova", "hunger": 50, "happiness": 70, "mood": "Neutral"})
    );

    server.stop().await;
}

#[tokio::test]
async fn test_feed_returns_updated_status() {
    let server = TestServer::start().await;

    let body = server.post("/feed").await;
    assert_eq!(
        body,
        json!({"name": "Nova", "hunger": 25, "happiness": 75, "mood": "Content"})
    );

    server.stop().await;
}

#[tokio::test]
async fn test_play_allowed_then_denied() {
    let server = TestServer::start().await;

    let body = server.post("/play").await;
    assert_eq!(
        body,
        json!({
            "name": "Nova",
            "hunger": 60,
            "happiness": 90,
            "mood": "Content",
            "action_allowed": true
        })
    );

    // 60 + 1.5 * 14 = 81
    server.clock.advance_minutes(14);
    let body = server.post("/play").await;
    assert_eq!(body["action_allowed"], json!(false));
    assert_eq!(body["hunger"], json!(81));
    assert_eq!(body["happiness"], json!(76));

    server.stop().await;
}

#[tokio::test]
async fn test_status_reflects_elapsed_time() {
    let server = TestServer::start().await;

    server.clock.advance_minutes(10);
    let body = server.get("/status").await;
    assert_eq!(body["hunger"], json!(65));
    assert_eq!(body["happiness"], json!(60));
    assert_eq!(body["mood"], json!("Sad"));

    // same instant again, nothing changes
    let again = server.get("/status").await;
    assert_eq!(body, again);

    server.stop().await;
}

#[tokio::test]
async fn test_cors_allows_any_origin() {
    let server = TestServer::start().await;

    let response = server
        .client
        .get(server.url("/status"))
        .header("Origin", "http://example.com")
        .send()
        .await
        .expect("GET failed");
    assert_eq!(
        response
            .headers()
            .get("access-control-allow-origin")
            .and_then(|v| v.to_str().ok()),
        Some("*")
    );

    let preflight = server
        .client
        .request(reqwest::Method::OPTIONS, server.url("/play"))
        .header("Origin", "http://example.com")
        .header("Access-Control-Request-Method", "POST")
        .header("Access-Control-Request-Headers", "content-type")
        .send()
        .await
        .expect("OPTIONS failed");
    assert!(preflight.status().is_success());
    assert_eq!(
        preflight
            .headers()
            .get("access-control-allow-origin")
            .and_then(|v| v.to_str().ok()),
        Some("*")
    );

    server.stop().await;
}

#[tokio::test]
async fn test_wrong_method_and_unknown_route() {
    let server = TestServer::start().await;

    let response = server
        .client
        .get(server.url("/feed"))
        .send()
        .await
        .expect("GET failed");
    assert_eq!(response.status(), reqwest::StatusCode::METHOD_NOT_ALLOWED);

    let response = server
        .client
        .get(server.url("/nope"))
        .send()
        .await
        .expect("GET failed");
    assert_eq!(response.status(), reqwest::StatusCode::NOT_FOUND);

    // rejected requests never touch the pet
    let body = server.get("/status").await;
    assert_eq!(body["hunger"], json!(50));

    server.stop().await;
}
