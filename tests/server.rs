use portfolio_chat::fallback::CannedResponseTable;
use portfolio_chat::responder::{CannedResponder, Responder};
use portfolio_chat::server::router;
use serde_json::{json, Value};
use std::net::SocketAddr;
use std::sync::Arc;

async fn spawn_canned_server() -> SocketAddr {
    let responder: Arc<dyn Responder> = Arc::new(CannedResponder::new(Arc::new(
        CannedResponseTable::builtin(),
    )));
    let app = router(responder);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind listener");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move { axum::serve(listener, app).await.expect("serve app") });
    addr
}

#[tokio::test]
async fn test_chat_returns_canned_answer() {
    let addr = spawn_canned_server().await;

    let response = reqwest::Client::new()
        .post(format!("http://{}/chat", addr))
        .json(&json!({ "question": "How can I contact him?" }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 200);

    let body: Value = response.json().await.unwrap();
    assert_eq!(body["origin"], "canned");
    assert!(body["answer"].as_str().unwrap().contains("Email:"));
}

#[tokio::test]
async fn test_chat_empty_question_gets_default() {
    let addr = spawn_canned_server().await;

    let body: Value = reqwest::Client::new()
        .post(format!("http://{}/chat", addr))
        .json(&json!({ "question": "" }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(
        body["answer"],
        CannedResponseTable::builtin().default_answer()
    );
}

#[tokio::test]
async fn test_chat_rejects_missing_question() {
    let addr = spawn_canned_server().await;

    let response = reqwest::Client::new()
        .post(format!("http://{}/chat", addr))
        .json(&json!({ "text": "hello" }))
        .send()
        .await
        .unwrap();
    assert!(response.status().is_client_error());
}

#[tokio::test]
async fn test_health() {
    let addr = spawn_canned_server().await;

    let body: Value = reqwest::get(format!("http://{}/health", addr))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body["status"], "ok");
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
}
