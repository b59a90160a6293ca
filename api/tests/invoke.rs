use std::{net::SocketAddr, path::Path, sync::Arc};

use api::{AppState, router};
use faq_index::{FaqEntry, FaqIndex, IndexConfig, progress::NoopProgress};
use faq_testkit::{TopicEmbedder, entry};
use responder::{ChatModel, FaqResponder, Instruction, llm::ChatFuture};
use serde_json::{Value, json};

/// Answers with the instruction it was given, so tests can see which branch ran.
struct InstructionEcho;

impl ChatModel for InstructionEcho {
    fn complete<'a>(&'a self, prompt: &'a str) -> ChatFuture<'a> {
        Box::pin(async move {
            let reply = if prompt.contains(Instruction::Grounded.text()) {
                "grounded: the deadline is March 1."
            } else {
                "fallback: please contact the faculty office."
            };
            Ok(reply.to_string())
        })
    }
}

async fn responder_at(index_path: &Path, entries: Option<&[FaqEntry]>) -> FaqResponder {
    let index = FaqIndex::new(IndexConfig::new_default(index_path)).unwrap();
    if let Some(entries) = entries {
        index
            .build_from_entries(entries, &TopicEmbedder::default(), &NoopProgress)
            .await
            .unwrap();
    }
    FaqResponder::new(index, Arc::new(TopicEmbedder::default()), Arc::new(InstructionEcho))
}

async fn spawn(responder: FaqResponder) -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let app = router(Arc::new(AppState::new(responder)));
    tokio::spawn(async move { axum::serve(listener, app).await.unwrap() });
    addr
}

fn faq() -> Vec<FaqEntry> {
    vec![
        entry("What is the deadline?", "March 1."),
        entry("When is the exam?", "Week 13."),
    ]
}

async fn post_invoke(addr: SocketAddr, body: Value) -> (u16, Value) {
    let resp = reqwest::Client::new()
        .post(format!("http://{addr}/bot-invoke/invoke"))
        .json(&body)
        .send()
        .await
        .unwrap();
    let status = resp.status().as_u16();
    (status, resp.json().await.unwrap())
}

#[tokio::test]
async fn health_check_returns_plain_text() {
    let tmp = tempfile::tempdir().unwrap();
    let addr = spawn(responder_at(&tmp.path().join("faq_db"), None).await).await;

    let resp = reqwest::get(format!("http://{addr}/")).await.unwrap();
    assert_eq!(resp.status().as_u16(), 200);
    assert_eq!(resp.text().await.unwrap(), "Hi! The server is healthy.");
}

#[tokio::test]
async fn empty_body_object_is_rejected_with_fixed_message() {
    let tmp = tempfile::tempdir().unwrap();
    let addr = spawn(responder_at(&tmp.path().join("faq_db"), Some(&faq())).await).await;

    for body in [json!({}), json!({"query": null}), json!({"query": ""})] {
        let (status, json) = post_invoke(addr, body).await;
        assert_eq!(status, 400);
        assert_eq!(json, json!({"error": "The 'query' field is required."}));
    }
}

#[tokio::test]
async fn whitespace_query_is_passed_through() {
    let tmp = tempfile::tempdir().unwrap();
    let addr = spawn(responder_at(&tmp.path().join("faq_db"), Some(&faq())).await).await;

    let (status, json) = post_invoke(addr, json!({"query": "   "})).await;
    assert_eq!(status, 200);
    assert!(json["message"].as_str().unwrap().starts_with("fallback:"));
}

#[tokio::test]
async fn relevant_question_is_answered() {
    let tmp = tempfile::tempdir().unwrap();
    let addr = spawn(responder_at(&tmp.path().join("faq_db"), Some(&faq())).await).await;

    let (status, json) = post_invoke(addr, json!({"query": "When is the deadline?"})).await;
    assert_eq!(status, 200);
    let message = json["message"].as_str().unwrap();
    assert!(message.starts_with("grounded:"), "{message}");
}

#[tokio::test]
async fn unrelated_question_uses_fallback() {
    let tmp = tempfile::tempdir().unwrap();
    let addr = spawn(responder_at(&tmp.path().join("faq_db"), Some(&faq())).await).await;

    let (status, json) = post_invoke(addr, json!({"query": "How is the weather?"})).await;
    assert_eq!(status, 200);
    assert!(json["message"].as_str().unwrap().starts_with("fallback:"));
}

#[tokio::test]
async fn missing_index_is_reported_as_bad_request() {
    let tmp = tempfile::tempdir().unwrap();
    let addr = spawn(responder_at(&tmp.path().join("absent"), None).await).await;

    let (status, json) = post_invoke(addr, json!({"query": "When is the deadline?"})).await;
    assert_eq!(status, 400);
    let err = json["error"].as_str().unwrap();
    assert!(err.contains("FAQ index not found"), "{err}");
}

#[tokio::test]
async fn malformed_json_is_bad_request() {
    let tmp = tempfile::tempdir().unwrap();
    let addr = spawn(responder_at(&tmp.path().join("faq_db"), Some(&faq())).await).await;

    let resp = reqwest::Client::new()
        .post(format!("http://{addr}/bot-invoke/invoke"))
        .header("content-type", "application/json")
        .body("{not json")
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status().as_u16(), 400);
    let json: Value = resp.json().await.unwrap();
    assert!(!json["error"].as_str().unwrap().is_empty());

    let (status, _) = post_invoke(addr, json!({"query": 42})).await;
    assert_eq!(status, 400);
}

#[tokio::test]
async fn cors_preflight_is_allowed() {
    let tmp = tempfile::tempdir().unwrap();
    let addr = spawn(responder_at(&tmp.path().join("faq_db"), None).await).await;

    let resp = reqwest::Client::new()
        .request(
            reqwest::Method::OPTIONS,
            format!("http://{addr}/bot-invoke/invoke"),
        )
        .header("origin", "http://example.org")
        .header("access-control-request-method", "POST")
        .send()
        .await
        .unwrap();
    assert!(resp.status().is_success());
    assert_eq!(
        resp.headers()
            .get("access-control-allow-origin")
            .and_then(|v| v.to_str().ok()),
        Some("*")
    );
}
