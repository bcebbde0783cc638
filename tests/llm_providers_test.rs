// ABOUTME: HTTP-level tests for the Ollama, OpenAI-compatible, and remote workout API providers
// ABOUTME: Uses wiremock to verify request bodies, response parsing, and error classification
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use fitflow::errors::ErrorCode;
use fitflow::llm::{
    ChatMessage, ChatRequest, LlmCapabilities, LlmProvider, OllamaConfig, OllamaProvider,
    OpenAiCompatibleConfig, OpenAiCompatibleProvider, WorkoutApiProvider,
};
use serde_json::{json, Value};
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn workout_request() -> ChatRequest {
    ChatRequest::new(vec![
        ChatMessage::system("You are a coach."),
        ChatMessage::user("USER REQUEST: chest"),
    ])
    .with_temperature(0.2)
    .with_max_tokens(1050)
    .with_json_mode()
}

async fn first_request_body(server: &MockServer) -> Value {
    let requests = server.received_requests().await.unwrap();
    serde_json::from_slice(&requests[0].body).unwrap()
}

fn unused_local_url() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    format!("http://127.0.0.1:{port}")
}

// ============================================================================
// Ollama
// ============================================================================

fn ollama(base_url: &str) -> OllamaProvider {
    OllamaProvider::new(OllamaConfig {
        base_url: base_url.to_owned(),
        default_model: "llama3.1:8b".to_owned(),
        ..OllamaConfig::default()
    })
    .unwrap()
}

#[tokio::test]
async fn test_ollama_generate_round_trip() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/generate"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "model": "llama3.1:8b",
            "response": "{\"name\": \"Chest\"}",
            "done": true,
            "done_reason": "stop",
            "prompt_eval_count": 120,
            "eval_count": 80
        })))
        .expect(1)
        .mount(&server)
        .await;

    let provider = ollama(&server.uri());
    let response = provider.complete(&workout_request()).await.unwrap();

    assert_eq!(response.content, "{\"name\": \"Chest\"}");
    assert_eq!(response.model, "llama3.1:8b");
    assert_eq!(response.finish_reason.as_deref(), Some("stop"));
    assert_eq!(response.usage.unwrap().total_tokens, 200);

    let body = first_request_body(&server).await;
    assert_eq!(body["model"], "llama3.1:8b");
    assert_eq!(body["system"], "You are a coach.");
    assert_eq!(body["prompt"], "USER REQUEST: chest");
    assert_eq!(body["stream"], false);
    assert_eq!(body["format"], "json");
    assert_eq!(body["options"]["num_predict"], 1050);
    assert!(body["options"]["repeat_penalty"].is_number());
}

#[tokio::test]
async fn test_ollama_omits_empty_system_and_format() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/generate"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "response": "ok" })))
        .mount(&server)
        .await;

    let provider = ollama(&server.uri());
    let request = ChatRequest::new(vec![ChatMessage::user("hello")]).with_model("mistral");
    let response = provider.complete(&request).await.unwrap();

    assert_eq!(response.model, "mistral");
    assert!(response.usage.is_none());

    let body = first_request_body(&server).await;
    assert!(body.get("system").is_none());
    assert!(body.get("format").is_none());
    assert_eq!(body["model"], "mistral");
}

#[tokio::test]
async fn test_ollama_server_error_is_classified() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/generate"))
        .respond_with(
            ResponseTemplate::new(500).set_body_json(json!({ "error": "model not loaded" })),
        )
        .mount(&server)
        .await;

    let err = ollama(&server.uri())
        .complete(&workout_request())
        .await
        .unwrap_err();

    assert_eq!(err.code, ErrorCode::ExternalServiceError);
    assert!(err.message.contains("model not loaded"));
    assert!(err.message.contains("500"));
}

#[tokio::test]
async fn test_ollama_unparseable_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/generate"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>proxy</html>"))
        .mount(&server)
        .await;

    let err = ollama(&server.uri())
        .complete(&workout_request())
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::ExternalServiceError);
}

#[tokio::test]
async fn test_ollama_health_check() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/tags"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "models": [] })))
        .mount(&server)
        .await;

    assert!(ollama(&server.uri()).health_check().await.unwrap());
}

#[tokio::test]
async fn test_ollama_unreachable() {
    let provider = ollama(&unused_local_url());

    let err = provider.complete(&workout_request()).await.unwrap_err();
    assert_eq!(err.code, ErrorCode::ExternalServiceUnavailable);
    assert!(provider.health_check().await.is_err());
}

// ============================================================================
// OpenAI-compatible
// ============================================================================

fn local(base_url: &str, api_key: Option<&str>) -> OpenAiCompatibleProvider {
    OpenAiCompatibleProvider::new(OpenAiCompatibleConfig {
        base_url: format!("{base_url}/v1/"),
        api_key: api_key.map(str::to_owned),
        default_model: "qwen2.5".to_owned(),
        capabilities: LlmCapabilities::SYSTEM_MESSAGES | LlmCapabilities::JSON_MODE,
        request_timeout: None,
    })
    .unwrap()
}

#[tokio::test]
async fn test_chat_completions_round_trip() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .and(header("authorization", "Bearer secret-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "model": "qwen2.5",
            "choices": [{
                "message": { "role": "assistant", "content": "{\"name\": \"Back\"}" },
                "finish_reason": "stop"
            }],
            "usage": { "prompt_tokens": 10, "completion_tokens": 5, "total_tokens": 15 }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let provider = local(&server.uri(), Some("secret-key"));
    let response = provider.complete(&workout_request()).await.unwrap();

    assert_eq!(response.content, "{\"name\": \"Back\"}");
    assert_eq!(response.usage.unwrap().total_tokens, 15);

    let body = first_request_body(&server).await;
    assert_eq!(body["messages"][0]["role"], "system");
    assert_eq!(body["messages"][1]["role"], "user");
    assert_eq!(body["response_format"]["type"], "json_object");
    assert_eq!(body["max_tokens"], 1050);
}

#[tokio::test]
async fn test_chat_completions_without_choices() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "choices": [] })))
        .mount(&server)
        .await;

    let err = local(&server.uri(), None)
        .complete(&workout_request())
        .await
        .unwrap_err();
    assert!(err.message.contains("no choices"));
}

#[tokio::test]
async fn test_chat_completions_status_mapping() {
    for (status, code) in [
        (401, ErrorCode::ExternalAuthFailed),
        (429, ErrorCode::ExternalRateLimited),
        (503, ErrorCode::ExternalServiceUnavailable),
        (400, ErrorCode::ExternalServiceError),
    ] {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .respond_with(
                ResponseTemplate::new(status)
                    .set_body_json(json!({ "error": { "message": "upstream says no" } })),
            )
            .mount(&server)
            .await;

        let err = local(&server.uri(), None)
            .complete(&workout_request())
            .await
            .unwrap_err();
        assert_eq!(err.code, code, "status {status}");
        assert!(err.message.contains("upstream says no"));
    }
}

#[tokio::test]
async fn test_local_health_check_reports_failure_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/models"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    assert!(!local(&server.uri(), None).health_check().await.unwrap());
}

// ============================================================================
// Remote workout API
// ============================================================================

#[tokio::test]
async fn test_workout_api_forwards_prompt_and_preferences() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/generate"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "name": "Remote Workout",
            "muscles": ["chest"],
            "exercises": []
        })))
        .expect(1)
        .mount(&server)
        .await;

    let provider = WorkoutApiProvider::new(format!("{}/generate", server.uri()), None).unwrap();
    let request = ChatRequest::new(vec![ChatMessage::user("chest day")])
        .with_metadata(json!({ "injuries": ["knee"] }));
    let response = provider.complete(&request).await.unwrap();

    let content: Value = serde_json::from_str(&response.content).unwrap();
    assert_eq!(content["name"], "Remote Workout");

    let body = first_request_body(&server).await;
    assert_eq!(body, json!({ "prompt": "chest day", "preferences": { "injuries": ["knee"] } }));
}

#[tokio::test]
async fn test_workout_api_health_accepts_client_errors() {
    let server = MockServer::start().await;
    Mock::given(method("HEAD"))
        .and(path("/generate"))
        .respond_with(ResponseTemplate::new(405))
        .mount(&server)
        .await;

    let provider = WorkoutApiProvider::new(format!("{}/generate", server.uri()), None).unwrap();
    assert!(provider.health_check().await.unwrap());
}
