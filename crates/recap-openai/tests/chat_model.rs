use std::sync::Arc;

use recap_core::{ChatModel, ChatRequest, Message, RecapError};
use recap_openai::{FakeBackend, OpenAiChatModel, OpenAiConfig, ProviderResponse};
use serde_json::json;

fn model_with(backend: Arc<FakeBackend>) -> OpenAiChatModel {
    let config = OpenAiConfig::new("test-key", "gpt-3.5-turbo-1106");
    OpenAiChatModel::new(config, backend)
}

fn request() -> ChatRequest {
    ChatRequest::new(vec![
        Message::system("You summarize text."),
        Message::human("Summarize this."),
    ])
}

// ---------------------------------------------------------------------------
// Request building
// ---------------------------------------------------------------------------

#[test]
fn build_request_targets_chat_completions() {
    let model = model_with(Arc::new(FakeBackend::new()));
    let req = model.build_request(&request());

    assert_eq!(req.url, "https://api.openai.com/v1/chat/completions");
    assert_eq!(req.body["model"], "gpt-3.5-turbo-1106");
    assert_eq!(req.body["messages"][0]["role"], "system");
    assert_eq!(req.body["messages"][1]["role"], "user");
    assert_eq!(req.body["messages"][1]["content"], "Summarize this.");
    assert!(req
        .headers
        .iter()
        .any(|(k, v)| k == "Authorization" && v == "Bearer test-key"));
}

#[test]
fn build_request_includes_optional_sampling_params() {
    let config = OpenAiConfig::new("k", "m")
        .with_temperature(0.2)
        .with_max_tokens(512);
    let model = OpenAiChatModel::new(config, Arc::new(FakeBackend::new()));
    let req = model.build_request(&request());

    assert_eq!(req.body["temperature"], 0.2);
    assert_eq!(req.body["max_tokens"], 512);
}

#[test]
fn config_base_url_override() {
    let config = OpenAiConfig::new("k", "m").with_base_url("https://example.test/v1");
    let model = OpenAiChatModel::new(config, Arc::new(FakeBackend::new()));
    let req = model.build_request(&request());
    assert_eq!(req.url, "https://example.test/v1/chat/completions");
}

// ---------------------------------------------------------------------------
// Response parsing and error mapping
// ---------------------------------------------------------------------------

#[tokio::test]
async fn chat_parses_content_and_usage() {
    let backend = Arc::new(FakeBackend::new());
    backend.push_response(ProviderResponse {
        status: 200,
        body: json!({
            "choices": [{"message": {"role": "assistant", "content": "A summary."}}],
            "usage": {"prompt_tokens": 10, "completion_tokens": 5, "total_tokens": 15}
        }),
    });

    let response = model_with(backend).chat(request()).await.unwrap();
    assert_eq!(response.message.content(), "A summary.");
    assert_eq!(response.usage.unwrap().total_tokens, 15);
}

#[tokio::test]
async fn rate_limit_is_transient() {
    let backend = Arc::new(FakeBackend::new());
    backend.push_response(ProviderResponse {
        status: 429,
        body: json!({"error": {"message": "rate limit"}}),
    });

    let err = model_with(backend).chat(request()).await.unwrap_err();
    assert!(matches!(err, RecapError::Transient(_)));
}

#[tokio::test]
async fn server_error_is_transient() {
    let backend = Arc::new(FakeBackend::new());
    backend.push_response(ProviderResponse {
        status: 503,
        body: json!({"error": {"message": "overloaded"}}),
    });

    let err = model_with(backend).chat(request()).await.unwrap_err();
    assert!(matches!(err, RecapError::Transient(_)));
}

#[tokio::test]
async fn bad_request_is_non_retryable() {
    let backend = Arc::new(FakeBackend::new());
    backend.push_response(ProviderResponse {
        status: 400,
        body: json!({"error": {"message": "bad request"}}),
    });

    let err = model_with(backend).chat(request()).await.unwrap_err();
    assert!(matches!(err, RecapError::NonRetryable(_)));
}

#[tokio::test]
async fn missing_content_is_a_parse_error() {
    let backend = Arc::new(FakeBackend::new());
    backend.push_response(ProviderResponse {
        status: 200,
        body: json!({"choices": []}),
    });

    let err = model_with(backend).chat(request()).await.unwrap_err();
    assert!(matches!(err, RecapError::Parsing(_)));
}

#[tokio::test]
async fn transport_errors_pass_through() {
    let backend = Arc::new(FakeBackend::new());
    backend.push_error(RecapError::Transient("connection reset".into()));

    let err = model_with(backend).chat(request()).await.unwrap_err();
    assert!(matches!(err, RecapError::Transient(_)));
}
