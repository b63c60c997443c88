//! Integration tests for the OpenAI-compatible provider against a local HTTP server.

use riskcrew_abstraction::{ChatMessage, Model, ModelError, ModelParameters};
use riskcrew_models::{ModelConfig, ModelFactory, ModelType, OpenAIModel};
use std::time::Duration;
use tokio::net::TcpListener;

fn completion_body(content: &str) -> String {
    serde_json::json!({
        "choices": [{ "message": { "role": "assistant", "content": content } }],
        "usage": { "prompt_tokens": 12, "completion_tokens": 3, "total_tokens": 15 }
    })
    .to_string()
}

#[tokio::test]
async fn test_chat_completion_success() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/chat/completions")
        .match_header("authorization", "Bearer test-key")
        .match_body(mockito::Matcher::PartialJson(serde_json::json!({
            "model": "mistral-large-latest",
            "messages": [
                { "role": "system", "content": "persona" },
                { "role": "user", "content": "question" }
            ]
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(completion_body("Risk is moderate."))
        .create_async()
        .await;

    let model = OpenAIModel::with_api_key("mistral-large-latest".to_string(), "test-key".to_string())
        .with_base_url(server.url());

    let messages = vec![ChatMessage::system("persona"), ChatMessage::user("question")];
    let response = model.generate_chat_completion(&messages, None).await.unwrap();

    mock.assert_async().await;
    assert_eq!(response.content, "Risk is moderate.");
    assert_eq!(response.model_id.as_deref(), Some("mistral-large-latest"));
    assert_eq!(response.usage.unwrap().total_tokens, 15);
}

#[tokio::test]
async fn test_parameters_forwarded() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/chat/completions")
        .match_body(mockito::Matcher::PartialJson(serde_json::json!({
            "max_tokens": 256
        })))
        .with_status(200)
        .with_body(completion_body("ok"))
        .create_async()
        .await;

    let model = OpenAIModel::with_api_key("gpt-4o-mini".to_string(), "k".to_string())
        .with_base_url(server.url());
    let params = ModelParameters { max_tokens: Some(256), ..ModelParameters::default() };

    let response = model.generate_text("hi", Some(params)).await.unwrap();

    mock.assert_async().await;
    assert_eq!(response.content, "ok");
}

#[tokio::test]
async fn test_rate_limit_maps_to_quota_exceeded() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/chat/completions")
        .with_status(429)
        .with_body("rate limit reached")
        .create_async()
        .await;

    let model = OpenAIModel::with_api_key("m".to_string(), "k".to_string())
        .with_provider("mistral")
        .with_base_url(server.url());

    let err = model.generate_text("hi", None).await.unwrap_err();
    assert!(matches!(err, ModelError::QuotaExceeded { ref provider, .. } if provider == "mistral"));
    assert!(err.is_unavailable());
}

#[tokio::test]
async fn test_auth_failure_is_unavailable() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/chat/completions")
        .with_status(401)
        .with_body("invalid api key")
        .create_async()
        .await;

    let model =
        OpenAIModel::with_api_key("m".to_string(), "bad".to_string()).with_base_url(server.url());

    let err = model.generate_text("hi", None).await.unwrap_err();
    assert!(matches!(err, ModelError::Unavailable(ref msg) if msg.contains("invalid api key")));
}

#[tokio::test]
async fn test_empty_choices_is_response_error() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/chat/completions")
        .with_status(200)
        .with_body(r#"{"choices": []}"#)
        .create_async()
        .await;

    let model = OpenAIModel::with_api_key("m".to_string(), "k".to_string()).with_base_url(server.url());

    let err = model.generate_text("hi", None).await.unwrap_err();
    assert!(matches!(err, ModelError::ModelResponseError(_)));
}

#[tokio::test]
async fn test_connection_refused_is_unavailable() {
    // Bind then drop to get a port nobody is listening on.
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let model = OpenAIModel::with_api_key("m".to_string(), "k".to_string())
        .with_base_url(format!("http://{}", addr));

    let err = model.generate_text("hi", None).await.unwrap_err();
    assert!(matches!(err, ModelError::Unavailable(_)), "got {err:?}");
}

#[tokio::test]
async fn test_slow_server_maps_to_timeout() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    // Accept connections and never answer.
    tokio::spawn(async move {
        let mut held = Vec::new();
        while let Ok((socket, _)) = listener.accept().await {
            held.push(socket);
        }
    });

    let model = OpenAIModel::with_api_key("m".to_string(), "k".to_string())
        .with_base_url(format!("http://{}", addr))
        .with_timeout(Duration::from_millis(200));

    let err = model.generate_text("hi", None).await.unwrap_err();
    assert!(err.is_timeout(), "expected timeout, got {err:?}");
}

#[tokio::test]
async fn test_factory_base_url_override() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/chat/completions")
        .with_status(200)
        .with_body(completion_body("from override"))
        .create_async()
        .await;

    let config = ModelConfig::new(ModelType::Mistral, "mistral-small".to_string())
        .with_api_key("k".to_string())
        .with_base_url(server.url());
    let model = ModelFactory::create(config).unwrap();

    let response = model.generate_text("hi", None).await.unwrap();
    mock.assert_async().await;
    assert_eq!(response.content, "from override");
}
