//! Integration tests for the OpenRouter backend against a local mock
//! provider.

use std::time::Duration;

use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use esma_adapters::{
    CompletionBackend, CompletionError, OpenRouterClient, OpenRouterConfig, DEFAULT_MODEL,
};

fn client_for(server: &MockServer) -> OpenRouterClient {
    let config = OpenRouterConfig::new()
        .with_api_key("test-key")
        .with_timeout(Duration::from_secs(5))
        .with_base_url(server.uri())
        .expect("mock server URL is valid");
    OpenRouterClient::new(config).expect("client")
}

#[tokio::test]
async fn generate_returns_first_choice_verbatim() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(header("authorization", "Bearer test-key"))
        .and(body_partial_json(json!({ "model": DEFAULT_MODEL })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "choices": [ { "message": { "content": "Example essay text." } } ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let essay = client
        .generate("Write a comprehensive Narrative...")
        .await
        .expect("success");
    assert_eq!(essay, "Example essay text.");
}

#[tokio::test]
async fn generate_passes_provider_error_text_through() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(429).set_body_string("rate limited"))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let err = client
        .generate("anything")
        .await
        .expect_err("provider error");

    assert!(matches!(err, CompletionError::Generation { .. }));
    assert!(err.to_string().contains("rate limited"));
}

#[tokio::test]
async fn empty_completion_is_still_a_success() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "choices": [] })))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let essay = client.generate("anything").await.expect("success");
    assert_eq!(essay, "");
}

#[tokio::test]
async fn probe_succeeds_against_models_listing() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/models"))
        .and(header("authorization", "Bearer test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": [] })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    client.probe().await.expect("probe succeeds");
}

#[tokio::test]
async fn probe_failure_is_a_connection_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/models"))
        .respond_with(ResponseTemplate::new(401).set_body_string("invalid key"))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let err = client.probe().await.expect_err("probe fails");

    assert!(matches!(err, CompletionError::Connection { .. }));
    assert!(err.to_string().contains("invalid key"));
}

#[tokio::test]
async fn decode_failure_is_a_generation_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let err = client.generate("anything").await.expect_err("bad body");
    assert!(matches!(err, CompletionError::Generation { .. }));
}
