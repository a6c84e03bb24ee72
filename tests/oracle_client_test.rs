// HTTP client tests against a local mock server
use mockito::Matcher;

use worldcheck::llm::client::Oracle;
use worldcheck::llm::client_impl::{AnthropicClient, OpenAIClient};

#[tokio::test]
async fn test_anthropic_client_extracts_text() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/v1/messages")
        .match_header("x-api-key", "test_key")
        .match_header("anthropic-version", "2023-06-01")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"content": [{"type": "text", "text": "{\"consistent\": true}"}]}"#)
        .create_async()
        .await;

    let client = AnthropicClient::with_base_url(
        "test_key".to_string(),
        "claude-sonnet-4-20250514".to_string(),
        server.url(),
        1024,
        10,
    )
    .unwrap();

    let response = client.query("Is this consistent?").await.unwrap();
    assert_eq!(response, r#"{"consistent": true}"#);
    mock.assert_async().await;
}

#[tokio::test]
async fn test_anthropic_client_sends_prompt_in_messages() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/v1/messages")
        .match_body(Matcher::PartialJson(serde_json::json!({
            "messages": [{"role": "user", "content": "the prompt"}]
        })))
        .with_status(200)
        .with_body(r#"{"content": [{"type": "text", "text": "{}"}]}"#)
        .create_async()
        .await;

    let client = AnthropicClient::with_base_url(
        "k".to_string(),
        "claude-sonnet-4-20250514".to_string(),
        server.url(),
        1024,
        10,
    )
    .unwrap();

    client.query("the prompt").await.unwrap();
    mock.assert_async().await;
}

#[tokio::test]
async fn test_anthropic_client_error_status_is_an_error() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", "/v1/messages")
        .with_status(529)
        .with_body(r#"{"error": {"type": "overloaded_error"}}"#)
        .create_async()
        .await;

    let client = AnthropicClient::with_base_url(
        "test_key".to_string(),
        "claude-sonnet-4-20250514".to_string(),
        server.url(),
        1024,
        10,
    )
    .unwrap();

    let result = client.query("prompt").await;
    assert!(result.is_err());
    assert!(result.unwrap_err().to_string().contains("Anthropic API error"));
}

#[tokio::test]
async fn test_anthropic_client_empty_content_is_an_error() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", "/v1/messages")
        .with_status(200)
        .with_body(r#"{"content": []}"#)
        .create_async()
        .await;

    let client = AnthropicClient::with_base_url(
        "test_key".to_string(),
        "claude-sonnet-4-20250514".to_string(),
        server.url(),
        1024,
        10,
    )
    .unwrap();

    let result = client.query("prompt").await;
    assert!(result.is_err());
}

#[tokio::test]
async fn test_openai_client_extracts_first_choice() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/chat/completions")
        .match_header("authorization", "Bearer test_key")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            r#"{"choices": [{"message": {"role": "assistant", "content": "{\"contradictory\": false}"}}]}"#,
        )
        .create_async()
        .await;

    let client = OpenAIClient::with_base_url(
        "test_key".to_string(),
        "gpt-4o".to_string(),
        server.url(),
        1024,
        10,
    )
    .unwrap();

    let response = client.query("Are these contradictory?").await.unwrap();
    assert_eq!(response, r#"{"contradictory": false}"#);
    mock.assert_async().await;
}

#[tokio::test]
async fn test_openai_client_skips_auth_header_without_key() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/chat/completions")
        .match_header("authorization", Matcher::Missing)
        .with_status(200)
        .with_body(r#"{"choices": [{"message": {"role": "assistant", "content": "{}"}}]}"#)
        .create_async()
        .await;

    // Empty key, as used for local OpenAI-compatible servers
    let client = OpenAIClient::with_base_url(
        String::new(),
        "llama3".to_string(),
        server.url(),
        1024,
        10,
    )
    .unwrap();

    client.query("prompt").await.unwrap();
    mock.assert_async().await;
}

#[tokio::test]
async fn test_openai_client_error_status_is_an_error() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", "/chat/completions")
        .with_status(401)
        .with_body(r#"{"error": {"message": "invalid api key"}}"#)
        .create_async()
        .await;

    let client = OpenAIClient::with_base_url(
        "bad_key".to_string(),
        "gpt-4o".to_string(),
        server.url(),
        1024,
        10,
    )
    .unwrap();

    let result = client.query("prompt").await;
    assert!(result.is_err());
    assert!(result.unwrap_err().to_string().contains("OpenAI API error"));
}
