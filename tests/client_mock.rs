//! Completion client and orchestration tests against a mocked HTTP endpoint.

use promptdoc::prompt::PromptParts;
use promptdoc::{AppConfig, CompletionClient, Error, PromptOps, SamplingParams};

fn mock_config(server: &mockito::ServerGuard) -> AppConfig {
    AppConfig::default()
        .with_api_key("sk-test")
        .with_base_url(server.url())
}

fn chat_body(content: &str) -> String {
    serde_json::json!({
        "choices": [{ "message": { "role": "assistant", "content": content } }]
    })
    .to_string()
}

#[tokio::test]
async fn complete_returns_first_choice_content() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/chat/completions")
        .match_header("authorization", "Bearer sk-test")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(chat_body("Generated text."))
        .create_async()
        .await;

    let client = CompletionClient::new(&mock_config(&server)).expect("client");
    let out = client
        .complete(
            "system message",
            "user message",
            SamplingParams {
                temperature: 0.2,
                max_tokens: 50,
            },
        )
        .await
        .expect("completion");

    assert_eq!(out, "Generated text.");
    mock.assert_async().await;
}

#[tokio::test]
async fn non_success_status_maps_to_remote_error() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/chat/completions")
        .with_status(429)
        .with_body(r#"{"error":{"message":"rate limited"}}"#)
        .create_async()
        .await;

    let client = CompletionClient::new(&mock_config(&server)).expect("client");
    let err = client
        .complete(
            "s",
            "u",
            SamplingParams {
                temperature: 0.0,
                max_tokens: 1,
            },
        )
        .await
        .unwrap_err();

    match err {
        Error::Remote { status, message } => {
            assert_eq!(status, 429);
            assert!(message.contains("rate limited"));
        }
        other => panic!("expected Remote error, got {other}"),
    }
}

#[tokio::test]
async fn empty_choices_is_a_remote_error() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/chat/completions")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"choices":[]}"#)
        .create_async()
        .await;

    let client = CompletionClient::new(&mock_config(&server)).expect("client");
    let err = client
        .complete(
            "s",
            "u",
            SamplingParams {
                temperature: 0.0,
                max_tokens: 1,
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Remote { .. }));
}

#[test]
fn missing_api_key_fails_at_construction() {
    let err = CompletionClient::new(&AppConfig::default()).unwrap_err();
    assert!(matches!(err, Error::Configuration { .. }));
    assert!(err.to_string().contains("OPENAI_API_KEY"));
}

#[tokio::test]
async fn generate_prompt_rejects_blank_parts_offline() {
    let server = mockito::Server::new_async().await;
    // No mock registered: a request would fail loudly.
    let ops = PromptOps::new(mock_config(&server)).expect("ops");
    let err = ops.generate_prompt(&PromptParts::default()).await.unwrap_err();
    assert!(err.to_string().contains("at least one field"));
}

#[tokio::test]
async fn generate_prompt_returns_response_and_combined() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/chat/completions")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(chat_body("An improved prompt."))
        .create_async()
        .await;

    let ops = PromptOps::new(mock_config(&server)).expect("ops");
    let parts = PromptParts {
        role: "Analyst".to_string(),
        task: "Summarize findings".to_string(),
        ..Default::default()
    };
    let generated = ops.generate_prompt(&parts).await.expect("generated");

    assert_eq!(generated.response, "An improved prompt.");
    assert!(generated.combined.contains("Role/Objective: Analyst"));
    assert!(generated.combined.contains("Task: Summarize findings"));
}

#[tokio::test]
async fn summarize_appends_truncation_note_for_long_documents() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/chat/completions")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(chat_body("A concise summary."))
        .expect(1)
        .create_async()
        .await;

    // Force the estimation path and a document far over the 10000-token
    // summary budget so truncation must kick in.
    let config = mock_config(&server).with_model("unknown-model-xyz");
    let ops = PromptOps::new(config).expect("ops");
    let document = "word ".repeat(50_000);

    let summary = ops
        .summarize_with_prompt(&document, "Summarize this document.")
        .await
        .expect("summary");

    assert!(summary.starts_with("A concise summary."));
    assert!(summary.contains("[Note: Document was truncated from"));
    assert!(summary.contains("to fit context limits]"));
}

#[tokio::test]
async fn short_document_summary_has_no_truncation_note() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/chat/completions")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(chat_body("Short summary."))
        .create_async()
        .await;

    let config = mock_config(&server).with_model("unknown-model-xyz");
    let ops = PromptOps::new(config).expect("ops");

    let summary = ops
        .summarize_with_prompt("A brief document.", "Summarize this.")
        .await
        .expect("summary");
    assert_eq!(summary, "Short summary.");
}
