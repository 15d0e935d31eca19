//! Agent dispatch endpoint integration tests.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use token_service::models::DispatchAcknowledgment;
use token_test_utils::{configured_vars, vars_without, TestTokenServer};

async fn post_dispatch(
    server: &TestTokenServer,
    body: serde_json::Value,
) -> Result<reqwest::Response, anyhow::Error> {
    let response = reqwest::Client::new()
        .post(format!("{}/dispatch-agent", server.url()))
        .json(&body)
        .send()
        .await?;
    Ok(response)
}

/// Defaults are applied and echoed.
#[tokio::test]
async fn test_dispatch_acknowledged_with_defaults() -> Result<(), anyhow::Error> {
    let server = TestTokenServer::spawn(configured_vars()).await?;

    let response = post_dispatch(
        &server,
        serde_json::json!({"room": "room-42", "server_url": "wss://media.example.com"}),
    )
    .await?;
    assert_eq!(response.status(), 200);

    let ack: DispatchAcknowledgment = response.json().await?;
    assert!(ack.success);
    assert_eq!(ack.room, "room-42");
    assert_eq!(ack.languages, vec!["English", "Hindi"]);
    assert!(ack.message.contains("room-42"));
    assert_eq!(
        ack.note,
        "Make sure your translation agent is running with: python translation_agent_v2.py dev"
    );

    Ok(())
}

/// Explicit languages are echoed in order.
#[tokio::test]
async fn test_dispatch_echoes_languages() -> Result<(), anyhow::Error> {
    let server = TestTokenServer::spawn(configured_vars()).await?;

    let response = post_dispatch(
        &server,
        serde_json::json!({
            "room": "room-42",
            "livekit_url": "wss://media.example.com",
            "agent_type": "transcription",
            "languages": ["Japanese", "Korean", "English"]
        }),
    )
    .await?;
    assert_eq!(response.status(), 200);

    let ack: DispatchAcknowledgment = response.json().await?;
    assert_eq!(ack.languages, vec!["Japanese", "Korean", "English"]);
    assert!(ack.note.contains("transcription agent"));

    Ok(())
}

/// No secret configured: `{room}` alone is rejected with CONFIGURATION_ERROR.
#[tokio::test]
async fn test_dispatch_without_secret_returns_configuration_error() -> Result<(), anyhow::Error> {
    let server = TestTokenServer::spawn(vars_without("LIVEKIT_API_SECRET")).await?;

    let response = post_dispatch(&server, serde_json::json!({"room": "room-42"})).await?;
    assert_eq!(response.status(), 500);

    let body: serde_json::Value = response.json().await?;
    assert_eq!(body["error"]["code"], "CONFIGURATION_ERROR");

    Ok(())
}

/// No key id configured: rejected with CONFIGURATION_ERROR.
#[tokio::test]
async fn test_dispatch_without_key_id_returns_configuration_error() -> Result<(), anyhow::Error> {
    let server = TestTokenServer::spawn(vars_without("LIVEKIT_API_KEY")).await?;

    let response = post_dispatch(&server, serde_json::json!({"room": "room-42"})).await?;
    assert_eq!(response.status(), 500);

    let body: serde_json::Value = response.json().await?;
    assert_eq!(body["error"]["code"], "CONFIGURATION_ERROR");
    assert!(body["error"]["message"]
        .as_str()
        .unwrap()
        .contains("LIVEKIT_API_KEY"));

    Ok(())
}

/// Media URL is not a dispatch precondition: `{room}` alone succeeds.
#[tokio::test]
async fn test_dispatch_room_only_without_media_url_config() -> Result<(), anyhow::Error> {
    let server = TestTokenServer::spawn(vars_without("LIVEKIT_URL")).await?;

    let response = post_dispatch(&server, serde_json::json!({"room": "room-42"})).await?;
    assert_eq!(response.status(), 200);

    let ack: DispatchAcknowledgment = response.json().await?;
    assert!(ack.success);
    assert_eq!(ack.room, "room-42");

    Ok(())
}

/// Whatever the client sends as the server URL is accepted as is.
#[tokio::test]
async fn test_dispatch_accepts_arbitrary_server_url() -> Result<(), anyhow::Error> {
    let server = TestTokenServer::spawn(vars_without("LIVEKIT_URL")).await?;

    for body in [
        serde_json::json!({"room": "room-42", "livekit_url": "localhost:7880"}),
        serde_json::json!({"room": "room-42", "server_url": "gopher://media"}),
        serde_json::json!({"room": "room-42", "server_url": ""}),
    ] {
        let response = post_dispatch(&server, body).await?;
        assert_eq!(response.status(), 200);

        let ack: DispatchAcknowledgment = response.json().await?;
        assert!(ack.success);
    }

    Ok(())
}

/// Empty room is a client error.
#[tokio::test]
async fn test_dispatch_empty_room_returns_bad_request() -> Result<(), anyhow::Error> {
    let server = TestTokenServer::spawn(configured_vars()).await?;

    let response = post_dispatch(&server, serde_json::json!({"room": ""})).await?;
    assert_eq!(response.status(), 400);

    Ok(())
}

/// Body without a room never reaches the acknowledger and is reported in
/// the service error shape.
#[tokio::test]
async fn test_dispatch_missing_room_returns_bad_request() -> Result<(), anyhow::Error> {
    let server = TestTokenServer::spawn(configured_vars()).await?;

    let response = post_dispatch(&server, serde_json::json!({"languages": ["English"]})).await?;
    assert_eq!(response.status(), 400);

    let body: serde_json::Value = response.json().await?;
    assert_eq!(body["error"]["code"], "BAD_REQUEST");

    Ok(())
}
