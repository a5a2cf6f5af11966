use axum::{extract::Path, http::StatusCode, response::IntoResponse, routing::get, Json, Router};
use serenity::http::HttpBuilder;
use test_utils::factory::scheduled_event::ScheduledEventFactory;
use tokio::net::TcpListener;

use crate::server::service::discord::DiscordRestClient;

use super::*;

async fn scheduled_event(Path((guild_id, event_id)): Path<(u64, u64)>) -> impl IntoResponse {
    match event_id {
        404 => (
            StatusCode::NOT_FOUND,
            Json(serde_json::json!({ "message": "Unknown Guild Scheduled Event", "code": 10070 })),
        ),
        500 => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(serde_json::json!({ "message": "Internal Server Error", "code": 0 })),
        ),
        _ => (
            StatusCode::OK,
            Json(
                ScheduledEventFactory::new(guild_id, event_id)
                    .name("Raid night")
                    .build(),
            ),
        ),
    }
}

async fn channel(Path(channel_id): Path<u64>) -> impl IntoResponse {
    match channel_id {
        555 => (
            StatusCode::OK,
            Json(serde_json::json!({ "id": "555", "type": 2, "name": "Raid Voice" })),
        ),
        _ => (
            StatusCode::NOT_FOUND,
            Json(serde_json::json!({ "message": "Unknown Channel", "code": 10003 })),
        ),
    }
}

/// Serves canned Discord REST responses on a local port and returns a client
/// whose requests are redirected to it.
async fn stub_client() -> DiscordRestClient {
    let app = Router::new()
        .route(
            "/api/v10/guilds/{guild_id}/scheduled-events/{event_id}",
            get(scheduled_event),
        )
        .route("/api/v10/channels/{channel_id}", get(channel));

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    let http = HttpBuilder::new("test-token")
        .proxy(format!("http://{addr}"))
        .ratelimiter_disabled(true)
        .build();

    DiscordRestClient::new(Arc::new(http))
}

/// Tests fetching an event Discord knows.
///
/// Expected: Ok(Some) decoded into our model
#[tokio::test]
async fn fetches_existing_event() {
    let client = stub_client().await;

    let event = client.fetch_event(1, 100).await.unwrap().unwrap();

    assert_eq!(event.id.get(), 100);
    assert_eq!(event.guild_id.get(), 1);
    assert_eq!(event.name, "Raid night");
}

/// Tests that a 404 means the event is gone rather than a failure.
///
/// Expected: Ok(None)
#[tokio::test]
async fn not_found_event_is_none() {
    let client = stub_client().await;

    let result = client.fetch_event(1, 404).await;

    assert!(matches!(result, Ok(None)));
}

/// Tests that server errors surface as errors so the record is kept.
///
/// Expected: Err(AppError::DiscordErr)
#[tokio::test]
async fn server_error_is_err() {
    let client = stub_client().await;

    let result = client.fetch_event(1, 500).await;

    assert!(matches!(result, Err(AppError::DiscordErr(_))));
}

/// Tests that a zero id never reaches Discord.
///
/// Expected: Ok(None)
#[tokio::test]
async fn zero_id_is_none() {
    let client = stub_client().await;

    assert!(matches!(client.fetch_event(0, 100).await, Ok(None)));
    assert!(matches!(client.channel_name(0).await, Ok(None)));
}

/// Tests channel name lookups.
///
/// Expected: the name for a known channel, None for an unknown one
#[tokio::test]
async fn looks_up_channel_name() {
    let client = stub_client().await;

    assert_eq!(
        client.channel_name(555).await.unwrap().as_deref(),
        Some("Raid Voice")
    );
    assert_eq!(client.channel_name(556).await.unwrap(), None);
}
