// Integration tests for the recommendation collaborator client
//
// The concierge must never fail outward: credentials, network, and shape
// problems all degrade to the offline fallback.

use daymaker2day::{Catalog, Concierge, GenerativeConcierge, OFFLINE_FALLBACK};
use httpmock::prelude::*;
use serde_json::json;

#[tokio::test]
async fn missing_api_key_degrades_to_fallback() {
    let concierge = GenerativeConcierge::new("http://localhost:1/generate", None);
    let reply = concierge.recommend("cheer me up", "- something").await;
    assert_eq!(reply, OFFLINE_FALLBACK);

    // An empty key counts as missing
    let concierge =
        GenerativeConcierge::new("http://localhost:1/generate", Some(String::new()));
    let reply = concierge.recommend("cheer me up", "- something").await;
    assert_eq!(reply, OFFLINE_FALLBACK);
}

#[tokio::test]
async fn recommendation_text_is_passed_through() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/generate")
                .query_param("key", "test-key")
                .body_includes("Daymaker Inbox Tidy")
                .body_includes("cheer me up");
            then.status(200).json_body(json!({
                "candidates": [{
                    "content": {
                        "parts": [{ "text": "Try the Daymaker Mood Boost session!" }]
                    }
                }]
            }));
        })
        .await;

    let catalog = Catalog::builtin().unwrap();
    let concierge = GenerativeConcierge::new(server.url("/generate"), Some("test-key".into()));
    let reply = concierge
        .recommend("cheer me up", &catalog.menu_context())
        .await;

    mock.assert_async().await;
    assert_eq!(reply, "Try the Daymaker Mood Boost session!");
}

#[tokio::test]
async fn service_error_degrades_to_fallback() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/generate");
            then.status(503).body("quota exceeded");
        })
        .await;

    let concierge = GenerativeConcierge::new(server.url("/generate"), Some("test-key".into()));
    let reply = concierge.recommend("cheer me up", "- something").await;
    assert_eq!(reply, OFFLINE_FALLBACK);
}

#[tokio::test]
async fn empty_candidates_get_the_no_response_message() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/generate");
            then.status(200).json_body(json!({ "candidates": [] }));
        })
        .await;

    let concierge = GenerativeConcierge::new(server.url("/generate"), Some("test-key".into()));
    let reply = concierge.recommend("cheer me up", "- something").await;
    assert_eq!(reply, "I couldn't generate a response.");
}
