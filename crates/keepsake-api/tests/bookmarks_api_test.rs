//! Bookmarks API behavior, including title enrichment, over the in-memory
//! store and a mock metadata fetcher.

mod common;

use axum::http::StatusCode;
use serde_json::json;

use common::{detail_fields, detail_messages, send, test_app};
use keepsake_core::PageMetadata;
use keepsake_enrich::MockMetadataFetcher;

#[tokio::test]
async fn test_failed_fetch_falls_back_to_url() {
    let fetcher = MockMetadataFetcher::new();
    let app = test_app(fetcher.clone());

    let (status, body) = send(
        &app,
        "POST",
        "/api/bookmarks",
        Some(json!({"url": "unreachable.example/page", "title": ""})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let bookmark = &body["data"];
    assert_eq!(bookmark["title"], "unreachable.example/page");
    assert_eq!(bookmark["url"], "unreachable.example/page");
    assert!(bookmark["metadata"].is_null());
    assert_eq!(fetcher.calls(), vec!["unreachable.example/page"]);
}

#[tokio::test]
async fn test_fetched_title_and_metadata_are_recorded() {
    let fetcher = MockMetadataFetcher::new().with_page(
        "https://example.com",
        PageMetadata {
            title: Some("Example Domain".to_string()),
            description: Some("For use in examples".to_string()),
        },
    );
    let app = test_app(fetcher);

    let (status, body) = send(
        &app,
        "POST",
        "/api/bookmarks",
        Some(json!({"url": "example.com", "tags": ["Ref"]})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let bookmark = &body["data"];
    assert_eq!(bookmark["title"], "Example Domain");
    assert_eq!(bookmark["tags"], json!(["ref"]));
    assert!(bookmark["description"].is_null());
    assert_eq!(
        bookmark["metadata"],
        json!({
            "fetchedTitle": "Example Domain",
            "favicon": null,
            "description": "For use in examples",
        })
    );
}

#[tokio::test]
async fn test_page_without_title_falls_back_to_url() {
    let fetcher = MockMetadataFetcher::new().with_page(
        "https://example.com",
        PageMetadata {
            title: None,
            description: Some("described".to_string()),
        },
    );
    let app = test_app(fetcher);

    let (_, body) = send(
        &app,
        "POST",
        "/api/bookmarks",
        Some(json!({"url": "https://example.com"})),
    )
    .await;
    assert_eq!(body["data"]["title"], "https://example.com");
    assert!(body["data"]["metadata"].is_null());
}

#[tokio::test]
async fn test_long_fetched_title_is_truncated() {
    let fetcher =
        MockMetadataFetcher::new().with_title("https://long.example", "T".repeat(250));
    let app = test_app(fetcher);

    let (status, body) = send(
        &app,
        "POST",
        "/api/bookmarks",
        Some(json!({"url": "https://long.example"})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["title"].as_str().unwrap().chars().count(), 200);
}

#[tokio::test]
async fn test_supplied_title_skips_fetch() {
    let fetcher = MockMetadataFetcher::new().with_title("https://example.com", "Fetched");
    let app = test_app(fetcher.clone());

    let (status, body) = send(
        &app,
        "POST",
        "/api/bookmarks",
        Some(json!({
            "title": "Mine",
            "url": "https://example.com",
            "description": "  notes  ",
            "isFavorite": true,
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["title"], "Mine");
    assert_eq!(body["data"]["description"], "notes");
    assert_eq!(body["data"]["isFavorite"], true);
    assert_eq!(fetcher.call_count(), 0);
}

#[tokio::test]
async fn test_url_validation() {
    let app = test_app(MockMetadataFetcher::new());

    let (status, body) = send(&app, "POST", "/api/bookmarks", Some(json!({"title": "x"}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(detail_fields(&body), vec!["url"]);
    assert_eq!(detail_messages(&body), vec!["URL is required"]);

    let (status, body) = send(
        &app,
        "POST",
        "/api/bookmarks",
        Some(json!({"url": "not a url"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(detail_messages(&body), vec!["Please enter a valid URL"]);
}

#[tokio::test]
async fn test_upper_case_scheme_is_rejected_before_fetch() {
    let fetcher = MockMetadataFetcher::new();
    let app = test_app(fetcher.clone());

    for url in ["HTTPS://example.com", "example.com/日本"] {
        let (status, body) =
            send(&app, "POST", "/api/bookmarks", Some(json!({"url": url}))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{url}");
        assert_eq!(detail_fields(&body), vec!["url"]);
    }
    assert_eq!(fetcher.call_count(), 0);
}

#[tokio::test]
async fn test_description_too_long_is_rejected() {
    let app = test_app(MockMetadataFetcher::new());
    let (status, body) = send(
        &app,
        "POST",
        "/api/bookmarks",
        Some(json!({"url": "example.com", "title": "t", "description": "d".repeat(501)})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(detail_fields(&body), vec!["description"]);
}

#[tokio::test]
async fn test_update_keeps_title_and_metadata() {
    let fetcher = MockMetadataFetcher::new().with_title("https://example.com", "Example");
    let app = test_app(fetcher.clone());

    let (_, created) = send(
        &app,
        "POST",
        "/api/bookmarks",
        Some(json!({"url": "https://example.com", "tags": ["a"]})),
    )
    .await;
    let id = created["data"]["id"].as_str().unwrap();

    let (status, body) = send(
        &app,
        "PUT",
        &format!("/api/bookmarks/{id}"),
        Some(json!({"url": "https://example.org", "isFavorite": true})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let bookmark = &body["data"];
    assert_eq!(bookmark["title"], "Example");
    assert_eq!(bookmark["url"], "https://example.org");
    assert_eq!(bookmark["tags"], json!(["a"]));
    assert_eq!(bookmark["isFavorite"], true);
    assert_eq!(bookmark["metadata"], created["data"]["metadata"]);
    assert_eq!(fetcher.call_count(), 1);
}

#[tokio::test]
async fn test_not_found_messages_and_delete() {
    let app = test_app(MockMetadataFetcher::new());
    let unknown = uuid::Uuid::now_v7();

    let (status, body) = send(&app, "GET", &format!("/api/bookmarks/{unknown}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Bookmark not found");

    let (_, created) = send(
        &app,
        "POST",
        "/api/bookmarks",
        Some(json!({"url": "example.com", "title": "Example"})),
    )
    .await;
    let id = created["data"]["id"].as_str().unwrap();

    let (status, body) = send(&app, "DELETE", &format!("/api/bookmarks/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Bookmark deleted successfully");

    let (status, _) = send(&app, "DELETE", &format!("/api/bookmarks/{id}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_search_covers_url_and_description() {
    let app = test_app(MockMetadataFetcher::new());
    send(
        &app,
        "POST",
        "/api/bookmarks",
        Some(json!({"url": "https://tokio.rs", "title": "Runtime"})),
    )
    .await;
    send(
        &app,
        "POST",
        "/api/bookmarks",
        Some(json!({"url": "https://serde.rs", "title": "Serialization", "description": "derive macros"})),
    )
    .await;

    let (_, body) = send(&app, "GET", "/api/bookmarks?q=tokio", None).await;
    assert_eq!(body["count"], 1);
    assert_eq!(body["data"][0]["title"], "Runtime");

    let (_, body) = send(&app, "GET", "/api/bookmarks?q=macros", None).await;
    assert_eq!(body["count"], 1);
    assert_eq!(body["data"][0]["title"], "Serialization");
}
