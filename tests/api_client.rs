//! Wire-level behaviour of the typed platform API client.

use std::{sync::Arc, time::Duration};

use httpmock::prelude::*;
use serde_json::json;
use uuid::Uuid;

use penna::{
    application::resource::PostTags,
    infra::api::{ApiClient, ApiError, AssociationClient},
};
use penna_api_types::{MediaRecord, Page, TagRecord};

fn client(server: &MockServer, token: &str) -> ApiClient {
    ApiClient::new(&server.base_url(), token, Duration::from_secs(5)).expect("client")
}

#[tokio::test]
async fn requests_carry_the_bearer_token() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/tags")
                .header("authorization", "Bearer secret-token")
                .query_param("page", "1")
                .query_param("limit", "1");
            then.status(200)
                .json_body(json!({ "items": [], "total": 0, "page": 1, "limit": 1 }));
        })
        .await;

    let api = client(&server, "secret-token");
    let page: Page<TagRecord> = api
        .get_json(
            "tags",
            &[("page", "1".to_string()), ("limit", "1".to_string())],
        )
        .await
        .expect("fetch");

    mock.assert_async().await;
    assert_eq!(page.total, 0);
}

#[tokio::test]
async fn server_rejections_keep_status_and_message() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/tags");
            then.status(409).json_body(json!({ "message": "slug already in use" }));
        })
        .await;

    let api = client(&server, "token");
    let err = api
        .post_json::<TagRecord, _>("tags", &json!({ "name": "Rust", "slug": "rust" }))
        .await
        .expect_err("conflict");

    match &err {
        ApiError::Server { status, message } => {
            assert_eq!(status.as_u16(), 409);
            assert_eq!(message, "slug already in use");
        }
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(err.user_message(), "slug already in use");
    assert!(!err.is_not_found());
}

#[tokio::test]
async fn rejection_bodies_without_the_error_shape_fall_back_to_raw_text() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/tags");
            then.status(502).body("bad gateway\n");
        })
        .await;

    let api = client(&server, "token");
    let err = api
        .get_json::<Page<TagRecord>>("tags", &[])
        .await
        .expect_err("rejection");

    match err {
        ApiError::Server { message, .. } => assert_eq!(message, "bad gateway"),
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn malformed_success_bodies_are_decode_errors() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/tags");
            then.status(200).body("{not json");
        })
        .await;

    let api = client(&server, "token");
    let err = api
        .get_json::<Page<TagRecord>>("tags", &[])
        .await
        .expect_err("decode failure");

    assert!(matches!(err, ApiError::Decode(_)));
    assert_eq!(err.kind(), "decode");
}

#[tokio::test]
async fn missing_records_are_classified_as_not_found() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/tags/missing");
            then.status(404).json_body(json!({ "message": "no such tag" }));
        })
        .await;

    let api = client(&server, "token");
    let err = api
        .get_json::<TagRecord>("tags/missing", &[])
        .await
        .expect_err("missing");

    assert!(err.is_not_found());
}

#[tokio::test]
async fn delete_treats_success_without_a_body_as_ok() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(DELETE).path("/tags/1");
            then.status(204);
        })
        .await;

    let api = client(&server, "token");
    api.delete("tags/1").await.expect("delete");
    mock.assert_async().await;
}

#[tokio::test]
async fn multipart_uploads_reach_the_media_endpoint() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/media/upload")
                .header("authorization", "Bearer token")
                .header_matches("content-type", "multipart/form-data.*");
            then.status(201).json_body(json!({
                "id": "6f8e2c1a-3b4d-4e5f-8a9b-0c1d2e3f4a5b",
                "file_name": "banner.png",
                "mime_type": "image/png",
                "size_bytes": 4,
                "alt_text": "Banner",
                "url": "https://cdn.example/banner.png",
                "created_at": "2025-01-01T00:00:00Z",
                "updated_at": "2025-01-01T00:00:00Z",
            }));
        })
        .await;

    let api = client(&server, "token");
    let part = reqwest::multipart::Part::bytes(vec![1, 2, 3, 4])
        .file_name("banner.png")
        .mime_str("image/png")
        .expect("mime");
    let form = reqwest::multipart::Form::new()
        .part("file", part)
        .text("file_name", "banner.png")
        .text("alt_text", "Banner");

    let record: MediaRecord = api.post_multipart("media/upload", form).await.expect("upload");

    mock.assert_async().await;
    assert_eq!(record.file_name, "banner.png");
    assert_eq!(record.size_bytes, 4);
}

fn post_tag_json(tag_id: &str) -> serde_json::Value {
    json!({
        "id": Uuid::new_v4(),
        "post_id": "7b8c9d0e-1f2a-4b3c-8d4e-5f6a7b8c9d0e",
        "tag_id": tag_id,
        "created_at": "2025-01-01T00:00:00Z",
    })
}

#[tokio::test]
async fn association_lists_follow_the_envelope_across_pages() {
    let server = MockServer::start_async().await;
    let post_id = "7b8c9d0e-1f2a-4b3c-8d4e-5f6a7b8c9d0e";
    let first = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/post-tags")
                .query_param("post_id", post_id)
                .query_param("page", "1")
                .query_param("limit", "200");
            then.status(200).json_body(json!({
                "items": [
                    post_tag_json("aaaaaaaa-1111-4a2b-8c3d-000000000001"),
                    post_tag_json("aaaaaaaa-1111-4a2b-8c3d-000000000002"),
                ],
                "total": 3,
                "page": 1,
                "limit": 200,
            }));
        })
        .await;
    let second = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/post-tags")
                .query_param("post_id", post_id)
                .query_param("page", "2")
                .query_param("limit", "200");
            then.status(200).json_body(json!({
                "items": [post_tag_json("aaaaaaaa-1111-4a2b-8c3d-000000000003")],
                "total": 3,
                "page": 2,
                "limit": 200,
            }));
        })
        .await;

    let api = Arc::new(client(&server, "token"));
    let links = AssociationClient::<PostTags>::new(api);
    let rows = links
        .list_for(Uuid::parse_str(post_id).unwrap())
        .await
        .expect("join rows");

    first.assert_async().await;
    second.assert_async().await;
    assert_eq!(rows.len(), 3);
}

#[tokio::test]
async fn association_lists_reject_a_malformed_envelope() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/post-tags");
            then.status(200)
                .json_body(json!({ "items": [], "total": 0, "page": 0, "limit": 200 }));
        })
        .await;

    let api = Arc::new(client(&server, "token"));
    let links = AssociationClient::<PostTags>::new(api);
    let err = links.list_for(Uuid::new_v4()).await.expect_err("bad envelope");

    assert!(matches!(err, ApiError::Envelope(_)));
}

#[tokio::test]
async fn unreachable_hosts_surface_as_network_errors() {
    // Nothing listens on this port; the connection is refused immediately.
    let api = ApiClient::new("http://127.0.0.1:1", "token", Duration::from_secs(1)).expect("client");
    let err = api
        .get_json::<Page<TagRecord>>("tags", &[])
        .await
        .expect_err("refused");

    assert_eq!(err.kind(), "network");
    assert_eq!(err.user_message(), "the platform API could not be reached");
}
