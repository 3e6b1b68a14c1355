//! End-to-end admin screen flows against a mocked platform API.

use std::{num::NonZeroU32, sync::Arc, time::Duration};

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
};
use http_body_util::BodyExt;
use httpmock::prelude::*;
use serde_json::json;
use tower::ServiceExt;

use penna::{
    config::UiSettings,
    infra::{
        api::ApiClient,
        http::{AdminState, build_admin_router},
    },
};

const TAG_ID: &str = "6f8e2c1a-3b4d-4e5f-8a9b-0c1d2e3f4a5b";
const ROLE_ID: &str = "9a1b2c3d-4e5f-4a6b-8c7d-0e1f2a3b4c5d";
const PERM_ID: &str = "1c2d3e4f-5a6b-4c7d-8e9f-0a1b2c3d4e5f";
const OTHER_PERM_ID: &str = "2d3e4f5a-6b7c-4d8e-9f0a-1b2c3d4e5f6a";
const LINK_ID: &str = "3e4f5a6b-7c8d-4e9f-a0b1-c2d3e4f5a6b7";
const COMMENT_ID: &str = "4f5a6b7c-8d9e-4f0a-b1c2-d3e4f5a6b7c8";

fn admin_router(server: &MockServer) -> Router {
    let api = ApiClient::new(&server.base_url(), "test-token", Duration::from_secs(5))
        .expect("client");
    let ui = UiSettings {
        page_size: NonZeroU32::new(20).unwrap(),
        picker_limit: NonZeroU32::new(100).unwrap(),
        poll_interval: Duration::from_secs(30),
    };
    build_admin_router(AdminState::new(Arc::new(api), ui))
}

fn tag_json() -> serde_json::Value {
    json!({
        "id": TAG_ID,
        "name": "Rust",
        "slug": "rust",
        "created_at": "2025-01-01T00:00:00Z",
        "updated_at": "2025-01-02T03:04:00Z",
    })
}

fn tag_page(items: Vec<serde_json::Value>) -> serde_json::Value {
    let total = items.len();
    json!({ "items": items, "total": total, "page": 1, "limit": 20 })
}

async fn get(router: &Router, uri: &str) -> (StatusCode, String) {
    let response = router
        .clone()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .expect("request");
    let status = response.status();
    let body = response.into_body().collect().await.expect("body").to_bytes();
    (status, String::from_utf8_lossy(&body).to_string())
}

async fn post_form(router: &Router, uri: &str, form: &str) -> (StatusCode, Option<String>, String) {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(form.to_string()))
        .unwrap();
    let response = router.clone().oneshot(request).await.expect("request");
    let status = response.status();
    let location = response
        .headers()
        .get(header::LOCATION)
        .and_then(|value| value.to_str().ok())
        .map(str::to_string);
    let body = response.into_body().collect().await.expect("body").to_bytes();
    (status, location, String::from_utf8_lossy(&body).to_string())
}

#[tokio::test]
async fn list_screen_renders_fetched_rows() {
    let server = MockServer::start_async().await;
    let list = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/tags")
                .query_param("page", "1")
                .query_param("limit", "20");
            then.status(200).json_body(tag_page(vec![tag_json()]));
        })
        .await;

    let router = admin_router(&server);
    let (status, body) = get(&router, "/tags").await;

    list.assert_async().await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("data-admin-panel=\"tags\""));
    assert!(body.contains("Rust"));
    assert!(body.contains("/tags/6f8e2c1a-3b4d-4e5f-8a9b-0c1d2e3f4a5b/edit"));
}

#[tokio::test]
async fn blank_name_is_rejected_before_any_remote_call() {
    let server = MockServer::start_async().await;
    let create = server
        .mock_async(|when, then| {
            when.method(POST).path("/tags");
            then.status(201).json_body(tag_json());
        })
        .await;

    let router = admin_router(&server);
    let (status, _, body) = post_form(&router, "/tags/create", "name=&slug=").await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body.contains("name is required"));
    create.assert_hits_async(0).await;
}

#[tokio::test]
async fn unconfirmed_delete_is_declined_without_remote_call() {
    let server = MockServer::start_async().await;
    let delete = server
        .mock_async(|when, then| {
            when.method(DELETE).path(format!("/tags/{TAG_ID}"));
            then.status(204);
        })
        .await;

    let router = admin_router(&server);
    let (status, location, _) = post_form(&router, &format!("/tags/{TAG_ID}/delete"), "").await;

    assert_eq!(status, StatusCode::SEE_OTHER);
    let location = location.expect("redirect location");
    assert!(location.starts_with("/tags?error="));
    delete.assert_hits_async(0).await;
}

#[tokio::test]
async fn confirmed_delete_reaches_the_platform() {
    let server = MockServer::start_async().await;
    let delete = server
        .mock_async(|when, then| {
            when.method(DELETE).path(format!("/tags/{TAG_ID}"));
            then.status(204);
        })
        .await;

    let router = admin_router(&server);
    let (status, location, _) =
        post_form(&router, &format!("/tags/{TAG_ID}/delete"), "confirm=on").await;

    delete.assert_async().await;
    assert_eq!(status, StatusCode::SEE_OTHER);
    assert_eq!(location.as_deref(), Some("/tags?notice=Deleted+tag."));
}

#[tokio::test]
async fn successful_create_redirects_and_refreshes_the_list() {
    let server = MockServer::start_async().await;
    let list = server
        .mock_async(|when, then| {
            when.method(GET).path("/tags");
            then.status(200).json_body(tag_page(Vec::new()));
        })
        .await;
    let create = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/tags")
                .json_body(json!({ "name": "Rust", "slug": "rust" }));
            then.status(201).json_body(tag_json());
        })
        .await;

    let router = admin_router(&server);

    // Prime the snapshot, then mutate: the follow-up list render must
    // refetch instead of serving the cached page.
    let (status, _) = get(&router, "/tags").await;
    assert_eq!(status, StatusCode::OK);

    let (status, location, _) = post_form(&router, "/tags/create", "name=Rust&slug=").await;
    create.assert_async().await;
    assert_eq!(status, StatusCode::SEE_OTHER);
    assert_eq!(
        location.as_deref(),
        Some("/tags?notice=Created+tag+%22Rust%22.")
    );

    let (status, _) = get(&router, "/tags").await;
    assert_eq!(status, StatusCode::OK);
    list.assert_hits_async(2).await;
}

#[tokio::test]
async fn failed_fetch_surfaces_the_platform_message() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/tags");
            then.status(503).json_body(json!({ "message": "maintenance window" }));
        })
        .await;

    let router = admin_router(&server);
    let (status, body) = get(&router, "/tags").await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("maintenance window"));
    assert!(body.contains("flash-error"));
}

#[tokio::test]
async fn editing_a_missing_record_renders_not_found() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path(format!("/tags/{TAG_ID}"));
            then.status(404).json_body(json!({ "message": "no such tag" }));
        })
        .await;

    let router = admin_router(&server);
    let (status, body) = get(&router, &format!("/tags/{TAG_ID}/edit")).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body.contains("tag"));
}

#[tokio::test]
async fn rejected_update_re_renders_with_the_server_message() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path(format!("/tags/{TAG_ID}"));
            then.status(200).json_body(tag_json());
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(PATCH).path(format!("/tags/{TAG_ID}"));
            then.status(409).json_body(json!({ "message": "slug already in use" }));
        })
        .await;

    let router = admin_router(&server);
    let (status, _, body) = post_form(
        &router,
        &format!("/tags/{TAG_ID}/edit"),
        "name=Rust&slug=rust",
    )
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body.contains("slug already in use"));
}

#[tokio::test]
async fn list_panel_streams_a_datastar_patch() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/tags");
            then.status(200).json_body(tag_page(vec![tag_json()]));
        })
        .await;

    let router = admin_router(&server);
    let request = Request::builder()
        .method("POST")
        .uri("/tags/panel")
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from("page=1"))
        .unwrap();
    let response = router.clone().oneshot(request).await.expect("request");

    assert_eq!(response.status(), StatusCode::OK);
    let content_type = response
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default()
        .to_string();
    assert!(content_type.starts_with("text/event-stream"));

    let body = response.into_body().collect().await.expect("body").to_bytes();
    let body = String::from_utf8_lossy(&body);
    assert!(body.contains("data-admin-panel=\\\"tags\\\"") || body.contains("data-admin-panel=\"tags\""));
    assert!(body.contains("Rust"));
}

fn permission_json(id: &str, name: &str) -> serde_json::Value {
    json!({
        "id": id,
        "name": name,
        "description": null,
        "created_at": "2025-01-01T00:00:00Z",
        "updated_at": "2025-01-01T00:00:00Z",
    })
}

fn role_permission_json() -> serde_json::Value {
    json!({
        "id": LINK_ID,
        "role_id": ROLE_ID,
        "permission_id": PERM_ID,
        "created_at": "2025-01-01T00:00:00Z",
    })
}

#[tokio::test]
async fn attaching_a_permission_posts_the_join_row() {
    let server = MockServer::start_async().await;
    let attach = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/role-permissions")
                .json_body(json!({ "role_id": ROLE_ID, "permission_id": PERM_ID }));
            then.status(201).json_body(role_permission_json());
        })
        .await;

    let router = admin_router(&server);
    let (status, location, _) = post_form(
        &router,
        &format!("/roles/{ROLE_ID}/permissions/attach"),
        &format!("right_id={PERM_ID}"),
    )
    .await;

    attach.assert_async().await;
    assert_eq!(status, StatusCode::SEE_OTHER);
    assert_eq!(
        location.as_deref(),
        Some(format!("/roles/{ROLE_ID}/edit?notice=Attached.").as_str())
    );
}

#[tokio::test]
async fn detaching_a_permission_deletes_the_join_row() {
    let server = MockServer::start_async().await;
    let detach = server
        .mock_async(|when, then| {
            when.method(DELETE).path(format!("/role-permissions/{LINK_ID}"));
            then.status(204);
        })
        .await;

    let router = admin_router(&server);
    let (status, location, _) = post_form(
        &router,
        &format!("/roles/{ROLE_ID}/permissions/{LINK_ID}/detach"),
        "",
    )
    .await;

    detach.assert_async().await;
    assert_eq!(status, StatusCode::SEE_OTHER);
    assert_eq!(
        location.as_deref(),
        Some(format!("/roles/{ROLE_ID}/edit?notice=Detached.").as_str())
    );
}

#[tokio::test]
async fn attached_permissions_render_disabled_in_the_picker() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path(format!("/roles/{ROLE_ID}"));
            then.status(200).json_body(json!({
                "id": ROLE_ID,
                "name": "Editor",
                "description": null,
                "created_at": "2025-01-01T00:00:00Z",
                "updated_at": "2025-01-01T00:00:00Z",
            }));
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/role-permissions")
                .query_param("role_id", ROLE_ID);
            then.status(200).json_body(json!({
                "items": [role_permission_json()],
                "total": 1,
                "page": 1,
                "limit": 200,
            }));
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/permissions");
            then.status(200).json_body(json!({
                "items": [
                    permission_json(PERM_ID, "comments.moderate"),
                    permission_json(OTHER_PERM_ID, "posts.publish"),
                ],
                "total": 2,
                "page": 1,
                "limit": 100,
            }));
        })
        .await;

    let router = admin_router(&server);
    let (status, body) = get(&router, &format!("/roles/{ROLE_ID}/edit")).await;

    assert_eq!(status, StatusCode::OK);
    // The attached permission stays listed but cannot be attached again.
    assert!(body.contains(&format!("value=\"{PERM_ID}\" disabled")));
    assert!(body.contains(&format!("value=\"{OTHER_PERM_ID}\">")));
    assert!(body.contains("comments.moderate"));
}

#[tokio::test]
async fn approving_a_comment_patches_its_status() {
    let server = MockServer::start_async().await;
    let patch = server
        .mock_async(|when, then| {
            when.method(PATCH)
                .path(format!("/comments/{COMMENT_ID}"))
                .json_body(json!({ "status": "approved" }));
            then.status(200).json_body(json!({
                "id": COMMENT_ID,
                "post_id": TAG_ID,
                "author_name": "Ada",
                "body": "Nice post!",
                "status": "approved",
                "created_at": "2025-01-01T00:00:00Z",
                "updated_at": "2025-01-02T00:00:00Z",
            }));
        })
        .await;

    let router = admin_router(&server);
    let (status, location, _) =
        post_form(&router, &format!("/comments/{COMMENT_ID}/approve"), "").await;

    patch.assert_async().await;
    assert_eq!(status, StatusCode::SEE_OTHER);
    assert_eq!(
        location.as_deref(),
        Some("/comments?notice=Comment+approved.")
    );
}

#[tokio::test]
async fn health_reports_platform_reachability() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/tags");
            then.status(200).json_body(tag_page(Vec::new()));
        })
        .await;

    let router = admin_router(&server);
    let (status, _) = get(&router, "/_health").await;
    assert_eq!(status, StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn health_degrades_when_the_platform_is_down() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/tags");
            then.status(500).json_body(json!({ "message": "boom" }));
        })
        .await;

    let router = admin_router(&server);
    let (status, _) = get(&router, "/_health").await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
}
