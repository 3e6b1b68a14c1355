mod associations;
mod categories;
mod comments;
mod dashboard;
mod health;
mod media;
mod permissions;
mod posts;
mod roles;
mod screens;
mod selectors;
mod shared;
mod state;
mod tags;
mod users;

pub use state::AdminState;

use axum::{
    Router,
    extract::DefaultBodyLimit,
    http::{StatusCode, header::CONTENT_TYPE},
    middleware,
    response::IntoResponse,
    routing::{get, post},
};

use crate::application::resource::{
    AuthorFollowers, Categories, CategoryFollowers, Comments, Media, Permissions, PostMedia,
    PostTags, Posts, RolePermissions, Roles, Tags, Users,
};
use crate::infra::http::middleware::{log_responses, set_request_context};

use associations::{attach, detach};
use screens::{create, delete, edit_screen, list_panel, list_screen, new_screen, update};

const UPLOAD_BODY_LIMIT: usize = 25 * 1024 * 1024;

pub fn build_admin_router(state: AdminState) -> Router {
    Router::new()
        .route("/", get(dashboard::dashboard))
        .route("/posts", get(list_screen::<Posts>))
        .route("/posts/panel", post(list_panel::<Posts>))
        .route("/posts/new", get(new_screen::<Posts>))
        .route("/posts/create", post(create::<Posts>))
        .route(
            "/posts/{id}/edit",
            get(edit_screen::<Posts>).post(update::<Posts>),
        )
        .route("/posts/{id}/delete", post(delete::<Posts>))
        .route("/posts/{id}/tags/attach", post(attach::<PostTags>))
        .route(
            "/posts/{id}/tags/{association_id}/detach",
            post(detach::<PostTags>),
        )
        .route("/posts/{id}/media/attach", post(attach::<PostMedia>))
        .route(
            "/posts/{id}/media/{association_id}/detach",
            post(detach::<PostMedia>),
        )
        .route("/categories", get(list_screen::<Categories>))
        .route("/categories/panel", post(list_panel::<Categories>))
        .route("/categories/new", get(new_screen::<Categories>))
        .route("/categories/create", post(create::<Categories>))
        .route(
            "/categories/{id}/edit",
            get(edit_screen::<Categories>).post(update::<Categories>),
        )
        .route("/categories/{id}/delete", post(delete::<Categories>))
        .route(
            "/categories/{id}/followers/attach",
            post(attach::<CategoryFollowers>),
        )
        .route(
            "/categories/{id}/followers/{association_id}/detach",
            post(detach::<CategoryFollowers>),
        )
        .route("/tags", get(list_screen::<Tags>))
        .route("/tags/panel", post(list_panel::<Tags>))
        .route("/tags/new", get(new_screen::<Tags>))
        .route("/tags/create", post(create::<Tags>))
        .route(
            "/tags/{id}/edit",
            get(edit_screen::<Tags>).post(update::<Tags>),
        )
        .route("/tags/{id}/delete", post(delete::<Tags>))
        .route("/comments", get(list_screen::<Comments>))
        .route("/comments/panel", post(list_panel::<Comments>))
        .route(
            "/comments/{id}/edit",
            get(edit_screen::<Comments>).post(update::<Comments>),
        )
        .route("/comments/{id}/delete", post(delete::<Comments>))
        .route("/comments/{id}/approve", post(comments::approve))
        .route("/comments/{id}/reject", post(comments::reject))
        .route("/media", get(list_screen::<Media>))
        .route("/media/panel", post(list_panel::<Media>))
        .route("/media/new", get(media::upload_screen))
        .route(
            "/media/create",
            post(media::upload).layer(DefaultBodyLimit::max(UPLOAD_BODY_LIMIT)),
        )
        .route(
            "/media/{id}/edit",
            get(edit_screen::<Media>).post(update::<Media>),
        )
        .route("/media/{id}/delete", post(delete::<Media>))
        .route("/users", get(list_screen::<Users>))
        .route("/users/panel", post(list_panel::<Users>))
        .route("/users/new", get(new_screen::<Users>))
        .route("/users/create", post(create::<Users>))
        .route(
            "/users/{id}/edit",
            get(edit_screen::<Users>).post(update::<Users>),
        )
        .route("/users/{id}/delete", post(delete::<Users>))
        .route(
            "/users/{id}/followers/attach",
            post(attach::<AuthorFollowers>),
        )
        .route(
            "/users/{id}/followers/{association_id}/detach",
            post(detach::<AuthorFollowers>),
        )
        .route("/roles", get(list_screen::<Roles>))
        .route("/roles/panel", post(list_panel::<Roles>))
        .route("/roles/new", get(new_screen::<Roles>))
        .route("/roles/create", post(create::<Roles>))
        .route(
            "/roles/{id}/edit",
            get(edit_screen::<Roles>).post(update::<Roles>),
        )
        .route("/roles/{id}/delete", post(delete::<Roles>))
        .route(
            "/roles/{id}/permissions/attach",
            post(attach::<RolePermissions>),
        )
        .route(
            "/roles/{id}/permissions/{association_id}/detach",
            post(detach::<RolePermissions>),
        )
        .route("/permissions", get(list_screen::<Permissions>))
        .route("/permissions/panel", post(list_panel::<Permissions>))
        .route("/permissions/new", get(new_screen::<Permissions>))
        .route("/permissions/create", post(create::<Permissions>))
        .route(
            "/permissions/{id}/edit",
            get(edit_screen::<Permissions>).post(update::<Permissions>),
        )
        .route("/permissions/{id}/delete", post(delete::<Permissions>))
        .route("/_health", get(health::health))
        .route("/static/admin.css", get(stylesheet))
        .with_state(state)
        .layer(middleware::from_fn(log_responses))
        .layer(middleware::from_fn(set_request_context))
}

async fn stylesheet() -> impl IntoResponse {
    (
        StatusCode::OK,
        [(CONTENT_TYPE, "text/css; charset=utf-8")],
        include_str!("../../../../assets/admin.css"),
    )
}
