use askama::Template;
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use tracing::warn;

use crate::{
    infra::api::ApiError,
    presentation::admin::views::{DashboardCardView, DashboardTemplate},
};

use super::{
    AdminState,
    shared::{RawForm, chrome_for, render_shell, template_render_http_error},
};

fn card(title: &'static str, href: &'static str, result: Result<u64, ApiError>) -> DashboardCardView {
    let count = match result {
        Ok(count) => Some(count),
        Err(err) => {
            warn!(
                target = "penna::http::admin::dashboard",
                collection = title,
                error = %err,
                "count unavailable"
            );
            None
        }
    };
    DashboardCardView { title, href, count }
}

pub(super) async fn dashboard(
    State(state): State<AdminState>,
    Query(params): Query<RawForm>,
) -> Response {
    let (posts, categories, tags, comments, media, users, roles, permissions) = tokio::join!(
        state.posts.count(),
        state.categories.count(),
        state.tags.count(),
        state.comments.count(),
        state.media.count(),
        state.users.count(),
        state.roles.count(),
        state.permissions.count(),
    );

    let cards = vec![
        card("Posts", "/posts", posts),
        card("Categories", "/categories", categories),
        card("Tags", "/tags", tags),
        card("Comments", "/comments", comments),
        card("Media", "/media", media),
        card("Users", "/users", users),
        card("Roles", "/roles", roles),
        card("Permissions", "/permissions", permissions),
    ];

    let body_html = match (DashboardTemplate { cards }).render() {
        Ok(html) => html,
        Err(err) => {
            return template_render_http_error(
                "infra::http::admin::dashboard",
                "Template rendering failed",
                err,
            )
            .into_response();
        }
    };

    let chrome = chrome_for("Dashboard", "/", &params);
    render_shell(chrome, body_html, StatusCode::OK)
}
