use std::collections::BTreeMap;

use askama::Error as AskamaError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use datastar::prelude::ElementPatchMode;
use url::form_urlencoded;
use uuid::Uuid;

use crate::{
    application::{error::HttpError, stream::StreamBuilder},
    domain::validate::FieldErrors,
    presentation::{
        admin::views as admin_views,
        views::{TemplateRenderError, render_template_response},
    },
};

/// Raw key/value form or query payload before screen-specific parsing.
pub(super) type RawForm = BTreeMap<String, String>;

pub(super) fn form_value<'a>(form: &'a RawForm, key: &str) -> &'a str {
    form.get(key).map(String::as_str).unwrap_or("").trim()
}

/// Parse an optional reference field: blank means unset, anything else must
/// be a well-formed id.
pub(super) fn parse_optional_uuid(
    errors: &mut FieldErrors,
    field: &'static str,
    value: &str,
) -> Option<Uuid> {
    if value.is_empty() {
        return None;
    }
    match Uuid::parse_str(value) {
        Ok(id) => Some(id),
        Err(_) => {
            errors.push(field, format!("{field} is not a valid id"));
            None
        }
    }
}

pub(super) fn datastar_replace(selector: &str, html: String) -> StreamBuilder {
    let mut stream = StreamBuilder::new();
    stream.push_patch(html, selector, ElementPatchMode::Replace);
    stream
}

/// Redirect carrying a one-shot flash message in the query string.
pub(super) fn redirect_with_notice(base: &str, message: &str) -> Response {
    redirect_with(base, "notice", message)
}

pub(super) fn redirect_with_error(base: &str, message: &str) -> Response {
    redirect_with(base, "error", message)
}

fn redirect_with(base: &str, key: &str, message: &str) -> Response {
    let encoded: String = form_urlencoded::Serializer::new(String::new())
        .append_pair(key, message)
        .finish();
    Redirect::to(&format!("{base}?{encoded}")).into_response()
}

/// Page chrome derived from the request, including flash parameters.
pub(super) fn chrome_for(
    title: impl Into<String>,
    active: &'static str,
    params: &RawForm,
) -> admin_views::AdminChrome {
    admin_views::AdminChrome {
        title: title.into(),
        active,
        notice: params.get("notice").filter(|v| !v.is_empty()).cloned(),
        error: params.get("error").filter(|v| !v.is_empty()).cloned(),
    }
}

/// Wrap pre-rendered panel HTML in the admin shell.
pub(super) fn render_shell(
    chrome: admin_views::AdminChrome,
    body_html: String,
    status: StatusCode,
) -> Response {
    let nav = admin_views::nav_links(chrome.active);
    render_template_response(
        admin_views::AdminShellTemplate {
            chrome,
            nav,
            body_html,
        },
        status,
    )
}

pub(super) fn render_not_found(
    resource: &'static str,
    active: &'static str,
    back_href: &'static str,
) -> Response {
    let template = admin_views::NotFoundTemplate {
        resource,
        back_href,
    };
    let body_html = match askama::Template::render(&template) {
        Ok(html) => html,
        Err(err) => {
            return template_render_http_error(
                "infra::http::admin::render_not_found",
                "Template rendering failed",
                err,
            )
            .into_response();
        }
    };
    let chrome = chrome_for("Not found", active, &RawForm::new());
    render_shell(chrome, body_html, StatusCode::NOT_FOUND)
}

pub(super) fn template_render_http_error(
    source: &'static str,
    message: &'static str,
    err: AskamaError,
) -> HttpError {
    HttpError::from(TemplateRenderError::new(source, message, err))
}
