//! Comments screen: moderation only. Comments are written by readers on the
//! public site, so there is no create form here.

use axum::{
    extract::{Path, State},
    response::Response,
};
use uuid::Uuid;

use penna_api_types::{CommentPatch, CommentRecord, CommentStatus};

use crate::{
    application::{controller::ResourceController, pagination::ListQuery, resource::Comments},
    domain::validate::{FieldErrors, require},
    presentation::admin::views::{
        FilterFieldView, FormFieldView, RowActionView, format_timestamp,
    },
};

use super::{
    AdminState,
    screens::{FormOptions, Screen, static_options},
    shared::{RawForm, form_value, redirect_with_error, redirect_with_notice},
};

const STATUS_OPTIONS: &[(&str, &str)] = &[
    ("pending", "Pending"),
    ("approved", "Approved"),
    ("rejected", "Rejected"),
];

fn excerpt(body: &str) -> String {
    let mut text: String = body.chars().take(60).collect();
    if body.chars().count() > 60 {
        text.push('…');
    }
    text
}

fn parse_status(value: &str, errors: &mut FieldErrors) -> CommentStatus {
    match value {
        "" | "pending" => CommentStatus::Pending,
        "approved" => CommentStatus::Approved,
        "rejected" => CommentStatus::Rejected,
        other => {
            errors.push("status", format!("unknown status `{other}`"));
            CommentStatus::Pending
        }
    }
}

impl Screen for Comments {
    const FILTERS: &'static [&'static str] = &["status", "search"];
    const HAS_CREATE: bool = false;

    fn columns() -> &'static [&'static str] {
        &["Author", "Comment", "Status", "Created"]
    }

    fn cells(record: &CommentRecord) -> Vec<String> {
        vec![
            record.author_name.clone(),
            excerpt(&record.body),
            record.status.as_str().to_string(),
            format_timestamp(&record.created_at),
        ]
    }

    fn row_actions(record: &CommentRecord) -> Vec<RowActionView> {
        let mut actions = Vec::new();
        if record.status != CommentStatus::Approved {
            actions.push(RowActionView {
                label: "Approve",
                action: format!("/comments/{}/approve", record.id),
            });
        }
        if record.status != CommentStatus::Rejected {
            actions.push(RowActionView {
                label: "Reject",
                action: format!("/comments/{}/reject", record.id),
            });
        }
        actions
    }

    fn filter_fields(query: &ListQuery) -> Vec<FilterFieldView> {
        vec![
            FilterFieldView {
                name: "status",
                label: "Status",
                options: static_options(
                    &[
                        ("", "All"),
                        ("pending", "Pending"),
                        ("approved", "Approved"),
                        ("rejected", "Rejected"),
                    ],
                    query.filter("status").unwrap_or(""),
                ),
                value: String::new(),
            },
            FilterFieldView {
                name: "search",
                label: "Search",
                options: Vec::new(),
                value: query.filter("search").unwrap_or("").to_string(),
            },
        ]
    }

    fn fields(form: &RawForm, _options: &FormOptions) -> Vec<FormFieldView> {
        let status = match form_value(form, "status") {
            "" => "pending",
            value => value,
        };
        vec![
            FormFieldView::text_area("body", "Comment", form_value(form, "body")),
            FormFieldView::select("status", "Status", static_options(STATUS_OPTIONS, status)),
        ]
    }

    fn form_of(record: &CommentRecord) -> RawForm {
        let mut form = RawForm::new();
        form.insert("body".to_string(), record.body.clone());
        form.insert("status".to_string(), record.status.as_str().to_string());
        form
    }

    fn parse_patch(form: &RawForm, _existing: &CommentRecord) -> Result<CommentPatch, FieldErrors> {
        let mut errors = FieldErrors::new();
        let body = require(&mut errors, "body", form_value(form, "body")).to_string();
        let status = parse_status(form_value(form, "status"), &mut errors);

        if !errors.is_empty() {
            return Err(errors);
        }

        Ok(CommentPatch {
            body: Some(body),
            status: Some(status),
        })
    }

    fn controller(state: &AdminState) -> &ResourceController<Comments> {
        &state.comments
    }
}

async fn moderate(state: &AdminState, id: Uuid, status: CommentStatus, verb: &str) -> Response {
    let patch = CommentPatch {
        body: None,
        status: Some(status),
    };
    match state.comments.update(id, &patch).await {
        Ok(_) => redirect_with_notice("/comments", &format!("Comment {verb}.")),
        Err(err) => redirect_with_error("/comments", &err.user_message()),
    }
}

pub(super) async fn approve(State(state): State<AdminState>, Path(id): Path<Uuid>) -> Response {
    moderate(&state, id, CommentStatus::Approved, "approved").await
}

pub(super) async fn reject(State(state): State<AdminState>, Path(id): Path<Uuid>) -> Response {
    moderate(&state, id, CommentStatus::Rejected, "rejected").await
}
