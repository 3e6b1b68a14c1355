//! Posts screen: the richest editor, with category/author references and
//! tag/media pickers.

use uuid::Uuid;

use penna_api_types::{PostDraft, PostPatch, PostRecord, PostStatus};

use crate::{
    application::{
        controller::ResourceController,
        forms::resolve_slug,
        pagination::ListQuery,
        resource::{PostMedia, PostTags, Posts},
    },
    domain::validate::{FieldErrors, blank_to_none, require},
    infra::api::ApiError,
    presentation::admin::views::{
        FilterFieldView, FormFieldView, PickerView, format_timestamp,
    },
};

use super::{
    AdminState,
    associations::build_picker,
    screens::{FormOptions, Screen, record_options, static_options},
    shared::{RawForm, form_value, parse_optional_uuid},
};

const STATUS_OPTIONS: &[(&str, &str)] = &[("draft", "Draft"), ("published", "Published")];

fn parse_status(value: &str, errors: &mut FieldErrors) -> PostStatus {
    match value {
        "" | "draft" => PostStatus::Draft,
        "published" => PostStatus::Published,
        other => {
            errors.push("status", format!("unknown status `{other}`"));
            PostStatus::Draft
        }
    }
}

impl Screen for Posts {
    const FILTERS: &'static [&'static str] = &["status", "search"];

    fn columns() -> &'static [&'static str] {
        &["Title", "Slug", "Status", "Updated"]
    }

    fn cells(record: &PostRecord) -> Vec<String> {
        vec![
            record.title.clone(),
            record.slug.clone(),
            record.status.as_str().to_string(),
            format_timestamp(&record.updated_at),
        ]
    }

    fn filter_fields(query: &ListQuery) -> Vec<FilterFieldView> {
        vec![
            FilterFieldView {
                name: "status",
                label: "Status",
                options: static_options(
                    &[("", "All"), ("draft", "Draft"), ("published", "Published")],
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

    fn fields(form: &RawForm, options: &FormOptions) -> Vec<FormFieldView> {
        let status = match form_value(form, "status") {
            "" => "draft",
            value => value,
        };
        vec![
            FormFieldView::text("title", "Title", form_value(form, "title")),
            FormFieldView::text("slug", "Slug", form_value(form, "slug"))
                .with_hint("Leave blank to derive from the title."),
            FormFieldView::text_area("excerpt", "Excerpt", form_value(form, "excerpt")),
            FormFieldView::text_area("body", "Body", form_value(form, "body")),
            FormFieldView::select("status", "Status", static_options(STATUS_OPTIONS, status)),
            FormFieldView::select(
                "category_id",
                "Category",
                options.select("category_id", form_value(form, "category_id")),
            ),
            FormFieldView::select(
                "author_id",
                "Author",
                options.select("author_id", form_value(form, "author_id")),
            ),
        ]
    }

    fn form_of(record: &PostRecord) -> RawForm {
        let mut form = RawForm::new();
        form.insert("title".to_string(), record.title.clone());
        form.insert("slug".to_string(), record.slug.clone());
        form.insert(
            "excerpt".to_string(),
            record.excerpt.clone().unwrap_or_default(),
        );
        form.insert("body".to_string(), record.body.clone());
        form.insert("status".to_string(), record.status.as_str().to_string());
        form.insert(
            "category_id".to_string(),
            record
                .category_id
                .map(|id| id.to_string())
                .unwrap_or_default(),
        );
        form.insert(
            "author_id".to_string(),
            record
                .author_id
                .map(|id| id.to_string())
                .unwrap_or_default(),
        );
        form
    }

    fn parse_draft(form: &RawForm) -> Result<PostDraft, FieldErrors> {
        let mut errors = FieldErrors::new();
        let title = require(&mut errors, "title", form_value(form, "title")).to_string();
        let body = require(&mut errors, "body", form_value(form, "body")).to_string();

        let slug = if title.is_empty() {
            String::new()
        } else {
            match resolve_slug(&title, Some(form_value(form, "slug")), None) {
                Ok(slug) => slug,
                Err(err) => {
                    errors.push("slug", err.to_string());
                    String::new()
                }
            }
        };

        let status = parse_status(form_value(form, "status"), &mut errors);
        let category_id =
            parse_optional_uuid(&mut errors, "category_id", form_value(form, "category_id"));
        let author_id =
            parse_optional_uuid(&mut errors, "author_id", form_value(form, "author_id"));

        if !errors.is_empty() {
            return Err(errors);
        }

        Ok(PostDraft {
            title,
            slug,
            excerpt: blank_to_none(Some(form_value(form, "excerpt"))),
            body,
            status,
            category_id,
            author_id,
        })
    }

    fn parse_patch(form: &RawForm, existing: &PostRecord) -> Result<PostPatch, FieldErrors> {
        let mut errors = FieldErrors::new();
        let title = require(&mut errors, "title", form_value(form, "title")).to_string();
        let body = require(&mut errors, "body", form_value(form, "body")).to_string();

        let slug = if title.is_empty() {
            String::new()
        } else {
            match resolve_slug(&title, Some(form_value(form, "slug")), Some(&existing.slug)) {
                Ok(slug) => slug,
                Err(err) => {
                    errors.push("slug", err.to_string());
                    String::new()
                }
            }
        };

        let status = parse_status(form_value(form, "status"), &mut errors);
        let category_id =
            parse_optional_uuid(&mut errors, "category_id", form_value(form, "category_id"));
        let author_id =
            parse_optional_uuid(&mut errors, "author_id", form_value(form, "author_id"));

        if !errors.is_empty() {
            return Err(errors);
        }

        Ok(PostPatch {
            title: Some(title),
            slug: Some(slug),
            excerpt: Some(blank_to_none(Some(form_value(form, "excerpt")))),
            body: Some(body),
            status: Some(status),
            category_id: Some(category_id),
            author_id: Some(author_id),
        })
    }

    fn controller(state: &AdminState) -> &ResourceController<Posts> {
        &state.posts
    }

    async fn form_options(state: &AdminState) -> Result<FormOptions, ApiError> {
        let mut options = FormOptions::default();
        options.insert("category_id", record_options(&state.categories, true).await?);
        options.insert("author_id", record_options(&state.users, true).await?);
        Ok(options)
    }

    async fn pickers(state: &AdminState, id: Uuid) -> Result<Vec<PickerView>, ApiError> {
        Ok(vec![
            build_picker::<PostTags>(state, id).await?,
            build_picker::<PostMedia>(state, id).await?,
        ])
    }
}
