//! Media screen. Creation goes through a multipart upload instead of the
//! generic JSON create path; the binary travels to the platform as the
//! `file` part.

use axum::{
    extract::{Multipart, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};

use penna_api_types::{MediaPatch, MediaRecord};

use crate::{
    application::{controller::ResourceController, pagination::ListQuery, resource::Media},
    domain::validate::{FieldErrors, blank_to_none, require},
    presentation::admin::views::{
        self as admin_views, FilterFieldView, FormFieldView, ResourceFormView, format_timestamp,
    },
};

use super::{
    AdminState,
    screens::{FormOptions, Screen},
    shared::{
        RawForm, chrome_for, form_value, redirect_with_notice, render_shell,
        template_render_http_error,
    },
};

fn format_size(bytes: u64) -> String {
    if bytes >= 1024 * 1024 {
        format!("{:.1} MB", bytes as f64 / (1024.0 * 1024.0))
    } else if bytes >= 1024 {
        format!("{:.1} KB", bytes as f64 / 1024.0)
    } else {
        format!("{bytes} B")
    }
}

impl Screen for Media {
    fn columns() -> &'static [&'static str] {
        &["File", "Type", "Size", "Updated"]
    }

    fn cells(record: &MediaRecord) -> Vec<String> {
        vec![
            record.file_name.clone(),
            record.mime_type.clone(),
            format_size(record.size_bytes),
            format_timestamp(&record.updated_at),
        ]
    }

    fn filter_fields(query: &ListQuery) -> Vec<FilterFieldView> {
        vec![FilterFieldView {
            name: "search",
            label: "Search",
            options: Vec::new(),
            value: query.filter("search").unwrap_or("").to_string(),
        }]
    }

    fn fields(form: &RawForm, _options: &FormOptions) -> Vec<FormFieldView> {
        vec![
            FormFieldView::text("file_name", "File name", form_value(form, "file_name")),
            FormFieldView::text("alt_text", "Alt text", form_value(form, "alt_text")),
        ]
    }

    fn form_of(record: &MediaRecord) -> RawForm {
        let mut form = RawForm::new();
        form.insert("file_name".to_string(), record.file_name.clone());
        form.insert(
            "alt_text".to_string(),
            record.alt_text.clone().unwrap_or_default(),
        );
        form
    }

    fn parse_patch(form: &RawForm, _existing: &MediaRecord) -> Result<MediaPatch, FieldErrors> {
        let mut errors = FieldErrors::new();
        let file_name = require(&mut errors, "file_name", form_value(form, "file_name")).to_string();

        if !errors.is_empty() {
            return Err(errors);
        }

        Ok(MediaPatch {
            file_name: Some(file_name),
            alt_text: Some(blank_to_none(Some(form_value(form, "alt_text")))),
        })
    }

    fn controller(state: &AdminState) -> &ResourceController<Media> {
        &state.media
    }
}

fn render_upload_form(
    alt_text: &str,
    file_error: Option<String>,
    submit_error: Option<String>,
    status: StatusCode,
) -> Response {
    let mut file_field = FormFieldView::file("file", "File");
    file_field.error = file_error;

    let content = ResourceFormView {
        title: "Upload media".to_string(),
        action: "/media/create".to_string(),
        submit_label: "Upload",
        multipart: true,
        fields: vec![
            file_field,
            FormFieldView::text("alt_text", "Alt text", alt_text),
        ],
        pickers: Vec::new(),
        back_href: "/media".to_string(),
        submit_error,
    };

    let body_html = match askama::Template::render(&admin_views::ResourceFormPanelTemplate {
        content,
    }) {
        Ok(html) => html,
        Err(err) => {
            return template_render_http_error(
                "infra::http::admin::render_upload_form",
                "Template rendering failed",
                err,
            )
            .into_response();
        }
    };

    let chrome = chrome_for("Upload media", "/media", &RawForm::new());
    render_shell(chrome, body_html, status)
}

pub(super) async fn upload_screen(State(_state): State<AdminState>) -> Response {
    render_upload_form("", None, None, StatusCode::OK)
}

pub(super) async fn upload(State(state): State<AdminState>, mut multipart: Multipart) -> Response {
    let mut alt_text = String::new();
    let mut file: Option<(String, String, Vec<u8>)> = None;

    loop {
        match multipart.next_field().await {
            Ok(Some(field)) => match field.name() {
                Some("alt_text") => {
                    alt_text = field.text().await.unwrap_or_default();
                }
                Some("file") => {
                    let file_name = field
                        .file_name()
                        .filter(|name| !name.is_empty())
                        .unwrap_or("upload.bin")
                        .to_string();
                    let mime = field.content_type().map(str::to_string).unwrap_or_else(|| {
                        mime_guess::from_path(&file_name)
                            .first_or_octet_stream()
                            .to_string()
                    });
                    match field.bytes().await {
                        Ok(data) if !data.is_empty() => {
                            file = Some((file_name, mime, data.to_vec()));
                        }
                        Ok(_) => {}
                        Err(err) => {
                            return render_upload_form(
                                &alt_text,
                                None,
                                Some(format!("upload could not be read: {err}")),
                                StatusCode::UNPROCESSABLE_ENTITY,
                            );
                        }
                    }
                }
                _ => {}
            },
            Ok(None) => break,
            Err(err) => {
                return render_upload_form(
                    &alt_text,
                    None,
                    Some(format!("upload could not be read: {err}")),
                    StatusCode::UNPROCESSABLE_ENTITY,
                );
            }
        }
    }

    let Some((file_name, mime, data)) = file else {
        return render_upload_form(
            &alt_text,
            Some("a file is required".to_string()),
            None,
            StatusCode::UNPROCESSABLE_ENTITY,
        );
    };

    let part = reqwest::multipart::Part::bytes(data.clone()).file_name(file_name.clone());
    let part = match part.mime_str(&mime) {
        Ok(part) => part,
        Err(_) => reqwest::multipart::Part::bytes(data).file_name(file_name.clone()),
    };

    let mut form = reqwest::multipart::Form::new()
        .part("file", part)
        .text("file_name", file_name);
    if let Some(alt) = blank_to_none(Some(alt_text.as_str())) {
        form = form.text("alt_text", alt);
    }

    match state.api.post_multipart::<MediaRecord>("media/upload", form).await {
        Ok(record) => {
            state.media.note_external_write().await;
            redirect_with_notice("/media", &format!("Uploaded \"{}\".", record.file_name))
        }
        Err(err) => render_upload_form(
            &alt_text,
            None,
            Some(err.user_message()),
            StatusCode::UNPROCESSABLE_ENTITY,
        ),
    }
}
