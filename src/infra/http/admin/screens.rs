//! Generic machinery behind every collection screen.
//!
//! Each collection implements [`Screen`] to describe its columns, filters,
//! and form fields; the handlers here do the rest. Handlers are registered
//! per collection with turbofish, so each route stays a concrete axum
//! handler.

use std::collections::BTreeMap;
use std::future::Future;

use askama::Template;
use axum::{
    extract::{Form, Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use url::form_urlencoded;
use uuid::Uuid;

use crate::{
    application::{
        controller::ResourceController,
        error::AppError,
        forms::FormPhase,
        mutation::{Confirmation, DeleteOutcome},
        pagination::{ListQuery, page_links},
        query::BoundQuery,
        resource::Resource,
    },
    config::UiSettings,
    domain::validate::FieldErrors,
    infra::api::ApiError,
    presentation::admin::views::{
        self as admin_views, FilterFieldView, FormFieldView, PaginationView, PickerView,
        ResourceFormView, ResourceListView, ResourceRowView, RowActionView, SelectOptionView,
    },
};

use super::{
    AdminState,
    selectors::panel_selector,
    shared::{
        RawForm, chrome_for, datastar_replace, redirect_with_error, redirect_with_notice,
        render_not_found, render_shell, template_render_http_error,
    },
};

/// Select options fetched ahead of form rendering, keyed by field name.
#[derive(Default)]
pub(super) struct FormOptions {
    selects: BTreeMap<&'static str, Vec<SelectOptionView>>,
}

impl FormOptions {
    pub fn insert(&mut self, field: &'static str, options: Vec<SelectOptionView>) {
        self.selects.insert(field, options);
    }

    /// Options for the named field with the current value marked selected.
    pub fn select(&self, field: &'static str, value: &str) -> Vec<SelectOptionView> {
        self.selects
            .get(field)
            .map(|options| {
                options
                    .iter()
                    .map(|option| SelectOptionView {
                        selected: option.value == value,
                        ..option.clone()
                    })
                    .collect()
            })
            .unwrap_or_default()
    }
}

/// One selectable option per record of a collection, optionally preceded by
/// an empty "None" entry for nullable references.
pub(super) async fn record_options<R: Resource>(
    controller: &ResourceController<R>,
    include_none: bool,
) -> Result<Vec<SelectOptionView>, ApiError> {
    let page = controller.pick_list().await?;
    let mut options = Vec::new();
    if include_none {
        options.push(SelectOptionView {
            value: String::new(),
            label: "None".to_string(),
            selected: false,
            disabled: false,
        });
    }
    options.extend(page.items.iter().map(|record| SelectOptionView {
        value: R::id(record).to_string(),
        label: R::label(record),
        selected: false,
        disabled: false,
    }));
    Ok(options)
}

/// Fixed option list with the current value marked selected.
pub(super) fn static_options(pairs: &[(&str, &str)], value: &str) -> Vec<SelectOptionView> {
    pairs
        .iter()
        .map(|(option_value, label)| SelectOptionView {
            value: option_value.to_string(),
            label: label.to_string(),
            selected: *option_value == value,
            disabled: false,
        })
        .collect()
}

/// Per-collection description of the admin screens.
pub(super) trait Screen: Resource + Sized {
    /// Filter parameter names bound into the list query.
    const FILTERS: &'static [&'static str] = &["search"];
    /// Whether the collection exposes a create form.
    const HAS_CREATE: bool = true;

    fn columns() -> &'static [&'static str];
    fn cells(record: &Self::Record) -> Vec<String>;

    fn row_actions(_record: &Self::Record) -> Vec<RowActionView> {
        Vec::new()
    }

    fn filter_fields(query: &ListQuery) -> Vec<FilterFieldView>;

    /// Form fields rendered from raw submitted (or prefilled) values.
    fn fields(form: &RawForm, options: &FormOptions) -> Vec<FormFieldView>;

    /// Raw form values representing an existing record.
    fn form_of(record: &Self::Record) -> RawForm;

    fn parse_draft(_form: &RawForm) -> Result<Self::Draft, FieldErrors> {
        let mut errors = FieldErrors::new();
        errors.push("form", "this collection does not support creation here");
        Err(errors)
    }

    fn parse_patch(form: &RawForm, existing: &Self::Record) -> Result<Self::Patch, FieldErrors>;

    fn controller(state: &AdminState) -> &ResourceController<Self>;

    fn form_options(
        _state: &AdminState,
    ) -> impl Future<Output = Result<FormOptions, ApiError>> + Send {
        async { Ok(FormOptions::default()) }
    }

    fn pickers(
        _state: &AdminState,
        _id: Uuid,
    ) -> impl Future<Output = Result<Vec<PickerView>, ApiError>> + Send {
        async { Ok(Vec::new()) }
    }
}

pub(super) fn query_from_params<S: Screen>(params: &RawForm, ui: &UiSettings) -> ListQuery {
    let page = params
        .get("page")
        .and_then(|value| value.trim().parse().ok())
        .unwrap_or(1);
    let mut query = ListQuery::new(page, ui.page_size.get());
    for name in S::FILTERS {
        if let Some(value) = params.get(*name) {
            let trimmed = value.trim();
            if !trimmed.is_empty() {
                query = query.with_filter(*name, trimmed);
            }
        }
    }
    query
}

fn list_href<S: Screen>(page: u32, query: &ListQuery) -> String {
    let mut serializer = form_urlencoded::Serializer::new(String::new());
    serializer.append_pair("page", &page.to_string());
    for (key, value) in &query.filters {
        serializer.append_pair(key, value);
    }
    format!("{}?{}", S::SCREEN, serializer.finish())
}

async fn build_list_view<S: Screen>(state: &AdminState, query: ListQuery) -> ResourceListView {
    let poll_seconds = state.ui.poll_interval.as_secs();
    let new_href = S::HAS_CREATE.then(|| format!("{}/new", S::SCREEN));

    match S::controller(state).list(query.clone()).await {
        BoundQuery::Fresh(page) | BoundQuery::Cached(page) => {
            let rows = page
                .items
                .iter()
                .map(|record| {
                    let id = S::id(record);
                    ResourceRowView {
                        id: id.to_string(),
                        cells: S::cells(record),
                        edit_href: format!("{}/{id}/edit", S::SCREEN),
                        delete_action: format!("{}/{id}/delete", S::SCREEN),
                        actions: S::row_actions(record),
                    }
                })
                .collect();
            let links = page_links(&page);
            ResourceListView {
                title: S::TITLE,
                panel_name: S::COLLECTION,
                base_path: S::SCREEN,
                new_href,
                columns: S::columns(),
                rows,
                filters: S::filter_fields(&query),
                pagination: PaginationView {
                    page: page.page,
                    total_pages: links.total_pages,
                    previous_href: links.previous.map(|page| list_href::<S>(page, &query)),
                    next_href: links.next.map(|page| list_href::<S>(page, &query)),
                },
                total: page.total,
                poll_seconds,
                fetch_error: None,
            }
        }
        BoundQuery::Failed { message } => ResourceListView {
            title: S::TITLE,
            panel_name: S::COLLECTION,
            base_path: S::SCREEN,
            new_href,
            columns: S::columns(),
            rows: Vec::new(),
            filters: S::filter_fields(&query),
            pagination: PaginationView {
                page: query.page,
                total_pages: query.page,
                previous_href: None,
                next_href: None,
            },
            total: 0,
            poll_seconds,
            fetch_error: Some(message),
        },
    }
}

fn render_list_panel(content: ResourceListView, source: &'static str) -> Result<String, Response> {
    admin_views::ResourceListPanelTemplate { content }
        .render()
        .map_err(|err| {
            template_render_http_error(source, "Template rendering failed", err).into_response()
        })
}

pub(super) async fn list_screen<S: Screen>(
    State(state): State<AdminState>,
    Query(params): Query<RawForm>,
) -> Response {
    let query = query_from_params::<S>(&params, &state.ui);
    let content = build_list_view::<S>(&state, query).await;
    let body_html = match render_list_panel(content, "infra::http::admin::list_screen") {
        Ok(html) => html,
        Err(response) => return response,
    };
    let chrome = chrome_for(S::TITLE, S::SCREEN, &params);
    render_shell(chrome, body_html, StatusCode::OK)
}

/// Datastar refresh target: replaces the panel in place, both for filter
/// submissions and for the poll interval.
pub(super) async fn list_panel<S: Screen>(
    State(state): State<AdminState>,
    Form(params): Form<RawForm>,
) -> Response {
    let query = query_from_params::<S>(&params, &state.ui);
    let content = build_list_view::<S>(&state, query).await;
    let html = match render_list_panel(content, "infra::http::admin::list_panel") {
        Ok(html) => html,
        Err(response) => return response,
    };
    datastar_replace(&panel_selector(S::COLLECTION), html).into_response()
}

struct FormRender<'a> {
    title: String,
    action: String,
    submit_label: &'static str,
    form: &'a RawForm,
    errors: Option<&'a FieldErrors>,
    submit_error: Option<String>,
    pickers: Vec<PickerView>,
    status: StatusCode,
}

fn overlay_errors(fields: &mut [FormFieldView], errors: &FieldErrors) {
    for field in fields {
        if let Some(message) = errors.message_for(field.name) {
            field.error = Some(message.to_string());
        }
    }
}

async fn render_form<S: Screen>(state: &AdminState, render: FormRender<'_>) -> Response {
    let options = match S::form_options(state).await {
        Ok(options) => options,
        Err(err) => return AppError::from(err).into_response(),
    };

    let mut fields = S::fields(render.form, &options);
    if let Some(errors) = render.errors {
        overlay_errors(&mut fields, errors);
    }

    let content = ResourceFormView {
        title: render.title.clone(),
        action: render.action,
        submit_label: render.submit_label,
        multipart: false,
        fields,
        pickers: render.pickers,
        back_href: S::SCREEN.to_string(),
        submit_error: render.submit_error,
    };

    let body_html = match (admin_views::ResourceFormPanelTemplate { content }).render() {
        Ok(html) => html,
        Err(err) => {
            return template_render_http_error(
                "infra::http::admin::render_form",
                "Template rendering failed",
                err,
            )
            .into_response();
        }
    };

    let chrome = chrome_for(render.title, S::SCREEN, &RawForm::new());
    render_shell(chrome, body_html, render.status)
}

pub(super) async fn new_screen<S: Screen>(State(state): State<AdminState>) -> Response {
    render_form::<S>(
        &state,
        FormRender {
            title: format!("New {}", S::NAME),
            action: format!("{}/create", S::SCREEN),
            submit_label: "Create",
            form: &RawForm::new(),
            errors: None,
            submit_error: None,
            pickers: Vec::new(),
            status: StatusCode::OK,
        },
    )
    .await
}

pub(super) async fn create<S: Screen>(
    State(state): State<AdminState>,
    Form(form): Form<RawForm>,
) -> Response {
    let phase = FormPhase::Idle.begin();
    let (draft, phase) = match S::parse_draft(&form) {
        Ok(draft) => (Some(draft), phase.validated(FieldErrors::default())),
        Err(errors) => (None, phase.validated(errors)),
    };

    let phase = match (draft, phase) {
        (Some(draft), FormPhase::Submitting) => {
            match S::controller(&state).create(&draft).await {
                Ok(record) => {
                    return redirect_with_notice(
                        S::SCREEN,
                        &format!("Created {} \"{}\".", S::NAME, S::label(&record)),
                    );
                }
                Err(err) => FormPhase::Submitting.submitted(Err(err.user_message())),
            }
        }
        (_, phase) => phase,
    };

    let (errors, submit_error) = match &phase {
        FormPhase::Invalid(errors) => (Some(errors), None),
        FormPhase::Failed { message } => (None, Some(message.clone())),
        _ => (None, None),
    };

    render_form::<S>(
        &state,
        FormRender {
            title: format!("New {}", S::NAME),
            action: format!("{}/create", S::SCREEN),
            submit_label: "Create",
            form: &form,
            errors,
            submit_error,
            pickers: Vec::new(),
            status: StatusCode::UNPROCESSABLE_ENTITY,
        },
    )
    .await
}

pub(super) async fn edit_screen<S: Screen>(
    State(state): State<AdminState>,
    Path(id): Path<Uuid>,
) -> Response {
    let record = match S::controller(&state).find(id).await {
        Ok(Some(record)) => record,
        Ok(None) => return render_not_found(S::NAME, S::SCREEN, S::SCREEN),
        Err(err) => return AppError::from(err).into_response(),
    };

    let pickers = match S::pickers(&state, id).await {
        Ok(pickers) => pickers,
        Err(err) => return AppError::from(err).into_response(),
    };

    render_form::<S>(
        &state,
        FormRender {
            title: format!("Edit {}", S::NAME),
            action: format!("{}/{id}/edit", S::SCREEN),
            submit_label: "Save",
            form: &S::form_of(&record),
            errors: None,
            submit_error: None,
            pickers,
            status: StatusCode::OK,
        },
    )
    .await
}

pub(super) async fn update<S: Screen>(
    State(state): State<AdminState>,
    Path(id): Path<Uuid>,
    Form(form): Form<RawForm>,
) -> Response {
    let existing = match S::controller(&state).find(id).await {
        Ok(Some(record)) => record,
        Ok(None) => return render_not_found(S::NAME, S::SCREEN, S::SCREEN),
        Err(err) => return AppError::from(err).into_response(),
    };

    let phase = FormPhase::Idle.begin();
    let (patch, phase) = match S::parse_patch(&form, &existing) {
        Ok(patch) => (Some(patch), phase.validated(FieldErrors::default())),
        Err(errors) => (None, phase.validated(errors)),
    };

    let phase = match (patch, phase) {
        (Some(patch), FormPhase::Submitting) => {
            match S::controller(&state).update(id, &patch).await {
                Ok(record) => {
                    return redirect_with_notice(
                        S::SCREEN,
                        &format!("Saved {} \"{}\".", S::NAME, S::label(&record)),
                    );
                }
                Err(err) => FormPhase::Submitting.submitted(Err(err.user_message())),
            }
        }
        (_, phase) => phase,
    };

    let (errors, submit_error) = match &phase {
        FormPhase::Invalid(errors) => (Some(errors), None),
        FormPhase::Failed { message } => (None, Some(message.clone())),
        _ => (None, None),
    };

    let pickers = S::pickers(&state, id).await.unwrap_or_default();

    render_form::<S>(
        &state,
        FormRender {
            title: format!("Edit {}", S::NAME),
            action: format!("{}/{id}/edit", S::SCREEN),
            submit_label: "Save",
            form: &form,
            errors,
            submit_error,
            pickers,
            status: StatusCode::UNPROCESSABLE_ENTITY,
        },
    )
    .await
}

pub(super) async fn delete<S: Screen>(
    State(state): State<AdminState>,
    Path(id): Path<Uuid>,
    Form(form): Form<RawForm>,
) -> Response {
    let confirmation = Confirmation::from_flag(form.get("confirm").map(String::as_str));
    match S::controller(&state).delete(id, confirmation).await {
        Ok(DeleteOutcome::Deleted) => {
            redirect_with_notice(S::SCREEN, &format!("Deleted {}.", S::NAME))
        }
        Ok(DeleteOutcome::Declined) => {
            redirect_with_error(S::SCREEN, "Deletion was not confirmed.")
        }
        Err(err) if err.is_not_found() => {
            redirect_with_notice(S::SCREEN, &format!("That {} was already gone.", S::NAME))
        }
        Err(err) => redirect_with_error(S::SCREEN, &err.user_message()),
    }
}
