//! Users screen, including the followers picker.

use uuid::Uuid;

use penna_api_types::{UserDraft, UserPatch, UserRecord};

use crate::{
    application::{
        controller::ResourceController,
        pagination::ListQuery,
        resource::{AuthorFollowers, Users},
    },
    domain::validate::{FieldErrors, blank_to_none, require},
    infra::api::ApiError,
    presentation::admin::views::{FilterFieldView, FormFieldView, PickerView, format_timestamp},
};

use super::{
    AdminState,
    associations::build_picker,
    screens::{FormOptions, Screen, record_options},
    shared::{RawForm, form_value, parse_optional_uuid},
};

fn parse_email(errors: &mut FieldErrors, value: &str) -> String {
    let email = require(errors, "email", value).to_string();
    if !email.is_empty() && !email.contains('@') {
        errors.push("email", "email must contain an @");
    }
    email
}

impl Screen for Users {
    fn columns() -> &'static [&'static str] {
        &["Username", "Email", "Display name", "Updated"]
    }

    fn cells(record: &UserRecord) -> Vec<String> {
        vec![
            record.username.clone(),
            record.email.clone(),
            record.display_name.clone().unwrap_or_default(),
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

    fn fields(form: &RawForm, options: &FormOptions) -> Vec<FormFieldView> {
        vec![
            FormFieldView::text("username", "Username", form_value(form, "username")),
            FormFieldView::text("email", "Email", form_value(form, "email")),
            FormFieldView::text(
                "display_name",
                "Display name",
                form_value(form, "display_name"),
            ),
            FormFieldView::select(
                "role_id",
                "Role",
                options.select("role_id", form_value(form, "role_id")),
            ),
        ]
    }

    fn form_of(record: &UserRecord) -> RawForm {
        let mut form = RawForm::new();
        form.insert("username".to_string(), record.username.clone());
        form.insert("email".to_string(), record.email.clone());
        form.insert(
            "display_name".to_string(),
            record.display_name.clone().unwrap_or_default(),
        );
        form.insert(
            "role_id".to_string(),
            record.role_id.map(|id| id.to_string()).unwrap_or_default(),
        );
        form
    }

    fn parse_draft(form: &RawForm) -> Result<UserDraft, FieldErrors> {
        let mut errors = FieldErrors::new();
        let username = require(&mut errors, "username", form_value(form, "username")).to_string();
        let email = parse_email(&mut errors, form_value(form, "email"));
        let role_id = parse_optional_uuid(&mut errors, "role_id", form_value(form, "role_id"));

        if !errors.is_empty() {
            return Err(errors);
        }

        Ok(UserDraft {
            username,
            email,
            display_name: blank_to_none(Some(form_value(form, "display_name"))),
            role_id,
        })
    }

    fn parse_patch(form: &RawForm, _existing: &UserRecord) -> Result<UserPatch, FieldErrors> {
        let mut errors = FieldErrors::new();
        let username = require(&mut errors, "username", form_value(form, "username")).to_string();
        let email = parse_email(&mut errors, form_value(form, "email"));
        let role_id = parse_optional_uuid(&mut errors, "role_id", form_value(form, "role_id"));

        if !errors.is_empty() {
            return Err(errors);
        }

        Ok(UserPatch {
            username: Some(username),
            email: Some(email),
            display_name: Some(blank_to_none(Some(form_value(form, "display_name")))),
            role_id: Some(role_id),
        })
    }

    fn controller(state: &AdminState) -> &ResourceController<Users> {
        &state.users
    }

    async fn form_options(state: &AdminState) -> Result<FormOptions, ApiError> {
        let mut options = FormOptions::default();
        options.insert("role_id", record_options(&state.roles, true).await?);
        Ok(options)
    }

    async fn pickers(state: &AdminState, id: Uuid) -> Result<Vec<PickerView>, ApiError> {
        Ok(vec![build_picker::<AuthorFollowers>(state, id).await?])
    }
}
