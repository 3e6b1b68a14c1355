//! Roles screen, including the permissions picker.

use uuid::Uuid;

use penna_api_types::{RoleDraft, RolePatch, RoleRecord};

use crate::{
    application::{
        controller::ResourceController,
        pagination::ListQuery,
        resource::{RolePermissions, Roles},
    },
    domain::validate::{FieldErrors, blank_to_none, require},
    infra::api::ApiError,
    presentation::admin::views::{FilterFieldView, FormFieldView, PickerView, format_timestamp},
};

use super::{
    AdminState,
    associations::build_picker,
    screens::{FormOptions, Screen},
    shared::{RawForm, form_value},
};

impl Screen for Roles {
    fn columns() -> &'static [&'static str] {
        &["Name", "Description", "Updated"]
    }

    fn cells(record: &RoleRecord) -> Vec<String> {
        vec![
            record.name.clone(),
            record.description.clone().unwrap_or_default(),
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
            FormFieldView::text("name", "Name", form_value(form, "name")),
            FormFieldView::text_area("description", "Description", form_value(form, "description")),
        ]
    }

    fn form_of(record: &RoleRecord) -> RawForm {
        let mut form = RawForm::new();
        form.insert("name".to_string(), record.name.clone());
        form.insert(
            "description".to_string(),
            record.description.clone().unwrap_or_default(),
        );
        form
    }

    fn parse_draft(form: &RawForm) -> Result<RoleDraft, FieldErrors> {
        let mut errors = FieldErrors::new();
        let name = require(&mut errors, "name", form_value(form, "name")).to_string();
        if !errors.is_empty() {
            return Err(errors);
        }
        Ok(RoleDraft {
            name,
            description: blank_to_none(Some(form_value(form, "description"))),
        })
    }

    fn parse_patch(form: &RawForm, _existing: &RoleRecord) -> Result<RolePatch, FieldErrors> {
        let mut errors = FieldErrors::new();
        let name = require(&mut errors, "name", form_value(form, "name")).to_string();
        if !errors.is_empty() {
            return Err(errors);
        }
        Ok(RolePatch {
            name: Some(name),
            description: Some(blank_to_none(Some(form_value(form, "description")))),
        })
    }

    fn controller(state: &AdminState) -> &ResourceController<Roles> {
        &state.roles
    }

    async fn pickers(state: &AdminState, id: Uuid) -> Result<Vec<PickerView>, ApiError> {
        Ok(vec![build_picker::<RolePermissions>(state, id).await?])
    }
}
