//! Permissions screen.

use penna_api_types::{PermissionDraft, PermissionPatch, PermissionRecord};

use crate::{
    application::{
        controller::ResourceController, pagination::ListQuery, resource::Permissions,
    },
    domain::validate::{FieldErrors, blank_to_none, require},
    presentation::admin::views::{FilterFieldView, FormFieldView, format_timestamp},
};

use super::{
    AdminState,
    screens::{FormOptions, Screen},
    shared::{RawForm, form_value},
};

impl Screen for Permissions {
    fn columns() -> &'static [&'static str] {
        &["Name", "Description", "Updated"]
    }

    fn cells(record: &PermissionRecord) -> Vec<String> {
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

    fn form_of(record: &PermissionRecord) -> RawForm {
        let mut form = RawForm::new();
        form.insert("name".to_string(), record.name.clone());
        form.insert(
            "description".to_string(),
            record.description.clone().unwrap_or_default(),
        );
        form
    }

    fn parse_draft(form: &RawForm) -> Result<PermissionDraft, FieldErrors> {
        let mut errors = FieldErrors::new();
        let name = require(&mut errors, "name", form_value(form, "name")).to_string();
        if !errors.is_empty() {
            return Err(errors);
        }
        Ok(PermissionDraft {
            name,
            description: blank_to_none(Some(form_value(form, "description"))),
        })
    }

    fn parse_patch(
        form: &RawForm,
        _existing: &PermissionRecord,
    ) -> Result<PermissionPatch, FieldErrors> {
        let mut errors = FieldErrors::new();
        let name = require(&mut errors, "name", form_value(form, "name")).to_string();
        if !errors.is_empty() {
            return Err(errors);
        }
        Ok(PermissionPatch {
            name: Some(name),
            description: Some(blank_to_none(Some(form_value(form, "description")))),
        })
    }

    fn controller(state: &AdminState) -> &ResourceController<Permissions> {
        &state.permissions
    }
}
