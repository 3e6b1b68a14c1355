//! Tags screen.

use penna_api_types::{TagDraft, TagPatch, TagRecord};

use crate::{
    application::{
        controller::ResourceController, forms::resolve_slug, pagination::ListQuery, resource::Tags,
    },
    domain::validate::{FieldErrors, require},
    presentation::admin::views::{FilterFieldView, FormFieldView, format_timestamp},
};

use super::{
    AdminState,
    screens::{FormOptions, Screen},
    shared::{RawForm, form_value},
};

impl Screen for Tags {
    fn columns() -> &'static [&'static str] {
        &["Name", "Slug", "Updated"]
    }

    fn cells(record: &TagRecord) -> Vec<String> {
        vec![
            record.name.clone(),
            record.slug.clone(),
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
            FormFieldView::text("slug", "Slug", form_value(form, "slug"))
                .with_hint("Leave blank to derive from the name."),
        ]
    }

    fn form_of(record: &TagRecord) -> RawForm {
        let mut form = RawForm::new();
        form.insert("name".to_string(), record.name.clone());
        form.insert("slug".to_string(), record.slug.clone());
        form
    }

    fn parse_draft(form: &RawForm) -> Result<TagDraft, FieldErrors> {
        let (name, slug, errors) = parse_common(form, None);
        if !errors.is_empty() {
            return Err(errors);
        }
        Ok(TagDraft { name, slug })
    }

    fn parse_patch(form: &RawForm, existing: &TagRecord) -> Result<TagPatch, FieldErrors> {
        let (name, slug, errors) = parse_common(form, Some(&existing.slug));
        if !errors.is_empty() {
            return Err(errors);
        }
        Ok(TagPatch {
            name: Some(name),
            slug: Some(slug),
        })
    }

    fn controller(state: &AdminState) -> &ResourceController<Tags> {
        &state.tags
    }
}

fn parse_common(form: &RawForm, existing_slug: Option<&str>) -> (String, String, FieldErrors) {
    let mut errors = FieldErrors::new();
    let name = require(&mut errors, "name", form_value(form, "name")).to_string();

    let slug = if name.is_empty() {
        String::new()
    } else {
        match resolve_slug(&name, Some(form_value(form, "slug")), existing_slug) {
            Ok(slug) => slug,
            Err(err) => {
                errors.push("slug", err.to_string());
                String::new()
            }
        }
    };

    (name, slug, errors)
}
