//! Categories screen.

use uuid::Uuid;

use penna_api_types::{CategoryDraft, CategoryPatch, CategoryRecord};

use crate::{
    application::{
        controller::ResourceController,
        forms::resolve_slug,
        pagination::ListQuery,
        resource::{Categories, CategoryFollowers},
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

impl Screen for Categories {
    fn columns() -> &'static [&'static str] {
        &["Name", "Slug", "Description", "Updated"]
    }

    fn cells(record: &CategoryRecord) -> Vec<String> {
        vec![
            record.name.clone(),
            record.slug.clone(),
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
            FormFieldView::text("slug", "Slug", form_value(form, "slug"))
                .with_hint("Leave blank to derive from the name."),
            FormFieldView::text_area("description", "Description", form_value(form, "description")),
        ]
    }

    fn form_of(record: &CategoryRecord) -> RawForm {
        let mut form = RawForm::new();
        form.insert("name".to_string(), record.name.clone());
        form.insert("slug".to_string(), record.slug.clone());
        form.insert(
            "description".to_string(),
            record.description.clone().unwrap_or_default(),
        );
        form
    }

    fn parse_draft(form: &RawForm) -> Result<CategoryDraft, FieldErrors> {
        let (name, slug, description, errors) = parse_common(form, None);
        if !errors.is_empty() {
            return Err(errors);
        }
        Ok(CategoryDraft {
            name,
            slug,
            description,
        })
    }

    fn parse_patch(form: &RawForm, existing: &CategoryRecord) -> Result<CategoryPatch, FieldErrors> {
        let (name, slug, description, errors) = parse_common(form, Some(&existing.slug));
        if !errors.is_empty() {
            return Err(errors);
        }
        Ok(CategoryPatch {
            name: Some(name),
            slug: Some(slug),
            description: Some(description),
        })
    }

    fn controller(state: &AdminState) -> &ResourceController<Categories> {
        &state.categories
    }

    async fn pickers(state: &AdminState, id: Uuid) -> Result<Vec<PickerView>, ApiError> {
        Ok(vec![build_picker::<CategoryFollowers>(state, id).await?])
    }
}

fn parse_common(
    form: &RawForm,
    existing_slug: Option<&str>,
) -> (String, String, Option<String>, FieldErrors) {
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

    let description = blank_to_none(Some(form_value(form, "description")));
    (name, slug, description, errors)
}
