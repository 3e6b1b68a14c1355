//! View models and templates for the admin console.
//!
//! Panels render first, then land inside [`AdminShellTemplate`] as
//! pre-escaped HTML. The same panel templates also travel alone inside
//! datastar SSE patches.

use askama::Template;
use time::{OffsetDateTime, format_description::well_known::Rfc3339};

/// Shared page chrome: heading, active navigation entry, flash messages.
#[derive(Clone)]
pub struct AdminChrome {
    pub title: String,
    pub active: &'static str,
    pub notice: Option<String>,
    pub error: Option<String>,
}

#[derive(Clone)]
pub struct NavLinkView {
    pub label: &'static str,
    pub href: &'static str,
    pub active: bool,
}

pub fn nav_links(active: &str) -> Vec<NavLinkView> {
    const ENTRIES: [(&str, &str); 9] = [
        ("Dashboard", "/"),
        ("Posts", "/posts"),
        ("Categories", "/categories"),
        ("Tags", "/tags"),
        ("Comments", "/comments"),
        ("Media", "/media"),
        ("Users", "/users"),
        ("Roles", "/roles"),
        ("Permissions", "/permissions"),
    ];
    ENTRIES
        .iter()
        .map(|(label, href)| NavLinkView {
            label,
            href,
            active: *href == active,
        })
        .collect()
}

#[derive(Template)]
#[template(path = "admin/shell.html")]
pub struct AdminShellTemplate {
    pub chrome: AdminChrome,
    pub nav: Vec<NavLinkView>,
    pub body_html: String,
}

#[derive(Clone)]
pub struct SelectOptionView {
    pub value: String,
    pub label: String,
    pub selected: bool,
    pub disabled: bool,
}

#[derive(Clone)]
pub struct FilterFieldView {
    pub name: &'static str,
    pub label: &'static str,
    /// Empty options means a free-text input.
    pub options: Vec<SelectOptionView>,
    pub value: String,
}

#[derive(Clone)]
pub struct RowActionView {
    pub label: &'static str,
    pub action: String,
}

#[derive(Clone)]
pub struct ResourceRowView {
    pub id: String,
    pub cells: Vec<String>,
    pub edit_href: String,
    pub delete_action: String,
    pub actions: Vec<RowActionView>,
}

#[derive(Clone)]
pub struct PaginationView {
    pub page: u32,
    pub total_pages: u32,
    pub previous_href: Option<String>,
    pub next_href: Option<String>,
}

#[derive(Clone)]
pub struct ResourceListView {
    pub title: &'static str,
    pub panel_name: &'static str,
    pub base_path: &'static str,
    pub new_href: Option<String>,
    pub columns: &'static [&'static str],
    pub rows: Vec<ResourceRowView>,
    pub filters: Vec<FilterFieldView>,
    pub pagination: PaginationView,
    pub total: u64,
    pub poll_seconds: u64,
    /// Set when the remote fetch failed and no rows could be shown.
    pub fetch_error: Option<String>,
}

#[derive(Template)]
#[template(path = "admin/resource_list_panel.html")]
pub struct ResourceListPanelTemplate {
    pub content: ResourceListView,
}

#[derive(Clone, PartialEq, Eq)]
pub enum FormFieldKind {
    Text,
    TextArea,
    Select,
    File,
}

#[derive(Clone)]
pub struct FormFieldView {
    pub name: &'static str,
    pub label: &'static str,
    pub kind: FormFieldKind,
    pub value: String,
    pub options: Vec<SelectOptionView>,
    pub error: Option<String>,
    pub hint: Option<&'static str>,
}

impl FormFieldView {
    pub fn text(name: &'static str, label: &'static str, value: impl Into<String>) -> Self {
        Self {
            name,
            label,
            kind: FormFieldKind::Text,
            value: value.into(),
            options: Vec::new(),
            error: None,
            hint: None,
        }
    }

    pub fn text_area(name: &'static str, label: &'static str, value: impl Into<String>) -> Self {
        Self {
            kind: FormFieldKind::TextArea,
            ..Self::text(name, label, value)
        }
    }

    pub fn select(
        name: &'static str,
        label: &'static str,
        options: Vec<SelectOptionView>,
    ) -> Self {
        Self {
            kind: FormFieldKind::Select,
            options,
            ..Self::text(name, label, "")
        }
    }

    pub fn file(name: &'static str, label: &'static str) -> Self {
        Self {
            kind: FormFieldKind::File,
            ..Self::text(name, label, "")
        }
    }

    pub fn with_hint(mut self, hint: &'static str) -> Self {
        self.hint = Some(hint);
        self
    }
}

/// One attach/detach block inside an editor.
#[derive(Clone)]
pub struct PickerView {
    pub heading: &'static str,
    pub attach_action: String,
    pub options: Vec<SelectOptionView>,
    pub attached: Vec<AttachedItemView>,
}

#[derive(Clone)]
pub struct AttachedItemView {
    pub label: String,
    pub detach_action: String,
}

#[derive(Clone)]
pub struct ResourceFormView {
    pub title: String,
    pub action: String,
    pub submit_label: &'static str,
    pub multipart: bool,
    pub fields: Vec<FormFieldView>,
    pub pickers: Vec<PickerView>,
    pub back_href: String,
    /// Remote rejection shown above the form; the draft below stays intact.
    pub submit_error: Option<String>,
}

#[derive(Template)]
#[template(path = "admin/resource_form_panel.html")]
pub struct ResourceFormPanelTemplate {
    pub content: ResourceFormView,
}

#[derive(Clone)]
pub struct DashboardCardView {
    pub title: &'static str,
    pub href: &'static str,
    pub count: Option<u64>,
}

#[derive(Template)]
#[template(path = "admin/dashboard.html")]
pub struct DashboardTemplate {
    pub cards: Vec<DashboardCardView>,
}

#[derive(Template)]
#[template(path = "admin/not_found.html")]
pub struct NotFoundTemplate {
    pub resource: &'static str,
    pub back_href: &'static str,
}

/// Compact timestamp for table cells.
pub fn format_timestamp(value: &OffsetDateTime) -> String {
    value
        .format(&Rfc3339)
        .map(|text| text.chars().take(16).collect::<String>().replace('T', " "))
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use time::macros::datetime;

    use super::*;

    #[test]
    fn timestamps_render_compact() {
        let ts = datetime!(2026-01-05 10:30:00 UTC);
        assert_eq!(format_timestamp(&ts), "2026-01-05 10:30");
    }

    #[test]
    fn nav_marks_the_active_entry() {
        let nav = nav_links("/tags");
        let active: Vec<_> = nav.iter().filter(|link| link.active).collect();
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].href, "/tags");
    }
}
