//! Shared CSS selectors used by admin Datastar responses.

pub fn panel_selector(name: &str) -> String {
    format!("[data-admin-panel=\"{name}\"]")
}
