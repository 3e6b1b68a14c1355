//! Synchronous field validation for admin forms.
//!
//! Checks are deliberately limited to required-field and pattern checks;
//! anything richer is the platform's job and comes back as a server
//! rejection.

/// A single field-level validation failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

/// Accumulated validation failures keyed by field name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors {
    errors: Vec<FieldError>,
}

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, field: &'static str, message: impl Into<String>) {
        self.errors.push(FieldError {
            field,
            message: message.into(),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// First message recorded for the named field, if any.
    pub fn message_for(&self, field: &str) -> Option<&str> {
        self.errors
            .iter()
            .find(|err| err.field == field)
            .map(|err| err.message.as_str())
    }
}

/// Record a required-field failure when `value` is blank. Returns the
/// trimmed value for convenience.
pub fn require<'a>(errors: &mut FieldErrors, field: &'static str, value: &'a str) -> &'a str {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        errors.push(field, format!("{field} is required"));
    }
    trimmed
}

/// Normalize an optional free-text field: blank becomes `None`.
pub fn blank_to_none(value: Option<&str>) -> Option<String> {
    value.and_then(|v| {
        let trimmed = v.trim();
        (!trimmed.is_empty()).then(|| trimmed.to_string())
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn require_flags_blank_values() {
        let mut errors = FieldErrors::new();
        let value = require(&mut errors, "name", "   ");
        assert_eq!(value, "");
        assert_eq!(errors.message_for("name"), Some("name is required"));
    }

    #[test]
    fn require_passes_through_trimmed_value() {
        let mut errors = FieldErrors::new();
        let value = require(&mut errors, "name", "  Rust  ");
        assert_eq!(value, "Rust");
        assert!(errors.is_empty());
    }

    #[test]
    fn message_for_keeps_the_first_message_per_field() {
        let mut errors = FieldErrors::new();
        errors.push("slug", "first");
        errors.push("slug", "second");
        assert_eq!(errors.message_for("slug"), Some("first"));
    }

    #[test]
    fn blank_to_none_normalizes() {
        assert_eq!(blank_to_none(Some("  ")), None);
        assert_eq!(blank_to_none(Some(" x ")), Some("x".to_string()));
        assert_eq!(blank_to_none(None), None);
    }
}
