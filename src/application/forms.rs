//! Form submission lifecycle and slug resolution shared by every editor.

use crate::domain::slug::{SlugError, derive_slug, validate_slug};
use crate::domain::validate::FieldErrors;

/// Lifecycle of one form submission.
///
/// Idle -> Validating -> Invalid (field errors, draft preserved)
///                    -> Submitting -> Succeeded
///                                  -> Failed (remote rejection, draft preserved)
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormPhase {
    Idle,
    Validating,
    Invalid(FieldErrors),
    Submitting,
    Succeeded,
    Failed { message: String },
}

impl FormPhase {
    pub fn begin(self) -> FormPhase {
        FormPhase::Validating
    }

    /// Leave validation with the collected field errors, or proceed to
    /// submission when none were recorded.
    pub fn validated(self, errors: FieldErrors) -> FormPhase {
        debug_assert!(matches!(self, FormPhase::Validating));
        if errors.is_empty() {
            FormPhase::Submitting
        } else {
            FormPhase::Invalid(errors)
        }
    }

    pub fn submitted(self, outcome: Result<(), String>) -> FormPhase {
        debug_assert!(matches!(self, FormPhase::Submitting));
        match outcome {
            Ok(()) => FormPhase::Succeeded,
            Err(message) => FormPhase::Failed { message },
        }
    }

    /// Whether the screen should re-render the form with the posted draft.
    pub fn keeps_draft(&self) -> bool {
        matches!(self, FormPhase::Invalid(_) | FormPhase::Failed { .. })
    }
}

/// Resolve the slug for a named record.
///
/// A manually entered slug always wins and must already be in canonical
/// form. On edit, a blank slug keeps the stored one. Otherwise the slug is
/// derived from the name.
pub fn resolve_slug(
    name: &str,
    submitted: Option<&str>,
    existing: Option<&str>,
) -> Result<String, SlugError> {
    if let Some(manual) = submitted.map(str::trim).filter(|value| !value.is_empty()) {
        validate_slug(manual)?;
        return Ok(manual.to_string());
    }
    if let Some(existing) = existing.filter(|value| !value.is_empty()) {
        return Ok(existing.to_string());
    }
    derive_slug(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clean_submission_walks_the_happy_path() {
        let phase = FormPhase::Idle.begin();
        assert_eq!(phase, FormPhase::Validating);

        let phase = phase.validated(FieldErrors::default());
        assert_eq!(phase, FormPhase::Submitting);

        let phase = phase.submitted(Ok(()));
        assert_eq!(phase, FormPhase::Succeeded);
        assert!(!phase.keeps_draft());
    }

    #[test]
    fn field_errors_stop_before_submission() {
        let mut errors = FieldErrors::default();
        errors.push("name", "Name is required");

        let phase = FormPhase::Idle.begin().validated(errors);
        assert!(matches!(phase, FormPhase::Invalid(_)));
        assert!(phase.keeps_draft());
    }

    #[test]
    fn remote_rejection_preserves_the_draft() {
        let phase = FormPhase::Idle
            .begin()
            .validated(FieldErrors::default())
            .submitted(Err("slug already in use".to_string()));

        assert_eq!(
            phase,
            FormPhase::Failed {
                message: "slug already in use".to_string()
            }
        );
        assert!(phase.keeps_draft());
    }

    #[test]
    fn manual_slug_wins_over_derivation() {
        let slug = resolve_slug("Hello World!", Some("custom-slug"), None).expect("slug");
        assert_eq!(slug, "custom-slug");
    }

    #[test]
    fn manual_slug_must_be_canonical() {
        assert!(resolve_slug("Hello", Some("Not A Slug"), None).is_err());
    }

    #[test]
    fn blank_slug_on_edit_keeps_the_stored_one() {
        let slug = resolve_slug("Renamed Post", Some("  "), Some("original-slug")).expect("slug");
        assert_eq!(slug, "original-slug");
    }

    #[test]
    fn blank_slug_on_create_derives_from_name() {
        let slug = resolve_slug("Hello World!", None, None).expect("slug");
        assert_eq!(slug, "hello-world");
    }
}
