//! Utilities for deriving and validating URL slugs.
//!
//! Derivation lowercases the input, collapses runs of non-alphanumeric
//! characters to single hyphens, and strips leading/trailing hyphens
//! (`slug` crate). Validation accepts the same alphabet so a manually
//! entered slug and a derived one obey identical rules.

use slug::slugify;
use thiserror::Error;

/// Errors that can occur while deriving or validating a slug.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SlugError {
    #[error("slug source text is empty")]
    EmptyInput,
    #[error("failed to derive slug from `{input}`")]
    Unrepresentable { input: String },
    #[error("slug `{slug}` contains characters outside [a-z0-9-]")]
    InvalidCharset { slug: String },
}

/// Derive a slug from human-readable text.
pub fn derive_slug(input: &str) -> Result<String, SlugError> {
    if input.trim().is_empty() {
        return Err(SlugError::EmptyInput);
    }

    let candidate = slugify(input);

    if candidate.is_empty() {
        return Err(SlugError::Unrepresentable {
            input: input.to_string(),
        });
    }

    Ok(candidate)
}

/// Check that a manually supplied slug stays within `[a-z0-9-]`.
pub fn validate_slug(slug: &str) -> Result<(), SlugError> {
    if slug.is_empty() {
        return Err(SlugError::EmptyInput);
    }

    let valid = slug
        .chars()
        .all(|ch| ch.is_ascii_lowercase() || ch.is_ascii_digit() || ch == '-');

    if valid {
        Ok(())
    } else {
        Err(SlugError::InvalidCharset {
            slug: slug.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derive_slug_collapses_punctuation() {
        let slug = derive_slug("Hello World!").expect("slug");
        assert_eq!(slug, "hello-world");
    }

    #[test]
    fn derive_slug_trims_hyphens() {
        let slug = derive_slug("  ...Release Notes, 2026...  ").expect("slug");
        assert_eq!(slug, "release-notes-2026");
    }

    #[test]
    fn derive_slug_rejects_empty_input() {
        assert_eq!(derive_slug("   "), Err(SlugError::EmptyInput));
    }

    #[test]
    fn derive_slug_rejects_unrepresentable_input() {
        let err = derive_slug("!!!").expect_err("no representable characters");
        assert!(matches!(err, SlugError::Unrepresentable { .. }));
    }

    #[test]
    fn validate_slug_accepts_derived_output() {
        let slug = derive_slug("Pattern Library 2").expect("slug");
        assert!(validate_slug(&slug).is_ok());
    }

    #[test]
    fn validate_slug_rejects_uppercase_and_spaces() {
        assert!(matches!(
            validate_slug("Hello-World"),
            Err(SlugError::InvalidCharset { .. })
        ));
        assert!(matches!(
            validate_slug("hello world"),
            Err(SlugError::InvalidCharset { .. })
        ));
        assert!(matches!(
            validate_slug("héllo"),
            Err(SlugError::InvalidCharset { .. })
        ));
    }
}
