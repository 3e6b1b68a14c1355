//! Page/limit pagination: query parameters and envelope validation.

use thiserror::Error;

use penna_api_types::Page;

/// Parameters a list screen binds to its remote fetch. Two queries are
/// considered the same binding when they compare equal field for field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListQuery {
    pub page: u32,
    pub limit: u32,
    pub filters: Vec<(String, String)>,
}

impl ListQuery {
    pub fn new(page: u32, limit: u32) -> Self {
        Self {
            page: page.max(1),
            limit,
            filters: Vec::new(),
        }
    }

    pub fn with_filter(mut self, field: impl Into<String>, value: impl Into<String>) -> Self {
        self.filters.push((field.into(), value.into()));
        self
    }

    /// Value bound for the named filter, if any.
    pub fn filter(&self, field: &str) -> Option<&str> {
        self.filters
            .iter()
            .find(|(key, _)| key == field)
            .map(|(_, value)| value.as_str())
    }

    /// Request query pairs in wire order: page, limit, then filters.
    pub fn query_pairs(&self) -> Vec<(&str, String)> {
        let mut pairs = vec![
            ("page", self.page.to_string()),
            ("limit", self.limit.to_string()),
        ];
        for (key, value) in &self.filters {
            pairs.push((key.as_str(), value.clone()));
        }
        pairs
    }
}

/// Violations of the pagination envelope contract.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EnvelopeError {
    #[error("envelope page {page} is below 1")]
    PageBelowOne { page: u32 },
    #[error("envelope carries {count} items but declares a limit of {limit}")]
    OverfullPage { count: usize, limit: u32 },
}

/// Enforce the envelope invariants (`page >= 1`, `items.len() <= limit`)
/// on a freshly decoded page.
pub fn validate_envelope<T>(page: Page<T>) -> Result<Page<T>, EnvelopeError> {
    if page.page < 1 {
        return Err(EnvelopeError::PageBelowOne { page: page.page });
    }
    if page.items.len() > page.limit as usize {
        return Err(EnvelopeError::OverfullPage {
            count: page.items.len(),
            limit: page.limit,
        });
    }
    Ok(page)
}

/// Previous/next page numbers derived from an envelope.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageLinks {
    pub previous: Option<u32>,
    pub next: Option<u32>,
    pub total_pages: u32,
}

pub fn page_links<T>(page: &Page<T>) -> PageLinks {
    let total_pages = page.total_pages().max(1);
    let previous = (page.page > 1).then(|| page.page - 1);
    let next = (page.page < total_pages).then(|| page.page + 1);
    PageLinks {
        previous,
        next,
        total_pages,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page_of(items: usize, total: u64, page: u32, limit: u32) -> Page<u32> {
        Page {
            items: vec![0; items],
            total,
            page,
            limit,
        }
    }

    #[test]
    fn list_query_equality_is_shallow_over_all_fields() {
        let a = ListQuery::new(1, 20).with_filter("status", "draft");
        let b = ListQuery::new(1, 20).with_filter("status", "draft");
        let c = ListQuery::new(1, 20).with_filter("status", "published");

        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn list_query_floors_page_at_one() {
        assert_eq!(ListQuery::new(0, 20).page, 1);
    }

    #[test]
    fn query_pairs_carry_page_limit_and_filters() {
        let query = ListQuery::new(3, 25).with_filter("search", "rust");
        let pairs = query.query_pairs();
        assert_eq!(pairs[0], ("page", "3".to_string()));
        assert_eq!(pairs[1], ("limit", "25".to_string()));
        assert_eq!(pairs[2], ("search", "rust".to_string()));
    }

    #[test]
    fn envelope_with_page_zero_is_rejected() {
        let err = validate_envelope(page_of(0, 0, 0, 20)).expect_err("page zero");
        assert_eq!(err, EnvelopeError::PageBelowOne { page: 0 });
    }

    #[test]
    fn envelope_with_more_items_than_limit_is_rejected() {
        let err = validate_envelope(page_of(21, 21, 1, 20)).expect_err("overfull");
        assert_eq!(
            err,
            EnvelopeError::OverfullPage {
                count: 21,
                limit: 20
            }
        );
    }

    #[test]
    fn envelope_at_limit_is_accepted() {
        assert!(validate_envelope(page_of(20, 45, 1, 20)).is_ok());
    }

    #[test]
    fn page_links_cover_interior_pages() {
        let links = page_links(&page_of(20, 45, 2, 20));
        assert_eq!(links.previous, Some(1));
        assert_eq!(links.next, Some(3));
        assert_eq!(links.total_pages, 3);
    }

    #[test]
    fn page_links_terminate_at_boundaries() {
        let first = page_links(&page_of(20, 45, 1, 20));
        assert_eq!(first.previous, None);
        assert_eq!(first.next, Some(2));

        let last = page_links(&page_of(5, 45, 3, 20));
        assert_eq!(last.previous, Some(2));
        assert_eq!(last.next, None);
    }

    #[test]
    fn empty_collection_still_reports_one_page() {
        let links = page_links(&page_of(0, 0, 1, 20));
        assert_eq!(links.total_pages, 1);
        assert_eq!(links.previous, None);
        assert_eq!(links.next, None);
    }
}
