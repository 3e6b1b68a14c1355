use serde::{Deserialize, Serialize};

/// Pagination envelope returned by every collection endpoint.
///
/// The platform guarantees `items.len() <= limit` and `page >= 1`; consumers
/// are expected to reject envelopes that violate either bound.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: u64,
    pub page: u32,
    pub limit: u32,
}

impl<T> Page<T> {
    /// Number of pages needed to cover `total` at the envelope's limit.
    pub fn total_pages(&self) -> u32 {
        if self.limit == 0 {
            return 0;
        }
        let total = self.total.div_ceil(u64::from(self.limit));
        u32::try_from(total).unwrap_or(u32::MAX)
    }
}

/// Error body attached to non-2xx API responses when present.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiErrorBody {
    pub message: String,
}
