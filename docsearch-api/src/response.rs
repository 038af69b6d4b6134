use std::num::NonZeroU64;

#[cfg(feature = "json")]
use serde::{Deserialize, Serialize};

/// Pagination block attached to every normalized response.
///
/// Field order is the serialized key order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "json", derive(Serialize, Deserialize))]
pub struct PaginationMetadata {
    pub page: u64,
    pub per_page: u64,
    pub total_results: u64,
    pub total_pages: u64,
    pub has_next_page: bool,
    pub has_previous_page: bool,
}

impl PaginationMetadata {
    /// Derive the full block from the requested page, the page size and the
    /// authoritative result count.
    pub fn compute(page: NonZeroU64, per_page: NonZeroU64, total_results: u64) -> Self {
        let page = page.get();
        let total_pages = total_results.div_ceil(per_page.get());
        Self {
            page,
            per_page: per_page.get(),
            total_results,
            total_pages,
            has_next_page: page < total_pages,
            has_previous_page: page > 1,
        }
    }
}

/// Outcome of one search call as handed back to the caller:
/// `{ "success": true, "formattedText": "..." }` or
/// `{ "success": false, "error": "..." }`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "json", derive(Serialize, Deserialize))]
pub struct SearchOutcome {
    pub success: bool,
    #[cfg_attr(
        feature = "json",
        serde(
            rename = "formattedText",
            default,
            skip_serializing_if = "Option::is_none"
        )
    )]
    pub formatted_text: Option<String>,
    #[cfg_attr(
        feature = "json",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub error: Option<String>,
}

impl SearchOutcome {
    pub fn ok(formatted_text: impl Into<String>) -> Self {
        Self { success: true, formatted_text: Some(formatted_text.into()), error: None }
    }

    pub fn failure(error: impl Into<String>) -> Self {
        Self { success: false, formatted_text: None, error: Some(error.into()) }
    }

    pub fn is_success(&self) -> bool {
        self.success
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn nz(n: u64) -> NonZeroU64 {
        NonZeroU64::new(n).unwrap()
    }

    #[test]
    fn compute_rounds_total_pages_up() {
        let m = PaginationMetadata::compute(nz(1), nz(10), 25);
        assert_eq!(m.total_pages, 3);
        assert!(m.has_next_page);
        assert!(!m.has_previous_page);
    }

    #[test]
    fn compute_last_page_has_no_next() {
        let m = PaginationMetadata::compute(nz(3), nz(10), 25);
        assert!(!m.has_next_page);
        assert!(m.has_previous_page);
    }

    #[test]
    fn compute_empty_result_set_has_zero_pages() {
        let m = PaginationMetadata::compute(nz(1), nz(10), 0);
        assert_eq!(m.total_pages, 0);
        assert!(!m.has_next_page);
        assert!(!m.has_previous_page);
    }

    #[test]
    fn compute_exact_multiple() {
        let m = PaginationMetadata::compute(nz(2), nz(5), 10);
        assert_eq!(m.total_pages, 2);
        assert!(!m.has_next_page);
    }
}
