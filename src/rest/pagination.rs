//! The pagination envelope of list endpoints.
//!
//! List endpoints answer with the records under a resource key and a
//! `pagination` object:
//!
//! ```json
//! {
//!   "products": [ ... ],
//!   "pagination": { "page": 1, "limit": 12, "total": 40, "total_pages": 4 }
//! }
//! ```
//!
//! [`Page::from_response`] reads both and checks that they agree before the
//! page reaches the caller. The admin phone-contact listing puts the counters
//! next to the records instead (`{"contacts", "total", "page", "limit",
//! "pages"}`); [`Page::from_flat_response`] reads that shape.

use std::ops::Deref;

use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::clients::{ApiError, HttpResponse, Outcome};

/// Message used for envelopes whose counters contradict each other.
pub const INCONSISTENT_ENVELOPE: &str = "inconsistent pagination envelope";

/// Wire shape of the `pagination` object.
#[derive(Debug, Clone, Copy, Deserialize)]
struct PaginationMeta {
    page: u32,
    limit: u32,
    total: u64,
    total_pages: u32,
}

/// Wire shape of counters placed beside the records.
#[derive(Debug, Clone, Copy, Deserialize)]
struct FlatMeta {
    page: u32,
    limit: u32,
    total: u64,
    pages: u32,
}

/// One page of records.
///
/// Derefs to the item slice.
///
/// # Invariants
///
/// - `1 <= page <= total_pages` whenever `total_items > 0`
/// - `items` is empty whenever `total_pages == 0`
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    /// Records on this page, in backend order.
    pub items: Vec<T>,
    /// 1-indexed page number.
    pub page: u32,
    /// Page size the backend applied.
    pub limit: u32,
    /// Number of records across all pages.
    pub total_items: u64,
    /// Number of pages.
    pub total_pages: u32,
}

impl<T: DeserializeOwned> Page<T> {
    /// Reads a page from the `items_key` array and the `pagination` object.
    ///
    /// The backend does not clamp `page` to the last page: asking for a page
    /// past the end (e.g., after the last record of that page was deleted)
    /// returns an empty list with the requested page number. Such an envelope
    /// breaks `page <= total_pages` and is rejected like any other
    /// inconsistent one; callers paging through a shrinking list should
    /// restart from page 1 on `Unknown`.
    ///
    /// # Errors
    ///
    /// Returns an [`ErrorKind::Unknown`](crate::clients::ErrorKind::Unknown)
    /// error if either part is missing or malformed, or if the counters are
    /// inconsistent.
    pub fn from_response(response: &HttpResponse, items_key: &str) -> Outcome<Self> {
        let items: Vec<T> = response.field(items_key)?;
        let meta: PaginationMeta = response.field("pagination")?;

        Self {
            items,
            page: meta.page,
            limit: meta.limit,
            total_items: meta.total,
            total_pages: meta.total_pages,
        }
        .validated()
    }

    /// Reads a page whose counters sit beside the `items_key` array.
    ///
    /// # Errors
    ///
    /// Same as [`from_response`](Self::from_response).
    pub fn from_flat_response(response: &HttpResponse, items_key: &str) -> Outcome<Self> {
        let items: Vec<T> = response.field(items_key)?;
        let meta: FlatMeta = response.json()?;

        Self {
            items,
            page: meta.page,
            limit: meta.limit,
            total_items: meta.total,
            total_pages: meta.pages,
        }
        .validated()
    }

    fn validated(self) -> Outcome<Self> {
        if !self.is_consistent() {
            tracing::debug!(
                page = self.page,
                total_pages = self.total_pages,
                total_items = self.total_items,
                "Rejecting pagination envelope"
            );
            return Err(ApiError::malformed(INCONSISTENT_ENVELOPE));
        }

        Ok(self)
    }
}

impl<T> Page<T> {
    /// Returns `true` if the counters satisfy the envelope invariants.
    #[must_use]
    pub fn is_consistent(&self) -> bool {
        if self.total_items > 0 && !(1..=self.total_pages).contains(&self.page) {
            return false;
        }
        !(self.total_pages == 0 && !self.items.is_empty())
    }

    /// Returns `true` if a later page exists.
    #[must_use]
    pub const fn has_next_page(&self) -> bool {
        self.page < self.total_pages
    }

    /// Returns `true` if an earlier page exists.
    #[must_use]
    pub const fn has_prev_page(&self) -> bool {
        self.page > 1
    }

    /// Consumes the page and returns its records.
    #[must_use]
    pub fn into_items(self) -> Vec<T> {
        self.items
    }
}

impl<T> Deref for Page<T> {
    type Target = [T];

    fn deref(&self) -> &Self::Target {
        &self.items
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clients::ErrorKind;
    use serde_json::json;

    fn response(body: serde_json::Value) -> HttpResponse {
        HttpResponse::new(200, body)
    }

    #[test]
    fn test_reads_items_and_counters() {
        let page: Page<u32> = Page::from_response(
            &response(json!({
                "products": [1, 2, 3],
                "pagination": {"page": 2, "limit": 3, "total": 9, "total_pages": 3}
            })),
            "products",
        )
        .unwrap();

        assert_eq!(page.len(), 3);
        assert_eq!(page.page, 2);
        assert_eq!(page.total_items, 9);
        assert!(page.has_next_page());
        assert!(page.has_prev_page());
        assert_eq!(page.into_items(), vec![1, 2, 3]);
    }

    #[test]
    fn test_empty_result_set() {
        let page: Page<u32> = Page::from_response(
            &response(json!({
                "users": [],
                "pagination": {"page": 1, "limit": 20, "total": 0, "total_pages": 0}
            })),
            "users",
        )
        .unwrap();

        assert!(page.is_empty());
        assert!(!page.has_next_page());
    }

    #[test]
    fn test_page_beyond_total_pages_is_rejected() {
        let error = Page::<u32>::from_response(
            &response(json!({
                "products": [],
                "pagination": {"page": 5, "limit": 12, "total": 10, "total_pages": 1}
            })),
            "products",
        )
        .unwrap_err();

        assert_eq!(error.kind, ErrorKind::Unknown);
        assert_eq!(error.message, INCONSISTENT_ENVELOPE);
    }

    #[test]
    fn test_page_zero_is_rejected() {
        let error = Page::<u32>::from_response(
            &response(json!({
                "products": [1],
                "pagination": {"page": 0, "limit": 12, "total": 1, "total_pages": 1}
            })),
            "products",
        )
        .unwrap_err();
        assert_eq!(error.message, INCONSISTENT_ENVELOPE);
    }

    #[test]
    fn test_items_without_pages_are_rejected() {
        let error = Page::<u32>::from_response(
            &response(json!({
                "contacts": [1],
                "pagination": {"page": 1, "limit": 20, "total": 0, "total_pages": 0}
            })),
            "contacts",
        )
        .unwrap_err();
        assert_eq!(error.message, INCONSISTENT_ENVELOPE);
    }

    #[test]
    fn test_missing_pagination_is_malformed() {
        let error = Page::<u32>::from_response(&response(json!({"products": []})), "products")
            .unwrap_err();
        assert_eq!(error.kind, ErrorKind::Unknown);
        assert_eq!(error.message, "malformed response body");
    }

    #[test]
    fn test_reads_flat_envelope() {
        let page: Page<u32> = Page::from_flat_response(
            &response(json!({
                "contacts": [4, 3],
                "total": 3,
                "page": 1,
                "limit": 2,
                "pages": 2
            })),
            "contacts",
        )
        .unwrap();

        assert_eq!(page.items, vec![4, 3]);
        assert_eq!(page.total_items, 3);
        assert_eq!(page.total_pages, 2);
        assert!(page.has_next_page());
    }

    #[test]
    fn test_flat_envelope_is_validated() {
        let error = Page::<u32>::from_flat_response(
            &response(json!({
                "contacts": [],
                "total": 3,
                "page": 7,
                "limit": 20,
                "pages": 1
            })),
            "contacts",
        )
        .unwrap_err();
        assert_eq!(error.message, INCONSISTENT_ENVELOPE);

        let error =
            Page::<u32>::from_flat_response(&response(json!({"contacts": []})), "contacts")
                .unwrap_err();
        assert_eq!(error.message, "malformed response body");
    }
}
