//! Page requests and page results.

use serde::{Deserialize, Serialize};

use crate::error::{EngineError, Result};
use crate::strip::PageStrip;

/// Page size used when a view does not choose one.
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// The requested pagination window: a one-based page number and a page
/// size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PageRequest {
    /// One-based page number.
    pub page: usize,
    /// Rows per page.
    pub size: usize,
}

impl PageRequest {
    /// Creates a page request.
    ///
    /// Page and size must both be at least 1; this is checked in debug
    /// builds only. Use [`try_new`](Self::try_new) for caller-supplied input.
    pub fn new(page: usize, size: usize) -> Self {
        debug_assert!(page >= 1, "page numbers start at 1, got {page}");
        debug_assert!(size >= 1, "page size must be at least 1, got {size}");
        PageRequest { page, size }
    }

    /// Creates a page request, rejecting page or size below 1.
    ///
    /// ```
    /// use roster_engine::{EngineError, PageRequest};
    ///
    /// assert!(PageRequest::try_new(1, 10).is_ok());
    /// assert_eq!(PageRequest::try_new(0, 10), Err(EngineError::InvalidPage(0)));
    /// assert_eq!(PageRequest::try_new(1, 0), Err(EngineError::InvalidPageSize(0)));
    /// ```
    pub fn try_new(page: usize, size: usize) -> Result<Self> {
        if page < 1 {
            return Err(EngineError::InvalidPage(page));
        }
        if size < 1 {
            return Err(EngineError::InvalidPageSize(size));
        }
        Ok(PageRequest { page, size })
    }

    /// The first page with the given size.
    pub fn first(size: usize) -> Self {
        PageRequest::new(1, size)
    }

    /// The same size, another page.
    pub fn with_page(self, page: usize) -> Self {
        PageRequest::new(page, self.size)
    }

    /// Index of the first row of this page within the full match list.
    pub fn offset(&self) -> usize {
        self.page.saturating_sub(1).saturating_mul(self.size)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        PageRequest::first(DEFAULT_PAGE_SIZE)
    }
}

/// Number of pages needed for `total` rows at `size` rows per page.
pub fn total_pages(total: usize, size: usize) -> usize {
    if size == 0 {
        0
    } else {
        total.div_ceil(size)
    }
}

/// One page of a listing plus the totals needed to render its controls.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageResult<T> {
    /// Rows on the requested page, in sorted order.
    pub rows: Vec<T>,
    /// Number of records that survived search and filters.
    pub total_matches: usize,
    /// `ceil(total_matches / size)`; 0 when nothing matched.
    pub total_pages: usize,
    /// The requested page number.
    pub page: usize,
    /// The requested page size.
    pub size: usize,
}

impl<T> PageResult<T> {
    /// An empty result for the given request.
    pub fn empty(request: PageRequest) -> Self {
        PageResult {
            rows: Vec::new(),
            total_matches: 0,
            total_pages: 0,
            page: request.page,
            size: request.size,
        }
    }

    /// Number of rows on this page.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns `true` if this page holds no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Returns `true` if the requested page lies beyond the last page.
    pub fn is_out_of_range(&self) -> bool {
        self.page > self.total_pages
    }

    /// Returns `true` if a previous page exists.
    pub fn has_previous(&self) -> bool {
        self.page > 1 && self.total_pages > 0
    }

    /// Returns `true` if a next page exists.
    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }

    /// One-based inclusive positions of the first and last row on this page,
    /// or `None` for an empty page.
    pub fn range(&self) -> Option<(usize, usize)> {
        if self.rows.is_empty() {
            return None;
        }
        let first = self.page.saturating_sub(1).saturating_mul(self.size) + 1;
        Some((first, first + self.rows.len() - 1))
    }

    /// Results summary such as `"Showing 1–10 of 42"`.
    ///
    /// ```
    /// use roster_engine::{PageRequest, PageResult};
    ///
    /// let mut result = PageResult::empty(PageRequest::new(2, 10));
    /// assert_eq!(result.summary(), "Showing 0 of 0");
    ///
    /// result.rows = vec![(); 10];
    /// result.total_matches = 42;
    /// result.total_pages = 5;
    /// assert_eq!(result.summary(), "Showing 11–20 of 42");
    /// ```
    pub fn summary(&self) -> String {
        match self.range() {
            Some((first, last)) => {
                format!("Showing {}–{} of {}", first, last, self.total_matches)
            }
            None => format!("Showing 0 of {}", self.total_matches),
        }
    }

    /// Page strip for this result, showing `window` pages either side of the
    /// current one.
    pub fn strip(&self, window: usize) -> PageStrip {
        PageStrip::new(self.page, self.total_pages, window)
    }

    /// Converts the rows, keeping the totals.
    pub fn map<U, F: FnMut(T) -> U>(self, f: F) -> PageResult<U> {
        PageResult {
            rows: self.rows.into_iter().map(f).collect(),
            total_matches: self.total_matches,
            total_pages: self.total_pages,
            page: self.page,
            size: self.size,
        }
    }
}

impl<T: Clone> PageResult<&T> {
    /// Clones the borrowed rows into an owned result.
    pub fn cloned(self) -> PageResult<T> {
        self.map(Clone::clone)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(page: usize, size: usize, rows: usize, total: usize) -> PageResult<usize> {
        PageResult {
            rows: (0..rows).collect(),
            total_matches: total,
            total_pages: total_pages(total, size),
            page,
            size,
        }
    }

    #[test]
    fn total_pages_rounds_up() {
        assert_eq!(total_pages(0, 5), 0);
        assert_eq!(total_pages(1, 5), 1);
        assert_eq!(total_pages(5, 5), 1);
        assert_eq!(total_pages(6, 5), 2);
        assert_eq!(total_pages(42, 10), 5);
    }

    #[test]
    fn offset_is_zero_based() {
        assert_eq!(PageRequest::new(1, 10).offset(), 0);
        assert_eq!(PageRequest::new(3, 10).offset(), 20);
    }

    #[test]
    fn range_and_summary() {
        let first = result(1, 10, 10, 42);
        assert_eq!(first.range(), Some((1, 10)));
        assert_eq!(first.summary(), "Showing 1–10 of 42");

        let last = result(5, 10, 2, 42);
        assert_eq!(last.range(), Some((41, 42)));
        assert_eq!(last.summary(), "Showing 41–42 of 42");

        let beyond = result(9, 10, 0, 42);
        assert_eq!(beyond.range(), None);
        assert_eq!(beyond.summary(), "Showing 0 of 42");
        assert!(beyond.is_out_of_range());
    }

    #[test]
    fn previous_and_next() {
        let middle = result(2, 10, 10, 42);
        assert!(middle.has_previous());
        assert!(middle.has_next());

        let last = result(5, 10, 2, 42);
        assert!(last.has_previous());
        assert!(!last.has_next());

        let none = result(1, 10, 0, 0);
        assert!(!none.has_previous());
        assert!(!none.has_next());
    }

    #[test]
    fn map_keeps_totals() {
        let mapped = result(2, 3, 3, 7).map(|n| n * 10);
        assert_eq!(mapped.rows, vec![0, 10, 20]);
        assert_eq!(mapped.total_matches, 7);
        assert_eq!(mapped.total_pages, 3);
    }

    #[test]
    fn default_request() {
        assert_eq!(PageRequest::default(), PageRequest::new(1, DEFAULT_PAGE_SIZE));
        assert_eq!(PageRequest::new(4, 25).with_page(1), PageRequest::first(25));
    }
}
