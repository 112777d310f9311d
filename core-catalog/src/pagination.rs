//! Pagination helper types for the filtered record list

use serde::{Deserialize, Serialize};
use std::ops::Range;

/// Default number of tiles per page
pub const DEFAULT_PAGE_SIZE: usize = 50;

/// Pagination request parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    /// Current page number (1-indexed)
    pub page: usize,
    /// Number of items per page
    pub page_size: usize,
}

impl PageRequest {
    /// Create a new page request
    ///
    /// # Examples
    ///
    /// ```
    /// use core_catalog::pagination::PageRequest;
    ///
    /// let request = PageRequest::new(1, 20);
    /// assert_eq!(request.page, 1);
    /// assert_eq!(request.page_size, 20);
    /// ```
    pub fn new(page: usize, page_size: usize) -> Self {
        Self { page, page_size }
    }

    /// Index of the first item on the requested page
    pub fn offset(&self) -> usize {
        self.page.saturating_sub(1) * self.page_size
    }

    /// Maximum number of items on the page (same as page_size)
    pub fn limit(&self) -> usize {
        self.page_size
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

/// Page bookkeeping over a filtered list of `total` items.
///
/// Invariants: `total_pages >= 1` and `page` is in `[1, total_pages]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    /// Current page number (1-indexed)
    pub page: usize,
    /// Total number of pages, never less than 1
    pub total_pages: usize,
    /// Number of items per page
    pub page_size: usize,
    /// Total number of items across all pages
    pub total: usize,
}

impl Pagination {
    /// Compute page bounds for `total` items
    ///
    /// A requested page outside `[1, total_pages]` resets to page 1, since the
    /// usual cause is a narrower query rather than navigation. A page size of
    /// 0 falls back to [`DEFAULT_PAGE_SIZE`].
    ///
    /// # Examples
    ///
    /// ```
    /// use core_catalog::pagination::{PageRequest, Pagination};
    ///
    /// let pagination = Pagination::new(120, PageRequest::new(3, 50));
    /// assert_eq!(pagination.total_pages, 3);
    /// assert_eq!(pagination.page, 3);
    ///
    /// let narrowed = Pagination::new(10, PageRequest::new(3, 50));
    /// assert_eq!(narrowed.page, 1);
    /// ```
    pub fn new(total: usize, request: PageRequest) -> Self {
        let page_size = if request.page_size == 0 {
            DEFAULT_PAGE_SIZE
        } else {
            request.page_size
        };
        let total_pages = total_pages(total, page_size);
        let page = if (1..=total_pages).contains(&request.page) {
            request.page
        } else {
            1
        };

        Self {
            page,
            total_pages,
            page_size,
            total,
        }
    }

    /// Request describing the current page
    pub fn request(&self) -> PageRequest {
        PageRequest::new(self.page, self.page_size)
    }

    /// Check if there are more pages after the current one
    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }

    /// Check if there are pages before the current one
    pub fn has_previous(&self) -> bool {
        self.page > 1
    }

    /// Move to the next page; returns `false` on the last page
    pub fn next(&mut self) -> bool {
        if !self.has_next() {
            return false;
        }
        self.page += 1;
        true
    }

    /// Move to the previous page; returns `false` on the first page
    pub fn previous(&mut self) -> bool {
        if !self.has_previous() {
            return false;
        }
        self.page -= 1;
        true
    }

    /// Index range of the current page within the filtered list
    pub fn range(&self) -> Range<usize> {
        let start = self.request().offset().min(self.total);
        let end = (start + self.page_size).min(self.total);
        start..end
    }

    /// Slice `items` down to the current page
    pub fn slice<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        let range = self.range();
        &items[range.start.min(items.len())..range.end.min(items.len())]
    }

    /// Human-facing status line, with 1-indexed inclusive bounds
    ///
    /// ```
    /// use core_catalog::pagination::{PageRequest, Pagination};
    ///
    /// let pagination = Pagination::new(120, PageRequest::new(3, 50));
    /// assert_eq!(pagination.status_line(), "Page 3 of 3 (101-120 of 120 items)");
    /// ```
    pub fn status_line(&self) -> String {
        let range = self.range();
        format!(
            "Page {} of {} ({}-{} of {} items)",
            self.page,
            self.total_pages,
            range.start + 1,
            range.end,
            self.total
        )
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self::new(0, PageRequest::default())
    }
}

/// `max(1, ceil(total / page_size))`
pub fn total_pages(total: usize, page_size: usize) -> usize {
    if page_size == 0 {
        return 1;
    }
    total.div_ceil(page_size).max(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_request_default() {
        let request = PageRequest::default();
        assert_eq!(request.page, 1);
        assert_eq!(request.page_size, 50);
    }

    #[test]
    fn test_page_request_offset() {
        let request = PageRequest::new(1, 20);
        assert_eq!(request.offset(), 0);

        let request = PageRequest::new(3, 20);
        assert_eq!(request.offset(), 40);
    }

    #[test]
    fn test_page_request_limit() {
        let request = PageRequest::new(1, 20);
        assert_eq!(request.limit(), 20);
    }

    #[test]
    fn test_total_pages() {
        assert_eq!(total_pages(0, 50), 1);
        assert_eq!(total_pages(1, 50), 1);
        assert_eq!(total_pages(50, 50), 1);
        assert_eq!(total_pages(51, 50), 2);
        assert_eq!(total_pages(120, 50), 3);
        assert_eq!(total_pages(10, 0), 1);
    }

    #[test]
    fn test_pagination_new() {
        let pagination = Pagination::new(25, PageRequest::new(2, 10));

        assert_eq!(pagination.total, 25);
        assert_eq!(pagination.page, 2);
        assert_eq!(pagination.total_pages, 3);
        assert_eq!(pagination.page_size, 10);
    }

    #[test]
    fn test_pagination_out_of_range_resets_to_first() {
        assert_eq!(Pagination::new(25, PageRequest::new(4, 10)).page, 1);
        assert_eq!(Pagination::new(25, PageRequest::new(0, 10)).page, 1);
    }

    #[test]
    fn test_pagination_empty() {
        let pagination = Pagination::new(0, PageRequest::default());
        assert_eq!(pagination.total_pages, 1);
        assert_eq!(pagination.page, 1);
        assert_eq!(pagination.range(), 0..0);
        assert!(!pagination.has_next());
        assert!(!pagination.has_previous());
    }

    #[test]
    fn test_pagination_zero_page_size() {
        let pagination = Pagination::new(120, PageRequest::new(1, 0));
        assert_eq!(pagination.page_size, DEFAULT_PAGE_SIZE);
        assert_eq!(pagination.total_pages, 3);
    }

    #[test]
    fn test_pagination_has_next() {
        let pagination = Pagination::new(25, PageRequest::new(1, 10));
        assert!(pagination.has_next());

        let pagination = Pagination::new(25, PageRequest::new(3, 10));
        assert!(!pagination.has_next());
    }

    #[test]
    fn test_pagination_has_previous() {
        let pagination = Pagination::new(25, PageRequest::new(1, 10));
        assert!(!pagination.has_previous());

        let pagination = Pagination::new(25, PageRequest::new(2, 10));
        assert!(pagination.has_previous());
    }

    #[test]
    fn test_pagination_navigation_stays_in_bounds() {
        let mut pagination = Pagination::new(25, PageRequest::new(1, 10));
        assert!(!pagination.previous());
        assert!(pagination.next());
        assert!(pagination.next());
        assert!(!pagination.next());
        assert_eq!(pagination.page, 3);
        assert!(pagination.previous());
        assert_eq!(pagination.page, 2);
    }

    #[test]
    fn test_pagination_range_and_slice() {
        let items: Vec<u32> = (0..25).collect();
        let pagination = Pagination::new(items.len(), PageRequest::new(3, 10));
        assert_eq!(pagination.range(), 20..25);
        assert_eq!(pagination.slice(&items), &[20, 21, 22, 23, 24]);
    }

    #[test]
    fn test_status_line() {
        let pagination = Pagination::new(120, PageRequest::new(1, 50));
        assert_eq!(pagination.status_line(), "Page 1 of 3 (1-50 of 120 items)");
    }
}
