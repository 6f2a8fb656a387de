//! Page-based pagination over query results.
//!
//! The store's `list`/`query` operations expose raw offset/limit slicing;
//! this module layers 1-indexed pages with navigation metadata on top for
//! callers that page through results.

use serde::Serialize;
use std::cmp::min;

/// A single page of results with navigation metadata.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page<T> {
    /// The items contained in this page.
    pub items: Vec<T>,
    /// Total count of items across all pages.
    pub count: usize,
    /// The next page number, if more pages exist.
    pub next_page: Option<usize>,
    /// The previous page number, if this is not the first page.
    pub previous_page: Option<usize>,
}

impl<T> Page<T> {
    /// Creates a new builder for constructing a page around the given items.
    ///
    /// # Example
    ///
    /// ```ignore
    /// let page = Page::builder(vec![1, 2, 3])
    ///     .with_count(10)
    ///     .with_next_page(Some(2))
    ///     .build();
    /// ```
    pub fn builder(items: Vec<T>) -> PageBuilder<T> {
        PageBuilder::new(items)
    }
}

impl<T> Default for Page<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            count: 0,
            next_page: None,
            previous_page: None,
        }
    }
}

/// Builder for [`Page`] instances with a fluent API.
pub struct PageBuilder<T> {
    items: Vec<T>,
    count: usize,
    next_page: Option<usize>,
    previous_page: Option<usize>,
}

impl<T> PageBuilder<T> {
    /// Creates a new builder with the given items.
    pub fn new(items: Vec<T>) -> Self {
        Self {
            items,
            count: 0,
            next_page: None,
            previous_page: None,
        }
    }

    /// Sets the total count of items across all pages.
    pub fn with_count(mut self, count: usize) -> Self {
        self.count = count;
        self
    }

    /// Sets the next page number (or `None` if this is the last page).
    pub fn with_next_page(mut self, next_page: Option<usize>) -> Self {
        self.next_page = next_page;
        self
    }

    /// Sets the previous page number (or `None` if this is the first page).
    pub fn with_previous_page(mut self, previous_page: Option<usize>) -> Self {
        self.previous_page = previous_page;
        self
    }

    /// Builds and returns the final [`Page`].
    pub fn build(self) -> Page<T> {
        Page {
            items: self.items,
            count: self.count,
            next_page: self.next_page,
            previous_page: self.previous_page,
        }
    }
}

/// Which page to retrieve and how many items per page. Pages are 1-indexed.
///
/// # Example
///
/// ```ignore
/// use recbox::page::PaginationParams;
///
/// let params = PaginationParams::new(2, 50);
/// assert_eq!(params.offset(), 50);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct PaginationParams {
    /// The page number (1-indexed).
    pub page: usize,
    /// Number of items per page.
    pub per_page: usize,
}

impl PaginationParams {
    /// Creates pagination parameters for the given page and page size.
    pub fn new(page: usize, per_page: usize) -> Self {
        Self { page, per_page }
    }

    /// Number of items to skip to reach this page.
    pub fn offset(&self) -> usize {
        self.page.saturating_sub(1) * self.per_page
    }

    /// Slices an already-ordered result set into this page.
    ///
    /// A page beyond the end of the items, or a zero page size, yields an
    /// empty default page, never an error.
    pub fn paginate<T>(&self, items: Vec<T>) -> Page<T> {
        if self.per_page == 0 || items.is_empty() || self.offset() >= items.len() {
            return Page::default();
        }

        let count = items.len();
        let end = min(self.offset() + self.per_page, count);
        let page_items = items
            .into_iter()
            .skip(self.offset())
            .take(end - self.offset())
            .collect();

        Page::builder(page_items)
            .with_count(count)
            .with_next_page((end < count).then(|| self.page + 1))
            .with_previous_page((self.page > 1).then(|| self.page - 1))
            .build()
    }
}

impl Default for PaginationParams {
    fn default() -> Self {
        Self { page: 1, per_page: 10 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn middle_page_links_both_neighbours() {
        let items: Vec<i32> = (1..=25).collect();
        let page = PaginationParams::new(2, 10).paginate(items);

        assert_eq!(page.items, (11..=20).collect::<Vec<_>>());
        assert_eq!(page.count, 25);
        assert_eq!(page.next_page, Some(3));
        assert_eq!(page.previous_page, Some(1));
    }

    #[test]
    fn last_partial_page_has_no_next() {
        let items: Vec<i32> = (1..=25).collect();
        let page = PaginationParams::new(3, 10).paginate(items);

        assert_eq!(page.items, (21..=25).collect::<Vec<_>>());
        assert_eq!(page.next_page, None);
        assert_eq!(page.previous_page, Some(2));
    }

    #[test]
    fn out_of_range_page_is_empty() {
        let page = PaginationParams::new(4, 10).paginate((1..=25).collect::<Vec<i32>>());

        assert_eq!(page, Page::default());
    }

    #[test]
    fn zero_page_size_is_empty_with_no_next_page() {
        let page = PaginationParams::new(1, 0).paginate((1..=25).collect::<Vec<i32>>());

        assert_eq!(page, Page::default());
        assert_eq!(page.next_page, None);
    }

    #[test]
    fn builder_assembles_navigation_metadata() {
        let page = Page::builder(vec![1, 2, 3])
            .with_count(10)
            .with_next_page(Some(3))
            .with_previous_page(Some(1))
            .build();

        assert_eq!(page.items, vec![1, 2, 3]);
        assert_eq!(page.count, 10);
        assert_eq!(page.next_page, Some(3));
        assert_eq!(page.previous_page, Some(1));
    }
}
