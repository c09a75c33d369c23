//! Page-number pagination primitives shared by backend endpoints.
//!
//! A [`PageRequest`] names a 1-indexed page and a page size. Adapters use
//! [`PageRequest::offset`] and [`PageRequest::limit`] to slice their result
//! sets, then wrap the slice in a [`Page`] whose [`Pagination`] envelope
//! reports the total number of matching items and pages.
//!
//! ```
//! use pagination::{Page, PageRequest};
//!
//! let request = PageRequest::new(2, 20).expect("valid page request");
//! assert_eq!(request.offset(), 20);
//!
//! let page = Page::new(vec!["a", "b"], request, 22);
//! assert_eq!(page.pagination.total_pages, 2);
//! ```

use serde::{Deserialize, Serialize};

/// Page size used when a caller does not choose one.
pub const DEFAULT_PAGE_SIZE: u32 = 20;

/// Errors raised when constructing a [`PageRequest`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum PageRequestError {
    /// Pages are numbered from one.
    #[error("page must be at least 1")]
    ZeroPage,
    /// A page must hold at least one item.
    #[error("page size must be at least 1")]
    ZeroPageSize,
}

/// Validated request for one page of results.
///
/// ## Invariants
/// - `page >= 1`
/// - `per_page >= 1`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page: u32,
    per_page: u32,
}

impl PageRequest {
    /// Validate and construct a page request.
    ///
    /// # Errors
    ///
    /// Returns [`PageRequestError::ZeroPage`] when `page` is zero and
    /// [`PageRequestError::ZeroPageSize`] when `per_page` is zero.
    pub fn new(page: u32, per_page: u32) -> Result<Self, PageRequestError> {
        if page == 0 {
            return Err(PageRequestError::ZeroPage);
        }
        if per_page == 0 {
            return Err(PageRequestError::ZeroPageSize);
        }
        Ok(Self { page, per_page })
    }

    /// First page with the default page size.
    #[must_use]
    pub fn first() -> Self {
        Self {
            page: 1,
            per_page: DEFAULT_PAGE_SIZE,
        }
    }

    /// Requested page number (1-indexed).
    #[must_use]
    pub fn page(&self) -> u32 {
        self.page
    }

    /// Maximum number of items on the page.
    #[must_use]
    pub fn per_page(&self) -> u32 {
        self.per_page
    }

    /// Number of items preceding the requested page.
    #[must_use]
    pub fn offset(&self) -> u64 {
        u64::from(self.page - 1) * u64::from(self.per_page)
    }

    /// Maximum number of items to fetch for the requested page.
    #[must_use]
    pub fn limit(&self) -> u64 {
        u64::from(self.per_page)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::first()
    }
}

/// Number of pages needed to hold `total` items, `per_page` at a time.
///
/// ```
/// assert_eq!(pagination::total_pages(0, 20), 0);
/// assert_eq!(pagination::total_pages(25, 20), 2);
/// ```
#[must_use]
pub fn total_pages(total: u64, per_page: u32) -> u64 {
    if per_page == 0 {
        return 0;
    }
    total.div_ceil(u64::from(per_page))
}

/// Pagination envelope returned alongside a page of results.
///
/// Field names are serialised in snake case because existing report
/// consumers read `per_page` and `total_pages` verbatim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    /// Requested page number (1-indexed).
    pub page: u32,
    /// Maximum number of items per page.
    pub per_page: u32,
    /// Total number of matching items across all pages.
    pub total: u64,
    /// Total number of pages, `ceil(total / per_page)`.
    pub total_pages: u64,
}

impl Pagination {
    /// Build the envelope for `request` given the total number of matches.
    #[must_use]
    pub fn new(request: PageRequest, total: u64) -> Self {
        Self {
            page: request.page(),
            per_page: request.per_page(),
            total,
            total_pages: total_pages(total, request.per_page()),
        }
    }
}

/// One page of items plus its pagination envelope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page<T> {
    /// Items on this page, in result order.
    pub data: Vec<T>,
    /// Envelope describing the page position.
    pub pagination: Pagination,
}

impl<T> Page<T> {
    /// Wrap `data` with the envelope for `request` and `total` matches.
    #[must_use]
    pub fn new(data: Vec<T>, request: PageRequest, total: u64) -> Self {
        Self {
            data,
            pagination: Pagination::new(request, total),
        }
    }

    /// Transform every item while keeping the envelope.
    #[must_use]
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            data: self.data.into_iter().map(f).collect(),
            pagination: self.pagination,
        }
    }
}
