//! Fixed-size pagination.

/// Stations per page when browsing a locality.
pub const LOCALITY_PAGE_SIZE: usize = 8;

/// Stations per page in the nearby-stations grid.
pub const NEARBY_PAGE_SIZE: usize = 6;

/// Current page and page size. Pages are numbered from 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageState {
    current_page: usize,
    page_size: usize,
}

impl PageState {
    /// Start on page 1. A zero page size is raised to 1.
    pub fn new(page_size: usize) -> Self {
        Self {
            current_page: 1,
            page_size: page_size.max(1),
        }
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Jump to `page`; 0 is treated as 1.
    pub fn set_page(&mut self, page: usize) {
        self.current_page = page.max(1);
    }

    pub fn reset(&mut self) {
        self.current_page = 1;
    }
}

impl Default for PageState {
    fn default() -> Self {
        Self::new(LOCALITY_PAGE_SIZE)
    }
}

/// Number of pages needed for `count` items; 0 when there are none.
pub fn total_pages(count: usize, page_size: usize) -> usize {
    count.div_ceil(page_size.max(1))
}

/// One page cut from a longer list.
#[derive(Debug, Clone, PartialEq)]
pub struct Paginated<T> {
    pub items: Vec<T>,

    /// The page actually returned; differs from the request when it was out of range.
    pub current_page: usize,

    pub total_pages: usize,
}

/// Cut page `page` out of `items`.
///
/// A page of 0 or past the end falls back to page 1, so callers always get
/// the first page rather than an empty slice.
pub fn paginate<T>(items: Vec<T>, page: usize, page_size: usize) -> Paginated<T> {
    let page_size = page_size.max(1);
    let total = total_pages(items.len(), page_size);
    let current_page = if page == 0 || page > total { 1 } else { page };

    let start = (current_page - 1) * page_size;
    let items: Vec<T> = items.into_iter().skip(start).take(page_size).collect();

    Paginated {
        items,
        current_page,
        total_pages: total,
    }
}
