use crate::query::Window;

/// One window of a filtered, sorted listing, together with the counts a
/// client needs to navigate to the neighbouring windows.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    /// The records inside the window, never more than `limit`
    pub items: Vec<T>,
    /// The number of records matching the filter, across all pages
    pub total: u64,
    /// The 1-based page number
    pub page: u64,
    /// The page size the window was computed with
    pub limit: u64,
    /// `ceil(total / limit)`
    pub total_pages: u64,
    /// True iff `page < total_pages`
    pub has_next_page: bool,
    /// True iff `page > 1`
    pub has_previous_page: bool,
}

impl<T> Page<T> {
    /// Assemble a page from the fetched window and the total match count.
    pub fn new(items: Vec<T>, total: u64, window: Window) -> Self {
        let page = window.page();
        let limit = window.limit();
        let total_pages = total.div_ceil(limit);
        Self {
            items,
            total,
            page,
            limit,
            total_pages,
            has_next_page: page < total_pages,
            has_previous_page: page > 1,
        }
    }

    /// Transform the records of the page, keeping the navigation fields.
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            total: self.total,
            page: self.page,
            limit: self.limit,
            total_pages: self.total_pages,
            has_next_page: self.has_next_page,
            has_previous_page: self.has_previous_page,
        }
    }
}
