//! Row pagination for paged tables.
//!
//! This component tracks which page of rows is shown, how many rows a page
//! holds and which page links a footer should offer. It does not render rows
//! itself; the table asks it for the row window and the link range and hands
//! those to its renderer.

use crate::key::{Binding, KeyMap as KeyMapTrait};
use bubbletea_rs::{KeyMsg, Msg};
use crossterm::event::KeyCode;
use std::ops::Range;

/// Rows per page when the payload does not say otherwise.
pub const DEFAULT_ROWS_PER_PAGE: usize = 10;

/// Maximum page links shown when the payload does not say otherwise.
pub const DEFAULT_MAX_PAGE_LINKS: usize = 1;

/// Key bindings for moving between pages.
///
/// # Examples
///
/// ```rust
/// use bubbletea_pagedtable::paginator::PaginatorKeyMap;
/// use bubbletea_pagedtable::key::KeyMap;
///
/// let keymap = PaginatorKeyMap::default();
/// assert_eq!(keymap.short_help().len(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct PaginatorKeyMap {
    /// Previous page. Default keys: PageUp, 'p'
    pub prev_page: Binding,
    /// Next page. Default keys: PageDown, 'n'
    pub next_page: Binding,
    /// First page. Default key: Home
    pub first_page: Binding,
    /// Last page. Default key: End
    pub last_page: Binding,
}

impl Default for PaginatorKeyMap {
    fn default() -> Self {
        Self {
            prev_page: Binding::new(vec![KeyCode::PageUp, KeyCode::Char('p')])
                .with_help("pgup/p", "prev page"),
            next_page: Binding::new(vec![KeyCode::PageDown, KeyCode::Char('n')])
                .with_help("pgdn/n", "next page"),
            first_page: Binding::new(vec![KeyCode::Home]).with_help("home", "first page"),
            last_page: Binding::new(vec![KeyCode::End]).with_help("end", "last page"),
        }
    }
}

impl KeyMapTrait for PaginatorKeyMap {
    fn short_help(&self) -> Vec<&Binding> {
        vec![&self.prev_page, &self.next_page]
    }

    fn full_help(&self) -> Vec<Vec<&Binding>> {
        vec![vec![
            &self.prev_page,
            &self.next_page,
            &self.first_page,
            &self.last_page,
        ]]
    }
}

/// Snapshot of the pagination state handed to footer renderers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageInfo {
    /// Current page, 0-indexed.
    pub page: usize,
    /// Number of pages; at least 1 even for an empty dataset.
    pub page_count: usize,
    /// First row index on the page (inclusive).
    pub row_start: usize,
    /// Last row index on the page (exclusive).
    pub row_end: usize,
    /// Total number of data rows.
    pub total_rows: usize,
    /// Whether Previous/Next controls and page links should be shown at all.
    pub show_navigation: bool,
    /// Whether a previous page exists.
    pub prev_enabled: bool,
    /// Whether a next page exists.
    pub next_enabled: bool,
}

/// Pagination state for one table.
///
/// The page is always kept inside `[0, page_count)`. An empty dataset still
/// has a single, empty page so callers never divide by zero or index past
/// the data.
///
/// # Examples
///
/// ```rust
/// use bubbletea_pagedtable::paginator::Model;
///
/// let mut paginator = Model::new(25).with_per_page(10);
/// assert_eq!(paginator.page_count(), 3);
///
/// paginator.set_page_number(2);
/// assert_eq!(paginator.row_window(), (20, 25));
///
/// // Out of range requests are clamped.
/// paginator.set_page_number(99);
/// assert_eq!(paginator.page, 2);
/// ```
#[derive(Debug, Clone)]
pub struct Model {
    /// The current page, 0-indexed.
    pub page: usize,
    /// Rows shown per page, never below 1.
    per_page: usize,
    /// Rows in the dataset; fixed for the table's lifetime.
    total_rows: usize,
    /// Upper bound for the number of page links in the footer.
    max_page_links: usize,
    /// Page links currently shown, within `[0, max_page_links]`.
    visible_page_links: usize,
    /// Key bindings.
    pub keymap: PaginatorKeyMap,
}

impl Model {
    /// Creates a paginator over `total_rows` rows with default page size and
    /// page link cap.
    pub fn new(total_rows: usize) -> Self {
        Self {
            page: 0,
            per_page: DEFAULT_ROWS_PER_PAGE,
            total_rows,
            max_page_links: DEFAULT_MAX_PAGE_LINKS,
            visible_page_links: DEFAULT_MAX_PAGE_LINKS,
            keymap: PaginatorKeyMap::default(),
        }
    }

    /// Sets the number of rows per page (builder pattern).
    ///
    /// Values below 1 are clamped to 1.
    pub fn with_per_page(mut self, per_page: usize) -> Self {
        self.set_per_page(per_page);
        self
    }

    /// Sets the maximum number of page links (builder pattern).
    ///
    /// The visible link count is reset to the new maximum.
    ///
    /// ```rust
    /// use bubbletea_pagedtable::paginator::Model;
    ///
    /// let paginator = Model::new(100).with_max_page_links(5);
    /// assert_eq!(paginator.visible_page_links(), 5);
    /// ```
    pub fn with_max_page_links(mut self, max: usize) -> Self {
        self.max_page_links = max;
        self.visible_page_links = max;
        self
    }

    /// Rows per page.
    pub fn per_page(&self) -> usize {
        self.per_page
    }

    /// Rows in the dataset.
    pub fn total_rows(&self) -> usize {
        self.total_rows
    }

    /// Page links currently shown in the footer.
    pub fn visible_page_links(&self) -> usize {
        self.visible_page_links
    }

    /// Upper bound for [`visible_page_links`](Self::visible_page_links).
    pub fn max_page_links(&self) -> usize {
        self.max_page_links
    }

    /// Sets the number of rows per page and re-clamps the current page.
    ///
    /// Values below 1 are clamped to 1.
    pub fn set_per_page(&mut self, per_page: usize) {
        self.per_page = per_page.max(1);
        self.set_page_number(self.page);
    }

    /// Number of pages; an empty dataset counts as one empty page.
    ///
    /// ```rust
    /// use bubbletea_pagedtable::paginator::Model;
    ///
    /// assert_eq!(Model::new(0).page_count(), 1);
    /// assert_eq!(Model::new(95).with_per_page(10).page_count(), 10);
    /// ```
    pub fn page_count(&self) -> usize {
        if self.total_rows == 0 {
            1
        } else {
            self.total_rows.div_ceil(self.per_page)
        }
    }

    /// Moves to page `n`, clamped into `[0, page_count)`.
    pub fn set_page_number(&mut self, n: usize) {
        self.page = n.min(self.page_count() - 1);
    }

    /// Sets how many page links are shown, capped at `max_page_links`,
    /// then re-clamps the current page. Zero hides the links.
    ///
    /// ```rust
    /// use bubbletea_pagedtable::paginator::Model;
    ///
    /// let mut paginator = Model::new(200).with_max_page_links(4);
    /// paginator.set_visible_page_links(10);
    /// assert_eq!(paginator.visible_page_links(), 4);
    /// paginator.set_visible_page_links(0);
    /// assert!(paginator.visible_page_range().is_empty());
    /// ```
    pub fn set_visible_page_links(&mut self, count: usize) {
        self.visible_page_links = count.min(self.max_page_links);
        self.set_page_number(self.page);
    }

    /// Page indices to offer as links, centered on the current page.
    ///
    /// With an even link count the extra slot goes after the current page.
    /// The range is shifted, never shrunk, to stay inside `[0, page_count)`,
    /// so it holds `min(visible_page_links, page_count)` pages.
    ///
    /// ```rust
    /// use bubbletea_pagedtable::paginator::Model;
    ///
    /// let mut paginator = Model::new(100).with_per_page(10).with_max_page_links(4);
    /// paginator.set_page_number(5);
    /// assert_eq!(paginator.visible_page_range(), 4..8);
    ///
    /// paginator.set_page_number(9);
    /// assert_eq!(paginator.visible_page_range(), 6..10);
    /// ```
    pub fn visible_page_range(&self) -> Range<usize> {
        let count = self.page_count() as isize;
        let page = self.page as isize;
        let visible = self.visible_page_links as isize;
        if visible == 0 {
            return self.page..self.page;
        }

        let mut start = page - (visible - 1) / 2;
        let mut end = page + visible / 2 + 1;
        if start < 0 {
            end -= start;
            start = 0;
        }
        if end > count {
            start -= end - count;
            end = count;
        }
        (start.max(0) as usize)..(end as usize)
    }

    /// Row indices `(start, end)` shown on the current page.
    pub fn row_window(&self) -> (usize, usize) {
        let start = (self.page * self.per_page).min(self.total_rows);
        let end = (start + self.per_page).min(self.total_rows);
        (start, end)
    }

    /// Number of data rows on the current page.
    pub fn rows_on_page(&self) -> usize {
        let (start, end) = self.row_window();
        end - start
    }

    /// Filler rows needed to keep the table height constant across pages.
    ///
    /// Padding only applies once pagination is active (more rows than fit on
    /// one page); a short single page is never padded.
    ///
    /// ```rust
    /// use bubbletea_pagedtable::paginator::Model;
    ///
    /// let mut paginator = Model::new(25).with_per_page(10);
    /// paginator.set_page_number(2);
    /// assert_eq!(paginator.padding_row_count(), 5);
    ///
    /// assert_eq!(Model::new(4).with_per_page(10).padding_row_count(), 0);
    /// ```
    pub fn padding_row_count(&self) -> usize {
        if self.total_rows > self.per_page {
            self.per_page - self.rows_on_page()
        } else {
            0
        }
    }

    /// Whether the footer should offer page navigation.
    pub fn has_navigation(&self) -> bool {
        self.total_rows > self.per_page
    }

    /// Whether a previous page exists.
    pub fn prev_enabled(&self) -> bool {
        self.page > 0
    }

    /// Whether a next page exists.
    pub fn next_enabled(&self) -> bool {
        (self.page + 1) * self.per_page < self.total_rows
    }

    /// Returns true on the first page.
    pub fn on_first_page(&self) -> bool {
        self.page == 0
    }

    /// Returns true on the last page.
    pub fn on_last_page(&self) -> bool {
        self.page + 1 >= self.page_count()
    }

    /// Moves to the previous page; no-op on the first page.
    pub fn prev_page(&mut self) {
        self.set_page_number(self.page.saturating_sub(1));
    }

    /// Moves to the next page; no-op on the last page.
    pub fn next_page(&mut self) {
        self.set_page_number(self.page + 1);
    }

    /// Snapshot for footer rendering.
    pub fn page_info(&self) -> PageInfo {
        let (row_start, row_end) = self.row_window();
        PageInfo {
            page: self.page,
            page_count: self.page_count(),
            row_start,
            row_end,
            total_rows: self.total_rows,
            show_navigation: self.has_navigation(),
            prev_enabled: self.prev_enabled(),
            next_enabled: self.next_enabled(),
        }
    }

    /// Handles page navigation keys.
    ///
    /// Returns true when the current page changed.
    pub fn update(&mut self, msg: &Msg) -> bool {
        let Some(key_msg) = msg.downcast_ref::<KeyMsg>() else {
            return false;
        };
        let before = self.page;
        if self.keymap.next_page.matches(key_msg) {
            self.next_page();
        } else if self.keymap.prev_page.matches(key_msg) {
            self.prev_page();
        } else if self.keymap.first_page.matches(key_msg) {
            self.set_page_number(0);
        } else if self.keymap.last_page.matches(key_msg) {
            self.set_page_number(self.page_count() - 1);
        }
        self.page != before
    }
}
