//! The rendering boundary.
//!
//! The table decides *what* is shown; a [`RenderSink`] decides *how*. The
//! table hands the sink one context struct per region (header, body, footer)
//! and collects whatever element type the sink produces. A terminal sink
//! produces strings, a document sink might produce markup nodes.

use super::measure::SampleMeasure;
use super::source::{Cell, ColumnDescriptor};
use crate::paginator::PageInfo;
use std::ops::Range;

/// A visible column as the renderer sees it.
#[derive(Debug, Clone, Copy)]
pub struct RenderColumn<'a> {
    /// Index into the dataset's columns.
    pub index: usize,
    /// The column's descriptor.
    pub descriptor: &'a ColumnDescriptor,
    /// Estimated width in characters.
    pub chars: usize,
    /// Stable content width, if the fit has registered one.
    pub width: Option<usize>,
    /// Upper bound for the content width; 0 when the container is unmeasured.
    pub max_width: usize,
}

impl RenderColumn<'_> {
    /// Content width to render: the registered width, or the estimated
    /// character count before one is registered, capped by `max_width`.
    pub fn effective_width(&self) -> usize {
        let width = self.width.unwrap_or(self.chars);
        if self.max_width > 0 {
            width.min(self.max_width)
        } else {
            width
        }
    }
}

/// Elements that frame the visible columns on every row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowChrome {
    /// A navigation column precedes the data columns.
    pub hidden_left: bool,
    /// A navigation column follows the data columns.
    pub hidden_right: bool,
    /// Padding columns after the data columns.
    pub padding_columns: usize,
    /// Width of one padding column.
    pub padding_column_width: usize,
}

/// Everything needed to render the header row.
#[derive(Debug, Clone, Copy)]
pub struct HeaderRow<'a> {
    /// Visible columns in display order.
    pub columns: &'a [RenderColumn<'a>],
    /// Navigation and padding columns.
    pub chrome: RowChrome,
}

/// Everything needed to render the rows of the current page.
#[derive(Debug, Clone, Copy)]
pub struct BodyRows<'a> {
    /// Rows of the current page only.
    pub rows: &'a [Vec<Cell>],
    /// Dataset index of the first row in `rows`.
    pub first_row: usize,
    /// Visible columns in display order.
    pub columns: &'a [RenderColumn<'a>],
    /// Navigation and padding columns.
    pub chrome: RowChrome,
    /// Filler rows appended after the data rows.
    pub padding_rows: usize,
    /// Text shown in missing cells.
    pub missing_display: &'a str,
}

/// Everything needed to render the footer.
#[derive(Debug, Clone)]
pub struct Footer<'a> {
    /// Pagination state.
    pub page: PageInfo,
    /// Page indices to offer as links.
    pub links: Range<usize>,
    /// Summary text, e.g. `"1-10 of 25 rows"`.
    pub label: &'a str,
}

/// Produces the visual elements of a table.
pub trait RenderSink {
    /// What the sink produces for each region.
    type Element;

    /// Renders the header row.
    fn render_header_row(&self, header: &HeaderRow<'_>) -> Self::Element;

    /// Renders the rows of the current page, including filler rows.
    fn render_body_rows(&self, body: &BodyRows<'_>) -> Self::Element;

    /// Renders page navigation and the summary label.
    fn render_footer(&self, footer: &Footer<'_>) -> Self::Element;

    /// Renders a table that has no rows or no columns.
    fn render_empty(&self, columns: &[ColumnDescriptor], label: &str) -> Self::Element;

    /// Measures `sample` as a body cell. `None` when the sink cannot measure
    /// yet, in which case default measurements stay in place.
    fn measure_sample(&self, _sample: &str) -> Option<SampleMeasure> {
        None
    }
}

/// A rendered table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Frame<E> {
    /// No rows or no columns.
    Empty(E),
    /// A regular table.
    Table {
        /// Header row.
        header: E,
        /// Body rows.
        body: E,
        /// Footer.
        footer: E,
    },
}

/// Formats a count with comma thousands separators.
///
/// ```rust
/// use bubbletea_pagedtable::pagedtable::format_count;
///
/// assert_eq!(format_count(999), "999");
/// assert_eq!(format_count(1234567), "1,234,567");
/// ```
pub fn format_count(n: usize) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Footer summary for a page and column window.
///
/// `columns` is `(offset, visible, total)`; the column part is only added
/// when some, but not all, columns are hidden. Only the row total gets
/// thousands separators.
pub fn footer_label(page: &PageInfo, per_page: usize, columns: (usize, usize, usize)) -> String {
    let total = format_count(page.total_rows);
    let mut label = if page.total_rows < per_page {
        let plural = if page.total_rows == 1 { "" } else { "s" };
        format!("{total} row{plural}")
    } else {
        format!("{}-{} of {total} rows", page.row_start + 1, page.row_end)
    };

    let (offset, visible, total_columns) = columns;
    if visible > 0 && total_columns > visible {
        label.push_str(&format!(
            " | {}-{} of {total_columns} columns",
            offset + 1,
            (offset + visible).min(total_columns)
        ));
    }
    label
}
