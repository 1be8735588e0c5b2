//! The horizontal column window.
//!
//! Only a contiguous slice `[offset, offset + visible)` of the columns is
//! shown at a time, optionally followed by padding columns that keep a table
//! with few columns from looking cramped. Column widths are estimated from
//! the label and a bounded look-ahead over the first rows, never from the
//! whole dataset.

use super::config::LayoutConfig;
use super::measure::WidthMeasurement;
use super::source::Dataset;
use unicode_width::UnicodeWidthStr;

/// Minimum visible columns when the payload does not say otherwise.
pub const DEFAULT_MIN_COLUMNS: usize = 5;

/// Maximum visible columns when the payload does not say otherwise.
pub const DEFAULT_MAX_COLUMNS: usize = 10;

/// Estimated width of one column.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ColumnWidth {
    /// Width in characters.
    pub chars: usize,
    /// Width of the cell content.
    pub inner: usize,
    /// Width including cell padding.
    pub outer: usize,
}

/// A column inside the visible slice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VisibleColumn {
    /// Index into the dataset's columns.
    pub index: usize,
    /// Stable content width once the fit has settled; `None` lets the
    /// renderer size the column from its content.
    pub width: Option<usize>,
}

/// Position of the column window: what the fitting search explores.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnSlice {
    /// First visible column.
    pub offset: usize,
    /// Number of visible data columns.
    pub visible: usize,
    /// Number of padding columns after the data columns.
    pub padding: usize,
}

/// Column window state for one table.
#[derive(Debug, Clone)]
pub struct ColumnWindow {
    offset: usize,
    visible: usize,
    padding: usize,
    total: usize,
    min: Option<usize>,
    max: Option<usize>,
    widths: Vec<ColumnWidth>,
    slice: Vec<VisibleColumn>,
    measurement: WidthMeasurement,
    nav_arrow_width: usize,
    padding_column_chars: usize,
    lookahead: usize,
    missing_display: String,
}

impl ColumnWindow {
    /// Creates an empty window over `dataset` and estimates column widths
    /// with the default measurement.
    pub fn new(dataset: &Dataset, layout: &LayoutConfig) -> Self {
        let mut window = Self {
            offset: 0,
            visible: 0,
            padding: 0,
            total: dataset.column_count(),
            min: Some(DEFAULT_MIN_COLUMNS),
            max: Some(DEFAULT_MAX_COLUMNS),
            widths: Vec::new(),
            slice: Vec::new(),
            measurement: WidthMeasurement::from_layout(layout),
            nav_arrow_width: layout.nav_arrow_width,
            padding_column_chars: layout.padding_column_chars,
            lookahead: layout.width_lookahead,
            missing_display: layout.missing_display.clone(),
        };
        let measurement = window.measurement;
        window.estimate_widths(dataset, measurement);
        window.set_visible_window(0, 0, 0);
        window
    }

    /// Sets the column bounds (builder pattern).
    pub fn with_bounds(mut self, min: Option<usize>, max: Option<usize>) -> Self {
        self.min = min;
        self.max = max;
        self
    }

    /// Recomputes every column's width with `measurement`.
    ///
    /// A column is as wide as the longest of its label and its cells in the
    /// first `lookahead` rows.
    pub fn estimate_widths(&mut self, dataset: &Dataset, measurement: WidthMeasurement) {
        self.measurement = measurement;
        let sample = &dataset.rows()[..dataset.row_count().min(self.lookahead)];

        self.widths = dataset
            .columns()
            .iter()
            .enumerate()
            .map(|(index, column)| {
                let chars = sample
                    .iter()
                    .filter_map(|row| row.get(index))
                    .map(|cell| cell.display(&self.missing_display).width())
                    .fold(column.label.width(), usize::max);
                let inner = chars * measurement.char_width;
                ColumnWidth {
                    chars,
                    inner,
                    outer: inner + measurement.padding,
                }
            })
            .collect();
    }

    /// Moves the window, clamping it inside the column range.
    ///
    /// The visible count is capped at the column count and the offset is
    /// pulled back so the window never runs past the last column. Widths of
    /// the new slice are cleared until [`register_widths`](Self::register_widths).
    pub fn set_visible_window(&mut self, offset: usize, visible: usize, padding: usize) {
        self.visible = visible.min(self.total);
        self.offset = offset.min(self.total - self.visible);
        self.padding = padding;
        self.slice = (self.offset..self.offset + self.visible)
            .map(|index| VisibleColumn { index, width: None })
            .collect();
    }

    /// Applies a [`ColumnSlice`].
    pub fn apply(&mut self, slice: ColumnSlice) {
        self.set_visible_window(slice.offset, slice.visible, slice.padding);
    }

    /// Shifts the window by `delta` columns without changing its size.
    pub fn scroll(&mut self, delta: isize) {
        let offset = self.offset.saturating_add_signed(delta);
        self.set_visible_window(offset, self.visible, self.padding);
    }

    /// Pins each visible column to its estimated content width.
    pub fn register_widths(&mut self) {
        for column in &mut self.slice {
            column.width = self.widths.get(column.index).map(|w| w.inner);
        }
    }

    /// Total width of the window: visible columns, padding columns and a
    /// navigation arrow on each side that hides columns.
    pub fn total_outer_width(&self) -> usize {
        let columns: usize = self
            .slice
            .iter()
            .filter_map(|column| self.widths.get(column.index))
            .map(|width| width.outer)
            .sum();
        let padding = self.padding
            * self
                .measurement
                .padding_column_width(self.padding_column_chars);
        let arrow = self.nav_arrow_width + self.measurement.padding;
        let hidden_sides =
            usize::from(self.has_hidden_left()) + usize::from(self.has_hidden_right());
        columns + padding + arrow * hidden_sides
    }

    /// Columns exist before the window.
    pub fn has_hidden_left(&self) -> bool {
        self.offset > 0
    }

    /// Columns exist after the window.
    pub fn has_hidden_right(&self) -> bool {
        self.offset + self.visible < self.total
    }

    /// True when `count` columns satisfy the minimum bound.
    pub fn min_satisfied(&self, count: usize) -> bool {
        self.min.map_or(true, |min| count >= min)
    }

    /// Current window position.
    pub fn slice(&self) -> ColumnSlice {
        ColumnSlice {
            offset: self.offset,
            visible: self.visible,
            padding: self.padding,
        }
    }

    /// Visible columns in display order.
    pub fn visible_columns(&self) -> &[VisibleColumn] {
        &self.slice
    }

    /// First visible column.
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Number of visible data columns.
    pub fn visible(&self) -> usize {
        self.visible
    }

    /// Number of padding columns.
    pub fn padding(&self) -> usize {
        self.padding
    }

    /// Number of columns in the dataset.
    pub fn total(&self) -> usize {
        self.total
    }

    /// Minimum visible column bound.
    pub fn min(&self) -> Option<usize> {
        self.min
    }

    /// Maximum visible column bound.
    pub fn max(&self) -> Option<usize> {
        self.max
    }

    /// Estimated width of every column.
    pub fn widths(&self) -> &[ColumnWidth] {
        &self.widths
    }

    /// Measurement the widths were estimated with.
    pub fn measurement(&self) -> WidthMeasurement {
        self.measurement
    }

    /// Width of one padding column.
    pub fn padding_column_width(&self) -> usize {
        self.measurement
            .padding_column_width(self.padding_column_chars)
    }
}
