//! Host-side layout constants.
//!
//! Every width and height in the table is expressed in one abstract unit.
//! [`LayoutConfig::default`] uses pixel-sized constants for hosts that lay the
//! table out in pixels; [`LayoutConfig::terminal`] expresses the same layout in
//! terminal cells.

use serde::Deserialize;
use std::time::Duration;

/// Text measured to calibrate the per-character width.
pub const SAMPLE_TEXT: &str = "ABCDEFGHIJ0123456789";

/// Layout constants for one table.
///
/// Derives `Deserialize` with `#[serde(default)]`, so a host can load a
/// partial override from its own configuration file:
///
/// ```rust
/// use bubbletea_pagedtable::pagedtable::LayoutConfig;
///
/// let layout: LayoutConfig = serde_json::from_str(r#"{ "row_height": 24 }"#).unwrap();
/// assert_eq!(layout.row_height, 24);
/// assert_eq!(layout.char_width, LayoutConfig::default().char_width);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Width of one character before calibration.
    pub char_width: usize,
    /// Horizontal cell padding (left + right) before calibration.
    pub cell_padding: usize,
    /// Width of a column navigation arrow.
    pub nav_arrow_width: usize,
    /// Width of a padding column, in characters.
    pub padding_column_chars: usize,
    /// Space kept free beside a single column; caps `max_width`.
    pub column_max_margin: usize,
    /// Footer width not available to page links.
    pub footer_reserve: usize,
    /// Width of one page link.
    pub page_link_width: usize,
    /// Height of one table row.
    pub row_height: usize,
    /// Height taken by header, footer and borders.
    pub vertical_chrome: usize,
    /// Smallest page size the height-driven sizing may choose.
    pub min_page_size: usize,
    /// Rows scanned when estimating column widths.
    pub width_lookahead: usize,
    /// Safety cap on fitting attempts.
    pub max_fit_attempts: usize,
    /// Deferred fit attempts while the container has no width.
    pub retry_attempts: usize,
    /// Delay between deferred fit attempts, in milliseconds.
    pub retry_delay_ms: u64,
    /// Quiet period before a resize is acted on, in milliseconds.
    pub debounce_ms: u64,
    /// Text measured by the renderer to calibrate character width.
    pub sample_text: String,
    /// Text shown in missing-value cells.
    pub missing_display: String,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            char_width: 8,
            cell_padding: 12,
            nav_arrow_width: 5,
            padding_column_chars: 10,
            column_max_margin: 80,
            footer_reserve: 250,
            page_link_width: 40,
            row_height: 30,
            vertical_chrome: 120,
            min_page_size: 2,
            width_lookahead: 10,
            max_fit_attempts: 100,
            retry_attempts: 100,
            retry_delay_ms: 100,
            debounce_ms: 500,
            sample_text: SAMPLE_TEXT.to_string(),
            missing_display: "NA".to_string(),
        }
    }
}

impl LayoutConfig {
    /// Layout constants in terminal cells.
    ///
    /// ```rust
    /// use bubbletea_pagedtable::pagedtable::LayoutConfig;
    ///
    /// let layout = LayoutConfig::terminal();
    /// assert_eq!(layout.char_width, 1);
    /// assert_eq!(layout.row_height, 1);
    /// ```
    pub fn terminal() -> Self {
        Self {
            char_width: 1,
            cell_padding: 2,
            nav_arrow_width: 1,
            padding_column_chars: 10,
            column_max_margin: 8,
            footer_reserve: 30,
            page_link_width: 4,
            row_height: 1,
            vertical_chrome: 5,
            ..Self::default()
        }
    }

    /// Delay between deferred fit attempts.
    pub fn retry_delay(&self) -> Duration {
        Duration::from_millis(self.retry_delay_ms)
    }

    /// Quiet period before a resize is acted on.
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
}
