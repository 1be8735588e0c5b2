//! Character width calibration.
//!
//! Column widths are estimated from character counts rather than by rendering
//! every column. The estimate starts from configured defaults and is replaced,
//! exactly once, by a measurement taken from the live renderer.

use super::config::LayoutConfig;

/// What a renderer reports after measuring a sample string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SampleMeasure {
    /// Horizontal padding of a body cell (left + right).
    pub padding: usize,
    /// Rendered width of the sample text, without padding.
    pub width: usize,
}

/// Per-character width and cell padding used for width estimates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WidthMeasurement {
    /// Width of one character.
    pub char_width: usize,
    /// Horizontal padding of a cell.
    pub padding: usize,
    /// True until a real measurement has been accepted.
    pub is_default: bool,
}

impl WidthMeasurement {
    /// Default estimate taken from the layout constants.
    pub fn from_layout(layout: &LayoutConfig) -> Self {
        Self {
            char_width: layout.char_width,
            padding: layout.cell_padding,
            is_default: true,
        }
    }

    /// Replaces the default estimate with a real measurement.
    ///
    /// Only takes effect while the estimate is still the default; once a
    /// measurement has been accepted it is never replaced. Non-positive
    /// inputs are ignored. Returns true when the measurement was accepted,
    /// meaning column widths must be recomputed.
    ///
    /// ```rust
    /// use bubbletea_pagedtable::pagedtable::{LayoutConfig, WidthMeasurement};
    ///
    /// let mut measurement = WidthMeasurement::from_layout(&LayoutConfig::default());
    /// assert!(!measurement.calibrate(0, 140, 20));
    /// assert!(measurement.calibrate(10, 141, 20));
    /// assert_eq!(measurement.char_width, 8); // ceil(141 / 20)
    /// assert!(!measurement.calibrate(4, 60, 20));
    /// assert_eq!(measurement.padding, 10);
    /// ```
    pub fn calibrate(&mut self, padding: usize, sample_width: usize, sample_chars: usize) -> bool {
        if !self.is_default {
            return false;
        }
        if padding == 0 || sample_width == 0 || sample_chars == 0 {
            return false;
        }

        self.char_width = sample_width.div_ceil(sample_chars);
        self.padding = padding;
        self.is_default = false;
        tracing::info!(
            char_width = self.char_width,
            padding = self.padding,
            "calibrated column width measurement"
        );
        true
    }

    /// Width of a padding column made of `chars` characters.
    pub fn padding_column_width(&self, chars: usize) -> usize {
        chars * self.char_width
    }
}
