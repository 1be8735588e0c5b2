//! Column fitting.
//!
//! Grows the column window one step at a time until it no longer fits the
//! container, then settles on the last window that did. Growth starts at the
//! current offset and adds columns on the right; when the last column is
//! reached it turns around and pulls columns in from the left. A backward
//! fit does the mirror image. When the data runs out before the minimum
//! column count is met, padding columns fill the remaining space.

use super::columns::{ColumnSlice, ColumnWindow};

/// Which way the window grows first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    /// Add columns on the right first.
    #[default]
    Forward,
    /// Add columns on the left first.
    Backward,
}

/// Width available to the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FitRequest {
    /// Measured container width; 0 means the container is not laid out yet.
    pub container_width: usize,
    /// Horizontal padding inside the container.
    pub container_padding: usize,
    /// Which way to grow first.
    pub direction: Direction,
    /// Column the search starts from; `None` keeps the window's offset.
    pub start_offset: Option<usize>,
    /// Cap on fitting windows recorded before the search gives up.
    pub max_attempts: usize,
}

/// Result of one fitting pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FitOutcome {
    /// The window that was applied.
    pub slice: ColumnSlice,
    /// Windows that fit along the way, in search order.
    pub history: Vec<ColumnSlice>,
    /// True when no window fit and the first attempt was kept anyway.
    pub degraded: bool,
    /// True when the search hit its attempt cap.
    pub exhausted: bool,
}

/// Searches for the widest window that fits and applies it to `window`.
///
/// An unmeasured container (`container_width == 0`) starts from the maximum
/// column count so the first paint shows as much as allowed; a measured one
/// starts from a single column. At least one column is always shown.
pub fn fit_columns(window: &mut ColumnWindow, request: FitRequest) -> FitOutcome {
    let total = window.total();
    let available = request
        .container_width
        .saturating_sub(request.container_padding);
    let start_backward = request.direction == Direction::Backward;
    let mut backward = start_backward;

    let mut offset = request.start_offset.unwrap_or_else(|| window.offset());
    let mut visible = if request.container_width == 0 {
        window.max().unwrap_or(total).max(1)
    } else {
        1
    };
    let mut padding = 0;

    let mut history: Vec<ColumnSlice> = Vec::new();
    let mut exhausted = false;

    loop {
        window.set_visible_window(offset, visible, padding);
        offset = window.offset();
        visible = window.visible();

        if available < window.total_outer_width() {
            break;
        }

        if history.len() >= request.max_attempts {
            tracing::warn!(
                attempts = history.len(),
                "more than {} tries to fit columns, aborting",
                request.max_attempts
            );
            exhausted = true;
            break;
        }
        history.push(window.slice());

        if window.max().is_some_and(|max| visible + padding >= max) {
            break;
        }

        // Out of columns on the right.
        if !backward && offset + visible >= total {
            if !start_backward && offset > 0 {
                backward = true;
            } else if window.min_satisfied(visible + padding) {
                break;
            } else {
                padding += 1;
            }
        }

        // Out of columns on the left.
        if backward && offset == 0 {
            if start_backward && offset + visible < total {
                backward = false;
            } else if window.min_satisfied(visible + padding) {
                break;
            } else {
                padding += 1;
            }
        }

        if backward && offset > 0 {
            offset -= 1;
        }

        if offset + visible < total {
            visible += 1;
        }
    }

    let degraded = history.is_empty();
    let slice = history.last().copied().unwrap_or(ColumnSlice {
        offset,
        visible,
        padding,
    });
    window.apply(slice);

    tracing::debug!(
        offset = slice.offset,
        visible = slice.visible,
        padding = slice.padding,
        attempts = history.len(),
        degraded,
        "fitted columns"
    );

    FitOutcome {
        slice,
        history,
        degraded,
        exhausted,
    }
}
