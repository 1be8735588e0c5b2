//! Paged table component that always fits its container.
//!
//! The table paginates rows and shows a contiguous window of columns, sized
//! so the table never overflows the element hosting it. The pieces, leaves
//! first:
//!
//! - [`Payload`]/[`Dataset`]: the immutable rows and column descriptors.
//! - [`Paginator`](crate::paginator::Model): current page, page size, page links.
//! - [`ColumnWindow`]: visible column slice, padding columns, width estimates.
//! - [`WidthMeasurement`]: per-character width, calibrated once from the renderer.
//! - [`fit_columns`]: the search for the widest column window that fits.
//! - [`RenderSink`]: the boundary that turns the fitted layout into output.
//!
//! A resize or navigation runs the fit, adjusts the page size to the
//! container height and re-renders:
//!
//! ```rust
//! use bubbletea_pagedtable::pagedtable::{Navigation, PagedTable};
//!
//! let json = r#"{
//!     "data": [{"a": "1", "b": "x"}, {"a": "2", "b": "NA"}, {"a": "3", "b": "z"}],
//!     "columns": [{"name": "a", "label": "a", "type": "int", "align": "right"},
//!                 {"name": "b", "label": "b", "type": "chr"}],
//!     "options": {"rows": 2}
//! }"#;
//!
//! let mut table = PagedTable::from_json(json).unwrap().with_container(60, 0);
//! table.mount();
//! assert_eq!(table.footer_label(), "1-2 of 3 rows");
//!
//! table.navigate(Navigation::NextPage);
//! assert_eq!(table.footer_label(), "3-3 of 3 rows");
//! ```
//!
//! ### Deferred layout
//! A container without a width (not laid out yet) gets a hidden, full-width
//! table and a retry every `retry_delay_ms`, up to `retry_attempts` times.
//! Resizes are debounced by `debounce_ms` and only re-fit when the size
//! actually changed since the last fit.

pub mod columns;
pub mod config;
pub mod events;
pub mod fit;
pub mod keys;
pub mod measure;
pub mod render;
pub mod source;
pub mod style;
pub mod terminal;

mod api;
mod model;
mod rendering;

#[cfg(test)]
mod tests;

pub use columns::{ColumnSlice, ColumnWidth, ColumnWindow, VisibleColumn};
pub use config::{LayoutConfig, SAMPLE_TEXT};
pub use events::{
    ChangeCause, NavigateMsg, Navigation, ResizeCheckMsg, RetryFitMsg, SubscriptionId, TableChange,
};
pub use fit::{fit_columns, Direction, FitOutcome, FitRequest};
pub use keys::PagedTableKeyMap;
pub use measure::{SampleMeasure, WidthMeasurement};
pub use model::{Container, PagedTable};
pub use render::{
    footer_label, format_count, BodyRows, Footer, Frame, HeaderRow, RenderColumn, RenderSink,
    RowChrome,
};
pub use source::{
    Align, Cell, ColumnDescriptor, ColumnOptions, Dataset, Payload, TableOptions,
    LITERAL_NA_SENTINEL, MISSING_SENTINEL,
};
pub use style::TableStyles;
pub use terminal::TerminalRenderer;

use crate::key::{Binding, KeyMap};
use crate::Component;
use bubbletea_rs::{Cmd, Model as BubbleTeaModel, Msg};

impl<S: RenderSink> KeyMap for PagedTable<S> {
    fn short_help(&self) -> Vec<&Binding> {
        self.keymap.short_help()
    }

    fn full_help(&self) -> Vec<Vec<&Binding>> {
        self.keymap.full_help()
    }
}

impl<S: RenderSink> Component for PagedTable<S> {
    fn focus(&mut self) -> Option<Cmd> {
        self.focus = true;
        None
    }

    fn blur(&mut self) {
        self.focus = false;
    }

    fn focused(&self) -> bool {
        self.focus
    }
}

impl BubbleTeaModel for PagedTable<TerminalRenderer> {
    /// Starts with an empty table; real tables are built with
    /// [`PagedTable::from_json`] or [`PagedTable::terminal`] and mounted by
    /// the host.
    fn init() -> (Self, Option<Cmd>) {
        let mut table = PagedTable::terminal(Payload::default());
        let cmd = table.mount();
        (table, cmd)
    }

    fn update(&mut self, msg: Msg) -> Option<Cmd> {
        self.handle_msg(&msg)
    }

    fn view(&self) -> String {
        self.render_text()
    }
}
