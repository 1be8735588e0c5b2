#![warn(missing_docs)]
#![doc(html_root_url = "https://docs.rs/bubbletea-pagedtable/")]

//! # bubbletea-pagedtable
//!
//! A paged table component for [bubbletea-rs](https://github.com/joshka/bubbletea-rs)
//! that never overflows its container.
//!
//! Rows are split into pages and only a contiguous window of columns is shown.
//! The window is chosen by fitting estimated column widths into the measured
//! container width; the rest of the columns stay reachable through column
//! navigation. Page size follows the container height unless the payload pins
//! it.
//!
//! ## Overview
//!
//! The table is loaded once from a JSON payload and stays immutable
//! afterwards:
//!
//! ```rust
//! use bubbletea_pagedtable::prelude::*;
//!
//! let json = r#"{
//!     "data": [{"name": "Mazda RX4", "mpg": "21.0"}, {"name": "Valiant", "mpg": "NA"}],
//!     "columns": [
//!         {"name": "name", "label": "name", "type": "chr"},
//!         {"name": "mpg", "label": "mpg", "type": "dbl", "align": "right"}
//!     ],
//!     "options": {"rows": 10, "columns": {"min": 1, "max": 8}}
//! }"#;
//!
//! let mut table = PagedTable::from_json(json).unwrap().with_container(80, 24);
//! table.mount();
//! assert_eq!(table.footer_label(), "2 rows");
//! ```
//!
//! ## Integration with bubbletea-rs
//!
//! `PagedTable` is a bubbletea `Model`; embed it and forward messages:
//!
//! ```rust
//! use bubbletea_pagedtable::prelude::*;
//! use bubbletea_rs::{Cmd, Model, Msg};
//!
//! struct App {
//!     table: PagedTable,
//! }
//!
//! impl Model for App {
//!     fn init() -> (Self, Option<Cmd>) {
//!         let json = r#"{"data": [{"a": "1"}], "columns": [{"name": "a", "label": "a"}]}"#;
//!         let mut table = PagedTable::from_json(json).unwrap();
//!         table.focus();
//!         let cmd = table.mount();
//!         (Self { table }, cmd)
//!     }
//!
//!     fn update(&mut self, msg: Msg) -> Option<Cmd> {
//!         self.table.update(msg)
//!     }
//!
//!     fn view(&self) -> String {
//!         self.table.view()
//!     }
//! }
//! ```
//!
//! ## Rendering elsewhere
//!
//! The table only decides what is shown. Output goes through a
//! [`RenderSink`](pagedtable::RenderSink); implement it to render into
//! something other than terminal text.

pub mod error;
pub mod key;
pub mod pagedtable;
pub mod paginator;

use bubbletea_rs::Cmd;

/// Core trait for components that support focus management.
///
/// A focused component reacts to keyboard input; a blurred one ignores it.
///
/// ```rust
/// use bubbletea_pagedtable::prelude::*;
///
/// let mut table = PagedTable::terminal(Payload::default());
/// assert!(!table.focused());
///
/// table.focus();
/// assert!(table.focused());
///
/// table.blur();
/// assert!(!table.focused());
/// ```
pub trait Component {
    /// Sets the component to focused state.
    ///
    /// May return a command for the bubbletea runtime.
    fn focus(&mut self) -> Option<Cmd>;

    /// Sets the component to blurred (unfocused) state.
    fn blur(&mut self);

    /// Returns the current focus state of the component.
    fn focused(&self) -> bool;
}

pub use error::{PagedTableError, Result};
pub use key::{Binding, KeyMap};
pub use pagedtable::{
    Cell, ColumnDescriptor, Dataset, LayoutConfig, Navigation, PagedTable, Payload,
    TerminalRenderer,
};
pub use paginator::Model as Paginator;

/// Prelude module for convenient imports.
///
/// ```rust
/// use bubbletea_pagedtable::prelude::*;
/// ```
pub mod prelude {
    pub use crate::error::PagedTableError;
    pub use crate::key::{Binding, KeyMap};
    pub use crate::pagedtable::{
        Align, Cell, ChangeCause, ColumnDescriptor, Dataset, Direction, Frame, LayoutConfig,
        NavigateMsg, Navigation, PagedTable, PagedTableKeyMap, Payload, RenderSink,
        TableChange, TableOptions, TableStyles, TerminalRenderer,
    };
    pub use crate::paginator::Model as Paginator;
    pub use crate::Component;
}
