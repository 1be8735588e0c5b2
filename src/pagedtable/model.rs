//! The table model: construction, configuration and accessors.

use super::columns::{ColumnWindow, DEFAULT_MAX_COLUMNS, DEFAULT_MIN_COLUMNS};
use super::config::LayoutConfig;
use super::events::{next_id, Observers};
use super::keys::PagedTableKeyMap;
use super::render::RenderSink;
use super::source::{Dataset, Payload, TableOptions};
use super::terminal::TerminalRenderer;
use crate::error::Result;
use crate::paginator::{self, DEFAULT_MAX_PAGE_LINKS, DEFAULT_ROWS_PER_PAGE};
use std::sync::Arc;

/// Measured size of the element hosting the table.
///
/// A width of 0 means the host has not laid the table out yet.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Container {
    /// Outer width.
    pub width: usize,
    /// Outer height; 0 leaves the page size alone.
    pub height: usize,
    /// Horizontal padding inside the container (left + right).
    pub padding: usize,
}

/// A paged, column-windowed table.
///
/// Rows are split into pages and only the columns that fit the container
/// are shown; the rest are reachable through column navigation. The table
/// owns its pagination and column state and shares the immutable dataset.
///
/// Rendering goes through a [`RenderSink`]. With the default
/// [`TerminalRenderer`] the table is a bubbletea `Model` that renders to a
/// string.
///
/// # Examples
///
/// ```rust
/// use bubbletea_pagedtable::pagedtable::{ColumnDescriptor, Cell, Dataset, PagedTable, Payload};
///
/// let columns = vec![ColumnDescriptor::new("id"), ColumnDescriptor::new("name")];
/// let rows = (0..25)
///     .map(|i| vec![Cell::from_raw(&i.to_string()), Cell::from_raw("row")])
///     .collect();
/// let payload = Payload { dataset: Dataset::new(columns, rows), ..Payload::default() };
///
/// let mut table = PagedTable::terminal(payload).with_container(80, 0);
/// table.mount();
/// assert_eq!(table.paginator().page_count(), 3);
/// assert_eq!(table.columns().visible(), 2);
/// ```
#[derive(Debug)]
pub struct PagedTable<S: RenderSink = TerminalRenderer> {
    pub(super) id: i64,
    pub(super) dataset: Arc<Dataset>,
    pub(super) options: TableOptions,
    pub(super) layout: LayoutConfig,
    pub(super) paginator: paginator::Model,
    pub(super) columns: ColumnWindow,
    pub(super) container: Container,
    /// Container size the last fit used.
    pub(super) last_fit: Option<Container>,
    pub(super) retry_tag: i64,
    pub(super) retries_left: usize,
    pub(super) resize_tag: i64,
    pub(super) hidden: bool,
    pub(super) mounted: bool,
    pub(super) torn_down: bool,
    pub(super) focus: bool,
    pub(super) observers: Observers,
    /// Key bindings.
    pub keymap: PagedTableKeyMap,
    /// The render sink.
    pub renderer: S,
}

impl<S: RenderSink> PagedTable<S> {
    /// Creates a table from a parsed payload with the default layout
    /// constants.
    pub fn new(payload: Payload, renderer: S) -> Self {
        let layout = LayoutConfig::default();
        let dataset = Arc::new(payload.dataset);
        let options = payload.options;
        Self {
            id: next_id(),
            paginator: build_paginator(&dataset, &options),
            columns: build_columns(&dataset, &options, &layout),
            dataset,
            options,
            layout,
            container: Container::default(),
            last_fit: None,
            retry_tag: 0,
            retries_left: 0,
            resize_tag: 0,
            hidden: false,
            mounted: false,
            torn_down: false,
            focus: false,
            observers: Observers::default(),
            keymap: PagedTableKeyMap::default(),
            renderer,
        }
    }

    /// Replaces the layout constants (builder pattern).
    ///
    /// Column widths are re-estimated with the new defaults, so call this
    /// before [`mount`](Self::mount).
    pub fn with_layout(mut self, layout: LayoutConfig) -> Self {
        self.columns = build_columns(&self.dataset, &self.options, &layout);
        self.layout = layout;
        self
    }

    /// Sets the container size without scheduling a re-fit (builder pattern).
    pub fn with_container(mut self, width: usize, height: usize) -> Self {
        self.container.width = width;
        self.container.height = height;
        self
    }

    /// Sets the container's horizontal padding (builder pattern).
    pub fn with_container_padding(mut self, padding: usize) -> Self {
        self.container.padding = padding;
        self
    }

    /// Replaces the key bindings (builder pattern).
    pub fn with_keymap(mut self, keymap: PagedTableKeyMap) -> Self {
        self.keymap = keymap;
        self
    }

    /// Unique id used to route messages to this table.
    pub fn id(&self) -> i64 {
        self.id
    }

    /// The shared dataset.
    pub fn dataset(&self) -> &Arc<Dataset> {
        &self.dataset
    }

    /// Options read from the payload.
    pub fn options(&self) -> &TableOptions {
        &self.options
    }

    /// Layout constants.
    pub fn layout(&self) -> &LayoutConfig {
        &self.layout
    }

    /// Pagination state.
    pub fn paginator(&self) -> &paginator::Model {
        &self.paginator
    }

    /// Column window state.
    pub fn columns(&self) -> &ColumnWindow {
        &self.columns
    }

    /// Current container size.
    pub fn container(&self) -> Container {
        self.container
    }

    /// True while the table waits for its container to be laid out.
    pub fn is_hidden(&self) -> bool {
        self.hidden
    }

    /// True once [`mount`](Self::mount) has run and until teardown.
    pub fn is_mounted(&self) -> bool {
        self.mounted && !self.torn_down
    }

    /// True when there are no rows or no columns to lay out.
    pub fn is_empty(&self) -> bool {
        self.dataset.is_empty()
    }

    /// True when the page size follows the container height.
    pub fn auto_page_size(&self) -> bool {
        self.options.rows.is_none()
    }
}

impl PagedTable<TerminalRenderer> {
    /// Creates a terminal table with layout constants in terminal cells.
    pub fn terminal(payload: Payload) -> Self {
        Self::new(payload, TerminalRenderer::new()).with_layout(LayoutConfig::terminal())
    }

    /// Parses a JSON payload into a terminal table.
    ///
    /// # Errors
    ///
    /// Any error from [`Payload::from_json`].
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(Self::terminal(Payload::from_json(json)?))
    }
}

fn build_paginator(dataset: &Dataset, options: &TableOptions) -> paginator::Model {
    paginator::Model::new(dataset.row_count())
        .with_per_page(options.rows.unwrap_or(DEFAULT_ROWS_PER_PAGE))
        .with_max_page_links(options.pages.unwrap_or(DEFAULT_MAX_PAGE_LINKS))
}

fn build_columns(dataset: &Dataset, options: &TableOptions, layout: &LayoutConfig) -> ColumnWindow {
    ColumnWindow::new(dataset, layout).with_bounds(
        Some(options.columns.min.unwrap_or(DEFAULT_MIN_COLUMNS)),
        Some(options.columns.max.unwrap_or(DEFAULT_MAX_COLUMNS)),
    )
}
