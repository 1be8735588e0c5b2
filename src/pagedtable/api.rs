//! Table lifecycle: mounting, fitting, resizing, navigation and teardown.
//!
//! Deferred work (retries while the container has no width, resize quiet
//! periods) is scheduled as bubbletea tick commands carrying the table id and
//! a generation tag. A message whose tag is stale, whose id belongs to
//! another table, or that arrives after teardown is ignored.

use super::events::{
    ChangeCause, NavigateMsg, Navigation, ResizeCheckMsg, RetryFitMsg, SubscriptionId, TableChange,
};
use super::fit::{fit_columns, Direction, FitOutcome, FitRequest};
use super::model::PagedTable;
use super::render::RenderSink;
use bubbletea_rs::{tick as bubbletea_tick, Cmd, KeyMsg, Msg, WindowSizeMsg};

impl<S: RenderSink> PagedTable<S> {
    /// Lays the table out for the first time.
    ///
    /// An empty table is shown as is. When the container has no width yet,
    /// the table is fitted at full width but kept hidden, and a retry is
    /// scheduled; the returned command delivers it.
    pub fn mount(&mut self) -> Option<Cmd> {
        if self.torn_down {
            return None;
        }
        self.mounted = true;
        self.calibrate();

        if self.is_empty() {
            self.hidden = false;
            self.notify(ChangeCause::Mount);
            return None;
        }

        self.fit(Direction::Forward);
        self.notify(ChangeCause::Mount);

        if self.container.width == 0 {
            self.hidden = true;
            self.retries_left = self.layout.retry_attempts;
            self.retry_tag += 1;
            return self.schedule_retry();
        }
        None
    }

    /// Runs the column fit against the current container and updates the
    /// page size and page links to match.
    ///
    /// Returns `None` for an empty table, which has nothing to fit.
    pub fn fit(&mut self, direction: Direction) -> Option<FitOutcome> {
        self.fit_from(direction, None)
    }

    /// Like [`fit`](Self::fit), but the search starts at column `start`
    /// instead of the current offset.
    fn fit_from(&mut self, direction: Direction, start: Option<usize>) -> Option<FitOutcome> {
        if self.is_empty() {
            return None;
        }
        self.calibrate();
        if self.container.width > 0 {
            self.hidden = false;
        }

        let outcome = fit_columns(
            &mut self.columns,
            FitRequest {
                container_width: self.container.width,
                container_padding: self.container.padding,
                direction,
                start_offset: start,
                max_attempts: self.layout.max_fit_attempts,
            },
        );

        self.adjust_page_size();
        if self.container.width > 0 {
            let links = self
                .container
                .width
                .saturating_sub(self.layout.footer_reserve)
                .div_ceil(self.layout.page_link_width.max(1))
                .max(2);
            self.paginator.set_visible_page_links(links);
        }
        self.columns.register_widths();
        self.last_fit = Some(self.container);
        Some(outcome)
    }

    /// Replaces the default width measurement with the renderer's, once.
    fn calibrate(&mut self) {
        let sample = &self.layout.sample_text;
        let Some(measure) = self.renderer.measure_sample(sample) else {
            return;
        };
        let mut measurement = self.columns.measurement();
        if measurement.calibrate(measure.padding, measure.width, sample.chars().count()) {
            self.columns.estimate_widths(&self.dataset, measurement);
        }
    }

    /// Derives the page size from the container height, unless the payload
    /// pinned it.
    fn adjust_page_size(&mut self) {
        if !self.auto_page_size() || self.container.height == 0 {
            return;
        }
        let rows = self
            .container
            .height
            .saturating_sub(self.layout.vertical_chrome)
            .div_ceil(self.layout.row_height.max(1))
            .max(self.layout.min_page_size);
        self.paginator.set_per_page(rows);
    }

    fn schedule_retry(&self) -> Option<Cmd> {
        if self.retries_left == 0 {
            tracing::warn!(id = self.id, "container never got a width, keeping fallback layout");
            return None;
        }
        let id = self.id;
        let tag = self.retry_tag;
        Some(bubbletea_tick(self.layout.retry_delay(), move |_| {
            Box::new(RetryFitMsg { id, tag }) as Msg
        }))
    }

    fn handle_retry(&mut self, msg: &RetryFitMsg) -> Option<Cmd> {
        if self.torn_down || !self.hidden || msg.id != self.id || msg.tag != self.retry_tag {
            return None;
        }
        self.retries_left = self.retries_left.saturating_sub(1);

        if self.container.width == 0 {
            tracing::debug!(
                id = self.id,
                retries_left = self.retries_left,
                "container still unmeasured"
            );
            return self.schedule_retry();
        }

        tracing::debug!(id = self.id, width = self.container.width, "deferred fit");
        self.fit(Direction::Forward);
        self.notify(ChangeCause::Retry);
        None
    }

    /// Records a new container size and starts a quiet period.
    ///
    /// Every call restarts the quiet period; only the check scheduled by the
    /// last call takes effect, and only if the size differs from the one the
    /// last fit used.
    pub fn observe_resize(&mut self, width: usize, height: usize) -> Option<Cmd> {
        if self.torn_down {
            return None;
        }
        self.container.width = width;
        self.container.height = height;
        self.resize_tag += 1;

        let id = self.id;
        let tag = self.resize_tag;
        Some(bubbletea_tick(self.layout.debounce(), move |_| {
            Box::new(ResizeCheckMsg { id, tag }) as Msg
        }))
    }

    fn handle_resize_check(&mut self, msg: &ResizeCheckMsg) -> bool {
        if msg.id != self.id || msg.tag != self.resize_tag {
            return false;
        }
        self.refit_if_resized()
    }

    /// True when the container changed since the last fit in a way that
    /// affects the layout.
    pub fn needs_refit(&self) -> bool {
        if self.is_empty() {
            return false;
        }
        match self.last_fit {
            None => true,
            Some(last) => {
                last.width != self.container.width
                    || last.padding != self.container.padding
                    || (self.auto_page_size() && last.height != self.container.height)
            }
        }
    }

    /// Re-fits a mounted table whose container changed. Returns true when a
    /// fit ran.
    pub fn refit_if_resized(&mut self) -> bool {
        if !self.is_mounted() || !self.needs_refit() {
            return false;
        }
        tracing::debug!(
            id = self.id,
            width = self.container.width,
            height = self.container.height,
            "container resized"
        );
        self.fit(Direction::Forward);
        self.notify(ChangeCause::Resize);
        true
    }

    /// Applies a navigation request. Out-of-range requests are clamped and a
    /// request in a direction with nothing left to show is a no-op.
    ///
    /// Returns true when the page or the column window changed.
    pub fn navigate(&mut self, navigation: Navigation) -> bool {
        if self.torn_down {
            return false;
        }
        let before = (self.paginator.page, self.columns.slice());

        match navigation {
            Navigation::NextPage => self.paginator.next_page(),
            Navigation::PrevPage => self.paginator.prev_page(),
            Navigation::Page(n) => self.paginator.set_page_number(n),
            Navigation::FirstPage => self.paginator.set_page_number(0),
            Navigation::LastPage => {
                let last = self.paginator.page_count() - 1;
                self.paginator.set_page_number(last);
            }
            Navigation::ColumnsRight => self.columns_right(),
            Navigation::ColumnsLeft => self.columns_left(),
        }

        let changed = before != (self.paginator.page, self.columns.slice());
        if changed {
            self.notify(ChangeCause::Navigation(navigation));
        }
        changed
    }

    /// Moves to page `n`, clamped into range.
    pub fn goto_page(&mut self, n: usize) -> bool {
        self.navigate(Navigation::Page(n))
    }

    fn columns_right(&mut self) {
        if self.is_empty() || !self.columns.has_hidden_right() {
            return;
        }
        let slice = self.columns.slice();
        self.fit_from(Direction::Forward, Some(slice.offset + slice.visible));
    }

    fn columns_left(&mut self) {
        if self.is_empty() || !self.columns.has_hidden_left() {
            return;
        }
        let offset = self.columns.offset();
        self.fit_from(Direction::Backward, Some(offset - 1));
    }

    /// Shifts the column window by `delta` columns without re-fitting.
    ///
    /// Returns true when the window moved.
    pub fn scroll_columns(&mut self, delta: isize) -> bool {
        if self.torn_down || self.is_empty() {
            return false;
        }
        let before = self.columns.offset();
        self.columns.scroll(delta);
        self.columns.register_widths();
        let moved = self.columns.offset() != before;
        if moved {
            self.notify(ChangeCause::Scroll);
        }
        moved
    }

    /// Detaches the table. Pending retries and resize checks become no-ops
    /// and observers are dropped.
    pub fn teardown(&mut self) {
        self.torn_down = true;
        self.mounted = false;
        self.retries_left = 0;
        self.retry_tag += 1;
        self.resize_tag += 1;
        self.observers = Default::default();
        tracing::debug!(id = self.id, "table torn down");
    }

    /// Registers a change observer. Observers run synchronously, in
    /// registration order, after every mount, fit-triggering event and
    /// navigation that changed the layout.
    pub fn on_change<F>(&mut self, callback: F) -> SubscriptionId
    where
        F: FnMut(&TableChange) + Send + 'static,
    {
        self.observers.subscribe(Box::new(callback))
    }

    /// Removes an observer. Returns false if it was not registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.observers.unsubscribe(id)
    }

    /// Number of registered observers.
    pub fn observer_count(&self) -> usize {
        self.observers.len()
    }

    /// Current layout as a change snapshot.
    pub fn snapshot(&self, cause: ChangeCause) -> TableChange {
        let (row_start, row_end) = self.paginator.row_window();
        let slice = self.columns.slice();
        TableChange {
            cause,
            page: self.paginator.page,
            page_count: self.paginator.page_count(),
            per_page: self.paginator.per_page(),
            row_start,
            row_end,
            column_offset: slice.offset,
            visible_columns: slice.visible,
            padding_columns: slice.padding,
            total_columns: self.columns.total(),
        }
    }

    fn notify(&mut self, cause: ChangeCause) {
        let change = self.snapshot(cause);
        self.observers.notify(&change);
    }

    fn key_navigation(&self, key: &KeyMsg) -> Option<Navigation> {
        let keymap = &self.keymap;
        if keymap.pages.next_page.matches(key) {
            Some(Navigation::NextPage)
        } else if keymap.pages.prev_page.matches(key) {
            Some(Navigation::PrevPage)
        } else if keymap.pages.first_page.matches(key) {
            Some(Navigation::FirstPage)
        } else if keymap.pages.last_page.matches(key) {
            Some(Navigation::LastPage)
        } else if keymap.next_columns.matches(key) {
            Some(Navigation::ColumnsRight)
        } else if keymap.prev_columns.matches(key) {
            Some(Navigation::ColumnsLeft)
        } else {
            None
        }
    }

    /// Routes a bubbletea message to the table.
    ///
    /// - `WindowSizeMsg` starts a resize quiet period.
    /// - `RetryFitMsg` and `ResizeCheckMsg` run the deferred work they stand for.
    /// - `NavigateMsg` navigates when addressed to this table (or to id 0).
    /// - `KeyMsg` navigates through the keymap, only while focused.
    pub fn handle_msg(&mut self, msg: &Msg) -> Option<Cmd> {
        if let Some(size) = msg.downcast_ref::<WindowSizeMsg>() {
            return self.observe_resize(size.width as usize, size.height as usize);
        }
        if let Some(retry) = msg.downcast_ref::<RetryFitMsg>() {
            return self.handle_retry(retry);
        }
        if let Some(check) = msg.downcast_ref::<ResizeCheckMsg>() {
            self.handle_resize_check(check);
            return None;
        }
        if let Some(nav) = msg.downcast_ref::<NavigateMsg>() {
            if nav.id == 0 || nav.id == self.id {
                self.navigate(nav.navigation);
            }
            return None;
        }
        if self.focus {
            if let Some(navigation) = msg
                .downcast_ref::<KeyMsg>()
                .and_then(|key| self.key_navigation(key))
            {
                self.navigate(navigation);
            }
        }
        None
    }
}
