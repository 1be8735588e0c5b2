//! Messages the table reacts to and the change notifications it emits.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::atomic::{AtomicI64, Ordering};

static LAST_ID: AtomicI64 = AtomicI64::new(0);

/// Unique id for a new table instance, starting from 1.
pub(super) fn next_id() -> i64 {
    LAST_ID.fetch_add(1, Ordering::SeqCst) + 1
}

/// A navigation request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Navigation {
    /// Next page of rows.
    NextPage,
    /// Previous page of rows.
    PrevPage,
    /// A specific page, 0-indexed; clamped into range.
    Page(usize),
    /// First page of rows.
    FirstPage,
    /// Last page of rows.
    LastPage,
    /// Slide the column window past the visible columns.
    ColumnsRight,
    /// Pull hidden columns in from the left.
    ColumnsLeft,
}

/// Programmatic navigation, e.g. from a page-link click.
///
/// An `id` of 0 addresses every table; otherwise only the table with that
/// id reacts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavigateMsg {
    /// Target table id, or 0 for any table.
    pub id: i64,
    /// What to do.
    pub navigation: Navigation,
}

/// Deferred fit attempt while the container has no width yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryFitMsg {
    /// Table the retry belongs to.
    pub id: i64,
    pub(super) tag: i64,
}

/// End of a resize quiet period.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResizeCheckMsg {
    /// Table the check belongs to.
    pub id: i64,
    pub(super) tag: i64,
}

/// What caused a [`TableChange`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeCause {
    /// Initial layout.
    Mount,
    /// A deferred fit after the container got its width.
    Retry,
    /// A re-fit after the container was resized.
    Resize,
    /// A navigation request.
    Navigation(Navigation),
    /// A raw column scroll.
    Scroll,
}

/// Snapshot of the table layout handed to change observers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableChange {
    /// What triggered the change.
    pub cause: ChangeCause,
    /// Current page, 0-indexed.
    pub page: usize,
    /// Number of pages.
    pub page_count: usize,
    /// Rows per page.
    pub per_page: usize,
    /// First row shown (inclusive).
    pub row_start: usize,
    /// Last row shown (exclusive).
    pub row_end: usize,
    /// First visible column.
    pub column_offset: usize,
    /// Number of visible data columns.
    pub visible_columns: usize,
    /// Number of padding columns.
    pub padding_columns: usize,
    /// Number of columns in the dataset.
    pub total_columns: usize,
}

/// Handle returned by [`on_change`](super::PagedTable::on_change).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SubscriptionId(u64);

type Callback = Box<dyn FnMut(&TableChange) + Send>;

/// Registered change observers, notified in registration order.
#[derive(Default)]
pub(super) struct Observers {
    next: u64,
    callbacks: BTreeMap<u64, Callback>,
}

impl Observers {
    pub(super) fn subscribe(&mut self, callback: Callback) -> SubscriptionId {
        let id = self.next;
        self.next += 1;
        self.callbacks.insert(id, callback);
        SubscriptionId(id)
    }

    pub(super) fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.callbacks.remove(&id.0).is_some()
    }

    pub(super) fn notify(&mut self, change: &TableChange) {
        for callback in self.callbacks.values_mut() {
            callback(change);
        }
    }

    pub(super) fn len(&self) -> usize {
        self.callbacks.len()
    }
}

impl fmt::Debug for Observers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Observers")
            .field("count", &self.callbacks.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    fn change() -> TableChange {
        TableChange {
            cause: ChangeCause::Mount,
            page: 0,
            page_count: 1,
            per_page: 10,
            row_start: 0,
            row_end: 0,
            column_offset: 0,
            visible_columns: 0,
            padding_columns: 0,
            total_columns: 0,
        }
    }

    #[test]
    fn test_ids_are_unique() {
        let a = next_id();
        let b = next_id();
        assert!(a > 0);
        assert_ne!(a, b);
    }

    #[test]
    fn test_observers_run_in_registration_order() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let mut observers = Observers::default();
        for n in 0..3 {
            let seen = Arc::clone(&seen);
            observers.subscribe(Box::new(move |_| seen.lock().unwrap().push(n)));
        }
        observers.notify(&change());
        assert_eq!(*seen.lock().unwrap(), vec![0, 1, 2]);
    }

    #[test]
    fn test_unsubscribe_by_handle() {
        let seen = Arc::new(Mutex::new(0));
        let mut observers = Observers::default();
        let counter = Arc::clone(&seen);
        let id = observers.subscribe(Box::new(move |_| *counter.lock().unwrap() += 1));

        assert!(observers.unsubscribe(id));
        assert!(!observers.unsubscribe(id));
        observers.notify(&change());
        assert_eq!(*seen.lock().unwrap(), 0);
        assert_eq!(observers.len(), 0);
    }
}
