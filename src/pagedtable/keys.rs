//! Key bindings for the paged table.

use crate::key::{Binding, KeyMap};
use crate::paginator::PaginatorKeyMap;
use crossterm::event::KeyCode;

/// Key bindings for page and column navigation.
///
/// Page keys come from the paginator; the column keys move the column
/// window one screen at a time.
#[derive(Debug, Clone)]
pub struct PagedTableKeyMap {
    /// Page navigation.
    pub pages: PaginatorKeyMap,
    /// Show the columns left of the window. Default keys: Left, 'h'
    pub prev_columns: Binding,
    /// Show the columns right of the window. Default keys: Right, 'l'
    pub next_columns: Binding,
}

impl Default for PagedTableKeyMap {
    fn default() -> Self {
        Self {
            pages: PaginatorKeyMap::default(),
            prev_columns: Binding::new(vec![KeyCode::Left, KeyCode::Char('h')])
                .with_help("←/h", "prev columns"),
            next_columns: Binding::new(vec![KeyCode::Right, KeyCode::Char('l')])
                .with_help("→/l", "next columns"),
        }
    }
}

impl KeyMap for PagedTableKeyMap {
    fn short_help(&self) -> Vec<&Binding> {
        let mut bindings = self.pages.short_help();
        bindings.push(&self.prev_columns);
        bindings.push(&self.next_columns);
        bindings
    }

    fn full_help(&self) -> Vec<Vec<&Binding>> {
        let mut groups = self.pages.full_help();
        groups.push(vec![&self.prev_columns, &self.next_columns]);
        groups
    }
}
