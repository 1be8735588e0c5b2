//! Render dispatch: hands the fitted layout to the render sink.

use super::model::PagedTable;
use super::render::{
    footer_label, BodyRows, Footer, Frame, HeaderRow, RenderColumn, RenderSink, RowChrome,
};

impl<S: RenderSink> PagedTable<S> {
    /// Renders the table through its sink.
    ///
    /// Only the rows of the current page and the columns of the current
    /// window are handed over.
    pub fn render(&self) -> Frame<S::Element> {
        if self.is_empty() {
            let label = self.footer_label();
            return Frame::Empty(self.renderer.render_empty(self.dataset.columns(), &label));
        }

        let columns = self.render_columns();
        let chrome = self.row_chrome();
        let (start, end) = self.paginator.row_window();

        let header = self.renderer.render_header_row(&HeaderRow {
            columns: &columns,
            chrome,
        });
        let body = self.renderer.render_body_rows(&BodyRows {
            rows: &self.dataset.rows()[start..end],
            first_row: start,
            columns: &columns,
            chrome,
            padding_rows: self.paginator.padding_row_count(),
            missing_display: &self.layout.missing_display,
        });
        let label = self.footer_label();
        let footer = self.renderer.render_footer(&Footer {
            page: self.paginator.page_info(),
            links: self.paginator.visible_page_range(),
            label: &label,
        });

        Frame::Table {
            header,
            body,
            footer,
        }
    }

    /// Footer summary, e.g. `"1-10 of 25 rows | 1-4 of 12 columns"`.
    pub fn footer_label(&self) -> String {
        footer_label(
            &self.paginator.page_info(),
            self.paginator.per_page(),
            (self.columns.offset(), self.columns.visible(), self.columns.total()),
        )
    }

    /// The visible columns with their descriptors and widths.
    pub fn render_columns(&self) -> Vec<RenderColumn<'_>> {
        let max_width = self
            .container
            .width
            .saturating_sub(self.layout.column_max_margin);
        self.columns
            .visible_columns()
            .iter()
            .filter_map(|visible| {
                let descriptor = self.dataset.columns().get(visible.index)?;
                let chars = self
                    .columns
                    .widths()
                    .get(visible.index)
                    .map_or(0, |width| width.chars);
                Some(RenderColumn {
                    index: visible.index,
                    descriptor,
                    chars,
                    width: visible.width,
                    max_width,
                })
            })
            .collect()
    }

    fn row_chrome(&self) -> RowChrome {
        RowChrome {
            hidden_left: self.columns.has_hidden_left(),
            hidden_right: self.columns.has_hidden_right(),
            padding_columns: self.columns.padding(),
            padding_column_width: self.columns.padding_column_width(),
        }
    }
}

impl<S: RenderSink<Element = String>> PagedTable<S> {
    /// Renders the whole table as text.
    ///
    /// A hidden table renders as blank lines of the same height, so the
    /// surrounding layout does not jump once it appears.
    pub fn render_text(&self) -> String {
        let text = match self.render() {
            Frame::Empty(text) => text,
            Frame::Table {
                header,
                body,
                footer,
            } => [header, body, footer].join("\n"),
        };
        if self.hidden {
            vec![""; text.lines().count()].join("\n")
        } else {
            text
        }
    }
}
