//! A [`RenderSink`] that draws the table as styled terminal text.

use super::measure::SampleMeasure;
use super::render::{BodyRows, Footer, HeaderRow, RenderColumn, RenderSink, RowChrome};
use super::source::{Align, Cell, ColumnDescriptor};
use super::style::{TableStyles, ARROW_LEFT, ARROW_RIGHT, ELLIPSIS};
use lipgloss_extras::lipgloss::width as lg_width;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Renders tables as lipgloss-styled strings, one line per table row.
///
/// Widths are taken as terminal cells, so pair it with
/// [`LayoutConfig::terminal`](super::LayoutConfig::terminal). Measuring the
/// sample text through [`RenderSink::measure_sample`] calibrates the table to
/// one cell per character.
#[derive(Debug, Clone, Default)]
pub struct TerminalRenderer {
    /// Styles for every element.
    pub styles: TableStyles,
}

impl TerminalRenderer {
    /// Creates a renderer with default styles.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the styles (builder pattern).
    pub fn with_styles(mut self, styles: TableStyles) -> Self {
        self.styles = styles;
        self
    }

    fn nav_cell(&self, arrow: &str) -> String {
        self.styles.nav_arrow.render(arrow)
    }

    /// Assembles one line: navigation cells around the data cells, then the
    /// padding columns.
    fn line(&self, chrome: &RowChrome, cells: Vec<String>, arrows: (&str, &str)) -> String {
        let mut out = String::new();
        if chrome.hidden_left {
            out.push_str(&self.nav_cell(arrows.0));
        }
        for cell in cells {
            out.push_str(&cell);
        }
        for _ in 0..chrome.padding_columns {
            out.push_str(&" ".repeat(chrome.padding_column_width));
        }
        if chrome.hidden_right {
            out.push_str(&self.nav_cell(arrows.1));
        }
        out
    }

    fn body_line(&self, body: &BodyRows<'_>, row: Option<&[Cell]>) -> String {
        let cells = body
            .columns
            .iter()
            .map(|column| {
                let cell = row.and_then(|cells| cells.get(column.index));
                let style = match cell {
                    Some(cell) if cell.is_missing() => &self.styles.missing_cell,
                    _ => &self.styles.cell,
                };
                let text = cell.map_or("", |cell| cell.display(body.missing_display));
                style.render(&fit_text(text, column.effective_width(), column.descriptor.align))
            })
            .collect();
        self.line(&body.chrome, cells, (" ", " "))
    }
}

impl RenderSink for TerminalRenderer {
    type Element = String;

    fn render_header_row(&self, header: &HeaderRow<'_>) -> String {
        let labels = header
            .columns
            .iter()
            .map(|column| {
                self.styles.header.render(&fit_text(
                    &column.descriptor.label,
                    column.effective_width(),
                    column.descriptor.align,
                ))
            })
            .collect();
        let types = header
            .columns
            .iter()
            .map(|column| {
                self.styles.header_type.render(&fit_text(
                    &type_text(column),
                    column.effective_width(),
                    column.descriptor.align,
                ))
            })
            .collect();

        [
            self.line(&header.chrome, labels, (ARROW_LEFT, ARROW_RIGHT)),
            self.line(&header.chrome, types, (" ", " ")),
        ]
        .join("\n")
    }

    fn render_body_rows(&self, body: &BodyRows<'_>) -> String {
        let mut lines: Vec<String> = body
            .rows
            .iter()
            .map(|row| self.body_line(body, Some(row)))
            .collect();
        for _ in 0..body.padding_rows {
            lines.push(self.body_line(body, None));
        }
        lines.join("\n")
    }

    fn render_footer(&self, footer: &Footer<'_>) -> String {
        let mut parts = Vec::new();
        if footer.page.show_navigation {
            let nav = |enabled: bool, text: &str| {
                if enabled {
                    self.styles.nav_enabled.render(text)
                } else {
                    self.styles.nav_disabled.render(text)
                }
            };
            parts.push(nav(footer.page.prev_enabled, "Previous"));
            for page in footer.links.clone() {
                let number = (page + 1).to_string();
                if page == footer.page.page {
                    parts.push(self.styles.page_link_current.render(&number));
                } else {
                    parts.push(self.styles.page_link.render(&number));
                }
            }
            parts.push(nav(footer.page.next_enabled, "Next"));
        }
        parts.push(self.styles.info.render(footer.label));
        parts.join(" ")
    }

    fn render_empty(&self, columns: &[ColumnDescriptor], label: &str) -> String {
        let mut lines = Vec::new();
        if !columns.is_empty() {
            let labels: Vec<String> = columns
                .iter()
                .map(|column| {
                    self.styles
                        .header
                        .render(&fit_text(&column.label, column.label.width(), column.align))
                })
                .collect();
            lines.push(labels.concat());
        }
        lines.push(self.styles.empty.render(label));
        lines.join("\n")
    }

    fn measure_sample(&self, sample: &str) -> Option<SampleMeasure> {
        let width = lg_width(sample);
        Some(SampleMeasure {
            padding: lg_width(&self.styles.cell.render(sample)).saturating_sub(width),
            width,
        })
    }
}

fn type_text(column: &RenderColumn<'_>) -> String {
    if column.descriptor.type_label.is_empty() {
        String::new()
    } else {
        format!("<{}>", column.descriptor.type_label)
    }
}

/// Fits `text` into exactly `width` cells: control characters become spaces,
/// overlong text is cut with an ellipsis, short text is padded per `align`.
fn fit_text(text: &str, width: usize, align: Align) -> String {
    let text: String = text
        .chars()
        .map(|ch| if ch.is_control() { ' ' } else { ch })
        .collect();
    let shown = if text.width() > width {
        truncate(&text, width)
    } else {
        text
    };

    let gap = width.saturating_sub(shown.width());
    match align {
        Align::Left => format!("{shown}{}", " ".repeat(gap)),
        Align::Right => format!("{}{shown}", " ".repeat(gap)),
        Align::Center => {
            let left = gap / 2;
            format!("{}{shown}{}", " ".repeat(left), " ".repeat(gap - left))
        }
    }
}

fn truncate(text: &str, width: usize) -> String {
    if width == 0 {
        return String::new();
    }
    let budget = width - ELLIPSIS.width();
    let mut out = String::new();
    let mut used = 0;
    for ch in text.chars() {
        let w = ch.width().unwrap_or(0);
        if used + w > budget {
            break;
        }
        used += w;
        out.push(ch);
    }
    out.push_str(ELLIPSIS);
    out
}
