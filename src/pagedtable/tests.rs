//! Tests for the paged table component.

use super::*;
use crate::Component;
use bubbletea_rs::{Model as BubbleTeaModel, Msg};
use crossterm::event::{KeyCode, KeyModifiers};
use lipgloss_extras::lipgloss;
use std::sync::{Arc, Mutex};

/// `columns` columns labelled `col_0001`, `col_0002`, ... (8 characters, so
/// 10 cells wide with padding) over `rows` rows of short values.
fn wide_payload(columns: usize, rows: usize) -> Payload {
    let descriptors = (0..columns)
        .map(|c| ColumnDescriptor::new(format!("col_{:04}", c + 1)).with_type("chr"))
        .collect();
    let rows = (0..rows)
        .map(|r| (0..columns).map(|c| Cell::from_raw(&format!("{r}.{c}"))).collect())
        .collect();
    Payload {
        dataset: Dataset::new(descriptors, rows),
        options: TableOptions::default(),
    }
}

fn with_options(mut payload: Payload, options: TableOptions) -> Payload {
    payload.options = options;
    payload
}

fn bounds(min: usize, max: usize) -> TableOptions {
    TableOptions {
        columns: ColumnOptions {
            min: Some(min),
            max: Some(max),
        },
        ..TableOptions::default()
    }
}

fn mounted(payload: Payload, width: usize) -> PagedTable {
    let mut table = PagedTable::terminal(payload).with_container(width, 0);
    table.mount();
    table
}

fn record_changes(table: &mut PagedTable) -> Arc<Mutex<Vec<TableChange>>> {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&seen);
    table.on_change(move |change| sink.lock().unwrap().push(*change));
    seen
}

fn key(code: KeyCode) -> Msg {
    Box::new(bubbletea_rs::KeyMsg {
        key: code,
        modifiers: KeyModifiers::NONE,
    })
}

/// Headless sink with a fixed sample measurement.
#[derive(Debug, Default)]
struct FixedSink {
    sample: Option<SampleMeasure>,
}

impl RenderSink for FixedSink {
    type Element = Vec<String>;

    fn render_header_row(&self, header: &HeaderRow<'_>) -> Vec<String> {
        header
            .columns
            .iter()
            .map(|column| column.descriptor.label.clone())
            .collect()
    }

    fn render_body_rows(&self, body: &BodyRows<'_>) -> Vec<String> {
        let mut lines: Vec<String> = body
            .rows
            .iter()
            .map(|row| {
                body.columns
                    .iter()
                    .map(|column| row[column.index].display(body.missing_display))
                    .collect::<Vec<_>>()
                    .join("|")
            })
            .collect();
        lines.extend(std::iter::repeat(String::new()).take(body.padding_rows));
        lines
    }

    fn render_footer(&self, footer: &Footer<'_>) -> Vec<String> {
        let mut parts: Vec<String> = footer.links.clone().map(|p| (p + 1).to_string()).collect();
        parts.push(footer.label.to_string());
        parts
    }

    fn render_empty(&self, _columns: &[ColumnDescriptor], label: &str) -> Vec<String> {
        vec![label.to_string()]
    }

    fn measure_sample(&self, _sample: &str) -> Option<SampleMeasure> {
        self.sample
    }
}

#[test]
fn test_twenty_five_rows_make_three_pages() {
    let payload = with_options(
        wide_payload(3, 25),
        TableOptions {
            rows: Some(10),
            ..TableOptions::default()
        },
    );
    let mut table = mounted(payload, 200);
    assert_eq!(table.paginator().page_count(), 3);
    assert_eq!(table.paginator().row_window(), (0, 10));

    table.goto_page(2);
    assert_eq!(table.paginator().row_window(), (20, 25));
    assert_eq!(table.paginator().padding_row_count(), 5);

    // 5 data rows plus 5 filler rows keep the body ten lines tall.
    match table.render() {
        Frame::Table { body, .. } => assert_eq!(body.lines().count(), 10),
        Frame::Empty(_) => panic!("expected a table"),
    }
    assert_eq!(table.footer_label(), "21-25 of 25 rows");
}

#[test]
fn test_twelve_columns_fit_four_then_slide_right() {
    let mut table = mounted(with_options(wide_payload(12, 5), bounds(3, 8)), 50);
    assert_eq!(table.columns().slice(), ColumnSlice { offset: 0, visible: 4, padding: 0 });

    assert!(table.navigate(Navigation::ColumnsRight));
    let slice = table.columns().slice();
    assert_eq!(slice.offset, 4);
    assert!(slice.offset + slice.visible <= 12);

    assert!(table.navigate(Navigation::ColumnsRight));
    assert_eq!(table.columns().slice(), ColumnSlice { offset: 8, visible: 4, padding: 0 });

    // Nothing hidden on the right anymore.
    assert!(!table.navigate(Navigation::ColumnsRight));
}

#[test]
fn test_columns_right_starts_at_first_hidden_column() {
    // Columns 8 and 9 are 22 cells wide with padding, the rest 4.
    let descriptors = (0..12)
        .map(|c| {
            let label = if c == 8 || c == 9 { "w".repeat(20) } else { "nn".to_string() };
            ColumnDescriptor::new(format!("c{c}")).with_label(label)
        })
        .collect();
    let payload = Payload {
        dataset: Dataset::new(descriptors, vec![vec![Cell::from_raw("v"); 12]]),
        options: bounds(1, 10),
    };
    let mut table = mounted(payload, 56);
    assert_eq!(table.columns().slice(), ColumnSlice { offset: 0, visible: 8, padding: 0 });

    assert!(table.navigate(Navigation::ColumnsRight));
    let slice = table.columns().slice();
    assert_eq!(slice, ColumnSlice { offset: 8, visible: 4, padding: 0 });
    assert!(!table.columns().has_hidden_right());
}

#[test]
fn test_columns_left_ends_where_the_window_started() {
    let mut table = mounted(with_options(wide_payload(12, 5), bounds(3, 8)), 50);
    table.navigate(Navigation::ColumnsRight);
    table.navigate(Navigation::ColumnsRight);

    assert!(table.navigate(Navigation::ColumnsLeft));
    assert_eq!(table.columns().slice(), ColumnSlice { offset: 4, visible: 4, padding: 0 });
    assert!(table.navigate(Navigation::ColumnsLeft));
    assert_eq!(table.columns().offset(), 0);
    assert!(!table.navigate(Navigation::ColumnsLeft));
}

#[test]
fn test_max_one_column() {
    let table = mounted(with_options(wide_payload(12, 5), bounds(1, 1)), 10_000);
    assert_eq!(table.columns().visible(), 1);
    assert_eq!(table.render_columns().len(), 1);
}

#[test]
fn test_empty_tables_skip_fitting() {
    let no_rows = Payload {
        dataset: Dataset::new(vec![ColumnDescriptor::new("a")], vec![]),
        options: TableOptions::default(),
    };
    let no_columns = Payload {
        dataset: Dataset::new(vec![], vec![vec![], vec![]]),
        options: TableOptions::default(),
    };

    for payload in [no_rows, no_columns, Payload::default()] {
        let mut table = PagedTable::terminal(payload).with_container(80, 40);
        assert!(table.mount().is_none());
        assert!(table.fit(Direction::Forward).is_none());
        assert!(!table.is_hidden());
        assert_eq!(table.paginator().page_count(), 1);
        assert_eq!(table.paginator().page, 0);
        assert!(!table.navigate(Navigation::NextPage));
        assert!(!table.navigate(Navigation::ColumnsRight));
        assert!(matches!(table.render(), Frame::Empty(_)));
    }
}

#[test]
fn test_empty_table_view_shows_labels() {
    let payload = Payload {
        dataset: Dataset::new(vec![ColumnDescriptor::new("mpg")], vec![]),
        options: TableOptions::default(),
    };
    let table = mounted(payload, 80);
    let view = lipgloss::strip_ansi(&table.render_text());
    assert!(view.contains("mpg"));
    assert!(view.contains("0 rows"));
}

#[test]
fn test_refit_is_idempotent() {
    for width in [0, 15, 50, 120, 400] {
        let mut table = mounted(with_options(wide_payload(12, 5), bounds(3, 8)), width);
        let first = table.columns().slice();
        table.fit(Direction::Forward);
        assert_eq!(table.columns().slice(), first, "width={width}");
    }
}

#[test]
fn test_calibration_happens_once() {
    let sink = FixedSink {
        sample: Some(SampleMeasure {
            padding: 4,
            width: 40,
        }),
    };
    let mut table = PagedTable::new(wide_payload(3, 3), sink).with_container(1_000, 0);
    table.mount();
    let measurement = table.columns().measurement();
    assert!(!measurement.is_default);
    assert_eq!(measurement.char_width, 2);
    assert_eq!(table.columns().widths()[0].outer, 8 * 2 + 4);

    table.renderer.sample = Some(SampleMeasure {
        padding: 10,
        width: 200,
    });
    table.fit(Direction::Forward);
    assert_eq!(table.columns().measurement(), measurement);
}

#[test]
fn test_unmeasurable_sink_keeps_defaults() {
    let mut table =
        PagedTable::new(wide_payload(3, 3), FixedSink::default()).with_container(1_000, 0);
    table.mount();
    assert!(table.columns().measurement().is_default);
    assert_eq!(table.columns().measurement().char_width, LayoutConfig::default().char_width);
}

#[test]
fn test_fixed_sink_sees_only_the_current_page_and_window() {
    let payload = with_options(
        wide_payload(12, 25),
        TableOptions {
            rows: Some(10),
            pages: Some(3),
            columns: ColumnOptions {
                min: Some(1),
                max: Some(2),
            },
        },
    );
    let sink = FixedSink {
        sample: Some(SampleMeasure {
            padding: 2,
            width: 20,
        }),
    };
    let mut table = PagedTable::new(payload, sink)
        .with_layout(LayoutConfig::terminal())
        .with_container(200, 0);
    table.mount();
    table.goto_page(1);

    let Frame::Table {
        header,
        body,
        footer,
    } = table.render()
    else {
        panic!("expected a table");
    };
    assert_eq!(header, vec!["col_0001", "col_0002"]);
    assert_eq!(body.len(), 10);
    assert_eq!(body[0], "10.0|10.1");
    assert_eq!(footer, vec!["1", "2", "3", "11-20 of 25 rows | 1-2 of 12 columns"]);
}

#[test]
fn test_unmeasured_container_renders_hidden_at_full_width() {
    let mut table = PagedTable::terminal(with_options(wide_payload(12, 5), bounds(3, 8)));
    let cmd = table.mount();
    assert!(cmd.is_some());
    assert!(table.is_hidden());
    assert_eq!(table.columns().visible(), 8);

    let view = table.render_text();
    assert!(!view.is_empty());
    assert!(view.lines().all(str::is_empty));
}

#[test]
fn test_retry_fits_once_container_has_width() {
    let mut table = PagedTable::terminal(with_options(wide_payload(12, 5), bounds(3, 8)));
    table.mount();
    let changes = record_changes(&mut table);

    let retry = RetryFitMsg {
        id: table.id(),
        tag: table.retry_tag,
    };
    // Still unmeasured: schedule another attempt.
    assert!(table.handle_msg(&(Box::new(retry) as Msg)).is_some());
    assert!(table.is_hidden());

    table.container.width = 50;
    assert!(table.handle_msg(&(Box::new(retry) as Msg)).is_none());
    assert!(!table.is_hidden());
    assert_eq!(table.columns().visible(), 4);

    let changes = changes.lock().unwrap();
    assert_eq!(changes.len(), 1);
    assert_eq!(changes[0].cause, ChangeCause::Retry);
}

#[test]
fn test_retries_are_bounded() {
    let mut layout = LayoutConfig::terminal();
    layout.retry_attempts = 2;
    let mut table = PagedTable::terminal(wide_payload(3, 3)).with_layout(layout);
    assert!(table.mount().is_some());

    let retry: Msg = Box::new(RetryFitMsg {
        id: table.id(),
        tag: table.retry_tag,
    });
    assert!(table.handle_msg(&retry).is_some());
    assert!(table.handle_msg(&retry).is_none());
    assert!(table.is_hidden());
}

#[test]
fn test_foreign_and_stale_retries_are_ignored() {
    let mut table = PagedTable::terminal(wide_payload(3, 3));
    table.mount();
    let stale: Msg = Box::new(RetryFitMsg {
        id: table.id(),
        tag: table.retry_tag - 1,
    });
    let foreign: Msg = Box::new(RetryFitMsg {
        id: table.id() + 1_000,
        tag: table.retry_tag,
    });
    assert!(table.handle_msg(&stale).is_none());
    assert!(table.handle_msg(&foreign).is_none());
    assert_eq!(table.retries_left, table.layout().retry_attempts);
}

#[test]
fn test_resize_is_debounced() {
    let mut table = mounted(with_options(wide_payload(12, 5), bounds(3, 8)), 50);
    let changes = record_changes(&mut table);

    assert!(table.observe_resize(80, 0).is_some());
    let first = ResizeCheckMsg {
        id: table.id(),
        tag: table.resize_tag,
    };
    table.observe_resize(100, 0);
    let second = ResizeCheckMsg {
        id: table.id(),
        tag: table.resize_tag,
    };

    table.handle_msg(&(Box::new(first) as Msg));
    assert!(changes.lock().unwrap().is_empty());

    table.handle_msg(&(Box::new(second) as Msg));
    assert_eq!(changes.lock().unwrap().len(), 1);
    assert_eq!(changes.lock().unwrap()[0].cause, ChangeCause::Resize);
    assert_eq!(table.columns().visible(), 8);

    // Same size again: nothing to do.
    table.observe_resize(100, 0);
    let third = ResizeCheckMsg {
        id: table.id(),
        tag: table.resize_tag,
    };
    table.handle_msg(&(Box::new(third) as Msg));
    assert_eq!(changes.lock().unwrap().len(), 1);
}

#[test]
fn test_height_drives_page_size_unless_rows_pinned() {
    let mut table = mounted(wide_payload(3, 100), 200);
    assert_eq!(table.paginator().per_page(), 10);
    table.observe_resize(200, 25);
    assert!(table.refit_if_resized());
    // ceil((25 - 5) / 1) rows.
    assert_eq!(table.paginator().per_page(), 20);

    table.observe_resize(200, 6);
    assert!(table.refit_if_resized());
    assert_eq!(table.paginator().per_page(), 2);

    let pinned = with_options(
        wide_payload(3, 100),
        TableOptions {
            rows: Some(7),
            ..TableOptions::default()
        },
    );
    let mut table = mounted(pinned, 200);
    table.observe_resize(200, 40);
    assert!(!table.refit_if_resized());
    assert_eq!(table.paginator().per_page(), 7);
}

#[test]
fn test_page_links_follow_container_width() {
    let payload = with_options(
        wide_payload(3, 500),
        TableOptions {
            pages: Some(20),
            ..TableOptions::default()
        },
    );
    // (70 - 30) / 4 = 10 links.
    let table = mounted(payload, 70);
    assert_eq!(table.paginator().visible_page_links(), 10);

    let payload = with_options(
        wide_payload(3, 500),
        TableOptions {
            pages: Some(20),
            ..TableOptions::default()
        },
    );
    // Narrow containers still get two links.
    let table = mounted(payload, 20);
    assert_eq!(table.paginator().visible_page_links(), 2);
}

#[test]
fn test_teardown_cancels_pending_work() {
    let mut table = PagedTable::terminal(wide_payload(3, 30));
    table.mount();
    let changes = record_changes(&mut table);
    let retry: Msg = Box::new(RetryFitMsg {
        id: table.id(),
        tag: table.retry_tag,
    });
    table.observe_resize(80, 0);
    let check: Msg = Box::new(ResizeCheckMsg {
        id: table.id(),
        tag: table.resize_tag,
    });

    table.teardown();
    assert!(!table.is_mounted());
    assert!(table.handle_msg(&retry).is_none());
    assert!(table.handle_msg(&check).is_none());
    assert!(table.observe_resize(90, 0).is_none());
    assert!(!table.navigate(Navigation::NextPage));
    assert!(table.mount().is_none());
    assert!(changes.lock().unwrap().is_empty());
    assert_eq!(table.observer_count(), 0);
}

#[test]
fn test_observers_notified_in_order_and_unsubscribed() {
    let mut table = mounted(wide_payload(3, 30), 200);
    let order = Arc::new(Mutex::new(Vec::new()));
    let mut ids = Vec::new();
    for n in 0..3 {
        let order = Arc::clone(&order);
        ids.push(table.on_change(move |_| order.lock().unwrap().push(n)));
    }

    table.navigate(Navigation::NextPage);
    assert_eq!(*order.lock().unwrap(), vec![0, 1, 2]);

    assert!(table.unsubscribe(ids[1]));
    assert!(!table.unsubscribe(ids[1]));
    table.navigate(Navigation::NextPage);
    assert_eq!(*order.lock().unwrap(), vec![0, 1, 2, 0, 2]);

    // No change, no notification.
    table.navigate(Navigation::NextPage);
    assert_eq!(order.lock().unwrap().len(), 5);
}

#[test]
fn test_change_snapshot_describes_layout() {
    let mut table = mounted(with_options(wide_payload(12, 25), bounds(3, 8)), 50);
    let changes = record_changes(&mut table);
    table.navigate(Navigation::LastPage);

    let change = changes.lock().unwrap()[0];
    assert_eq!(change.cause, ChangeCause::Navigation(Navigation::LastPage));
    assert_eq!(change.page, 2);
    assert_eq!((change.row_start, change.row_end), (20, 25));
    assert_eq!(change.visible_columns, 4);
    assert_eq!(change.total_columns, 12);
}

#[test]
fn test_keys_navigate_only_while_focused() {
    let mut table = mounted(with_options(wide_payload(12, 30), bounds(3, 8)), 50);
    table.handle_msg(&key(KeyCode::PageDown));
    assert_eq!(table.paginator().page, 0);

    table.focus();
    assert!(table.focused());
    table.handle_msg(&key(KeyCode::PageDown));
    assert_eq!(table.paginator().page, 1);
    table.handle_msg(&key(KeyCode::End));
    assert_eq!(table.paginator().page, 2);
    table.handle_msg(&key(KeyCode::Char('l')));
    assert_eq!(table.columns().offset(), 4);
    table.handle_msg(&key(KeyCode::Left));
    assert_eq!(table.columns().offset(), 0);

    table.blur();
    table.handle_msg(&key(KeyCode::Home));
    assert_eq!(table.paginator().page, 2);
}

#[test]
fn test_navigate_msg_routing() {
    let mut table = mounted(wide_payload(3, 30), 200);
    let other: Msg = Box::new(NavigateMsg {
        id: table.id() + 1_000,
        navigation: Navigation::NextPage,
    });
    table.handle_msg(&other);
    assert_eq!(table.paginator().page, 0);

    let any: Msg = Box::new(NavigateMsg {
        id: 0,
        navigation: Navigation::Page(99),
    });
    table.handle_msg(&any);
    assert_eq!(table.paginator().page, 2);
}

#[test]
fn test_scroll_columns_moves_without_fitting() {
    let mut table = mounted(with_options(wide_payload(12, 5), bounds(3, 8)), 50);
    assert!(table.scroll_columns(2));
    assert_eq!(table.columns().slice(), ColumnSlice { offset: 2, visible: 4, padding: 0 });
    assert!(table.scroll_columns(100));
    assert_eq!(table.columns().offset(), 8);
    assert!(!table.scroll_columns(1));
}

#[test]
fn test_terminal_view() {
    let json = r#"{
        "data": [
            {"car": "Mazda RX4", "mpg": "21.000", "note": "NA"},
            {"car": "Datsun 710", "mpg": "22.800", "note": "__NA__"}
        ],
        "columns": [
            {"name": "car", "label": "car", "type": "chr"},
            {"name": "mpg", "label": "mpg", "type": "dbl", "align": "right"},
            {"name": "note", "label": "note", "type": ""}
        ]
    }"#;
    let mut table = PagedTable::from_json(json).unwrap().with_container(80, 0);
    table.mount();

    let view = lipgloss::strip_ansi(&table.render_text());
    let lines: Vec<&str> = view.lines().collect();
    assert!(lines[0].contains("car"));
    assert!(lines[0].contains("mpg"));
    assert!(lines[1].contains("<chr>"));
    assert!(lines[1].contains("<dbl>"));
    assert!(lines[2].contains("Mazda RX4"));
    assert!(lines[2].contains("21.000"));
    assert!(lines[2].contains("NA"));
    assert!(lines[3].contains("NA"));
    assert!(view.ends_with("2 rows"));
    assert!(!view.contains("Previous"));
}

#[test]
fn test_terminal_footer_navigation() {
    let payload = with_options(
        wide_payload(2, 30),
        TableOptions {
            pages: Some(3),
            ..TableOptions::default()
        },
    );
    let mut table = mounted(payload, 200);
    table.goto_page(1);
    let view = lipgloss::strip_ansi(&table.render_text());
    let footer = view.lines().last().unwrap();
    assert_eq!(footer, "Previous 1 2 3 Next 11-20 of 30 rows");
}

#[test]
fn test_terminal_footer_without_page_links() {
    let payload = with_options(
        wide_payload(2, 30),
        TableOptions {
            pages: Some(0),
            ..TableOptions::default()
        },
    );
    let mut table = mounted(payload, 200);
    table.goto_page(1);
    assert_eq!(table.paginator().visible_page_links(), 0);
    let view = lipgloss::strip_ansi(&table.render_text());
    assert_eq!(view.lines().last().unwrap(), "Previous Next 11-20 of 30 rows");
}

#[test]
fn test_terminal_marks_hidden_columns() {
    let table = mounted(with_options(wide_payload(12, 5), bounds(3, 8)), 50);
    let view = lipgloss::strip_ansi(&table.render_text());
    let header = view.lines().next().unwrap();
    assert!(header.trim_end().ends_with(style::ARROW_RIGHT));
    assert!(!header.contains(style::ARROW_LEFT));
}

#[test]
fn test_bubbletea_model_roundtrip() {
    let (mut table, cmd) = <PagedTable as BubbleTeaModel>::init();
    assert!(cmd.is_none());
    assert!(table.is_empty());
    let size: Msg = Box::new(bubbletea_rs::WindowSizeMsg {
        width: 80,
        height: 24,
    });
    assert!(BubbleTeaModel::update(&mut table, size).is_some());
    assert_eq!(table.container().width, 80);
    assert!(lipgloss::strip_ansi(&BubbleTeaModel::view(&table)).contains("0 rows"));
}

#[tokio::test]
async fn test_resize_command_delivers_check() {
    let mut layout = LayoutConfig::terminal();
    layout.debounce_ms = 1;
    let mut table = PagedTable::terminal(with_options(wide_payload(12, 5), bounds(3, 8)))
        .with_layout(layout)
        .with_container(50, 0);
    table.mount();

    let cmd = table.observe_resize(100, 0).expect("resize schedules a check");
    let msg = cmd.await.expect("tick delivers a message");
    assert!(msg.downcast_ref::<ResizeCheckMsg>().is_some());

    table.handle_msg(&msg);
    assert_eq!(table.columns().visible(), 8);
}
