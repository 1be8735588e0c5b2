//! Table source payload: rows, column descriptors and options.
//!
//! The payload is the JSON record a document embeds next to the table:
//!
//! ```json
//! {
//!   "data": [{ "mpg": "21.0", "cyl": "6" }],
//!   "columns": [{ "name": "mpg", "label": "mpg", "type": "dbl", "align": "right" }],
//!   "options": { "rows": 10, "pages": 5, "columns": { "min": 3, "max": 8 } }
//! }
//! ```
//!
//! Rows and columns are required. Options are read leniently: anything that
//! is not a non-negative integer (or a string starting with one) is treated
//! as absent.

use crate::error::{PagedTableError, Result};
use serde::Deserialize;
use serde_json::{Map, Value};

/// Raw cell value marking a missing cell.
pub const MISSING_SENTINEL: &str = "NA";

/// Raw cell value standing for the literal text `NA`.
pub const LITERAL_NA_SENTINEL: &str = "__NA__";

/// Cells longer than this carry a tooltip with their full text.
pub const TOOLTIP_THRESHOLD: usize = 50;

/// Horizontal alignment of a column's cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Align {
    /// Left aligned (default).
    #[default]
    Left,
    /// Right aligned, typical for numbers.
    Right,
    /// Centered.
    Center,
}

impl Align {
    fn parse(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "right" => Align::Right,
            "center" | "centre" => Align::Center,
            _ => Align::Left,
        }
    }
}

/// Describes one column of the dataset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnDescriptor {
    /// Key used to look up the column's value in each row.
    pub name: String,
    /// Header text; may be empty.
    pub label: String,
    /// Short type label shown under the header, e.g. `dbl`; may be empty.
    pub type_label: String,
    /// Cell alignment.
    pub align: Align,
}

impl ColumnDescriptor {
    /// Creates a left-aligned column whose label equals its name.
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            label: name.clone(),
            name,
            type_label: String::new(),
            align: Align::Left,
        }
    }

    /// Sets the header label (builder pattern).
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    /// Sets the type label (builder pattern).
    pub fn with_type(mut self, type_label: impl Into<String>) -> Self {
        self.type_label = type_label.into();
        self
    }

    /// Sets the alignment (builder pattern).
    pub fn with_align(mut self, align: Align) -> Self {
        self.align = align;
        self
    }
}

/// One cell of the dataset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Cell {
    /// A missing value; renderers style these differently.
    Missing,
    /// Regular text.
    Text(String),
}

impl Cell {
    /// Interprets a raw payload string, resolving the missing-value sentinels.
    ///
    /// ```rust
    /// use bubbletea_pagedtable::pagedtable::Cell;
    ///
    /// assert_eq!(Cell::from_raw("NA"), Cell::Missing);
    /// assert_eq!(Cell::from_raw("__NA__"), Cell::Text("NA".to_string()));
    /// assert_eq!(Cell::from_raw("3.14"), Cell::Text("3.14".to_string()));
    /// ```
    pub fn from_raw(raw: &str) -> Self {
        match raw {
            MISSING_SENTINEL => Cell::Missing,
            LITERAL_NA_SENTINEL => Cell::Text(MISSING_SENTINEL.to_string()),
            other => Cell::Text(other.to_string()),
        }
    }

    fn from_value(value: Option<&Value>) -> Self {
        match value {
            None | Some(Value::Null) => Cell::Missing,
            Some(Value::String(s)) => Cell::from_raw(s),
            Some(other) => Cell::Text(other.to_string()),
        }
    }

    /// True for missing cells.
    pub fn is_missing(&self) -> bool {
        matches!(self, Cell::Missing)
    }

    /// Text to display, substituting `missing` for missing cells.
    pub fn display<'a>(&'a self, missing: &'a str) -> &'a str {
        match self {
            Cell::Missing => missing,
            Cell::Text(text) => text,
        }
    }

    /// Full text for a tooltip when the cell is too long to read inline.
    pub fn tooltip(&self) -> Option<&str> {
        match self {
            Cell::Text(text) if text.chars().count() > TOOLTIP_THRESHOLD => Some(text),
            _ => None,
        }
    }
}

/// The immutable rows and columns of a table.
///
/// Rows are stored in column order, so `rows()[r][c]` is the cell of row `r`
/// under `columns()[c]`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Dataset {
    columns: Vec<ColumnDescriptor>,
    rows: Vec<Vec<Cell>>,
}

impl Dataset {
    /// Builds a dataset, padding short rows with missing cells and dropping
    /// cells beyond the last column.
    pub fn new(columns: Vec<ColumnDescriptor>, rows: Vec<Vec<Cell>>) -> Self {
        let width = columns.len();
        let rows = rows
            .into_iter()
            .map(|mut row| {
                row.resize(width, Cell::Missing);
                row
            })
            .collect();
        Self { columns, rows }
    }

    /// Column descriptors in display order.
    pub fn columns(&self) -> &[ColumnDescriptor] {
        &self.columns
    }

    /// All rows.
    pub fn rows(&self) -> &[Vec<Cell>] {
        &self.rows
    }

    /// Number of rows.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Number of columns.
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// True when there is nothing to lay out.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty() || self.columns.is_empty()
    }

    /// The cell at `(row, column)`, if both exist.
    pub fn cell(&self, row: usize, column: usize) -> Option<&Cell> {
        self.rows.get(row).and_then(|cells| cells.get(column))
    }
}

/// Column count bounds from the payload options.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ColumnOptions {
    /// Minimum visible columns (real plus padding) before the fit may stop.
    pub min: Option<usize>,
    /// Maximum visible columns (real plus padding).
    pub max: Option<usize>,
}

/// Options carried by the payload. Absent values fall back to defaults.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TableOptions {
    /// Maximum page links in the footer.
    pub pages: Option<usize>,
    /// Rows per page. When set, the page size is not derived from height.
    pub rows: Option<usize>,
    /// Column bounds.
    pub columns: ColumnOptions,
}

impl TableOptions {
    /// Reads options leniently from an arbitrary JSON value.
    ///
    /// ```rust
    /// use bubbletea_pagedtable::pagedtable::TableOptions;
    /// use serde_json::json;
    ///
    /// let options = TableOptions::from_value(&json!({
    ///     "rows": "15", "pages": -1, "columns": { "min": 2.9, "max": "wide" }
    /// }));
    /// assert_eq!(options.rows, Some(15));
    /// assert_eq!(options.pages, None);
    /// assert_eq!(options.columns.min, Some(2));
    /// assert_eq!(options.columns.max, None);
    /// ```
    pub fn from_value(value: &Value) -> Self {
        let Some(object) = value.as_object() else {
            return Self::default();
        };
        let columns = object.get("columns").and_then(Value::as_object);
        Self {
            pages: lenient_count(object.get("pages")),
            rows: lenient_count(object.get("rows")),
            columns: ColumnOptions {
                min: columns.and_then(|c| lenient_count(c.get("min"))),
                max: columns.and_then(|c| lenient_count(c.get("max"))),
            },
        }
    }
}

/// Reads a non-negative integer the forgiving way a document author expects:
/// numbers are truncated, strings are read up to the first non-digit.
fn lenient_count(value: Option<&Value>) -> Option<usize> {
    match value? {
        Value::Number(number) => {
            if let Some(n) = number.as_u64() {
                return usize::try_from(n).ok();
            }
            let f = number.as_f64()?;
            if f.is_finite() && f.trunc() >= 0.0 && f < usize::MAX as f64 {
                Some(f.trunc() as usize)
            } else {
                None
            }
        }
        Value::String(text) => parse_leading_count(text),
        _ => None,
    }
}

fn parse_leading_count(text: &str) -> Option<usize> {
    let text = text.trim_start();
    let (negative, rest) = match text.as_bytes().first() {
        Some(b'-') => (true, &text[1..]),
        Some(b'+') => (false, &text[1..]),
        _ => (false, text),
    };
    let digits: &str = &rest[..rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len())];
    if digits.is_empty() {
        return None;
    }
    let n: usize = digits.parse().ok()?;
    if negative && n > 0 {
        None
    } else {
        Some(n)
    }
}

#[derive(Deserialize)]
struct RawPayload {
    data: Vec<Map<String, Value>>,
    columns: Vec<RawColumn>,
    #[serde(default)]
    options: Value,
}

#[derive(Deserialize)]
struct RawColumn {
    #[serde(default)]
    name: Value,
    #[serde(default)]
    label: Value,
    #[serde(default, rename = "type")]
    type_label: Value,
    #[serde(default)]
    align: Value,
}

fn value_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// A parsed table source: the dataset plus its options.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Payload {
    /// Rows and columns.
    pub dataset: Dataset,
    /// Payload options.
    pub options: TableOptions,
}

impl Payload {
    /// Parses a JSON payload.
    ///
    /// # Errors
    ///
    /// Fails when the text is not JSON or lacks the `data`/`columns` arrays.
    ///
    /// ```rust
    /// use bubbletea_pagedtable::pagedtable::Payload;
    ///
    /// let payload = Payload::from_json(
    ///     r#"{"data":[{"a":"1"},{"a":"NA"}],"columns":[{"name":"a","label":"A"}]}"#,
    /// ).unwrap();
    /// assert_eq!(payload.dataset.row_count(), 2);
    /// assert!(payload.dataset.cell(1, 0).unwrap().is_missing());
    ///
    /// assert!(Payload::from_json(r#"{"data":[]}"#).is_err());
    /// ```
    pub fn from_json(json: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(json)?;
        Self::from_value(value)
    }

    /// Builds a payload from an already parsed JSON value.
    ///
    /// # Errors
    ///
    /// Fails when the value lacks the `data`/`columns` arrays or a row is not
    /// an object.
    pub fn from_value(value: Value) -> Result<Self> {
        if !value.is_object() {
            return Err(PagedTableError::InvalidPayload(
                "payload must be a JSON object".to_string(),
            ));
        }
        let raw: RawPayload = serde_json::from_value(value)?;

        let columns: Vec<ColumnDescriptor> = raw
            .columns
            .iter()
            .map(|column| ColumnDescriptor {
                name: value_text(&column.name),
                label: value_text(&column.label),
                type_label: value_text(&column.type_label),
                align: Align::parse(&value_text(&column.align)),
            })
            .collect();

        let rows = raw
            .data
            .iter()
            .map(|row| {
                columns
                    .iter()
                    .map(|column| Cell::from_value(row.get(&column.name)))
                    .collect()
            })
            .collect();

        Ok(Self {
            dataset: Dataset::new(columns, rows),
            options: TableOptions::from_value(&raw.options),
        })
    }

    /// Parses the single source payload among `sources`.
    ///
    /// A table is built from exactly one source; none or several is a
    /// construction error.
    ///
    /// # Errors
    ///
    /// [`PagedTableError::MissingSource`] or
    /// [`PagedTableError::DuplicateSource`] when there is not exactly one
    /// source, otherwise any error from [`Payload::from_json`].
    pub fn from_sources<'a, I>(sources: I) -> Result<Self>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let sources: Vec<&str> = sources.into_iter().collect();
        match sources.as_slice() {
            [] => Err(PagedTableError::MissingSource),
            [single] => Self::from_json(single),
            many => Err(PagedTableError::DuplicateSource(many.len())),
        }
    }
}
