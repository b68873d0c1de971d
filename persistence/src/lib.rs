//! FILENAME: persistence/src/lib.rs
//! CRM Persistence Module
//!
//! Exports record lists to XLSX workbooks and reads XLSX workbooks back for
//! imports. The column mapping lives here and is shared by the file and
//! in-memory output modes.

pub mod columns;
pub mod download;
mod error;
mod xlsx_reader;
mod xlsx_writer;

pub use download::{
    export_to_buffer, export_to_file, notice_for, Download, ExportOutcome, Notice, NoticeLevel,
};
pub use error::PersistenceError;
pub use xlsx_reader::{load_xlsx, read_xlsx_bytes, ImportedCell, ImportedSheet};
pub use xlsx_writer::{save_xlsx, write_xlsx_buffer};

use chrono::NaiveDate;
use engine::config::{CrmConfig, DEFAULT_EXPORT_FILE_NAME, DEFAULT_EXPORT_SHEET_NAME};
use engine::record::{FieldValue, Record};

// ============================================================================
// CONSTANTS
// ============================================================================

/// MIME type of the produced workbooks.
pub const XLSX_MIME: &str = "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

/// Rendered in place of a missing value.
pub const PLACEHOLDER: &str = "-";

pub const YES: &str = "Ναι";
pub const NO: &str = "Όχι";

/// Auto width: header length plus this padding, in characters.
pub const HEADER_PADDING: f64 = 2.0;

/// Auto width never goes below this, in characters.
pub const MIN_COLUMN_WIDTH: f64 = 15.0;

// ============================================================================
// COLUMN SPEC
// ============================================================================

/// How a column reads its value off a record.
pub enum Accessor<T> {
    /// Direct field read through [`Record::field`].
    Field(&'static str),
    /// Computed from the whole record.
    Derived(Box<dyn Fn(&T) -> FieldValue>),
}

/// One exported column: header label, accessor and optional width.
/// Header uniqueness is up to the caller.
pub struct ColumnSpec<T> {
    pub header: String,
    pub accessor: Accessor<T>,
    pub width: Option<f64>,
}

impl<T: Record> ColumnSpec<T> {
    pub fn field(header: impl Into<String>, name: &'static str) -> Self {
        ColumnSpec {
            header: header.into(),
            accessor: Accessor::Field(name),
            width: None,
        }
    }

    pub fn derived<F, V>(header: impl Into<String>, derive: F) -> Self
    where
        F: Fn(&T) -> V + 'static,
        V: Into<FieldValue>,
    {
        ColumnSpec {
            header: header.into(),
            accessor: Accessor::Derived(Box::new(move |record| derive(record).into())),
            width: None,
        }
    }

    pub fn with_width(mut self, width: f64) -> Self {
        self.width = Some(width);
        self
    }

    /// Explicit width, or `max(header chars + padding, minimum)`.
    pub fn effective_width(&self) -> f64 {
        self.width.unwrap_or_else(|| {
            (self.header.chars().count() as f64 + HEADER_PADDING).max(MIN_COLUMN_WIDTH)
        })
    }

    pub fn resolve(&self, record: &T) -> SheetCell {
        let value = match &self.accessor {
            Accessor::Field(name) => record.field(name),
            Accessor::Derived(derive) => derive(record),
        };
        SheetCell::from(value)
    }
}

// ============================================================================
// SHEET CELL
// ============================================================================

/// A resolved cell: numbers stay numeric, everything else is text.
#[derive(Debug, Clone, PartialEq)]
pub enum SheetCell {
    Number(f64),
    Text(String),
}

impl SheetCell {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            SheetCell::Text(s) => Some(s),
            SheetCell::Number(_) => None,
        }
    }
}

impl From<FieldValue> for SheetCell {
    fn from(value: FieldValue) -> Self {
        match value {
            FieldValue::Null => SheetCell::Text(PLACEHOLDER.to_string()),
            FieldValue::Boolean(b) => SheetCell::Text(if b { YES } else { NO }.to_string()),
            FieldValue::Number(n) => SheetCell::Number(n),
            FieldValue::Text(s) => SheetCell::Text(s),
        }
    }
}

// ============================================================================
// EXPORT GRID
// ============================================================================

/// Header row, column widths and data rows, ready for serialization.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportGrid {
    pub headers: Vec<String>,
    pub widths: Vec<f64>,
    pub rows: Vec<Vec<SheetCell>>,
}

impl ExportGrid {
    pub fn build<T: Record>(data: &[T], columns: &[ColumnSpec<T>]) -> Self {
        let headers = columns.iter().map(|c| c.header.clone()).collect();
        let widths = columns.iter().map(ColumnSpec::effective_width).collect();
        let rows = data
            .iter()
            .map(|record| columns.iter().map(|c| c.resolve(record)).collect())
            .collect();

        ExportGrid {
            headers,
            widths,
            rows,
        }
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }
}

// ============================================================================
// OPTIONS
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportOptions {
    pub sheet_name: String,
    /// Base of the download name; the export date is appended.
    pub file_name: String,
}

impl ExportOptions {
    pub fn new(file_name: impl Into<String>) -> Self {
        ExportOptions {
            file_name: file_name.into(),
            ..Default::default()
        }
    }

    pub fn with_sheet_name(mut self, sheet_name: impl Into<String>) -> Self {
        self.sheet_name = sheet_name.into();
        self
    }

    /// `<file_name>_<YYYY-MM-DD>.xlsx`
    pub fn file_name_for(&self, date: NaiveDate) -> String {
        export_file_name(&self.file_name, date)
    }
}

impl Default for ExportOptions {
    fn default() -> Self {
        ExportOptions {
            sheet_name: DEFAULT_EXPORT_SHEET_NAME.to_string(),
            file_name: DEFAULT_EXPORT_FILE_NAME.to_string(),
        }
    }
}

impl From<&CrmConfig> for ExportOptions {
    fn from(config: &CrmConfig) -> Self {
        ExportOptions {
            sheet_name: config.export_sheet_name.clone(),
            file_name: config.export_file_name.clone(),
        }
    }
}

pub fn export_file_name(base: &str, date: NaiveDate) -> String {
    format!("{}_{}.xlsx", base, date.format("%Y-%m-%d"))
}
