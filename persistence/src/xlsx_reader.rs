//! FILENAME: persistence/src/xlsx_reader.rs
//! PURPOSE: Reads a worksheet back as a header row plus data rows.
//! CONTEXT: Used for spreadsheet imports (headers named after record fields)
//! and to inspect produced exports.

use crate::PersistenceError;
use calamine::{open_workbook, Data, Reader, Xlsx};
use engine::log_debug;
use serde::de::DeserializeOwned;
use std::io::{Cursor, Read, Seek};
use std::path::Path;

/// A cell as read from the workbook.
#[derive(Debug, Clone, PartialEq)]
pub enum ImportedCell {
    Empty,
    Number(f64),
    Text(String),
    Bool(bool),
}

impl ImportedCell {
    fn from_data(cell: &Data) -> Self {
        match cell {
            Data::Empty => ImportedCell::Empty,
            Data::String(s) => ImportedCell::Text(s.clone()),
            Data::Float(f) => ImportedCell::Number(*f),
            Data::Int(i) => ImportedCell::Number(*i as f64),
            Data::Bool(b) => ImportedCell::Bool(*b),
            Data::Error(e) => ImportedCell::Text(format!("{:?}", e)),
            Data::DateTime(dt) => ImportedCell::Number(dt.as_f64()),
            Data::DateTimeIso(s) => ImportedCell::Text(s.clone()),
            Data::DurationIso(s) => ImportedCell::Text(s.clone()),
        }
    }

    /// Display text. Whole numbers print without a fractional part.
    pub fn text(&self) -> String {
        match self {
            ImportedCell::Empty => String::new(),
            ImportedCell::Number(n) if n.fract() == 0.0 && n.abs() < 1e15 => format!("{}", *n as i64),
            ImportedCell::Number(n) => n.to_string(),
            ImportedCell::Text(s) => s.clone(),
            ImportedCell::Bool(b) => b.to_string(),
        }
    }

    fn to_json(&self) -> serde_json::Value {
        use serde_json::Value;
        match self {
            ImportedCell::Empty => Value::Null,
            ImportedCell::Text(s) if s.is_empty() || s == crate::PLACEHOLDER => Value::Null,
            ImportedCell::Text(s) => Value::String(s.clone()),
            ImportedCell::Bool(b) => Value::Bool(*b),
            ImportedCell::Number(n) if n.fract() == 0.0 && n.abs() < 1e15 => Value::from(*n as i64),
            ImportedCell::Number(n) => serde_json::Number::from_f64(*n)
                .map(Value::Number)
                .unwrap_or(Value::Null),
        }
    }
}

/// One worksheet: the first row as headers, the rest as data.
#[derive(Debug, Clone, PartialEq)]
pub struct ImportedSheet {
    pub name: String,
    pub headers: Vec<String>,
    pub rows: Vec<Vec<ImportedCell>>,
}

impl ImportedSheet {
    pub fn column(&self, header: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == header)
    }

    /// Display text of the cell at (data row, header).
    pub fn text(&self, row: usize, header: &str) -> Option<String> {
        let col = self.column(header)?;
        self.rows
            .get(row)
            .map(|cells| cells.get(col).map(ImportedCell::text).unwrap_or_default())
    }

    /// Converts each data row into a record, keyed by header name.
    /// Empty and placeholder cells read as null.
    pub fn to_records<T: DeserializeOwned>(&self) -> Result<Vec<T>, PersistenceError> {
        self.rows
            .iter()
            .enumerate()
            .map(|(idx, cells)| {
                let object: serde_json::Map<String, serde_json::Value> = self
                    .headers
                    .iter()
                    .enumerate()
                    .filter(|(_, h)| !h.is_empty())
                    .map(|(col, h)| {
                        let value = cells.get(col).map(ImportedCell::to_json).unwrap_or_default();
                        (h.clone(), value)
                    })
                    .collect();
                serde_json::from_value(serde_json::Value::Object(object))
                    .map_err(|source| PersistenceError::RowConversion { row: idx + 1, source })
            })
            .collect()
    }
}

/// Reads `sheet` (or the first worksheet) of the file at `path`.
pub fn load_xlsx(path: &Path, sheet: Option<&str>) -> Result<ImportedSheet, PersistenceError> {
    let mut workbook: Xlsx<_> = open_workbook(path)?;
    read_sheet(&mut workbook, sheet)
}

/// Reads `sheet` (or the first worksheet) of an in-memory workbook.
pub fn read_xlsx_bytes(bytes: &[u8], sheet: Option<&str>) -> Result<ImportedSheet, PersistenceError> {
    let mut workbook: Xlsx<_> = Xlsx::new(Cursor::new(bytes))?;
    read_sheet(&mut workbook, sheet)
}

fn read_sheet<RS: Read + Seek>(
    workbook: &mut Xlsx<RS>,
    sheet: Option<&str>,
) -> Result<ImportedSheet, PersistenceError> {
    let sheet_names = workbook.sheet_names().to_vec();

    let name = match sheet {
        Some(wanted) => sheet_names
            .iter()
            .find(|n| n.as_str() == wanted)
            .cloned()
            .ok_or_else(|| PersistenceError::SheetNotFound(wanted.to_string()))?,
        None => sheet_names.first().cloned().ok_or_else(|| {
            PersistenceError::InvalidFormat("Workbook contains no sheets".to_string())
        })?,
    };

    let range = workbook
        .worksheet_range(&name)
        .map_err(|e| PersistenceError::InvalidFormat(e.to_string()))?;

    let mut rows = range.rows();
    let headers = rows
        .next()
        .map(|cells| cells.iter().map(|c| ImportedCell::from_data(c).text()).collect())
        .unwrap_or_default();
    let rows: Vec<Vec<ImportedCell>> = rows
        .map(|cells| cells.iter().map(ImportedCell::from_data).collect())
        .collect();

    log_debug!("IMPORT", "read sheet '{}' rows={}", name, rows.len());

    Ok(ImportedSheet { name, headers, rows })
}
