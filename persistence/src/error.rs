//! FILENAME: persistence/src/error.rs

use thiserror::Error;

/// Failures of record export and import. User-facing text is chosen by the
/// download boundary; these messages go to the log.
#[derive(Error, Debug)]
pub enum PersistenceError {
    #[error("file access failed during record export/import: {0}")]
    Io(#[from] std::io::Error),

    #[error("could not write export workbook: {0}")]
    XlsxWrite(#[from] rust_xlsxwriter::XlsxError),

    #[error("could not read import workbook: {0}")]
    XlsxRead(#[from] calamine::XlsxError),

    #[error("import row {row} does not match the record fields: {source}")]
    RowConversion {
        row: usize,
        #[source]
        source: serde_json::Error,
    },

    #[error("not a usable import workbook: {0}")]
    InvalidFormat(String),

    #[error("worksheet '{0}' not found in import workbook")]
    SheetNotFound(String),
}
