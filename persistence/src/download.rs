//! FILENAME: persistence/src/download.rs
//! PURPOSE: The export button boundary: refuses empty exports, names the
//! file after the export date and turns the result into a notice.
//! CONTEXT: The grid mapping and xlsx writer never see an empty list; that
//! check happens here, before any serialization.

use crate::{
    save_xlsx, write_xlsx_buffer, ColumnSpec, ExportGrid, ExportOptions, PersistenceError, XLSX_MIME,
};
use chrono::NaiveDate;
use engine::record::Record;
use engine::{log_error, log_info};
use serde::Serialize;
use std::path::{Path, PathBuf};

pub const NOTHING_TO_EXPORT: &str = "Δεν υπάρχουν δεδομένα για εξαγωγή";
pub const EXPORT_FAILED: &str = "Σφάλμα κατά την εξαγωγή";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeLevel {
    Success,
    Error,
}

/// A transient user-facing message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Notice {
            level: NoticeLevel::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Notice {
            level: NoticeLevel::Error,
            message: message.into(),
        }
    }
}

/// An in-memory workbook ready to hand to the browser.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Download {
    pub file_name: String,
    pub mime: &'static str,
    pub bytes: Vec<u8>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportOutcome {
    /// The list was empty; nothing was serialized.
    NothingToExport,
    Written { path: PathBuf, rows: usize },
    Buffered { download: Download, rows: usize },
}

impl ExportOutcome {
    pub fn rows(&self) -> usize {
        match self {
            ExportOutcome::NothingToExport => 0,
            ExportOutcome::Written { rows, .. } | ExportOutcome::Buffered { rows, .. } => *rows,
        }
    }

    pub fn notice(&self) -> Notice {
        match self {
            ExportOutcome::NothingToExport => Notice::error(NOTHING_TO_EXPORT),
            _ => Notice::success(format!("Εξήχθησαν {} εγγραφές επιτυχώς", self.rows())),
        }
    }
}

/// The notice to show for a finished export attempt.
pub fn notice_for(result: &Result<ExportOutcome, PersistenceError>) -> Notice {
    match result {
        Ok(outcome) => outcome.notice(),
        Err(err) => {
            log_error!("EXPORT", "export failed: {}", err);
            Notice::error(EXPORT_FAILED)
        }
    }
}

/// Writes `<dir>/<file_name>_<date>.xlsx`.
pub fn export_to_file<T: Record>(
    data: &[T],
    columns: &[ColumnSpec<T>],
    options: &ExportOptions,
    dir: &Path,
    date: NaiveDate,
) -> Result<ExportOutcome, PersistenceError> {
    if data.is_empty() {
        log_info!("EXPORT", "nothing to export for '{}'", options.file_name);
        return Ok(ExportOutcome::NothingToExport);
    }

    let grid = ExportGrid::build(data, columns);
    let path = dir.join(options.file_name_for(date));
    save_xlsx(&grid, options, &path)?;

    log_info!("EXPORT", "wrote {} rows to {}", grid.row_count(), path.display());
    Ok(ExportOutcome::Written {
        path,
        rows: grid.row_count(),
    })
}

/// Produces the workbook bytes with a dated download name.
pub fn export_to_buffer<T: Record>(
    data: &[T],
    columns: &[ColumnSpec<T>],
    options: &ExportOptions,
    date: NaiveDate,
) -> Result<ExportOutcome, PersistenceError> {
    if data.is_empty() {
        log_info!("EXPORT", "nothing to export for '{}'", options.file_name);
        return Ok(ExportOutcome::NothingToExport);
    }

    let grid = ExportGrid::build(data, columns);
    let bytes = write_xlsx_buffer(&grid, options)?;

    log_info!("EXPORT", "buffered {} rows ({} bytes)", grid.row_count(), bytes.len());
    Ok(ExportOutcome::Buffered {
        download: Download {
            file_name: options.file_name_for(date),
            mime: XLSX_MIME,
            bytes,
        },
        rows: grid.row_count(),
    })
}
