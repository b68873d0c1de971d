//! FILENAME: persistence/src/xlsx_writer.rs

use crate::{ExportGrid, ExportOptions, PersistenceError, SheetCell};
use engine::{log_debug, log_enter, log_exit};
use rust_xlsxwriter::{Format, Workbook as XlsxWorkbook};
use std::path::Path;

/// Writes the grid to an xlsx file at `path`.
pub fn save_xlsx(grid: &ExportGrid, options: &ExportOptions, path: &Path) -> Result<(), PersistenceError> {
    log_enter!("EXPORT", "save_xlsx", "path={} rows={}", path.display(), grid.row_count());
    let mut xlsx = build_workbook(grid, options)?;
    xlsx.save(path)?;
    log_exit!("EXPORT", "save_xlsx");
    Ok(())
}

/// Serializes the grid to xlsx bytes.
pub fn write_xlsx_buffer(grid: &ExportGrid, options: &ExportOptions) -> Result<Vec<u8>, PersistenceError> {
    log_enter!("EXPORT", "write_xlsx_buffer", "rows={}", grid.row_count());
    let mut xlsx = build_workbook(grid, options)?;
    let bytes = xlsx.save_to_buffer()?;
    log_exit!("EXPORT", "write_xlsx_buffer", "bytes={}", bytes.len());
    Ok(bytes)
}

fn build_workbook(grid: &ExportGrid, options: &ExportOptions) -> Result<XlsxWorkbook, PersistenceError> {
    let mut xlsx = XlsxWorkbook::new();
    let worksheet = xlsx.add_worksheet();
    worksheet.set_name(&options.sheet_name)?;

    let header_format = Format::new().set_bold();

    // Header row
    for (col, header) in grid.headers.iter().enumerate() {
        worksheet.write_string_with_format(0, col as u16, header, &header_format)?;
    }
    if !grid.headers.is_empty() {
        worksheet.set_freeze_panes(1, 0)?;
    }

    // Column widths, in characters
    for (col, width) in grid.widths.iter().enumerate() {
        worksheet.set_column_width(col as u16, *width)?;
    }

    // Data rows
    for (row_idx, row) in grid.rows.iter().enumerate() {
        let row_num = row_idx as u32 + 1;
        for (col, cell) in row.iter().enumerate() {
            match cell {
                SheetCell::Number(n) => {
                    worksheet.write_number(row_num, col as u16, *n)?;
                }
                SheetCell::Text(s) => {
                    worksheet.write_string(row_num, col as u16, s)?;
                }
            }
        }
    }

    log_debug!(
        "EXPORT",
        "built sheet '{}' cols={} rows={}",
        options.sheet_name,
        grid.headers.len(),
        grid.row_count()
    );
    Ok(xlsx)
}
