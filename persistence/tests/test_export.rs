//! FILENAME: tests/test_export.rs
//! Integration tests for xlsx export: file and buffer modes, the empty-list
//! boundary and the Greek column sets, verified by reading the workbook back.

mod common;

use common::{export_date, sample_citizens, sample_communications, sample_military, sample_requests, ExportDir};
use engine::record::Citizen;
use persistence::columns::{citizen_columns, communication_columns, military_columns, request_columns};
use persistence::{
    export_to_buffer, export_to_file, load_xlsx, notice_for, read_xlsx_bytes, ColumnSpec, ExportOptions,
    ExportOutcome, NoticeLevel, XLSX_MIME,
};

// ============================================================================
// BOUNDARY
// ============================================================================

#[test]
fn test_empty_list_is_refused_without_writing() {
    let dir = ExportDir::new();
    let empty: Vec<Citizen> = Vec::new();

    let result = export_to_file(&empty, &citizen_columns(), &ExportOptions::new("citizens"), dir.path(), export_date());
    let outcome = result.as_ref().unwrap();
    assert_eq!(*outcome, ExportOutcome::NothingToExport);

    let notice = notice_for(&result);
    assert_eq!(notice.level, NoticeLevel::Error);
    assert_eq!(notice.message, "Δεν υπάρχουν δεδομένα για εξαγωγή");
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);

    let buffered = export_to_buffer(&empty, &citizen_columns(), &ExportOptions::default(), export_date()).unwrap();
    assert_eq!(buffered, ExportOutcome::NothingToExport);
}

#[test]
fn test_missing_directory_maps_to_error_notice() {
    let dir = ExportDir::new();
    let missing = dir.path().join("does-not-exist");
    let result = export_to_file(
        &sample_citizens(),
        &citizen_columns(),
        &ExportOptions::default(),
        &missing,
        export_date(),
    );
    assert!(result.is_err());
    assert_eq!(notice_for(&result).message, "Σφάλμα κατά την εξαγωγή");
}

// ============================================================================
// FILE MODE
// ============================================================================

#[test]
fn test_citizens_file_round_trip() {
    let dir = ExportDir::new();
    let citizens = sample_citizens();

    let result = export_to_file(&citizens, &citizen_columns(), &ExportOptions::new("politis"), dir.path(), export_date());
    let path = match result.as_ref().unwrap() {
        ExportOutcome::Written { path, rows } => {
            assert_eq!(*rows, 2);
            path.clone()
        }
        other => panic!("unexpected outcome: {:?}", other),
    };
    assert_eq!(path.file_name().unwrap().to_str().unwrap(), "politis_2024-05-20.xlsx");
    assert_eq!(notice_for(&result).message, "Εξήχθησαν 2 εγγραφές επιτυχώς");

    let sheet = load_xlsx(&path, Some("Δεδομένα")).unwrap();
    assert_eq!(sheet.headers[0], "Επίθετο");
    assert_eq!(sheet.headers.len(), 20);
    assert_eq!(sheet.rows.len(), 2);

    assert_eq!(sheet.text(0, "Επίθετο").unwrap(), "Παπαδόπουλος");
    assert_eq!(sheet.text(0, "Κινητό").unwrap(), "691 234 5678");
    assert_eq!(sheet.text(0, "Δήμος").unwrap(), "Θεσσαλονίκη");
    assert_eq!(sheet.text(0, "Ενεργός").unwrap(), "Ναι");
    assert_eq!(sheet.text(0, "Ημ/νία Δημιουργίας").unwrap(), "10/01/2024");
    assert_eq!(sheet.text(0, "Σύνολο Αιτ.").unwrap(), "0");

    // Null fields render as the placeholder dash
    assert_eq!(sheet.text(1, "Πατρώνυμο").unwrap(), "-");
    assert_eq!(sheet.text(1, "Email").unwrap(), "-");
    assert_eq!(sheet.text(1, "Κινητό").unwrap(), "-");
}

#[test]
fn test_single_null_field_renders_dash() {
    let dir = ExportDir::new();
    let citizen = Citizen::new("c9", "Οικονόμου", "Μαρία");
    let columns = vec![
        ColumnSpec::field("Επίθετο", "surname"),
        ColumnSpec::field("Email", "email"),
    ];

    let outcome = export_to_file(&[citizen], &columns, &ExportOptions::default(), dir.path(), export_date()).unwrap();
    let ExportOutcome::Written { path, .. } = outcome else {
        panic!("expected a written file");
    };
    assert_eq!(path.file_name().unwrap().to_str().unwrap(), "export_2024-05-20.xlsx");

    let sheet = load_xlsx(&path, None).unwrap();
    assert_eq!(sheet.text(0, "Email").unwrap(), "-");
}

// ============================================================================
// BUFFER MODE
// ============================================================================

#[test]
fn test_buffer_matches_file_output() {
    let dir = ExportDir::new();
    let requests = sample_requests();
    let options = ExportOptions::new("requests").with_sheet_name("Αιτήματα");

    let written = export_to_file(&requests, &request_columns(), &options, dir.path(), export_date()).unwrap();
    let buffered = export_to_buffer(&requests, &request_columns(), &options, export_date()).unwrap();

    let ExportOutcome::Written { path, .. } = written else {
        panic!("expected a written file");
    };
    let ExportOutcome::Buffered { download, rows } = buffered else {
        panic!("expected a buffer");
    };
    assert_eq!(rows, 1);
    assert_eq!(download.mime, XLSX_MIME);
    assert_eq!(download.file_name, "requests_2024-05-20.xlsx");

    let from_file = load_xlsx(&path, Some("Αιτήματα")).unwrap();
    let from_buffer = read_xlsx_bytes(&download.bytes, Some("Αιτήματα")).unwrap();
    assert_eq!(from_file, from_buffer);

    assert_eq!(from_buffer.text(0, "Πολίτης").unwrap(), "Παπαδόπουλος Γιώργος");
    assert_eq!(from_buffer.text(0, "Email Πολίτη").unwrap(), "g.papadopoulos@example.gr");
    assert_eq!(from_buffer.text(0, "Ημ/νία Ολοκλήρωσης").unwrap(), "10/03/2024");
    assert_eq!(from_buffer.text(0, "Σημειώσεις").unwrap(), "-");
}

#[test]
fn test_communication_and_military_sets() {
    let comms = export_to_buffer(&sample_communications(), &communication_columns(), &ExportOptions::default(), export_date())
        .unwrap();
    let ExportOutcome::Buffered { download, .. } = comms else {
        panic!("expected a buffer");
    };
    let sheet = read_xlsx_bytes(&download.bytes, None).unwrap();
    assert_eq!(sheet.name, "Δεδομένα");
    assert_eq!(sheet.text(0, "Πολίτης").unwrap(), "-");
    assert_eq!(sheet.text(0, "Ημ/νία Επικοινωνίας").unwrap(), "02/04/2024");

    let military = export_to_buffer(&sample_military(), &military_columns(), &ExportOptions::default(), export_date())
        .unwrap();
    let ExportOutcome::Buffered { download, .. } = military else {
        panic!("expected a buffer");
    };
    let sheet = read_xlsx_bytes(&download.bytes, None).unwrap();
    assert_eq!(sheet.text(0, "ΕΣΣΟ").unwrap(), "2024Α");
    assert_eq!(sheet.text(0, "Ημ/νία Παρουσ.").unwrap(), "15/02/2024");
    assert_eq!(sheet.text(0, "Βαθμός").unwrap(), "-");
}

#[test]
fn test_unknown_sheet_is_reported() {
    let outcome = export_to_buffer(&sample_citizens(), &citizen_columns(), &ExportOptions::default(), export_date()).unwrap();
    let ExportOutcome::Buffered { download, .. } = outcome else {
        panic!("expected a buffer");
    };
    let err = read_xlsx_bytes(&download.bytes, Some("Φύλλο1")).unwrap_err();
    assert_eq!(err.to_string(), "worksheet 'Φύλλο1' not found in import workbook");
}
