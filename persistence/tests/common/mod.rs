//! FILENAME: tests/common/mod.rs
//! Test harness and fixtures for persistence integration tests.

#![allow(dead_code)]

use chrono::NaiveDate;
use engine::record::{
    Citizen, Communication, CommunicationType, MilitaryPersonnel, MilitaryType, RequestCategory,
    RequestStatus, ServiceRequest,
};
use tempfile::TempDir;

/// Export date used by every test, so file names are predictable.
pub fn export_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 5, 20).unwrap()
}

/// Temporary export directory, removed when dropped.
pub struct ExportDir {
    pub dir: TempDir,
}

impl ExportDir {
    pub fn new() -> Self {
        ExportDir {
            dir: tempfile::tempdir().unwrap(),
        }
    }

    pub fn path(&self) -> &std::path::Path {
        self.dir.path()
    }
}

pub fn sample_citizens() -> Vec<Citizen> {
    let mut first = Citizen::new("c1", "Παπαδόπουλος", "Γιώργος");
    first.mobile = Some("6912345678".to_string());
    first.email = Some("g.papadopoulos@example.gr".to_string());
    first.municipality = Some("THESSALONIKI".to_string());
    first.created_at = "2024-01-10T09:15:00Z".to_string();

    // Everything optional left empty
    let mut second = Citizen::new("c2", "Νικολάου", "Ελένη");
    second.created_at = "2024-02-01".to_string();

    vec![first, second]
}

pub fn sample_requests() -> Vec<ServiceRequest> {
    let citizens = sample_citizens();
    let mut request = ServiceRequest::new(
        "r1",
        "c1",
        RequestCategory::Medical,
        RequestStatus::Completed,
        "2024-03-01",
    );
    request.request_text = Some("Ραντεβού στο Ιπποκράτειο".to_string());
    request.completed_at = Some("2024-03-10".to_string());
    request.citizen = Some(citizens[0].to_ref());
    vec![request]
}

pub fn sample_communications() -> Vec<Communication> {
    let mut comm = Communication::new("k1", "c1", CommunicationType::Phone, "2024-04-02");
    comm.notes = Some("Ενημέρωση για το αίτημα".to_string());
    vec![comm]
}

pub fn sample_military() -> Vec<MilitaryPersonnel> {
    let mut conscript = MilitaryPersonnel::new("m1", MilitaryType::Conscript, "Γεωργίου", "Κώστας");
    conscript.esso_year = Some(2024);
    conscript.esso_letter = Some("Α".to_string());
    conscript.presentation_date = Some("2024-02-15".to_string());
    conscript.created_at = "2024-01-20".to_string();
    vec![conscript]
}
