//! FILENAME: persistence/src/columns.rs
//! PURPOSE: Ready-made export column sets for each record list.
//! CONTEXT: Headers and widths match the Excel files the office already
//! circulates, so column order here is part of the output format.

use crate::{ColumnSpec, NO, PLACEHOLDER, YES};
use engine::dates::format_date_dmy;
use engine::record::{
    label_for, Citizen, CitizenRef, Communication, MilitaryPersonnel, ServiceRequest,
    CONTACT_CATEGORY_OPTIONS, ELECTORAL_DISTRICT_OPTIONS, MUNICIPALITY_OPTIONS,
};
use engine::validators::format_greek_phone;

/// `dd/mm/yyyy`, or "-" for a missing or unparseable date.
pub fn format_date_for_export(date: Option<&str>) -> String {
    date.and_then(format_date_dmy)
        .unwrap_or_else(|| PLACEHOLDER.to_string())
}

pub fn format_bool_for_export(value: Option<bool>) -> String {
    match value {
        Some(true) => YES.to_string(),
        Some(false) => NO.to_string(),
        None => PLACEHOLDER.to_string(),
    }
}

fn citizen_name(citizen: Option<&CitizenRef>) -> String {
    citizen
        .map(CitizenRef::full_name)
        .unwrap_or_else(|| PLACEHOLDER.to_string())
}

fn citizen_email(citizen: Option<&CitizenRef>) -> String {
    citizen
        .and_then(|c| c.email.as_deref())
        .filter(|e| !e.is_empty())
        .unwrap_or(PLACEHOLDER)
        .to_string()
}

fn citizen_mobile(citizen: Option<&CitizenRef>) -> String {
    format_greek_phone(citizen.and_then(|c| c.mobile.as_deref()))
}

pub fn citizen_columns() -> Vec<ColumnSpec<Citizen>> {
    vec![
        ColumnSpec::field("Επίθετο", "surname").with_width(18.0),
        ColumnSpec::field("Όνομα", "first_name").with_width(15.0),
        ColumnSpec::field("Πατρώνυμο", "father_name").with_width(15.0),
        ColumnSpec::derived("Κινητό", |c: &Citizen| format_greek_phone(c.mobile.as_deref())).with_width(15.0),
        ColumnSpec::derived("Σταθερό", |c: &Citizen| format_greek_phone(c.landline.as_deref())).with_width(15.0),
        ColumnSpec::field("Email", "email").with_width(25.0),
        ColumnSpec::field("Διεύθυνση", "address").with_width(30.0),
        ColumnSpec::field("Τ.Κ.", "postal_code").with_width(8.0),
        ColumnSpec::field("Περιοχή", "area").with_width(15.0),
        ColumnSpec::derived("Δήμος", |c: &Citizen| {
            label_for(MUNICIPALITY_OPTIONS, c.municipality.as_deref())
        })
        .with_width(18.0),
        ColumnSpec::derived("Εκλ. Περιφέρεια", |c: &Citizen| {
            label_for(ELECTORAL_DISTRICT_OPTIONS, c.electoral_district.as_deref())
        })
        .with_width(18.0),
        ColumnSpec::derived("Κατηγορία Επαφής", |c: &Citizen| {
            label_for(CONTACT_CATEGORY_OPTIONS, Some(c.contact_category.as_str()))
        })
        .with_width(18.0),
        ColumnSpec::field("Ιδιότητα", "profession").with_width(20.0),
        ColumnSpec::field("Σύσταση από", "referral_source").with_width(20.0),
        ColumnSpec::field("Εκκρεμή Αιτ.", "requests_pending").with_width(12.0),
        ColumnSpec::field("Ολοκλ. Αιτ.", "requests_completed").with_width(12.0),
        ColumnSpec::field("Σύνολο Αιτ.", "requests_total").with_width(12.0),
        ColumnSpec::derived("Ενεργός", |c: &Citizen| format_bool_for_export(Some(c.is_active))).with_width(10.0),
        ColumnSpec::field("Παρατηρήσεις", "notes").with_width(40.0),
        ColumnSpec::derived("Ημ/νία Δημιουργίας", |c: &Citizen| {
            format_date_for_export(Some(c.created_at.as_str()))
        })
        .with_width(15.0),
    ]
}

pub fn request_columns() -> Vec<ColumnSpec<ServiceRequest>> {
    vec![
        ColumnSpec::derived("Πολίτης", |r: &ServiceRequest| citizen_name(r.citizen.as_ref())).with_width(25.0),
        ColumnSpec::derived("Κινητό Πολίτη", |r: &ServiceRequest| citizen_mobile(r.citizen.as_ref()))
            .with_width(15.0),
        ColumnSpec::derived("Email Πολίτη", |r: &ServiceRequest| citizen_email(r.citizen.as_ref()))
            .with_width(25.0),
        ColumnSpec::derived("Κατηγορία", |r: &ServiceRequest| r.category.label()).with_width(18.0),
        ColumnSpec::derived("Κατάσταση", |r: &ServiceRequest| r.status.label()).with_width(15.0),
        ColumnSpec::field("Κείμενο Αιτήματος", "request_text").with_width(50.0),
        ColumnSpec::derived("Ημ/νία Υποβολής", |r: &ServiceRequest| {
            format_date_for_export(Some(r.submitted_at.as_str()))
        })
        .with_width(15.0),
        ColumnSpec::derived("Ημ/νία Ολοκλήρωσης", |r: &ServiceRequest| {
            format_date_for_export(r.completed_at.as_deref())
        })
        .with_width(18.0),
        ColumnSpec::field("Σημειώσεις", "notes").with_width(40.0),
    ]
}

pub fn communication_columns() -> Vec<ColumnSpec<Communication>> {
    vec![
        ColumnSpec::derived("Πολίτης", |c: &Communication| citizen_name(c.citizen.as_ref())).with_width(25.0),
        ColumnSpec::derived("Κινητό Πολίτη", |c: &Communication| citizen_mobile(c.citizen.as_ref()))
            .with_width(15.0),
        ColumnSpec::derived("Email Πολίτη", |c: &Communication| citizen_email(c.citizen.as_ref()))
            .with_width(25.0),
        ColumnSpec::derived("Τύπος Επικοινωνίας", |c: &Communication| c.comm_type.label()).with_width(18.0),
        ColumnSpec::derived("Ημ/νία Επικοινωνίας", |c: &Communication| {
            format_date_for_export(Some(c.communication_date.as_str()))
        })
        .with_width(18.0),
        ColumnSpec::field("Σημειώσεις", "notes").with_width(50.0),
        ColumnSpec::derived("Ημ/νία Καταχώρησης", |c: &Communication| {
            format_date_for_export(Some(c.created_at.as_str()))
        })
        .with_width(18.0),
    ]
}

/// ESSO renders only when both year and letter are known.
fn esso_cell(m: &MilitaryPersonnel) -> String {
    match (m.esso_year, m.esso_letter.as_deref()) {
        (Some(year), Some(letter)) if !letter.is_empty() => format!("{}{}", year, letter),
        _ => PLACEHOLDER.to_string(),
    }
}

pub fn military_columns() -> Vec<ColumnSpec<MilitaryPersonnel>> {
    vec![
        ColumnSpec::derived("Τύπος", |m: &MilitaryPersonnel| m.military_type.label()).with_width(12.0),
        ColumnSpec::field("Επίθετο", "surname").with_width(18.0),
        ColumnSpec::field("Όνομα", "first_name").with_width(15.0),
        ColumnSpec::field("Πατρώνυμο", "father_name").with_width(15.0),
        ColumnSpec::derived("Κινητό", |m: &MilitaryPersonnel| format_greek_phone(m.mobile.as_deref())).with_width(15.0),
        ColumnSpec::field("Email", "email").with_width(25.0),
        ColumnSpec::derived("ΕΣΣΟ", esso_cell).with_width(10.0),
        ColumnSpec::field("ΑΣΜ", "military_number").with_width(12.0),
        ColumnSpec::field("Κέντρο Εκπ.", "training_center").with_width(18.0),
        ColumnSpec::derived("Ημ/νία Παρουσ.", |m: &MilitaryPersonnel| {
            format_date_for_export(m.presentation_date.as_deref())
        })
        .with_width(15.0),
        ColumnSpec::field("Τοποθέτηση", "assignment").with_width(20.0),
        ColumnSpec::derived("Ημ/νία Τοποθ.", |m: &MilitaryPersonnel| {
            format_date_for_export(m.assignment_date.as_deref())
        })
        .with_width(15.0),
        ColumnSpec::field("Μετάθεση", "transfer").with_width(20.0),
        ColumnSpec::derived("Ημ/νία Μετάθ.", |m: &MilitaryPersonnel| {
            format_date_for_export(m.transfer_date.as_deref())
        })
        .with_width(15.0),
        ColumnSpec::field("Επιθυμία Στρατ.", "conscript_wish").with_width(25.0),
        ColumnSpec::field("Βαθμός", "rank").with_width(15.0),
        ColumnSpec::field("Μονάδα", "service_unit").with_width(20.0),
        ColumnSpec::field("ΑΜ", "service_number").with_width(12.0),
        ColumnSpec::field("Επιθυμία Μόνιμου", "permanent_wish").with_width(25.0),
        ColumnSpec::field("Εκκρεμή Αιτ.", "requests_pending").with_width(12.0),
        ColumnSpec::field("Ολοκλ. Αιτ.", "requests_completed").with_width(12.0),
        ColumnSpec::field("Σύνολο Αιτ.", "requests_total").with_width(12.0),
        ColumnSpec::field("Σημειώσεις", "notes").with_width(40.0),
        ColumnSpec::derived("Ημ/νία Δημιουργίας", |m: &MilitaryPersonnel| {
            format_date_for_export(Some(m.created_at.as_str()))
        })
        .with_width(15.0),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ExportGrid, SheetCell};
    use engine::record::{MilitaryType, RequestCategory, RequestStatus};

    fn text(s: &str) -> SheetCell {
        SheetCell::Text(s.to_string())
    }

    #[test]
    fn test_export_formatters() {
        assert_eq!(format_date_for_export(Some("2024-03-05T10:00:00Z")), "05/03/2024");
        assert_eq!(format_date_for_export(Some("garbage")), "-");
        assert_eq!(format_date_for_export(None), "-");
        assert_eq!(format_bool_for_export(Some(false)), "Όχι");
        assert_eq!(format_bool_for_export(None), "-");
    }

    #[test]
    fn test_citizen_row() {
        let mut citizen = Citizen::new("c1", "Παπαδόπουλος", "Γιώργος");
        citizen.mobile = Some("6912345678".to_string());
        citizen.municipality = Some("KALAMARIA".to_string());
        citizen.created_at = "2024-01-15".to_string();
        let columns = citizen_columns();
        let grid = ExportGrid::build(&[citizen], &columns);

        assert_eq!(grid.headers.len(), 20);
        let row = &grid.rows[0];
        assert_eq!(row[0], text("Παπαδόπουλος"));
        assert_eq!(row[2], text("-"));
        assert_eq!(row[3], text("691 234 5678"));
        assert_eq!(row[4], text("-"));
        assert_eq!(row[9], text("Καλαμαριά"));
        assert_eq!(row[11], text("Αίτημα"));
        assert_eq!(row[14], SheetCell::Number(0.0));
        assert_eq!(row[17], text("Ναι"));
        assert_eq!(row[19], text("15/01/2024"));
        assert_eq!(grid.widths[7], 8.0);
    }

    #[test]
    fn test_request_row_without_citizen() {
        let request = ServiceRequest::new("r1", "c1", RequestCategory::Medical, RequestStatus::Pending, "2024-02-01");
        let columns = request_columns();
        let grid = ExportGrid::build(&[request], &columns);
        let row = &grid.rows[0];
        assert_eq!(row[0], text("-"));
        assert_eq!(row[1], text("-"));
        assert_eq!(row[2], text("-"));
        assert_eq!(row[4], text(RequestStatus::Pending.label()));
        assert_eq!(row[6], text("01/02/2024"));
        assert_eq!(row[7], text("-"));
    }

    #[test]
    fn test_military_esso_needs_year_and_letter() {
        let mut person = MilitaryPersonnel::new("m1", MilitaryType::Conscript, "Νικολάου", "Άρης");
        person.esso_year = Some(2024);
        assert_eq!(esso_cell(&person), "-");
        person.esso_letter = Some("Α".to_string());
        assert_eq!(esso_cell(&person), "2024Α");

        let columns = military_columns();
        assert_eq!(columns.len(), 24);
        let grid = ExportGrid::build(&[person], &columns);
        assert_eq!(grid.rows[0][6], text("2024Α"));
    }

    #[test]
    fn test_communication_columns_count() {
        assert_eq!(communication_columns().len(), 7);
    }
}
