//! FILENAME: engine/src/validators.rs
//! PURPOSE: Field validation and display formatting for record forms.
//! CONTEXT: Mirrors the checks the entry forms run before a record is sent
//! to storage. Optional fields are valid when empty. Messages are the Greek
//! texts shown next to the offending input.

use crate::record::{Citizen, Communication, MilitaryPersonnel, ServiceRequest};
use once_cell::sync::Lazy;
use regex::Regex;

static GREEK_PHONE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\+30)?[2-9][0-9]{9}$").expect("valid phone pattern"));

static GREEK_POSTAL_CODE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]{5}$").expect("valid postal code pattern"));

static EMAIL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email pattern"));

/// A single failed check: the field it belongs to and the message to show.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub field: &'static str,
    pub message: &'static str,
}

impl ValidationError {
    fn new(field: &'static str, message: &'static str) -> Self {
        ValidationError { field, message }
    }
}

fn is_blank(value: Option<&str>) -> bool {
    value.map(|v| v.trim().is_empty()).unwrap_or(true)
}

// ============================================================================
// FIELD CHECKS
// ============================================================================

/// Whitespace is ignored; an empty value is valid (optional field).
pub fn validate_greek_phone(phone: &str) -> bool {
    if phone.is_empty() {
        return true;
    }
    let cleaned: String = phone.chars().filter(|c| !c.is_whitespace()).collect();
    GREEK_PHONE.is_match(&cleaned)
}

pub fn validate_postal_code(code: &str) -> bool {
    code.is_empty() || GREEK_POSTAL_CODE.is_match(code)
}

pub fn validate_email(email: &str) -> bool {
    email.is_empty() || EMAIL.is_match(email)
}

/// Formats a phone number for display.
/// "6912345678" -> "691 234 5678", "306912345678" -> "+30 691 234 5678".
/// Absent numbers render as "-", unrecognized shapes are returned as given.
pub fn format_greek_phone(phone: Option<&str>) -> String {
    let phone = match phone {
        Some(p) if !p.is_empty() => p,
        _ => return "-".to_string(),
    };
    let digits: String = phone.chars().filter(|c| c.is_ascii_digit()).collect();
    if digits.len() == 10 {
        return format!("{} {} {}", &digits[..3], &digits[3..6], &digits[6..]);
    }
    if digits.len() == 12 && digits.starts_with("30") {
        return format!("+30 {} {} {}", &digits[2..5], &digits[5..8], &digits[8..]);
    }
    phone.to_string()
}

fn check_phone(errors: &mut Vec<ValidationError>, field: &'static str, value: Option<&str>, message: &'static str) {
    if let Some(v) = value {
        if !validate_greek_phone(v) {
            errors.push(ValidationError::new(field, message));
        }
    }
}

fn check_email(errors: &mut Vec<ValidationError>, value: Option<&str>) {
    if let Some(v) = value {
        if !validate_email(v) {
            errors.push(ValidationError::new("email", "Μη έγκυρο email"));
        }
    }
}

// ============================================================================
// FORM CHECKS
// ============================================================================

pub fn validate_citizen(citizen: &Citizen) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    if citizen.surname.trim().is_empty() {
        errors.push(ValidationError::new("surname", "Το επίθετο είναι υποχρεωτικό"));
    }
    if citizen.first_name.trim().is_empty() {
        errors.push(ValidationError::new("first_name", "Το όνομα είναι υποχρεωτικό"));
    }
    check_phone(&mut errors, "mobile", citizen.mobile.as_deref(), "Μη έγκυρος αριθμός κινητού");
    check_phone(&mut errors, "landline", citizen.landline.as_deref(), "Μη έγκυρος αριθμός σταθερού");
    check_email(&mut errors, citizen.email.as_deref());
    if let Some(code) = citizen.postal_code.as_deref() {
        if !validate_postal_code(code) {
            errors.push(ValidationError::new("postal_code", "Ο Τ.Κ. πρέπει να είναι 5 ψηφία"));
        }
    }
    if citizen.contact_category.trim().is_empty() {
        errors.push(ValidationError::new("contact_category", "Επιλέξτε κατηγορία επαφής"));
    }
    if is_blank(citizen.mobile.as_deref())
        && is_blank(citizen.landline.as_deref())
        && is_blank(citizen.email.as_deref())
    {
        errors.push(ValidationError::new(
            "mobile",
            "Απαιτείται τουλάχιστον ένα στοιχείο επικοινωνίας (κινητό, σταθερό ή email)",
        ));
    }

    errors
}

pub fn validate_request(request: &ServiceRequest) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    if request.citizen_id.trim().is_empty() {
        errors.push(ValidationError::new("citizen_id", "Επιλέξτε πολίτη"));
    }
    errors
}

pub fn validate_communication(communication: &Communication) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    if communication.citizen_id.trim().is_empty() {
        errors.push(ValidationError::new("citizen_id", "Επιλέξτε πολίτη"));
    }
    if crate::dates::parse_date(&communication.communication_date).is_none() {
        errors.push(ValidationError::new("communication_date", "Μη έγκυρη ημερομηνία"));
    }
    errors
}

pub fn validate_military(person: &MilitaryPersonnel) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    if person.surname.trim().is_empty() {
        errors.push(ValidationError::new("surname", "Το επώνυμο είναι υποχρεωτικό"));
    }
    if person.first_name.trim().is_empty() {
        errors.push(ValidationError::new("first_name", "Το όνομα είναι υποχρεωτικό"));
    }
    check_phone(&mut errors, "mobile", person.mobile.as_deref(), "Μη έγκυρος αριθμός κινητού");
    check_email(&mut errors, person.email.as_deref());
    if is_blank(person.mobile.as_deref()) && is_blank(person.email.as_deref()) {
        errors.push(ValidationError::new(
            "mobile",
            "Απαιτείται τουλάχιστον ένα στοιχείο επικοινωνίας (κινητό ή email)",
        ));
    }

    errors
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::{CommunicationType, MilitaryType};

    #[test]
    fn test_phone_validation() {
        assert!(validate_greek_phone("6912345678"));
        assert!(validate_greek_phone("691 234 5678"));
        assert!(validate_greek_phone("+306912345678"));
        assert!(validate_greek_phone("2310123456"));
        assert!(validate_greek_phone(""));
        assert!(!validate_greek_phone("1234567890"));
        assert!(!validate_greek_phone("69123"));
    }

    #[test]
    fn test_postal_code_and_email() {
        assert!(validate_postal_code("54621"));
        assert!(!validate_postal_code("5462"));
        assert!(validate_postal_code(""));
        assert!(validate_email("info@example.gr"));
        assert!(!validate_email("not-an-email"));
    }

    #[test]
    fn test_format_greek_phone() {
        assert_eq!(format_greek_phone(Some("6912345678")), "691 234 5678");
        assert_eq!(format_greek_phone(Some("+306912345678")), "+30 691 234 5678");
        assert_eq!(format_greek_phone(Some("12345")), "12345");
        assert_eq!(format_greek_phone(None), "-");
        assert_eq!(format_greek_phone(Some("")), "-");
    }

    #[test]
    fn test_citizen_requires_a_contact() {
        let citizen = Citizen::new("c1", "Παπαδόπουλος", "Γιώργος");
        let errors = validate_citizen(&citizen);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "mobile");

        let mut with_email = citizen.clone();
        with_email.email = Some("g@example.gr".to_string());
        assert!(validate_citizen(&with_email).is_empty());
    }

    #[test]
    fn test_citizen_field_errors() {
        let mut citizen = Citizen::new("c1", "", "Γιώργος");
        citizen.mobile = Some("123".to_string());
        citizen.postal_code = Some("abc".to_string());
        let fields: Vec<_> = validate_citizen(&citizen).iter().map(|e| e.field).collect();
        assert_eq!(fields, vec!["surname", "mobile", "postal_code"]);
    }

    #[test]
    fn test_military_and_communication() {
        let person = MilitaryPersonnel::new("m1", MilitaryType::Permanent, "Νικολάου", "Άρης");
        assert_eq!(validate_military(&person).len(), 1);

        let comm = Communication::new("k1", "c1", CommunicationType::Phone, "2024-02-30");
        let errors = validate_communication(&comm);
        assert_eq!(errors, vec![ValidationError::new("communication_date", "Μη έγκυρη ημερομηνία")]);
    }
}
