//! FILENAME: engine/src/record.rs
//! PURPOSE: Defines the domain records handled by the CRM utilities.
//! CONTEXT: Records are owned by the storage collaborator and arrive here as
//! immutable snapshots. Nothing in this crate mutates a record except the
//! data-fetch helpers that pre-populate denormalized request counts.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

// ============================================================================
// FIELD VALUES
// ============================================================================

/// A single field read off a record by name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum FieldValue {
    Null,
    Number(f64),
    Text(String),
    Boolean(bool),
}

impl FieldValue {
    /// Returns the text content, if this is a text value.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, FieldValue::Null)
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

impl From<&String> for FieldValue {
    fn from(value: &String) -> Self {
        FieldValue::Text(value.clone())
    }
}

impl From<&Option<String>> for FieldValue {
    fn from(value: &Option<String>) -> Self {
        match value {
            Some(s) => FieldValue::Text(s.clone()),
            None => FieldValue::Null,
        }
    }
}

impl From<Option<String>> for FieldValue {
    fn from(value: Option<String>) -> Self {
        value.map(FieldValue::Text).unwrap_or(FieldValue::Null)
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        FieldValue::Number(value)
    }
}

impl From<u32> for FieldValue {
    fn from(value: u32) -> Self {
        FieldValue::Number(value as f64)
    }
}

impl From<Option<i32>> for FieldValue {
    fn from(value: Option<i32>) -> Self {
        value
            .map(|n| FieldValue::Number(n as f64))
            .unwrap_or(FieldValue::Null)
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        FieldValue::Boolean(value)
    }
}

/// A domain entity with a stable identifier and named fields.
pub trait Record {
    fn id(&self) -> &str;

    /// Reads a field by its storage name. Unknown names read as `Null`.
    fn field(&self, name: &str) -> FieldValue;
}

// ============================================================================
// OPTION TABLES
// ============================================================================

/// A value/label pair for dropdown-backed string fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectOption {
    pub value: &'static str,
    pub label: &'static str,
}

const fn opt(value: &'static str, label: &'static str) -> SelectOption {
    SelectOption { value, label }
}

pub const MUNICIPALITY_OPTIONS: &[SelectOption] = &[
    opt("THESSALONIKI", "Θεσσαλονίκη"),
    opt("KALAMARIA", "Καλαμαριά"),
    opt("PAVLOS_MELAS", "Παύλος Μελάς"),
    opt("KORDELIO_EVOSMOS", "Κορδελιό-Εύοσμος"),
    opt("AMPELOKIPOI_MENEMENI", "Αμπελόκηποι-Μενεμένη"),
    opt("NEAPOLI_SYKIES", "Νεάπολη-Συκιές"),
    opt("OTHER", "Άλλος"),
];

pub const ELECTORAL_DISTRICT_OPTIONS: &[SelectOption] = &[
    opt("THESSALONIKI_A", "Α' Θεσσαλονίκης"),
    opt("THESSALONIKI_B", "Β' Θεσσαλονίκης"),
    opt("OTHER", "Άλλη"),
];

pub const CONTACT_CATEGORY_OPTIONS: &[SelectOption] = &[
    opt("GDPR", "GDPR"),
    opt("REQUEST", "Αίτημα"),
    opt("BOTH", "GDPR & Αίτημα"),
    opt("MILITARY", "Στρατιωτικό"),
];

/// Resolves the display label for a stored option value.
/// Absent values render as "-"; values with no matching option render as-is.
pub fn label_for(options: &[SelectOption], value: Option<&str>) -> String {
    match value {
        None | Some("") => "-".to_string(),
        Some(v) => options
            .iter()
            .find(|o| o.value == v)
            .map(|o| o.label.to_string())
            .unwrap_or_else(|| v.to_string()),
    }
}

// ============================================================================
// ENUMERATIONS
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RequestStatus {
    Completed,
    #[default]
    Pending,
    NotCompleted,
}

impl RequestStatus {
    pub const ALL: [RequestStatus; 3] = [
        RequestStatus::Completed,
        RequestStatus::Pending,
        RequestStatus::NotCompleted,
    ];

    pub fn code(self) -> &'static str {
        match self {
            RequestStatus::Completed => "COMPLETED",
            RequestStatus::Pending => "PENDING",
            RequestStatus::NotCompleted => "NOT_COMPLETED",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            RequestStatus::Completed => "Ολοκληρωμένο",
            RequestStatus::Pending => "Εκκρεμεί",
            RequestStatus::NotCompleted => "Μη Ολοκληρωμένο",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.code() == code)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RequestCategory {
    Military,
    Medical,
    Police,
    FireDepartment,
    Education,
    Administrative,
    JobSearch,
    SocialSecurity,
    #[default]
    Other,
}

impl RequestCategory {
    pub const ALL: [RequestCategory; 9] = [
        RequestCategory::Military,
        RequestCategory::Medical,
        RequestCategory::Police,
        RequestCategory::FireDepartment,
        RequestCategory::Education,
        RequestCategory::Administrative,
        RequestCategory::JobSearch,
        RequestCategory::SocialSecurity,
        RequestCategory::Other,
    ];

    pub fn code(self) -> &'static str {
        match self {
            RequestCategory::Military => "MILITARY",
            RequestCategory::Medical => "MEDICAL",
            RequestCategory::Police => "POLICE",
            RequestCategory::FireDepartment => "FIRE_DEPARTMENT",
            RequestCategory::Education => "EDUCATION",
            RequestCategory::Administrative => "ADMINISTRATIVE",
            RequestCategory::JobSearch => "JOB_SEARCH",
            RequestCategory::SocialSecurity => "SOCIAL_SECURITY",
            RequestCategory::Other => "OTHER",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            RequestCategory::Military => "Στρατιωτικό",
            RequestCategory::Medical => "Ιατρικό",
            RequestCategory::Police => "Αστυνομικό",
            RequestCategory::FireDepartment => "Πυροσβεστική",
            RequestCategory::Education => "Παιδείας",
            RequestCategory::Administrative => "Διοικητικό",
            RequestCategory::JobSearch => "Εύρεση Εργασίας",
            RequestCategory::SocialSecurity => "ΕΦΚΑ",
            RequestCategory::Other => "Άλλο",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.code() == code)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CommunicationType {
    #[default]
    Phone,
    Email,
    InPerson,
    Sms,
    Other,
}

impl CommunicationType {
    pub fn code(self) -> &'static str {
        match self {
            CommunicationType::Phone => "PHONE",
            CommunicationType::Email => "EMAIL",
            CommunicationType::InPerson => "IN_PERSON",
            CommunicationType::Sms => "SMS",
            CommunicationType::Other => "OTHER",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            CommunicationType::Phone => "Τηλέφωνο",
            CommunicationType::Email => "Email",
            CommunicationType::InPerson => "Προσωπική",
            CommunicationType::Sms => "SMS",
            CommunicationType::Other => "Άλλο",
        }
    }

    /// Title used for this communication in the dashboard activity feed.
    pub fn activity_title(self) -> &'static str {
        match self {
            CommunicationType::Phone => "Τηλεφώνημα",
            CommunicationType::Email => "Email",
            CommunicationType::InPerson => "Προσωπική επαφή",
            other => other.code(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MilitaryType {
    #[default]
    Conscript,
    Permanent,
}

impl MilitaryType {
    pub fn code(self) -> &'static str {
        match self {
            MilitaryType::Conscript => "CONSCRIPT",
            MilitaryType::Permanent => "PERMANENT",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            MilitaryType::Conscript => "Στρατιώτης",
            MilitaryType::Permanent => "Μόνιμος",
        }
    }
}

// ============================================================================
// REQUEST COUNTS
// ============================================================================

/// Denormalized request counts carried on citizens and military personnel.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestCounts {
    #[serde(rename = "requests_pending", default)]
    pub pending: u32,
    #[serde(rename = "requests_completed", default)]
    pub completed: u32,
    #[serde(rename = "requests_not_completed", default)]
    pub not_completed: u32,
    #[serde(rename = "requests_total", default)]
    pub total: u32,
}

impl RequestCounts {
    pub fn record(&mut self, status: RequestStatus) {
        match status {
            RequestStatus::Pending => self.pending += 1,
            RequestStatus::Completed => self.completed += 1,
            RequestStatus::NotCompleted => self.not_completed += 1,
        }
        self.total += 1;
    }

    /// Counts the requests belonging to one citizen.
    pub fn tally(citizen_id: &str, requests: &[ServiceRequest]) -> Self {
        let mut counts = RequestCounts::default();
        for request in requests.iter().filter(|r| r.citizen_id == citizen_id) {
            counts.record(request.status);
        }
        counts
    }
}

/// Groups request counts by owning citizen in a single pass.
pub fn tally_by_citizen(requests: &[ServiceRequest]) -> HashMap<&str, RequestCounts> {
    let mut map: HashMap<&str, RequestCounts> = HashMap::new();
    for request in requests {
        map.entry(request.citizen_id.as_str())
            .or_default()
            .record(request.status);
    }
    map
}

/// Pre-populates request counts on citizens and military personnel.
/// Military rows without a linked citizen get zero counts.
pub fn attach_request_counts(
    citizens: &mut [Citizen],
    military: &mut [MilitaryPersonnel],
    requests: &[ServiceRequest],
) {
    let counts = tally_by_citizen(requests);
    for citizen in citizens.iter_mut() {
        citizen.request_counts = counts.get(citizen.id.as_str()).copied().unwrap_or_default();
    }
    for person in military.iter_mut() {
        person.request_counts = person
            .citizen_id
            .as_deref()
            .and_then(|id| counts.get(id).copied())
            .unwrap_or_default();
    }
}

// ============================================================================
// RECORDS
// ============================================================================

/// Short citizen summary embedded on related records.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CitizenRef {
    pub id: String,
    pub surname: String,
    pub first_name: String,
    #[serde(default)]
    pub mobile: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

impl CitizenRef {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.surname, self.first_name)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Citizen {
    pub id: String,
    pub surname: String,
    pub first_name: String,
    #[serde(default)]
    pub father_name: Option<String>,
    #[serde(default)]
    pub referral_source: Option<String>,
    #[serde(default)]
    pub mobile: Option<String>,
    #[serde(default)]
    pub landline: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub postal_code: Option<String>,
    #[serde(default)]
    pub area: Option<String>,
    #[serde(default)]
    pub municipality: Option<String>,
    #[serde(default)]
    pub electoral_district: Option<String>,
    #[serde(default)]
    pub contact_category: String,
    #[serde(default)]
    pub profession: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub is_active: bool,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub updated_at: String,
    #[serde(flatten)]
    pub request_counts: RequestCounts,
}

impl Citizen {
    pub fn new(id: impl Into<String>, surname: impl Into<String>, first_name: impl Into<String>) -> Self {
        Citizen {
            id: id.into(),
            surname: surname.into(),
            first_name: first_name.into(),
            contact_category: "REQUEST".to_string(),
            is_active: true,
            ..Default::default()
        }
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.surname, self.first_name)
    }

    pub fn to_ref(&self) -> CitizenRef {
        CitizenRef {
            id: self.id.clone(),
            surname: self.surname.clone(),
            first_name: self.first_name.clone(),
            mobile: self.mobile.clone(),
            email: self.email.clone(),
        }
    }
}

impl Record for Citizen {
    fn id(&self) -> &str {
        &self.id
    }

    fn field(&self, name: &str) -> FieldValue {
        match name {
            "id" => (&self.id).into(),
            "surname" => (&self.surname).into(),
            "first_name" => (&self.first_name).into(),
            "father_name" => (&self.father_name).into(),
            "referral_source" => (&self.referral_source).into(),
            "mobile" => (&self.mobile).into(),
            "landline" => (&self.landline).into(),
            "email" => (&self.email).into(),
            "address" => (&self.address).into(),
            "postal_code" => (&self.postal_code).into(),
            "area" => (&self.area).into(),
            "municipality" => (&self.municipality).into(),
            "electoral_district" => (&self.electoral_district).into(),
            "contact_category" => (&self.contact_category).into(),
            "profession" => (&self.profession).into(),
            "notes" => (&self.notes).into(),
            "is_active" => self.is_active.into(),
            "created_at" => (&self.created_at).into(),
            "updated_at" => (&self.updated_at).into(),
            "requests_pending" => self.request_counts.pending.into(),
            "requests_completed" => self.request_counts.completed.into(),
            "requests_not_completed" => self.request_counts.not_completed.into(),
            "requests_total" => self.request_counts.total.into(),
            _ => FieldValue::Null,
        }
    }
}

/// A service request filed on behalf of a citizen.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ServiceRequest {
    pub id: String,
    pub citizen_id: String,
    pub category: RequestCategory,
    pub status: RequestStatus,
    #[serde(default)]
    pub request_text: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    pub submitted_at: String,
    #[serde(default)]
    pub completed_at: Option<String>,
    #[serde(default)]
    pub reminder_sent: bool,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub citizen: Option<CitizenRef>,
}

impl ServiceRequest {
    pub fn new(
        id: impl Into<String>,
        citizen_id: impl Into<String>,
        category: RequestCategory,
        status: RequestStatus,
        submitted_at: impl Into<String>,
    ) -> Self {
        let submitted_at = submitted_at.into();
        ServiceRequest {
            id: id.into(),
            citizen_id: citizen_id.into(),
            category,
            status,
            created_at: submitted_at.clone(),
            submitted_at,
            ..Default::default()
        }
    }
}

impl Record for ServiceRequest {
    fn id(&self) -> &str {
        &self.id
    }

    fn field(&self, name: &str) -> FieldValue {
        match name {
            "id" => (&self.id).into(),
            "citizen_id" => (&self.citizen_id).into(),
            "category" => self.category.code().into(),
            "status" => self.status.code().into(),
            "request_text" => (&self.request_text).into(),
            "notes" => (&self.notes).into(),
            "submitted_at" => (&self.submitted_at).into(),
            "completed_at" => (&self.completed_at).into(),
            "reminder_sent" => self.reminder_sent.into(),
            "created_at" => (&self.created_at).into(),
            _ => FieldValue::Null,
        }
    }
}

/// One logged contact with a citizen.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Communication {
    pub id: String,
    pub citizen_id: String,
    pub communication_date: String,
    pub comm_type: CommunicationType,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub citizen: Option<CitizenRef>,
}

impl Communication {
    pub fn new(
        id: impl Into<String>,
        citizen_id: impl Into<String>,
        comm_type: CommunicationType,
        communication_date: impl Into<String>,
    ) -> Self {
        let communication_date = communication_date.into();
        Communication {
            id: id.into(),
            citizen_id: citizen_id.into(),
            comm_type,
            created_at: communication_date.clone(),
            communication_date,
            ..Default::default()
        }
    }
}

impl Record for Communication {
    fn id(&self) -> &str {
        &self.id
    }

    fn field(&self, name: &str) -> FieldValue {
        match name {
            "id" => (&self.id).into(),
            "citizen_id" => (&self.citizen_id).into(),
            "communication_date" => (&self.communication_date).into(),
            "comm_type" => self.comm_type.code().into(),
            "notes" => (&self.notes).into(),
            "created_at" => (&self.created_at).into(),
            _ => FieldValue::Null,
        }
    }
}

/// A conscript or permanent service member tracked by the office.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MilitaryPersonnel {
    pub id: String,
    #[serde(default)]
    pub citizen_id: Option<String>,
    pub military_type: MilitaryType,
    pub surname: String,
    pub first_name: String,
    #[serde(default)]
    pub father_name: Option<String>,
    #[serde(default)]
    pub mobile: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    // Conscript fields
    #[serde(default)]
    pub esso_year: Option<i32>,
    #[serde(default)]
    pub esso_letter: Option<String>,
    #[serde(default)]
    pub military_number: Option<String>,
    #[serde(default)]
    pub conscript_wish: Option<String>,
    #[serde(default)]
    pub training_center: Option<String>,
    #[serde(default)]
    pub presentation_date: Option<String>,
    #[serde(default)]
    pub assignment: Option<String>,
    #[serde(default)]
    pub assignment_date: Option<String>,
    #[serde(default)]
    pub transfer: Option<String>,
    #[serde(default)]
    pub transfer_date: Option<String>,
    // Permanent fields
    #[serde(default)]
    pub rank: Option<String>,
    #[serde(default)]
    pub service_unit: Option<String>,
    #[serde(default)]
    pub permanent_wish: Option<String>,
    #[serde(default)]
    pub service_number: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub updated_at: String,
    #[serde(flatten)]
    pub request_counts: RequestCounts,
}

impl MilitaryPersonnel {
    pub fn new(
        id: impl Into<String>,
        military_type: MilitaryType,
        surname: impl Into<String>,
        first_name: impl Into<String>,
    ) -> Self {
        MilitaryPersonnel {
            id: id.into(),
            military_type,
            surname: surname.into(),
            first_name: first_name.into(),
            ..Default::default()
        }
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.surname, self.first_name)
    }

    /// ESSO intake code, e.g. "2024Α". Empty parts are skipped.
    pub fn esso_code(&self) -> String {
        let year = self.esso_year.map(|y| y.to_string()).unwrap_or_default();
        format!("{}{}", year, self.esso_letter.as_deref().unwrap_or(""))
    }
}

impl Record for MilitaryPersonnel {
    fn id(&self) -> &str {
        &self.id
    }

    fn field(&self, name: &str) -> FieldValue {
        match name {
            "id" => (&self.id).into(),
            "citizen_id" => (&self.citizen_id).into(),
            "military_type" => self.military_type.code().into(),
            "surname" => (&self.surname).into(),
            "first_name" => (&self.first_name).into(),
            "father_name" => (&self.father_name).into(),
            "mobile" => (&self.mobile).into(),
            "email" => (&self.email).into(),
            "esso_year" => self.esso_year.into(),
            "esso_letter" => (&self.esso_letter).into(),
            "military_number" => (&self.military_number).into(),
            "conscript_wish" => (&self.conscript_wish).into(),
            "training_center" => (&self.training_center).into(),
            "presentation_date" => (&self.presentation_date).into(),
            "assignment" => (&self.assignment).into(),
            "assignment_date" => (&self.assignment_date).into(),
            "transfer" => (&self.transfer).into(),
            "transfer_date" => (&self.transfer_date).into(),
            "rank" => (&self.rank).into(),
            "service_unit" => (&self.service_unit).into(),
            "permanent_wish" => (&self.permanent_wish).into(),
            "service_number" => (&self.service_number).into(),
            "notes" => (&self.notes).into(),
            "created_at" => (&self.created_at).into(),
            "updated_at" => (&self.updated_at).into(),
            "requests_pending" => self.request_counts.pending.into(),
            "requests_completed" => self.request_counts.completed.into(),
            "requests_not_completed" => self.request_counts.not_completed.into(),
            "requests_total" => self.request_counts.total.into(),
            _ => FieldValue::Null,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_for_known_unknown_and_missing() {
        assert_eq!(label_for(MUNICIPALITY_OPTIONS, Some("KALAMARIA")), "Καλαμαριά");
        assert_eq!(label_for(MUNICIPALITY_OPTIONS, Some("ATLANTIS")), "ATLANTIS");
        assert_eq!(label_for(MUNICIPALITY_OPTIONS, None), "-");
        assert_eq!(label_for(MUNICIPALITY_OPTIONS, Some("")), "-");
    }

    #[test]
    fn test_status_codes_round_trip_through_from_code() {
        for status in RequestStatus::ALL {
            assert_eq!(RequestStatus::from_code(status.code()), Some(status));
        }
        assert_eq!(RequestStatus::from_code("UNKNOWN"), None);
    }

    #[test]
    fn test_attach_request_counts() {
        let mut citizens = vec![Citizen::new("c1", "Α", "Β"), Citizen::new("c2", "Γ", "Δ")];
        let mut linked = MilitaryPersonnel::new("m1", MilitaryType::Conscript, "Ε", "Ζ");
        linked.citizen_id = Some("c1".to_string());
        let unlinked = MilitaryPersonnel::new("m2", MilitaryType::Permanent, "Η", "Θ");
        let mut military = vec![linked, unlinked];

        let requests = vec![
            ServiceRequest::new("r1", "c1", RequestCategory::Medical, RequestStatus::Pending, "2024-01-01"),
            ServiceRequest::new("r2", "c1", RequestCategory::Medical, RequestStatus::Completed, "2024-01-02"),
            ServiceRequest::new("r3", "c1", RequestCategory::Police, RequestStatus::NotCompleted, "2024-01-03"),
        ];

        attach_request_counts(&mut citizens, &mut military, &requests);

        assert_eq!(citizens[0].request_counts.pending, 1);
        assert_eq!(citizens[0].request_counts.completed, 1);
        assert_eq!(citizens[0].request_counts.not_completed, 1);
        assert_eq!(citizens[0].request_counts.total, 3);
        assert_eq!(citizens[1].request_counts, RequestCounts::default());
        assert_eq!(military[0].request_counts.total, 3);
        assert_eq!(military[1].request_counts.total, 0);
    }

    #[test]
    fn test_citizen_deserializes_flattened_counts() {
        let json = r#"{
            "id": "c1",
            "surname": "Παπαδόπουλος",
            "first_name": "Γιώργος",
            "contact_category": "REQUEST",
            "is_active": true,
            "requests_pending": 2,
            "requests_total": 3
        }"#;
        let citizen: Citizen = serde_json::from_str(json).unwrap();
        assert_eq!(citizen.request_counts.pending, 2);
        assert_eq!(citizen.request_counts.total, 3);
        assert_eq!(citizen.mobile, None);
    }

    #[test]
    fn test_field_access_by_name() {
        let mut person = MilitaryPersonnel::new("m1", MilitaryType::Conscript, "Νικολάου", "Άρης");
        person.esso_year = Some(2024);
        person.esso_letter = Some("Α".to_string());

        assert_eq!(person.field("surname"), FieldValue::Text("Νικολάου".to_string()));
        assert_eq!(person.field("esso_year"), FieldValue::Number(2024.0));
        assert_eq!(person.field("mobile"), FieldValue::Null);
        assert_eq!(person.field("no_such_field"), FieldValue::Null);
        assert_eq!(person.esso_code(), "2024Α");
    }
}
