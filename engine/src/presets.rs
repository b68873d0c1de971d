//! FILENAME: engine/src/presets.rs
//! PURPOSE: The filter inputs of each list screen, turned into `FilterCriteria`.
//! CONTEXT: Dropdown values hold storage codes ("PENDING", "KALAMARIA"); an
//! empty string means "all". Request-status filters read the denormalized
//! request counts that the data-fetch layer attaches to each row.

use crate::filter::{Criterion, FilterCriteria};
use crate::record::{
    Citizen, Communication, MilitaryPersonnel, MilitaryType, RequestCounts, ServiceRequest,
};
use serde::{Deserialize, Serialize};

// ============================================================================
// REQUEST COUNT FILTER
// ============================================================================

/// Filters rows by the state of their related requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RequestCountFilter {
    /// At least one pending request.
    HasPending,
    /// Has requests and every one of them is completed.
    AllCompleted,
    HasRequests,
    NoRequests,
}

impl RequestCountFilter {
    pub const ALL: [RequestCountFilter; 4] = [
        RequestCountFilter::HasPending,
        RequestCountFilter::AllCompleted,
        RequestCountFilter::HasRequests,
        RequestCountFilter::NoRequests,
    ];

    pub fn code(self) -> &'static str {
        match self {
            RequestCountFilter::HasPending => "HAS_PENDING",
            RequestCountFilter::AllCompleted => "ALL_COMPLETED",
            RequestCountFilter::HasRequests => "HAS_REQUESTS",
            RequestCountFilter::NoRequests => "NO_REQUESTS",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            RequestCountFilter::HasPending => "Με εκκρεμή αιτήματα",
            RequestCountFilter::AllCompleted => "Όλα ολοκληρωμένα",
            RequestCountFilter::HasRequests => "Με αιτήματα",
            RequestCountFilter::NoRequests => "Χωρίς αιτήματα",
        }
    }

    /// Unknown codes (including the "all" placeholder) yield `None`.
    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.code() == code)
    }

    pub fn accepts(self, counts: &RequestCounts) -> bool {
        match self {
            RequestCountFilter::HasPending => counts.pending > 0,
            RequestCountFilter::AllCompleted => {
                counts.total > 0 && counts.pending == 0 && counts.not_completed == 0
            }
            RequestCountFilter::HasRequests => counts.total > 0,
            RequestCountFilter::NoRequests => counts.total == 0,
        }
    }
}

/// Rows that carry pre-populated request counts.
pub trait HasRequestCounts {
    fn request_counts(&self) -> &RequestCounts;
}

impl HasRequestCounts for Citizen {
    fn request_counts(&self) -> &RequestCounts {
        &self.request_counts
    }
}

impl HasRequestCounts for MilitaryPersonnel {
    fn request_counts(&self) -> &RequestCounts {
        &self.request_counts
    }
}

/// Builds the derived criterion for a request-count filter.
pub fn request_count_criterion<T: HasRequestCounts + 'static>(filter: RequestCountFilter) -> Criterion<T> {
    Criterion::Derived(Box::new(move |row: &T| filter.accepts(row.request_counts())))
}

fn count_set(values: &[bool]) -> usize {
    values.iter().filter(|set| **set).count()
}

// ============================================================================
// FIELD ACCESSORS
// ============================================================================

fn citizen_surname(c: &Citizen) -> Option<&str> {
    Some(&c.surname)
}

fn citizen_first_name(c: &Citizen) -> Option<&str> {
    Some(&c.first_name)
}

fn citizen_mobile(c: &Citizen) -> Option<&str> {
    c.mobile.as_deref()
}

fn citizen_email(c: &Citizen) -> Option<&str> {
    c.email.as_deref()
}

fn citizen_municipality(c: &Citizen) -> Option<&str> {
    c.municipality.as_deref()
}

fn request_citizen_surname(r: &ServiceRequest) -> Option<&str> {
    r.citizen.as_ref().map(|c| c.surname.as_str())
}

fn request_citizen_first_name(r: &ServiceRequest) -> Option<&str> {
    r.citizen.as_ref().map(|c| c.first_name.as_str())
}

fn request_text(r: &ServiceRequest) -> Option<&str> {
    r.request_text.as_deref()
}

fn request_status(r: &ServiceRequest) -> Option<&str> {
    Some(r.status.code())
}

fn request_category(r: &ServiceRequest) -> Option<&str> {
    Some(r.category.code())
}

fn comm_citizen_surname(c: &Communication) -> Option<&str> {
    c.citizen.as_ref().map(|c| c.surname.as_str())
}

fn comm_citizen_first_name(c: &Communication) -> Option<&str> {
    c.citizen.as_ref().map(|c| c.first_name.as_str())
}

fn comm_notes(c: &Communication) -> Option<&str> {
    c.notes.as_deref()
}

fn comm_type(c: &Communication) -> Option<&str> {
    Some(c.comm_type.code())
}

fn military_surname(m: &MilitaryPersonnel) -> Option<&str> {
    Some(&m.surname)
}

fn military_first_name(m: &MilitaryPersonnel) -> Option<&str> {
    Some(&m.first_name)
}

fn military_mobile(m: &MilitaryPersonnel) -> Option<&str> {
    m.mobile.as_deref()
}

fn military_type(m: &MilitaryPersonnel) -> Option<&str> {
    Some(m.military_type.code())
}

// ============================================================================
// SCREEN FILTERS
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CitizenFilter {
    pub search: String,
    pub municipality: String,
    pub request_status: Option<RequestCountFilter>,
}

impl CitizenFilter {
    pub fn criteria(&self) -> FilterCriteria<Citizen> {
        let mut criteria = FilterCriteria::new()
            .text(
                self.search.clone(),
                vec![citizen_surname, citizen_first_name, citizen_mobile, citizen_email],
            )
            .exact(self.municipality.clone(), citizen_municipality);
        if let Some(filter) = self.request_status {
            criteria = criteria.with(request_count_criterion(filter));
        }
        criteria
    }

    /// Dropdown filters in use (free text is not counted).
    pub fn active_filter_count(&self) -> usize {
        count_set(&[!self.municipality.is_empty(), self.request_status.is_some()])
    }

    pub fn has_filters(&self) -> bool {
        !self.search.is_empty() || self.active_filter_count() > 0
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RequestFilter {
    pub search: String,
    pub status: String,
    pub category: String,
}

impl RequestFilter {
    pub fn criteria(&self) -> FilterCriteria<ServiceRequest> {
        FilterCriteria::new()
            .text(
                self.search.clone(),
                vec![request_citizen_surname, request_citizen_first_name, request_text],
            )
            .exact(self.status.clone(), request_status)
            .exact(self.category.clone(), request_category)
    }

    pub fn active_filter_count(&self) -> usize {
        count_set(&[!self.status.is_empty(), !self.category.is_empty()])
    }

    pub fn has_filters(&self) -> bool {
        !self.search.is_empty() || self.active_filter_count() > 0
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CommunicationFilter {
    pub search: String,
    pub comm_type: String,
}

impl CommunicationFilter {
    pub fn criteria(&self) -> FilterCriteria<Communication> {
        FilterCriteria::new()
            .text(
                self.search.clone(),
                vec![comm_citizen_surname, comm_citizen_first_name, comm_notes],
            )
            .exact(self.comm_type.clone(), comm_type)
    }

    pub fn active_filter_count(&self) -> usize {
        count_set(&[!self.comm_type.is_empty()])
    }

    pub fn has_filters(&self) -> bool {
        !self.search.is_empty() || self.active_filter_count() > 0
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MilitaryFilter {
    pub search: String,
    pub military_type: String,
    /// ESSO intake prefix: a year ("2024") or year and letter ("2024Α").
    pub esso: String,
    pub request_status: Option<RequestCountFilter>,
}

/// Only conscripts have an ESSO intake, so permanent staff never match a set
/// ESSO filter.
pub fn esso_matches(person: &MilitaryPersonnel, esso: &str) -> bool {
    if esso.is_empty() {
        return true;
    }
    person.military_type == MilitaryType::Conscript && person.esso_code().starts_with(esso)
}

impl MilitaryFilter {
    pub fn criteria(&self) -> FilterCriteria<MilitaryPersonnel> {
        let mut criteria = FilterCriteria::new()
            .text(
                self.search.clone(),
                vec![military_surname, military_first_name, military_mobile],
            )
            .exact(self.military_type.clone(), military_type);
        if !self.esso.is_empty() {
            let esso = self.esso.clone();
            criteria = criteria.derived(move |m: &MilitaryPersonnel| esso_matches(m, &esso));
        }
        if let Some(filter) = self.request_status {
            criteria = criteria.with(request_count_criterion(filter));
        }
        criteria
    }

    pub fn active_filter_count(&self) -> usize {
        count_set(&[
            !self.military_type.is_empty(),
            !self.esso.is_empty(),
            self.request_status.is_some(),
        ])
    }

    pub fn has_filters(&self) -> bool {
        !self.search.is_empty() || self.active_filter_count() > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::{CitizenRef, RequestCategory, RequestStatus};

    fn counts(pending: u32, completed: u32, not_completed: u32) -> RequestCounts {
        RequestCounts {
            pending,
            completed,
            not_completed,
            total: pending + completed + not_completed,
        }
    }

    #[test]
    fn test_request_count_filter_kinds() {
        let none = counts(0, 0, 0);
        let pending = counts(1, 2, 0);
        let done = counts(0, 3, 0);
        let failed = counts(0, 1, 1);

        assert!(RequestCountFilter::HasPending.accepts(&pending));
        assert!(!RequestCountFilter::HasPending.accepts(&done));
        assert!(RequestCountFilter::AllCompleted.accepts(&done));
        assert!(!RequestCountFilter::AllCompleted.accepts(&failed));
        assert!(!RequestCountFilter::AllCompleted.accepts(&none));
        assert!(RequestCountFilter::HasRequests.accepts(&failed));
        assert!(RequestCountFilter::NoRequests.accepts(&none));
        assert_eq!(RequestCountFilter::from_code("all"), None);
    }

    #[test]
    fn test_citizen_filter_accent_insensitive() {
        let citizens = vec![
            Citizen::new("c1", "Παπαδόπουλος", "Γιώργος"),
            Citizen::new("c2", "Νικολάου", "Ελένη"),
        ];
        let filter = CitizenFilter {
            search: "παπαδοπουλοσ".to_string(),
            ..Default::default()
        };
        let found = filter.criteria().apply(&citizens);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, "c1");
        assert_eq!(filter.active_filter_count(), 0);
        assert!(filter.has_filters());
    }

    #[test]
    fn test_citizen_filter_municipality_and_counts() {
        let mut a = Citizen::new("c1", "Α", "Α");
        a.municipality = Some("KALAMARIA".to_string());
        a.request_counts = counts(1, 0, 0);
        let mut b = Citizen::new("c2", "Β", "Β");
        b.municipality = Some("KALAMARIA".to_string());
        let c = Citizen::new("c3", "Γ", "Γ");
        let citizens = vec![a, b, c];

        let filter = CitizenFilter {
            municipality: "KALAMARIA".to_string(),
            request_status: Some(RequestCountFilter::HasPending),
            ..Default::default()
        };
        let found = filter.criteria().apply(&citizens);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, "c1");
        assert_eq!(filter.active_filter_count(), 2);
    }

    #[test]
    fn test_request_filter() {
        let mut r1 = ServiceRequest::new("r1", "c1", RequestCategory::Medical, RequestStatus::Pending, "2024-01-01");
        r1.citizen = Some(CitizenRef {
            id: "c1".to_string(),
            surname: "Παπαδόπουλος".to_string(),
            first_name: "Γιώργος".to_string(),
            ..Default::default()
        });
        let mut r2 = ServiceRequest::new("r2", "c2", RequestCategory::Police, RequestStatus::Completed, "2024-01-02");
        r2.request_text = Some("Μετάθεση στρατιώτη".to_string());
        let requests = vec![r1, r2];

        let by_name = RequestFilter { search: "γιωργ".to_string(), ..Default::default() };
        assert_eq!(by_name.criteria().count(&requests), 1);

        let by_text = RequestFilter { search: "μεταθεση".to_string(), ..Default::default() };
        assert_eq!(by_text.criteria().apply(&requests)[0].id, "r2");

        let by_status = RequestFilter {
            status: "PENDING".to_string(),
            category: "MEDICAL".to_string(),
            ..Default::default()
        };
        assert_eq!(by_status.criteria().apply(&requests)[0].id, "r1");

        let mismatch = RequestFilter {
            status: "PENDING".to_string(),
            category: "POLICE".to_string(),
            ..Default::default()
        };
        assert_eq!(mismatch.criteria().count(&requests), 0);
    }

    #[test]
    fn test_communication_filter() {
        let mut k1 = Communication::new("k1", "c1", crate::record::CommunicationType::Phone, "2024-01-01");
        k1.notes = Some("Ενημέρωση για το αίτημα".to_string());
        let k2 = Communication::new("k2", "c2", crate::record::CommunicationType::Email, "2024-01-02");
        let comms = vec![k1, k2];

        let filter = CommunicationFilter { search: "ενημερωση".to_string(), ..Default::default() };
        assert_eq!(filter.criteria().apply(&comms)[0].id, "k1");

        let by_type = CommunicationFilter { comm_type: "EMAIL".to_string(), ..Default::default() };
        assert_eq!(by_type.criteria().apply(&comms)[0].id, "k2");
    }

    #[test]
    fn test_military_esso_filter() {
        let mut conscript = MilitaryPersonnel::new("m1", MilitaryType::Conscript, "Νικολάου", "Άρης");
        conscript.esso_year = Some(2024);
        conscript.esso_letter = Some("Α".to_string());
        let mut other_intake = MilitaryPersonnel::new("m2", MilitaryType::Conscript, "Γεωργίου", "Νίκος");
        other_intake.esso_year = Some(2024);
        other_intake.esso_letter = Some("Β".to_string());
        let permanent = MilitaryPersonnel::new("m3", MilitaryType::Permanent, "Δημητρίου", "Κώστας");
        let military = vec![conscript, other_intake, permanent];

        let year = MilitaryFilter { esso: "2024".to_string(), ..Default::default() };
        assert_eq!(year.criteria().count(&military), 2);

        let intake = MilitaryFilter { esso: "2024Α".to_string(), ..Default::default() };
        let found = intake.criteria().apply(&military);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, "m1");

        let permanent_only = MilitaryFilter { military_type: "PERMANENT".to_string(), ..Default::default() };
        assert_eq!(permanent_only.criteria().apply(&military)[0].id, "m3");

        let search = MilitaryFilter { search: "κωστα".to_string(), ..Default::default() };
        assert_eq!(search.criteria().apply(&military)[0].id, "m3");
        assert_eq!(intake.active_filter_count(), 1);
    }
}
