//! FILENAME: engine/src/lib.rs
//! PURPOSE: Main library entry point for the CRM list engine.
//! CONTEXT: Records, accent-insensitive filtering, pagination, search and the
//! change feed. Re-exports public types for the persistence and stats crates.

pub mod config;
pub mod dates;
pub mod feed;
pub mod filter;
pub mod logging;
pub mod normalize;
pub mod pagination;
pub mod presets;
pub mod record;
pub mod search;
pub mod validators;
pub mod view;

// Re-export commonly used types at the crate root
pub use config::{ConfigError, CrmConfig};
pub use feed::{
    ChangeEvent, ChangeFeed, ChangeOp, EntityKind, FetchError, MemoryStore, RecordSource,
    StoredRecord, SubscriptionId,
};
pub use filter::{Criterion, FilterCriteria, NumberField, TextField};
pub use normalize::{matches, normalize, starts_with};
pub use pagination::{
    derive, Page, PageLink, Paginator, PersistedPageChange, QueryParams, QueryState,
};
pub use presets::{
    CitizenFilter, CommunicationFilter, HasRequestCounts, MilitaryFilter, RequestCountFilter,
    RequestFilter,
};
pub use record::{
    attach_request_counts, Citizen, CitizenRef, Communication, CommunicationType, FieldValue,
    MilitaryPersonnel, MilitaryType, Record, RequestCategory, RequestCounts, RequestStatus,
    ServiceRequest,
};
pub use search::{global_search, SearchHit, SearchKind, SearchResults, SearchScope};
pub use validators::ValidationError;
pub use view::{derive_filtered_page, ListView, PageRequest};

#[cfg(test)]
mod tests {
    use super::*;

    fn surname(c: &Citizen) -> Option<&str> {
        Some(&c.surname)
    }

    #[test]
    fn it_matches_without_accents() {
        let records = vec![Citizen::new("c1", "Παπαδόπουλος", "Γιώργος")];
        let criteria = FilterCriteria::new().text("παπαδοπουλοσ", vec![surname as TextField<Citizen>]);
        assert_eq!(criteria.apply(&records).len(), 1);
    }

    #[test]
    fn it_pages_forty_five_items() {
        let items: Vec<u32> = (1..=45).collect();
        assert_eq!(derive(&items, 10, 1).items, (1..=10).collect::<Vec<_>>());
        assert_eq!(derive(&items, 10, 5).items, vec![41, 42, 43, 44, 45]);
        assert_eq!(derive(&items, 10, 6), derive(&items, 10, 5));
    }

    #[test]
    fn integration_test_store_filter_paginate_workflow() {
        let mut store = MemoryStore::new();
        let config = CrmConfig::from_json(r#"{"items_per_page": 2}"#).unwrap();
        let mut view: ListView<Citizen> = ListView::new(Paginator::from(&config));
        view.watch(store.feed_mut(), EntityKind::Citizens);

        for (i, (surname, municipality)) in [
            ("Παπαδόπουλος", "THESSALONIKI"),
            ("Παπαδάκης", "THESSALONIKI"),
            ("Νικολάου", "KALAMARIA"),
            ("Παππάς", "THESSALONIKI"),
        ]
        .iter()
        .enumerate()
        {
            let mut citizen = Citizen::new(format!("c{}", i), *surname, "Όνομα");
            citizen.municipality = Some(municipality.to_string());
            citizen.created_at = format!("2024-01-0{}", i + 1);
            store.upsert(citizen).unwrap();
        }
        store
            .upsert(ServiceRequest::new("r1", "c0", RequestCategory::Medical, RequestStatus::Pending, "2024-02-01"))
            .unwrap();

        assert!(view.is_stale());
        view.refresh_from(store.list_citizens());

        let filter = CitizenFilter {
            search: "παπ".to_string(),
            municipality: "THESSALONIKI".to_string(),
            request_status: None,
        };
        view.set_page(2);
        let page = view.page(&filter.criteria());
        assert_eq!(page.total_items, 3);
        assert_eq!(page.total_pages, 2);
        assert_eq!(page.items.len(), 1);
        // newest first: c3, c1, c0
        assert_eq!(page.items[0].id, "c0");

        let pending = CitizenFilter {
            request_status: Some(RequestCountFilter::HasPending),
            ..Default::default()
        };
        let page = view.page(&pending.criteria());
        assert_eq!(page.current_page, 1);
        assert_eq!(page.items[0].id, "c0");
    }
}
