//! FILENAME: engine/src/search.rs
//! PURPOSE: Header search box across all record types.
//! CONTEXT: Runs over already-fetched snapshots, accent- and case-insensitive,
//! returning a handful of hits per record type with links to detail pages.

use crate::normalize::{matches, normalize};
use crate::record::{Citizen, Communication, MilitaryPersonnel, MilitaryType, ServiceRequest};
use serde::Serialize;

/// Queries shorter than this return nothing.
pub const MIN_QUERY_CHARS: usize = 2;

/// Hits kept per record type.
pub const MAX_HITS_PER_KIND: usize = 5;

/// Titles longer than this are cut and suffixed with "...".
const TITLE_MAX_CHARS: usize = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchKind {
    Citizen,
    Request,
    Communication,
    Military,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchHit {
    pub id: String,
    pub kind: SearchKind,
    pub title: String,
    pub subtitle: String,
    pub href: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SearchResults {
    pub citizens: Vec<SearchHit>,
    pub requests: Vec<SearchHit>,
    pub communications: Vec<SearchHit>,
    pub military: Vec<SearchHit>,
}

impl SearchResults {
    pub fn is_empty(&self) -> bool {
        self.citizens.is_empty()
            && self.requests.is_empty()
            && self.communications.is_empty()
            && self.military.is_empty()
    }

    pub fn total(&self) -> usize {
        self.citizens.len() + self.requests.len() + self.communications.len() + self.military.len()
    }
}

/// Borrowed snapshots to search over.
#[derive(Debug, Clone, Copy, Default)]
pub struct SearchScope<'a> {
    pub citizens: &'a [Citizen],
    pub requests: &'a [ServiceRequest],
    pub communications: &'a [Communication],
    pub military: &'a [MilitaryPersonnel],
}

fn truncate_title(text: &str) -> String {
    if text.chars().count() > TITLE_MAX_CHARS {
        let cut: String = text.chars().take(TITLE_MAX_CHARS).collect();
        format!("{}...", cut)
    } else {
        text.to_string()
    }
}

fn any_match(fields: &[Option<&str>], query: &str) -> bool {
    fields.iter().any(|f| matches(*f, query))
}

pub fn global_search(query: &str, scope: SearchScope<'_>) -> SearchResults {
    let query = query.trim();
    if query.chars().count() < MIN_QUERY_CHARS || normalize(query).is_empty() {
        return SearchResults::default();
    }

    let citizens = scope
        .citizens
        .iter()
        .filter(|c| {
            any_match(
                &[Some(c.surname.as_str()), Some(c.first_name.as_str()), c.mobile.as_deref(), c.email.as_deref()],
                query,
            )
        })
        .take(MAX_HITS_PER_KIND)
        .map(|c| SearchHit {
            id: c.id.clone(),
            kind: SearchKind::Citizen,
            title: c.full_name(),
            subtitle: c.mobile.clone().or_else(|| c.email.clone()).unwrap_or_default(),
            href: format!("/dashboard/citizens/{}", c.id),
        })
        .collect();

    let requests = scope
        .requests
        .iter()
        .filter(|r| matches(r.request_text.as_deref(), query))
        .take(MAX_HITS_PER_KIND)
        .map(|r| SearchHit {
            id: r.id.clone(),
            kind: SearchKind::Request,
            title: r
                .request_text
                .as_deref()
                .map(truncate_title)
                .unwrap_or_else(|| r.category.code().to_string()),
            subtitle: r.category.code().to_string(),
            href: format!("/dashboard/requests/{}", r.id),
        })
        .collect();

    let communications = scope
        .communications
        .iter()
        .filter(|c| matches(c.notes.as_deref(), query))
        .take(MAX_HITS_PER_KIND)
        .map(|c| SearchHit {
            id: c.id.clone(),
            kind: SearchKind::Communication,
            title: c
                .notes
                .as_deref()
                .map(truncate_title)
                .unwrap_or_else(|| c.comm_type.code().to_string()),
            subtitle: c.comm_type.code().to_string(),
            href: "/dashboard/communications".to_string(),
        })
        .collect();

    let military = scope
        .military
        .iter()
        .filter(|m| any_match(&[Some(m.surname.as_str()), Some(m.first_name.as_str()), m.mobile.as_deref()], query))
        .take(MAX_HITS_PER_KIND)
        .map(|m| SearchHit {
            id: m.id.clone(),
            kind: SearchKind::Military,
            title: m.full_name(),
            subtitle: match m.military_type {
                MilitaryType::Conscript => "Κληρωτός".to_string(),
                MilitaryType::Permanent => "Μόνιμος".to_string(),
            },
            href: format!("/dashboard/military/{}", m.id),
        })
        .collect();

    SearchResults {
        citizens,
        requests,
        communications,
        military,
    }
}
