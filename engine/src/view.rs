//! FILENAME: engine/src/view.rs
//! PURPOSE: Filter-then-paginate derivation and the state object list screens hold.
//! CONTEXT: The screen owns a `ListView`: the last fetched snapshot plus the
//! navigational state. Pages are derived on demand from (snapshot, criteria,
//! requested page), so a refetch after a change notification or a narrower
//! filter re-clamps the page with no reset call.

use crate::feed::{ChangeFeed, EntityKind, FetchError, SubscriptionId};
use crate::filter::FilterCriteria;
use crate::pagination::{derive, Page, Paginator, PersistedPageChange, QueryParams};
use crate::{log_debug, log_warn};
use std::cell::Cell;
use std::rc::Rc;

/// Page size and requested page for one derivation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub items_per_page: usize,
    pub requested_page: i64,
}

impl PageRequest {
    pub fn new(items_per_page: usize, requested_page: i64) -> Self {
        PageRequest {
            items_per_page,
            requested_page,
        }
    }
}

/// Filters `records` and returns the requested page of the matches.
pub fn derive_filtered_page<'a, T>(
    records: &'a [T],
    criteria: &FilterCriteria<T>,
    request: PageRequest,
) -> Page<&'a T> {
    let filtered = criteria.apply(records);
    derive(&filtered, request.items_per_page, request.requested_page)
}

/// State of one paginated list screen.
#[derive(Debug)]
pub struct ListView<T> {
    records: Vec<T>,
    paginator: Paginator,
    query: QueryParams,
    last_error: Option<String>,
    stale: Rc<Cell<bool>>,
}

impl<T> ListView<T> {
    pub fn new(paginator: Paginator) -> Self {
        ListView {
            records: Vec::new(),
            paginator,
            query: QueryParams::new(),
            last_error: None,
            // Nothing fetched yet
            stale: Rc::new(Cell::new(true)),
        }
    }

    /// Starts from an existing query string, e.g. the URL the screen was opened with.
    pub fn with_query(mut self, query: QueryParams) -> Self {
        self.query = query;
        self
    }

    pub fn records(&self) -> &[T] {
        &self.records
    }

    pub fn query(&self) -> &QueryParams {
        &self.query
    }

    pub fn paginator(&self) -> &Paginator {
        &self.paginator
    }

    /// Message of the last failed fetch, cleared by the next successful one.
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// True when a change notification arrived since the last refresh.
    pub fn is_stale(&self) -> bool {
        self.stale.get()
    }

    /// Replaces the snapshot wholesale.
    pub fn refresh(&mut self, records: Vec<T>) {
        log_debug!("VIEW", "refresh {} records", records.len());
        self.records = records;
        self.last_error = None;
        self.stale.set(false);
    }

    /// Applies a fetch result. A failed fetch keeps the previous snapshot and
    /// records the error for the screen to show.
    pub fn refresh_from(&mut self, fetched: Result<Vec<T>, FetchError>) {
        match fetched {
            Ok(records) => self.refresh(records),
            Err(err) => {
                log_warn!("VIEW", "refresh failed: {}", err);
                self.last_error = Some(err.to_string());
                self.stale.set(false);
            }
        }
    }

    /// Subscribes to changes of `kind`; any event marks the view stale.
    pub fn watch(&self, feed: &mut ChangeFeed, kind: EntityKind) -> SubscriptionId {
        let stale = Rc::clone(&self.stale);
        feed.subscribe(kind, move |_| stale.set(true))
    }

    pub fn requested_page(&self) -> i64 {
        self.paginator.requested_page(&self.query)
    }

    /// The current page of the records accepted by `criteria`.
    pub fn page(&self, criteria: &FilterCriteria<T>) -> Page<&T> {
        derive_filtered_page(
            &self.records,
            criteria,
            PageRequest::new(self.paginator.items_per_page, self.requested_page()),
        )
    }

    /// Moves to `page` and persists it in the query state.
    pub fn set_page(&mut self, page: i64) -> PersistedPageChange {
        self.paginator.navigate(page, &mut self.query)
    }

    /// Link to `page` on `pathname`, keeping the other query parameters.
    pub fn page_href(&self, pathname: &str, page: i64) -> String {
        let mut query = self.query.clone();
        self.paginator.set_page(page).apply(&mut query);
        query.href(pathname)
    }
}

impl<T> Default for ListView<T> {
    fn default() -> Self {
        Self::new(Paginator::default())
    }
}
