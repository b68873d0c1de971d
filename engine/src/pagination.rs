//! FILENAME: engine/src/pagination.rs
//! PURPOSE: Slices a record list into pages and keeps the current page in
//! navigational state (a URL query parameter in the web client).
//! CONTEXT: `derive` is a pure function of (items, page size, requested page)
//! and always clamps, so a shrinking source list re-clamps the visible page
//! without an explicit reset. Page 1 is canonical: it is never written to
//! the navigational state, only cleared from it.

use serde::Serialize;

/// Page size used by every list view unless configured otherwise.
pub const DEFAULT_ITEMS_PER_PAGE: usize = 20;

/// Query parameter holding the current page.
pub const DEFAULT_PAGE_PARAM: &str = "page";

/// Page links shown at most before switching to the ellipsis layout.
const MAX_PAGE_LINKS: usize = 5;

// ============================================================================
// PAGE
// ============================================================================

/// One page of a (possibly filtered) collection.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub current_page: usize,
    pub total_pages: usize,
    pub total_items: usize,
    pub items_per_page: usize,
    pub items: Vec<T>,
}

/// An entry in the page-number strip.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageLink {
    Number(usize),
    Ellipsis,
}

impl<T> Page<T> {
    pub fn has_previous(&self) -> bool {
        self.current_page > 1
    }

    pub fn has_next(&self) -> bool {
        self.current_page < self.total_pages
    }

    /// 1-based index of the first item on this page (0 when empty).
    pub fn first_item(&self) -> usize {
        if self.total_items == 0 {
            0
        } else {
            (self.current_page - 1) * self.items_per_page + 1
        }
    }

    /// 1-based index of the last item on this page.
    pub fn last_item(&self) -> usize {
        (self.current_page * self.items_per_page).min(self.total_items)
    }

    /// "Εμφάνιση 11-20 από 45 εγγραφές"
    pub fn summary(&self) -> String {
        format!(
            "Εμφάνιση {}-{} από {} εγγραφές",
            self.first_item(),
            self.last_item(),
            self.total_items
        )
    }

    /// Page numbers to render: all of them for short lists, otherwise the
    /// first, the last and the neighbours of the current page with
    /// ellipses for the gaps.
    pub fn page_links(&self) -> Vec<PageLink> {
        let total = self.total_pages;
        let current = self.current_page;

        if total <= MAX_PAGE_LINKS {
            return (1..=total).map(PageLink::Number).collect();
        }

        let mut links = vec![PageLink::Number(1)];
        if current > 3 {
            links.push(PageLink::Ellipsis);
        }
        let start = current.saturating_sub(1).max(2);
        let end = (current + 1).min(total - 1);
        for n in start..=end {
            links.push(PageLink::Number(n));
        }
        if current + 2 < total {
            links.push(PageLink::Ellipsis);
        }
        links.push(PageLink::Number(total));
        links
    }
}

/// `max(1, ceil(total_items / items_per_page))`. A zero page size is read as 1.
pub fn total_pages(total_items: usize, items_per_page: usize) -> usize {
    let per_page = items_per_page.max(1);
    total_items.div_ceil(per_page).max(1)
}

/// Clamps a requested page into `1..=total_pages`.
pub fn clamp_page(requested: i64, total_pages: usize) -> usize {
    if requested < 1 {
        1
    } else {
        (requested as u64).min(total_pages as u64) as usize
    }
}

/// Computes the requested page of `items`, clamping out-of-range requests.
pub fn derive<T: Clone>(items: &[T], items_per_page: usize, requested_page: i64) -> Page<T> {
    let per_page = items_per_page.max(1);
    let total_items = items.len();
    let total_pages = total_pages(total_items, per_page);
    let current_page = clamp_page(requested_page, total_pages);

    let start = ((current_page - 1) * per_page).min(total_items);
    let end = (start + per_page).min(total_items);

    Page {
        current_page,
        total_pages,
        total_items,
        items_per_page: per_page,
        items: items[start..end].to_vec(),
    }
}

/// Reads a raw page parameter the way the browser client does: leading
/// digits parse as the page, anything else (or a value below 1) is page 1.
pub fn parse_page_param(raw: Option<&str>) -> i64 {
    let Some(raw) = raw else {
        return 1;
    };
    let raw = raw.trim_start();
    let digits: String = raw
        .strip_prefix('+')
        .unwrap_or(raw)
        .chars()
        .take_while(|c| c.is_ascii_digit())
        .collect();
    match digits.parse::<i64>() {
        Ok(page) if page >= 1 => page,
        // Overflowing digit runs are still "a very large page"
        Err(_) if !digits.is_empty() => i64::MAX,
        _ => 1,
    }
}

// ============================================================================
// NAVIGATIONAL STATE
// ============================================================================

/// Key/value navigational state, e.g. the query string of the current URL.
pub trait QueryState {
    fn get(&self, key: &str) -> Option<&str>;
    fn set(&mut self, key: &str, value: &str);
    fn delete(&mut self, key: &str);
}

/// An ordered in-memory query string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    pairs: Vec<(String, String)>,
}

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses `a=1&b=2` (an optional leading `?` is ignored). Keys and values
    /// are form-decoded: `+` is a space and `%XX` escapes are resolved.
    pub fn parse(query: &str) -> Self {
        let query = query.strip_prefix('?').unwrap_or(query);
        let pairs = query
            .split('&')
            .filter(|part| !part.is_empty())
            .map(|part| match part.split_once('=') {
                Some((k, v)) => (decode_component(k), decode_component(v)),
                None => (decode_component(part), String::new()),
            })
            .collect();
        QueryParams { pairs }
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn to_query_string(&self) -> String {
        self.pairs
            .iter()
            .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
            .collect::<Vec<_>>()
            .join("&")
    }

    /// `pathname?query`, or just `pathname` when there is no query.
    pub fn href(&self, pathname: &str) -> String {
        if self.is_empty() {
            pathname.to_string()
        } else {
            format!("{}?{}", pathname, self.to_query_string())
        }
    }
}

/// Invalid UTF-8 escapes leave the component as written.
fn decode_component(raw: &str) -> String {
    let spaced = raw.replace('+', " ");
    match urlencoding::decode(&spaced) {
        Ok(decoded) => decoded.into_owned(),
        Err(_) => spaced,
    }
}

impl QueryState for QueryParams {
    fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    fn set(&mut self, key: &str, value: &str) {
        match self.pairs.iter_mut().find(|(k, _)| k == key) {
            Some(pair) => pair.1 = value.to_string(),
            None => self.pairs.push((key.to_string(), value.to_string())),
        }
    }

    fn delete(&mut self, key: &str) {
        self.pairs.retain(|(k, _)| k != key);
    }
}

/// Instruction to persist a page change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PersistedPageChange {
    /// Remove the page key (page 1 has no explicit marker).
    Clear { key: String },
    /// Write the page number under the key.
    Set { key: String, value: String },
}

impl PersistedPageChange {
    pub fn apply<S: QueryState + ?Sized>(&self, state: &mut S) {
        match self {
            PersistedPageChange::Clear { key } => state.delete(key),
            PersistedPageChange::Set { key, value } => state.set(key, value),
        }
    }
}

// ============================================================================
// PAGINATOR
// ============================================================================

/// Pagination settings for one list view. Views sharing a screen use
/// distinct parameter names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Paginator {
    pub items_per_page: usize,
    pub param_name: String,
}

impl Paginator {
    pub fn new() -> Self {
        Paginator {
            items_per_page: DEFAULT_ITEMS_PER_PAGE,
            param_name: DEFAULT_PAGE_PARAM.to_string(),
        }
    }

    pub fn with_items_per_page(mut self, items_per_page: usize) -> Self {
        self.items_per_page = items_per_page.max(1);
        self
    }

    pub fn with_param_name(mut self, param_name: impl Into<String>) -> Self {
        self.param_name = param_name.into();
        self
    }

    /// The page requested by the navigational state (unclamped).
    pub fn requested_page<S: QueryState + ?Sized>(&self, state: &S) -> i64 {
        parse_page_param(state.get(&self.param_name))
    }

    pub fn page<T: Clone, S: QueryState + ?Sized>(&self, items: &[T], state: &S) -> Page<T> {
        derive(items, self.items_per_page, self.requested_page(state))
    }

    pub fn set_page(&self, page: i64) -> PersistedPageChange {
        if page <= 1 {
            PersistedPageChange::Clear { key: self.param_name.clone() }
        } else {
            PersistedPageChange::Set {
                key: self.param_name.clone(),
                value: page.to_string(),
            }
        }
    }

    /// Builds the change for `page` and applies it to `state`.
    pub fn navigate<S: QueryState + ?Sized>(&self, page: i64, state: &mut S) -> PersistedPageChange {
        let change = self.set_page(page);
        change.apply(state);
        change
    }
}

impl Default for Paginator {
    fn default() -> Self {
        Self::new()
    }
}
