//! FILENAME: stats-engine/src/definition.rs
//! Dashboard statistics - inputs, options and output shapes.
//!
//! Everything here is a plain snapshot: built fresh for one aggregation run
//! and serialized as-is for the dashboard widgets.

use engine::config::{
    CrmConfig, DEFAULT_PENDING_THRESHOLD_DAYS, DEFAULT_RECENT_ACTIVITY_LIMIT, DEFAULT_TREND_MONTHS,
};
use engine::feed::{FetchError, RecordSource};
use engine::record::{Citizen, CitizenRef, Communication, MilitaryPersonnel, ServiceRequest};
use serde::Serialize;

// ============================================================================
// OPTIONS
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatsOptions {
    /// Pending requests strictly older than this many whole days are overdue.
    pub pending_threshold_days: i64,
    /// Calendar months in the trend, current month included.
    pub trend_months: u32,
    /// Maximum entries in the recent-activity list.
    pub recent_activity_limit: usize,
}

impl Default for StatsOptions {
    fn default() -> Self {
        StatsOptions {
            pending_threshold_days: DEFAULT_PENDING_THRESHOLD_DAYS,
            trend_months: DEFAULT_TREND_MONTHS,
            recent_activity_limit: DEFAULT_RECENT_ACTIVITY_LIMIT,
        }
    }
}

impl From<&CrmConfig> for StatsOptions {
    fn from(config: &CrmConfig) -> Self {
        StatsOptions {
            pending_threshold_days: config.pending_threshold_days,
            trend_months: config.trend_months,
            recent_activity_limit: config.recent_activity_limit,
        }
    }
}

// ============================================================================
// SOURCES
// ============================================================================

/// The four sub-fetches feeding the dashboard. A failed fetch counts as an
/// empty collection; it never aborts the aggregation.
#[derive(Debug)]
pub struct DashboardSources {
    pub citizens: Result<Vec<Citizen>, FetchError>,
    pub requests: Result<Vec<ServiceRequest>, FetchError>,
    pub communications: Result<Vec<Communication>, FetchError>,
    pub military: Result<Vec<MilitaryPersonnel>, FetchError>,
}

impl DashboardSources {
    /// Runs every sub-fetch against `source`.
    pub fn gather<S: RecordSource + ?Sized>(source: &S) -> Self {
        DashboardSources {
            citizens: source.list_citizens(),
            requests: source.list_requests(),
            communications: source.list_communications(),
            military: source.list_military(),
        }
    }

    pub fn from_snapshots(
        citizens: Vec<Citizen>,
        requests: Vec<ServiceRequest>,
        communications: Vec<Communication>,
        military: Vec<MilitaryPersonnel>,
    ) -> Self {
        DashboardSources {
            citizens: Ok(citizens),
            requests: Ok(requests),
            communications: Ok(communications),
            military: Ok(military),
        }
    }
}

impl Default for DashboardSources {
    fn default() -> Self {
        Self::from_snapshots(Vec::new(), Vec::new(), Vec::new(), Vec::new())
    }
}

// ============================================================================
// OUTPUT
// ============================================================================

/// One grouped count. `key` is the stored code, `label` its display text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AggregationBucket {
    pub key: String,
    pub label: String,
    pub count: usize,
}

/// Requests submitted in one calendar month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthBucket {
    /// `YYYY-MM`
    pub key: String,
    /// Short Greek month name
    pub label: String,
    pub requests: usize,
    pub completed: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ActivityKind {
    Request,
    Communication,
    Military,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActivityItem {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: ActivityKind,
    pub title: String,
    pub description: String,
    pub date: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub citizen: Option<CitizenRef>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_citizens: usize,
    pub total_requests: usize,
    pub total_communications: usize,
    pub total_military: usize,
    /// Requests still pending.
    pub active_requests: usize,
    pub completed_requests: usize,
    pub pending_over_threshold: usize,
    pub requests_by_category: Vec<AggregationBucket>,
    pub requests_by_status: Vec<AggregationBucket>,
    pub monthly_trend: Vec<MonthBucket>,
    pub recent_activity: Vec<ActivityItem>,
}
