//! FILENAME: stats-engine/src/aggregate.rs
//! Dashboard aggregation.
//!
//! Pure functions over already-fetched snapshots. "Now" is always passed in
//! so the results are reproducible.

use crate::definition::{
    ActivityItem, ActivityKind, AggregationBucket, DashboardSources, DashboardStats, MonthBucket,
    StatsOptions,
};
use chrono::NaiveDateTime;
use engine::config::MAX_TREND_MONTHS;
use engine::dates::{days_between, greek_month_abbrev, parse_timestamp, shift_month, year_month};
use engine::feed::{EntityKind, FetchError, RecordSource};
use engine::record::{
    Citizen, CitizenRef, Communication, MilitaryPersonnel, RequestCategory, RequestStatus,
    ServiceRequest,
};
use engine::{log_debug, log_warn};
use rustc_hash::FxHashMap;
use std::cmp::Reverse;

/// Activity description used when a record has no text.
pub const NO_NOTE: &str = "Χωρίς σημείωση";

// ============================================================================
// ENTRY POINT
// ============================================================================

pub fn compute_dashboard_stats(
    sources: &DashboardSources,
    now: NaiveDateTime,
    options: &StatsOptions,
) -> DashboardStats {
    let citizens = snapshot(EntityKind::Citizens, &sources.citizens);
    let requests = snapshot(EntityKind::Requests, &sources.requests);
    let communications = snapshot(EntityKind::Communications, &sources.communications);
    let military = snapshot(EntityKind::Military, &sources.military);

    let stats = DashboardStats {
        total_citizens: citizens.iter().filter(|c| c.is_active).count(),
        total_requests: requests.len(),
        total_communications: communications.len(),
        total_military: military.len(),
        active_requests: count_status(requests, RequestStatus::Pending),
        completed_requests: count_status(requests, RequestStatus::Completed),
        pending_over_threshold: pending_over_threshold(requests, now, options.pending_threshold_days),
        requests_by_category: requests_by_category(requests),
        requests_by_status: requests_by_status(requests),
        monthly_trend: monthly_trend(requests, now, options.trend_months),
        recent_activity: recent_activity(
            citizens,
            requests,
            communications,
            military,
            options.recent_activity_limit,
        ),
    };

    log_debug!(
        "STATS",
        "computed: requests={} pending={} overdue={}",
        stats.total_requests,
        stats.active_requests,
        stats.pending_over_threshold
    );
    stats
}

/// Fetches every collection from `source` and aggregates.
pub fn gather_and_compute<S: RecordSource + ?Sized>(
    source: &S,
    now: NaiveDateTime,
    options: &StatsOptions,
) -> DashboardStats {
    compute_dashboard_stats(&DashboardSources::gather(source), now, options)
}

/// A failed sub-fetch reads as an empty collection.
fn snapshot<T>(kind: EntityKind, fetched: &Result<Vec<T>, FetchError>) -> &[T] {
    match fetched {
        Ok(records) => records,
        Err(err) => {
            log_warn!("STATS", "{} fetch failed, counting as empty: {}", kind, err);
            &[]
        }
    }
}

fn count_status(requests: &[ServiceRequest], status: RequestStatus) -> usize {
    requests.iter().filter(|r| r.status == status).count()
}

// ============================================================================
// THRESHOLD
// ============================================================================

/// Pending requests submitted more than `threshold_days` whole days before
/// `now`. Unparseable submission dates are skipped.
pub fn pending_over_threshold(requests: &[ServiceRequest], now: NaiveDateTime, threshold_days: i64) -> usize {
    requests
        .iter()
        .filter(|r| r.status == RequestStatus::Pending)
        .filter_map(|r| parse_timestamp(&r.submitted_at))
        .filter(|submitted| days_between(*submitted, now) > threshold_days)
        .count()
}

// ============================================================================
// GROUPING
// ============================================================================

/// Counts by key, ordered by descending count. Ties keep first-seen order.
pub fn group_counts<'a, I>(keys: I) -> Vec<(&'a str, usize)>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut index: FxHashMap<&'a str, usize> = FxHashMap::default();
    let mut counts: Vec<(&'a str, usize)> = Vec::new();

    for key in keys {
        match index.get(key) {
            Some(&slot) => counts[slot].1 += 1,
            None => {
                index.insert(key, counts.len());
                counts.push((key, 1));
            }
        }
    }

    // Stable sort keeps first-seen order among equal counts
    counts.sort_by_key(|&(_, count)| Reverse(count));
    counts
}

pub fn requests_by_category(requests: &[ServiceRequest]) -> Vec<AggregationBucket> {
    group_counts(requests.iter().map(|r| r.category.code()))
        .into_iter()
        .map(|(key, count)| AggregationBucket {
            key: key.to_string(),
            label: RequestCategory::from_code(key)
                .map(RequestCategory::label)
                .unwrap_or(key)
                .to_string(),
            count,
        })
        .collect()
}

pub fn requests_by_status(requests: &[ServiceRequest]) -> Vec<AggregationBucket> {
    group_counts(requests.iter().map(|r| r.status.code()))
        .into_iter()
        .map(|(key, count)| AggregationBucket {
            key: key.to_string(),
            label: RequestStatus::from_code(key)
                .map(RequestStatus::label)
                .unwrap_or(key)
                .to_string(),
            count,
        })
        .collect()
}

// ============================================================================
// MONTHLY TREND
// ============================================================================

/// One bucket per calendar month, oldest first, ending with the month of
/// `now`. Months without requests are present with zero counts. The window
/// is capped at `MAX_TREND_MONTHS`.
pub fn monthly_trend(requests: &[ServiceRequest], now: NaiveDateTime, months: u32) -> Vec<MonthBucket> {
    let months = months.min(MAX_TREND_MONTHS);
    let (year, month) = year_month(&now);
    let span = months as i32;

    let mut buckets: Vec<MonthBucket> = Vec::with_capacity(months as usize);
    let mut slots: FxHashMap<(i32, u32), usize> = FxHashMap::default();

    for offset in (0..span).rev() {
        let (y, m) = shift_month(year, month, -offset);
        slots.insert((y, m), buckets.len());
        buckets.push(MonthBucket {
            key: format!("{}-{:02}", y, m),
            label: greek_month_abbrev(m).to_string(),
            requests: 0,
            completed: 0,
        });
    }

    for request in requests {
        let Some(submitted) = parse_timestamp(&request.submitted_at) else {
            continue;
        };
        if let Some(&slot) = slots.get(&year_month(&submitted)) {
            buckets[slot].requests += 1;
            if request.status == RequestStatus::Completed {
                buckets[slot].completed += 1;
            }
        }
    }

    buckets
}

// ============================================================================
// RECENT ACTIVITY
// ============================================================================

fn note_or_default(text: Option<&str>) -> String {
    match text {
        Some(t) if !t.trim().is_empty() => t.to_string(),
        _ => NO_NOTE.to_string(),
    }
}

/// Newest `limit` records of one kind, by parsed date. Unparseable dates sort last.
fn newest<T, F>(records: &[T], date_of: F, limit: usize) -> Vec<&T>
where
    F: Fn(&T) -> &str,
{
    let mut sorted: Vec<&T> = records.iter().collect();
    sorted.sort_by_key(|r| Reverse(parse_timestamp(date_of(*r))));
    sorted.truncate(limit);
    sorted
}

/// Communications, requests and new military registrations merged into one
/// list, newest first, at most `limit` entries.
pub fn recent_activity(
    citizens: &[Citizen],
    requests: &[ServiceRequest],
    communications: &[Communication],
    military: &[MilitaryPersonnel],
    limit: usize,
) -> Vec<ActivityItem> {
    let by_id: FxHashMap<&str, &Citizen> = citizens.iter().map(|c| (c.id.as_str(), c)).collect();
    let lookup = |embedded: &Option<CitizenRef>, citizen_id: &str| -> Option<CitizenRef> {
        embedded
            .clone()
            .or_else(|| by_id.get(citizen_id).map(|c| c.to_ref()))
    };

    let mut items: Vec<ActivityItem> = Vec::new();

    for comm in newest(communications, |c| c.communication_date.as_str(), limit) {
        items.push(ActivityItem {
            id: comm.id.clone(),
            kind: ActivityKind::Communication,
            title: comm.comm_type.activity_title().to_string(),
            description: note_or_default(comm.notes.as_deref()),
            date: comm.communication_date.clone(),
            citizen: lookup(&comm.citizen, &comm.citizen_id),
        });
    }

    for request in newest(requests, |r| r.submitted_at.as_str(), limit) {
        items.push(ActivityItem {
            id: request.id.clone(),
            kind: ActivityKind::Request,
            title: request.category.label().to_string(),
            description: note_or_default(request.request_text.as_deref()),
            date: request.submitted_at.clone(),
            citizen: lookup(&request.citizen, &request.citizen_id),
        });
    }

    for person in newest(military, |m| m.created_at.as_str(), limit) {
        items.push(ActivityItem {
            id: person.id.clone(),
            kind: ActivityKind::Military,
            title: person.military_type.label().to_string(),
            description: person.full_name(),
            date: person.created_at.clone(),
            citizen: person
                .citizen_id
                .as_deref()
                .and_then(|id| by_id.get(id))
                .map(|c| c.to_ref()),
        });
    }

    items.sort_by_key(|item| Reverse(parse_timestamp(&item.date)));
    items.truncate(limit);
    items
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, NaiveDate};
    use engine::record::{CommunicationType, MilitaryType};

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, 15).unwrap().and_hms_opt(12, 0, 0).unwrap()
    }

    fn request(id: &str, status: RequestStatus, submitted_at: &str) -> ServiceRequest {
        ServiceRequest::new(id, "c1", RequestCategory::Medical, status, submitted_at)
    }

    fn days_ago(days: i64) -> String {
        (now() - Duration::days(days)).format("%Y-%m-%dT%H:%M:%S").to_string()
    }

    #[test]
    fn test_pending_threshold_is_strict() {
        let requests = vec![
            request("r1", RequestStatus::Pending, &days_ago(26)),
            request("r2", RequestStatus::Pending, &days_ago(24)),
            request("r3", RequestStatus::Pending, &days_ago(25)),
            request("r4", RequestStatus::Completed, &days_ago(90)),
            request("r5", RequestStatus::Pending, "not a date"),
        ];
        assert_eq!(pending_over_threshold(&requests, now(), 25), 1);
        assert_eq!(pending_over_threshold(&requests, now(), 20), 3);
    }

    #[test]
    fn test_six_month_trend_one_request_per_month() {
        let months = ["2023-10-03", "2023-11-28", "2023-12-01", "2024-01-15", "2024-02-29", "2024-03-01"];
        let requests: Vec<ServiceRequest> = months
            .iter()
            .enumerate()
            .map(|(i, date)| {
                let status = if i % 2 == 0 { RequestStatus::Completed } else { RequestStatus::Pending };
                request(&format!("r{}", i), status, date)
            })
            .collect();

        let trend = monthly_trend(&requests, now(), 6);
        assert_eq!(trend.len(), 6);
        assert!(trend.iter().all(|b| b.requests == 1));
        assert_eq!(trend.iter().filter(|b| b.completed == 1).count(), 3);
        assert_eq!(trend[0].key, "2023-10");
        assert_eq!(trend[0].label, "Οκτ");
        assert_eq!(trend[5].key, "2024-03");
    }

    #[test]
    fn test_trend_zero_fills_and_ignores_old_requests() {
        let requests = vec![
            request("r1", RequestStatus::Pending, "2024-03-01"),
            request("r2", RequestStatus::Completed, "2024-03-28"),
            request("r3", RequestStatus::Completed, "2023-09-30"),
        ];
        let trend = monthly_trend(&requests, now(), 6);
        assert_eq!(trend.len(), 6);
        assert_eq!(trend[5].requests, 2);
        assert_eq!(trend[5].completed, 1);
        assert_eq!(trend.iter().map(|b| b.requests).sum::<usize>(), 2);
    }

    #[test]
    fn test_trend_window_is_capped() {
        let requests = vec![request("r1", RequestStatus::Pending, "2024-03-01")];
        let trend = monthly_trend(&requests, now(), u32::MAX);
        assert_eq!(trend.len(), 120);
        assert_eq!(trend[0].key, "2014-04");
        assert_eq!(trend[119].key, "2024-03");
        assert_eq!(trend[119].requests, 1);
    }

    #[test]
    fn test_group_counts_orders_by_count_then_first_seen() {
        let grouped = group_counts(["B", "A", "A", "C", "B", "A", "D"]);
        assert_eq!(grouped, vec![("A", 3), ("B", 2), ("C", 1), ("D", 1)]);
    }

    #[test]
    fn test_status_buckets_carry_labels() {
        let requests = vec![
            request("r1", RequestStatus::Pending, "2024-03-01"),
            request("r2", RequestStatus::Completed, "2024-03-02"),
            request("r3", RequestStatus::Completed, "2024-03-03"),
        ];
        let buckets = requests_by_status(&requests);
        assert_eq!(buckets[0].key, "COMPLETED");
        assert_eq!(buckets[0].label, "Ολοκληρωμένο");
        assert_eq!(buckets[0].count, 2);
        assert_eq!(buckets[1].key, "PENDING");

        let categories = requests_by_category(&requests);
        assert_eq!(categories.len(), 1);
        assert_eq!(categories[0].label, "Ιατρικό");
        assert_eq!(categories[0].count, 3);
    }

    #[test]
    fn test_recent_activity_merges_and_truncates() {
        let citizen = Citizen::new("c1", "Παπαδόπουλος", "Γιώργος");

        let mut comm = Communication::new("k1", "c1", CommunicationType::Phone, "2024-03-14");
        comm.notes = Some("   ".to_string());
        let requests = vec![
            request("r1", RequestStatus::Pending, "2024-03-10"),
            request("r2", RequestStatus::Pending, "2024-03-12"),
        ];
        let mut soldier = MilitaryPersonnel::new("m1", MilitaryType::Conscript, "Νικολάου", "Άρης");
        soldier.created_at = "2024-03-13T08:00:00Z".to_string();

        let items = recent_activity(&[citizen], &requests, &[comm], &[soldier], 3);
        let ids: Vec<&str> = items.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, vec!["k1", "m1", "r2"]);

        assert_eq!(items[0].title, "Τηλεφώνημα");
        assert_eq!(items[0].description, NO_NOTE);
        assert_eq!(items[0].citizen.as_ref().map(|c| c.id.as_str()), Some("c1"));
        assert_eq!(items[1].description, "Νικολάου Άρης");
        assert_eq!(items[1].citizen, None);
        assert_eq!(items[2].title, "Ιατρικό");
    }
}
