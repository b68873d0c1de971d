//! FILENAME: stats-engine/src/reminders.rs
//! PURPOSE: Picks the pending requests that are due a follow-up reminder.
//! CONTEXT: The mail sending itself is external. This only decides who is due,
//! oldest first, so the caller can send and then flag `reminder_sent`.

use chrono::{Duration, NaiveDate};
use engine::dates::parse_date;
use engine::log_warn;
use engine::record::{CitizenRef, RequestCategory, RequestStatus, ServiceRequest};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReminderCandidate {
    pub request_id: String,
    pub citizen_id: String,
    pub citizen: Option<CitizenRef>,
    pub category: RequestCategory,
    pub submitted_at: String,
    pub days_pending: i64,
}

/// Pending, not yet reminded, and submitted on or before `today - days`.
/// A `days` value outside the calendar range selects nothing.
pub fn select_reminders(requests: &[ServiceRequest], today: NaiveDate, days: i64) -> Vec<ReminderCandidate> {
    let Some(cutoff) = Duration::try_days(days).and_then(|d| today.checked_sub_signed(d)) else {
        log_warn!("REMINDERS", "cutoff out of range for {} days", days);
        return Vec::new();
    };

    let mut due: Vec<(NaiveDate, &ServiceRequest)> = requests
        .iter()
        .filter(|r| r.status == RequestStatus::Pending && !r.reminder_sent)
        .filter_map(|r| parse_date(&r.submitted_at).map(|d| (d, r)))
        .filter(|(submitted, _)| *submitted <= cutoff)
        .collect();
    due.sort_by_key(|(submitted, _)| *submitted);

    due.into_iter()
        .map(|(submitted, r)| ReminderCandidate {
            request_id: r.id.clone(),
            citizen_id: r.citizen_id.clone(),
            citizen: r.citizen.clone(),
            category: r.category,
            submitted_at: r.submitted_at.clone(),
            days_pending: (today - submitted).num_days(),
        })
        .collect()
}
