//! FILENAME: stats-engine/src/lib.rs
//! Dashboard statistics for the CRM.
//!
//! Depends on `engine` for the records, the record source abstraction and
//! the logging macros. All aggregation is pure: snapshots and "now" go in,
//! a serializable `DashboardStats` comes out.
//!
//! Layers:
//! - `definition`: options, inputs and output shapes
//! - `aggregate`: the aggregation itself
//! - `reminders`: selection of overdue requests for follow-up

pub mod aggregate;
pub mod definition;
pub mod reminders;

pub use definition::*;
pub use aggregate::{
    compute_dashboard_stats, gather_and_compute, group_counts, monthly_trend,
    pending_over_threshold, recent_activity, requests_by_category, requests_by_status, NO_NOTE,
};
pub use reminders::{select_reminders, ReminderCandidate};
