//! FILENAME: engine/src/config.rs
//! PURPOSE: Tunable settings shared by the list, export and dashboard layers.
//! CONTEXT: Loaded from JSON; every field is optional and falls back to the
//! named default below.

use crate::pagination::{Paginator, DEFAULT_ITEMS_PER_PAGE, DEFAULT_PAGE_PARAM};
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Pending requests older than this many days count as overdue.
pub const DEFAULT_PENDING_THRESHOLD_DAYS: i64 = 25;

/// Calendar months in the dashboard request trend, current month included.
pub const DEFAULT_TREND_MONTHS: u32 = 6;

/// Upper bound for `pending_threshold_days` (ten years).
pub const MAX_PENDING_THRESHOLD_DAYS: i64 = 3650;

/// Upper bound for `trend_months` (ten years).
pub const MAX_TREND_MONTHS: u32 = 120;

/// Entries kept in the dashboard recent-activity list.
pub const DEFAULT_RECENT_ACTIVITY_LIMIT: usize = 10;

pub const DEFAULT_EXPORT_SHEET_NAME: &str = "Δεδομένα";

pub const DEFAULT_EXPORT_FILE_NAME: &str = "export";

/// Worksheet names are capped at 31 characters by the xlsx format.
const MAX_SHEET_NAME_CHARS: usize = 31;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid value for {field}: {reason}")]
    Invalid { field: &'static str, reason: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CrmConfig {
    pub items_per_page: usize,
    pub page_param: String,
    pub pending_threshold_days: i64,
    pub trend_months: u32,
    pub recent_activity_limit: usize,
    pub export_sheet_name: String,
    pub export_file_name: String,
}

impl Default for CrmConfig {
    fn default() -> Self {
        CrmConfig {
            items_per_page: DEFAULT_ITEMS_PER_PAGE,
            page_param: DEFAULT_PAGE_PARAM.to_string(),
            pending_threshold_days: DEFAULT_PENDING_THRESHOLD_DAYS,
            trend_months: DEFAULT_TREND_MONTHS,
            recent_activity_limit: DEFAULT_RECENT_ACTIVITY_LIMIT,
            export_sheet_name: DEFAULT_EXPORT_SHEET_NAME.to_string(),
            export_file_name: DEFAULT_EXPORT_FILE_NAME.to_string(),
        }
    }
}

impl CrmConfig {
    /// Parses and validates a JSON document.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: CrmConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.items_per_page == 0 {
            return Err(invalid("items_per_page", "must be at least 1"));
        }
        if self.page_param.trim().is_empty() {
            return Err(invalid("page_param", "must not be empty"));
        }
        if !(0..=MAX_PENDING_THRESHOLD_DAYS).contains(&self.pending_threshold_days) {
            return Err(invalid(
                "pending_threshold_days",
                format!("must be 0-{}", MAX_PENDING_THRESHOLD_DAYS),
            ));
        }
        if !(1..=MAX_TREND_MONTHS).contains(&self.trend_months) {
            return Err(invalid("trend_months", format!("must be 1-{}", MAX_TREND_MONTHS)));
        }
        let sheet_chars = self.export_sheet_name.chars().count();
        if sheet_chars == 0 || sheet_chars > MAX_SHEET_NAME_CHARS {
            return Err(invalid(
                "export_sheet_name",
                format!("must be 1-{} characters", MAX_SHEET_NAME_CHARS),
            ));
        }
        if self.export_file_name.trim().is_empty() {
            return Err(invalid("export_file_name", "must not be empty"));
        }
        Ok(())
    }
}

impl From<&CrmConfig> for Paginator {
    fn from(config: &CrmConfig) -> Self {
        Paginator::new()
            .with_items_per_page(config.items_per_page)
            .with_param_name(config.page_param.clone())
    }
}

fn invalid(field: &'static str, reason: impl Into<String>) -> ConfigError {
    ConfigError::Invalid {
        field,
        reason: reason.into(),
    }
}
