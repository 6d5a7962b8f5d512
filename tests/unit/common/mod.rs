//! Common test utilities

use chrono::{DateTime, Duration, SecondsFormat, TimeZone, Utc};

use trackr::models::RankableTask;

/// Fixed "now" so due-date arithmetic is reproducible
pub fn fixed_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 2, 12, 0, 0).single().expect("valid timestamp")
}

/// ISO-8601 timestamp `days` days after `fixed_now`
pub fn due_in_days(days: i64) -> String {
    (fixed_now() + Duration::days(days)).to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// Build a rankable task with the given attributes
pub fn rankable(
    id: &str,
    title: &str,
    due_at: Option<String>,
    weight: i64,
    hours: i64,
) -> RankableTask {
    RankableTask {
        id: id.to_string(),
        title: title.to_string(),
        module: "General".to_string(),
        due_at,
        module_weight_percent: weight,
        estimated_hours: hours,
        notes: String::new(),
    }
}
