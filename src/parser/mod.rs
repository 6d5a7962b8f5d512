//! Assignment parser
//!
//! Extracts candidate assignments from raw page markup using a cheap
//! tag-text heuristic (`>...<` runs), not a full HTML parser. Pure: no I/O,
//! never fails, and always yields at least one record so downstream stages
//! have something to rank.
//!
//! Keyword and skip-word tables are passed in as data so tests and callers
//! can substitute their own.

use chrono::{DateTime, Duration, SecondsFormat, Utc};
use regex::Regex;

use crate::models::Assignment;

/// Maximum number of assignments extracted from one page
const MAX_ASSIGNMENTS: usize = 8;

/// Provenance note attached to every parsed assignment
const PARSED_NOTE: &str = "Parsed from page content";

/// Keyword-to-category table plus boilerplate skip-words
#[derive(Debug, Clone)]
pub struct ModuleTable {
    /// `(keyword, category)` pairs; first matching keyword wins
    pub keywords: Vec<(String, String)>,
    /// Titles containing any of these (case-insensitive) are dropped
    pub skip_words: Vec<String>,
    /// Category when no keyword matches
    pub default_module: String,
}

impl Default for ModuleTable {
    fn default() -> Self {
        Self {
            keywords: vec![
                ("math".to_string(), "Math".to_string()),
                ("business".to_string(), "Business".to_string()),
                ("econom".to_string(), "Economics".to_string()),
                ("sport".to_string(), "Sport".to_string()),
            ],
            skip_words: vec![
                "login".to_string(),
                "cookie".to_string(),
                "privacy".to_string(),
                "accept".to_string(),
            ],
            default_module: "General".to_string(),
        }
    }
}

impl ModuleTable {
    /// Resolve the category for a title
    #[must_use]
    pub fn module_for(&self, title: &str) -> String {
        let lowered = title.to_lowercase();
        self.keywords
            .iter()
            .find(|(keyword, _)| lowered.contains(keyword.as_str()))
            .map_or_else(|| self.default_module.clone(), |(_, category)| category.clone())
    }

    fn is_boilerplate(&self, title: &str) -> bool {
        let lowered = title.to_lowercase();
        self.skip_words.iter().any(|skip| lowered.contains(skip.as_str()))
    }
}

/// Parse assignments from raw markup
///
/// Convenience wrapper over [`parse_assignments_at`] using the current time
/// for due-date synthesis.
#[must_use]
pub fn parse_assignments(raw_markup: &str, table: &ModuleTable) -> Vec<Assignment> {
    parse_assignments_at(raw_markup, table, Utc::now())
}

/// Parse assignments from raw markup with a fixed "now"
///
/// Extracts text runs enclosed by `>...<` (4-120 chars), drops boilerplate,
/// deduplicates case-insensitively preserving first-seen order, and keeps at
/// most the first eight titles. Due dates are synthesized placeholders
/// (flagged via `due_at_is_synthetic`), bounded to `[i, i+14)` days out for
/// the i-th assignment.
#[must_use]
pub fn parse_assignments_at(
    raw_markup: &str,
    table: &ModuleTable,
    now: DateTime<Utc>,
) -> Vec<Assignment> {
    let tag_text = Regex::new(r">([^<>]{4,120})<").expect("tag-text pattern is valid");

    let mut titles: Vec<String> = Vec::new();
    let mut seen: Vec<String> = Vec::new();

    for capture in tag_text.captures_iter(raw_markup) {
        let value = capture[1].split_whitespace().collect::<Vec<_>>().join(" ");
        if value.is_empty() || table.is_boilerplate(&value) {
            continue;
        }
        let key = value.to_lowercase();
        if seen.contains(&key) {
            continue;
        }
        seen.push(key);
        titles.push(value);
        if titles.len() == MAX_ASSIGNMENTS {
            break;
        }
    }

    if titles.is_empty() {
        return vec![fallback_assignment(now)];
    }

    titles
        .iter()
        .enumerate()
        .map(|(idx, title)| {
            let position = (idx + 1) as i64;
            Assignment {
                title: title.clone(),
                module: table.module_for(title),
                due_at: Some(synthesize_due_date(title, position, now)),
                due_at_is_synthetic: true,
                module_weight_percent: (50 - position * 3).max(10),
                estimated_hours: (2 + position).min(10),
                notes: PARSED_NOTE.to_string(),
            }
        })
        .collect()
}

/// Well-formed placeholder returned when nothing survives extraction
fn fallback_assignment(now: DateTime<Utc>) -> Assignment {
    let title = "Mock Coursework Task";
    let hash = fnv1a(title);
    let days = 2 + (hash % 12) as i64;
    let due = now + Duration::days(days) + Duration::seconds(((hash >> 8) % 86_400) as i64);

    Assignment {
        title: title.to_string(),
        module: "General".to_string(),
        due_at: Some(due.to_rfc3339_opts(SecondsFormat::Secs, true)),
        due_at_is_synthetic: true,
        module_weight_percent: 25,
        estimated_hours: 3,
        notes: "Fallback assignment".to_string(),
    }
}

/// Synthesize a placeholder due date for the assignment at `position`
///
/// Deterministic for a given (title, position, now): the title hash picks a
/// day offset in `[position, position+13]` plus sub-day noise, keeping the
/// date strictly inside the `[position, position+14)` day window and always
/// in the future.
fn synthesize_due_date(title: &str, position: i64, now: DateTime<Utc>) -> String {
    let hash = fnv1a(title);
    let days = position + (hash % 14) as i64;
    let noise_seconds = ((hash >> 8) % 86_400) as i64;
    let due = now + Duration::days(days) + Duration::seconds(noise_seconds);
    due.to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// FNV-1a hash, used as a cheap deterministic noise source
fn fnv1a(input: &str) -> u64 {
    let mut hash: u64 = 0xcbf2_9ce4_8422_2325;
    for byte in input.bytes() {
        hash ^= u64::from(byte);
        hash = hash.wrapping_mul(0x0100_0000_01b3);
    }
    hash
}
